//! Verification email content

/// Subject line of the verification email
pub const VERIFICATION_SUBJECT: &str = "Confirm Your Email Address";

/// Rendered verification email
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl std::fmt::Debug for VerificationEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationEmail")
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

/// Render the verification email for `code`
pub fn verification_email(code: &str, expiry_minutes: i64) -> VerificationEmail {
    let expiry = expiry_phrase(expiry_minutes);

    let text = format!(
        "Hello,\n\
        \n\
        Use the following code to confirm your email address:\n\
        \n\
        {code}\n\
        \n\
        This code will expire in {expiry}.\n\
        \n\
        If you did not create an account, you can ignore this email.",
    );

    let html = format!(
        "<!DOCTYPE html>\
        <html><body style=\"font-family: sans-serif;\">\
        <p>Hello,</p>\
        <p>Use the following code to confirm your email address:</p>\
        <p style=\"font-size: 24px; font-weight: bold; letter-spacing: 4px;\">{code}</p>\
        <p>This code will expire in {expiry}.</p>\
        <p>If you did not create an account, you can ignore this email.</p>\
        </body></html>",
    );

    VerificationEmail {
        subject: VERIFICATION_SUBJECT.to_string(),
        text,
        html,
    }
}

fn expiry_phrase(minutes: i64) -> String {
    if minutes == 1 {
        String::from("1 minute")
    } else {
        format!("{} minutes", minutes)
    }
}
