//! Form validators for the join and login pages.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

const MIN_PASSWORD_LEN: usize = 8;

/// `local@domain.tld` with no whitespace and exactly one `@`.
#[must_use]
pub fn is_email_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// At least eight ASCII letters/digits, with a lowercase letter, an uppercase
/// letter and a digit.
#[must_use]
pub fn is_password_valid(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
        && password.chars().all(|c| c.is_ascii_alphanumeric())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Trim credentials and require both fields.
///
/// # Errors
///
/// Returns the message to show when either field is blank.
pub fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}
