use crate::api::SignupRequest;

pub const MIN_PASSWORD_LEN: usize = 6;

/// `local@domain.tld` with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate_signup(request: &SignupRequest) -> Result<(), String> {
    let required = [
        &request.first_name,
        &request.last_name,
        &request.email,
        &request.password,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err("All fields are required.".into());
    }
    if !is_valid_email(&request.email) {
        return Err("Please enter a valid email address.".into());
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.".into());
    }
    Ok(())
}
