pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required".into());
    }
    Ok(())
}
