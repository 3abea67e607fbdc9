use super::storage::window;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

const SESSION_EXPIRED_MESSAGE: &str = "Refresh token expired or invalid. Please log in again.";

/// Reacts to the refresh endpoint rejecting the refresh credential.
pub trait SessionExpiredHandler {
    fn on_session_expired(&self);
}

/// Tells the user and sends the tab to the sign-in page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRedirect;

impl SessionExpiredHandler for BrowserRedirect {
    fn on_session_expired(&self) {
        if let Ok(window) = window() {
            let _ = window.alert_with_message(SESSION_EXPIRED_MESSAGE);
        }
        redirect_to_login_if_needed();
    }
}

pub fn navigate_to(path: &str) {
    match window() {
        Ok(window) => {
            if let Err(err) = window.location().set_href(path) {
                log::warn!("Navigation to {} failed: {:?}", path, err);
            }
        }
        Err(err) => log::warn!("Navigation to {} failed: {}", path, err),
    }
}

pub fn redirect_to_login_if_needed() {
    let Ok(window) = window() else {
        return;
    };
    let location = window.location();
    if location.pathname().ok().as_deref() == Some(LOGIN_PATH) {
        return;
    }
    let _ = location.set_href(LOGIN_PATH);
}
