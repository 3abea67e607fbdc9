use leptos::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("The server returned an empty response")]
    EmptyResponse,
    #[error("Request failed{}: {cause}", status_suffix(.status))]
    RequestFailed { status: Option<u16>, cause: String },
    #[error("Not authorized")]
    Unauthorized,
    #[error("Could not refresh the session: {0}")]
    RefreshFailed(String),
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

impl ApiError {
    pub fn request_failed(status: Option<u16>, cause: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            cause: cause.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyResponse => "EMPTY_RESPONSE",
            Self::RequestFailed { .. } => "REQUEST_FAILED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::RefreshFailed(_) => "REFRESH_FAILED",
            Self::SessionExpired => "SESSION_EXPIRED",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            Self::Unauthorized => Some(401),
            Self::SessionExpired => Some(403),
            _ => None,
        }
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.to_string()
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.to_string().into_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ApiError::EmptyResponse.code(), "EMPTY_RESPONSE");
        assert_eq!(
            ApiError::request_failed(Some(500), "boom").code(),
            "REQUEST_FAILED"
        );
        assert_eq!(ApiError::Unauthorized.code(), "UNAUTHORIZED");
        assert_eq!(ApiError::RefreshFailed("x".into()).code(), "REFRESH_FAILED");
        assert_eq!(ApiError::SessionExpired.code(), "SESSION_EXPIRED");
    }

    #[test]
    fn request_failed_display_includes_status_when_known() {
        let with_status = ApiError::request_failed(Some(500), "database offline");
        assert_eq!(with_status.to_string(), "Request failed (500): database offline");

        let transport = ApiError::request_failed(None, "connection refused");
        assert_eq!(transport.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn string_conversion_matches_display() {
        let raw: String = ApiError::SessionExpired.into();
        assert_eq!(raw, "Your session has expired. Please log in again.");
    }
}
