use std::{cell::RefCell, fmt, rc::Rc};

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use leptos::{provide_context, use_context};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    api::{types::parse_refresh_token, ApiError},
    config,
    state::session::{use_session, SessionStore},
    utils::navigation::{BrowserRedirect, SessionExpiredHandler},
};

pub const REFRESH_PATH: &str = "/users/refresh";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One outbound call. Built per `execute` and dropped once it settles.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub path: String,
    pub method: Method,
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(
        path: impl Into<String>,
        method: Method,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<Self, ApiError> {
        let path = path.into();
        if path.is_empty() {
            return Err(ApiError::request_failed(None, "Request path is empty"));
        }
        Ok(Self {
            path,
            method,
            token: token.map(str::to_string),
            body,
        })
    }

    fn with_token(&self, token: String) -> Self {
        Self {
            token: Some(token),
            ..self.clone()
        }
    }
}

pub fn json_body<T: Serialize + ?Sized>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::request_failed(None, format!("Failed to encode body: {}", e)))
}

type SharedRefresh = Shared<LocalBoxFuture<'static, Result<String, ApiError>>>;

/// Gateway to the AgriView backend.
///
/// Every call goes through [`ApiClient::execute`], which retries once after a
/// silent token refresh when the backend answers 401.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionStore,
    on_session_expired: Rc<dyn SessionExpiredHandler>,
    refresh_in_flight: Rc<RefCell<Option<SharedRefresh>>>,
}

impl ApiClient {
    pub fn new(session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session,
            on_session_expired: Rc::new(BrowserRedirect),
            refresh_in_flight: Rc::new(RefCell::new(None)),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new(session)
        }
    }

    pub fn with_session_expired_handler(
        mut self,
        handler: Rc<dyn SessionExpiredHandler>,
    ) -> Self {
        self.on_session_expired = handler;
        self
    }

    pub(crate) fn bearer_token(&self) -> Option<String> {
        self.session.access_token()
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Sends `method path` with an optional bearer `token` and JSON `body`,
    /// and decodes the response body as `T`.
    ///
    /// A 401 triggers one [`ApiClient::refresh`] and one retry with the new
    /// token; whatever the retry returns is the result.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let request = Request::new(path, method, token, body)?;
        match self.send(&request).await {
            Err(ApiError::Unauthorized) => {
                log::info!("{} {} was unauthorized; refreshing token", method, path);
                let token = self.refresh().await?;
                self.send(&request.with_token(token)).await
            }
            other => other,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: &Request) -> Result<T, ApiError> {
        let url = format!("{}{}", self.resolved_base_url().await, request.path);
        log::debug!("{} {}", request.method, request.path);

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            log::warn!("{} {} failed: {}", request.method, request.path, e);
            ApiError::request_failed(None, e.to_string())
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(Some(status.as_u16()), e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            log::warn!("{} {} returned {}", request.method, request.path, status);
            return Err(ApiError::request_failed(
                Some(status.as_u16()),
                error_cause(status, &text),
            ));
        }
        decode_body(status, &text)
    }

    /// Mints a new access token through the refresh cookie and stores it.
    ///
    /// Callers that arrive while a refresh is already running wait for that
    /// one instead of starting their own.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        let pending = {
            let mut slot = self.refresh_in_flight.borrow_mut();
            match slot.as_ref() {
                Some(pending) => pending.clone(),
                None => {
                    let client = self.clone();
                    let pending = async move {
                        let result = client.refresh_once().await;
                        client.refresh_in_flight.borrow_mut().take();
                        result
                    }
                    .boxed_local()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };
        pending.await
    }

    async fn refresh_once(&self) -> Result<String, ApiError> {
        let url = format!("{}{}", self.resolved_base_url().await, REFRESH_PATH);
        log::info!("Refreshing access token");

        let builder = self.client.get(&url);
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::RefreshFailed(e.to_string()))?;
        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            log::warn!("Refresh token rejected; ending session");
            self.session.logout();
            self.on_session_expired.on_session_expired();
            return Err(ApiError::SessionExpired);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::RefreshFailed(e.to_string()))?;
        if !status.is_success() {
            log::warn!("Token refresh returned {}", status);
            return Err(ApiError::RefreshFailed(error_cause(status, &text)));
        }

        let token = parse_refresh_token(&text)
            .map_err(|e| ApiError::RefreshFailed(format!("Failed to parse response: {}", e)))?;
        if let Err(err) = self.session.update_access_token(token.clone()) {
            log::warn!("Refreshed token not stored: {}", err);
        }
        Ok(token)
    }
}

fn decode_body<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T, ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::EmptyResponse);
    }
    let value: Value = serde_json::from_str(text).map_err(|e| {
        ApiError::request_failed(
            Some(status.as_u16()),
            format!("Failed to parse response: {}", e),
        )
    })?;
    if value.is_null() {
        return Err(ApiError::EmptyResponse);
    }
    serde_json::from_value(value).map_err(|e| {
        ApiError::request_failed(
            Some(status.as_u16()),
            format!("Failed to parse response: {}", e),
        )
    })
}

/// Prefers the backend's `message`/`error` field over the raw body.
fn error_cause(status: StatusCode, text: &str) -> String {
    let from_json = serde_json::from_str::<Value>(text).ok().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
    });
    match from_json {
        Some(message) => message,
        None if !text.trim().is_empty() => text.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("Unexpected status")
            .to_string(),
    }
}

pub fn use_api_client() -> ApiClient {
    match use_context::<ApiClient>() {
        Some(client) => client,
        None => {
            let client = ApiClient::new(use_session());
            provide_context(client.clone());
            client
        }
    }
}
