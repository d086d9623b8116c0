use axum::http::HeaderMap;

/// Sent by callers as `TG-USER-ID`; header names are case-insensitive.
pub const USER_ID_HEADER: &str = "tg-user-id";

/// Per-request data handed to context-aware resolvers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Option<String>,
}

/// Used whenever a request was executed without any context attached.
pub static ANONYMOUS: RequestContext = RequestContext { user_id: None };

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        // non-UTF-8 values are treated like a missing header
        let user_id = headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        Self { user_id }
    }
}
