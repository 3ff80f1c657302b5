//! Configuration options for the point-of-sale client

use std::fmt;
use std::time::Duration;

use crate::error::Error;

/// Server address used when nothing else is configured
pub const DEFAULT_SERVER_ENDPOINT: &str = "http://localhost:3000";

/// Configuration options for the point-of-sale client
#[derive(Clone)]
pub struct ClientOptions {
    /// Base URL of the point-of-sale server
    pub server_endpoint: String,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Shifts requested per page
    pub page_limit: u32,

    /// Maximum number of customer summaries fetched at once
    pub ledger_concurrency: usize,

    /// How long a modal fades before it is hidden
    pub modal_fade: Duration,

    /// Username accepted by the login gate
    pub username: String,

    /// Password accepted by the login gate
    pub password: String,

    /// View opened after a successful login
    pub landing_view: String,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("server_endpoint", &self.server_endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("page_limit", &self.page_limit)
            .field("ledger_concurrency", &self.ledger_concurrency)
            .field("modal_fade", &self.modal_fade)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("landing_view", &self.landing_view)
            .finish()
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            server_endpoint: DEFAULT_SERVER_ENDPOINT.to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            page_limit: 10,
            ledger_concurrency: 8,
            modal_fade: Duration::from_millis(300),
            username: "admin".to_string(),
            password: "admin".to_string(),
            landing_view: "customers".to_string(),
        }
    }
}

impl ClientOptions {
    /// Build options from `POS_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, Error> {
        let mut options = Self::default();

        if let Ok(endpoint) = std::env::var("POS_SERVER_ENDPOINT") {
            options = options.with_server_endpoint(&endpoint);
        }
        if let Ok(limit) = std::env::var("POS_PAGE_LIMIT") {
            let parsed = limit
                .parse()
                .map_err(|_| Error::validation(format!("POS_PAGE_LIMIT is not a number: {}", limit)))?;
            options = options.with_page_limit(parsed);
        }
        if let Ok(username) = std::env::var("POS_USERNAME") {
            options.username = username;
        }
        if let Ok(password) = std::env::var("POS_PASSWORD") {
            options.password = password;
        }

        Ok(options)
    }

    /// Set the server endpoint
    pub fn with_server_endpoint(mut self, value: &str) -> Self {
        self.server_endpoint = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the number of shifts per page
    pub fn with_page_limit(mut self, value: u32) -> Self {
        self.page_limit = value.max(1);
        self
    }

    /// Set how many customer summaries may be in flight at once
    pub fn with_ledger_concurrency(mut self, value: usize) -> Self {
        self.ledger_concurrency = value.max(1);
        self
    }

    /// Set the modal fade-out duration
    pub fn with_modal_fade(mut self, value: Duration) -> Self {
        self.modal_fade = value;
        self
    }

    /// Set the credentials accepted by the login gate
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    /// Set the view opened after login
    pub fn with_landing_view(mut self, value: &str) -> Self {
        self.landing_view = value.to_string();
        self
    }
}
