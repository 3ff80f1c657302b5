//! Login gate in front of the views

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::config::ClientOptions;
use crate::error::Error;

/// A successful login
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub username: String,
    pub signed_in_at: DateTime<Local>,
    /// View to open next
    pub redirect_to: String,
}

/// Checks a username/password pair against the configured credentials
#[derive(Debug, Clone)]
pub struct LoginGate {
    username: String,
    password: String,
    landing_view: String,
}

impl LoginGate {
    pub(crate) fn new(options: &ClientOptions) -> Self {
        Self {
            username: options.username.clone(),
            password: options.password.clone(),
            landing_view: options.landing_view.clone(),
        }
    }

    /// Validate the credentials; no request is made
    pub fn sign_in(&self, username: &str, password: &str) -> Result<Session, Error> {
        let username = username.trim();

        if username.is_empty() || password.is_empty() {
            return Err(Error::auth("Vyplňte uživatelské jméno a heslo"));
        }

        if username != self.username || password != self.password {
            warn!(username, "rejected login");
            return Err(Error::auth("Nesprávné uživatelské jméno nebo heslo"));
        }

        info!(username, "login accepted");
        Ok(Session {
            username: username.to_string(),
            signed_in_at: Local::now(),
            redirect_to: self.landing_view.clone(),
        })
    }
}
