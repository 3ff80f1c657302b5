//! Bar point-of-sale client library
//!
//! A Rust client for the REST server of a small bar/restaurant point-of-sale
//! system, providing the customer ledger, the shift history browser, the
//! shift lifecycle controller and the login gate, plus a shared modal overlay
//! the views report through.

pub mod auth;
pub mod config;
pub mod customers;
pub mod error;
pub mod fetch;
pub mod inventory;
pub mod modal;
pub mod orders;
pub mod render;
pub mod shifts;
pub mod types;

use reqwest::Client;

use crate::auth::LoginGate;
use crate::config::ClientOptions;
use crate::customers::CustomersClient;
use crate::error::Error;
use crate::inventory::InventoryClient;
use crate::orders::OrdersClient;
use crate::shifts::ShiftsClient;

/// The main entry point for talking to the point-of-sale server
#[derive(Debug, Clone)]
pub struct PosClient {
    /// The base URL of the server
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
}

impl PosClient {
    /// Create a client for the given server with default options
    ///
    /// # Example
    ///
    /// ```
    /// use bar_pos_client::PosClient;
    ///
    /// let pos = PosClient::new("http://localhost:3000").unwrap();
    /// let customers = pos.customers();
    /// ```
    pub fn new(server_endpoint: &str) -> Result<Self, Error> {
        Self::new_with_options(ClientOptions::default().with_server_endpoint(server_endpoint))
    }

    /// Create a client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use bar_pos_client::{PosClient, config::ClientOptions};
    ///
    /// let options = ClientOptions::default()
    ///     .with_server_endpoint("http://127.0.0.1:3000")
    ///     .with_request_timeout(Some(Duration::from_secs(5)));
    /// let pos = PosClient::new_with_options(options).unwrap();
    /// ```
    pub fn new_with_options(options: ClientOptions) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            url: options.server_endpoint.clone(),
            http_client,
            options,
        })
    }

    /// Login gate checking the configured credentials
    pub fn auth(&self) -> LoginGate {
        LoginGate::new(&self.options)
    }

    /// Customer accounts and their orders
    pub fn customers(&self) -> CustomersClient {
        CustomersClient::new(&self.url, self.http_client.clone())
    }

    /// Shift history, lifecycle and summaries
    pub fn shifts(&self) -> ShiftsClient {
        ShiftsClient::new(&self.url, self.http_client.clone())
    }

    /// Order logging, cancellation and restoration
    pub fn orders(&self) -> OrdersClient {
        OrdersClient::new(&self.url, self.http_client.clone())
    }

    /// Product stock
    pub fn inventory(&self) -> InventoryClient {
        InventoryClient::new(&self.url, self.http_client.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::PosClient;
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::modal::{Modal, Surface, TerminalSurface};
    pub use crate::customers::CustomerLedger;
    pub use crate::shifts::{ShiftBrowser, ShiftController, ShiftState};
}
