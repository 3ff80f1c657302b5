//! Product stock

use reqwest::Client;
use tracing::debug;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::types::Product;

/// Client for the product list
#[derive(Debug, Clone)]
pub struct InventoryClient {
    url: String,
    client: Client,
}

impl InventoryClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    /// Fetch every product with its current stock
    pub async fn products(&self) -> Result<Vec<Product>, Error> {
        let products = Fetch::get(&self.client, &format!("{}/products", self.url))
            .execute::<Vec<Product>>()
            .await?;
        debug!(count = products.len(), "inventory refreshed");
        Ok(products)
    }
}
