//! Order logging, cancellation and restoration

use reqwest::Client;
use tracing::info;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::types::{LogOrderRequest, OrderLine};

/// Client for the order endpoints
#[derive(Debug, Clone)]
pub struct OrdersClient {
    url: String,
    client: Client,
}

impl OrdersClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    /// Record a new order against a shift
    pub async fn log(&self, request: &LogOrderRequest) -> Result<(), Error> {
        Fetch::post(&self.client, &self.get_url("/logOrder"))
            .json(request)?
            .execute_empty()
            .await?;
        info!(shift = %request.shift_id, total = request.total_amount, "order logged");
        Ok(())
    }

    /// Cancel an order; the server returns its items to stock
    pub async fn cancel(&self, order_id: &str) -> Result<(), Error> {
        Fetch::delete(&self.client, &self.get_url(&format!("/orders/{}", order_id)))
            .execute_empty()
            .await?;
        info!(order = order_id, "order cancelled");
        Ok(())
    }

    /// Undo a cancellation
    pub async fn restore(&self, order_id: &str) -> Result<(), Error> {
        Fetch::put(&self.client, &self.get_url(&format!("/orders/{}/restore", order_id)))
            .execute_empty()
            .await?;
        info!(order = order_id, "order restored");
        Ok(())
    }
}

/// An order being composed before it is logged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    lines: Vec<OrderLine>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product; repeated names increase the quantity of the existing line
    pub fn add(&mut self, name: &str, price: f64, quantity: u32) -> Result<(), Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Název položky nesmí být prázdný"));
        }
        if quantity == 0 {
            return Err(Error::validation("Množství musí být alespoň 1"));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(Error::validation(format!("Neplatná cena: {}", price)));
        }

        match self.lines.iter_mut().find(|line| line.name == name) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(OrderLine {
                name: name.to_string(),
                price,
                quantity,
            }),
        }
        Ok(())
    }

    /// Remove one unit of a product, dropping the line when it reaches zero
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.lines.iter().position(|line| line.name == name) else {
            return false;
        };
        if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
        } else {
            self.lines.remove(index);
        }
        true
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
