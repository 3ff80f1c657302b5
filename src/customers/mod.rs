//! Customer accounts and the unpaid-order ledger

mod summary;

use futures_util::stream::{self, StreamExt};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::Error;
use crate::fetch::Fetch;
use crate::modal::{Modal, Surface};
use crate::render;
use crate::types::{normalize_customer_name, Customer, Order};

pub use summary::*;

/// `GET /customers` returns either bare names or customer records
#[derive(Deserialize)]
#[serde(untagged)]
enum CustomerEntry {
    Name(String),
    Record(Customer),
}

impl From<CustomerEntry> for Customer {
    fn from(entry: CustomerEntry) -> Self {
        match entry {
            CustomerEntry::Name(name) => Customer { name },
            CustomerEntry::Record(customer) => customer,
        }
    }
}

/// `GET /customerOrders` returns a bare list or wraps it in `{orders}`
#[derive(Deserialize)]
#[serde(untagged)]
enum OrdersEnvelope {
    List(Vec<Order>),
    Wrapped { orders: Vec<Order> },
}

/// Client for the customer endpoints
#[derive(Debug, Clone)]
pub struct CustomersClient {
    url: String,
    client: Client,
}

impl CustomersClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    /// List every customer
    pub async fn list(&self) -> Result<Vec<Customer>, Error> {
        let entries = Fetch::get(&self.client, &self.get_url("/customers"))
            .execute::<Vec<CustomerEntry>>()
            .await?;

        Ok(entries.into_iter().map(Customer::from).collect())
    }

    /// All orders of one customer, paid or not
    pub async fn orders(&self, name: &str) -> Result<Vec<Order>, Error> {
        let envelope = Fetch::get(&self.client, &self.get_url("/customerOrders"))
            .query_param("customer", normalize_customer_name(name))
            .execute::<OrdersEnvelope>()
            .await?;

        Ok(match envelope {
            OrdersEnvelope::List(orders) | OrdersEnvelope::Wrapped { orders } => orders,
        })
    }

    /// Unpaid-order summary of one customer; failures yield the error sentinel
    pub async fn summary(&self, name: &str) -> OrderSummary {
        match self.orders(name).await {
            Ok(orders) => summarize(&orders),
            Err(e) => {
                error!(customer = name, error = %e, "failed to load customer orders");
                OrderSummary::failed()
            }
        }
    }

    /// Create a customer
    pub async fn add(&self, name: &str) -> Result<(), Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Jméno zákazníka nesmí být prázdné"));
        }

        Fetch::post(&self.client, &self.get_url("/addCustomer"))
            .json(&json!({ "name": name }))?
            .execute_empty()
            .await
    }

    /// Delete a customer
    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        Fetch::delete(&self.client, &self.get_url("/deleteCustomer"))
            .json(&json!({ "name": name }))?
            .execute_empty()
            .await
    }

    /// Mark every open order of a customer as paid
    pub async fn pay(&self, name: &str) -> Result<(), Error> {
        Fetch::post(&self.client, &self.get_url("/payOrder"))
            .json(&json!({ "customerName": name }))?
            .execute_empty()
            .await
    }
}

/// A customer with their unpaid-order summary
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub customer: Customer,
    pub summary: OrderSummary,
}

/// The customer ledger view
///
/// Owns the rows it last rendered. Every mutation re-fetches the whole
/// ledger; a failed fetch keeps the previous rows.
pub struct CustomerLedger {
    client: CustomersClient,
    concurrency: usize,
    rows: Vec<LedgerRow>,
}

impl CustomerLedger {
    pub fn new(client: CustomersClient, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    /// Fetch the customers and one summary per customer
    pub async fn load(&mut self) -> Result<&[LedgerRow], Error> {
        let customers = self.client.list().await?;
        let client = &self.client;

        let rows = stream::iter(customers)
            .map(|customer| async move {
                let summary = client.summary(&customer.name).await;
                LedgerRow { customer, summary }
            })
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        self.rows = rows;
        Ok(&self.rows)
    }

    /// Reload, reporting a failure through the modal
    pub async fn refresh<S: Surface>(&mut self, modal: &Modal<S>) -> Result<(), Error> {
        if let Err(e) = self.load().await {
            error!(error = %e, "failed to load customers");
            modal.error(format!("Nepodařilo se načíst zákazníky: {}", e)).await;
            return Err(e);
        }
        Ok(())
    }

    /// Add a customer and reload
    pub async fn add_customer<S: Surface>(&mut self, name: &str, modal: &Modal<S>) -> Result<(), Error> {
        if let Err(e) = self.client.add(name).await {
            error!(customer = name, error = %e, "failed to add customer");
            modal.error(format!("Zákazníka se nepodařilo přidat: {}", e)).await;
            return Err(e);
        }
        info!(customer = name, "customer added");
        self.refresh(modal).await
    }

    /// Ask, then delete a customer and reload. Returns whether it was confirmed.
    pub async fn delete_customer<S: Surface>(&mut self, name: &str, modal: &Modal<S>) -> Result<bool, Error> {
        if !modal.confirm(format!("Opravdu smazat zákazníka {}?", name)).await {
            return Ok(false);
        }

        if let Err(e) = self.client.delete(name).await {
            error!(customer = name, error = %e, "failed to delete customer");
            modal.error(format!("Zákazníka se nepodařilo smazat: {}", e)).await;
            return Err(e);
        }
        info!(customer = name, "customer deleted");
        self.refresh(modal).await?;
        Ok(true)
    }

    /// Ask, then settle a customer's open orders and reload. Returns whether it was confirmed.
    pub async fn pay<S: Surface>(&mut self, name: &str, modal: &Modal<S>) -> Result<bool, Error> {
        let owed = self
            .rows
            .iter()
            .find(|row| row.customer.name == name)
            .map(|row| row.summary.total_price.clone());
        let question = match owed {
            Some(total) => format!("Zaplatit {} za zákazníka {}?", total, name),
            None => format!("Zaplatit otevřené objednávky zákazníka {}?", name),
        };
        if !modal.confirm(question).await {
            return Ok(false);
        }

        if let Err(e) = self.client.pay(name).await {
            error!(customer = name, error = %e, "payment failed");
            modal.error(format!("Platba se nezdařila: {}", e)).await;
            return Err(e);
        }
        info!(customer = name, "orders paid");
        self.refresh(modal).await?;
        Ok(true)
    }

    /// Render the current rows
    pub fn render(&self) -> String {
        render::ledger_table(&self.rows)
    }
}
