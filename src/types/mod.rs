//! Entities exchanged with the point-of-sale server

pub mod de;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A customer account; the name is the natural key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(alias = "Name", default, deserialize_with = "de::text")]
    pub name: String,
}

impl Customer {
    /// Create a customer with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// The name as used in order queries: whitespace runs become `_`
    pub fn query_key(&self) -> String {
        normalize_customer_name(&self.name)
    }
}

/// Replace each whitespace run in a customer name with a single underscore
pub fn normalize_customer_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// A single customer transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "ID", alias = "Id", default, deserialize_with = "de::text")]
    pub id: String,

    #[serde(alias = "Customer", default, deserialize_with = "de::text")]
    pub customer: String,

    #[serde(alias = "Products", default)]
    pub products: Value,

    #[serde(alias = "TotalPrice", default, deserialize_with = "de::price")]
    pub total_price: f64,

    #[serde(alias = "Date", default, deserialize_with = "de::text")]
    pub date: String,

    #[serde(alias = "PaymentMethod", default, deserialize_with = "de::opt_text")]
    pub payment_method: Option<String>,

    #[serde(alias = "Payed", default, deserialize_with = "de::flag")]
    pub payed: bool,

    #[serde(alias = "Cancelled", default, deserialize_with = "de::flag")]
    pub cancelled: bool,
}

impl Order {
    /// Human readable product list; the server sends either a string or a list
    pub fn products_label(&self) -> String {
        match &self.products {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(map) => {
                        let name = map.get("name").or_else(|| map.get("Name")).and_then(de::text_value)?;
                        let quantity = map
                            .get("quantity")
                            .or_else(|| map.get("Quantity"))
                            .and_then(de::text_value);
                        Some(match quantity {
                            Some(q) => format!("{} x{}", name, q),
                            None => name,
                        })
                    }
                    other => de::text_value(other),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }
}

/// A bartender's work session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    #[serde(alias = "ID", alias = "Id", default, deserialize_with = "de::text")]
    pub id: String,

    #[serde(alias = "StartTime", default, deserialize_with = "de::text")]
    pub start_time: String,

    /// `None` while the shift is still open
    #[serde(alias = "EndTime", default, deserialize_with = "de::opt_text")]
    pub end_time: Option<String>,

    #[serde(alias = "Bartender", default, deserialize_with = "de::text")]
    pub bartender: String,

    #[serde(alias = "OrderCount", default, deserialize_with = "de::count")]
    pub order_count: u32,

    /// Only populated when the server was asked for detail
    #[serde(alias = "OrderItems", default, deserialize_with = "de::list")]
    pub order_items: Vec<Order>,
}

impl Shift {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }
}

/// One page of the shift history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPage {
    #[serde(default, deserialize_with = "de::list")]
    pub shifts: Vec<Shift>,

    #[serde(default, deserialize_with = "de::count")]
    pub current_page: u32,

    #[serde(default, deserialize_with = "de::count")]
    pub total_pages: u32,
}

/// Revenue totals reported when a shift is closed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSummary {
    #[serde(default, deserialize_with = "de::price")]
    pub total_revenue: f64,

    #[serde(default, deserialize_with = "de::price")]
    pub cash_revenue: f64,

    #[serde(default, deserialize_with = "de::price")]
    pub card_revenue: f64,

    #[serde(default, deserialize_with = "de::price")]
    pub employee_account_revenue: f64,
}

/// An inventory row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "ID", alias = "Id", default, deserialize_with = "de::text")]
    pub id: String,

    #[serde(alias = "Name", default, deserialize_with = "de::text")]
    pub name: String,

    #[serde(alias = "Price", default, deserialize_with = "de::price")]
    pub price: f64,

    #[serde(alias = "Quantity", default, deserialize_with = "de::int")]
    pub quantity: i64,
}

/// How an order is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    Cash,
    Card,
    /// Charged to the customer's account, paid later through `/payOrder`
    EmployeeAccount,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::EmployeeAccount => "employeeAccount",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "employeeaccount" | "employee" | "account" => Ok(PaymentMethod::EmployeeAccount),
            other => Err(Error::validation(format!("Unknown payment method: {}", other))),
        }
    }
}

/// One line of an order being composed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderLine {
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Body of `POST /logOrder`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogOrderRequest {
    pub order: Vec<OrderLine>,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "selectedCustomer")]
    pub selected_customer: Option<String>,
    #[serde(rename = "shiftID")]
    pub shift_id: String,
}
