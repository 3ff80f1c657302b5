//! Unpaid-order summary for one customer

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;

use crate::types::Order;

/// Shown when a customer owes nothing
pub const NO_ORDERS: &str = "Žádné";

/// Shown in both columns when the summary could not be computed
pub const FAILED: &str = "Chyba";

/// Newest unpaid order date and the unpaid total of one customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub last_order_date: String,
    pub total_price: String,
}

impl OrderSummary {
    pub fn nothing_owed() -> Self {
        Self {
            last_order_date: NO_ORDERS.to_string(),
            total_price: format_price(0.0),
        }
    }

    pub fn failed() -> Self {
        Self {
            last_order_date: FAILED.to_string(),
            total_price: FAILED.to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.last_order_date == FAILED && self.total_price == FAILED
    }
}

/// Format an amount in crowns with two decimals
pub fn format_price(amount: f64) -> String {
    format!("{:.2} Kč", amount)
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

/// Parse the date formats the server has been seen to emit
pub fn parse_order_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Newest first; unparseable dates go last and ties keep their order
fn newest_first(a: &Option<NaiveDateTime>, b: &Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Summarize the unpaid orders of one customer
pub fn summarize(orders: &[Order]) -> OrderSummary {
    let mut unpaid: Vec<(Option<NaiveDateTime>, &Order)> = orders
        .iter()
        .filter(|order| !order.payed)
        .map(|order| (parse_order_date(&order.date), order))
        .collect();

    if unpaid.is_empty() {
        return OrderSummary::nothing_owed();
    }

    unpaid.sort_by(|(a, _), (b, _)| newest_first(a, b));

    let total: f64 = unpaid.iter().map(|(_, order)| order.total_price).sum();

    OrderSummary {
        last_order_date: unpaid[0].1.date.clone(),
        total_price: format_price(total),
    }
}
