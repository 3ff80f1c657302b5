//! Shift history, lifecycle and summaries

mod browser;
mod controller;

use reqwest::Client;
use serde_json::{json, Value};

use crate::error::Error;
use crate::fetch::Fetch;
use crate::types::{de, Shift, ShiftPage, ShiftSummary};

pub use browser::*;
pub use controller::*;

/// Client for the shift endpoints
#[derive(Debug, Clone)]
pub struct ShiftsClient {
    url: String,
    client: Client,
}

impl ShiftsClient {
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    /// One page of the shift history, newest first as ordered by the server
    pub async fn page(&self, page: u32, limit: u32) -> Result<ShiftPage, Error> {
        Fetch::get(&self.client, &self.get_url("/shifts"))
            .query_param("page", page)
            .query_param("limit", limit)
            .execute::<ShiftPage>()
            .await
    }

    /// The shift currently open on the server, if any
    pub async fn current(&self) -> Result<Option<Shift>, Error> {
        let result = Fetch::get(&self.client, &self.get_url("/currentShift"))
            .execute_optional::<Value>()
            .await;

        match result {
            Ok(value) => active_shift(value.unwrap_or(Value::Null)),
            Err(Error::Server { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Open a shift; returns the new shift id when the server reports it
    pub async fn start(&self, bartender: &str) -> Result<Option<String>, Error> {
        let value = Fetch::post(&self.client, &self.get_url("/startShift"))
            .json(&json!({ "bartender": bartender }))?
            .execute_optional::<Value>()
            .await?;

        Ok(value.as_ref().and_then(shift_id_of))
    }

    /// Close a shift
    pub async fn end(&self, shift_id: &str) -> Result<(), Error> {
        Fetch::post(&self.client, &self.get_url("/endShift"))
            .json(&json!({ "shiftID": shift_id }))?
            .execute_empty()
            .await
    }

    /// Revenue totals of a shift
    pub async fn summary(&self, shift_id: &str) -> Result<ShiftSummary, Error> {
        Fetch::get(&self.client, &self.get_url("/shiftSummary"))
            .query_param("shiftID", shift_id)
            .execute::<ShiftSummary>()
            .await
    }
}

/// Interpret a `/currentShift` body: null, `{active: false}`, `{shift: ...}` or a bare shift
fn active_shift(value: Value) -> Result<Option<Shift>, Error> {
    let value = match value {
        Value::Object(mut map) => {
            if map.get("active").map(de::flag_value) == Some(false) && !map.contains_key("shift") {
                return Ok(None);
            }
            match map.remove("shift") {
                Some(inner) => inner,
                None => Value::Object(map),
            }
        }
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    };

    if !value.is_object() {
        return Ok(None);
    }

    let shift: Shift = serde_json::from_value(value)?;
    if shift.id.is_empty() || !shift.is_active() {
        return Ok(None);
    }
    Ok(Some(shift))
}

/// Find the shift id in a `/startShift` response
fn shift_id_of(value: &Value) -> Option<String> {
    ["shiftID", "shiftId", "id", "ID"]
        .iter()
        .find_map(|key| value.get(*key).and_then(de::text_value))
        .or_else(|| value.get("shift").and_then(shift_id_of))
}
