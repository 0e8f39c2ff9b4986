use serde::{Deserialize, Serialize};

use crate::models::{DiscountSpec, InvoiceRecord, InvoiceTotals, LineItem, LineItemField, Service, TaxSpec};
use crate::services::InvoiceSummary;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeTotalsRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discount: Option<DiscountSpec>,
    #[serde(default)]
    pub tax: Option<TaxSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditLineItemRequest {
    pub item: LineItem,
    pub field: LineItemField,
    /// Raw form input; numeric fields are coerced leniently.
    #[serde(default)]
    pub value: serde_json::Value,
}

/// One change to the line-item table of an invoice form.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineItemAction {
    AddBlank,
    AddService {
        service: Service,
    },
    Remove {
        index: usize,
    },
    Edit {
        index: usize,
        field: LineItemField,
        #[serde(default)]
        value: serde_json::Value,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemsRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub action: LineItemAction,
    #[serde(default)]
    pub discount: Option<DiscountSpec>,
    #[serde(default)]
    pub tax: Option<TaxSpec>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemsResponse {
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummaryRequest {
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummaryResponse {
    pub summary: InvoiceSummary,
    pub invoices: Vec<InvoiceRecord>,
}

/// Form values arrive as numbers or strings; render either as the text the
/// user typed.
pub fn raw_input(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
