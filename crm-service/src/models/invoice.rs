//! Invoice models for crm-service.
//!
//! Amounts are whole currency units (rupees); there are no fractional units
//! anywhere in the invoice arithmetic.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::deserialize_lenient_int;

/// Tax applied when a draft does not say otherwise.
pub const DEFAULT_TAX_PERCENTAGE: i64 = 18;

/// One billable row on an invoice.
///
/// `amount` is derived from `quantity * rate` whenever either changes; it is
/// not edited on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub rate: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub amount: i64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: i64, rate: i64) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
            amount: quantity.saturating_mul(rate),
        }
    }
}

/// Editable field of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemField {
    Description,
    Quantity,
    Rate,
}

/// Discount mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DiscountType {
    #[default]
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }

    /// Anything other than `percentage` is a fixed amount.
    pub fn from_string(s: &str) -> Self {
        match s {
            "percentage" => DiscountType::Percentage,
            _ => DiscountType::Fixed,
        }
    }
}

impl From<String> for DiscountType {
    fn from(s: String) -> Self {
        DiscountType::from_string(&s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscountSpec {
    #[serde(rename = "type", default)]
    pub kind: DiscountType,
    /// Percent (0-100, not capped) or a fixed amount, depending on `kind`.
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub value: i64,
}

impl DiscountSpec {
    pub fn percentage(value: i64) -> Self {
        Self {
            kind: DiscountType::Percentage,
            value,
        }
    }

    pub fn fixed(value: i64) -> Self {
        Self {
            kind: DiscountType::Fixed,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSpec {
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub percentage: i64,
}

impl TaxSpec {
    pub fn new(percentage: i64) -> Self {
        Self { percentage }
    }
}

impl Default for TaxSpec {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_PERCENTAGE)
    }
}

/// Totals derived from line items, discount and tax. Never stored on its own;
/// an invoice keeps a point-in-time copy of `subtotal` and `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: i64,
    pub discount_amount: i64,
    pub taxable_amount: i64,
    pub tax_amount: i64,
    pub total: i64,
}

/// A billable service from the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub rate: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    PartiallyPaid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

/// Stored invoice as listed by the invoices endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: Uuid,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub client_name: String,
    /// Kept raw so an unexpected status still lists.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub subtotal: Option<i64>,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub amount_paid: Option<i64>,
}
