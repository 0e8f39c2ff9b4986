//! Invoice form draft and the payload it is saved as.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::invoice::{DiscountType, InvoiceStatus, LineItem};
use crate::utils::{deserialize_blank_as_none, deserialize_lenient_int, deserialize_lenient_opt_int};

pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Invoice form contents as submitted by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub client_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub client_address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub lead_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub contact_id: Option<Uuid>,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default, deserialize_with = "deserialize_lenient_int")]
    pub discount_value: i64,
    /// Absent means the configured default.
    #[serde(default, deserialize_with = "deserialize_lenient_opt_int")]
    pub tax_percentage: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[validate(custom(function = "validate_due_date"))]
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

fn validate_due_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || NaiveDate::parse_from_str(value, DUE_DATE_FORMAT).is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("due_date");
        err.message = Some("Due date must be YYYY-MM-DD".into());
        Err(err)
    }
}

/// What gets written to `/api/invoices`: the draft with `subtotal` and
/// `total` snapshotted and blank rows removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedInvoice {
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub lead_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub status: InvoiceStatus,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub tax_percentage: i64,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub subtotal: i64,
    pub total: i64,
    pub items: Vec<LineItem>,
}
