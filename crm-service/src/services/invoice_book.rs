//! Saving drafts and summarising the invoice list.

use chrono::NaiveDate;
use serde::Serialize;

use super::invoice::{compute_totals, persistable_items};
use crate::models::{
    DiscountSpec, InvoiceDraft, InvoiceRecord, PreparedInvoice, TaxSpec, DUE_DATE_FORMAT,
};

/// Turn a validated draft into its save payload.
///
/// `subtotal` and `total` are computed over every row, blank ones included,
/// and then frozen; blank rows are dropped from the stored item list.
pub fn prepare_invoice(draft: InvoiceDraft, default_tax_percentage: i64) -> PreparedInvoice {
    let discount = DiscountSpec {
        kind: draft.discount_type,
        value: draft.discount_value,
    };
    let tax = TaxSpec::new(draft.tax_percentage.unwrap_or(default_tax_percentage));
    let totals = compute_totals(&draft.items, &discount, &tax);

    let due_date = draft
        .due_date
        .as_deref()
        .filter(|value| !value.is_empty())
        .and_then(|value| NaiveDate::parse_from_str(value, DUE_DATE_FORMAT).ok());

    PreparedInvoice {
        client_name: draft.client_name,
        client_email: draft.client_email,
        client_phone: draft.client_phone,
        client_address: draft.client_address,
        lead_id: draft.lead_id,
        contact_id: draft.contact_id,
        status: draft.status,
        discount_type: discount.kind,
        discount_value: discount.value,
        tax_percentage: tax.percentage,
        notes: draft.notes,
        due_date,
        subtotal: totals.subtotal,
        total: totals.total,
        items: persistable_items(&draft.items),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub total_revenue: i64,
    pub total_paid: i64,
    pub total_pending: i64,
}

/// Revenue, collected and outstanding amounts across `invoices`.
pub fn summarize_invoices(invoices: &[InvoiceRecord]) -> InvoiceSummary {
    let total_revenue = invoices
        .iter()
        .fold(0i64, |sum, inv| sum.saturating_add(inv.total.unwrap_or(0)));
    let total_paid = invoices
        .iter()
        .fold(0i64, |sum, inv| sum.saturating_add(inv.amount_paid.unwrap_or(0)));

    InvoiceSummary {
        total_revenue,
        total_paid,
        total_pending: total_revenue.saturating_sub(total_paid),
    }
}

/// Case-insensitive search on client name or invoice number, plus an exact
/// status match unless `status` is `None` or `"all"`.
pub fn filter_invoices<'a>(
    invoices: &'a [InvoiceRecord],
    search: &str,
    status: Option<&str>,
) -> Vec<&'a InvoiceRecord> {
    let needle = search.to_lowercase();
    let status = status.filter(|s| *s != "all");

    invoices
        .iter()
        .filter(|inv| {
            inv.client_name.to_lowercase().contains(&needle)
                || inv.invoice_number.to_lowercase().contains(&needle)
        })
        .filter(|inv| status.map_or(true, |s| inv.status == s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiscountType, InvoiceStatus, LineItem};
    use uuid::Uuid;

    fn draft() -> InvoiceDraft {
        InvoiceDraft {
            client_name: "Acme Traders".to_string(),
            client_email: Some("billing@acme.test".to_string()),
            client_phone: None,
            client_address: None,
            lead_id: None,
            contact_id: None,
            status: InvoiceStatus::Draft,
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            tax_percentage: None,
            notes: None,
            due_date: Some("2026-11-30".to_string()),
            items: vec![
                LineItem::new("Design", 2, 100),
                LineItem::new("", 1, 50),
            ],
        }
    }

    fn record(number: &str, client: &str, status: &str, total: i64, paid: Option<i64>) -> InvoiceRecord {
        InvoiceRecord {
            id: Uuid::new_v4(),
            invoice_number: number.to_string(),
            client_name: client.to_string(),
            status: status.to_string(),
            subtotal: Some(total),
            total: Some(total),
            amount_paid: paid,
        }
    }

    #[test]
    fn snapshot_includes_blank_rows_but_items_do_not() {
        let prepared = prepare_invoice(draft(), 18);
        assert_eq!(prepared.subtotal, 250);
        assert_eq!(prepared.total, 266);
        assert_eq!(prepared.items.len(), 1);
        assert_eq!(prepared.items[0].description, "Design");
    }

    #[test]
    fn default_tax_applies_only_when_absent() {
        let prepared = prepare_invoice(draft(), 0);
        assert_eq!(prepared.tax_percentage, 0);
        assert_eq!(prepared.total, 225);

        let mut explicit = draft();
        explicit.tax_percentage = Some(5);
        let prepared = prepare_invoice(explicit, 18);
        assert_eq!(prepared.tax_percentage, 5);
    }

    #[test]
    fn due_date_is_parsed_and_blank_is_none() {
        let prepared = prepare_invoice(draft(), 18);
        assert_eq!(prepared.due_date, NaiveDate::from_ymd_opt(2026, 11, 30));

        let mut blank = draft();
        blank.due_date = Some(String::new());
        assert_eq!(prepare_invoice(blank, 18).due_date, None);
    }

    #[test]
    fn summary_treats_missing_paid_as_zero() {
        let invoices = vec![
            record("INV-001", "Acme", "paid", 1000, Some(1000)),
            record("INV-002", "Globex", "sent", 500, None),
            record("INV-003", "Initech", "partially_paid", 300, Some(100)),
        ];
        assert_eq!(
            summarize_invoices(&invoices),
            InvoiceSummary {
                total_revenue: 1800,
                total_paid: 1100,
                total_pending: 700,
            }
        );
    }

    #[test]
    fn filter_matches_name_or_number_case_insensitively() {
        let invoices = vec![
            record("INV-001", "Acme", "paid", 1000, None),
            record("INV-002", "Globex", "sent", 500, None),
        ];
        assert_eq!(filter_invoices(&invoices, "acme", None).len(), 1);
        assert_eq!(filter_invoices(&invoices, "inv-002", None)[0].client_name, "Globex");
        assert_eq!(filter_invoices(&invoices, "", Some("all")).len(), 2);
        assert_eq!(filter_invoices(&invoices, "", Some("sent")).len(), 1);
        assert!(filter_invoices(&invoices, "acme", Some("sent")).is_empty());
    }
}
