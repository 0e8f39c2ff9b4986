//! Invoice form endpoints: totals, line-item edits, save payloads and the
//! invoice list summary.

use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::{
    dtos::{
        raw_input, ComputeTotalsRequest, EditLineItemRequest, InvoiceSummaryRequest,
        InvoiceSummaryResponse, LineItemAction, LineItemsRequest, LineItemsResponse,
    },
    models::{InvoiceDraft, InvoiceTotals, LineItem, PreparedInvoice, Service, TaxSpec},
    services::{
        add_service_line_item, compute_totals, filter_invoices, metrics, new_blank_line_item,
        prepare_invoice, recompute_item_amount, remove_line_item, summarize_invoices,
    },
    startup::AppState,
    utils::ValidatedJson,
};

/// Callers may only add services that are still on offer.
fn ensure_active(service: &Service) -> Result<(), AppError> {
    if service.is_active {
        Ok(())
    } else {
        Err(AppError::BadRequest(anyhow::anyhow!(
            "Service '{}' is inactive",
            service.name
        )))
    }
}

/// Compute subtotal, discount, tax and total for a set of line items.
pub async fn compute_invoice_totals(
    State(state): State<AppState>,
    Json(payload): Json<ComputeTotalsRequest>,
) -> Json<InvoiceTotals> {
    let discount = payload.discount.unwrap_or_default();
    let tax = payload
        .tax
        .unwrap_or_else(|| TaxSpec::new(state.config.default_tax_percentage));

    let totals = compute_totals(&payload.items, &discount, &tax);
    metrics::record_totals_computed();

    tracing::debug!(
        items = payload.items.len(),
        subtotal = totals.subtotal,
        total = totals.total,
        "Computed invoice totals"
    );

    Json(totals)
}

/// Apply a single field edit to one line item.
pub async fn edit_line_item(Json(payload): Json<EditLineItemRequest>) -> Json<LineItem> {
    let value = raw_input(&payload.value);
    Json(recompute_item_amount(&payload.item, payload.field, &value))
}

/// Apply one change to the line-item table and return the new table with
/// fresh totals.
pub async fn update_line_items(
    State(state): State<AppState>,
    Json(payload): Json<LineItemsRequest>,
) -> Result<Json<LineItemsResponse>, AppError> {
    let items = payload.items;

    let items = match payload.action {
        LineItemAction::AddBlank => {
            let mut next = items;
            next.push(new_blank_line_item());
            next
        }
        LineItemAction::AddService { service } => {
            ensure_active(&service)?;
            add_service_line_item(&items, &service)
        }
        LineItemAction::Remove { index } => remove_line_item(&items, index),
        LineItemAction::Edit {
            index,
            field,
            value,
        } => {
            let mut next = items;
            let item = next.get_mut(index).ok_or_else(|| {
                AppError::BadRequest(anyhow::anyhow!("No line item at index {}", index))
            })?;
            *item = recompute_item_amount(item, field, &raw_input(&value));
            next
        }
    };

    let discount = payload.discount.unwrap_or_default();
    let tax = payload
        .tax
        .unwrap_or_else(|| TaxSpec::new(state.config.default_tax_percentage));
    let totals = compute_totals(&items, &discount, &tax);
    metrics::record_totals_computed();

    Ok(Json(LineItemsResponse { items, totals }))
}

/// Validate a draft and build the payload it is saved as.
pub async fn prepare_invoice_payload(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<InvoiceDraft>,
) -> Json<PreparedInvoice> {
    let submitted = draft.items.len();
    let prepared = prepare_invoice(draft, state.config.default_tax_percentage);
    metrics::record_totals_computed();

    tracing::info!(
        client_name = %prepared.client_name,
        status = prepared.status.as_str(),
        items_submitted = submitted,
        items_kept = prepared.items.len(),
        subtotal = prepared.subtotal,
        total = prepared.total,
        "Prepared invoice payload"
    );

    Json(prepared)
}

/// Revenue/paid/pending over all invoices plus the filtered list.
pub async fn summarize_invoice_list(
    Json(payload): Json<InvoiceSummaryRequest>,
) -> Json<InvoiceSummaryResponse> {
    let summary = summarize_invoices(&payload.invoices);
    let invoices = filter_invoices(&payload.invoices, &payload.search, payload.status.as_deref())
        .into_iter()
        .cloned()
        .collect();

    Json(InvoiceSummaryResponse { summary, invoices })
}
