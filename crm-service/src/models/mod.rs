//! Domain models for crm-service.

mod invoice;
mod invoice_draft;
mod pipeline;

pub use invoice::{
    DiscountSpec, DiscountType, InvoiceRecord, InvoiceStatus, InvoiceTotals, LineItem,
    LineItemField, Service, TaxSpec, DEFAULT_TAX_PERCENTAGE,
};
pub use invoice_draft::{InvoiceDraft, PreparedInvoice, DUE_DATE_FORMAT};
pub use pipeline::{
    Deal, EntityKind, FieldUpdate, Lead, LeadStatus, PatchRequest, PipelineEntity,
    PipelineStage, UpdateField,
};
