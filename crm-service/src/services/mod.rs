pub mod invoice;
pub mod invoice_book;
pub mod metrics;
pub mod pipeline;

pub use invoice::{
    add_service_line_item, compute_totals, new_blank_line_item, recompute_item_amount,
    remove_line_item,
};
pub use invoice_book::{filter_invoices, prepare_invoice, summarize_invoices, InvoiceSummary};
pub use metrics::{get_metrics, init_metrics};
pub use pipeline::{
    apply_move, bucket_entities, resolve_drop_target, stage_of, PipelineBoard, PipelineCard,
    StageBucket,
};
