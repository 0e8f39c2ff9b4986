//! Pipeline board endpoints.

use axum::Json;

use crate::{
    dtos::{BoardRequest, BoardResponse, BucketResponse, MoveRequest, MoveResponse, StageInfo},
    models::PipelineStage,
    services::{apply_move, bucket_entities, metrics, resolve_drop_target},
};

/// The six columns in display order.
pub async fn list_stages() -> Json<Vec<StageInfo>> {
    Json(PipelineStage::ALL.into_iter().map(StageInfo::from).collect())
}

/// Bucket leads and deals into columns.
pub async fn build_board(Json(payload): Json<BoardRequest>) -> Json<BoardResponse> {
    let board = bucket_entities(&payload.leads, &payload.deals);

    Json(BoardResponse {
        stages: board.buckets.iter().map(BucketResponse::from).collect(),
    })
}

/// Translate a drop into the field update (and PATCH call) for the moved
/// entity. Unresolvable targets and same-column drops are no-ops.
pub async fn move_entity(Json(payload): Json<MoveRequest>) -> Json<MoveResponse> {
    let target = match payload.target_stage.as_deref().and_then(PipelineStage::parse) {
        Some(stage) => Some(stage),
        None => payload.over_id.as_deref().and_then(|over_id| {
            let board = bucket_entities(&payload.leads, &payload.deals);
            resolve_drop_target(&board, over_id)
        }),
    };

    let entity = &payload.entity;
    let update = target.and_then(|stage| apply_move(entity, stage));
    let patch = update.as_ref().map(|u| u.patch_request(entity));

    metrics::record_move(entity.kind().as_str(), update.is_some());
    tracing::info!(
        entity = entity.kind().as_str(),
        id = %entity.id(),
        target = target.map(|s| s.as_str()).unwrap_or("-"),
        updated = update.is_some(),
        "Pipeline move"
    );

    Json(MoveResponse { update, patch })
}
