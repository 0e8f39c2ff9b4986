use serde::{Deserialize, Serialize};

use crate::models::{Deal, FieldUpdate, Lead, PatchRequest, PipelineEntity, PipelineStage};
use crate::services::{PipelineCard, StageBucket};

#[derive(Debug, Serialize)]
pub struct StageInfo {
    pub key: PipelineStage,
    pub label: &'static str,
}

impl From<PipelineStage> for StageInfo {
    fn from(stage: PipelineStage) -> Self {
        Self {
            key: stage,
            label: stage.label(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRequest {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub deals: Vec<Deal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketResponse {
    pub stage: PipelineStage,
    pub label: &'static str,
    pub count: usize,
    pub total_value: i64,
    pub items: Vec<PipelineCard>,
}

impl From<&StageBucket> for BucketResponse {
    fn from(bucket: &StageBucket) -> Self {
        Self {
            stage: bucket.stage,
            label: bucket.stage.label(),
            count: bucket.count(),
            total_value: bucket.total_value,
            items: bucket.cards(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub stages: Vec<BucketResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub entity: PipelineEntity,
    /// Column key the card was dropped on.
    #[serde(default)]
    pub target_stage: Option<String>,
    /// Drop target id when the card was dropped on another card.
    #[serde(default)]
    pub over_id: Option<String>,
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub deals: Vec<Deal>,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub update: Option<FieldUpdate>,
    pub patch: Option<PatchRequest>,
}
