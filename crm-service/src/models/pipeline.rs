//! Pipeline models: the fixed stage columns and the two entity kinds shown on
//! the board.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the six fixed pipeline columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    NewLead,
    Contacted,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::NewLead,
        PipelineStage::Contacted,
        PipelineStage::Proposal,
        PipelineStage::Negotiation,
        PipelineStage::Won,
        PipelineStage::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::NewLead => "new_lead",
            PipelineStage::Contacted => "contacted",
            PipelineStage::Proposal => "proposal",
            PipelineStage::Negotiation => "negotiation",
            PipelineStage::Won => "won",
            PipelineStage::Lost => "lost",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::NewLead => "New Lead",
            PipelineStage::Contacted => "Contacted",
            PipelineStage::Proposal => "Proposal Sent",
            PipelineStage::Negotiation => "Negotiation",
            PipelineStage::Won => "Won",
            PipelineStage::Lost => "Lost",
        }
    }

    /// `None` for anything outside the six known ids.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.as_str() == s)
    }
}

/// Lead status. Seven values against six stages: `qualified` and `proposal`
/// share the proposal column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 7] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Proposal,
        LeadStatus::Negotiation,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Proposal => "proposal",
            LeadStatus::Negotiation => "negotiation",
            LeadStatus::Won => "won",
            LeadStatus::Lost => "lost",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// Lead as returned by `/api/leads`.
///
/// `status` stays a raw string so a record with an unknown status still
/// deserializes; it simply has no column on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub status: String,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub lead_quality_score: Option<i64>,
}

/// Deal as returned by `/api/deals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub title: String,
    pub stage: String,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub probability: Option<i64>,
    #[serde(default)]
    pub expected_close_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Lead,
    Deal,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Lead => "lead",
            EntityKind::Deal => "deal",
        }
    }

    /// Collection path on the REST API.
    pub fn resource_path(&self) -> &'static str {
        match self {
            EntityKind::Lead => "/api/leads",
            EntityKind::Deal => "/api/deals",
        }
    }
}

/// Anything that can sit in a pipeline column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEntity {
    Lead(Lead),
    Deal(Deal),
}

impl PipelineEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            PipelineEntity::Lead(_) => EntityKind::Lead,
            PipelineEntity::Deal(_) => EntityKind::Deal,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            PipelineEntity::Lead(lead) => lead.id,
            PipelineEntity::Deal(deal) => deal.id,
        }
    }

    /// Monetary value, missing counted as 0.
    pub fn value(&self) -> i64 {
        match self {
            PipelineEntity::Lead(lead) => lead.value.unwrap_or(0),
            PipelineEntity::Deal(deal) => deal.value.unwrap_or(0),
        }
    }

    /// Board-wide unique id, e.g. `lead-<uuid>`.
    pub fn drag_id(&self) -> String {
        format!("{}-{}", self.kind().as_str(), self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateField {
    Status,
    Stage,
}

impl UpdateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateField::Status => "status",
            UpdateField::Stage => "stage",
        }
    }
}

/// A pending write: set `field` to `value` on the moved entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub field: UpdateField,
    pub value: String,
}

impl FieldUpdate {
    pub fn status(status: LeadStatus) -> Self {
        Self {
            field: UpdateField::Status,
            value: status.as_str().to_string(),
        }
    }

    pub fn stage(stage: PipelineStage) -> Self {
        Self {
            field: UpdateField::Stage,
            value: stage.as_str().to_string(),
        }
    }

    /// The REST call that applies this update to `entity`.
    pub fn patch_request(&self, entity: &PipelineEntity) -> PatchRequest {
        let mut body = serde_json::Map::new();
        body.insert(
            self.field.as_str().to_string(),
            serde_json::Value::String(self.value.clone()),
        );

        PatchRequest {
            method: "PATCH",
            path: format!("{}/{}", entity.kind().resource_path(), entity.id()),
            body: serde_json::Value::Object(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchRequest {
    pub method: &'static str,
    pub path: String,
    pub body: serde_json::Value,
}
