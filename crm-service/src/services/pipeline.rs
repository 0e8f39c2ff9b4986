//! Pipeline stage mapper.
//!
//! Leads and deals share one board of six columns. Deals store the column
//! directly; leads store a status that is mapped onto a column through
//! `LEAD_STATUS_TO_STAGE`. Moving a card back is looked up in the separate
//! `STAGE_TO_LEAD_STATUS` table. The two tables are not inverses: the
//! proposal column always sends a lead back as `qualified`, so a lead in
//! `proposal` that leaves the column and returns comes back `qualified`.

use serde::Serialize;
use uuid::Uuid;

use super::metrics;
use crate::models::{
    Deal, FieldUpdate, Lead, LeadStatus, PipelineEntity, PipelineStage,
};

/// Lead status → board column.
pub const LEAD_STATUS_TO_STAGE: [(LeadStatus, PipelineStage); 7] = [
    (LeadStatus::New, PipelineStage::NewLead),
    (LeadStatus::Contacted, PipelineStage::Contacted),
    (LeadStatus::Qualified, PipelineStage::Proposal),
    (LeadStatus::Proposal, PipelineStage::Proposal),
    (LeadStatus::Negotiation, PipelineStage::Negotiation),
    (LeadStatus::Won, PipelineStage::Won),
    (LeadStatus::Lost, PipelineStage::Lost),
];

/// Board column → status written to a lead dropped there.
pub const STAGE_TO_LEAD_STATUS: [(PipelineStage, LeadStatus); 6] = [
    (PipelineStage::NewLead, LeadStatus::New),
    (PipelineStage::Contacted, LeadStatus::Contacted),
    (PipelineStage::Proposal, LeadStatus::Qualified),
    (PipelineStage::Negotiation, LeadStatus::Negotiation),
    (PipelineStage::Won, LeadStatus::Won),
    (PipelineStage::Lost, LeadStatus::Lost),
];

fn stage_for_lead_status(status: LeadStatus) -> Option<PipelineStage> {
    LEAD_STATUS_TO_STAGE
        .iter()
        .find(|(from, _)| *from == status)
        .map(|(_, stage)| *stage)
}

fn lead_status_for_stage(stage: PipelineStage) -> Option<LeadStatus> {
    STAGE_TO_LEAD_STATUS
        .iter()
        .find(|(from, _)| *from == stage)
        .map(|(_, status)| *status)
}

/// Column an entity is displayed in; `None` when its stage or status is not
/// one we know.
pub fn stage_of(entity: &PipelineEntity) -> Option<PipelineStage> {
    match entity {
        PipelineEntity::Lead(lead) => LeadStatus::parse(&lead.status).and_then(stage_for_lead_status),
        PipelineEntity::Deal(deal) => PipelineStage::parse(&deal.stage),
    }
}

/// Describe the write that moves `entity` into `target`.
///
/// Returns `None` when the entity already sits in `target` or when the lead
/// table has no status for `target`.
pub fn apply_move(entity: &PipelineEntity, target: PipelineStage) -> Option<FieldUpdate> {
    if stage_of(entity) == Some(target) {
        return None;
    }

    match entity {
        PipelineEntity::Deal(_) => Some(FieldUpdate::stage(target)),
        PipelineEntity::Lead(_) => lead_status_for_stage(target).map(FieldUpdate::status),
    }
}

/// Display projection of an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineCard {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: Uuid,
    pub drag_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub category: Option<String>,
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<String>,
    pub stage_key: PipelineStage,
}

impl PipelineCard {
    pub fn new(entity: &PipelineEntity, stage: PipelineStage) -> Self {
        let kind = entity.kind().as_str();
        let drag_id = entity.drag_id();

        match entity {
            PipelineEntity::Lead(lead) => {
                let company = lead.company.clone().filter(|c| !c.is_empty());
                let (title, subtitle) = match company {
                    Some(company) => (company, Some(lead.name.clone())),
                    None => (lead.name.clone(), None),
                };
                Self {
                    kind,
                    id: lead.id,
                    drag_id,
                    title,
                    subtitle,
                    category: lead.category.clone(),
                    value: lead.value,
                    quality_score: lead.lead_quality_score,
                    probability: None,
                    close_date: None,
                    stage_key: stage,
                }
            }
            PipelineEntity::Deal(deal) => Self {
                kind,
                id: deal.id,
                drag_id,
                title: deal.title.clone(),
                subtitle: None,
                category: None,
                value: deal.value,
                quality_score: None,
                probability: deal.probability,
                close_date: deal.expected_close_date.clone(),
                stage_key: stage,
            },
        }
    }
}

/// One column of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct StageBucket {
    pub stage: PipelineStage,
    pub entities: Vec<PipelineEntity>,
    pub total_value: i64,
}

impl StageBucket {
    fn empty(stage: PipelineStage) -> Self {
        Self {
            stage,
            entities: Vec::new(),
            total_value: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.entities.len()
    }

    pub fn cards(&self) -> Vec<PipelineCard> {
        self.entities
            .iter()
            .map(|entity| PipelineCard::new(entity, self.stage))
            .collect()
    }
}

/// All six columns in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineBoard {
    pub buckets: Vec<StageBucket>,
}

impl PipelineBoard {
    /// Column for `stage`; `None` on a board that lacks it.
    pub fn bucket(&self, stage: PipelineStage) -> Option<&StageBucket> {
        self.buckets.iter().find(|bucket| bucket.stage == stage)
    }

    /// Column holding the card with `drag_id`.
    pub fn locate(&self, drag_id: &str) -> Option<PipelineStage> {
        self.buckets
            .iter()
            .find(|bucket| bucket.entities.iter().any(|e| e.drag_id() == drag_id))
            .map(|bucket| bucket.stage)
    }
}

/// Partition leads and deals into the six columns.
///
/// Within a column leads come first, then deals, each in input order. An
/// entity with an unknown stage or status lands in no column.
pub fn bucket_entities(leads: &[Lead], deals: &[Deal]) -> PipelineBoard {
    let mut buckets: Vec<StageBucket> = PipelineStage::ALL
        .into_iter()
        .map(StageBucket::empty)
        .collect();

    let entities = leads
        .iter()
        .cloned()
        .map(PipelineEntity::Lead)
        .chain(deals.iter().cloned().map(PipelineEntity::Deal));

    for entity in entities {
        match stage_of(&entity) {
            Some(stage) => {
                let bucket = &mut buckets[stage as usize];
                bucket.total_value = bucket.total_value.saturating_add(entity.value());
                bucket.entities.push(entity);
            }
            None => {
                tracing::debug!(
                    entity = entity.kind().as_str(),
                    id = %entity.id(),
                    "Entity has no pipeline stage, leaving it off the board"
                );
                metrics::record_unplaced(entity.kind().as_str());
            }
        }
    }

    PipelineBoard { buckets }
}

/// Stage a drop lands in: `over_id` is either a column key or the drag id of
/// a card already on the board.
pub fn resolve_drop_target(board: &PipelineBoard, over_id: &str) -> Option<PipelineStage> {
    PipelineStage::parse(over_id).or_else(|| board.locate(over_id))
}
