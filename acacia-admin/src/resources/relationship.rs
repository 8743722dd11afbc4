//! Relationship records between schematics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::handlers::{FieldKind, FieldRule, Patch};

use super::AdminResource;

/// A declared relation from one schematic to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Record identifier
    pub id: i64,
    /// Owning schematic
    pub schematic_id: i64,
    /// Target schematic, if resolved
    pub related_schematic_id: Option<i64>,
    /// Relation kind, e.g. "has_many" or "belongs_to"
    pub relation_type: String,
    /// Accessor name generated on the owning model
    pub method_name: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Sanitized input for creating a relationship
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRelationship {
    /// Owning schematic
    pub schematic_id: i64,
    /// Target schematic
    #[serde(default)]
    pub related_schematic_id: Option<i64>,
    /// Relation kind
    pub relation_type: String,
    /// Accessor name
    #[serde(default)]
    pub method_name: Option<String>,
}

/// Sanitized input for updating a relationship
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRelationship {
    /// Owning schematic
    #[serde(default)]
    pub schematic_id: Patch<i64>,
    /// Target schematic
    #[serde(default)]
    pub related_schematic_id: Patch<i64>,
    /// Relation kind
    #[serde(default)]
    pub relation_type: Patch<String>,
    /// Accessor name
    #[serde(default)]
    pub method_name: Patch<String>,
}

static STORE_RULES: &[FieldRule] = &[
    FieldRule::required("schematic_id", FieldKind::Integer),
    FieldRule::nullable("related_schematic_id", FieldKind::Integer),
    FieldRule::required("relation_type", FieldKind::String),
    FieldRule::nullable("method_name", FieldKind::String),
];

static UPDATE_RULES: &[FieldRule] = &[
    FieldRule::sometimes("schematic_id", FieldKind::Integer),
    FieldRule::nullable("related_schematic_id", FieldKind::Integer),
    FieldRule::sometimes("relation_type", FieldKind::String),
    FieldRule::nullable("method_name", FieldKind::String),
];

/// Descriptor for the relationships resource
pub struct Relationships;

impl AdminResource for Relationships {
    type Entity = Relationship;
    type Create = CreateRelationship;
    type Update = UpdateRelationship;

    const ENTITY: &'static str = "Relationship";
    const COLLECTION: &'static str = "Relationships";
    const SEGMENT: &'static str = "relationships";

    fn id(entity: &Relationship) -> i64 {
        entity.id
    }

    fn hydrate(id: i64, input: CreateRelationship, now: DateTime<Utc>) -> Relationship {
        Relationship {
            id,
            schematic_id: input.schematic_id,
            related_schematic_id: input.related_schematic_id,
            relation_type: input.relation_type,
            method_name: input.method_name,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(entity: &mut Relationship, input: UpdateRelationship, now: DateTime<Utc>) {
        input.schematic_id.set(&mut entity.schematic_id);
        input
            .related_schematic_id
            .apply_to(&mut entity.related_schematic_id);
        input.relation_type.set(&mut entity.relation_type);
        input.method_name.apply_to(&mut entity.method_name);
        entity.updated_at = now;
    }

    fn store_rules() -> &'static [FieldRule] {
        STORE_RULES
    }

    fn update_rules() -> &'static [FieldRule] {
        UPDATE_RULES
    }
}
