//! Schematic records
//!
//! A schematic describes one generated resource module: the database table
//! it covers and the classes and route the generator produced for it.
//! Mutating schematics is restricted to the admin role; read operations
//! only need an authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Principal;
use crate::handlers::{FieldKind, FieldRule, Operation, Patch};

use super::AdminResource;

/// One generated resource module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schematic {
    /// Record identifier
    pub id: i64,
    /// Database table the module covers
    pub table_name: String,
    /// Generated model class path
    pub model_class: Option<String>,
    /// Generated controller class path
    pub controller_class: Option<String>,
    /// Named route the module is reachable under
    pub route_name: Option<String>,
    /// When generation last ran
    pub generated_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Sanitized input for creating a schematic
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchematic {
    /// Database table
    pub table_name: String,
    /// Generated model class path
    #[serde(default)]
    pub model_class: Option<String>,
    /// Generated controller class path
    #[serde(default)]
    pub controller_class: Option<String>,
    /// Named route
    #[serde(default)]
    pub route_name: Option<String>,
    /// When generation last ran
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Sanitized input for updating a schematic
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSchematic {
    /// Database table
    #[serde(default)]
    pub table_name: Patch<String>,
    /// Generated model class path
    #[serde(default)]
    pub model_class: Patch<String>,
    /// Generated controller class path
    #[serde(default)]
    pub controller_class: Patch<String>,
    /// Named route
    #[serde(default)]
    pub route_name: Patch<String>,
    /// When generation last ran
    #[serde(default)]
    pub generated_at: Patch<DateTime<Utc>>,
}

static STORE_RULES: &[FieldRule] = &[
    FieldRule::required("table_name", FieldKind::String),
    FieldRule::nullable("model_class", FieldKind::String),
    FieldRule::nullable("controller_class", FieldKind::String),
    FieldRule::nullable("route_name", FieldKind::String),
    FieldRule::nullable("generated_at", FieldKind::Date),
];

static UPDATE_RULES: &[FieldRule] = &[
    FieldRule::sometimes("table_name", FieldKind::String),
    FieldRule::nullable("model_class", FieldKind::String),
    FieldRule::nullable("controller_class", FieldKind::String),
    FieldRule::nullable("route_name", FieldKind::String),
    FieldRule::nullable("generated_at", FieldKind::Date),
];

/// Descriptor for the schematics resource
pub struct Schematics;

impl AdminResource for Schematics {
    type Entity = Schematic;
    type Create = CreateSchematic;
    type Update = UpdateSchematic;

    const ENTITY: &'static str = "Schematic";
    const COLLECTION: &'static str = "Schematics";
    const SEGMENT: &'static str = "schematics";

    fn id(entity: &Schematic) -> i64 {
        entity.id
    }

    fn hydrate(id: i64, input: CreateSchematic, now: DateTime<Utc>) -> Schematic {
        Schematic {
            id,
            table_name: input.table_name,
            model_class: input.model_class,
            controller_class: input.controller_class,
            route_name: input.route_name,
            generated_at: input.generated_at,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(entity: &mut Schematic, input: UpdateSchematic, now: DateTime<Utc>) {
        input.table_name.set(&mut entity.table_name);
        input.model_class.apply_to(&mut entity.model_class);
        input
            .controller_class
            .apply_to(&mut entity.controller_class);
        input.route_name.apply_to(&mut entity.route_name);
        input.generated_at.apply_to(&mut entity.generated_at);
        entity.updated_at = now;
    }

    fn store_rules() -> &'static [FieldRule] {
        STORE_RULES
    }

    fn update_rules() -> &'static [FieldRule] {
        UPDATE_RULES
    }

    fn authorize(
        principal: &Principal,
        operation: Operation,
        _target: Option<&Schematic>,
    ) -> bool {
        match operation {
            Operation::Store | Operation::Update | Operation::Destroy => {
                principal.has_role("admin")
            }
            Operation::Index | Operation::Dt | Operation::View => principal.is_authenticated(),
        }
    }
}
