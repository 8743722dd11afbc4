//! Admin resource descriptors
//!
//! Each resource type plugs into the generic controller and the repository
//! backend through one [`AdminResource`] implementation: entity and DTO
//! types, labels, field rule sets, and the authorization predicate. The
//! implementations live on marker types named after their collections.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::Principal;
use crate::handlers::{FieldRule, Operation};

mod menu;
mod relationship;
mod schematic;

pub use menu::{CreateMenu, Menu, Menus, UpdateMenu};
pub use relationship::{CreateRelationship, Relationship, Relationships, UpdateRelationship};
pub use schematic::{CreateSchematic, Schematic, Schematics, UpdateSchematic};

/// Per-resource descriptor consumed by the generic controller
pub trait AdminResource: Send + Sync + 'static {
    /// Persisted record type
    type Entity: Clone + Serialize + Send + Sync + 'static;
    /// Sanitized input for store
    type Create: DeserializeOwned + Send + 'static;
    /// Sanitized input for update
    type Update: DeserializeOwned + Send + 'static;

    /// Singular label used in error and log context ("Menu")
    const ENTITY: &'static str;
    /// Plural label used in list envelopes ("Menus")
    const COLLECTION: &'static str;
    /// URL segment under the panel prefix ("menus")
    const SEGMENT: &'static str;

    /// The record's identifier
    fn id(entity: &Self::Entity) -> i64;

    /// Build a new record from sanitized input
    fn hydrate(id: i64, input: Self::Create, now: DateTime<Utc>) -> Self::Entity;

    /// Apply the fields present in sanitized input to an existing record
    fn apply(entity: &mut Self::Entity, input: Self::Update, now: DateTime<Utc>);

    /// Field rules for the store operation
    fn store_rules() -> &'static [FieldRule];

    /// Field rules for the update operation
    fn update_rules() -> &'static [FieldRule];

    /// Authorization predicate, evaluated before validation and execution
    ///
    /// Fails closed: a `false` return rejects the whole operation. The
    /// default admits any authenticated principal; resources override this
    /// to tighten specific operations.
    fn authorize(principal: &Principal, operation: Operation, target: Option<&Self::Entity>) -> bool {
        let _ = (operation, target);
        principal.is_authenticated()
    }
}
