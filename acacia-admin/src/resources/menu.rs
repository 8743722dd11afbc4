//! Navigation menu records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::handlers::{FieldKind, FieldRule, Patch};

use super::AdminResource;

/// One entry in the admin navigation tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    /// Record identifier
    pub id: i64,
    /// Display title
    pub title: String,
    /// Icon name shown next to the title
    pub icon: Option<String>,
    /// Named route the entry links to
    pub route_name: Option<String>,
    /// Parent menu id for nested entries
    pub parent_id: Option<i64>,
    /// Position among siblings
    pub sort_order: i64,
    /// Whether the entry is rendered
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Sanitized input for creating a menu
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenu {
    /// Display title
    pub title: String,
    /// Icon name
    #[serde(default)]
    pub icon: Option<String>,
    /// Named route
    #[serde(default)]
    pub route_name: Option<String>,
    /// Parent menu id
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Position among siblings, defaults to 0
    #[serde(default)]
    pub sort_order: Option<i64>,
    /// Rendered flag, defaults to true
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Sanitized input for updating a menu
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenu {
    /// Display title
    #[serde(default)]
    pub title: Patch<String>,
    /// Icon name
    #[serde(default)]
    pub icon: Patch<String>,
    /// Named route
    #[serde(default)]
    pub route_name: Patch<String>,
    /// Parent menu id
    #[serde(default)]
    pub parent_id: Patch<i64>,
    /// Position among siblings
    #[serde(default)]
    pub sort_order: Patch<i64>,
    /// Rendered flag
    #[serde(default)]
    pub is_active: Patch<bool>,
}

static STORE_RULES: &[FieldRule] = &[
    FieldRule::required("title", FieldKind::String),
    FieldRule::nullable("icon", FieldKind::String),
    FieldRule::nullable("route_name", FieldKind::String),
    FieldRule::nullable("parent_id", FieldKind::Integer),
    FieldRule::sometimes("sort_order", FieldKind::Integer),
    FieldRule::sometimes("is_active", FieldKind::Boolean),
];

static UPDATE_RULES: &[FieldRule] = &[
    FieldRule::sometimes("title", FieldKind::String),
    FieldRule::nullable("icon", FieldKind::String),
    FieldRule::nullable("route_name", FieldKind::String),
    FieldRule::nullable("parent_id", FieldKind::Integer),
    FieldRule::sometimes("sort_order", FieldKind::Integer),
    FieldRule::sometimes("is_active", FieldKind::Boolean),
];

/// Descriptor for the menus resource
pub struct Menus;

impl AdminResource for Menus {
    type Entity = Menu;
    type Create = CreateMenu;
    type Update = UpdateMenu;

    const ENTITY: &'static str = "Menu";
    const COLLECTION: &'static str = "Menus";
    const SEGMENT: &'static str = "menus";

    fn id(entity: &Menu) -> i64 {
        entity.id
    }

    fn hydrate(id: i64, input: CreateMenu, now: DateTime<Utc>) -> Menu {
        Menu {
            id,
            title: input.title,
            icon: input.icon,
            route_name: input.route_name,
            parent_id: input.parent_id,
            sort_order: input.sort_order.unwrap_or(0),
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(entity: &mut Menu, input: UpdateMenu, now: DateTime<Utc>) {
        input.title.set(&mut entity.title);
        input.icon.apply_to(&mut entity.icon);
        input.route_name.apply_to(&mut entity.route_name);
        input.parent_id.apply_to(&mut entity.parent_id);
        input.sort_order.set(&mut entity.sort_order);
        input.is_active.set(&mut entity.is_active);
        entity.updated_at = now;
    }

    fn store_rules() -> &'static [FieldRule] {
        STORE_RULES
    }

    fn update_rules() -> &'static [FieldRule] {
        UPDATE_RULES
    }
}
