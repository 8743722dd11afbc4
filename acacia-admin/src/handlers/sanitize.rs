//! Request sanitizers
//!
//! Every operation validates its raw JSON body against a declarative rule
//! set before anything touches the repository. Rules mirror the three
//! presence modes of the admin request classes:
//!
//! - `required`: must be present and non-null
//! - `sometimes`: validated only when present; null is rejected
//! - `nullable`: may be absent or null; type-checked otherwise
//!
//! The output is a [`SanitizedInput`] holding only the validated fields,
//! which the controller converts into the resource's typed create/update
//! object via [`SanitizedInput::into_object`] so repositories never see the
//! wire format.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::error::ApiError;

/// Admin operation a sanitizer runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Full collection listing
    Index,
    /// Paginated data-table listing
    Dt,
    /// Fetch a single record
    View,
    /// Create a record
    Store,
    /// Update a record
    Update,
    /// Remove a record
    Destroy,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::Dt => write!(f, "dt"),
            Self::View => write!(f, "view"),
            Self::Store => write!(f, "store"),
            Self::Update => write!(f, "update"),
            Self::Destroy => write!(f, "destroy"),
        }
    }
}

/// Value type a field rule enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string
    String,
    /// JSON integer
    Integer,
    /// JSON boolean
    Boolean,
    /// RFC 3339 datetime or `YYYY-MM-DD` date, normalized to RFC 3339 UTC
    Date,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::Date => write!(f, "date"),
        }
    }
}

/// One field's validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name in the request body
    pub name: &'static str,
    /// Expected value type
    pub kind: FieldKind,
    /// Whether the field must be present and non-null
    pub required: bool,
    /// Whether an explicit null passes validation
    pub nullable: bool,
}

impl FieldRule {
    /// Field must be present and non-null
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
        }
    }

    /// Field is validated only when present; null is rejected
    pub const fn sometimes(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: false,
        }
    }

    /// Field may be absent or null
    pub const fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: true,
        }
    }
}

/// Validated request fields, restricted to the rule set
///
/// Consumed exactly once by the repository call it accompanies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizedInput {
    fields: Map<String, Value>,
}

impl SanitizedInput {
    /// Look up a validated field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether the named field passed validation
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of validated fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were provided
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The raw validated mapping
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Convert into the resource's typed create/update object
    pub fn into_object<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(Value::Object(self.fields))
            .map_err(|e| ApiError::invalid_field("payload", e.to_string()))
    }
}

/// Validate `raw` against `rules`, producing the sanitized field mapping
///
/// Fields not covered by a rule are dropped. All rule violations are
/// collected and reported together as a single validation error.
pub fn sanitize(rules: &[FieldRule], raw: &Map<String, Value>) -> Result<SanitizedInput, ApiError> {
    let mut fields = Map::new();
    let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for rule in rules {
        match raw.get(rule.name) {
            None => {
                if rule.required {
                    errors
                        .entry(rule.name.to_string())
                        .or_default()
                        .push("is required".to_string());
                }
            }
            Some(Value::Null) => {
                if rule.nullable {
                    fields.insert(rule.name.to_string(), Value::Null);
                } else if rule.required {
                    errors
                        .entry(rule.name.to_string())
                        .or_default()
                        .push("is required".to_string());
                } else {
                    errors
                        .entry(rule.name.to_string())
                        .or_default()
                        .push("may not be null".to_string());
                }
            }
            Some(value) => match check_kind(rule.kind, value) {
                Ok(normalized) => {
                    fields.insert(rule.name.to_string(), normalized);
                }
                Err(message) => {
                    errors
                        .entry(rule.name.to_string())
                        .or_default()
                        .push(message);
                }
            },
        }
    }

    if errors.is_empty() {
        Ok(SanitizedInput { fields })
    } else {
        Err(ApiError::validation(errors))
    }
}

fn check_kind(kind: FieldKind, value: &Value) -> Result<Value, String> {
    match kind {
        FieldKind::String => value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| "must be a string".to_string()),
        FieldKind::Integer => {
            if value.is_i64() || value.is_u64() {
                Ok(value.clone())
            } else {
                Err("must be an integer".to_string())
            }
        }
        FieldKind::Boolean => value
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| "must be a boolean".to_string()),
        FieldKind::Date => {
            let text = value.as_str().ok_or_else(|| "must be a date".to_string())?;
            parse_date(text)
                .map(|dt| Value::String(dt.to_rfc3339()))
                .ok_or_else(|| "must be a date".to_string())
        }
    }
}

/// Accept RFC 3339 datetimes or plain dates, normalized to UTC
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(DateTime::<Utc>::from_naive_utc_and_offset(
        date.and_time(NaiveTime::MIN),
        Utc,
    ))
}

/// Tri-state field value for partial updates
///
/// Distinguishes a field that was absent from the request (leave the stored
/// value unchanged) from an explicit null (clear it) and a concrete value
/// (replace it). Deserializes from the sanitized mapping: absent fields use
/// the `Missing` default, null becomes `Null`, anything else `Value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was not part of the request
    Missing,
    /// Field was an explicit null
    Null,
    /// Field carried a value
    Value(T),
}

// Manual impl: the derive would bound T: Default, which types like
// DateTime<Utc> cannot satisfy.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> Patch<T> {
    /// Whether the field was absent from the request
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Apply to a nullable slot: null clears, missing leaves unchanged
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Missing => {}
            Self::Null => *slot = None,
            Self::Value(v) => *slot = Some(v),
        }
    }

    /// Apply to a non-nullable slot; null never reaches here because the
    /// matching rule rejects it during validation
    pub fn set(self, slot: &mut T) {
        if let Self::Value(v) = self {
            *slot = v;
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}
