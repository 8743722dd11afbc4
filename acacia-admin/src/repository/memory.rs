//! In-memory repository backend
//!
//! Backs the resource repositories with a process-local concurrent map.
//! Records are inserted and replaced whole, which gives store/update/destroy
//! per-record atomicity. Search and sort for the data-table listing work on
//! a JSON projection of the record so the backend stays generic over the
//! resource type.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;

use crate::resources::AdminResource;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::{OrderDirection, Page, PageMeta, Pagination};
use super::traits::{RepositoryResult, ResourceRepository};

/// Process-local repository for one resource type
pub struct MemoryRepository<R: AdminResource> {
    records: DashMap<i64, R::Entity>,
    next_id: AtomicI64,
}

impl<R: AdminResource> MemoryRepository<R> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the repository holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn project(entity: &R::Entity, operation: RepositoryOperation) -> RepositoryResult<Value> {
        serde_json::to_value(entity)
            .map_err(|e| RepositoryError::storage_failed(operation, e.to_string()))
    }
}

impl<R: AdminResource> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AdminResource> ResourceRepository<i64, R::Entity, R::Create, R::Update>
    for MemoryRepository<R>
{
    async fn index(&self) -> RepositoryResult<Vec<R::Entity>> {
        let mut records: Vec<R::Entity> =
            self.records.iter().map(|e| e.value().clone()).collect();
        records.sort_by_key(|r| R::id(r));
        Ok(records)
    }

    async fn dt(
        &self,
        search: Option<&str>,
        order_by: Option<(&str, OrderDirection)>,
        pagination: Pagination,
    ) -> RepositoryResult<Page<R::Entity>> {
        let mut rows: Vec<(Value, R::Entity)> = Vec::with_capacity(self.records.len());
        for entry in self.records.iter() {
            let projected = Self::project(entry.value(), RepositoryOperation::Dt)?;
            rows.push((projected, entry.value().clone()));
        }

        if let Some(needle) = search.filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            rows.retain(|(projected, _)| matches_search(projected, &needle));
        }

        match order_by {
            Some((field, direction)) => rows.sort_by(|a, b| {
                let ordering = compare_values(
                    a.0.get(field).unwrap_or(&Value::Null),
                    b.0.get(field).unwrap_or(&Value::Null),
                );
                let ordering = match direction {
                    OrderDirection::Ascending => ordering,
                    OrderDirection::Descending => ordering.reverse(),
                };
                ordering.then_with(|| R::id(&a.1).cmp(&R::id(&b.1)))
            }),
            None => rows.sort_by_key(|(_, entity)| R::id(entity)),
        }

        let total = rows.len() as u64;
        let limit = pagination.limit.max(1);
        let page_number = (pagination.offset / limit + 1).min(u64::from(u32::MAX)) as u32;
        let data: Vec<R::Entity> = rows
            .into_iter()
            .skip(pagination.offset as usize)
            .take(limit as usize)
            .map(|(_, entity)| entity)
            .collect();

        Ok(Page::new(data, PageMeta::new(page_number, limit as u32, total)))
    }

    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<R::Entity>> {
        Ok(self.records.get(id).map(|e| e.value().clone()))
    }

    async fn show(&self, record: R::Entity) -> RepositoryResult<R::Entity> {
        Ok(record)
    }

    async fn store(&self, data: R::Create) -> RepositoryResult<R::Entity> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let entity = R::hydrate(id, data, Utc::now());
        self.records.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, record: &R::Entity, data: R::Update) -> RepositoryResult<R::Entity> {
        let id = R::id(record);
        match self.records.get_mut(&id) {
            Some(mut entry) => {
                R::apply(entry.value_mut(), data, Utc::now());
                Ok(entry.value().clone())
            }
            None => Err(RepositoryError::not_found(R::ENTITY, id.to_string())
                .with_operation(RepositoryOperation::Update)),
        }
    }

    async fn destroy(&self, record: R::Entity) -> RepositoryResult<R::Entity> {
        let id = R::id(&record);
        match self.records.remove(&id) {
            Some((_, removed)) => Ok(removed),
            None => Err(RepositoryError::not_found(R::ENTITY, id.to_string())
                .with_operation(RepositoryOperation::Destroy)),
        }
    }
}

/// Order two projected field values; null sorts first
fn compare_values(a: &Value, b: &Value) -> CmpOrdering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(CmpOrdering::Equal),
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => CmpOrdering::Equal,
        (Value::Null, _) => CmpOrdering::Less,
        (_, Value::Null) => CmpOrdering::Greater,
        _ => CmpOrdering::Equal,
    }
}

/// Case-insensitive substring match over the record's string fields
fn matches_search(projected: &Value, needle: &str) -> bool {
    projected
        .as_object()
        .map(|map| {
            map.values()
                .any(|v| v.as_str().is_some_and(|s| s.to_lowercase().contains(needle)))
        })
        .unwrap_or(false)
}
