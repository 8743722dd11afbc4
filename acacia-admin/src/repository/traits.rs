//! Repository trait for admin resource CRUD
//!
//! Defines the uniform operation set every resource repository exposes,
//! using RPITIT (Return Position Impl Trait In Traits) for async methods
//! without `async_trait`.
//!
//! The record targeted by `show`/`update`/`destroy` is passed explicitly;
//! there is no hidden "current model" state on the repository, so a single
//! repository instance serves concurrent requests.

use std::future::Future;

use super::error::RepositoryError;
use super::pagination::{OrderDirection, Page, Pagination};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Uniform CRUD and listing operations over one resource type
///
/// # Type Parameters
///
/// - `Id`: record identifier type
/// - `Entity`: the full record type returned from queries
/// - `Create`: sanitized input for creating records
/// - `Update`: sanitized input for partial updates
pub trait ResourceRepository<Id, Entity, Create, Update>: Send + Sync {
    /// Return the full unfiltered collection, in stable id order
    fn index(&self) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Return one page of the collection for a data-table view
    ///
    /// `search` filters case-insensitively over string fields, `order_by`
    /// selects the sort column and direction, `pagination` the slice.
    fn dt(
        &self,
        search: Option<&str>,
        order_by: Option<(&str, OrderDirection)>,
        pagination: Pagination,
    ) -> impl Future<Output = RepositoryResult<Page<Entity>>> + Send;

    /// Find a record by its identifier
    ///
    /// Returns `Ok(None)` when the record does not exist; `Err` is reserved
    /// for storage faults.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Fetch the bound record, expanding related data where the backend
    /// supports it
    fn show(&self, record: Entity) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Create a new record from sanitized input
    ///
    /// Either every provided field is persisted or none are.
    fn store(&self, data: Create) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Apply the fields present in `data` to the bound record
    fn update(
        &self,
        record: &Entity,
        data: Update,
    ) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Remove the bound record, returning it as confirmation
    fn destroy(&self, record: Entity) -> impl Future<Output = RepositoryResult<Entity>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-level check that the trait can be implemented with plain
    // async fns, plus a smoke test of the mock.

    #[derive(Debug, Clone, PartialEq)]
    struct MockEntity {
        id: i64,
        name: String,
    }

    struct MockCreate {
        name: String,
    }

    struct MockUpdate {
        name: Option<String>,
    }

    struct MockRepository;

    impl ResourceRepository<i64, MockEntity, MockCreate, MockUpdate> for MockRepository {
        async fn index(&self) -> RepositoryResult<Vec<MockEntity>> {
            Ok(vec![])
        }

        async fn dt(
            &self,
            _search: Option<&str>,
            _order_by: Option<(&str, OrderDirection)>,
            pagination: Pagination,
        ) -> RepositoryResult<Page<MockEntity>> {
            Ok(Page::empty(pagination.limit as u32))
        }

        async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<MockEntity>> {
            Ok(Some(MockEntity {
                id: *id,
                name: "mock".to_string(),
            }))
        }

        async fn show(&self, record: MockEntity) -> RepositoryResult<MockEntity> {
            Ok(record)
        }

        async fn store(&self, data: MockCreate) -> RepositoryResult<MockEntity> {
            Ok(MockEntity {
                id: 1,
                name: data.name,
            })
        }

        async fn update(
            &self,
            record: &MockEntity,
            data: MockUpdate,
        ) -> RepositoryResult<MockEntity> {
            Ok(MockEntity {
                id: record.id,
                name: data.name.unwrap_or_else(|| record.name.clone()),
            })
        }

        async fn destroy(&self, record: MockEntity) -> RepositoryResult<MockEntity> {
            Ok(record)
        }
    }

    #[tokio::test]
    async fn test_mock_repository_store_and_update() {
        let repo = MockRepository;
        let created = repo
            .store(MockCreate {
                name: "first".to_string(),
            })
            .await
            .expect("store");
        assert_eq!(created.name, "first");

        let updated = repo
            .update(&created, MockUpdate { name: None })
            .await
            .expect("update");
        assert_eq!(updated.name, "first");
    }

    #[tokio::test]
    async fn test_mock_repository_dt_empty() {
        let repo = MockRepository;
        let page = repo
            .dt(None, None, Pagination::default())
            .await
            .expect("dt");
        assert!(page.is_empty());
    }
}
