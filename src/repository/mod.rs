//! Persistence gateway for persons. Addresses are stored and deleted together with their owner.

mod memory;
mod postgres;

pub use memory::InMemoryPersonRepository;
pub use postgres::PgPersonRepository;

use crate::error::AppResult;
use crate::model::Person;
use crate::page::{Page, PageRequest};
use async_trait::async_trait;

/// Storage contract keyed by the numeric person id.
///
/// Saving follows the address ownership rule: an incoming address that carries the
/// id of the address the person already owns updates that row; any other address
/// is stored as a new row, and the previously owned one is removed.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert when `id` is `None`, otherwise overwrite the stored row.
    /// Returns the person with every identifier assigned.
    async fn save(&self, person: Person) -> AppResult<Person>;

    /// Absence is `Ok(None)`.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Person>>;

    /// Every stored person, ascending id.
    async fn find_all(&self) -> AppResult<Vec<Person>>;

    async fn find_all_paged(&self, request: PageRequest) -> AppResult<Page<Person>>;

    /// Succeeds whether or not the id exists.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Readiness check for the backing store.
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
