//! Thin orchestration over the person repository.

use crate::error::AppResult;
use crate::model::Person;
use crate::page::{Page, PageRequest};
use crate::repository::PersonRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct PersonService {
    repository: Arc<dyn PersonRepository>,
}

impl PersonService {
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_persons_page(&self, request: PageRequest) -> AppResult<Page<Person>> {
        tracing::info!(page = request.number(), size = request.size(), "fetching persons page");
        self.repository.find_all_paged(request).await
    }

    /// Unbounded: every stored person in one response.
    pub async fn get_all_persons(&self) -> AppResult<Vec<Person>> {
        tracing::info!("fetching all persons");
        self.repository.find_all().await
    }

    /// `Ok(None)` when no person has this id.
    pub async fn get_person_by_id(&self, id: i64) -> AppResult<Option<Person>> {
        tracing::info!(person_id = id, "fetching person");
        self.repository.find_by_id(id).await
    }

    pub async fn save_person(&self, person: Person) -> AppResult<Person> {
        tracing::info!(name = %person.name, person_id = ?person.id, "saving person");
        self.repository.save(person).await
    }

    pub async fn delete_person(&self, id: i64) -> AppResult<()> {
        tracing::info!(person_id = id, "deleting person");
        self.repository.delete_by_id(id).await
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
