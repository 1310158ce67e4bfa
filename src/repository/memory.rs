use super::PersonRepository;
use crate::error::{AppError, AppResult};
use crate::model::Person;
use crate::page::{Page, PageRequest};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    persons: BTreeMap<i64, Person>,
    last_person_id: i64,
    last_address_id: i64,
}

impl Tables {
    fn next_person_id(&mut self) -> i64 {
        self.last_person_id += 1;
        self.last_person_id
    }

    fn next_address_id(&mut self) -> i64 {
        self.last_address_id += 1;
        self.last_address_id
    }
}

/// Process-local repository with the same semantics as [`super::PgPersonRepository`].
/// Identifiers come from monotonically increasing counters and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    tables: RwLock<Tables>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn save(&self, mut person: Person) -> AppResult<Person> {
        let mut tables = self.tables.write().await;

        let owned_address_id = match person.id {
            Some(id) => tables
                .persons
                .get(&id)
                .ok_or_else(|| AppError::NotFound(format!("person {}", id)))?
                .address
                .as_ref()
                .and_then(|a| a.id),
            None => None,
        };

        if let Some(address) = person.address.as_mut() {
            if address.id.is_none() || address.id != owned_address_id {
                address.id = Some(tables.next_address_id());
            }
        }

        let id = match person.id {
            Some(id) => id,
            None => tables.next_person_id(),
        };
        person.id = Some(id);
        tables.persons.insert(id, person.clone());
        tracing::debug!(person_id = id, "stored person in memory");
        Ok(person)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Person>> {
        Ok(self.tables.read().await.persons.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Person>> {
        Ok(self.tables.read().await.persons.values().cloned().collect())
    }

    async fn find_all_paged(&self, request: PageRequest) -> AppResult<Page<Person>> {
        let tables = self.tables.read().await;
        let total = tables.persons.len() as i64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
        let content = tables
            .persons
            .values()
            .skip(offset)
            .take(size)
            .cloned()
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.tables.write().await.persons.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Address;

    fn person(name: &str, with_address: bool) -> Person {
        Person {
            id: None,
            name: name.to_string(),
            phone_number: None,
            email_address: format!("{}@example.com", name.to_lowercase()),
            address: with_address.then(|| Address {
                id: None,
                street: "10 Downing St".into(),
                city: "London".into(),
                state: "Greater London".into(),
                postal_code: Some("12345".into()),
                country: "UK".into(),
            }),
        }
    }

    #[tokio::test]
    async fn save_assigns_ids_that_are_never_reused() {
        let repo = InMemoryPersonRepository::new();
        let first = repo.save(person("Ada", true)).await.expect("save should succeed");
        assert_eq!(first.id, Some(1));
        assert_eq!(first.address.as_ref().and_then(|a| a.id), Some(1));

        repo.delete_by_id(1).await.expect("delete should succeed");
        let second = repo.save(person("Alan", true)).await.expect("save should succeed");
        assert_eq!(second.id, Some(2));
        assert_eq!(second.address.as_ref().and_then(|a| a.id), Some(2));
    }

    #[tokio::test]
    async fn owned_address_is_updated_in_place() {
        let repo = InMemoryPersonRepository::new();
        let mut saved = repo.save(person("Ada", true)).await.expect("save should succeed");
        if let Some(address) = saved.address.as_mut() {
            address.city = "Cambridge".into();
        }
        let updated = repo.save(saved).await.expect("update should succeed");
        let address = updated.address.expect("address kept");
        assert_eq!(address.id, Some(1));
        assert_eq!(address.city, "Cambridge");
    }

    #[tokio::test]
    async fn foreign_address_id_is_never_shared() {
        let repo = InMemoryPersonRepository::new();
        let ada = repo.save(person("Ada", true)).await.expect("save should succeed");
        let mut alan = person("Alan", false);
        alan.address = ada.address.clone();
        let alan = repo.save(alan).await.expect("save should succeed");
        assert_ne!(
            alan.address.as_ref().and_then(|a| a.id),
            ada.address.as_ref().and_then(|a| a.id)
        );
    }

    #[tokio::test]
    async fn saving_unknown_id_is_not_found() {
        let repo = InMemoryPersonRepository::new();
        let mut ghost = person("Ghost", false);
        ghost.id = Some(42);
        let err = repo.save(ghost).await.expect_err("unknown id");
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.find_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn paging_over_twenty_five_rows() {
        let repo = InMemoryPersonRepository::new();
        for i in 0..25 {
            repo.save(person(&format!("P{}", i), false)).await.expect("save should succeed");
        }
        let last = repo
            .find_all_paged(PageRequest::new(2, 10).expect("valid request"))
            .await
            .expect("page should load");
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.total_elements, 25);
        assert_eq!(last.content.len(), 5);
        assert_eq!(last.content[0].id, Some(21));

        let beyond = repo
            .find_all_paged(PageRequest::new(7, 10).expect("valid request"))
            .await
            .expect("page should load");
        assert!(beyond.content.is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryPersonRepository::new();
        repo.delete_by_id(5).await.expect("absent id deletes fine");
        let saved = repo.save(person("Ada", false)).await.expect("save should succeed");
        let id = saved.id.expect("id assigned");
        repo.delete_by_id(id).await.expect("delete should succeed");
        repo.delete_by_id(id).await.expect("second delete should succeed");
        assert!(repo.find_by_id(id).await.expect("lookup").is_none());
    }
}
