use super::PersonRepository;
use crate::error::{AppError, AppResult};
use crate::model::{Address, Person};
use crate::page::{Page, PageRequest};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

const SELECT_PERSON: &str = r#"
    SELECT
        p.id,
        p.name,
        p.phone_number,
        p.email_address,
        p.address_id,
        a.street,
        a.city,
        a.state,
        a.postal_code,
        a.country
    FROM person p
    LEFT JOIN address a ON a.id = p.address_id
"#;

/// One row of `person LEFT JOIN address`.
#[derive(sqlx::FromRow)]
struct PersonRow {
    id: i64,
    name: String,
    phone_number: Option<String>,
    email_address: String,
    address_id: Option<i64>,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        let address = row.address_id.map(|id| Address {
            id: Some(id),
            street: row.street.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            state: row.state.unwrap_or_default(),
            postal_code: row.postal_code,
            country: row.country.unwrap_or_default(),
        });
        Person {
            id: Some(row.id),
            name: row.name,
            phone_number: row.phone_number,
            email_address: row.email_address,
            address,
        }
    }
}

/// PostgreSQL-backed repository. Person and address writes share one transaction.
#[derive(Clone)]
pub struct PgPersonRepository {
    pool: PgPool,
}

impl PgPersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonRepository for PgPersonRepository {
    async fn save(&self, mut person: Person) -> AppResult<Person> {
        let mut tx = self.pool.begin().await?;

        let owned_address_id = match person.id {
            Some(id) => {
                let row: Option<(Option<i64>,)> =
                    sqlx::query_as("SELECT address_id FROM person WHERE id = $1 FOR UPDATE")
                        .bind(id)
                        .fetch_optional(&mut *tx)
                        .await?;
                row.ok_or_else(|| AppError::NotFound(format!("person {}", id)))?.0
            }
            None => None,
        };

        if let Some(address) = person.address.as_mut() {
            match address.id {
                Some(address_id) if Some(address_id) == owned_address_id => {
                    update_address(&mut tx, address_id, address).await?;
                }
                _ => {
                    address.id = Some(insert_address(&mut tx, address).await?);
                }
            }
        }
        let address_id = person.address.as_ref().and_then(|a| a.id);

        let id = match person.id {
            Some(id) => {
                tracing::debug!(person_id = id, "update person");
                sqlx::query(
                    r#"
                    UPDATE person
                    SET name = $1, phone_number = $2, email_address = $3, address_id = $4
                    WHERE id = $5
                    "#,
                )
                .bind(&person.name)
                .bind(&person.phone_number)
                .bind(&person.email_address)
                .bind(address_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
                id
            }
            None => {
                let (id,): (i64,) = sqlx::query_as(
                    r#"
                    INSERT INTO person (name, phone_number, email_address, address_id)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(&person.name)
                .bind(&person.phone_number)
                .bind(&person.email_address)
                .bind(address_id)
                .fetch_one(&mut *tx)
                .await?;
                tracing::debug!(person_id = id, "insert person");
                id
            }
        };
        person.id = Some(id);

        if let Some(orphan) = owned_address_id.filter(|owned| Some(*owned) != address_id) {
            tracing::debug!(address_id = orphan, "delete replaced address");
            delete_address(&mut tx, orphan).await?;
        }

        tx.commit().await?;
        Ok(person)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Person>> {
        let sql = format!("{} WHERE p.id = $1", SELECT_PERSON);
        tracing::debug!(sql = %sql, person_id = id, "query");
        let row = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Person::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Person>> {
        let sql = format!("{} ORDER BY p.id", SELECT_PERSON);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, PersonRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn find_all_paged(&self, request: PageRequest) -> AppResult<Page<Person>> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*)::BIGINT FROM person")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!("{} ORDER BY p.id LIMIT $1 OFFSET $2", SELECT_PERSON);
        tracing::debug!(sql = %sql, size = request.size(), offset = request.offset(), "query");
        let rows = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(request.size())
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(rows.into_iter().map(Person::from).collect(), request, total))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let deleted: Option<(Option<i64>,)> =
            sqlx::query_as("DELETE FROM person WHERE id = $1 RETURNING address_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        match deleted {
            Some((Some(address_id),)) => delete_address(&mut tx, address_id).await?,
            Some((None,)) => {}
            None => tracing::debug!(person_id = id, "delete of absent person"),
        }
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

async fn insert_address(conn: &mut PgConnection, address: &Address) -> AppResult<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO address (street, city, state, postal_code, country)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&address.street)
    .bind(&address.city)
    .bind(&address.state)
    .bind(&address.postal_code)
    .bind(&address.country)
    .fetch_one(conn)
    .await?;
    tracing::debug!(address_id = id, "insert address");
    Ok(id)
}

async fn update_address(conn: &mut PgConnection, id: i64, address: &Address) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE address
        SET street = $1, city = $2, state = $3, postal_code = $4, country = $5
        WHERE id = $6
        "#,
    )
    .bind(&address.street)
    .bind(&address.city)
    .bind(&address.state)
    .bind(&address.postal_code)
    .bind(&address.country)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(())
}

async fn delete_address(conn: &mut PgConnection, id: i64) -> AppResult<()> {
    sqlx::query("DELETE FROM address WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}
