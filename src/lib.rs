//! Person registry: REST CRUD for persons and their owned addresses.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod page;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use config::{AppConfig, StoreKind};
pub use error::{AppError, AppResult, ConfigError, FieldErrors};
pub use migration::{apply_migrations, ensure_database_exists};
pub use model::{Address, Person};
pub use page::{Page, PageRequest};
pub use repository::{InMemoryPersonRepository, PersonRepository, PgPersonRepository};
pub use routes::{app_router, common_routes, person_routes};
pub use service::{PersonService, PersonValidator};
pub use state::AppState;
