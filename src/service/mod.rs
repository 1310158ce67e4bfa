//! PersonService: delegation to the repository, plus request validation.

mod person;
mod validation;
pub use person::PersonService;
pub use validation::PersonValidator;
