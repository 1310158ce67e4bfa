//! HTTP handlers for person CRUD.

pub mod person;
pub use person::*;
