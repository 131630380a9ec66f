//! Infrastructure layer: entity storage, query engine, services, config.

pub mod config;
pub mod query;
pub mod seed;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use services::{ProfileService, ServiceError, Session, SessionService, UserService};
pub use store::{EntityStore, InMemoryEntityStore, SharedStore};
