//! Infrastructure module for storage backends.
//!
//! This module contains the repository trait, its `PostgreSQL` and
//! in-memory implementations, and the factory that selects between them.

pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use factory::{DatabaseConfig, FactoryError, RepositoryConfig, RepositoryFactory, StorageMode};
pub use in_memory::InMemoryBankRepository;
pub use postgres::PostgresBankRepository;
pub use repository::{BankRepository, RepositoryError, RepositoryFuture};
