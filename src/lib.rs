//! Generate Laravel database seeders from the live contents of a
//! PostgreSQL schema.
//!
//! The pipeline runs in one direction: [`lister`] resolves table names,
//! [`fetcher`] reads and redacts rows through a [`catalog::Catalog`],
//! [`seeder`] renders the class and [`writer`] puts it on disk.
//! [`generator::Generator`] strings the stages together.

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod fetcher;
pub mod generator;
pub mod inflect;
pub mod lister;
pub mod seeder;
pub mod writer;

pub use error::{Result, SeedgenError};
