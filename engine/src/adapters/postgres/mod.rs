//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod course_repo;


pub use course_repo::{PostgresCourseRepository, PostgresCourseTransaction};
