//! Course duplication engine
//!
//! Copies a course and everything it owns into a new course in one
//! transaction, shifting every timestamp by a fixed offset. Uses hexagonal
//! (ports & adapters) architecture: the engine in `app` only sees the
//! repository ports in `domain`, and `adapters` implements them on SeaORM.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod entity;
pub mod error;

#[cfg(test)]
mod test_utils;
