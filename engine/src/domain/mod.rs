//! Domain layer
//!
//! Contains the course aggregate model with no persistence concerns.
//! - `entities`: Domain models for a course and everything it owns
//! - `ports`: Trait definitions for the persistence substrate

pub mod entities;
pub mod ports;
