//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain.
//!
//! Translates JSON requests into domain commands, domain results into the
//! DTOs of the `shared` crate, and domain errors into HTTP status codes
//! with a stable error code the client can show inline.

pub mod rest;

pub use rest::*;
