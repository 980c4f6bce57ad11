//! Core use-case services.
//!
//! # Responsibility
//! - Turn user commands (add, delete, commit edit) into store mutations.
//! - Keep front ends decoupled from repository and SQL details.

pub mod invention_service;
