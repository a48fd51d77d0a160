//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate generator, templates and sinks into one exchange run.
//! - Keep the CLI decoupled from delivery details.

pub mod exchange_service;
