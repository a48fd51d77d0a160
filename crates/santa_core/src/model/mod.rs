//! Exchange domain model.
//!
//! # Responsibility
//! - Define participants and the assignment shape shared by the generator,
//!   templates and notification sinks.
//!
//! # Invariants
//! - Every participant is identified by its normalized address.
//! - An `Assignment` is always a derangement of its participants.

pub mod assignment;
pub mod participant;
