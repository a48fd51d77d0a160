//! Core domain logic for the Secret Santa exchange.
//! This crate is the single source of truth for pairing invariants.

pub mod derange;
pub mod logging;
pub mod model;
pub mod notify;
pub mod roster;
pub mod service;
pub mod template;

pub use derange::{
    generate, generate_with_limits, DerangeError, DerangeLimits, DerangeResult, InvalidInput,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::assignment::{Assignment, Pairing};
pub use model::participant::{Identity, Participant, ParticipantId, ParticipantValidationError};
pub use notify::{
    DryRunSink, Notice, NotificationSink, NotifyError, NotifyResult, SmtpSettings, SmtpSink,
    DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
};
pub use roster::{load_roster, parse_roster, RosterError, RosterResult};
pub use service::exchange_service::{
    ExchangeError, ExchangeOptions, ExchangeReport, ExchangeResult, ExchangeService,
    DEFAULT_SUBJECT,
};
pub use template::{MessageTemplate, Role, TemplateError, TemplateResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
