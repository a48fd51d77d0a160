//! Notification sinks.
//!
//! # Responsibility
//! - Deliver one rendered message per giver.
//! - Keep transport details (SMTP, dry run) behind one trait.
//!
//! # Invariants
//! - Sinks never retry; the first failure is returned to the caller.
//! - Messages are addressed to the giver, never the receiver.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::participant::Participant;

mod dry_run;
mod smtp;

pub use dry_run::DryRunSink;
pub use smtp::{SmtpSettings, SmtpSink, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};

pub type NotifyResult<T> = Result<T, NotifyError>;

/// One rendered message ready for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice<'a> {
    pub giver: &'a Participant,
    pub receiver: &'a Participant,
    pub subject: &'a str,
    pub body: &'a str,
}

/// Delivery backend for exchange notices.
pub trait NotificationSink {
    fn deliver(&mut self, notice: &Notice<'_>) -> NotifyResult<()>;
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn deliver(&mut self, notice: &Notice<'_>) -> NotifyResult<()> {
        (**self).deliver(notice)
    }
}

#[derive(Debug)]
pub enum NotifyError {
    InvalidAddress {
        address: String,
        source: lettre::address::AddressError,
    },
    Build(lettre::error::Error),
    Transport(lettre::transport::smtp::Error),
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddress { address, source } => {
                write!(f, "invalid mail address `{address}`: {source}")
            }
            Self::Build(err) => write!(f, "failed to build message: {err}"),
            Self::Transport(err) => write!(f, "smtp delivery failed: {err}"),
        }
    }
}

impl Error for NotifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidAddress { source, .. } => Some(source),
            Self::Build(err) => Some(err),
            Self::Transport(err) => Some(err),
        }
    }
}

impl From<lettre::error::Error> for NotifyError {
    fn from(value: lettre::error::Error) -> Self {
        Self::Build(value)
    }
}

impl From<lettre::transport::smtp::Error> for NotifyError {
    fn from(value: lettre::transport::smtp::Error) -> Self {
        Self::Transport(value)
    }
}
