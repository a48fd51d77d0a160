//! Exchange use-case service.
//!
//! # Responsibility
//! - Draw an assignment, render one message per giver and hand each to a sink.
//!
//! # Invariants
//! - Every participant is validated and every message rendered before the
//!   first delivery, so a bad address or template never leaves a partially
//!   notified group.
//! - Delivery follows giver order and stops at the first sink error.
//! - Pairings are logged by name only when `show_matches` is set.

use crate::derange::{generate, DerangeError};
use crate::model::assignment::Assignment;
use crate::model::participant::{Participant, ParticipantValidationError};
use crate::notify::{Notice, NotificationSink, NotifyError};
use crate::template::{MessageTemplate, TemplateError};
use log::{error, info};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_SUBJECT: &str = "Your Secret Santa assignment";

pub type ExchangeResult<T> = Result<T, ExchangeError>;

#[derive(Debug)]
pub enum ExchangeError {
    InvalidParticipant {
        index: usize,
        source: ParticipantValidationError,
    },
    Derange(DerangeError),
    Render {
        giver: String,
        source: TemplateError,
    },
    Deliver {
        giver: String,
        source: NotifyError,
    },
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParticipant { index, source } => {
                write!(f, "invalid participant at entry {index}: {source}")
            }
            Self::Derange(err) => write!(f, "{err}"),
            Self::Render { giver, source } => {
                write!(f, "failed to render message for `{giver}`: {source}")
            }
            Self::Deliver { giver, source } => {
                write!(f, "failed to notify `{giver}`: {source}")
            }
        }
    }
}

impl Error for ExchangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidParticipant { source, .. } => Some(source),
            Self::Derange(err) => Some(err),
            Self::Render { source, .. } => Some(source),
            Self::Deliver { source, .. } => Some(source),
        }
    }
}

impl From<DerangeError> for ExchangeError {
    fn from(value: DerangeError) -> Self {
        Self::Derange(value)
    }
}

/// Per-run message options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOptions {
    pub subject: String,
    pub show_matches: bool,
}

impl Default for ExchangeOptions {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            show_matches: false,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeReport {
    pub participants: usize,
    pub delivered: usize,
}

/// Use-case service wrapping one notification sink.
pub struct ExchangeService<S: NotificationSink> {
    sink: S,
    template: MessageTemplate,
    options: ExchangeOptions,
}

impl<S: NotificationSink> ExchangeService<S> {
    pub fn new(sink: S, template: MessageTemplate, options: ExchangeOptions) -> Self {
        Self {
            sink,
            template,
            options,
        }
    }

    /// Draws an assignment without notifying anyone.
    ///
    /// Participants built in code skip roster validation, so every record is
    /// checked here before the draw.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        participants: &[Participant],
        rng: &mut R,
    ) -> ExchangeResult<Assignment<Participant>> {
        validate_all(participants)?;
        let assignment = generate(participants, rng)?;
        info!(
            "event=draw module=exchange status=ok participants={}",
            assignment.len()
        );
        Ok(assignment)
    }

    /// Renders and delivers one message per pairing.
    pub fn notify(
        &mut self,
        assignment: &Assignment<Participant>,
    ) -> ExchangeResult<ExchangeReport> {
        validate_all(assignment.iter().map(|pairing| &pairing.giver))?;

        let bodies = assignment
            .iter()
            .map(|pairing| {
                self.template
                    .render(&pairing.giver, &pairing.receiver)
                    .map_err(|source| ExchangeError::Render {
                        giver: pairing.giver.address.clone(),
                        source,
                    })
            })
            .collect::<ExchangeResult<Vec<String>>>()?;

        let mut delivered = 0;
        for (pairing, body) in assignment.iter().zip(&bodies) {
            let notice = Notice {
                giver: &pairing.giver,
                receiver: &pairing.receiver,
                subject: &self.options.subject,
                body,
            };
            if let Err(source) = self.sink.deliver(&notice) {
                error!(
                    "event=sent module=exchange status=error delivered={} error={}",
                    delivered, source
                );
                return Err(ExchangeError::Deliver {
                    giver: pairing.giver.address.clone(),
                    source,
                });
            }
            delivered += 1;

            if self.options.show_matches {
                info!(
                    "event=sent module=exchange status=ok from={} to={}",
                    pairing.giver.name, pairing.receiver.name
                );
            } else {
                info!("event=sent module=exchange status=ok index={}", delivered);
            }
        }

        Ok(ExchangeReport {
            participants: assignment.len(),
            delivered,
        })
    }

    /// Draws and notifies in one step.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        participants: &[Participant],
        rng: &mut R,
    ) -> ExchangeResult<ExchangeReport> {
        let assignment = self.draw(participants, rng)?;
        self.notify(&assignment)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Checks records in order. Over an assignment's givers this covers every
/// participant, since each one gives exactly once.
fn validate_all<'a>(participants: impl IntoIterator<Item = &'a Participant>) -> ExchangeResult<()> {
    for (index, participant) in participants.into_iter().enumerate() {
        participant.validate().map_err(|source| {
            error!(
                "event=validate module=exchange status=error error_code=invalid_participant index={}",
                index
            );
            ExchangeError::InvalidParticipant { index, source }
        })?;
    }
    Ok(())
}
