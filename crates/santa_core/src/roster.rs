//! Roster loading.
//!
//! # Responsibility
//! - Decode the participant list from a JSON array of records.
//! - Reject records that cannot serve as an identity before any draw.
//!
//! # Invariants
//! - Input order is preserved; it becomes the giver order.
//! - Duplicate identities are left for the generator to reject.

use crate::model::participant::{Participant, ParticipantValidationError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug)]
pub enum RosterError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidParticipant {
        index: usize,
        source: ParticipantValidationError,
    },
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read roster `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to decode roster: {err}"),
            Self::InvalidParticipant { index, source } => {
                write!(f, "invalid roster entry {index}: {source}")
            }
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidParticipant { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Decodes and validates a roster document.
///
/// Expected shape: `[{"name": "...", "address": "...", "<extra>": "..."}]`.
pub fn parse_roster(json: &str) -> RosterResult<Vec<Participant>> {
    let participants: Vec<Participant> = serde_json::from_str(json)?;
    for (index, participant) in participants.iter().enumerate() {
        participant
            .validate()
            .map_err(|source| RosterError::InvalidParticipant { index, source })?;
    }
    Ok(participants)
}

/// Reads a roster file and decodes it with [`parse_roster`].
pub fn load_roster(path: impl AsRef<Path>) -> RosterResult<Vec<Participant>> {
    let path = path.as_ref();
    let result = std::fs::read_to_string(path)
        .map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|json| parse_roster(&json));

    match &result {
        Ok(participants) => info!(
            "event=roster_load module=roster status=ok participants={}",
            participants.len()
        ),
        Err(err) => error!(
            "event=roster_load module=roster status=error error={}",
            err
        ),
    }
    result
}
