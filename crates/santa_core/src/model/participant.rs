//! Participant domain model.
//!
//! # Responsibility
//! - Define the record loaded from a roster and carried through an exchange.
//! - Define the identity used to decide whether a giver drew themselves.
//!
//! # Invariants
//! - Identity is the normalized address, never the display name.
//! - `extra` fields are opaque payload for templates; core logic never reads them.

use lettre::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

/// Anything the derangement generator can pair up.
///
/// Two values are the same person iff their identities compare equal.
pub trait Identity {
    type Id: Eq + Hash + Display;

    fn identity(&self) -> Self::Id;
}

/// Normalized participant identity: trimmed, ASCII-lowercased address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn from_address(address: &str) -> Self {
        Self(address.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One member of the gift exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name used in rendered messages.
    #[serde(default)]
    pub name: String,
    /// Delivery address; also the participant identity.
    pub address: String,
    /// Additional template fields, e.g. `wishlist` or `budget`.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Participant {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds one extra template field, replacing any previous value.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> ParticipantId {
        ParticipantId::from_address(&self.address)
    }

    /// Looks up a template field by name.
    ///
    /// `name` and `address` resolve to the record fields; anything else is
    /// looked up in `extra`.
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(self.name.as_str()),
            "address" => Some(self.address.as_str()),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// Validates that the address is usable as an identity and as a mailbox.
    ///
    /// Addresses go through the same parser the SMTP sink uses, so a roster
    /// that loads can always be addressed.
    pub fn validate(&self) -> Result<(), ParticipantValidationError> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(ParticipantValidationError::EmptyAddress);
        }

        address
            .parse::<Address>()
            .map(|_| ())
            .map_err(|_| ParticipantValidationError::MalformedAddress(self.address.clone()))
    }
}

impl Identity for Participant {
    type Id = ParticipantId;

    fn identity(&self) -> ParticipantId {
        self.id()
    }
}

impl Identity for String {
    type Id = String;

    fn identity(&self) -> String {
        self.clone()
    }
}

/// Participant record validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantValidationError {
    EmptyAddress,
    MalformedAddress(String),
}

impl Display for ParticipantValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "participant address cannot be empty"),
            Self::MalformedAddress(address) => {
                write!(f, "participant address `{address}` is not a valid mail address")
            }
        }
    }
}

impl Error for ParticipantValidationError {}
