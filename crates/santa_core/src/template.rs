//! Notification message templates.
//!
//! # Responsibility
//! - Parse message bodies with `{{ role.field }}` placeholders.
//! - Render one body per giver/receiver pairing.
//!
//! # Invariants
//! - Syntax errors and unknown roles are reported at parse time.
//! - Rendering never emits an unresolved placeholder; missing extra fields fail.

use crate::model::participant::Participant;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_TEMPLATE: &str = "Hi {{ giver.name }},

This year you are the Secret Santa for {{ receiver.name }}.

Keep it secret, keep it safe!
";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)(?:\.([A-Za-z_][A-Za-z0-9_-]*))?\s*\}\}")
        .expect("valid placeholder regex")
});

static DEFAULT_MESSAGE: Lazy<MessageTemplate> =
    Lazy::new(|| MessageTemplate::parse(DEFAULT_TEMPLATE).expect("valid default template"));

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Debug)]
pub enum TemplateError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        offset: usize,
    },
    UnknownRole {
        role: String,
        offset: usize,
    },
    MissingField {
        role: Role,
        field: String,
        address: String,
    },
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read template `{}`: {source}", path.display())
            }
            Self::Malformed { offset } => {
                write!(f, "malformed placeholder at byte {offset}")
            }
            Self::UnknownRole { role, offset } => write!(
                f,
                "unknown placeholder role `{role}` at byte {offset}; expected giver|receiver"
            ),
            Self::MissingField {
                role,
                field,
                address,
            } => write!(
                f,
                "{role} `{address}` has no field `{field}` referenced by the template"
            ),
        }
    }
}

impl Error for TemplateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Which side of a pairing a placeholder reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Giver,
    Receiver,
}

impl Role {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "giver" => Some(Self::Giver),
            "receiver" => Some(Self::Receiver),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Giver => "giver",
            Self::Receiver => "receiver",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field { role: Role, field: String },
}

/// Parsed message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Parses a template body.
    ///
    /// `{{ giver }}` is shorthand for `{{ giver.name }}`. A `{{` that does not
    /// open a valid placeholder is rejected rather than copied through.
    pub fn parse(source: &str) -> TemplateResult<Self> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for captures in PLACEHOLDER_RE.captures_iter(source) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            push_text(&mut segments, source, cursor, whole.start())?;

            let role_name = &captures[1];
            let role = Role::parse(role_name).ok_or_else(|| TemplateError::UnknownRole {
                role: role_name.to_string(),
                offset: whole.start(),
            })?;
            let field = captures
                .get(2)
                .map_or("name", |field| field.as_str())
                .to_string();
            segments.push(Segment::Field { role, field });
            cursor = whole.end();
        }
        push_text(&mut segments, source, cursor, source.len())?;

        Ok(Self { segments })
    }

    /// Reads and parses a template file.
    pub fn load(path: impl AsRef<Path>) -> TemplateResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Renders the body a giver receives.
    pub fn render(&self, giver: &Participant, receiver: &Participant) -> TemplateResult<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field { role, field } => {
                    let participant = match role {
                        Role::Giver => giver,
                        Role::Receiver => receiver,
                    };
                    let value =
                        participant
                            .field(field)
                            .ok_or_else(|| TemplateError::MissingField {
                                role: *role,
                                field: field.clone(),
                                address: participant.address.clone(),
                            })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        DEFAULT_MESSAGE.clone()
    }
}

fn push_text(
    segments: &mut Vec<Segment>,
    source: &str,
    start: usize,
    end: usize,
) -> TemplateResult<()> {
    let text = &source[start..end];
    if let Some(position) = text.find("{{") {
        return Err(TemplateError::Malformed {
            offset: start + position,
        });
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
    Ok(())
}
