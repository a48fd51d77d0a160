//! Authenticated SMTP delivery.
//!
//! # Invariants
//! - One plain-text message per notice, sent to the giver only.
//! - Transport errors are returned as-is; no retry.

use super::{Notice, NotificationSink, NotifyError, NotifyResult};
use crate::model::participant::Participant;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};
use log::info;
use std::fmt::{Debug, Formatter};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Outbound session parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub from_name: String,
    pub from_address: String,
    /// Login password for `from_address`; `None` sends unauthenticated.
    pub password: Option<String>,
}

impl Debug for SmtpSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("from_name", &self.from_name)
            .field("from_address", &self.from_address)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Sends notices over a STARTTLS SMTP relay.
pub struct SmtpSink {
    transport: SmtpTransport,
    from: Mailbox,
    delivered: usize,
}

impl SmtpSink {
    /// Builds the transport. No connection is made until the first send.
    pub fn connect(settings: &SmtpSettings) -> NotifyResult<Self> {
        let from = mailbox(&settings.from_name, &settings.from_address)?;
        let mut builder = SmtpTransport::starttls_relay(&settings.host)?.port(settings.port);
        if let Some(password) = &settings.password {
            builder = builder.credentials(Credentials::new(
                settings.from_address.clone(),
                password.clone(),
            ));
        }

        info!(
            "event=smtp_connect module=notify status=ok host={} port={} authenticated={}",
            settings.host,
            settings.port,
            settings.password.is_some()
        );
        Ok(Self {
            transport: builder.build(),
            from,
            delivered: 0,
        })
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl NotificationSink for SmtpSink {
    fn deliver(&mut self, notice: &Notice<'_>) -> NotifyResult<()> {
        let message = build_message(self.from.clone(), notice)?;
        self.transport.send(&message)?;
        self.delivered += 1;
        Ok(())
    }
}

fn build_message(from: Mailbox, notice: &Notice<'_>) -> NotifyResult<Message> {
    let to = participant_mailbox(notice.giver)?;
    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(notice.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(notice.body.to_string())?;
    Ok(message)
}

fn participant_mailbox(participant: &Participant) -> NotifyResult<Mailbox> {
    mailbox(&participant.name, &participant.address)
}

fn mailbox(name: &str, address: &str) -> NotifyResult<Mailbox> {
    let parsed = address
        .trim()
        .parse::<Address>()
        .map_err(|source| NotifyError::InvalidAddress {
            address: address.to_string(),
            source,
        })?;
    let name = name.trim();
    let name = (!name.is_empty()).then(|| name.to_string());
    Ok(Mailbox::new(name, parsed))
}
