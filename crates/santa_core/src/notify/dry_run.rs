//! Sink that accepts notices without sending mail.
//!
//! Match lines come from the exchange service when `show_matches` is set;
//! this sink only adds per-notice debug detail.

use super::{Notice, NotificationSink, NotifyResult};
use log::debug;

/// Counts notices and sends nothing.
#[derive(Debug, Default)]
pub struct DryRunSink {
    delivered: usize,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notices accepted so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl NotificationSink for DryRunSink {
    fn deliver(&mut self, notice: &Notice<'_>) -> NotifyResult<()> {
        debug!(
            "event=match module=notify mode=dry_run subject_chars={} body_chars={}",
            notice.subject.chars().count(),
            notice.body.chars().count()
        );
        self.delivered += 1;
        Ok(())
    }
}
