//! Command-line surface.
//!
//! # Invariants
//! - `--from-address` is required unless `--dry-run` is set.
//! - `--dry-run` implies `--show-matches`.

use anyhow::{bail, Result};
use clap::Parser;
use santa_core::{SmtpSettings, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, DEFAULT_SUBJECT};
use std::path::PathBuf;

pub const DEFAULT_FROM_NAME: &str = "Secret Santa Robotic Elf";

#[derive(Debug, Parser)]
#[command(name = "santa", version)]
#[command(about = "Secret Santa emailer!")]
pub struct Cli {
    #[arg(
        long,
        help = "Display name for sender",
        default_value_t = String::from(DEFAULT_FROM_NAME)
    )]
    pub from_name: String,
    #[arg(long, help = "Email address to send from (required unless dry run)")]
    pub from_address: Option<String>,
    #[arg(
        long,
        env = "SANTA_FROM_PASSWORD",
        hide_env_values = true,
        help = "Password for the from-address (e.g. gmail app password)"
    )]
    pub from_password: Option<String>,
    #[arg(long, help = "SMTP host to send to", default_value_t = String::from(DEFAULT_SMTP_HOST))]
    pub smtp_host: String,
    #[arg(long, help = "SMTP port to send to", default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,
    #[arg(
        long,
        help = "JSON file containing an array of name/address objects",
        default_value = "data/people.json"
    )]
    pub source_file: PathBuf,
    #[arg(long, help = "Message body template (built-in default when omitted)")]
    pub template_file: Option<PathBuf>,
    #[arg(long, help = "Mail subject line", default_value_t = String::from(DEFAULT_SUBJECT))]
    pub subject: String,
    #[arg(long, help = "Print the pairings out when sending", default_value_t = false)]
    pub show_matches: bool,
    #[arg(long, help = "Do not send. Implies --show-matches", default_value_t = false)]
    pub dry_run: bool,
    #[arg(long, help = "Seed for a reproducible draw")]
    pub seed: Option<u64>,
    #[arg(long, help = "Log level (trace|debug|info|warn|error)")]
    pub log_level: Option<String>,
    #[arg(long, help = "Absolute directory for rotating log files (stderr when omitted)")]
    pub log_dir: Option<String>,
}

impl Cli {
    /// Checks flag combinations clap can't express.
    pub fn validate(&self) -> Result<()> {
        if !self.dry_run && self.from_address.is_none() {
            bail!("parameter 'from-address' required except in dry run");
        }
        Ok(())
    }

    pub fn show_matches(&self) -> bool {
        self.show_matches || self.dry_run
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(santa_core::default_log_level())
    }

    pub fn smtp_settings(&self) -> Result<SmtpSettings> {
        let Some(from_address) = self.from_address.clone() else {
            bail!("parameter 'from-address' required to send mail");
        };
        Ok(SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            from_name: self.from_name.clone(),
            from_address,
            password: self.from_password.clone(),
        })
    }
}
