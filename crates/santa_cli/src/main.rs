//! `santa` entry point.
//!
//! # Responsibility
//! - Wire flags, roster, template and sink into one exchange run.
//! - Map any failure to a non-zero exit status.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use santa_core::{
    load_roster, logging_status, DryRunSink, ExchangeOptions, ExchangeReport, ExchangeService,
    LogTarget, MessageTemplate, SmtpSink,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = santa_core::init_logging(cli.log_level(), cli.log_dir.as_deref()) {
        eprintln!("santa: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(report) => {
            info!(
                "event=run module=cli status=ok dry_run={} participants={} delivered={}",
                cli.dry_run, report.participants, report.delivered
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=run module=cli status=error error={err:#}");
            if matches!(logging_status(), Some((_, LogTarget::Directory(_)))) {
                eprintln!("santa: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExchangeReport> {
    cli.validate()?;

    let participants = load_roster(&cli.source_file)
        .with_context(|| format!("loading participants from {}", cli.source_file.display()))?;

    let template = match &cli.template_file {
        Some(path) => MessageTemplate::load(path)
            .with_context(|| format!("loading template {}", path.display()))?,
        None => MessageTemplate::default(),
    };

    let options = ExchangeOptions {
        subject: cli.subject.clone(),
        show_matches: cli.show_matches(),
    };

    let mut rng = match cli.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    if cli.dry_run {
        let mut service = ExchangeService::new(DryRunSink::new(), template, options);
        return service
            .run(&participants, &mut rng)
            .context("dry run failed");
    }

    let settings = cli.smtp_settings()?;
    let sink = SmtpSink::connect(&settings).context("configuring smtp transport")?;
    let mut service = ExchangeService::new(sink, template, options);
    service
        .run(&participants, &mut rng)
        .context("sending notifications failed")
}
