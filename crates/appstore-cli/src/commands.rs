//! Subcommand handlers
//!
//! Handlers write results to `out` and diagnostics meant for the user to
//! `err`, and report whether the command succeeded.

use crate::cli::field_flag;
use anyhow::{bail, Context, Result};
use appstore_config::{ConfigFormGenerator, FieldName, FieldSet, TextPreview};
use appstore_site::schedule::REFRESH_INTERVAL;
use appstore_site::ux::{EXPLORE_URL, FORK_URL};
use appstore_site::{
    CopyButton, CopyFeedback, FileClipboard, FilePreferenceStore, IndexingNotice, SiteSettings,
    SiteStats, StatsClient, ThemeController, ViewerZone,
};
use chrono::{DateTime, Utc};
use clap::ArgMatches;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Exit code 0
    Success,
    /// Exit code 1
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Matches of the invoked subcommand, or `matches` itself
#[must_use]
pub fn leaf(matches: &ArgMatches) -> &ArgMatches {
    matches.subcommand().map_or(matches, |(_, args)| args)
}

/// Verbosity requested with `-v`
#[must_use]
pub fn verbosity(matches: &ArgMatches) -> u8 {
    leaf(matches).get_count("verbose")
}

/// Settings from `--config` or the per-user file
///
/// # Errors
/// Unreadable or malformed settings file
pub fn load_settings(args: &ArgMatches) -> Result<SiteSettings> {
    let explicit = args.get_one::<PathBuf>("config");
    SiteSettings::load(explicit.map(PathBuf::as_path)).context("could not load settings")
}

/// Field values from `--from` with flag overrides on top
///
/// # Errors
/// Unreadable or malformed input file
pub fn collect_fields(args: &ArgMatches) -> Result<FieldSet> {
    let mut fields = match args.get_one::<PathBuf>("from") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?;
            if text.trim().is_empty() {
                FieldSet::new()
            } else {
                serde_yaml::from_str(&text)
                    .with_context(|| format!("could not parse fields in {}", path.display()))?
            }
        }
        None => FieldSet::new(),
    };

    for field in FieldName::ALL {
        if let Some(value) = args.get_one::<String>(field.key()) {
            tracing::debug!(flag = field_flag(field), "field set from flag");
            fields.set(field, Some(value.clone()));
        }
    }
    Ok(fields)
}

/// `generate`: print the entry, or the validation message on `err`
///
/// # Errors
/// Input file or output failures
pub fn generate<O: Write, E: Write>(args: &ArgMatches, out: &mut O, err: &mut E) -> Result<Status> {
    let fields = collect_fields(args)?;
    let mut preview = TextPreview::new();
    let outcome = ConfigFormGenerator::new().refresh(&fields, &mut preview);

    if preview.is_error() {
        writeln!(err, "{}", preview.text())?;
        return Ok(Status::Failure);
    }
    write!(out, "{}", preview.text())?;

    if let Some(path) = args.get_one::<PathBuf>("copy-to") {
        let mut clipboard = FileClipboard::new(path);
        let feedback = CopyButton::new().click(preview.text(), &mut clipboard, Instant::now());
        writeln!(err, "{}", feedback.label())?;
        if feedback != CopyFeedback::Copied {
            return Ok(Status::Failure);
        }
    }

    tracing::info!(document = outcome.is_document(), "entry generated");
    Ok(Status::Success)
}

/// `theme`: print the theme, toggling first when asked
///
/// # Errors
/// Output failures only; storage problems are logged
pub fn theme<O: Write>(args: &ArgMatches, settings: &SiteSettings, out: &mut O) -> Result<Status> {
    let store = FilePreferenceStore::new(settings.preferences_file());
    let mut controller = ThemeController::load(Box::new(store));

    if args.get_one::<String>("action").map(String::as_str) == Some("toggle") {
        controller.toggle();
    }
    writeln!(out, "{} ({})", controller.theme(), controller.icon().class())?;
    Ok(Status::Success)
}

/// `stats`: print every counter; failed reads show as `failed`
///
/// # Errors
/// HTTP client construction or output failures
pub async fn stats<O: Write>(settings: &SiteSettings, out: &mut O) -> Result<Status> {
    let client = StatsClient::from_settings(settings).context("could not build HTTP client")?;
    let stats = SiteStats::fetch(&client, settings).await;

    writeln!(out, "Stars: {}", stats.stars)?;
    writeln!(out, "Forks: {}", stats.forks)?;
    writeln!(out, "Watchers: {}", stats.watchers)?;
    writeln!(out, "Apps: {}", stats.apps)?;
    Ok(Status::Success)
}

/// Notice for `now` in the configured zone
#[must_use]
pub fn notice_at(settings: &SiteSettings, now: DateTime<Utc>) -> IndexingNotice {
    let zone = ViewerZone::resolve(settings.display_offset.as_deref());
    IndexingNotice::render(&settings.schedule, now, zone)
}

fn print_notice<O: Write>(notice: &IndexingNotice, out: &mut O) -> Result<()> {
    writeln!(out, "{}", notice.local_line)?;
    writeln!(out, "{}", notice.utc_line)?;
    Ok(())
}

/// `next-run`: print the next indexing time, every minute with `--watch`
///
/// # Errors
/// Output failures or a broken interrupt handler
pub async fn next_run<O: Write>(
    args: &ArgMatches,
    settings: &SiteSettings,
    out: &mut O,
) -> Result<Status> {
    if !args.get_flag("watch") {
        print_notice(&notice_at(settings, Utc::now()), out)?;
        return Ok(Status::Success);
    }

    let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                print_notice(&notice_at(settings, Utc::now()), out)?;
            }
            result = &mut shutdown => {
                result.context("could not listen for interrupt")?;
                tracing::debug!("watch interrupted");
                break;
            }
        }
    }
    Ok(Status::Success)
}

/// `links`: print outbound links
///
/// # Errors
/// Output failures
pub fn links<O: Write>(out: &mut O) -> Result<Status> {
    writeln!(out, "Fork the config repository: {FORK_URL}")?;
    writeln!(out, "Explore the store: {EXPLORE_URL}")?;
    Ok(Status::Success)
}

/// Dispatch parsed arguments
///
/// # Errors
/// Fatal setup failures; validation failures are a [`Status::Failure`]
pub async fn run<O: Write, E: Write>(
    matches: &ArgMatches,
    out: &mut O,
    err: &mut E,
) -> Result<Status> {
    match matches.subcommand() {
        Some(("generate", args)) => generate(args, out, err),
        Some(("theme", args)) => theme(args, &load_settings(args)?, out),
        Some(("stats", args)) => stats(&load_settings(args)?, out).await,
        Some(("next-run", args)) => next_run(args, &load_settings(args)?, out).await,
        Some(("links", _)) => links(out),
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }
}
