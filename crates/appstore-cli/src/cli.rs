//! Command line definition

use appstore_config::FieldName;
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Flag name for a field
#[must_use]
pub fn field_flag(field: FieldName) -> &'static str {
    match field {
        FieldName::Name => "name",
        FieldName::Author => "author",
        FieldName::Version => "version",
        FieldName::Description => "description",
        FieldName::LogoUrl => "logo-url",
        FieldName::DownloadUrl => "download-url",
        FieldName::Takedown => "takedown",
        FieldName::Sha256sum => "sha256sum",
        FieldName::Homepage => "homepage",
        FieldName::Tags => "tags",
    }
}

fn generate_command() -> Command {
    let mut command = Command::new("generate")
        .about("Validate submission fields and print the app entry")
        .disable_version_flag(true)
        .arg(
            Arg::new("from")
                .long("from")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("YAML or JSON file with field values; flags override it"),
        )
        .arg(
            Arg::new("copy-to")
                .long("copy-to")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Also copy the entry into this file"),
        );

    for field in FieldName::ALL {
        let help = if field == FieldName::Tags {
            "Comma-separated tags".to_string()
        } else if field.is_required() {
            format!("Value for {} (required)", field.key())
        } else {
            format!("Value for {}", field.key())
        };
        command = command.arg(
            Arg::new(field.key())
                .long(field_flag(field))
                .value_name("VALUE")
                .help(help),
        );
    }
    command
}

/// Build the `appstore` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("appstore")
        .version(env!("CARGO_PKG_VERSION"))
        .about("One App Store submission helper")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Settings file (TOML)"),
        )
        .subcommand(generate_command())
        .subcommand(
            Command::new("theme")
                .about("Show or toggle the stored theme")
                .arg(
                    Arg::new("action")
                        .value_parser(["show", "toggle"])
                        .default_value("show")
                        .help("What to do with the theme"),
                ),
        )
        .subcommand(Command::new("stats").about("Fetch repository counters and app count"))
        .subcommand(
            Command::new("next-run")
                .about("Show when the index is rebuilt next")
                .arg(
                    Arg::new("watch")
                        .long("watch")
                        .action(ArgAction::SetTrue)
                        .help("Keep refreshing every minute"),
                ),
        )
        .subcommand(Command::new("links").about("Print fork and store links"))
}
