//! grimoire CLI
//!
//! Command-line interface for importing and browsing a spell and monster catalog.

mod cli_types;
mod commands;
mod error;
mod progress;
mod settings;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Install the logger. `RUST_LOG` takes precedence over the flags.
///
/// Log lines go to stdout, except when stdout carries machine-readable output.
fn init_logger(quiet: bool, verbose: bool, machine_output: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    let target = if machine_output {
        env_logger::Target::Stderr
    } else {
        env_logger::Target::Stdout
    };
    builder.filter_level(level).target(target);

    if verbose {
        builder.format_timestamp_millis().format_target(false);
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        });
    }

    builder.parse_default_env().init();
}

fn main() {
    let cli = Cli::parse();
    let json_output = matches!(cli.command, Commands::Import { json: true, .. });
    init_logger(cli.quiet, cli.verbose, json_output);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let infer_images_flag = matches!(
        cli.command,
        Commands::Import {
            infer_images: true,
            ..
        }
    );
    let settings = settings::resolve(cli.db, infer_images_flag)?;
    let db_path = settings.db_path.as_path();

    match cli.command {
        Commands::Import { file, json, .. } => {
            commands::import::run_import(&settings, &file, json, cli.quiet)
        }
        Commands::Spells {
            classes,
            levels,
            search,
        } => commands::spells::run_spells(db_path, classes, levels, search),
        Commands::Spell { id } => commands::spells::run_spell(db_path, id),
        Commands::Monsters { types, search } => {
            commands::monsters::run_monsters(db_path, types, search)
        }
        Commands::Monster { id } => commands::monsters::run_monster(db_path, id),
        Commands::Classes => commands::classes::run_classes(db_path),
        Commands::Slots {
            class,
            subclass,
            level,
        } => commands::classes::run_slots(db_path, &class, &subclass, level),
        Commands::Favorite {
            user_id,
            monster_id,
        } => commands::toggle::run_favorite(db_path, user_id, monster_id),
        Commands::Prepare {
            character_id,
            spell_id,
        } => commands::toggle::run_prepare(db_path, character_id, spell_id),
        Commands::Stats => commands::stats::run_stats(db_path),
        Commands::Reset { confirm } => commands::reset::run_reset(db_path, confirm),
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Show => {
                commands::config::run_config_show(&settings);
                Ok(())
            }
        },
    }
}
