use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::{self, Settings};

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = settings::settings_path()
        .ok_or_else(|| CliError::config("could not determine the config directory"))?;
    println!("{}", path.display());
    Ok(())
}

/// Show resolved settings and their sources.
pub(crate) fn run_config_show(settings: &Settings) {
    log::info!(
        "{}",
        "Grimoire Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match settings::settings_path() {
        Some(p) if p.exists() => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Settings file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    let db_status = if settings.db_path.exists() { "(exists)" } else { "(not created yet)" };
    log::info!(
        "  database.path:       {} {} {}",
        settings.db_path.display(),
        db_status.if_supports_color(Stdout, |t| t.dimmed()),
        format!("[{}]", settings.db_source).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  import.infer_images: {} {}",
        settings.infer_images,
        format!("[{}]", settings.infer_images_source).if_supports_color(Stdout, |t| t.dimmed()),
    );
}
