use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use grimoire_import::{ImportOptions, UploadResponse};

use crate::CliError;
use crate::progress::BarProgress;
use crate::settings::Settings;

use super::open_db;

/// Import one CSV export, printing a summary or the JSON result object.
pub(crate) fn run_import(
    settings: &Settings,
    file: &Path,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let data = std::fs::read(file)
        .map_err(|e| CliError::other(format!("Failed to read {}: {}", file.display(), e)))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let conn = open_db(&settings.db_path)?;
    let options = ImportOptions {
        infer_images: settings.infer_images,
    };

    log::debug!(
        "Importing {} into {} (infer_images={})",
        file.display(),
        settings.db_path.display(),
        options.infer_images,
    );

    let response = {
        let progress = BarProgress::new(quiet || json);
        grimoire_import::import_upload(&conn, &file_name, &data, &options, Some(&progress))
    };

    if json {
        let out = serde_json::to_string_pretty(&response)
            .map_err(|e| CliError::other(format!("Failed to encode result: {}", e)))?;
        println!("{}", out);
    } else {
        print_response(&response);
    }

    if response.is_success() {
        Ok(())
    } else {
        Err(CliError::import(response.headline()))
    }
}

fn print_response(response: &UploadResponse) {
    match response {
        UploadResponse::Success { message, details, .. } => {
            log::info!("{}", message.if_supports_color(Stdout, |t| t.green()));
            if let Some(details) = details {
                log::warn!("{}", details);
            }
        }
        UploadResponse::Failure { details, .. } => {
            if let Some(details) = details {
                log::warn!("{}", details);
            }
        }
    }
}
