//! Per-run counters and the bounded sample of row errors.

use serde::Serialize;

use crate::shape::CsvShape;

/// Row errors kept verbatim for the report; further errors are only counted.
pub const MAX_ERROR_SAMPLES: usize = 5;

/// Counters for one importer run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Rows written successfully.
    pub imported: u64,
    /// Rows skipped because of an error.
    pub errors: u64,
    /// The first [`MAX_ERROR_SAMPLES`] error descriptions.
    pub samples: Vec<String>,
}

impl ImportSummary {
    pub fn record_success(&mut self) {
        self.imported += 1;
    }

    pub fn record_error(&mut self, description: impl Into<String>) {
        self.errors += 1;
        if self.samples.len() < MAX_ERROR_SAMPLES {
            self.samples.push(description.into());
        }
    }

    /// `" (N erreurs d'import)"`, or nothing when every row went through.
    pub fn error_suffix(&self) -> String {
        if self.errors > 0 {
            format!(" ({} erreurs d'import)", self.errors)
        } else {
            String::new()
        }
    }

    /// The sampled errors joined for display, with a trailing ellipsis when
    /// more errors happened than were kept.
    pub fn details(&self) -> Option<String> {
        if self.errors == 0 {
            return None;
        }
        let mut details = format!("Exemples d'erreurs: {}", self.samples.join(" | "));
        if self.errors > MAX_ERROR_SAMPLES as u64 {
            details.push_str(" | ...");
        }
        Some(details)
    }
}

/// Result of a completed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub shape: CsvShape,
    pub summary: ImportSummary,
    /// Distinct subclasses registered by a class file.
    pub subclasses: usize,
    /// Monsters deleted because they were missing from a monster file.
    pub pruned: usize,
}

impl ImportOutcome {
    pub fn new(shape: CsvShape, summary: ImportSummary) -> Self {
        Self {
            shape,
            summary,
            subclasses: 0,
            pruned: 0,
        }
    }

    /// User-facing success message.
    pub fn message(&self) -> String {
        let n = self.summary.imported;
        let suffix = self.summary.error_suffix();
        match self.shape {
            CsvShape::Spells => {
                format!("Base de donnees mise a jour avec succes ! {n} sorts importes{suffix}.")
            }
            CsvShape::Classes => format!(
                "Emplacements de sorts importes avec succes ! {} sous-classes et {n} entrees d'emplacements de sorts importees{suffix}.",
                self.subclasses
            ),
            CsvShape::Monsters => {
                format!("Bestiaire importé avec succès ! {n} monstres traités{suffix}.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_capped() {
        let mut summary = ImportSummary::default();
        for i in 0..8 {
            summary.record_error(format!("row {i}"));
        }
        assert_eq!(summary.errors, 8);
        assert_eq!(summary.samples.len(), MAX_ERROR_SAMPLES);
        assert_eq!(
            summary.details().unwrap(),
            "Exemples d'erreurs: row 0 | row 1 | row 2 | row 3 | row 4 | ..."
        );
    }

    #[test]
    fn no_ellipsis_at_exactly_five() {
        let mut summary = ImportSummary::default();
        for i in 0..5 {
            summary.record_error(format!("e{i}"));
        }
        assert!(!summary.details().unwrap().ends_with("..."));
    }

    #[test]
    fn clean_run_has_no_details() {
        let mut summary = ImportSummary::default();
        summary.record_success();
        assert_eq!(summary.details(), None);
        assert_eq!(summary.error_suffix(), "");
    }

    #[test]
    fn messages_per_shape() {
        let mut summary = ImportSummary::default();
        summary.record_success();
        summary.record_error("x");

        let spells = ImportOutcome::new(CsvShape::Spells, summary.clone());
        assert_eq!(
            spells.message(),
            "Base de donnees mise a jour avec succes ! 1 sorts importes (1 erreurs d'import)."
        );

        let mut classes = ImportOutcome::new(CsvShape::Classes, summary.clone());
        classes.subclasses = 3;
        assert!(classes.message().contains("3 sous-classes et 1 entrees"));

        let monsters = ImportOutcome::new(CsvShape::Monsters, ImportSummary::default());
        assert_eq!(
            monsters.message(),
            "Bestiaire importé avec succès ! 0 monstres traités."
        );
    }
}
