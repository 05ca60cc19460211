//! Detection of which of the three file layouts an upload uses.

use std::fmt;

use serde::Serialize;

use crate::reader::CsvRow;

/// Layout of an uploaded CSV file, told apart by header names only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvShape {
    Spells,
    Classes,
    Monsters,
}

impl CsvShape {
    /// Classify by the fields of the first row. Anything unrecognised is a
    /// spell file.
    pub fn detect(first_row: &CsvRow) -> CsvShape {
        let has_all = |fields: &[&str]| fields.iter().all(|f| first_row.has_field(f));

        if has_all(&["name", "type", "details_json", "sections_json"]) {
            CsvShape::Monsters
        } else if has_all(&["Classe", "Sous_Classe"]) {
            CsvShape::Classes
        } else {
            CsvShape::Spells
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CsvShape::Spells => "spells",
            CsvShape::Classes => "classes",
            CsvShape::Monsters => "monsters",
        }
    }
}

impl fmt::Display for CsvShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
