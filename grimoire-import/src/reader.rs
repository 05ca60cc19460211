//! CSV decoding: delimiter sniffing and header-keyed rows.

use std::fmt;
use std::sync::Arc;

use crate::error::ImportError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Field separator of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Pipe,
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    pub const ALL: [Delimiter; 4] = [
        Delimiter::Pipe,
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
    ];

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Pipe => b'|',
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
        }
    }

    /// Pick the candidate occurring most often in `first_line`.
    ///
    /// Only a strict winner counts: ties and lines with none of the
    /// candidates fall back to comma.
    ///
    /// ```
    /// use grimoire_import::Delimiter;
    ///
    /// assert_eq!(Delimiter::sniff("Nom;Niveau;Ecole"), Delimiter::Semicolon);
    /// assert_eq!(Delimiter::sniff("a|b,c"), Delimiter::Comma);
    /// assert_eq!(Delimiter::sniff("Nom"), Delimiter::Comma);
    /// ```
    pub fn sniff(first_line: &str) -> Delimiter {
        let counts = Self::ALL.map(|d| {
            let byte = d.as_byte();
            (d, first_line.bytes().filter(|b| *b == byte).count())
        });
        let best = counts.iter().map(|(_, n)| *n).max().unwrap_or(0);
        if best == 0 {
            return Delimiter::Comma;
        }

        let mut winners = counts.iter().filter(|(_, n)| *n == best);
        match (winners.next(), winners.next()) {
            (Some((d, _)), None) => *d,
            _ => Delimiter::Comma,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Pipe => "pipe",
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
        };
        f.write_str(name)
    }
}

/// Strip a leading UTF-8 byte-order mark.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// First line of the file, BOM removed, without its line terminator.
pub fn first_line(data: &[u8]) -> String {
    let data = strip_bom(data);
    let end = data.iter().position(|b| *b == b'\n').unwrap_or(data.len());
    let line = String::from_utf8_lossy(&data[..end]);
    line.trim_end_matches('\r').to_string()
}

/// One data row, addressed by header name.
#[derive(Debug, Clone)]
pub struct CsvRow {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl CsvRow {
    /// Value of the named field, or `""` when the header or the cell is missing.
    pub fn get(&self, field: &str) -> &str {
        self.headers
            .iter()
            .position(|h| h == field)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Whether the file declares this header.
    pub fn has_field(&self, field: &str) -> bool {
        self.headers.iter().any(|h| h == field)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// Parse a whole file into rows.
///
/// The first record is the header. Rows may be shorter or longer than the
/// header; rows with only empty cells are dropped. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn parse_rows(data: &[u8], delimiter: Delimiter) -> Result<Vec<CsvRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(strip_bom(data));

    let headers: Arc<[String]> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        rows.push(CsvRow {
            headers: Arc::clone(&headers),
            values: record
                .iter()
                .map(|f| String::from_utf8_lossy(f).into_owned())
                .collect(),
        });
    }

    log::debug!(
        "Parsed {} rows with {} columns ({} separated)",
        rows.len(),
        headers.len(),
        delimiter
    );
    Ok(rows)
}
