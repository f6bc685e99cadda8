// CSV import

use std::fs;
use std::io;
use std::path::Path;

use csvsh_engine::{LoadError, Table, TableLoader};

/// Field delimiter used when reading a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Byte(u8),
    /// Guess from the first lines of the file
    Auto,
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Byte(b',')
    }
}

impl Delimiter {
    /// Parse a command-line value: a single ASCII character, `tab`, or `auto`.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "auto" => Ok(Delimiter::Auto),
            "tab" | "\\t" => Ok(Delimiter::Byte(b'\t')),
            v if v.len() == 1 && v.is_ascii() => Ok(Delimiter::Byte(v.as_bytes()[0])),
            v => Err(format!("invalid delimiter {:?}: expected one ASCII character, 'tab' or 'auto'", v)),
        }
    }
}

/// Loads tables from CSV files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader {
    pub delimiter: Delimiter,
}

impl CsvLoader {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }
}

impl TableLoader for CsvLoader {
    fn load(&self, path: &str) -> Result<Table, LoadError> {
        load(Path::new(path), self.delimiter)
    }
}

/// Read a CSV file into a table. The first record is the header.
pub fn load(path: &Path, delimiter: Delimiter) -> Result<Table, LoadError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = delimiter.byte_for(&content);
    let table = parse(&content, delimiter)?;
    if table.header().is_empty() {
        return Err(LoadError::Empty(path.display().to_string()));
    }
    log::debug!(
        "read {} with delimiter {:?}: {} rows",
        path.display(),
        delimiter as char,
        table.row_count()
    );
    Ok(table)
}

// Candidates tried by `Delimiter::sniff`, in tie-break order.
const SNIFF_CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];
const SNIFF_LINES: usize = 10;

impl Delimiter {
    /// Guess the delimiter from the first lines of `content`.
    ///
    /// A candidate scores the number of sampled lines that split into as many
    /// fields as the first line, times that field count. Candidates that
    /// leave the first line whole never win; with no winner the result is
    /// a comma.
    pub fn sniff(content: &str) -> Delimiter {
        let sample: Vec<&str> = content.lines().take(SNIFF_LINES).collect();
        let mut best: Option<(u8, usize)> = None;
        for byte in SNIFF_CANDIDATES {
            let Some(score) = sniff_score(&sample, byte) else {
                continue;
            };
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((byte, score));
            }
        }
        best.map_or_else(Delimiter::default, |(byte, _)| Delimiter::Byte(byte))
    }

    /// The byte to split `content` on.
    pub fn byte_for(self, content: &str) -> u8 {
        match self {
            Delimiter::Byte(b) => b,
            Delimiter::Auto => match Delimiter::sniff(content) {
                Delimiter::Byte(b) => b,
                Delimiter::Auto => b',',
            },
        }
    }
}

fn sniff_score(sample: &[&str], byte: u8) -> Option<usize> {
    let widths: Vec<usize> = sample.iter().map(|line| field_count(line, byte)).collect();
    let first = *widths.first()?;
    if first < 2 {
        return None;
    }
    Some(widths.iter().filter(|&&w| w == first).count() * first)
}

// Quote-aware, so delimiters inside quoted values are not counted.
fn field_count(line: &str, byte: u8) -> usize {
    ::csv::ReaderBuilder::new()
        .delimiter(byte)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok)
        .map_or(1, |record| record.len())
}

/// Read a file as text. Bytes that are not valid UTF-8 are decoded as
/// Windows-1252, which also covers Latin-1 exports.
pub fn read_file_as_utf8(path: &Path) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
        _ => LoadError::Io(e.to_string()),
    })?;
    Ok(String::from_utf8(bytes).unwrap_or_else(|e| {
        log::debug!("{} is not UTF-8, decoding as Windows-1252", path.display());
        let (text, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
        text.into_owned()
    }))
}

/// Parse CSV text. Header cells are trimmed; rows are kept as read,
/// including ragged ones.
pub fn parse(content: &str, delimiter: u8) -> Result<Table, LoadError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let header: Vec<String> = match records.next() {
        Some(record) => {
            let record = record.map_err(|e| LoadError::Parse(e.to_string()))?;
            record.iter().map(|h| h.trim().to_string()).collect()
        }
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| LoadError::Parse(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::from_parts(header, rows))
}
