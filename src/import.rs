//! Vocabulary import from CSV and Excel files

use std::collections::HashMap;
use std::io;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, Trim};

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::ImportError;

/// Load a catalog from a file, picking the parser by extension
pub fn parse_file(path: impl AsRef<Path>) -> Result<Catalog, ImportError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xls" => parse_excel(path),
        "csv" => parse_csv(path),
        _ => Err(ImportError::UnsupportedFormat(extension)),
    }
}

/// Column index mapping
#[derive(Debug, Clone, Copy)]
struct ColumnMapping {
    id: Option<usize>,
    source: usize,
    target: usize,
    category: usize,
    difficulty: Option<usize>,
}

/// Detect column indices from header names
fn detect_columns(headers: &[String]) -> Result<ColumnMapping, ImportError> {
    let mut id = None;
    let mut source = None;
    let mut target = None;
    let mut category = None;
    let mut difficulty = None;

    for (i, header) in headers.iter().enumerate() {
        match header.trim().to_lowercase().as_str() {
            "id" => id = Some(i),
            "source" | "source text" | "spanish" | "word" => source = Some(i),
            "target" | "target text" | "english" | "meaning" | "translation" => target = Some(i),
            "category" | "topic" => category = Some(i),
            "difficulty" => difficulty = Some(i),
            _ => {}
        }
    }

    Ok(ColumnMapping {
        id,
        source: source.ok_or(ImportError::MissingColumn("source"))?,
        target: target.ok_or(ImportError::MissingColumn("target"))?,
        category: category.ok_or(ImportError::MissingColumn("category"))?,
        difficulty,
    })
}

/// Lowercase ASCII slug: "Daily Verbs" -> "daily-verbs"
fn slugify(category: &str) -> String {
    let mut slug = String::with_capacity(category.len());
    for c in category.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Turns row cells into entries, numbering missing ids per category
struct EntryBuilder {
    mapping: ColumnMapping,
    counters: HashMap<String, usize>,
    entries: Vec<CatalogEntry>,
}

impl EntryBuilder {
    fn new(mapping: ColumnMapping) -> Self {
        Self {
            mapping,
            counters: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn push_row(&mut self, cell: impl Fn(usize) -> String) {
        let source = cell(self.mapping.source);
        let target = cell(self.mapping.target);
        if source.is_empty() || target.is_empty() {
            return;
        }

        let category = cell(self.mapping.category);
        let n = self.counters.entry(category.clone()).or_insert(0);
        *n += 1;

        let id = self
            .mapping
            .id
            .map(&cell)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("{}-{}", slugify(&category), n));
        let difficulty = self.mapping.difficulty.map(&cell).filter(|d| !d.is_empty());

        self.entries.push(CatalogEntry {
            id,
            source_text: source,
            target_text: target,
            category,
            difficulty,
        });
    }

    fn finish(self) -> Result<Catalog, ImportError> {
        log::info!("Imported {} vocabulary entries", self.entries.len());
        Ok(Catalog::from_entries(self.entries)?)
    }
}

/// Parse a CSV vocabulary file
pub fn parse_csv(path: impl AsRef<Path>) -> Result<Catalog, ImportError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    parse_csv_reader(file)
}

/// Parse CSV vocabulary from any reader
pub fn parse_csv_reader<R: io::Read>(input: R) -> Result<Catalog, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ImportError::NoHeader);
    }
    let mut builder = EntryBuilder::new(detect_columns(&headers)?);

    for result in reader.records() {
        let record = result?;
        builder.push_row(|i| record.get(i).unwrap_or("").to_string());
    }

    builder.finish()
}

/// Parse the first sheet of an Excel workbook (`.xlsx` or legacy `.xls`)
pub fn parse_excel(path: impl AsRef<Path>) -> Result<Catalog, ImportError> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoSheets)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or(ImportError::NoHeader)?;
    let headers: Vec<String> = header_row.iter().map(cell_string).collect();
    let mut builder = EntryBuilder::new(detect_columns(&headers)?);

    for row in rows {
        builder.push_row(|i| row.get(i).map(cell_string).unwrap_or_default());
    }

    builder.finish()
}

fn cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_csv_with_ids() {
        let csv = "id,spanish,english,category\n\
                   food-1,La manzana,Apple,Food\n\
                   food-2, El pan ,Bread,Food\n";
        let catalog = parse_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let bread = catalog.get("food-2").unwrap();
        assert_eq!(bread.source_text, "El pan");
        assert_eq!(bread.target_text, "Bread");
    }

    #[test]
    fn generates_ids_per_category() {
        let csv = "Source,Target,Category,Difficulty\n\
                   Rojo,Red,Basic Colors,easy\n\
                   Perro,Dog,Animals,\n\
                   Azul,Blue,Basic Colors,\n";
        let catalog = parse_csv_reader(csv.as_bytes()).unwrap();

        let ids: Vec<&str> = catalog.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["basic-colors-1", "animals-1", "basic-colors-2"]);
        assert_eq!(catalog.get("basic-colors-1").unwrap().difficulty.as_deref(), Some("easy"));
        assert_eq!(catalog.get("animals-1").unwrap().difficulty, None);
    }

    #[test]
    fn skips_rows_without_text() {
        let csv = "spanish,english,category\n\
                   Leer,To read,Verbs\n\
                   ,To write,Verbs\n\
                   Hablar\n";
        let catalog = parse_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "spanish,english\nLeer,To read\n";
        let err = parse_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn("category")));
    }

    #[test]
    fn duplicate_ids_fail_validation() {
        let csv = "id,spanish,english,category\n\
                   x-1,Uno,One,Numbers\n\
                   x-1,Dos,Two,Numbers\n";
        let err = parse_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::Catalog(_)));
    }

    #[test]
    fn dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.CSV");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "spanish,english,category").unwrap();
        writeln!(file, "Gracias,Thank you,Phrases").unwrap();
        drop(file);

        let catalog = parse_file(&path).unwrap();
        assert_eq!(catalog.list()[0].id, "phrases-1");

        let err = parse_file(dir.path().join("vocab.txt")).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn legacy_xls_goes_to_excel_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.xls");
        std::fs::write(&path, b"not a workbook").unwrap();

        let err = parse_file(&path).unwrap_err();
        assert!(matches!(err, ImportError::Excel(_)));
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Daily  Verbs!"), "daily-verbs");
        assert_eq!(slugify("Food"), "food");
    }
}
