// src/export.rs
//
// Spreadsheet layout: one header row, then one row per MergedRow. Every field is
// written twice, English column first, Arabic column second:
//
//   Id (EN), Id (AR), Category (EN), Category (AR), Name (EN), Name (AR), ...
//
// A side is absent when its Name cell is empty.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    config::options::ExportFormat,
    csv::{self, BOM},
    error::ExportError,
    file::ensure_directory,
    menu::{non_empty, Language, MenuItem},
    merge::MergedRow,
};

const FIELDS: [&str; 6] = ["Id", "Category", "Name", "Description", "Price", "Image URL"];
const SIDES: [Language; 2] = [Language::English, Language::Arabic];
const NAME_FIELD: usize = 2;

pub fn headers() -> Vec<String> {
    FIELDS
        .iter()
        .flat_map(|f| SIDES.iter().map(move |l| format!("{f} {}", l.column_suffix())))
        .collect()
}

fn fields_of(item: Option<&MenuItem>) -> [&str; 6] {
    match item {
        None => [""; 6],
        Some(i) => [
            i.id.as_deref().unwrap_or(""),
            &i.category,
            &i.name,
            i.description.as_deref().unwrap_or(""),
            i.price.as_deref().unwrap_or(""),
            i.image_url.as_deref().unwrap_or(""),
        ],
    }
}

pub fn to_cells(row: &MergedRow) -> Vec<&str> {
    let en = fields_of(row.english.as_ref());
    let ar = fields_of(row.arabic.as_ref());
    en.iter().zip(ar.iter()).flat_map(|(e, a)| [*e, *a]).collect()
}

/// Write `rows` to `path` (parent directories are created). Delimiter follows `format`.
pub fn write_spreadsheet(rows: &[MergedRow], path: &Path, format: ExportFormat) -> Result<(), ExportError> {
    let io_err = |e| ExportError::io(path, e);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent).map_err(io_err)?;
        }
    }

    let sep = format.delim();
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    write!(out, "{BOM}").map_err(io_err)?;
    csv::write_row(&mut out, &headers(), sep).map_err(io_err)?;
    for row in rows {
        csv::write_row(&mut out, &to_cells(row), sep).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;

    logf!("Export: wrote {} rows → {}", rows.len(), path.display());
    Ok(())
}

/// Inverse of [`write_spreadsheet`]. Delimiter is taken from the file extension.
pub fn read_spreadsheet(path: &Path) -> Result<Vec<MergedRow>, ExportError> {
    let text = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    let mut rows = csv::parse_rows(&text, ExportFormat::from_path(path).delim());

    if rows.first().is_some_and(|r| *r == headers()) {
        rows.remove(0);
    }
    Ok(rows.iter().map(|cells| from_cells(cells)).collect())
}

/// Inverse of [`to_cells`]. A side with an empty name cell is `None`.
pub fn from_cells(cells: &[String]) -> MergedRow {
    let side = |offset: usize| -> Option<MenuItem> {
        let cell = |field: usize| cells.get(field * 2 + offset).map(String::as_str).unwrap_or("");
        let name = non_empty(cell(NAME_FIELD))?;
        Some(MenuItem {
            id: non_empty(cell(0)),
            category: s!(cell(1)),
            name,
            description: non_empty(cell(3)),
            price: non_empty(cell(4)),
            image_url: non_empty(cell(5)),
        })
    };
    MergedRow { english: side(0), arabic: side(1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_side_by_side() {
        let h = headers();
        assert_eq!(h.len(), 12);
        assert_eq!(&h[..4], &["Id (EN)", "Id (AR)", "Category (EN)", "Category (AR)"]);
        assert_eq!(h[11], "Image URL (AR)");
    }

    #[test]
    fn cells_interleave_and_blank_missing_side() {
        let row = MergedRow {
            english: Some(MenuItem { price: Some(s!("9")), ..MenuItem::new("Drinks", "Tea") }),
            arabic: None,
        };
        let cells = to_cells(&row);
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[2], "Drinks");
        assert_eq!(cells[3], "");
        assert_eq!(cells[4], "Tea");
        assert_eq!(cells[8], "9");
    }
}
