// Excel roster import (xlsx, xlsm, xls, xlsb, ods) and report export (xlsx only)
//
// Import: the chosen sheet is flattened to text cells for the engine.
// Export: one worksheet per report sheet, formatted for people, not round-trips.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use rollbook_roster::report::{CellContent, CellRole, ReportSheet, SheetKind};
use rollbook_roster::{ReportBundle, Table};

use crate::{table_from_rows, IoError};

/// Read one sheet of an Excel workbook. `sheet = None` reads the first sheet.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<Table, IoError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| IoError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| IoError::SheetNotFound {
                name: wanted.to_string(),
                available: sheet_names.clone(),
            })?,
        None => sheet_names.first().cloned().ok_or(IoError::NoSheets)?,
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        message: format!("sheet '{sheet_name}': {e}"),
    })?;

    let (height, width) = range.get_size();
    log::debug!("sheet '{sheet_name}': {height}x{width}");

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    table_from_rows(rows)
}

/// Render a cell as the text the engine sees.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Format nicely: integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Presentation choices for the exported workbook.
#[derive(Debug, Clone)]
pub struct ExportStyle {
    /// Joins the names inside one matrix cell.
    pub name_delimiter: String,
    /// Column width (characters) for the value columns of the 2×2 sheets.
    pub grid_column_width: f64,
    /// Thin borders around the 2×2 grid.
    pub borders: bool,
}

impl Default for ExportStyle {
    fn default() -> Self {
        Self {
            name_delimiter: "\n".to_string(),
            grid_column_width: 30.0,
            borders: true,
        }
    }
}

/// Statistics from an export.
#[derive(Debug, Default, Clone)]
pub struct ExportResult {
    pub sheets_exported: usize,
    pub cells_exported: usize,
    pub merges_exported: usize,
}

struct Formats {
    header: Format,
    axis: Format,
    body: Format,
    grid: Format,
}

impl Formats {
    fn new(style: &ExportStyle) -> Self {
        let mut axis = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let mut grid = Format::new()
            .set_text_wrap()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        if style.borders {
            axis = axis.set_border(FormatBorder::Thin);
            grid = grid.set_border(FormatBorder::Thin);
        }
        Self {
            header: Format::new().set_bold(),
            axis,
            body: Format::new(),
            grid,
        }
    }

    fn for_role(&self, role: CellRole) -> &Format {
        match role {
            CellRole::Header => &self.header,
            CellRole::Axis => &self.axis,
            CellRole::Body => &self.body,
            CellRole::Grid => &self.grid,
        }
    }
}

/// Build the report workbook in memory.
pub fn export_to_buffer(bundle: &ReportBundle, style: &ExportStyle) -> Result<(Vec<u8>, ExportResult), String> {
    let mut workbook = Workbook::new();
    let formats = Formats::new(style);
    let mut result = ExportResult::default();

    for sheet in bundle.sheets() {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet.name)
            .map_err(|e| format!("Failed to create sheet '{}': {}", sheet.name, e))?;

        let (cells, merges) = write_sheet(worksheet, &sheet, &formats, style)
            .map_err(|e| format!("Failed to write sheet '{}': {}", sheet.name, e))?;
        result.cells_exported += cells;
        result.merges_exported += merges;
        result.sheets_exported += 1;
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;
    Ok((buffer, result))
}

/// Write the report workbook to `path`.
pub fn export(bundle: &ReportBundle, path: &Path, style: &ExportStyle) -> Result<ExportResult, IoError> {
    let write_err = |message: String| IoError::Write {
        path: path.to_path_buf(),
        message,
    };
    let (buffer, result) = export_to_buffer(bundle, style).map_err(write_err)?;
    std::fs::write(path, buffer).map_err(|e| write_err(e.to_string()))?;
    log::debug!(
        "wrote {} sheets, {} cells, {} merges to {}",
        result.sheets_exported,
        result.cells_exported,
        result.merges_exported,
        path.display()
    );
    Ok(result)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &ReportSheet,
    formats: &Formats,
    style: &ExportStyle,
) -> Result<(usize, usize), XlsxError> {
    let mut cells = 0;

    // Merged regions carry their origin cell's text; the origin is not
    // written again below.
    for m in &sheet.merges {
        let origin = sheet.cell(m.first_row, m.first_col);
        let (text, format) = match origin {
            Some(cell) => (content_text(&cell.value, style), formats.for_role(cell.role)),
            None => (String::new(), &formats.body),
        };
        worksheet.merge_range(m.first_row, m.first_col, m.last_row, m.last_col, &text, format)?;
    }

    for cell in &sheet.cells {
        let is_merge_origin = sheet
            .merges
            .iter()
            .any(|m| m.first_row == cell.row && m.first_col == cell.col);
        if is_merge_origin {
            continue;
        }

        let format = formats.for_role(cell.role);
        match &cell.value {
            CellContent::Integer(n) => {
                worksheet.write_number_with_format(cell.row, cell.col, *n as f64, format)?;
            }
            other => {
                worksheet.write_string_with_format(cell.row, cell.col, content_text(other, style), format)?;
            }
        }
        cells += 1;
    }

    match sheet.kind {
        SheetKind::Table => {
            worksheet.autofit();
        }
        SheetKind::Grid => {
            worksheet.set_column_width(0, 14)?;
            worksheet.set_column_width(1, style.grid_column_width)?;
            worksheet.set_column_width(2, style.grid_column_width)?;
        }
    }

    Ok((cells, sheet.merges.len()))
}

fn content_text(value: &CellContent, style: &ExportStyle) -> String {
    match value {
        CellContent::Text(s) => s.clone(),
        CellContent::Integer(n) => n.to_string(),
        CellContent::Names(names) => join_names(names, &style.name_delimiter),
    }
}

/// Excel's per-cell character limit.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Join names for one grid cell. Lists that would overflow the cell are cut
/// at the last whole name and end with "… (+N more)".
fn join_names(names: &[String], delimiter: &str) -> String {
    let joined = names.join(delimiter);
    if joined.chars().count() <= MAX_CELL_CHARS {
        return joined;
    }

    let delimiter_len = delimiter.chars().count();
    // Room for the widest possible suffix, whatever ends up omitted.
    let budget = MAX_CELL_CHARS - delimiter_len - more_suffix(names.len()).chars().count();

    let mut text = String::new();
    let mut used = 0;
    let mut kept = 0;
    for name in names {
        let cost = name.chars().count() + if kept == 0 { 0 } else { delimiter_len };
        if used + cost > budget {
            break;
        }
        if kept > 0 {
            text.push_str(delimiter);
        }
        text.push_str(name);
        used += cost;
        kept += 1;
    }

    let omitted = names.len() - kept;
    log::warn!(
        "{} names exceed Excel's {MAX_CELL_CHARS}-character cell limit; writing {kept} and noting {omitted} more",
        names.len()
    );
    if kept > 0 {
        text.push_str(delimiter);
    }
    text.push_str(&more_suffix(omitted));
    text
}

fn more_suffix(omitted: usize) -> String {
    format!("… (+{omitted} more)")
}
