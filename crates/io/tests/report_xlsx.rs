// Integration tests: roster in, report workbook out, read back with calamine.

use std::path::Path;

use calamine::{open_workbook, open_workbook_auto, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

use rollbook_io::xlsx::{export, export_to_buffer, ExportStyle, MAX_CELL_CHARS};
use rollbook_io::{read_table, IoError, ReadOptions};
use rollbook_roster::{run, Table};

fn sample_bundle() -> rollbook_roster::ReportBundle {
    let mut table = Table::new(["Name", "Attendance", "Discipline"]);
    table.push_row(["A", "1", "1"]);
    table.push_row(["B", "0", "0"]);
    table.push_row(["C", "1", "1"]);
    run(&table).unwrap()
}

fn read_sheet(path: &Path, name: &str) -> calamine::Range<Data> {
    let mut wb = open_workbook_auto(path).unwrap();
    wb.worksheet_range(name).unwrap()
}

fn text(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(n)) => n.to_string(),
        Some(Data::Int(n)) => n.to_string(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// -------------------------------------------------------------------------
// Export
// -------------------------------------------------------------------------

#[test]
fn export_writes_four_named_sheets() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    let result = export(&sample_bundle(), &path, &ExportStyle::default()).unwrap();
    assert_eq!(result.sheets_exported, 4);
    assert_eq!(result.merges_exported, 4);

    let wb = open_workbook_auto(&path).unwrap();
    assert_eq!(
        wb.sheet_names(),
        vec!["Employee Details", "Classification Matrix", "Count Matrix", "Summary"]
    );
}

#[test]
fn matrix_sheet_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    export(&sample_bundle(), &path, &ExportStyle::default()).unwrap();

    let m = read_sheet(&path, "Classification Matrix");
    assert_eq!(text(&m, 0, 0), "Discipline");
    assert_eq!(text(&m, 0, 1), "Attendance");
    assert_eq!(text(&m, 1, 1), "0");
    assert_eq!(text(&m, 1, 2), "1");
    assert_eq!(text(&m, 2, 0), "1");
    assert_eq!(text(&m, 3, 0), "0");
    assert_eq!(text(&m, 2, 2), "A\nC");
    assert_eq!(text(&m, 3, 1), "B");
    assert_eq!(text(&m, 2, 1), "");

    let c = read_sheet(&path, "Count Matrix");
    assert_eq!(text(&c, 2, 2), "2");
    assert_eq!(text(&c, 3, 1), "1");
    assert_eq!(text(&c, 3, 2), "0");
}

#[test]
fn grid_sheets_merge_axis_headers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    export(&sample_bundle(), &path, &ExportStyle::default()).unwrap();

    let mut wb: Xlsx<_> = open_workbook(&path).unwrap();
    for sheet in ["Classification Matrix", "Count Matrix"] {
        let mut merges: Vec<((u32, u32), (u32, u32))> = wb
            .worksheet_merge_cells(sheet)
            .unwrap()
            .unwrap()
            .iter()
            .map(|d| (d.start, d.end))
            .collect();
        merges.sort();
        // A1:A2 and B1:C1
        assert_eq!(merges, vec![((0, 0), (1, 0)), ((0, 1), (0, 2))], "{sheet}");
    }
}

#[test]
fn crowded_quadrant_still_exports() {
    let mut table = Table::new(["Name", "Attendance", "Discipline"]);
    for i in 0..3000 {
        table.push_row([format!("Employee {i:04}"), "1".into(), "1".into()]);
    }
    let bundle = run(&table).unwrap();
    export_to_buffer(&bundle, &ExportStyle::default()).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    export(&bundle, &path, &ExportStyle::default()).unwrap();

    let m = read_sheet(&path, "Classification Matrix");
    let names = text(&m, 2, 2);
    assert!(names.chars().count() <= MAX_CELL_CHARS);
    assert!(names.starts_with("Employee 0000\nEmployee 0001\n"));
    assert!(names.ends_with(" more)"), "{}", &names[names.len() - 40..]);

    // Counts are unaffected by the cut.
    let c = read_sheet(&path, "Count Matrix");
    assert_eq!(text(&c, 2, 2), "3000");
}

#[test]
fn details_and_summary_sheets() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    export(&sample_bundle(), &path, &ExportStyle::default()).unwrap();

    let d = read_sheet(&path, "Employee Details");
    assert_eq!(text(&d, 0, 3), "classification");
    assert_eq!(text(&d, 2, 0), "B");
    assert_eq!(text(&d, 2, 3), "Low Attendance, Poor Discipline");

    let s = read_sheet(&path, "Summary");
    assert_eq!(text(&s, 0, 0), "Category");
    assert_eq!(text(&s, 1, 0), "Total");
    assert_eq!(text(&s, 1, 1), "3");
    assert_eq!(text(&s, 6, 0), "Both Good (1,1)");
    assert_eq!(text(&s, 6, 1), "2");
}

#[test]
fn custom_name_delimiter() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    let style = ExportStyle {
        name_delimiter: ", ".into(),
        ..ExportStyle::default()
    };
    export(&sample_bundle(), &path, &style).unwrap();
    let m = read_sheet(&path, "Classification Matrix");
    assert_eq!(text(&m, 2, 2), "A, C");
}

#[test]
fn json_export_round_trips_summary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.json");
    rollbook_io::json::export(&sample_bundle(), &path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["summary"]["both_poor"], 1);
}

// -------------------------------------------------------------------------
// Import
// -------------------------------------------------------------------------

fn write_roster_xlsx(path: &Path) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Staff").unwrap();
    ws.write_string(0, 0, " Name").unwrap();
    ws.write_string(0, 1, "ATTENDANCE").unwrap();
    ws.write_string(0, 2, "Discipline ").unwrap();
    ws.write_string(1, 0, "Ada").unwrap();
    ws.write_number(1, 1, 1.0).unwrap();
    ws.write_number(1, 2, 0.0).unwrap();
    ws.write_string(2, 0, "Bo").unwrap();
    ws.write_number(2, 1, 0.0).unwrap();
    ws.write_number(2, 2, 1.0).unwrap();
    let other = wb.add_worksheet();
    other.set_name("Notes").unwrap();
    other.write_string(0, 0, "ignore me").unwrap();
    wb.save(path).unwrap();
}

#[test]
fn xlsx_roster_numbers_read_as_integers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.xlsx");
    write_roster_xlsx(&path);

    let table = read_table(&path, &ReadOptions::default()).unwrap();
    assert_eq!(table.columns, vec![" Name", "ATTENDANCE", "Discipline "]);
    assert_eq!(table.rows[0], vec!["Ada", "1", "0"]);

    let bundle = run(&table).unwrap();
    assert_eq!(bundle.summary.total, 2);
    assert_eq!(bundle.summary.good_attendance, 1);
}

#[test]
fn xlsx_named_sheet_selection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.xlsx");
    write_roster_xlsx(&path);

    let options = ReadOptions {
        sheet: Some("Notes".into()),
        ..ReadOptions::default()
    };
    let table = read_table(&path, &options).unwrap();
    assert_eq!(table.columns, vec!["ignore me"]);

    let options = ReadOptions {
        sheet: Some("Missing".into()),
        ..ReadOptions::default()
    };
    match read_table(&path, &options).unwrap_err() {
        IoError::SheetNotFound { name, available } => {
            assert_eq!(name, "Missing");
            assert_eq!(available, vec!["Staff", "Notes"]);
        }
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn tsv_extension_defaults_to_tab() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.tsv");
    std::fs::write(&path, "name\tattendance\tdiscipline\nAda, Jr.\t1\t1\n").unwrap();
    let table = read_table(&path, &ReadOptions::default()).unwrap();
    assert_eq!(table.cell(0, 0), "Ada, Jr.");
}
