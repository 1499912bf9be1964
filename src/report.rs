//! Tabular report writer.
//!
//! Record fields are passed through untyped; the column set is the union
//! of every field observed across all items, in first-seen order. Missing
//! fields become empty cells.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;
use serde_json::{Map, Value};

/// Day-abbreviated-month-year, e.g. `29Aug2026`. Date-only on purpose:
/// a rerun on the same day replaces that day's report.
fn report_filename(date: NaiveDate) -> String {
    format!("sarvam_attempts_report_{}.xlsx", date.format("%d%b%Y"))
}

/// Union of item fields, preserving the order each field was first seen.
fn union_columns(items: &[Map<String, Value>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for item in items {
        for key in item.keys() {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Write one spreadsheet for this run and return its path.
///
/// Callers must skip the writer entirely when `items` is empty; an all-
/// header spreadsheet would be misleading next to the "no data" notice.
pub fn write_report(items: &[Map<String, Value>], output_dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let filename = report_filename(chrono::Local::now().date_naive());
    let output_file = output_dir.join(&filename);

    let columns = union_columns(items);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name.as_str())?;
    }

    for (row, item) in items.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, name) in columns.iter().enumerate() {
            let col = col as u16;
            match item.get(name) {
                None | Some(Value::Null) => {}
                Some(Value::String(s)) => {
                    worksheet.write_string(row, col, s.as_str())?;
                }
                Some(Value::Number(n)) => {
                    match n.as_f64() {
                        Some(f) => worksheet.write_number(row, col, f)?,
                        // u64 values beyond f64 precision keep their digits as text
                        None => worksheet.write_string(row, col, n.to_string())?,
                    };
                }
                Some(Value::Bool(b)) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                Some(nested) => {
                    worksheet.write_string(row, col, nested.to_string())?;
                }
            }
        }
    }

    workbook
        .save(&output_file)
        .with_context(|| format!("Failed to save report to {}", output_file.display()))?;

    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = PathBuf::from("/tmp/claude/report_tests").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_report_filename_format() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(report_filename(date), "sarvam_attempts_report_29Aug2026.xlsx");
    }

    #[test]
    fn test_report_filename_single_digit_day_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(report_filename(date), "sarvam_attempts_report_05Jan2025.xlsx");
    }

    #[test]
    fn test_union_columns_heterogeneous() {
        let items = vec![
            obj(json!({"a": 1, "b": 2})),
            obj(json!({"b": 3, "c": 4})),
            obj(json!({"d": 5})),
        ];
        assert_eq!(union_columns(&items), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_union_columns_empty() {
        assert!(union_columns(&[]).is_empty());
    }

    #[test]
    fn test_write_report_creates_file_and_parents() {
        let dir = test_dir("creates_file").join("nested");
        let items = vec![
            obj(json!({"id": "a-1", "duration": 12.5, "ok": true})),
            obj(json!({"id": "a-2", "note": null, "meta": {"k": "v"}})),
        ];
        let path = write_report(&items, &dir).unwrap();

        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("sarvam_attempts_report_"));
        assert!(path.extension().unwrap() == "xlsx");
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_written_cells_match_source_values() {
        let dir = test_dir("cell_values");
        let items = vec![
            obj(json!({"a": "x", "b": 1.5})),
            obj(json!({"a": null, "b": true, "c": {"k": "v"}})),
        ];
        let path = write_report(&items, &dir).unwrap();

        use calamine::{open_workbook, Data, Reader, Xlsx};
        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        let cell = |row: u32, col: u32| range.get_value((row, col));
        let empty = |row: u32, col: u32| matches!(cell(row, col), None | Some(Data::Empty));

        // Header row is the field union in first-seen order
        assert_eq!(cell(0, 0), Some(&Data::String("a".to_string())));
        assert_eq!(cell(0, 1), Some(&Data::String("b".to_string())));
        assert_eq!(cell(0, 2), Some(&Data::String("c".to_string())));

        assert_eq!(cell(1, 0), Some(&Data::String("x".to_string())));
        assert_eq!(cell(1, 1), Some(&Data::Float(1.5)));
        assert!(empty(1, 2), "field absent from item stays empty");

        assert!(empty(2, 0), "null field stays empty");
        assert_eq!(cell(2, 1), Some(&Data::Bool(true)));
        assert_eq!(cell(2, 2), Some(&Data::String(r#"{"k":"v"}"#.to_string())));
    }

    #[test]
    fn test_write_report_large_run() {
        let dir = test_dir("large_run");
        let items: Vec<Map<String, Value>> = (0..2500)
            .map(|i| obj(json!({"id": format!("attempt-{i}"), "offset_page": i / 1000})))
            .collect();
        let path = write_report(&items, &dir).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_write_report_same_day_overwrites() {
        let dir = test_dir("overwrite");
        let items = vec![obj(json!({"id": "x"}))];
        let first = write_report(&items, &dir).unwrap();
        let second = write_report(&items, &dir).unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
    }
}
