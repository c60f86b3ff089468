//! One-shot spreadsheet import
//!
//! Reads the three source workbooks and turns them into insert rows for
//! the store's replace methods. Each workbook has its own quirks, kept
//! faithful to the source files:
//!
//! - the directory sheet has its header on the second row,
//! - the plan and exam sheets have theirs on the third,
//! - the exam sheet's header cells are partially blank, so its four
//!   columns are taken by position instead of by name.

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

use crate::models::{NewDirectoryEntry, NewEnrollmentPlanEntry, NewExamSubjectsEntry};

const DIRECTORY_HEADER_ROW: usize = 1;
const PLAN_HEADER_ROW: usize = 2;
const EXAM_HEADER_ROW: usize = 2;

/// Read the professional directory workbook.
pub fn read_directory(path: &Path) -> Result<Vec<NewDirectoryEntry>> {
    let range = first_sheet(path)?;
    let columns = HeaderColumns::locate(
        &range,
        DIRECTORY_HEADER_ROW,
        &["专科专业", "本科专业类", "本科专业", "招考类别"],
    )?;

    let mut rows = Vec::new();
    for row in data_rows(&range, DIRECTORY_HEADER_ROW) {
        let vocational_major = cell_str(row, columns.index(0));
        if vocational_major.is_empty() {
            continue;
        }
        rows.push(NewDirectoryEntry {
            vocational_major,
            undergrad_major_group: cell_str(row, columns.index(1)),
            undergrad_major: cell_str(row, columns.index(2)),
            admission_category: cell_str(row, columns.index(3)),
        });
    }

    log::info!("Read {} directory rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read the enrollment plan workbook.
pub fn read_plans(path: &Path) -> Result<Vec<NewEnrollmentPlanEntry>> {
    let range = first_sheet(path)?;
    let columns = HeaderColumns::locate(
        &range,
        PLAN_HEADER_ROW,
        &["院校名称", "专业名称", "普通计划数", "专项计划数"],
    )?;

    let mut rows = Vec::new();
    for row in data_rows(&range, PLAN_HEADER_ROW) {
        let school_name = cell_str(row, columns.index(0));
        if school_name.is_empty() {
            continue;
        }
        rows.push(NewEnrollmentPlanEntry {
            school_name,
            major_name: cell_str(row, columns.index(1)),
            general_quota: cell_int(row, columns.index(2)),
            targeted_quota: cell_int(row, columns.index(3)),
        });
    }

    log::info!("Read {} plan rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read the exam subjects workbook (positional columns).
pub fn read_exam_subjects(path: &Path) -> Result<Vec<NewExamSubjectsEntry>> {
    let range = first_sheet(path)?;

    let mut rows = Vec::new();
    for row in data_rows(&range, EXAM_HEADER_ROW) {
        let admission_category = cell_str(row, 0);
        if admission_category.is_empty() {
            continue;
        }
        rows.push(NewExamSubjectsEntry {
            admission_category,
            undergrad_enrollment_group: cell_str(row, 1),
            public_subjects: cell_str(row, 2),
            major_subjects: cell_str(row, 3),
        });
    }

    log::info!(
        "Read {} exam subject rows from {}",
        rows.len(),
        path.display()
    );
    Ok(rows)
}

fn first_sheet(path: &Path) -> Result<Range<Data>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Workbook contains no sheets: {}", path.display()))?;

    workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{sheet_name}'"))
}

/// Column positions of the wanted headers, in the order requested.
struct HeaderColumns {
    indices: Vec<usize>,
}

impl HeaderColumns {
    fn locate(range: &Range<Data>, header_row: usize, wanted: &[&str]) -> Result<Self> {
        let header: Vec<String> = range
            .rows()
            .nth(header_row)
            .ok_or_else(|| anyhow!("Sheet has no header row at index {header_row}"))?
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut indices = Vec::with_capacity(wanted.len());
        for name in wanted {
            let index = header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow!("Missing column '{name}' in header {header:?}"))?;
            indices.push(index);
        }

        Ok(Self { indices })
    }

    fn index(&self, nth: usize) -> usize {
        self.indices[nth]
    }
}

fn data_rows(range: &Range<Data>, header_row: usize) -> impl Iterator<Item = &[Data]> {
    range.rows().skip(header_row + 1)
}

fn cell_str(row: &[Data], index: usize) -> String {
    match row.get(index) {
        Some(Data::Empty) | None => String::new(),
        Some(cell) => cell.to_string().trim().to_string(),
    }
}

/// Quota cells are usually numeric but sometimes text or blank; anything
/// that does not parse cleanly becomes 0, as the original import did.
fn cell_int(row: &[Data], index: usize) -> i64 {
    match row.get(index) {
        Some(Data::Int(v)) => *v,
        Some(Data::Float(v)) => *v as i64,
        Some(Data::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_int_coercion() {
        let row = vec![
            Data::Int(30),
            Data::Float(5.0),
            Data::String("12".to_string()),
            Data::String("n/a".to_string()),
            Data::Empty,
        ];
        assert_eq!(cell_int(&row, 0), 30);
        assert_eq!(cell_int(&row, 1), 5);
        assert_eq!(cell_int(&row, 2), 12);
        assert_eq!(cell_int(&row, 3), 0);
        assert_eq!(cell_int(&row, 4), 0);
        assert_eq!(cell_int(&row, 9), 0);
    }

    #[test]
    fn test_cell_str_trims_and_defaults() {
        let row = vec![Data::String("  园林 ".to_string()), Data::Empty];
        assert_eq!(cell_str(&row, 0), "园林");
        assert_eq!(cell_str(&row, 1), "");
        assert_eq!(cell_str(&row, 5), "");
    }
}
