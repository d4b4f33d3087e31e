use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::analysis_store::AnalysisRow;
use crate::report::{COLUMN_HEADERS, display_row};

pub struct ExportReport {
    pub rows: usize,
}

/// Writes the player's analysis rows to a one-sheet workbook.
pub fn export_player_analysis(
    path: &Path,
    player_name: &str,
    rows: &[AnalysisRow],
) -> Result<ExportReport> {
    let mut table = vec![COLUMN_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>()];
    table.extend(rows.iter().map(display_row));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(player_name))?;
        write_rows(sheet, &table)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport { rows: rows.len() })
}

/// Excel sheet names: at most 31 chars, none of `[]:*?/\`.
fn sheet_name(player_name: &str) -> String {
    let cleaned: String = player_name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        "Analysis".to_string()
    } else {
        cleaned
    }
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
