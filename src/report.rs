use crate::analysis_store::AnalysisRow;

pub const COLUMN_HEADERS: [&str; 13] = [
    "Player",
    "Match ID",
    "Date & Time",
    "Duration",
    "Champion",
    "Mode",
    "Minions @10",
    "KP%",
    "1st Tower",
    "Assists",
    "Crabs",
    "Abilities",
    "Damage",
];

/// `m:ss`.
pub fn format_duration(seconds: i64) -> String {
    if seconds <= 0 {
        return "0:00".to_string();
    }
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `s:mmm`, e.g. 708801 ms -> `708:801`.
pub fn format_first_structure(ms: Option<i64>) -> String {
    match ms {
        Some(ms) if ms > 0 => format!("{}:{:03}", ms / 1000, ms % 1000),
        _ => "N/A".to_string(),
    }
}

pub fn format_kill_participation(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn display_row(row: &AnalysisRow) -> Vec<String> {
    vec![
        row.player_name.clone(),
        row.match_id.clone(),
        row.game_datetime.clone(),
        format_duration(row.game_duration),
        row.champion.clone(),
        row.game_mode.clone(),
        row.minions_at_10.to_string(),
        format_kill_participation(row.kill_participation),
        format_first_structure(row.first_structure_ms),
        row.assists.to_string(),
        row.scuttle_crabs.to_string(),
        row.ability_uses.to_string(),
        row.damage_to_champions.to_string(),
    ]
}

/// Right-aligned plain-text table with a header line.
pub fn render_table(rows: &[AnalysisRow]) -> String {
    if rows.is_empty() {
        return "No analysis rows.".to_string();
    }
    let cells: Vec<Vec<String>> = rows.iter().map(display_row).collect();
    let mut widths: Vec<usize> = COLUMN_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, COLUMN_HEADERS.iter().copied(), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
