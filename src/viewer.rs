use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use lol_match_stats::analysis_store::AnalysisRow;
use lol_match_stats::report::{COLUMN_HEADERS, display_row};

const POLL: Duration = Duration::from_millis(250);

struct Viewer {
    title: String,
    rows: Vec<Vec<String>>,
    selected: usize,
    should_quit: bool,
}

impl Viewer {
    fn new(player_name: &str, rows: &[AnalysisRow]) -> Self {
        Self {
            title: format!("Match analysis | {player_name} | {} rows", rows.len()),
            rows: rows.iter().map(display_row).collect(),
            selected: 0,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.rows.len().saturating_sub(1);
            }
            _ => {}
        }
    }

    fn column_widths(&self) -> Vec<Constraint> {
        COLUMN_HEADERS
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(header.chars().count());
                Constraint::Length(u16::try_from(widest + 2).unwrap_or(u16::MAX))
            })
            .collect()
    }
}

/// Shows `rows` in a scrollable full-screen table until the user quits.
pub fn show(player_name: &str, rows: &[AnalysisRow]) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut viewer = Viewer::new(player_name, rows);
    let res = run_viewer(&mut terminal, &mut viewer);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run_viewer<B: Backend>(terminal: &mut Terminal<B>, viewer: &mut Viewer) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, viewer))?;

        if event::poll(POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            viewer.on_key(key);
        }

        if viewer.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, viewer: &Viewer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(viewer.title.as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let widths = viewer.column_widths();
    render_row(
        frame,
        chunks[1],
        &widths,
        COLUMN_HEADERS.iter().copied(),
        Style::default().add_modifier(Modifier::BOLD),
    );

    let list_area = chunks[2];
    if viewer.rows.is_empty() {
        let empty = Paragraph::new("No analysis rows for this player")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
    } else {
        let visible = list_area.height as usize;
        let (start, end) = visible_range(viewer.selected, viewer.rows.len(), visible);
        for (i, idx) in (start..end).enumerate() {
            let row_area = Rect {
                x: list_area.x,
                y: list_area.y + i as u16,
                width: list_area.width,
                height: 1,
            };
            let style = if idx == viewer.selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            render_row(
                frame,
                row_area,
                &widths,
                viewer.rows[idx].iter().map(String::as_str),
                style,
            );
        }
    }

    let footer = Paragraph::new("j/k/↑/↓ Move | g/G Top/Bottom | q/Esc Quit")
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);
}

fn render_row<'a>(
    frame: &mut Frame,
    area: Rect,
    widths: &[Constraint],
    cells: impl Iterator<Item = &'a str>,
    style: Style,
) {
    frame.render_widget(Block::default().style(style), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    for (col, text) in cols.iter().zip(cells) {
        frame.render_widget(Paragraph::new(text).style(style), *col);
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}
