//! TUI module - Terminal dashboard with ratatui
//!
//! Features:
//! - Logged set history table
//! - Live plate breakdown for an adjustable target weight
//! - Rest countdown gauge

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};
use std::time::Duration;

use crate::db::{Database, WorkoutSet};
use crate::plates::{Loadout, Rack};
use crate::timer::{format_mm_ss, RestTimer};
use crate::units::{Unit, Weight};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const DEFAULT_REST_SECS: u64 = 90;

/// Widest plate bar in the breakdown pane, in characters
const PLATE_BAR_WIDTH: usize = 24;

fn starting_target(unit: Unit) -> Weight {
    // One big plate per side on the standard bar
    match unit {
        Unit::Lbs => Weight::from_hundredths(13500),
        Unit::Kg => Weight::from_hundredths(6000),
    }
}

/// App state for TUI
pub struct App {
    db: Database,
    sets: Vec<WorkoutSet>,
    unit: Unit,
    target: Weight,
    timer: Option<RestTimer>,
    should_quit: bool,
}

impl App {
    pub fn new(db: Database, unit: Unit) -> Result<Self> {
        let sets = db.get_sets()?;
        Ok(Self {
            db,
            sets,
            unit,
            target: starting_target(unit),
            timer: None,
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn raise_target(&mut self) {
        self.target += self.unit.increment();
    }

    fn lower_target(&mut self) {
        let floor = self.unit.bar_weight();
        let lowered = self.target.saturating_sub(self.unit.increment());
        self.target = if lowered < floor { floor } else { lowered };
    }

    fn toggle_unit(&mut self) {
        self.unit = match self.unit {
            Unit::Lbs => Unit::Kg,
            Unit::Kg => Unit::Lbs,
        };
        self.target = starting_target(self.unit);
    }

    fn toggle_timer(&mut self) {
        self.timer = match self.timer {
            None => Some(RestTimer::start(Duration::from_secs(DEFAULT_REST_SECS))),
            Some(_) => None,
        };
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new("barload - Barbell Companion")
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // Body: set history on the left, plate breakdown on the right
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        self.render_sets(frame, body[0]);
        self.render_plates(frame, body[1]);
        self.render_footer(frame, chunks[2]);
    }

    fn render_sets(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .sets
            .iter()
            .map(|s| {
                Row::new(vec![
                    Cell::from(s.date.format("%Y-%m-%d").to_string()),
                    Cell::from(s.exercise.clone()),
                    Cell::from(format!("{} {}", s.weight, s.unit)),
                    Cell::from(format!("{}x{}", s.sets, s.reps)),
                    Cell::from(plates_summary(s)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(14),
                Constraint::Length(11),
                Constraint::Length(6),
                Constraint::Min(14),
            ],
        )
        .header(
            Row::new(vec!["Date", "Exercise", "Weight", "SxR", "Plates/side"])
                .style(Style::default().bold()),
        )
        .block(Block::default().borders(Borders::ALL).title("Sets"));

        frame.render_widget(table, area);
    }

    fn render_plates(&self, frame: &mut Frame, area: Rect) {
        let loadout = Rack::standard(self.unit).load(self.target);

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(format!("target  {} {}", self.target, self.unit)));
        lines.push(Line::from(""));
        if loadout.is_bar_only() {
            lines.push(Line::from("empty bar"));
        } else {
            for line in plate_bars(&loadout) {
                lines.push(line);
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(format!("loaded  {} {}", loadout.total(), self.unit)));
        if !loadout.leftover().is_zero() {
            lines.push(Line::styled(
                format!("short   {} per side", loadout.leftover()),
                Style::default().fg(Color::Yellow),
            ));
        }

        let pane = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Per side"));
        frame.render_widget(pane, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        if let Some(timer) = &self.timer {
            let label = if timer.is_done() {
                "rest over".to_string()
            } else {
                format!("rest {}", format_mm_ss(timer.remaining()))
            };
            let color = if timer.is_done() { Color::Green } else { Color::Blue };
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL))
                .gauge_style(Style::default().fg(color))
                .ratio(timer.progress())
                .label(label);
            frame.render_widget(gauge, area);
        } else {
            let footer =
                Paragraph::new("q: quit | r: refresh | up/down: target | u: unit | t: rest timer")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(Block::default().borders(Borders::ALL));
            frame.render_widget(footer, area);
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('r') => {
                            self.sets = self.db.get_sets()?;
                        }
                        KeyCode::Up => self.raise_target(),
                        KeyCode::Down => self.lower_target(),
                        KeyCode::Char('u') => self.toggle_unit(),
                        KeyCode::Char('t') => self.toggle_timer(),
                        _ => {}
                    }
                }
        Ok(())
    }
}

/// Per-side plates of a logged set against the standard rack, as "2x45 1x25"
fn plates_summary(set: &WorkoutSet) -> String {
    let loadout = Rack::standard(set.unit).load(set.weight);
    if loadout.is_bar_only() {
        return "bar".to_string();
    }
    let groups: Vec<String> = loadout
        .grouped()
        .iter()
        .map(|(size, count)| format!("{count}x{size}"))
        .collect();
    groups.join(" ")
}

/// One bar per plate, width proportional to the heaviest plate loaded
fn plate_bars(loadout: &Loadout) -> Vec<Line<'static>> {
    let heaviest = match loadout.per_side().first() {
        Some(w) => w.hundredths(),
        None => return Vec::new(),
    };
    loadout
        .per_side()
        .iter()
        .map(|plate| {
            let width = (plate.hundredths() as usize * PLATE_BAR_WIDTH) / heaviest as usize;
            let bar = "#".repeat(width.max(1));
            Line::from(vec![
                Span::styled(bar, Style::default().fg(Color::Cyan)),
                Span::raw(format!(" {plate}")),
            ])
        })
        .collect()
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
