//! Ratatui-based terminal UI.
//!
//! Five tabs, one per loan operation. Each tab owns its form values and the
//! outcome of its last submission; submitting blocks the loop for the single
//! HTTP call and then redraws.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};
use tracing::debug;

use crate::bridge::{self, Level, Outcome};
use crate::data::{HttpLoanApi, LoanApi};
use crate::domain::{BorrowerQuery, LoanIdQuery, NewLoan, parse_amount};
use crate::error::AppError;

mod form;

use form::Form;

const LABEL_WIDTH: usize = 18;
const SCROLL_STEP: u16 = 5;

/// Start the TUI against the given API.
pub fn run(api: &HttpLoanApi) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(api.base_url().as_str());
    app.event_loop(&mut terminal, api)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    AddLoan,
    ByBorrower,
    ById,
    AllLoans,
    DeleteLoan,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::AddLoan,
        Tab::ByBorrower,
        Tab::ById,
        Tab::AllLoans,
        Tab::DeleteLoan,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::AddLoan => "Add Loan",
            Tab::ByBorrower => "Get by Borrower",
            Tab::ById => "Get by ID",
            Tab::AllLoans => "Get All Loans",
            Tab::DeleteLoan => "Delete Loan",
        }
    }

    fn labels(self) -> &'static [&'static str] {
        match self {
            Tab::AddLoan => &["Loan ID", "Borrower Name", "Repayment Amount", "Funding Amount"],
            Tab::ByBorrower => &["Borrower Name"],
            Tab::ById | Tab::DeleteLoan => &["Loan ID"],
            Tab::AllLoans => &[],
        }
    }

    fn submit_hint(self) -> &'static str {
        match self {
            Tab::AddLoan => "Enter: add loan",
            Tab::ByBorrower => "Enter: get loans",
            Tab::ById => "Enter: get loan",
            Tab::AllLoans => "Enter: get all loans",
            Tab::DeleteLoan => "Enter: delete loan",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

struct TabState {
    form: Form,
    outcome: Option<Outcome>,
    scroll: u16,
}

impl TabState {
    /// Text shown in the response pane.
    fn payload_text(&self) -> String {
        self.outcome
            .as_ref()
            .and_then(Outcome::payload)
            .map(|value| crate::report::pretty_json(&value))
            .unwrap_or_default()
    }

    /// Furthest scroll offset that still leaves the last payload line visible.
    fn max_scroll(&self) -> u16 {
        let lines = self.payload_text().lines().count();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }
}

pub struct App {
    tabs: Vec<TabState>,
    current: Tab,
    api_url: String,
}

impl App {
    pub fn new(api_url: &str) -> Self {
        Self {
            tabs: Tab::ALL
                .iter()
                .map(|tab| TabState {
                    form: Form::new(tab.labels()),
                    outcome: None,
                    scroll: 0,
                })
                .collect(),
            current: Tab::AddLoan,
            api_url: api_url.to_string(),
        }
    }

    pub fn current_tab(&self) -> Tab {
        self.current
    }

    pub fn outcome(&self, tab: Tab) -> Option<&Outcome> {
        self.tabs[tab.index()].outcome.as_ref()
    }

    fn state(&self) -> &TabState {
        &self.tabs[self.current.index()]
    }

    fn state_mut(&mut self) -> &mut TabState {
        &mut self.tabs[self.current.index()]
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        api: &dyn LoanApi,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key, api) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the UI should exit.
    pub fn handle_key(&mut self, key: KeyEvent, api: &dyn LoanApi) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'));
        }

        match key.code {
            KeyCode::Tab => self.current = self.current.next(),
            KeyCode::BackTab => self.current = self.current.prev(),
            KeyCode::Up => self.state_mut().form.focus_prev(),
            KeyCode::Down => self.state_mut().form.focus_next(),
            KeyCode::Enter => self.submit(api),
            KeyCode::Esc => {
                let state = self.state_mut();
                state.outcome = None;
                state.scroll = 0;
            }
            KeyCode::PageDown => {
                let state = self.state_mut();
                state.scroll = state.scroll.saturating_add(SCROLL_STEP).min(state.max_scroll());
            }
            KeyCode::PageUp => {
                let state = self.state_mut();
                state.scroll = state.scroll.saturating_sub(SCROLL_STEP);
            }
            KeyCode::Backspace => self.state_mut().form.pop_char(),
            KeyCode::Char(c) => {
                if self.state().form.is_empty() {
                    return c == 'q';
                }
                self.state_mut().form.push_char(c);
            }
            _ => {}
        }
        false
    }

    /// Build the request input from the current tab's fields and run it.
    fn submit(&mut self, api: &dyn LoanApi) {
        let tab = self.current;
        debug!(tab = tab.title(), "submitting form");

        let form = &self.state().form;
        let outcome = match tab {
            Tab::AddLoan => {
                let amounts = parse_amount("Repayment Amount", form.value(2))
                    .and_then(|repayment| {
                        parse_amount("Funding Amount", form.value(3)).map(|funding| (repayment, funding))
                    });
                match amounts {
                    Ok((repayment_amount, funding_amount)) => bridge::create(
                        api,
                        &NewLoan {
                            loan_id: form.value(0).to_string(),
                            borrower_name: form.value(1).to_string(),
                            repayment_amount,
                            funding_amount,
                        },
                    ),
                    Err(err) => Outcome::Invalid {
                        message: err.message,
                    },
                }
            }
            Tab::ByBorrower => bridge::find_by_borrower(
                api,
                &BorrowerQuery {
                    borrower_name: form.value(0).to_string(),
                },
            ),
            Tab::ById => bridge::find_by_id(
                api,
                &LoanIdQuery {
                    loan_id: form.value(0).to_string(),
                },
            ),
            Tab::AllLoans => bridge::list_all(api),
            Tab::DeleteLoan => bridge::delete_by_id(
                api,
                &LoanIdQuery {
                    loan_id: form.value(0).to_string(),
                },
            ),
        };

        let state = self.state_mut();
        state.outcome = Some(outcome);
        state.scroll = 0;
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let form_height = self.state().form.fields().len().max(1) as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(form_height),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_tabs(frame, chunks[1]);
        self.draw_form(frame, chunks[2]);
        self.draw_banner(frame, chunks[3]);
        self.draw_payload(frame, chunks[4]);
        self.draw_footer(frame, chunks[5]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Loan Management System",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("api: {}", self.api_url),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles = Tab::ALL
            .iter()
            .map(|t| Span::styled(t.title(), Style::default().fg(Color::White)))
            .collect::<Vec<_>>();
        let tabs = Tabs::new(titles)
            .select(self.current.index())
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .divider("|")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(tabs, area);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let form = &self.state().form;
        let block = Block::default()
            .title(self.current.title())
            .borders(Borders::ALL);

        if form.is_empty() {
            let p = Paragraph::new("Press Enter to fetch every loan.")
                .style(Style::default().fg(Color::Gray))
                .block(block);
            frame.render_widget(p, area);
            return;
        }

        let lines = form
            .fields()
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let focused = i == form.focus();
                let marker = if focused { "» " } else { "  " };
                let label_style = if focused {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(vec![
                    Span::styled(format!("{marker}{:<LABEL_WIDTH$}: ", field.label), label_style),
                    Span::raw(field.value.clone()),
                ])
            })
            .collect::<Vec<_>>();

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);

        let focused = form.focus();
        if let Some(position) = cursor_position(area, focused, form.value(focused).chars().count()) {
            frame.set_cursor_position(position);
        }
    }

    fn draw_banner(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (text, style) = match &self.state().outcome {
            Some(outcome) => (outcome.banner(), level_style(outcome.level())),
            None => ("Ready.".to_string(), Style::default().fg(Color::Gray)),
        };
        let p = Paragraph::new(text)
            .style(style)
            .block(Block::default().title("Status").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_payload(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let state = self.state();
        let p = Paragraph::new(state.payload_text())
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0))
            .block(Block::default().title("Response").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let quit = if self.state().form.is_empty() { "q/Ctrl-C quit" } else { "Ctrl-C quit" };
        let help = format!(
            "Tab/Shift-Tab switch  ↑/↓ field  {}  Esc clear  PgUp/PgDn scroll  {quit}",
            self.current.submit_hint()
        );
        let p = Paragraph::new(Line::from(Span::styled(help, Style::default().fg(Color::Gray))))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Cell just after the typed text of the focused field, or `None` when that
/// falls on or outside the form border.
fn cursor_position(area: Rect, focused: usize, typed_chars: usize) -> Option<(u16, u16)> {
    let to_u16 = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(to_u16(2 + LABEL_WIDTH + 2))
        .saturating_add(to_u16(typed_chars));
    let y = area.y.saturating_add(1).saturating_add(to_u16(focused));

    let right = area.x.saturating_add(area.width.saturating_sub(1));
    let bottom = area.y.saturating_add(area.height.saturating_sub(1));
    (x < right && y < bottom).then_some((x, y))
}

fn level_style(level: Level) -> Style {
    let color = match level {
        Level::Success => Color::Green,
        Level::Info => Color::Blue,
        Level::Warning => Color::Yellow,
        Level::Error => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
