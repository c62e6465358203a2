use std::time::{Duration, SystemTime};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use log::{error, warn};
use ratatui::layout::Constraint;
use ratatui::style::Style;
use ratatui::text::Line as TextLine;
use ratatui::widgets::*;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::PanelValues;
use crate::error::Result;
use crate::records::{ConfigStore, StoreWatcher, NONE_CHOICE};
use crate::ui::layout::{centered_rect, split_vertical};
use crate::ui::styles::{focus_style, secondary_line, selection_style, ACCENT};
use crate::ui::TerminalGuard;
use crate::utils::{format_file_modified, RecordEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Name,
    Selector,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Choice {
    name: String,
    modified: Option<SystemTime>,
}

/// Editable state behind the settings panel.
#[derive(Debug, Clone)]
pub struct PanelState {
    name: String,
    choices: Vec<Choice>,
    selected: usize,
    focus: PanelFocus,
}

impl PanelState {
    pub fn new(entries: Vec<RecordEntry>) -> Self {
        let mut state = Self {
            name: String::new(),
            choices: Vec::new(),
            selected: 0,
            focus: PanelFocus::Name,
        };
        state.set_entries(entries);
        state
    }

    /// Replace the selector contents, keeping the current selection when it still exists.
    pub fn set_entries(&mut self, entries: Vec<RecordEntry>) {
        let current = self.selected_name().to_string();

        self.choices = std::iter::once(Choice {
            name: NONE_CHOICE.to_string(),
            modified: None,
        })
        .chain(
            entries
                .into_iter()
                .filter(|entry| entry.name != NONE_CHOICE)
                .map(|entry| Choice {
                    name: entry.name,
                    modified: Some(entry.modified),
                }),
        )
        .collect();

        self.selected = self
            .choices
            .iter()
            .position(|choice| choice.name == current)
            .unwrap_or(0);
    }

    pub fn choice_names(&self) -> Vec<&str> {
        self.choices.iter().map(|choice| choice.name.as_str()).collect()
    }

    pub fn selected_name(&self) -> &str {
        self.choices
            .get(self.selected)
            .map(|choice| choice.name.as_str())
            .unwrap_or(NONE_CHOICE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn focus(&self) -> PanelFocus {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Name => PanelFocus::Selector,
            PanelFocus::Selector => PanelFocus::Name,
        };
    }

    pub fn push_char(&mut self, ch: char) {
        self.name.push(ch);
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }

    pub fn select_next(&mut self) {
        if !self.choices.is_empty() {
            self.selected = (self.selected + 1) % self.choices.len();
        }
    }

    pub fn select_prev(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.choices.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn values(&self) -> PanelValues {
        PanelValues {
            config_name: self.name.clone(),
            selected_config: Some(self.selected_name().to_string()),
        }
    }
}

enum PanelEvent {
    Continue,
    Refresh,
    Submit,
    Cancel,
}

fn handle_key(state: &mut PanelState, key: KeyEvent) -> PanelEvent {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return PanelEvent::Cancel;
    }

    match (key.code, state.focus()) {
        (KeyCode::Esc, _) => PanelEvent::Cancel,
        (KeyCode::Enter, _) => PanelEvent::Submit,
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
            state.toggle_focus();
            PanelEvent::Continue
        }
        (KeyCode::F(5), _) | (KeyCode::Char('r'), PanelFocus::Selector) => PanelEvent::Refresh,
        (KeyCode::Backspace, PanelFocus::Name) => {
            state.backspace();
            PanelEvent::Continue
        }
        (KeyCode::Char(ch), PanelFocus::Name) => {
            state.push_char(ch);
            PanelEvent::Continue
        }
        (KeyCode::Up, PanelFocus::Selector) | (KeyCode::Char('k'), PanelFocus::Selector) => {
            state.select_prev();
            PanelEvent::Continue
        }
        (KeyCode::Down, PanelFocus::Selector) | (KeyCode::Char('j'), PanelFocus::Selector) => {
            state.select_next();
            PanelEvent::Continue
        }
        _ => PanelEvent::Continue,
    }
}

fn refresh(state: &mut PanelState, store: &ConfigStore) {
    match store.entries() {
        Ok(entries) => state.set_entries(entries),
        Err(err) => error!("Failed to refresh saved configurations: {err}"),
    }
}

fn render(f: &mut Frame, state: &PanelState, title: &str) {
    let area = centered_rect(80, 80, f.size());
    f.render_widget(Clear, area);

    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = split_vertical(
        inner,
        &[
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ],
    );

    let name_focused = state.focus() == PanelFocus::Name;
    let mut display = state.name().to_string();
    if name_focused {
        display.push('_');
    }
    let input = Paragraph::new(display)
        .style(Style::default().fg(ACCENT))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(name_focused))
                .title("Configuration Name"),
        );
    f.render_widget(input, chunks[0]);

    let label_width = state
        .choices
        .iter()
        .map(|choice| UnicodeWidthStr::width(choice.name.as_str()))
        .max()
        .unwrap_or(0);
    let items: Vec<ListItem> = state
        .choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let pad = label_width.saturating_sub(UnicodeWidthStr::width(choice.name.as_str()));
            let modified = choice
                .modified
                .map(format_file_modified)
                .unwrap_or_default();
            let text = format!("{}{}  {}", choice.name, " ".repeat(pad), modified);
            let item = ListItem::new(TextLine::from(text));
            if i == state.selected {
                item.style(selection_style())
            } else {
                item
            }
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(!name_focused))
            .title("Load Saved Configuration"),
    );
    f.render_widget(list, chunks[1]);

    let hints = Paragraph::new(secondary_line(
        "Tab switch • ↑/↓ choose • F5/r update list • Enter run • Esc cancel",
    ));
    f.render_widget(hints, chunks[2]);
}

/// Show the settings panel and return the submitted values, or `None` when cancelled.
pub fn run_settings_panel(
    store: &ConfigStore,
    title: &str,
    watch_store: bool,
) -> Result<Option<PanelValues>> {
    let mut state = PanelState::new(Vec::new());
    refresh(&mut state, store);

    let watcher = if watch_store {
        match StoreWatcher::start(store.dir()) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                warn!("Store watching disabled: {err}");
                None
            }
        }
    } else {
        None
    };

    let mut guard = TerminalGuard::new()?;
    loop {
        guard.draw(|f| render(f, &state, title))?;

        if watcher.as_ref().is_some_and(StoreWatcher::poll_changed) {
            refresh(&mut state, store);
        }

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match handle_key(&mut state, key) {
            PanelEvent::Continue => {}
            PanelEvent::Refresh => refresh(&mut state, store),
            PanelEvent::Submit => {
                guard.restore()?;
                return Ok(Some(state.values()));
            }
            PanelEvent::Cancel => {
                guard.restore()?;
                return Ok(None);
            }
        }
    }
}
