// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use steplog_app::{
    AppCommand, AppMode, AppState, EntryForm, RowEditor, RowMode, SubmittedFields, Workout,
    WorkoutField, WorkoutId,
};

const APP_TITLE: &str = "steplog";
const TABLE_TITLE: &str = "тренировки";
const ACTIONS_LABEL: &str = "Действия";
const SUBMIT_LABEL: &str = "Ок";
const ACTION_HINT_DISPLAY: &str = "Edit · Remove";
const ACTION_HINT_EDITING: &str = "Save · Cancel";
const FIELD_CURSOR: &str = "▏";

/// The workout log the view renders against. The shell owns the store and
/// hands it in through this seam; operations never fail because the store
/// degrades every unmatched case to a no-op.
pub trait WorkoutLog {
    fn snapshot(&self) -> Vec<Workout>;
    fn create(&mut self, fields: &SubmittedFields);
    fn update(&mut self, workout: &Workout);
    fn remove(&mut self, id: WorkoutId);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq)]
struct ViewData {
    form: EntryForm,
    form_field_index: usize,
    rows: Vec<Workout>,
    selected_row: usize,
    editors: BTreeMap<WorkoutId, RowEditor>,
    edit_field: WorkoutField,
    help_visible: bool,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            form: EntryForm::new(),
            form_field_index: 0,
            rows: Vec::new(),
            selected_row: 0,
            editors: BTreeMap::new(),
            edit_field: WorkoutField::Date,
            help_visible: false,
            status_token: 0,
        }
    }
}

pub fn run_app<L: WorkoutLog>(state: &mut AppState, log: &mut L) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    refresh_rows(log, &mut view_data);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, log, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Reloads the row snapshot, drops editors whose record disappeared, and
/// clamps the selection.
fn refresh_rows<L: WorkoutLog>(log: &L, view_data: &mut ViewData) {
    view_data.rows = log.snapshot();
    let live: BTreeSet<WorkoutId> = view_data.rows.iter().map(|record| record.id).collect();
    view_data.editors.retain(|id, _| live.contains(id));
    if view_data.selected_row >= view_data.rows.len() {
        view_data.selected_row = view_data.rows.len().saturating_sub(1);
    }
}

fn handle_key_event<L: WorkoutLog>(
    state: &mut AppState,
    log: &mut L,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match state.mode {
        AppMode::Form => handle_form_key(state, log, view_data, internal_tx, key),
        AppMode::Nav => handle_nav_key(state, log, view_data, internal_tx, key),
        AppMode::RowEdit => handle_row_edit_key(state, log, view_data, internal_tx, key),
    }

    false
}

fn handle_form_key<L: WorkoutLog>(
    state: &mut AppState,
    log: &mut L,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            state.dispatch(AppCommand::ExitToNav);
        }
        (KeyCode::Enter, _) => {
            submit_entry_form(state, log, view_data, internal_tx);
        }
        (KeyCode::Tab, KeyModifiers::NONE) => {
            view_data.form_field_index =
                (view_data.form_field_index + 1) % view_data.form.field_count();
        }
        (KeyCode::BackTab, _) => {
            let count = view_data.form.field_count();
            view_data.form_field_index = (view_data.form_field_index + count - 1) % count;
        }
        (KeyCode::Backspace, _) => {
            view_data.form.backspace(view_data.form_field_index);
        }
        (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            view_data.form.input(view_data.form_field_index, ch);
        }
        _ => {}
    }
}

fn submit_entry_form<L: WorkoutLog>(
    state: &mut AppState,
    log: &mut L,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(fields) = view_data.form.submit() else {
        emit_status(state, view_data, internal_tx, "nothing to submit");
        return;
    };

    let date = fields.value(WorkoutField::Date.as_str()).to_owned();
    let count_before = view_data.rows.len();
    log.create(&fields);
    refresh_rows(log, view_data);
    // The form clears on both the merge and the append path.
    view_data.form.reset();
    view_data.form_field_index = 0;

    let status = if view_data.rows.len() == count_before {
        format!("merged into {date}")
    } else {
        "entry added".to_owned()
    };
    emit_status(state, view_data, internal_tx, status);
}

fn handle_nav_key<L: WorkoutLog>(
    state: &mut AppState,
    log: &mut L,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Up | KeyCode::Char('k'), _) => move_selection(view_data, -1),
        (KeyCode::Down | KeyCode::Char('j'), _) => move_selection(view_data, 1),
        (KeyCode::Char('a') | KeyCode::Char('i'), KeyModifiers::NONE) => {
            state.dispatch(AppCommand::FocusForm);
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            begin_row_edit(state, view_data, internal_tx);
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => {
            remove_selected(state, log, view_data, internal_tx);
        }
        (KeyCode::Char('?'), KeyModifiers::NONE) => {
            view_data.help_visible = true;
        }
        _ => {}
    }
}

fn move_selection(view_data: &mut ViewData, delta: isize) {
    if view_data.rows.is_empty() {
        view_data.selected_row = 0;
        return;
    }
    let last = view_data.rows.len() as isize - 1;
    let next = (view_data.selected_row as isize + delta).clamp(0, last);
    view_data.selected_row = next as usize;
}

fn begin_row_edit(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(record) = view_data.rows.get(view_data.selected_row).cloned() else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };

    let editor = view_data
        .editors
        .entry(record.id)
        .or_insert_with(|| RowEditor::new(&record));
    editor.begin_edit(&record);
    view_data.edit_field = WorkoutField::Date;
    state.dispatch(AppCommand::EnterRowEdit);
}

fn remove_selected<L: WorkoutLog>(
    state: &mut AppState,
    log: &mut L,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(record) = view_data.rows.get(view_data.selected_row) else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };

    log.remove(record.id);
    refresh_rows(log, view_data);
    emit_status(state, view_data, internal_tx, "row removed");
}

fn handle_row_edit_key<L: WorkoutLog>(
    state: &mut AppState,
    log: &mut L,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(record_id) = view_data
        .rows
        .get(view_data.selected_row)
        .map(|record| record.id)
    else {
        state.dispatch(AppCommand::ExitToNav);
        return;
    };
    let field = view_data.edit_field;

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            if let Some(editor) = view_data.editors.get_mut(&record_id) {
                editor.cancel();
            }
            state.dispatch(AppCommand::ExitToNav);
            emit_status(state, view_data, internal_tx, "edit canceled");
        }
        (KeyCode::Enter, _) => {
            let saved = view_data
                .editors
                .get_mut(&record_id)
                .and_then(RowEditor::save);
            state.dispatch(AppCommand::ExitToNav);
            if let Some(workout) = saved {
                log.update(&workout);
                refresh_rows(log, view_data);
                emit_status(state, view_data, internal_tx, "row saved");
            }
        }
        (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::BackTab, _) => {
            view_data.edit_field = match view_data.edit_field {
                WorkoutField::Date => WorkoutField::Distance,
                WorkoutField::Distance => WorkoutField::Date,
            };
        }
        (KeyCode::Backspace, _) => {
            if let Some(editor) = view_data.editors.get_mut(&record_id) {
                editor.backspace(field);
            }
        }
        (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            if let Some(editor) = view_data.editors.get_mut(&record_id) {
                editor.input(field, ch);
            }
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let form = Paragraph::new(render_entry_form_text(state, view_data))
        .block(Block::default().title(APP_TITLE).borders(Borders::ALL));
    frame.render_widget(form, layout[0]);

    render_table(frame, layout[1], state, view_data);

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if view_data.help_visible {
        let area = centered_rect(60, 55, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_entry_form_text(state: &AppState, view_data: &ViewData) -> String {
    let focused = state.mode == AppMode::Form;
    let mut lines: Vec<String> = view_data
        .form
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let active = focused && index == view_data.form_field_index;
            let marker = if active { '▸' } else { ' ' };
            let cursor = if active { FIELD_CURSOR } else { "" };
            format!("{marker} {}: {}{cursor}", field.label, field.value)
        })
        .collect();
    lines.push(format!("  [ {SUBMIT_LABEL} ]  (Enter)"));
    lines.join("\n")
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    let header_cells = [
        WorkoutField::Date.label(),
        WorkoutField::Distance.label(),
        ACTIONS_LABEL,
    ]
    .map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells);

    let rows = view_data.rows.iter().enumerate().map(|(row_index, record)| {
        let selected = row_index == view_data.selected_row;
        let editing = view_data
            .editors
            .get(&record.id)
            .is_some_and(|editor| editor.mode() == RowMode::Editing);

        let cells = [WorkoutField::Date, WorkoutField::Distance]
            .into_iter()
            .map(|field| field_cell_text(state, view_data, record, field, editing))
            .chain(std::iter::once(if editing {
                ACTION_HINT_EDITING.to_owned()
            } else {
                ACTION_HINT_DISPLAY.to_owned()
            }))
            .map(|text| {
                let mut style = Style::default();
                if selected {
                    style = style.bg(Color::DarkGray);
                }
                if selected && editing {
                    style = Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD);
                }
                Cell::from(text).style(style)
            })
            .collect::<Vec<_>>();

        Row::new(cells)
    });

    let widths = [
        Constraint::Min(16),
        Constraint::Min(12),
        Constraint::Min(14),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(format!("{TABLE_TITLE} · {}", view_data.rows.len()))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn field_cell_text(
    state: &AppState,
    view_data: &ViewData,
    record: &Workout,
    field: WorkoutField,
    editing: bool,
) -> String {
    if !editing {
        return match field {
            WorkoutField::Date => record.date.clone(),
            WorkoutField::Distance => record.distance.clone(),
        };
    }

    let Some(editor) = view_data.editors.get(&record.id) else {
        return String::new();
    };
    let focused = state.mode == AppMode::RowEdit
        && view_data
            .rows
            .get(view_data.selected_row)
            .is_some_and(|selected| selected.id == record.id)
        && view_data.edit_field == field;
    let cursor = if focused { FIELD_CURSOR } else { "" };
    format!("{}{cursor}", editor.field_value(field))
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }
    if let Some(status) = &state.status_line {
        return status.clone();
    }

    match state.mode {
        AppMode::Form => format!("tab field | enter {SUBMIT_LABEL} | esc table | ctrl+q"),
        AppMode::Nav => "j/k move | a form | e edit | d remove | ? help | ctrl+q".to_owned(),
        AppMode::RowEdit => "tab field | enter save | esc cancel | ctrl+q".to_owned(),
    }
}

fn help_overlay_text() -> String {
    [
        "form",
        "  tab/shift-tab  switch field",
        "  enter          submit (Ок)",
        "  esc            back to the table",
        "",
        "table",
        "  j/k or arrows  move selection",
        "  a or i         focus the form",
        "  e or enter     edit the selected row",
        "  d              remove the selected row",
        "",
        "row edit",
        "  tab            switch field",
        "  enter          save",
        "  esc            cancel",
        "",
        "ctrl+q quits; esc or ? closes this overlay",
    ]
    .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
