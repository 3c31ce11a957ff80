// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Table navigation.
    Nav,
    /// Entry form has focus.
    Form,
    /// The selected row's edit buffer has focus.
    RowEdit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Form,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    FocusForm,
    EnterRowEdit,
    ExitToNav,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::FocusForm => {
                self.mode = AppMode::Form;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::EnterRowEdit => {
                self.mode = AppMode::RowEdit;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppMode, AppState};

    #[test]
    fn starts_with_the_form_focused() {
        let state = AppState::default();
        assert_eq!(state.mode, AppMode::Form);
        assert_eq!(state.status_line, None);
    }

    #[test]
    fn mode_transitions() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::ExitToNav);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(events, vec![AppEvent::ModeChanged(AppMode::Nav)]);

        state.dispatch(AppCommand::EnterRowEdit);
        assert_eq!(state.mode, AppMode::RowEdit);

        state.dispatch(AppCommand::FocusForm);
        assert_eq!(state.mode, AppMode::Form);
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::SetStatus("entry added".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("entry added"));
        assert_eq!(
            events,
            vec![AppEvent::StatusUpdated("entry added".to_owned())]
        );

        let events = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(state.status_line, None);
        assert_eq!(events, vec![AppEvent::StatusCleared]);
    }
}
