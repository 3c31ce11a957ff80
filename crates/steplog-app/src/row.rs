// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{Workout, WorkoutField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Display,
    Editing,
}

/// Per-row edit buffer. Each row owns one instance; buffered changes reach
/// the store only when `save` hands the record back, and `cancel` throws
/// them away. Editing one row never touches another row's buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEditor {
    mode: RowMode,
    buffer: Workout,
}

impl RowEditor {
    pub fn new(record: &Workout) -> Self {
        Self {
            mode: RowMode::Display,
            buffer: record.clone(),
        }
    }

    pub const fn mode(&self) -> RowMode {
        self.mode
    }

    pub fn buffer(&self) -> &Workout {
        &self.buffer
    }

    /// Reseeds the buffer from the bound record and enters Editing.
    pub fn begin_edit(&mut self, record: &Workout) {
        self.buffer = record.clone();
        self.mode = RowMode::Editing;
    }

    pub fn field_value(&self, field: WorkoutField) -> &str {
        match field {
            WorkoutField::Date => &self.buffer.date,
            WorkoutField::Distance => &self.buffer.distance,
        }
    }

    /// Replaces one named field in the buffer. Ignored outside Editing.
    pub fn set_field(&mut self, field: WorkoutField, value: String) {
        if self.mode != RowMode::Editing {
            return;
        }
        match field {
            WorkoutField::Date => self.buffer.date = value,
            WorkoutField::Distance => self.buffer.distance = value,
        }
    }

    pub fn input(&mut self, field: WorkoutField, ch: char) {
        if self.mode != RowMode::Editing {
            return;
        }
        match field {
            WorkoutField::Date => self.buffer.date.push(ch),
            WorkoutField::Distance => self.buffer.distance.push(ch),
        }
    }

    pub fn backspace(&mut self, field: WorkoutField) {
        if self.mode != RowMode::Editing {
            return;
        }
        match field {
            WorkoutField::Date => {
                self.buffer.date.pop();
            }
            WorkoutField::Distance => {
                self.buffer.distance.pop();
            }
        }
    }

    /// Commits the buffer: returns the record to hand to the store's
    /// `update` and transitions back to Display. `None` outside Editing.
    pub fn save(&mut self) -> Option<Workout> {
        if self.mode != RowMode::Editing {
            return None;
        }
        self.mode = RowMode::Display;
        Some(self.buffer.clone())
    }

    /// Discards buffered edits; the next `begin_edit` reseeds from the
    /// bound record.
    pub fn cancel(&mut self) {
        self.mode = RowMode::Display;
    }
}
