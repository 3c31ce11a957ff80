// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::model::WorkoutField;

/// Field values captured from a submitted form, keyed by field name. The
/// store reads the keys it knows about; extra fields ride along untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmittedFields {
    values: BTreeMap<String, String>,
}

impl SubmittedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_owned(), value.to_owned());
    }

    /// Value for a field name; missing fields read as empty.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// True when every captured value is empty, including the no-fields
    /// case. Blank submissions never reach the store.
    pub fn all_blank(&self) -> bool {
        self.values.values().all(|value| value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// The capture-and-forward entry form: labelled text fields and an "Ок"
/// submit. Holds no state beyond the current field text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    fields: Vec<EntryField>,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryForm {
    pub fn new() -> Self {
        Self {
            fields: WorkoutField::ALL
                .iter()
                .map(|field| EntryField {
                    name: field.as_str(),
                    label: field.label(),
                    value: String::new(),
                })
                .collect(),
        }
    }

    pub fn fields(&self) -> &[EntryField] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn input(&mut self, index: usize, ch: char) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value.push(ch);
        }
    }

    pub fn backspace(&mut self, index: usize) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value.pop();
        }
    }

    /// Captures every named field into a mapping; `None` when all captured
    /// values are empty (the submission is rejected and the store is not
    /// called).
    pub fn submit(&self) -> Option<SubmittedFields> {
        let mut captured = SubmittedFields::new();
        for field in &self.fields {
            captured.set(field.name, &field.value);
        }
        if captured.all_blank() {
            return None;
        }
        Some(captured)
    }

    /// Clears every field back to empty.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryForm, SubmittedFields};

    fn type_into(form: &mut EntryForm, index: usize, text: &str) {
        for ch in text.chars() {
            form.input(index, ch);
        }
    }

    #[test]
    fn submit_captures_every_named_field() {
        let mut form = EntryForm::new();
        type_into(&mut form, 0, "04.04.17");
        type_into(&mut form, 1, "10");

        let fields = form.submit().expect("non-blank form submits");
        assert_eq!(fields.value("date"), "04.04.17");
        assert_eq!(fields.value("distance"), "10");
        assert_eq!(fields.value("unrelated"), "");
    }

    #[test]
    fn blank_form_is_rejected() {
        let form = EntryForm::new();
        assert!(form.submit().is_none());
    }

    #[test]
    fn single_filled_field_is_enough_to_submit() {
        let mut form = EntryForm::new();
        type_into(&mut form, 1, "5");
        assert!(form.submit().is_some());
    }

    #[test]
    fn reset_clears_all_fields() {
        let mut form = EntryForm::new();
        type_into(&mut form, 0, "04.04.17");
        type_into(&mut form, 1, "10");
        form.reset();
        assert!(form.submit().is_none());
        assert!(form.fields().iter().all(|field| field.value.is_empty()));
    }

    #[test]
    fn backspace_edits_the_addressed_field_only() {
        let mut form = EntryForm::new();
        type_into(&mut form, 0, "04");
        type_into(&mut form, 1, "10");
        form.backspace(0);

        let fields = form.submit().expect("form still has values");
        assert_eq!(fields.value("date"), "0");
        assert_eq!(fields.value("distance"), "10");
    }

    #[test]
    fn out_of_range_field_index_is_ignored() {
        let mut form = EntryForm::new();
        form.input(9, 'x');
        form.backspace(9);
        assert!(form.submit().is_none());
    }

    #[test]
    fn all_blank_treats_missing_and_empty_alike() {
        let mut fields = SubmittedFields::new();
        assert!(fields.all_blank());
        fields.set("date", "");
        assert!(fields.all_blank());
        fields.set("distance", "5");
        assert!(!fields.all_blank());
    }
}
