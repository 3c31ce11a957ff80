// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::forms::SubmittedFields;
use crate::ids::WorkoutId;
use crate::model::{Km, Workout, WorkoutField};

const DEMO_ENTRIES: [(&str, &str); 5] = [
    ("04.04.17", "10"),
    ("05.04.17", "15"),
    ("07.04.17", "6.5"),
    ("10.04.17", "12"),
    ("11.04.17", "8.2"),
];

/// Ordered in-memory workout log. Owned by the shell and injected into the
/// view layer; every mutation goes through the three operations below, and
/// none of them can fail: unknown ids and blank submissions degrade to
/// no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutStore {
    records: Vec<Workout>,
    next_id: i64,
}

impl Default for WorkoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Adopts an existing record sequence. The id counter resumes above the
    /// largest seeded id so later appends stay unique even after removals.
    pub fn with_records(records: Vec<Workout>) -> Self {
        let next_id = records
            .iter()
            .map(|record| record.id.get())
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self { records, next_id }
    }

    pub fn records(&self) -> &[Workout] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Merge-or-append from submitted form fields. An entry whose non-empty
    /// date matches an existing record adds its distance onto that record
    /// in place; otherwise a new record is appended with a fresh id. A
    /// submission where every value is empty does nothing.
    pub fn create(&mut self, fields: &SubmittedFields) {
        if fields.all_blank() {
            return;
        }

        let date = fields.value(WorkoutField::Date.as_str());
        let matched = self
            .records
            .iter()
            .position(|record| !record.date.is_empty() && record.date == date);

        let Some(index) = matched else {
            self.append(fields);
            return;
        };

        // Stale index: fall back to a plain append.
        match self.records.get_mut(index) {
            Some(existing) => {
                let total = Km::parse_lenient(&existing.distance).saturating_add(
                    Km::parse_lenient(fields.value(WorkoutField::Distance.as_str())),
                );
                existing.distance = total.to_string();
            }
            None => self.append(fields),
        }
    }

    /// Replaces the record sharing `workout.id` at its current position.
    /// Silent no-op when no record carries that id.
    pub fn update(&mut self, workout: &Workout) {
        if let Some(slot) = self
            .records
            .iter_mut()
            .find(|record| record.id == workout.id)
        {
            *slot = workout.clone();
        }
    }

    /// Drops the record with the given id; no-op when absent.
    pub fn remove(&mut self, id: WorkoutId) {
        self.records.retain(|record| record.id != id);
    }

    /// Loads the canonical demo rows. Runs through `create`, so a demo
    /// entry sharing a date with an already-seeded record merges instead of
    /// duplicating.
    pub fn seed_demo_entries(&mut self) {
        for (date, distance) in DEMO_ENTRIES {
            let mut fields = SubmittedFields::new();
            fields.set(WorkoutField::Date.as_str(), date);
            fields.set(WorkoutField::Distance.as_str(), distance);
            self.create(&fields);
        }
    }

    fn append(&mut self, fields: &SubmittedFields) {
        let id = WorkoutId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.records.push(Workout {
            id,
            date: fields.value(WorkoutField::Date.as_str()).to_owned(),
            distance: fields.value(WorkoutField::Distance.as_str()).to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::WorkoutStore;
    use crate::forms::SubmittedFields;
    use crate::ids::WorkoutId;
    use crate::model::Workout;

    fn entry(date: &str, distance: &str) -> SubmittedFields {
        let mut fields = SubmittedFields::new();
        fields.set("date", date);
        fields.set("distance", distance);
        fields
    }

    #[test]
    fn create_appends_with_monotonic_ids() {
        let mut store = WorkoutStore::new();
        store.create(&entry("04.04.17", "10"));
        store.create(&entry("05.04.17", "15"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].id, WorkoutId::new(1));
        assert_eq!(store.records()[1].id, WorkoutId::new(2));
    }

    #[test]
    fn removed_ids_are_never_reissued() {
        let mut store = WorkoutStore::new();
        store.create(&entry("04.04.17", "10"));
        store.create(&entry("05.04.17", "15"));
        store.remove(WorkoutId::new(2));
        store.create(&entry("06.04.17", "3"));

        let ids: Vec<i64> = store.records().iter().map(|record| record.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn with_records_resumes_the_id_counter() {
        let mut store = WorkoutStore::with_records(vec![
            Workout {
                id: WorkoutId::new(0),
                date: "04.04.17".to_owned(),
                distance: "10".to_owned(),
            },
            Workout {
                id: WorkoutId::new(7),
                date: "05.04.17".to_owned(),
                distance: "15".to_owned(),
            },
        ]);
        store.create(&entry("06.04.17", "3"));
        assert_eq!(store.records()[2].id, WorkoutId::new(8));
    }

    #[test]
    fn empty_dates_never_match_each_other() {
        let mut store = WorkoutStore::new();
        store.create(&entry("", "10"));
        store.create(&entry("", "5"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].distance, "10");
        assert_eq!(store.records()[1].distance, "5");
    }

    #[test]
    fn merge_keeps_id_date_and_position() {
        let mut store = WorkoutStore::new();
        store.create(&entry("04.04.17", "10"));
        store.create(&entry("05.04.17", "15"));
        store.create(&entry("04.04.17", "5"));

        assert_eq!(store.len(), 2);
        let merged = &store.records()[0];
        assert_eq!(merged.id, WorkoutId::new(1));
        assert_eq!(merged.date, "04.04.17");
        assert_eq!(merged.distance, "15");
    }

    #[test]
    fn merge_coerces_non_numeric_distances_to_zero() {
        let mut store = WorkoutStore::new();
        store.create(&entry("04.04.17", "ten"));
        store.create(&entry("04.04.17", "5"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].distance, "5");
    }

    #[test]
    fn update_with_unknown_id_changes_nothing() {
        let mut store = WorkoutStore::new();
        store.create(&entry("04.04.17", "10"));
        let before = store.clone();

        store.update(&Workout {
            id: WorkoutId::new(99),
            date: "01.01.18".to_owned(),
            distance: "1".to_owned(),
        });
        assert_eq!(store, before);
    }

    #[test]
    fn remove_is_a_no_op_for_absent_ids() {
        let mut store = WorkoutStore::new();
        store.create(&entry("04.04.17", "10"));
        store.remove(WorkoutId::new(42));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn demo_seed_merges_when_run_again() {
        let mut store = WorkoutStore::new();
        store.seed_demo_entries();
        let count = store.len();
        assert_eq!(count, 5);
        assert_eq!(store.records()[0].date, "04.04.17");
        assert_eq!(store.records()[0].distance, "10");

        store.seed_demo_entries();
        assert_eq!(store.len(), count);
        assert_eq!(store.records()[0].distance, "20");
    }
}
