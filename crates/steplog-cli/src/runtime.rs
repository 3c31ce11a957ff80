// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use steplog_app::{SubmittedFields, Workout, WorkoutId, WorkoutStore};
use steplog_tui::WorkoutLog;

/// The shell-owned store behind the view's `WorkoutLog` seam.
pub struct StoreRuntime<'a> {
    store: &'a mut WorkoutStore,
}

impl<'a> StoreRuntime<'a> {
    pub fn new(store: &'a mut WorkoutStore) -> Self {
        Self { store }
    }
}

impl WorkoutLog for StoreRuntime<'_> {
    fn snapshot(&self) -> Vec<Workout> {
        self.store.records().to_vec()
    }

    fn create(&mut self, fields: &SubmittedFields) {
        self.store.create(fields);
    }

    fn update(&mut self, workout: &Workout) {
        self.store.update(workout);
    }

    fn remove(&mut self, id: WorkoutId) {
        self.store.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::StoreRuntime;
    use steplog_app::{SubmittedFields, Workout, WorkoutId, WorkoutStore};
    use steplog_tui::WorkoutLog;

    fn fields(date: &str, distance: &str) -> SubmittedFields {
        let mut fields = SubmittedFields::new();
        fields.set("date", date);
        fields.set("distance", distance);
        fields
    }

    #[test]
    fn create_reaches_the_store_and_the_snapshot() {
        let mut store = WorkoutStore::new();
        let mut runtime = StoreRuntime::new(&mut store);

        runtime.create(&fields("04.04.17", "10"));
        runtime.create(&fields("04.04.17", "5"));

        let snapshot = runtime.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].distance, "15");
    }

    #[test]
    fn update_and_remove_pass_through() {
        let mut store = WorkoutStore::new();
        let mut runtime = StoreRuntime::new(&mut store);
        runtime.create(&fields("04.04.17", "10"));
        runtime.create(&fields("05.04.17", "15"));
        let first = runtime.snapshot()[0].clone();

        runtime.update(&Workout {
            distance: "11".to_owned(),
            ..first.clone()
        });
        assert_eq!(runtime.snapshot()[0].distance, "11");

        runtime.remove(first.id);
        let snapshot = runtime.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].date, "05.04.17");

        runtime.remove(WorkoutId::new(99));
        assert_eq!(runtime.snapshot().len(), 1);
    }
}
