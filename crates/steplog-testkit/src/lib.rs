// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use steplog_app::{SubmittedFields, Workout, WorkoutField, WorkoutId};

const REFERENCE_YEAR_SUFFIX: &str = "17";

const DAYS_PER_MONTH: [usize; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Deterministic generator of workout entries in the shape the entry form
/// produces: `DD.MM.YY` date text and decimal distance text. Same seed,
/// same sequence.
#[derive(Debug, Clone)]
pub struct EntryFaker {
    rng: DeterministicRng,
}

impl EntryFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn date(&mut self) -> String {
        let month = self.rng.int_n(DAYS_PER_MONTH.len());
        let day = self.rng.int_n(DAYS_PER_MONTH[month]) + 1;
        format!("{day:02}.{:02}.{REFERENCE_YEAR_SUFFIX}", month + 1)
    }

    pub fn distance(&mut self) -> String {
        let whole = self.rng.int_n(29) + 1;
        match self.rng.int_n(4) {
            0 => format!("{whole}.5"),
            1 => format!("{whole}.{}", self.rng.int_n(9) + 1),
            _ => whole.to_string(),
        }
    }

    pub fn entry(&mut self) -> (String, String) {
        (self.date(), self.distance())
    }

    /// Entries with pairwise-distinct dates. `count` must fit within one
    /// reference year of dates.
    pub fn distinct_entries(&mut self, count: usize) -> Vec<(String, String)> {
        assert!(count <= 365, "at most one year of distinct dates");
        let mut seen = BTreeSet::new();
        let mut entries = Vec::with_capacity(count);
        while entries.len() < count {
            let date = self.date();
            if seen.insert(date.clone()) {
                let distance = self.distance();
                entries.push((date, distance));
            }
        }
        entries
    }
}

/// Submitted-form mapping for a single entry.
pub fn fields_for(date: &str, distance: &str) -> SubmittedFields {
    let mut fields = SubmittedFields::new();
    fields.set(WorkoutField::Date.as_str(), date);
    fields.set(WorkoutField::Distance.as_str(), distance);
    fields
}

/// A record as the store would hold it, for seeding `with_records`.
pub fn workout(id: i64, date: &str, distance: &str) -> Workout {
    Workout {
        id: WorkoutId::new(id),
        date: date.to_owned(),
        distance: distance.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::EntryFaker;

    #[test]
    fn same_seed_same_sequence() {
        let mut first = EntryFaker::new(11);
        let mut second = EntryFaker::new(11);
        for _ in 0..32 {
            assert_eq!(first.entry(), second.entry());
        }
    }

    #[test]
    fn seeds_diverge() {
        let mut first = EntryFaker::new(1);
        let mut second = EntryFaker::new(2);
        let lhs: Vec<_> = (0..8).map(|_| first.entry()).collect();
        let rhs: Vec<_> = (0..8).map(|_| second.entry()).collect();
        assert_ne!(lhs, rhs);
    }

    #[test]
    fn dates_stay_in_the_day_month_shape() {
        let mut faker = EntryFaker::new(5);
        for _ in 0..64 {
            let date = faker.date();
            let parts: Vec<&str> = date.split('.').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0].len(), 2);
            assert_eq!(parts[1].len(), 2);
            assert_eq!(parts[2], "17");
            let day: usize = parts[0].parse().expect("numeric day");
            let month: usize = parts[1].parse().expect("numeric month");
            assert!((1..=31).contains(&day));
            assert!((1..=12).contains(&month));
        }
    }

    #[test]
    fn distinct_entries_have_unique_dates() {
        let mut faker = EntryFaker::new(3);
        let entries = faker.distinct_entries(40);
        assert_eq!(entries.len(), 40);
        let mut dates: Vec<&String> = entries.iter().map(|(date, _)| date).collect();
        dates.sort();
        dates.dedup();
        assert_eq!(dates.len(), 40);
    }
}
