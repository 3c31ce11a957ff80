// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::WorkoutId;

/// One logged workout. `date` is free-form text intended as `DD.MM.YY` and
/// is never parsed as a calendar date; `distance` is carried as text and
/// only interpreted numerically when two entries merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutId,
    pub date: String,
    pub distance: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutField {
    Date,
    Distance,
}

impl WorkoutField {
    pub const ALL: [Self; 2] = [Self::Date, Self::Distance];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Distance => "distance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date" => Some(Self::Date),
            "distance" => Some(Self::Distance),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Date => "Дата (ДД.ММ.ГГ)",
            Self::Distance => "Пройдено км",
        }
    }
}

const KM_SCALE: i64 = 1_000;

/// Distance as a count of thousandths of a kilometre. Merge addition goes
/// through this type so sums are exact decimals rather than floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Km(i64);

impl Km {
    pub const ZERO: Self = Self(0);

    pub const fn from_thousandths(value: i64) -> Self {
        Self(value)
    }

    pub const fn thousandths(self) -> i64 {
        self.0
    }

    /// Best-effort coercion: surrounding whitespace is ignored, an optional
    /// sign precedes integer digits and an optional fraction, fractional
    /// digits past the third are dropped. Anything else, including the
    /// empty string, is 0.
    pub fn parse_lenient(raw: &str) -> Self {
        let text = raw.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Self::ZERO;
        }
        if !whole.bytes().all(|byte| byte.is_ascii_digit())
            || !fraction.bytes().all(|byte| byte.is_ascii_digit())
        {
            return Self::ZERO;
        }

        let mut value: i64 = 0;
        for byte in whole.bytes() {
            value = value
                .saturating_mul(10)
                .saturating_add(i64::from(byte - b'0'));
        }
        value = value.saturating_mul(KM_SCALE);

        let mut place = KM_SCALE / 10;
        for byte in fraction.bytes().take(3) {
            value = value.saturating_add(i64::from(byte - b'0').saturating_mul(place));
            place /= 10;
        }

        Self(if negative { value.saturating_neg() } else { value })
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Km {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / KM_SCALE.unsigned_abs();
        let fraction = magnitude % KM_SCALE.unsigned_abs();
        if fraction == 0 {
            return write!(f, "{sign}{whole}");
        }
        let padded = format!("{fraction:03}");
        write!(f, "{sign}{whole}.{}", padded.trim_end_matches('0'))
    }
}
