use core::num::IntErrorKind;
use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

/// Non-negative tally shown next to the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Counter(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Up,
    Down,
}

impl Counter {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Decrements, never going below zero.
    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn step(&mut self, step: Step) {
        match step {
            Step::Up => self.increment(),
            Step::Down => self.decrement(),
        }
    }

    /// Parses a query parameter value, anything missing or non-numeric is zero.
    /// Values too large to hold saturate.
    pub fn from_param(param: Option<&str>) -> Self {
        let Some(raw) = param else {
            return Self::default();
        };
        match raw.trim().parse::<u64>() {
            Ok(value) => Self(value),
            Err(err) if *err.kind() == IntErrorKind::PosOverflow => Self(u64::MAX),
            Err(_) => Self::default(),
        }
    }
}

impl core::fmt::Display for Counter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterKind {
    Deaths,
    Miab,
}

impl CounterKind {
    pub const ALL: [CounterKind; 2] = [Self::Deaths, Self::Miab];

    pub const fn param_name(self) -> &'static str {
        match self {
            Self::Deaths => "deaths",
            Self::Miab => "miab",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Deaths => "death",
            Self::Miab => "miab",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub deaths: Counter,
    pub miab: Counter,
}

impl Counters {
    pub const fn new(deaths: u64, miab: u64) -> Self {
        Self {
            deaths: Counter(deaths),
            miab: Counter(miab),
        }
    }
}

impl Index<CounterKind> for Counters {
    type Output = Counter;

    fn index(&self, kind: CounterKind) -> &Self::Output {
        match kind {
            CounterKind::Deaths => &self.deaths,
            CounterKind::Miab => &self.miab,
        }
    }
}

impl IndexMut<CounterKind> for Counters {
    fn index_mut(&mut self, kind: CounterKind) -> &mut Self::Output {
        match kind {
            CounterKind::Deaths => &mut self.deaths,
            CounterKind::Miab => &mut self.miab,
        }
    }
}
