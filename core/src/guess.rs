use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GuessKind {
    Bingo,
    Miab,
    Deaths,
}

impl GuessKind {
    pub const ALL: [GuessKind; 3] = [Self::Bingo, Self::Miab, Self::Deaths];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bingo => "bingo",
            Self::Miab => "miab",
            Self::Deaths => "deaths",
        }
    }
}

impl FromStr for GuessKind {
    type Err = BingoError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or(BingoError::InvalidGuess(s))
    }
}

/// A line that completes a bingo on the 5x5 board.
///
/// Columns and rows are numbered from 1; `LowerLeft` is the diagonal running
/// up from the lower left corner, `UpperLeft` the one running down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BingoLine {
    Column(u8),
    Row(u8),
    LowerLeft,
    UpperLeft,
}

impl BingoLine {
    pub const LINES_PER_AXIS: u8 = 5;

    /// Every accepted line, ordered by name.
    pub fn all() -> Vec<BingoLine> {
        let axis = 1..=Self::LINES_PER_AXIS;
        let mut lines: Vec<BingoLine> = axis
            .clone()
            .map(Self::Column)
            .chain(axis.map(Self::Row))
            .chain([Self::LowerLeft, Self::UpperLeft])
            .collect();
        lines.sort_by_key(|line| line.to_string());
        lines
    }
}

impl fmt::Display for BingoLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(n) => write!(f, "c{n}"),
            Self::Row(n) => write!(f, "r{n}"),
            Self::LowerLeft => f.write_str("ll"),
            Self::UpperLeft => f.write_str("ul"),
        }
    }
}

impl FromStr for BingoLine {
    type Err = BingoError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let invalid = || BingoError::InvalidGuess(name.clone());
        match name.as_str() {
            "ll" => return Ok(Self::LowerLeft),
            "ul" => return Ok(Self::UpperLeft),
            _ => {}
        }

        let (axis, number) = name.split_at_checked(1).ok_or_else(invalid)?;
        let number: u8 = number.parse().map_err(|_| invalid())?;
        if !(1..=Self::LINES_PER_AXIS).contains(&number) {
            return Err(invalid());
        }
        match axis {
            "c" => Ok(Self::Column(number)),
            "r" => Ok(Self::Row(number)),
            _ => Err(invalid()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guess {
    Bingo(BingoLine),
    Miab(u64),
    Deaths(u64),
}

impl Guess {
    pub fn parse(kind: GuessKind, value: &str) -> Result<Self> {
        let count = || {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| BingoError::InvalidGuess(value.trim().to_string()))
        };
        match kind {
            GuessKind::Bingo => value.parse().map(Self::Bingo),
            GuessKind::Miab => count().map(Self::Miab),
            GuessKind::Deaths => count().map(Self::Deaths),
        }
    }

    pub const fn kind(self) -> GuessKind {
        match self {
            Self::Bingo(_) => GuessKind::Bingo,
            Self::Miab(_) => GuessKind::Miab,
            Self::Deaths(_) => GuessKind::Deaths,
        }
    }
}

/// Guesses a single player has registered, at most one per kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGuesses {
    pub bingo: Option<BingoLine>,
    pub miab: Option<u64>,
    pub deaths: Option<u64>,
}

impl PlayerGuesses {
    pub fn get(&self, kind: GuessKind) -> Option<Guess> {
        match kind {
            GuessKind::Bingo => self.bingo.map(Guess::Bingo),
            GuessKind::Miab => self.miab.map(Guess::Miab),
            GuessKind::Deaths => self.deaths.map(Guess::Deaths),
        }
    }

    fn set(&mut self, guess: Guess) {
        match guess {
            Guess::Bingo(line) => self.bingo = Some(line),
            Guess::Miab(count) => self.miab = Some(count),
            Guess::Deaths(count) => self.deaths = Some(count),
        }
    }

    fn clear(&mut self, kind: GuessKind) -> bool {
        match kind {
            GuessKind::Bingo => self.bingo.take().is_some(),
            GuessKind::Miab => self.miab.take().is_some(),
            GuessKind::Deaths => self.deaths.take().is_some(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Recorded,
    AlreadyGuessed,
    Closed,
}

impl GuessOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Recorded)
    }
}

/// Guesses of every player for the current segment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSet {
    players: BTreeMap<String, PlayerGuesses>,
    overwrite: bool,
    open: bool,
}

impl PlayerSet {
    pub fn new(overwrite: bool) -> Self {
        Self {
            overwrite,
            ..Default::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Starts or stops accepting guesses.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerGuesses> {
        self.players.get(name)
    }

    /// Registers a guess. Without overwrite, a player's first guess of a kind
    /// sticks.
    pub fn guess(&mut self, name: &str, guess: Guess) -> GuessOutcome {
        if !self.open {
            return GuessOutcome::Closed;
        }

        let overwrite = self.overwrite;
        let guesses = self.players.entry(name.to_string()).or_default();
        if guesses.get(guess.kind()).is_some() && !overwrite {
            log::debug!("{} already guessed {}", name, guess.kind().name());
            return GuessOutcome::AlreadyGuessed;
        }

        guesses.set(guess);
        log::debug!("{} guessed {:?}", name, guess);
        GuessOutcome::Recorded
    }

    /// Drops a player's guess of `kind`, returning whether there was one.
    pub fn withdraw(&mut self, name: &str, kind: GuessKind) -> bool {
        self.players
            .get_mut(name)
            .is_some_and(|guesses| guesses.clear(kind))
    }

    /// Players whose guess wins against `result`.
    ///
    /// A bingo guess must name the same line. Counts go to the closest guesses
    /// that do not exceed the result.
    pub fn winners(&self, result: Guess) -> BTreeSet<&str> {
        match result {
            Guess::Bingo(line) => self
                .players
                .iter()
                .filter(|(_, guesses)| guesses.bingo == Some(line))
                .map(|(name, _)| name.as_str())
                .collect(),
            Guess::Miab(value) => {
                closest_not_over(self.counts(|guesses| guesses.miab), value)
            }
            Guess::Deaths(value) => {
                closest_not_over(self.counts(|guesses| guesses.deaths), value)
            }
        }
    }

    fn counts(
        &self,
        pick: impl Fn(&PlayerGuesses) -> Option<u64>,
    ) -> impl Iterator<Item = (&str, u64)> {
        self.players
            .iter()
            .filter_map(move |(name, guesses)| pick(guesses).map(|count| (name.as_str(), count)))
    }
}

/// Names whose guess is nearest to `value` without going over it.
pub fn closest_not_over<'a>(
    guesses: impl IntoIterator<Item = (&'a str, u64)>,
    value: u64,
) -> BTreeSet<&'a str> {
    let under: Vec<(&str, u64)> = guesses
        .into_iter()
        .filter_map(|(name, guess)| value.checked_sub(guess).map(|gap| (name, gap)))
        .collect();
    let Some(closest) = under.iter().map(|&(_, gap)| gap).min() else {
        return BTreeSet::new();
    };
    under
        .into_iter()
        .filter(|&(_, gap)| gap == closest)
        .map(|(name, _)| name)
        .collect()
}

/// Points awarded per winning guess kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsFor {
    pub bingo: u32,
    pub miab: u32,
    pub deaths: u32,
}

impl PointsFor {
    pub const fn get(&self, kind: GuessKind) -> u32 {
        match kind {
            GuessKind::Bingo => self.bingo,
            GuessKind::Miab => self.miab,
            GuessKind::Deaths => self.deaths,
        }
    }
}

impl Default for PointsFor {
    fn default() -> Self {
        Self {
            bingo: 1,
            miab: 1,
            deaths: 1,
        }
    }
}

/// Running point totals across segments.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    points: BTreeMap<String, u32>,
    points_for: PointsFor,
}

impl Scoreboard {
    pub fn new(points_for: PointsFor) -> Self {
        Self {
            points: BTreeMap::new(),
            points_for,
        }
    }

    pub fn points(&self, name: &str) -> u32 {
        self.points.get(name).copied().unwrap_or(0)
    }

    /// Credits every winner of `result` and returns who won.
    pub fn award(&mut self, players: &PlayerSet, result: Guess) -> BTreeSet<String> {
        let award = self.points_for.get(result.kind());
        let winners: BTreeSet<String> = players
            .winners(result)
            .into_iter()
            .map(str::to_string)
            .collect();
        for winner in &winners {
            let total = self.points.entry(winner.clone()).or_default();
            *total = total.saturating_add(award);
            log::info!("{} now has {} points", winner, total);
        }
        winners
    }

    /// Totals in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.points.iter().map(|(name, &points)| (name.as_str(), points))
    }
}
