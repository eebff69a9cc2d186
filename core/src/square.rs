use serde::{Deserialize, Serialize};

use crate::*;

/// Visual state of a single bingo square.
///
/// The discriminant is the index written into the state token, so the order of
/// the variants is part of the URL format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareState {
    #[default]
    Inactive,
    Active,
    Blocked,
}

impl SquareState {
    pub const ALL: [SquareState; 3] = [Self::Inactive, Self::Active, Self::Blocked];

    /// Class every square element carries in addition to its state class.
    pub const BASE_CLASS: &'static str = "bingo_sq";

    pub const fn index(self) -> u8 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
            Self::Blocked => 2,
        }
    }

    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(BingoError::InvalidSquareIndex(index))
    }

    /// Next state when the square is clicked.
    pub const fn next(self) -> Self {
        match self {
            Self::Inactive => Self::Active,
            Self::Active => Self::Blocked,
            Self::Blocked => Self::Inactive,
        }
    }

    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Blocked => "blocked",
        }
    }

    pub fn from_class_name(name: &str) -> Result<Self> {
        match name {
            "inactive" => Ok(Self::Inactive),
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            other => Err(BingoError::UnknownSquareClass(other.to_string())),
        }
    }

    /// Reads the state out of a full class attribute such as `"bingo_sq active"`.
    pub fn from_class_list(classes: &str) -> Result<Self> {
        let mut state_classes = classes
            .split_whitespace()
            .filter(|&class| class != Self::BASE_CLASS);
        match (state_classes.next(), state_classes.next()) {
            (Some(class), None) => Self::from_class_name(class),
            _ => Err(BingoError::UnknownSquareClass(classes.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_clicks_return_to_the_starting_state() {
        for state in SquareState::ALL {
            assert_eq!(state.next().next().next(), state);
            assert_ne!(state.next(), state);
        }
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, state) in SquareState::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(state.index()), i);
            assert_eq!(SquareState::from_index(state.index()), Ok(state));
        }
        assert_eq!(
            SquareState::from_index(3),
            Err(BingoError::InvalidSquareIndex(3))
        );
    }

    #[test]
    fn class_list_is_classified_exhaustively() {
        assert_eq!(
            SquareState::from_class_list("bingo_sq blocked"),
            Ok(SquareState::Blocked)
        );
        assert_eq!(
            SquareState::from_class_list("  active bingo_sq "),
            Ok(SquareState::Active)
        );
        assert_eq!(
            SquareState::from_class_list("bingo_sq"),
            Err(BingoError::UnknownSquareClass("bingo_sq".to_string()))
        );
        assert_eq!(
            SquareState::from_class_name("selected"),
            Err(BingoError::UnknownSquareClass("selected".to_string()))
        );
        assert!(SquareState::from_class_list("bingo_sq active blocked").is_err());
    }
}
