use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, Engine as _, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};

use crate::*;

/// Accepts what `atob` accepts: padding is optional and stray low bits are kept.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

pub const STATE_PARAM: &str = "state";

/// Encodes each square as one byte holding its state index, then base64s the
/// result with the standard padded alphabet.
pub fn encode_token(board: &Board) -> String {
    let bytes: Vec<u8> = board.iter().map(SquareState::index).collect();
    STANDARD.encode(bytes)
}

/// Restores square states from a token produced by [`encode_token`].
///
/// The board is reset first. Positions the token does not cover, or that hold
/// an unknown state index, stay inactive and the first such problem is
/// returned. Bytes beyond the board length are ignored.
pub fn decode_token_into(token: &str, board: &mut Board) -> Result<()> {
    board.reset();

    let compact: String = token
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace())
        .collect();
    let bytes = LENIENT.decode(compact).map_err(|err| {
        log::debug!("state token rejected: {}", err);
        BingoError::InvalidToken
    })?;

    let expected = board.len();
    let mut first_error = None;
    for pos in 0..expected {
        let Some(&code) = bytes.get(pos) else {
            first_error.get_or_insert(BingoError::TokenTooShort {
                expected,
                found: bytes.len(),
            });
            break;
        };
        match SquareState::from_index(code) {
            Ok(state) => board.set(pos, state)?,
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Everything a shared link carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub board: Board,
    pub counters: Counters,
}

/// Result of reading a query string. Decoding never fails outright, `error`
/// records what had to be skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    pub state: BoardState,
    /// Whether a state token was present and squares were read from it.
    pub restored: bool,
    pub error: Option<BingoError>,
}

impl BoardState {
    pub fn new(size: Coord2) -> Self {
        Self {
            board: Board::new(size),
            counters: Counters::default(),
        }
    }

    pub fn to_query(&self) -> String {
        format!(
            "{}={}&{}={}&{}={}",
            CounterKind::Deaths.param_name(),
            self.counters.deaths,
            CounterKind::Miab.param_name(),
            self.counters.miab,
            STATE_PARAM,
            encode_token(&self.board)
        )
    }

    pub fn from_query(query: &str, size: Coord2) -> Decoded {
        let mut state = Self::new(size);
        for kind in CounterKind::ALL {
            let param = query::get_param(query, kind.param_name());
            state.counters[kind] = Counter::from_param(param.as_deref());
        }

        let (restored, error) = match query::get_param(query, STATE_PARAM) {
            None => {
                log::debug!("no state in query, keeping default board");
                (false, None)
            }
            Some(token) => match decode_token_into(&token, &mut state.board) {
                Ok(()) => (true, None),
                Err(BingoError::InvalidToken) => (false, Some(BingoError::InvalidToken)),
                Err(err) => (true, Some(err)),
            },
        };

        Decoded {
            state,
            restored,
            error,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(BoardConfig::default().size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SquareState::*;

    fn board(states: &[SquareState]) -> Board {
        Board::from_squares((1, states.len() as Coord), states).unwrap()
    }

    #[test]
    fn token_is_base64_of_state_indices() {
        let token = encode_token(&board(&[Inactive, Active, Blocked]));

        assert_eq!(token, "AAEC");
        assert_eq!(STANDARD.decode(&token).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn query_lists_counters_then_state() {
        let state = BoardState {
            board: board(&[Inactive, Active, Blocked]),
            counters: Counters::new(2, 0),
        };

        assert_eq!(state.to_query(), "deaths=2&miab=0&state=AAEC");
    }

    #[test]
    fn encoding_is_stable_without_mutation() {
        let mut board = Board::default();
        board.toggle(3).unwrap();
        board.toggle(7).unwrap();
        board.toggle(7).unwrap();

        assert_eq!(encode_token(&board), encode_token(&board));
    }

    #[test]
    fn decode_reads_padded_and_unpadded_tokens() {
        let mut padded = Board::new((1, 4));
        let mut unpadded = Board::new((1, 4));

        decode_token_into("AAECAQ==", &mut padded).unwrap();
        decode_token_into("AAECAQ", &mut unpadded).unwrap();

        assert_eq!(padded, unpadded);
        assert_eq!(
            padded.iter().collect::<Vec<_>>(),
            vec![Inactive, Active, Blocked, Active]
        );
    }

    #[test]
    fn short_token_reports_and_leaves_rest_inactive() {
        let mut target = board(&[Blocked, Blocked, Blocked, Blocked]);

        let result = decode_token_into("AQI=", &mut target);

        assert_eq!(
            result,
            Err(BingoError::TokenTooShort {
                expected: 4,
                found: 2
            })
        );
        assert_eq!(
            target.iter().collect::<Vec<_>>(),
            vec![Active, Blocked, Inactive, Inactive]
        );
    }

    #[test]
    fn unknown_index_is_skipped() {
        let mut target = Board::new((1, 3));

        // bytes 01 07 02
        let result = decode_token_into("AQcC", &mut target);

        assert_eq!(result, Err(BingoError::InvalidSquareIndex(7)));
        assert_eq!(
            target.iter().collect::<Vec<_>>(),
            vec![Active, Inactive, Blocked]
        );
    }

    #[test]
    fn garbage_token_keeps_default_board() {
        let mut target = board(&[Active, Active]);

        assert_eq!(
            decode_token_into("!!not base64", &mut target),
            Err(BingoError::InvalidToken)
        );
        assert!(target.iter().all(|state| state == Inactive));
    }

    #[test]
    fn longer_token_ignores_extra_squares() {
        let mut target = Board::new((1, 2));

        decode_token_into("AQIBAg==", &mut target).unwrap();

        assert_eq!(target.iter().collect::<Vec<_>>(), vec![Active, Blocked]);
    }

    #[test]
    fn missing_state_keeps_default_board() {
        let decoded = BoardState::from_query("", (5, 5));

        assert_eq!(decoded.error, None);
        assert!(!decoded.restored);
        assert_eq!(decoded.state, BoardState::default());
    }

    #[test]
    fn restored_only_when_token_was_read() {
        assert!(BoardState::from_query("state=AQI=", (1, 2)).restored);
        assert!(BoardState::from_query("state=AQ==", (1, 2)).restored);
        assert!(!BoardState::from_query("state=%21%21", (1, 2)).restored);
        assert!(!BoardState::from_query("deaths=1", (1, 2)).restored);
    }

    #[test]
    fn counters_decode_without_state() {
        let decoded = BoardState::from_query("?deaths=4&miab=x", (1, 1));

        assert_eq!(decoded.error, None);
        assert_eq!(decoded.state.counters, Counters::new(4, 0));
    }

    #[test]
    fn empty_state_param_is_too_short() {
        let decoded = BoardState::from_query("state=", (1, 2));

        assert_eq!(
            decoded.error,
            Some(BingoError::TokenTooShort {
                expected: 2,
                found: 0
            })
        );
    }
}
