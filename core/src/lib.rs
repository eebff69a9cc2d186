//! Board model and URL state codec for the bingo board.
//!
//! The whole board, square states plus the two counters, lives in the page
//! query string: `?deaths=<n>&miab=<n>&state=<token>`, where the token is the
//! base64 of one byte per square holding its state index.

pub use board::*;
pub use codec::*;
pub use counter::*;
pub use error::*;
pub use guess::*;
pub use history::*;
pub use pool::*;
pub use square::*;
pub use types::*;

mod board;
mod codec;
mod counter;
mod error;
mod guess;
mod history;
mod pool;
pub mod query;
mod square;
mod types;
