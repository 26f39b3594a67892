pub mod board;
pub mod fen;
pub mod game;
pub mod perft;
pub mod rules;
pub mod types;

pub use board::*;
pub use fen::{parse_fen, positions, to_fen, FenError};
pub use game::*;
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use rules::*;
pub use types::*;
