use checkers_core::{BoardState, Mode, Move, Side, Square};
use crossterm::{
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

fn piece_symbol(board: &BoardState, square: Square) -> (char, Option<TermColor>) {
    match board.piece_at(square) {
        Some(piece) => {
            let color = match piece.owner {
                Side::Light => TermColor::White,
                Side::Dark => TermColor::Red,
            };
            (piece.to_char(), Some(color))
        }
        None => ('.', None),
    }
}

/// Prints the board with row 8 at the top, highlighting `marks`
/// (typically the destinations of the selected piece or the last move).
pub fn print_board(board: &BoardState, marks: &[Square]) -> io::Result<()> {
    let mut out = io::stdout();

    queue!(out, Print("\n   a b c d e f g h\n"))?;
    for row in (0..8u8).rev() {
        queue!(out, Print(format!(" {} ", row + 1)))?;

        for col in 0..8u8 {
            let Some(square) = Square::new(col, row) else {
                continue;
            };
            let background = if marks.contains(&square) {
                TermColor::DarkBlue
            } else if square.is_playable() {
                TermColor::DarkGrey
            } else {
                TermColor::Black
            };
            let (symbol, foreground) = piece_symbol(board, square);

            queue!(out, SetBackgroundColor(background))?;
            if let Some(color) = foreground {
                queue!(out, SetForegroundColor(color))?;
            }
            queue!(out, Print(format!("{} ", symbol)), ResetColor)?;
        }

        queue!(out, Print(format!(" {}\n", row + 1)))?;
    }
    queue!(out, Print("   a b c d e f g h\n\n"))?;
    queue!(out, Print(format!("{}\n", status_line(board))))?;

    out.flush()
}

pub fn status_line(board: &BoardState) -> String {
    match board.mode() {
        Mode::Normal => format!("{} to move", board.side_to_move()),
        Mode::MustContinueJump(square) => {
            format!("{} must continue jumping from {}", board.side_to_move(), square)
        }
        Mode::GameOver(outcome) => format!("Game over: {}", outcome),
    }
}

pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
