use crate::display::{format_moves, print_board};
use anyhow::Result;
use checkers_agents::{Agent, MinimaxAgent};
use checkers_core::{BoardState, Mode, Move, Side, Square};
use log::{debug, error};
use std::io::{self, BufRead, Write};

const HELP: &str = "Enter moves like c3-d4, c3d4 or c3xe5.
Commands: moves, undo, new, fen, help, quit";

/// A line-oriented game between a human and the minimax agent.
pub struct InteractiveGame {
    start: BoardState,
    board: BoardState,
    human: Side,
    engine: MinimaxAgent,
    /// Board snapshots taken at the start of each human turn.
    undo_stack: Vec<BoardState>,
    last_move: Vec<Square>,
}

impl InteractiveGame {
    pub fn new(start: BoardState, human: Side, engine: MinimaxAgent) -> Self {
        Self {
            board: start.clone(),
            start,
            human,
            engine,
            undo_stack: Vec::new(),
            last_move: Vec::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        println!(
            "Checkers - you play {}, {} plays {}",
            self.human,
            self.engine.name(),
            self.human.opponent()
        );
        println!("{}", HELP);

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print_board(&self.board, &self.last_move)?;

            if self.board.is_over() {
                break;
            }

            if self.board.side_to_move() != self.human {
                if !self.engine_turn() {
                    break;
                }
                continue;
            }

            print!("Your move: ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match line.trim() {
                "" => continue,
                "quit" | "exit" => break,
                "help" => println!("{}", HELP),
                "moves" => println!("Legal: {}", format_moves(self.board.legal_moves().as_slice())),
                "fen" => println!("{}", self.board.to_fen()),
                "new" => {
                    self.board = self.start.clone();
                    self.undo_stack.clear();
                    self.last_move.clear();
                    println!("New game started!");
                }
                "undo" => match self.undo_stack.pop() {
                    Some(previous) => {
                        self.board = previous;
                        self.last_move.clear();
                        println!("Undid last turn");
                    }
                    None => println!("Nothing to undo"),
                },
                input => self.human_move(input),
            }
        }

        Ok(())
    }

    fn human_move(&mut self, input: &str) {
        let mv: Move = match input.parse() {
            Ok(mv) => mv,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        let snapshot = matches!(self.board.mode(), Mode::Normal).then(|| self.board.clone());

        match self.board.request_move(mv.from, mv.to) {
            Ok(turn) => {
                if let Some(snapshot) = snapshot {
                    self.undo_stack.push(snapshot);
                }
                self.last_move = vec![mv.from, mv.to];
                if let Some(from) = turn.must_continue_from {
                    println!("Jump again from {}", from);
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    /// Plays the engine's whole turn, including every jump of a chain.
    /// Returns false if the engine could not move.
    fn engine_turn(&mut self) -> bool {
        println!("Engine thinking...");
        self.last_move.clear();

        while !self.board.is_over() && self.board.side_to_move() != self.human {
            let Some(mv) = self.engine.best_move(&self.board) else {
                return false;
            };
            match self.board.apply(mv) {
                Ok(_) => {
                    debug!("engine played {}", mv);
                    println!("Engine plays: {}", mv);
                    if self.last_move.is_empty() {
                        self.last_move.push(mv.from);
                    }
                    self.last_move.push(mv.to);
                }
                Err(e) => {
                    error!("engine produced a rejected move {}: {}", mv, e);
                    return false;
                }
            }
        }

        !self.last_move.is_empty()
    }
}
