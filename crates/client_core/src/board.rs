//! Board state holder
//!
//! Wraps the rules engine's board together with the history needed to undo
//! moves and to detect repetitions. Legality, check and mate come from the
//! engine; this type only keeps the bookkeeping around it.

use cozy_chess::{Board, Color, GameStatus, Piece, Square};

use crate::error::{BoardError, BoardResult};
use crate::moves::{self, ColoredPiece, PlayedMove};
use crate::surface::{BoardFrame, PieceImage};

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoves,
    Repetition,
    InsufficientMaterial,
}

/// The authoritative position of a session
#[derive(Debug, Clone)]
pub struct BoardState {
    board: Board,
    /// Positions before each played move, for undo
    previous: Vec<Board>,
    history: Vec<PlayedMove>,
    /// Hash of every position reached, including the initial one
    hashes: Vec<u64>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self::with_board(Board::default())
    }

    /// Start from an arbitrary position
    pub fn from_fen(fen: &str) -> BoardResult<Self> {
        let board = Board::from_fen(fen.trim(), false).map_err(|_| BoardError::InvalidFen {
            fen: fen.to_string(),
        })?;
        Ok(Self::with_board(board))
    }

    fn with_board(board: Board) -> Self {
        let hash = board.hash();
        Self {
            board,
            previous: Vec::new(),
            history: Vec::new(),
            hashes: vec![hash],
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn piece_at(&self, square: Square) -> Option<ColoredPiece> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some(ColoredPiece { color, piece })
    }

    /// Distinct destinations of the legal moves starting on `square`
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        let mut destinations = Vec::new();
        self.board.generate_moves_for(square.bitboard(), |piece_moves| {
            for mv in piece_moves {
                let to = moves::to_standard(&self.board, mv).to;
                if !destinations.contains(&to) {
                    destinations.push(to);
                }
            }
            false
        });
        destinations
    }

    /// Play a move given in standard coordinates
    pub fn apply(&mut self, from: Square, to: Square, promotion: Option<Piece>) -> BoardResult<PlayedMove> {
        let mv = moves::resolve(&self.board, from, to, promotion)?;
        let played = moves::describe(&self.board, mv);

        let before = self.board.clone();
        self.board.try_play(mv).map_err(|_| BoardError::IllegalMove {
            from: from.to_string(),
            to: to.to_string(),
        })?;

        self.previous.push(before);
        self.history.push(played);
        self.hashes.push(self.board.hash());
        Ok(played)
    }

    /// Play a move written in long algebraic notation
    pub fn apply_uci(&mut self, text: &str) -> BoardResult<PlayedMove> {
        let mv = moves::parse_move_text(text)?;
        self.apply(mv.from, mv.to, mv.promotion)
    }

    /// Take back the last ply
    pub fn undo(&mut self) -> Option<PlayedMove> {
        let board = self.previous.pop()?;
        self.board = board;
        self.hashes.pop();
        self.history.pop()
    }

    /// Take back the last two plies, only when both exist
    pub fn undo_pair(&mut self) -> bool {
        if self.history.len() < 2 {
            return false;
        }
        self.undo();
        self.undo();
        true
    }

    /// Position encoding sent to the prediction endpoint
    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    /// History as `from+to` pairs joined by commas
    pub fn history_string(&self) -> String {
        self.history
            .iter()
            .map(PlayedMove::coordinates)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.board.status() {
            GameStatus::Won => {
                let winner = match self.board.side_to_move() {
                    Color::White => Color::Black,
                    Color::Black => Color::White,
                };
                return Some(Outcome::Checkmate { winner });
            }
            GameStatus::Drawn => {
                return Some(if self.board.halfmove_clock() >= 100 {
                    Outcome::FiftyMoves
                } else {
                    Outcome::Stalemate
                });
            }
            GameStatus::Ongoing => {}
        }

        if self.is_threefold_repetition() {
            return Some(Outcome::Repetition);
        }
        if self.is_insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        None
    }

    fn is_threefold_repetition(&self) -> bool {
        let current = self.board.hash();
        self.hashes.iter().filter(|&&h| h == current).count() >= 3
    }

    /// Bare kings, a single minor piece, or bishops all on one colour
    fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut bishop_shades = [false; 2];
        let mut bishops = 0;

        for square in Square::ALL {
            match self.board.piece_on(square) {
                None | Some(Piece::King) => {}
                Some(Piece::Knight) => knights += 1,
                Some(Piece::Bishop) => {
                    bishops += 1;
                    let shade = (square.file() as usize + square.rank() as usize) % 2;
                    bishop_shades[shade] = true;
                }
                Some(_) => return false,
            }
        }

        match (knights, bishops) {
            (0, 0) | (1, 0) => true,
            (0, _) => !(bishop_shades[0] && bishop_shades[1]),
            _ => false,
        }
    }

    /// Images for all 64 cells, for a full re-render
    pub fn frame(&self) -> BoardFrame {
        let mut frame = BoardFrame::empty();
        for square in Square::ALL {
            if let Some(p) = self.piece_at(square) {
                frame.set(square, PieceImage::Piece(p.color, p.piece));
            }
        }
        frame
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
