//! Typed moves at the boundary with the rules engine
//!
//! The engine encodes castling as "king takes own rook" (`e1h1`). Everything
//! outside this module speaks standard coordinates (`e1g1`), so conversion
//! happens here in both directions.

use cozy_chess::{Board, Color, File, Move, Piece, Square};
use std::fmt;

use crate::error::{BoardError, BoardResult};

/// A piece together with its owner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColoredPiece {
    pub color: Color,
    pub piece: Piece,
}

/// A move that has been validated against and played on a position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayedMove {
    pub from: Square,
    /// Destination in standard coordinates (castling: the king's square)
    pub to: Square,
    pub piece: Piece,
    pub promotion: Option<Piece>,
    pub captured: Option<Piece>,
}

impl PlayedMove {
    /// `from` + `to`, the form used for history serialization
    pub fn coordinates(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for PlayedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promotion_char(promo))?;
        }
        Ok(())
    }
}

fn promotion_char(piece: Piece) -> char {
    match piece {
        Piece::Queen => 'q',
        Piece::Rook => 'r',
        Piece::Bishop => 'b',
        Piece::Knight => 'n',
        _ => 'q',
    }
}

/// Convert an engine move to standard coordinates
pub fn to_standard(board: &Board, mv: Move) -> Move {
    let king_castles = board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == board.color_on(mv.from);
    if !king_castles {
        return mv;
    }
    let file = if (mv.to.file() as i8) > (mv.from.file() as i8) {
        File::G
    } else {
        File::C
    };
    Move {
        from: mv.from,
        to: Square::new(file, mv.from.rank()),
        promotion: None,
    }
}

/// Convert a standard-coordinate move to the engine's encoding
pub fn to_engine(board: &Board, mv: Move) -> Move {
    if board.piece_on(mv.from) != Some(Piece::King) {
        return mv;
    }
    let from_file = mv.from.file() as i8;
    let to_file = mv.to.file() as i8;
    if mv.from.rank() != mv.to.rank() || (to_file - from_file).abs() != 2 {
        return mv;
    }
    let rook_file = if to_file > from_file { File::H } else { File::A };
    Move {
        from: mv.from,
        to: Square::new(rook_file, mv.from.rank()),
        promotion: None,
    }
}

/// Parse long algebraic notation (`e2e4`, `e7e8q`, `e1g1`).
///
/// Only the shape is checked here; legality is up to the caller.
pub fn parse_move_text(text: &str) -> BoardResult<Move> {
    let trimmed = text.trim();
    trimmed
        .to_ascii_lowercase()
        .parse::<Move>()
        .map_err(|_| BoardError::MalformedMove {
            text: trimmed.to_string(),
        })
}

/// Resolve a standard-coordinate move against the legal moves of `board`.
///
/// Sloppy: a promotion without a piece defaults to a queen, and a piece on
/// a non-promoting move is ignored.
pub fn resolve(board: &Board, from: Square, to: Square, promotion: Option<Piece>) -> BoardResult<Move> {
    let wanted = to_engine(
        board,
        Move {
            from,
            to,
            promotion: None,
        },
    );

    let mut candidates = Vec::new();
    board.generate_moves_for(from.bitboard(), |moves| {
        candidates.extend(moves.into_iter().filter(|m| m.to == wanted.to));
        false
    });

    let chosen = match candidates.len() {
        0 => None,
        1 => candidates.first().copied(),
        // Several candidates only happen for promotions
        _ => {
            let promo = promotion.unwrap_or(Piece::Queen);
            candidates.iter().copied().find(|m| m.promotion == Some(promo))
        }
    };

    chosen.ok_or_else(|| BoardError::IllegalMove {
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Describe `mv` (engine encoding, legal on `board`) before it is played
pub fn describe(board: &Board, mv: Move) -> PlayedMove {
    let standard = to_standard(board, mv);
    // Caller guarantees a legal move, so the origin holds a piece
    let piece = board.piece_on(mv.from).unwrap_or(Piece::Pawn);
    let mover = board.color_on(mv.from);

    let captured = match board.color_on(standard.to) {
        Some(color) if Some(color) != mover => board.piece_on(standard.to),
        Some(_) => None,
        None if piece == Piece::Pawn && standard.from.file() != standard.to.file() => {
            Some(Piece::Pawn)
        }
        None => None,
    };

    PlayedMove {
        from: standard.from,
        to: standard.to,
        piece,
        promotion: mv.promotion,
        captured,
    }
}
