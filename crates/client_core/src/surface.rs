//! Render target for a session
//!
//! A surface is whatever shows the board: 64 cells each holding a piece
//! image and an optional tint, a status line, a mode label, blocking alerts
//! and navigation. The session drives it; it never reads back from it.

use cozy_chess::{Color, Piece, Square};
use std::path::{Path, PathBuf};

use crate::types::{Destination, Mode, Status, Variant};

/// The image shown in one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PieceImage {
    #[default]
    Empty,
    Piece(Color, Piece),
}

impl PieceImage {
    /// `"<Color><Piece>.png"` or `"Empty.png"`
    pub fn file_name(&self) -> String {
        match self {
            PieceImage::Empty => "Empty.png".to_string(),
            PieceImage::Piece(color, piece) => {
                format!("{}{}.png", color_name(*color), piece_name(*piece))
            }
        }
    }

    pub fn path_in(&self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(self.file_name())
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn piece_name(piece: Piece) -> &'static str {
    match piece {
        Piece::King => "King",
        Piece::Queen => "Queen",
        Piece::Rook => "Rook",
        Piece::Bishop => "Bishop",
        Piece::Knight => "Knight",
        Piece::Pawn => "Pawn",
    }
}

/// Images for every cell, indexed like `Square::ALL`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardFrame {
    cells: [PieceImage; 64],
}

impl BoardFrame {
    pub fn empty() -> Self {
        Self {
            cells: [PieceImage::Empty; 64],
        }
    }

    pub fn set(&mut self, square: Square, image: PieceImage) {
        self.cells[square as usize] = image;
    }

    pub fn get(&self, square: Square) -> PieceImage {
        self.cells[square as usize]
    }
}

/// Why a cell is tinted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    Select,
    Legal,
    Ai,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Tint colours of one board variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub select: Rgba,
    pub legal: Rgba,
    pub ai: Rgba,
    /// Tint of a cleared cell; `None` restores the plain square colour
    pub cleared: Option<Rgba>,
    pub light_square: Rgba,
    pub dark_square: Rgba,
}

impl Palette {
    pub const GAME: Palette = Palette {
        select: Rgba::new(0xFF, 0xFF, 0x00, 0x80),
        legal: Rgba::new(0xFF, 0x00, 0x00, 0x80),
        ai: Rgba::new(0x00, 0x00, 0xFF, 0x80),
        cleared: Some(Rgba::new(0x00, 0x00, 0x00, 0x00)),
        light_square: Rgba::new(0xEE, 0xEE, 0xD2, 0xFF),
        dark_square: Rgba::new(0x76, 0x96, 0x56, 0xFF),
    };

    pub const PLAY: Palette = Palette {
        select: Rgba::new(0xFF, 0xFF, 0x00, 0xFF),
        legal: Rgba::new(0xFF, 0x00, 0x00, 0x80),
        ai: Rgba::new(0x00, 0x00, 0xFF, 0x80),
        cleared: None,
        light_square: Rgba::new(0xEE, 0xEE, 0xD2, 0xFF),
        dark_square: Rgba::new(0x76, 0x96, 0x56, 0xFF),
    };

    pub fn for_variant(variant: Variant) -> Palette {
        match variant {
            Variant::Game => Palette::GAME,
            Variant::Play => Palette::PLAY,
        }
    }

    pub fn tint(&self, highlight: Highlight) -> Rgba {
        match highlight {
            Highlight::Select => self.select,
            Highlight::Legal => self.legal,
            Highlight::Ai => self.ai,
        }
    }

    /// Plain colour of a square; a1 is dark
    pub fn square(&self, square: Square) -> Rgba {
        if (square.file() as usize + square.rank() as usize) % 2 == 0 {
            self.dark_square
        } else {
            self.light_square
        }
    }

    /// Colour a cell should show with the given highlight
    pub fn resolve(&self, square: Square, highlight: Option<Highlight>) -> Rgba {
        match highlight {
            Some(h) => self.tint(h),
            None => self.cleared.unwrap_or_else(|| self.square(square)),
        }
    }
}

/// Operations a session performs on whatever displays it
pub trait Surface {
    /// Full re-render of all 64 images
    fn render(&mut self, frame: &BoardFrame);

    fn paint(&mut self, square: Square, highlight: Option<Highlight>);

    fn set_status(&mut self, status: Status);

    fn set_mode(&mut self, mode: Mode);

    /// Blocking notice; the caller does not continue until it is dismissed
    fn alert(&mut self, message: &str);

    fn navigate(&mut self, destination: Destination);

    fn clear_paint(&mut self) {
        for square in Square::ALL {
            self.paint(square, None);
        }
    }
}

/// In-memory surface: keeps the last state of every cell
#[derive(Clone, Debug)]
pub struct FrameSurface {
    pub frame: BoardFrame,
    pub highlights: [Option<Highlight>; 64],
    pub status: Status,
    pub mode: Mode,
    /// Alerts not yet dismissed, oldest first
    pub alerts: Vec<String>,
    pub destination: Option<Destination>,
    /// Number of full re-renders so far
    pub renders: usize,
}

impl Default for FrameSurface {
    fn default() -> Self {
        Self {
            frame: BoardFrame::empty(),
            highlights: [None; 64],
            status: Status::YourTurn,
            mode: Mode::default(),
            alerts: Vec::new(),
            destination: None,
            renders: 0,
        }
    }
}

impl FrameSurface {
    pub fn highlight(&self, square: Square) -> Option<Highlight> {
        self.highlights[square as usize]
    }

    pub fn image(&self, square: Square) -> PieceImage {
        self.frame.get(square)
    }

    /// Squares currently carrying `highlight`
    pub fn squares_with(&self, highlight: Highlight) -> Vec<Square> {
        Square::ALL
            .into_iter()
            .filter(|&sq| self.highlight(sq) == Some(highlight))
            .collect()
    }

    pub fn has_highlights(&self) -> bool {
        self.highlights.iter().any(Option::is_some)
    }

    pub fn dismiss_alert(&mut self) -> Option<String> {
        if self.alerts.is_empty() {
            None
        } else {
            Some(self.alerts.remove(0))
        }
    }
}

impl Surface for FrameSurface {
    fn render(&mut self, frame: &BoardFrame) {
        self.frame = frame.clone();
        self.renders += 1;
    }

    fn paint(&mut self, square: Square, highlight: Option<Highlight>) {
        self.highlights[square as usize] = highlight;
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, destination: Destination) {
        self.destination = Some(destination);
    }
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod surface_tests;
