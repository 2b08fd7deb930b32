//! Chess board widget rendering

use crate::styles::{self, SQUARE_SIZE};
use client_core::cozy_chess::{File, Rank, Square};
use client_core::{FrameSurface, Palette};
use iced::widget::{button, column, container, image, row};
use iced::{Color, Element, Length};
use std::path::Path;

/// Message type for board interactions
#[derive(Debug, Clone)]
pub enum BoardMessage {
    SquareClicked(Square),
}

/// Renders the last frame and tints a session drew on its surface
pub struct BoardView<'a> {
    surface: &'a FrameSurface,
    palette: Palette,
    assets_dir: &'a Path,
    flipped: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(surface: &'a FrameSurface, palette: Palette, assets_dir: &'a Path, flipped: bool) -> Self {
        Self {
            surface,
            palette,
            assets_dir,
            flipped,
        }
    }

    /// Create the board view element
    pub fn view(&self) -> Element<'a, BoardMessage> {
        let mut board_column = column![].spacing(0);

        for rank in 0..8 {
            let display_rank = if self.flipped { rank } else { 7 - rank };
            let mut rank_row = row![].spacing(0);

            for file in 0..8 {
                let display_file = if self.flipped { 7 - file } else { file };
                let sq = Square::new(File::index(display_file), Rank::index(display_rank));
                rank_row = rank_row.push(self.render_square(sq));
            }

            board_column = board_column.push(rank_row);
        }

        container(board_column)
            .style(|_theme| container::Style {
                border: iced::Border {
                    color: styles::BOARD_BORDER,
                    width: 2.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    /// Background colour of a cell: square colour with the current tint on top
    fn cell_color(&self, sq: Square) -> Color {
        let base = styles::to_color(self.palette.square(sq));
        let tint = match self.surface.highlight(sq) {
            Some(highlight) => Some(self.palette.tint(highlight)),
            None => self.palette.cleared,
        };
        match tint {
            Some(tint) => styles::blend_colors(base, styles::to_color(tint)),
            None => base,
        }
    }

    fn render_square(&self, sq: Square) -> Element<'a, BoardMessage> {
        let bg_color = self.cell_color(sq);
        let handle = image::Handle::from_path(self.surface.image(sq).path_in(self.assets_dir));

        button(
            container(image(handle).width(Length::Fill).height(Length::Fill))
                .width(SQUARE_SIZE)
                .height(SQUARE_SIZE)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .width(SQUARE_SIZE)
        .height(SQUARE_SIZE)
        .padding(0)
        .style(move |_theme, status| {
            let hover_overlay = match status {
                button::Status::Hovered => 0.1,
                button::Status::Pressed => 0.2,
                _ => 0.0,
            };
            button::Style {
                background: Some(iced::Background::Color(if hover_overlay > 0.0 {
                    styles::blend_colors(bg_color, Color::from_rgba(1.0, 1.0, 1.0, hover_overlay))
                } else {
                    bg_color
                })),
                border: iced::Border::default(),
                text_color: Color::BLACK,
                ..Default::default()
            }
        })
        .on_press(BoardMessage::SquareClicked(sq))
        .into()
    }
}
