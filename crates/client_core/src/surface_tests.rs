use super::*;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_image_file_names() {
    assert_eq!(PieceImage::Empty.file_name(), "Empty.png");
    assert_eq!(
        PieceImage::Piece(Color::White, Piece::Knight).file_name(),
        "WhiteKnight.png"
    );
    assert_eq!(
        PieceImage::Piece(Color::Black, Piece::Pawn).path_in(Path::new("assets")),
        Path::new("assets").join("BlackPawn.png")
    );
}

#[test]
fn test_square_colours() {
    let palette = Palette::GAME;
    assert_eq!(palette.square(sq("a1")), palette.dark_square);
    assert_eq!(palette.square(sq("h1")), palette.light_square);
    assert_eq!(palette.square(sq("e4")), palette.light_square);
}

#[test]
fn test_cleared_cells_per_variant() {
    // Game board clears to a transparent tint, play board to the square colour
    let game = Palette::for_variant(Variant::Game);
    assert_eq!(game.resolve(sq("a1"), None).a, 0);

    let play = Palette::for_variant(Variant::Play);
    assert_eq!(play.resolve(sq("a1"), None), play.dark_square);
    assert_eq!(play.resolve(sq("a1"), Some(Highlight::Select)), play.select);
}

#[test]
fn test_frame_surface_tracks_state() {
    let mut surface = FrameSurface::default();

    surface.paint(sq("e2"), Some(Highlight::Select));
    surface.paint(sq("e4"), Some(Highlight::Legal));
    assert_eq!(surface.squares_with(Highlight::Legal), vec![sq("e4")]);

    surface.clear_paint();
    assert!(!surface.has_highlights());

    surface.render(&BoardFrame::empty());
    surface.render(&BoardFrame::empty());
    assert_eq!(surface.renders, 2);

    surface.alert("first");
    surface.alert("second");
    assert_eq!(surface.dismiss_alert().as_deref(), Some("first"));
    assert_eq!(surface.dismiss_alert().as_deref(), Some("second"));
    assert_eq!(surface.dismiss_alert(), None);
}
