//! Small value types shared by the session, the service client and the UI

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty sent verbatim with every prediction request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Easy,
    Hard,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Easy, Mode::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Hard => "hard",
        }
    }

    pub fn toggled(self) -> Mode {
        match self {
            Mode::Easy => Mode::Hard,
            Mode::Hard => Mode::Easy,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Mode::Easy),
            "hard" => Ok(Mode::Hard),
            other => Err(format!("unknown mode `{other}` (expected easy or hard)")),
        }
    }
}

/// The human player's side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    #[default]
    White,
    Black,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 2] = [PlayerColor::White, PlayerColor::Black];

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerColor::White => "white",
            PlayerColor::Black => "black",
        }
    }

    pub fn to_engine(self) -> cozy_chess::Color {
        match self {
            PlayerColor::White => cozy_chess::Color::White,
            PlayerColor::Black => cozy_chess::Color::Black,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(PlayerColor::White),
            "black" => Ok(PlayerColor::Black),
            other => Err(format!("unknown color `{other}` (expected white or black)")),
        }
    }
}

/// Which flavour of board client is running.
///
/// `Game` is the full client. `Play` is the experimental board: clicks only
/// move a highlight around and predictions are reported, never applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Game,
    Play,
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "game" => Ok(Variant::Game),
            "play" => Ok(Variant::Play),
            other => Err(format!("unknown variant `{other}` (expected game or play)")),
        }
    }
}

/// Where the client goes once a game is over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Index,
    History,
}

impl Destination {
    pub fn after_game(anonymous: bool) -> Self {
        if anonymous {
            Destination::Index
        } else {
            Destination::History
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Destination::Index => "/",
            Destination::History => "/history",
        }
    }
}

/// Text of the status line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    YourTurn,
    Requesting,
    /// Free-form note, used by the play board to report a suggestion
    Note(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::YourTurn => f.write_str("your turn"),
            Status::Requesting => f.write_str("requesting..."),
            Status::Note(text) => f.write_str(text),
        }
    }
}
