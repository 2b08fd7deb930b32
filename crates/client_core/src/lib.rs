//! Client core for the remote-AI chess board
//!
//! The board is played against a remote prediction service:
//! - `board` holds the position and delegates the rules to `cozy-chess`
//! - `session` is the click state machine and request guard
//! - `service` talks to `/predict` and `/add-history`
//! - `surface` is the render target a session draws on
//!
//! Front-ends (the iced GUI, the mode match runner) only wire input and
//! network completions into a [`Session`].

pub mod board;
pub mod config;
pub mod error;
pub mod finish;
pub mod moves;
pub mod service;
pub mod session;
pub mod surface;
pub mod types;

pub use board::{BoardState, Outcome};
pub use config::ClientConfig;
pub use error::{BoardError, ConfigError, ServiceError};
pub use finish::{HistoryRecord, GAME_OVER_NOTICE, REPLY_FINISH_DELAY};
pub use moves::{ColoredPiece, PlayedMove};
pub use service::{HttpMoveService, MoveService, Prediction, REQUEST_TIMEOUT};
pub use session::{
    Followup, PredictionRequest, RequestKind, Selection, Session, SessionOptions, HINT_MODE,
    REQUEST_FAILED_NOTICE,
};
pub use surface::{BoardFrame, FrameSurface, Highlight, Palette, PieceImage, Rgba, Surface};
pub use types::{Destination, Mode, PlayerColor, Status, Variant};

// Rules-engine types appear in the public API
pub use cozy_chess;
