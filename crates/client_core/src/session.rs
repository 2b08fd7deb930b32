//! Interaction controller
//!
//! A `Session` owns everything one game needs: the board, the current
//! selection, the difficulty mode, the pending-request flag and the surface
//! that displays it. It is built when a game starts and dropped when the
//! client navigates away.
//!
//! Input arrives as plain method calls (`click`, `hint`, `undo`, ...). Work
//! that has to wait on the network is handed back to the caller as a
//! [`Followup`]; the caller performs it and reports the result through
//! [`Session::complete_prediction`] or [`Session::finish`]. The async
//! drivers at the bottom do exactly that for headless use.

use cozy_chess::Square;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::board::BoardState;
use crate::finish::{self, HistoryRecord, GAME_OVER_NOTICE, REPLY_FINISH_DELAY};
use crate::service::{MoveService, Prediction};
use crate::surface::{Highlight, Palette, Surface};
use crate::types::{Destination, Mode, PlayerColor, Status, Variant};

/// Notice shown when a prediction request fails
pub const REQUEST_FAILED_NOTICE: &str = "failed to request";

/// Mode used for hints, whatever the game's mode
pub const HINT_MODE: Mode = Mode::Hard;

/// Click state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected(Square),
}

/// What a prediction is for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// The opponent's move: applied and kept
    Reply,
    /// Applied, shown, then taken back
    Hint,
    /// Play board only: the suggestion is reported, never applied
    Probe,
}

/// A dispatched prediction request awaiting its result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionRequest {
    pub mode: Mode,
    pub fen: String,
    pub kind: RequestKind,
}

/// Work the caller must carry out on the session's behalf
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Followup {
    /// Send the request, then call `complete_prediction`
    Predict(PredictionRequest),
    /// Wait `delay`, then run the finish handling
    Finish { delay: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Active,
    /// Game over, finish handling scheduled
    Finishing,
    Finished,
}

/// Per-game settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SessionOptions {
    pub mode: Mode,
    pub player_color: PlayerColor,
    pub anonymous: bool,
    pub variant: Variant,
}

pub struct Session<S: Surface> {
    options: SessionOptions,
    board: BoardState,
    selection: Selection,
    /// Set from dispatch of a request until its completion is handled
    pending: bool,
    lifecycle: Lifecycle,
    surface: S,
}

impl<S: Surface> Session<S> {
    pub fn new(options: SessionOptions, surface: S) -> Self {
        Self::with_board(options, BoardState::new(), surface)
    }

    pub fn with_board(options: SessionOptions, board: BoardState, surface: S) -> Self {
        Self {
            options,
            board,
            selection: Selection::Idle,
            pending: false,
            lifecycle: Lifecycle::Active,
            surface,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn mode(&self) -> Mode {
        self.options.mode
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn palette(&self) -> Palette {
        Palette::for_variant(self.options.variant)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_finished(&self) -> bool {
        self.lifecycle == Lifecycle::Finished
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// First render; the service opens when the human plays black
    pub fn initialize(&mut self) -> Option<Followup> {
        self.render();
        self.surface.set_mode(self.options.mode);
        self.surface.set_status(Status::YourTurn);

        if self.options.variant == Variant::Game && self.options.player_color == PlayerColor::Black {
            return self
                .begin_prediction(self.options.mode, RequestKind::Reply)
                .map(Followup::Predict);
        }
        None
    }

    pub fn click(&mut self, square: Square) -> Option<Followup> {
        if self.pending || self.lifecycle != Lifecycle::Active {
            debug!(%square, "click ignored");
            return None;
        }

        match self.options.variant {
            Variant::Game => self.click_game(square),
            Variant::Play => {
                self.click_play(square);
                None
            }
        }
    }

    fn click_game(&mut self, square: Square) -> Option<Followup> {
        match self.selection {
            Selection::Idle => {
                if self.board.piece_at(square).is_none() {
                    return None;
                }
                let destinations = self.board.legal_destinations(square);
                if destinations.is_empty() {
                    return None;
                }

                self.surface.clear_paint();
                self.selection = Selection::Selected(square);
                self.surface.paint(square, Some(Highlight::Select));
                for to in destinations {
                    self.surface.paint(to, Some(Highlight::Legal));
                }
                debug!(%square, "selected");
                None
            }

            Selection::Selected(from) if from == square => {
                self.selection = Selection::Idle;
                self.surface.clear_paint();
                debug!(%square, "deselected");
                None
            }

            Selection::Selected(from) => {
                if !self.board.legal_destinations(from).contains(&square) {
                    return None;
                }

                let played = match self.board.apply(from, square, None) {
                    Ok(played) => played,
                    Err(e) => {
                        warn!(error = %e, "legal destination rejected by the rules engine");
                        return None;
                    }
                };
                info!(%played, "human move");

                self.selection = Selection::Idle;
                self.surface.clear_paint();
                self.render();

                if self.board.is_game_over() {
                    self.lifecycle = Lifecycle::Finishing;
                    return Some(Followup::Finish {
                        delay: Duration::ZERO,
                    });
                }

                self.begin_prediction(self.options.mode, RequestKind::Reply)
                    .map(Followup::Predict)
            }
        }
    }

    /// Play board: the click only moves the highlight
    fn click_play(&mut self, square: Square) {
        match self.selection {
            Selection::Idle => {
                self.selection = Selection::Selected(square);
                self.surface.paint(square, Some(Highlight::Select));
            }
            Selection::Selected(current) if current == square => {
                self.selection = Selection::Idle;
                self.surface.paint(square, None);
            }
            Selection::Selected(current) => {
                self.surface.paint(current, None);
                self.selection = Selection::Selected(square);
                self.surface.paint(square, Some(Highlight::Select));
            }
        }
    }

    pub fn toggle_mode(&mut self) {
        self.options.mode = self.options.mode.toggled();
        self.surface.set_mode(self.options.mode);
        debug!(mode = %self.options.mode, "mode changed");
    }

    /// Ask the service for a move without committing it
    pub fn hint(&mut self) -> Option<Followup> {
        if self.pending || self.lifecycle != Lifecycle::Active {
            return None;
        }
        if self.options.variant != Variant::Game {
            return None;
        }

        self.selection = Selection::Idle;
        self.surface.clear_paint();
        self.begin_prediction(HINT_MODE, RequestKind::Hint)
            .map(Followup::Predict)
    }

    /// Play board: ask for a suggestion in the current mode
    pub fn probe(&mut self) -> Option<Followup> {
        if self.pending || self.lifecycle != Lifecycle::Active {
            return None;
        }
        self.begin_prediction(self.options.mode, RequestKind::Probe)
            .map(Followup::Predict)
    }

    /// Take back the human's last move and the reply to it
    pub fn undo(&mut self) -> bool {
        if self.pending || self.lifecycle != Lifecycle::Active {
            return false;
        }
        if self.options.variant != Variant::Game || !self.board.undo_pair() {
            return false;
        }

        self.selection = Selection::Idle;
        self.render();
        self.surface.clear_paint();
        info!(plies = self.board.history().len(), "took back two plies");
        true
    }

    /// Dispatch guard: at most one request is ever outstanding
    pub fn begin_prediction(&mut self, mode: Mode, kind: RequestKind) -> Option<PredictionRequest> {
        if self.pending {
            debug!(?kind, "prediction refused, request already pending");
            return None;
        }

        self.surface.set_status(Status::Requesting);
        self.pending = true;

        let request = PredictionRequest {
            mode,
            fen: self.board.fen(),
            kind,
        };
        debug!(%mode, ?kind, fen = %request.fen, "prediction dispatched");
        Some(request)
    }

    /// Handle the end of a request, successful or not
    pub fn complete_prediction<E: Display>(
        &mut self,
        request: &PredictionRequest,
        result: Result<Prediction, E>,
    ) -> Option<Followup> {
        if !self.pending {
            warn!(kind = ?request.kind, "completion without a pending request ignored");
            return None;
        }

        let mut note = None;
        let followup = match result {
            Ok(prediction) if request.kind == RequestKind::Probe => {
                info!(action = %prediction.action, confidence = ?prediction.confidence, "suggestion received");
                note = Some(format!("suggested {}", prediction.action));
                None
            }
            Ok(prediction) => self.accept_prediction(request, &prediction),
            Err(e) => {
                warn!(error = %e, kind = ?request.kind, "prediction request failed");
                self.surface.alert(REQUEST_FAILED_NOTICE);
                None
            }
        };

        self.surface.set_status(Status::YourTurn);
        self.pending = false;

        if let Some(note) = note {
            self.surface.set_status(Status::Note(note));
        }
        followup
    }

    fn accept_prediction(&mut self, request: &PredictionRequest, prediction: &Prediction) -> Option<Followup> {
        let played = match self.board.apply_uci(&prediction.action) {
            Ok(played) => played,
            Err(e) => {
                warn!(error = %e, action = %prediction.action, "service move rejected");
                self.surface.alert(REQUEST_FAILED_NOTICE);
                return None;
            }
        };

        if request.kind == RequestKind::Hint {
            self.board.undo();
            info!(%played, "hint shown");
        } else {
            info!(%played, confidence = ?prediction.confidence, "service move");
        }

        self.render();
        self.surface.paint(played.from, Some(Highlight::Ai));
        self.surface.paint(played.to, Some(Highlight::Ai));

        if request.kind == RequestKind::Reply
            && self.lifecycle == Lifecycle::Active
            && self.board.is_game_over()
        {
            self.lifecycle = Lifecycle::Finishing;
            return Some(Followup::Finish {
                delay: REPLY_FINISH_DELAY,
            });
        }
        None
    }

    /// The record to submit, or `None` for anonymous sessions
    pub fn history_record(&self) -> Option<HistoryRecord> {
        if self.options.anonymous {
            return None;
        }
        Some(HistoryRecord::from_board(
            &self.board,
            self.options.mode,
            self.options.player_color,
        ))
    }

    /// Last step of the finish handling: notice, then leave
    pub fn conclude(&mut self) {
        if self.lifecycle == Lifecycle::Finished {
            return;
        }
        info!(outcome = ?self.board.outcome(), plies = self.board.history().len(), "game over");
        self.lifecycle = Lifecycle::Finished;
        self.surface.alert(GAME_OVER_NOTICE);
        self.surface
            .navigate(Destination::after_game(self.options.anonymous));
    }

    fn render(&mut self) {
        let frame = self.board.frame();
        self.surface.render(&frame);
    }

    /// Finish handling: submit the history when signed in, then conclude
    pub async fn finish(&mut self, service: &dyn MoveService) {
        if let Some(record) = self.history_record() {
            finish::submit_history(service, &record).await;
        }
        self.conclude();
    }

    /// Run follow-ups until none is left
    pub async fn drive(&mut self, service: &dyn MoveService, followup: Option<Followup>) {
        let mut next = followup;
        while let Some(step) = next.take() {
            next = match step {
                Followup::Predict(request) => {
                    let result = service.predict(request.mode, &request.fen).await;
                    self.complete_prediction(&request, result)
                }
                Followup::Finish { delay } => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    self.finish(service).await;
                    None
                }
            };
        }
    }

    /// Issue one prediction and handle everything that follows from it
    pub async fn predict(&mut self, service: &dyn MoveService, mode: Mode, kind: RequestKind) {
        let followup = self.begin_prediction(mode, kind).map(Followup::Predict);
        self.drive(service, followup).await;
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
