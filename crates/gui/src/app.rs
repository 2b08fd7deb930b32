//! Main application state and logic

use crate::board::{BoardMessage, BoardView};
use crate::styles::{self, PANEL_WIDTH};

use client_core::finish;
use client_core::{
    Destination, Followup, FrameSurface, Mode, MoveService, PlayerColor, Prediction,
    PredictionRequest, Session, SessionOptions, Variant,
};
use iced::widget::{
    button, center, checkbox, column, container, horizontal_rule, opaque, pick_list, row,
    scrollable, stack, text, vertical_space,
};
use iced::{Element, Length, Subscription, Task, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything the application needs at startup
pub struct Launch {
    pub options: SessionOptions,
    pub assets_dir: PathBuf,
    pub service: Arc<dyn MoveService>,
}

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Game,
    /// Where a finished game sends the player
    Lobby(Destination),
}

/// Main application state
pub struct ChessApp {
    screen: Screen,
    session: Session<FrameSurface>,
    /// Settings for the next game, edited in the lobby
    options: SessionOptions,
    /// Bumped for every new session so stale completions can be dropped
    game_id: u64,
    assets_dir: PathBuf,
    service: Arc<dyn MoveService>,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Board interaction
    Board(BoardMessage),

    // Game controls
    ToggleMode,
    Hint,
    Probe,
    Undo,
    DismissAlert,

    // Network completions
    PredictionDone {
        game_id: u64,
        request: PredictionRequest,
        result: Result<Prediction, String>,
    },
    FinishDue(u64),
    HistorySubmitted(u64),

    // Lobby
    NewGame,
    ColorSelected(PlayerColor),
    ModeSelected(Mode),
    SignedInToggled(bool),
}

impl ChessApp {
    pub fn new(launch: Launch) -> (Self, Task<Message>) {
        let mut app = Self {
            screen: Screen::Game,
            session: Session::new(launch.options, FrameSurface::default()),
            options: launch.options,
            game_id: 0,
            assets_dir: launch.assets_dir,
            service: launch.service,
        };
        let followup = app.session.initialize();
        let task = app.run(followup);
        (app, task)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::none()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Board(BoardMessage::SquareClicked(sq)) => {
                if self.blocked() {
                    return Task::none();
                }
                let followup = self.session.click(sq);
                self.run(followup)
            }

            Message::ToggleMode => {
                self.session.toggle_mode();
                Task::none()
            }

            Message::Hint => {
                if self.blocked() {
                    return Task::none();
                }
                let followup = self.session.hint();
                self.run(followup)
            }

            Message::Probe => {
                if self.blocked() {
                    return Task::none();
                }
                let followup = self.session.probe();
                self.run(followup)
            }

            Message::Undo => {
                if !self.blocked() {
                    self.session.undo();
                }
                Task::none()
            }

            Message::PredictionDone {
                game_id,
                request,
                result,
            } => {
                if game_id != self.game_id {
                    debug!(game_id, "completion for a discarded game dropped");
                    return Task::none();
                }
                let followup = self.session.complete_prediction(&request, result);
                self.run(followup)
            }

            Message::FinishDue(game_id) => {
                if game_id != self.game_id {
                    return Task::none();
                }
                match self.session.history_record() {
                    Some(record) => {
                        let service = Arc::clone(&self.service);
                        Task::perform(
                            async move { finish::submit_history(service.as_ref(), &record).await },
                            move |()| Message::HistorySubmitted(game_id),
                        )
                    }
                    None => {
                        self.session.conclude();
                        Task::none()
                    }
                }
            }

            Message::HistorySubmitted(game_id) => {
                if game_id == self.game_id {
                    self.session.conclude();
                }
                Task::none()
            }

            Message::DismissAlert => {
                self.session.surface_mut().dismiss_alert();
                if self.session.surface().alerts.is_empty() {
                    if let Some(destination) = self.session.surface().destination {
                        info!(path = destination.path(), "leaving finished game");
                        self.screen = Screen::Lobby(destination);
                    }
                }
                Task::none()
            }

            Message::NewGame => {
                self.game_id += 1;
                self.session = Session::new(self.options, FrameSurface::default());
                self.screen = Screen::Game;
                info!(mode = %self.options.mode, color = %self.options.player_color, "new game");
                let followup = self.session.initialize();
                self.run(followup)
            }

            Message::ColorSelected(color) => {
                self.options.player_color = color;
                Task::none()
            }

            Message::ModeSelected(mode) => {
                self.options.mode = mode;
                Task::none()
            }

            Message::SignedInToggled(signed_in) => {
                self.options.anonymous = !signed_in;
                Task::none()
            }
        }
    }

    /// Input waits while an alert is open
    fn blocked(&self) -> bool {
        self.screen != Screen::Game || !self.session.surface().alerts.is_empty()
    }

    /// Turn a session follow-up into an async task
    fn run(&mut self, followup: Option<Followup>) -> Task<Message> {
        let game_id = self.game_id;
        match followup {
            None => Task::none(),
            Some(Followup::Predict(request)) => {
                let service = Arc::clone(&self.service);
                Task::perform(
                    async move {
                        let result = service
                            .predict(request.mode, &request.fen)
                            .await
                            .map_err(|e| e.to_string());
                        (request, result)
                    },
                    move |(request, result)| Message::PredictionDone {
                        game_id,
                        request,
                        result,
                    },
                )
            }
            Some(Followup::Finish { delay }) => {
                Task::perform(tokio::time::sleep(delay), move |()| Message::FinishDue(game_id))
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self.screen {
            Screen::Game => self.game_view(),
            Screen::Lobby(destination) => self.lobby_view(destination),
        }
    }

    fn game_view(&self) -> Element<'_, Message> {
        let flipped = self.session.options().player_color == PlayerColor::Black;
        let board = BoardView::new(
            self.session.surface(),
            self.session.palette(),
            &self.assets_dir,
            flipped,
        )
        .view()
        .map(Message::Board);

        let content: Element<'_, Message> = row![
            board,
            container(self.control_panel())
                .width(PANEL_WIDTH)
                .height(Length::Fill)
                .padding(15),
        ]
        .spacing(20)
        .padding(20)
        .into();

        match self.session.surface().alerts.first() {
            Some(alert) => modal(content, alert),
            None => content,
        }
    }

    /// Render the control panel
    fn control_panel(&self) -> Element<'_, Message> {
        let surface = self.session.surface();

        let mode_btn = button(text(format!("Mode: {}", surface.mode)))
            .on_press(Message::ToggleMode)
            .style(button::primary)
            .width(Length::Fill);

        let mut controls = column![mode_btn].spacing(5);
        match self.session.options().variant {
            Variant::Game => {
                controls = controls
                    .push(
                        button(text("Hint"))
                            .on_press(Message::Hint)
                            .style(button::secondary)
                            .width(Length::Fill),
                    )
                    .push(
                        button(text("Undo"))
                            .on_press(Message::Undo)
                            .style(button::secondary)
                            .width(Length::Fill),
                    );
            }
            Variant::Play => {
                controls = controls.push(
                    button(text("Suggest"))
                        .on_press(Message::Probe)
                        .style(button::secondary)
                        .width(Length::Fill),
                );
            }
        }

        let moves_title = text("Moves").size(16);
        let mut moves_list = column![].spacing(2);
        for (i, chunk) in self.session.board().history().chunks(2).enumerate() {
            let white_move = chunk[0].to_string();
            let black_move = chunk.get(1).map(|m| m.to_string()).unwrap_or_default();
            moves_list =
                moves_list.push(text(format!("{}. {} {}", i + 1, white_move, black_move)).size(13));
        }

        column![
            controls,
            vertical_space().height(20),
            horizontal_rule(1),
            vertical_space().height(10),
            text(surface.status.to_string()).size(16),
            vertical_space().height(20),
            horizontal_rule(1),
            vertical_space().height(10),
            moves_title,
            scrollable(moves_list).height(Length::Fill),
        ]
        .spacing(5)
        .into()
    }

    /// Where finished games land; starts the next one
    fn lobby_view(&self, destination: Destination) -> Element<'_, Message> {
        let color_picker = pick_list(
            PlayerColor::ALL,
            Some(self.options.player_color),
            Message::ColorSelected,
        )
        .width(Length::Fill);

        let mode_picker = pick_list(Mode::ALL, Some(self.options.mode), Message::ModeSelected)
            .width(Length::Fill);

        let signed_in = checkbox("Signed in", !self.options.anonymous)
            .on_toggle(Message::SignedInToggled);

        let panel = column![
            text(format!("Now at {}", destination.path())).size(14),
            vertical_space().height(20),
            text("Play as").size(14),
            color_picker,
            vertical_space().height(10),
            text("Mode").size(14),
            mode_picker,
            vertical_space().height(10),
            signed_in,
            vertical_space().height(20),
            button(text("New Game"))
                .on_press(Message::NewGame)
                .style(button::primary)
                .width(Length::Fill),
        ]
        .spacing(5)
        .width(PANEL_WIDTH);

        center(panel).into()
    }
}

/// Blocking notice drawn over `base`
fn modal<'a>(base: Element<'a, Message>, message: &'a str) -> Element<'a, Message> {
    let dialog = container(
        column![
            text(message).size(18),
            button(text("OK"))
                .on_press(Message::DismissAlert)
                .style(button::primary),
        ]
        .spacing(15),
    )
    .padding(20)
    .style(container::rounded_box);

    stack![
        base,
        opaque(center(opaque(dialog)).style(|_theme| container::Style {
            background: Some(styles::MODAL_BACKDROP.into()),
            ..Default::default()
        }))
    ]
    .into()
}
