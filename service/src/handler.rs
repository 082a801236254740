use mines_core::{GameConfig, GameError};
use mines_protocol::{Command, ErrorKind, Request, Response};

use crate::{GameService, PlayerId, ServiceError};

impl From<&ServiceError> for ErrorKind {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::Game(GameError::InvalidConfiguration { .. }) => Self::InvalidConfiguration,
            ServiceError::Game(GameError::InvalidCoordinate(..)) => Self::InvalidCoordinate,
            ServiceError::NoActiveSession(_) => Self::NoActiveSession,
        }
    }
}

impl GameService {
    /// Runs one protocol request. Failures come back as [`Response::Error`].
    pub fn handle(&self, request: Request) -> Response {
        let player = PlayerId::from(request.player);
        self.dispatch(&player, request.command)
            .unwrap_or_else(|err| Response::error(ErrorKind::from(&err), err.to_string()))
    }

    fn dispatch(&self, player: &PlayerId, command: Command) -> Result<Response, ServiceError> {
        Ok(match command {
            Command::NewGame {
                rows,
                cols,
                hazards,
            } => {
                let config = GameConfig::new(rows, cols, hazards)?;
                Response::Game {
                    transition: None,
                    snapshot: self.new_game(player, config),
                }
            }
            Command::Preset { difficulty } => Response::Game {
                transition: None,
                snapshot: self.new_game(player, difficulty.config()),
            },
            Command::Reveal { row, col } => {
                let (transition, snapshot) = self.reveal(player, row, col)?;
                Response::Game {
                    transition: Some(transition),
                    snapshot,
                }
            }
            Command::Show => Response::Game {
                transition: None,
                snapshot: self.snapshot(player)?,
            },
            Command::Stats => Response::Stats {
                player: player.to_string(),
                stats: self.stats(player),
            },
            Command::Abandon => Response::Abandoned {
                player: player.to_string(),
                had_session: self.abandon(player),
            },
        })
    }
}
