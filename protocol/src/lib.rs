//! Messages exchanged between a transport and the game service.
//!
//! Each message is one JSON document; line-delimited transports put one per line.

use mines_core::{Difficulty, PlayerStats, Snapshot, Transition};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Accepted as a JSON string or a non-negative integer.
    #[serde(deserialize_with = "player_id")]
    pub player: String,
    #[serde(flatten)]
    pub command: Command,
}

impl Request {
    pub fn new(player: impl Into<String>, command: Command) -> Self {
        Self {
            player: player.into(),
            command,
        }
    }
}

fn player_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    NewGame {
        rows: usize,
        cols: usize,
        hazards: usize,
    },
    Preset {
        difficulty: Difficulty,
    },
    Reveal {
        row: usize,
        col: usize,
    },
    Show,
    Stats,
    Abandon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Game {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transition: Option<Transition>,
        snapshot: Snapshot,
    },
    Stats {
        player: String,
        stats: PlayerStats,
    },
    Abandoned {
        player: String,
        had_session: bool,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidConfiguration,
    InvalidCoordinate,
    NoActiveSession,
    BadRequest,
}

impl Response {
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }
}

pub fn decode_request(line: &str) -> serde_json::Result<Request> {
    serde_json::from_str(line.trim())
}

pub fn encode_response(response: &Response) -> serde_json::Result<String> {
    serde_json::to_string(response)
}
