use std::collections::HashMap;
use std::sync::Arc;

use mines_core::{Board, BoardGenerator, GameConfig, GameSession, RandomBoardGenerator};
use parking_lot::Mutex;

use crate::{PlayerId, Result, ServiceError};

/// Shared handle to one live session; locking it serializes that player's moves.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// At most one live session per player.
///
/// The map lock only guards lookups and replacements. Game mutation happens
/// under the session's own lock, so players never wait on each other.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<PlayerId, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a board and makes it the player's session, dropping any previous one.
    pub fn start_new_game(&self, player: &PlayerId, config: GameConfig, seed: u64) -> SessionHandle {
        let board = RandomBoardGenerator::new(seed).generate(config);
        self.insert(player, board)
    }

    pub fn insert(&self, player: &PlayerId, board: Board) -> SessionHandle {
        let handle = Arc::new(Mutex::new(GameSession::new(board)));
        let previous = self
            .sessions
            .lock()
            .insert(player.clone(), Arc::clone(&handle));
        if previous.is_some() {
            log::debug!("player {} abandoned their previous game", player);
        }
        handle
    }

    pub fn active_session(&self, player: &PlayerId) -> Result<SessionHandle> {
        self.sessions
            .lock()
            .get(player)
            .cloned()
            .ok_or_else(|| ServiceError::NoActiveSession(player.clone()))
    }

    /// Returns whether a session was removed.
    pub fn end_session(&self, player: &PlayerId) -> bool {
        self.sessions.lock().remove(player).is_some()
    }

    /// Removes the player's session only if it is still `handle`.
    pub fn end_session_if(&self, player: &PlayerId, handle: &SessionHandle) -> bool {
        let mut sessions = self.sessions.lock();
        match sessions.get(player) {
            Some(current) if Arc::ptr_eq(current, handle) => {
                sessions.remove(player);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::new(4, 4, 3).unwrap()
    }

    #[test]
    fn missing_player_has_no_session() {
        let registry = SessionRegistry::new();
        let player = PlayerId::from("nobody");

        assert_eq!(
            registry.active_session(&player).unwrap_err(),
            ServiceError::NoActiveSession(player)
        );
    }

    #[test]
    fn new_game_replaces_previous_session() {
        let registry = SessionRegistry::new();
        let player = PlayerId::from(17);

        let first = registry.start_new_game(&player, config(), 1);
        first.lock().reveal((0, 0)).unwrap();
        let second = registry.start_new_game(&player, config(), 2);

        let active = registry.active_session(&player).unwrap();
        assert!(Arc::ptr_eq(&active, &second));
        assert!(!Arc::ptr_eq(&active, &first));
        assert_eq!(active.lock().revealed_count(), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn end_session_is_idempotent() {
        let registry = SessionRegistry::new();
        let player = PlayerId::from("a");
        registry.start_new_game(&player, config(), 0);

        assert!(registry.end_session(&player));
        assert!(!registry.end_session(&player));
        assert!(registry.is_empty());
    }

    #[test]
    fn guarded_end_keeps_newer_session() {
        let registry = SessionRegistry::new();
        let player = PlayerId::from("a");
        let old = registry.start_new_game(&player, config(), 0);
        let new = registry.start_new_game(&player, config(), 1);

        assert!(!registry.end_session_if(&player, &old));
        assert!(Arc::ptr_eq(&registry.active_session(&player).unwrap(), &new));
        assert!(registry.end_session_if(&player, &new));
        assert!(registry.is_empty());
    }

    #[test]
    fn players_are_independent() {
        let registry = SessionRegistry::new();
        let alice = PlayerId::from("alice");
        let bob = PlayerId::from("bob");
        registry.start_new_game(&alice, config(), 3);
        registry.start_new_game(&bob, config(), 3);

        registry.end_session(&alice);

        assert!(registry.active_session(&alice).is_err());
        assert!(registry.active_session(&bob).is_ok());
    }
}
