use mines_core::{Board, Coord, GameConfig, GameError, HazardDisplay, PlayerStats, Snapshot, Transition};

use crate::{PlayerId, Result, SessionHandle, SessionRegistry, Settings, StatsStore, StoreError};

/// Entry point for transports: starts games, applies reveals, and books finished games.
#[derive(Debug)]
pub struct GameService {
    registry: SessionRegistry,
    stats: StatsStore,
    hazard_display: HazardDisplay,
}

impl GameService {
    pub fn new(stats: StatsStore) -> Self {
        Self {
            registry: SessionRegistry::new(),
            stats,
            hazard_display: HazardDisplay::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let stats = match &settings.stats_path {
            Some(path) => StatsStore::open(path),
            None => StatsStore::in_memory(),
        };
        Self::new(stats).with_hazard_display(settings.hazard_display)
    }

    pub fn with_hazard_display(mut self, hazard_display: HazardDisplay) -> Self {
        self.hazard_display = hazard_display;
        self
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn stats_store(&self) -> &StatsStore {
        &self.stats
    }

    /// Starts a game on a fresh random board, replacing any unfinished one.
    pub fn new_game(&self, player: &PlayerId, config: GameConfig) -> Snapshot {
        self.new_game_with_seed(player, config, rand::random())
    }

    pub fn new_game_with_seed(&self, player: &PlayerId, config: GameConfig, seed: u64) -> Snapshot {
        log::info!(
            "player {} starts a {}x{} game with {} hazards",
            player,
            config.rows(),
            config.cols(),
            config.hazards()
        );
        let handle = self.registry.start_new_game(player, config, seed);
        self.render(&handle)
    }

    pub fn new_game_with_board(&self, player: &PlayerId, board: Board) -> Snapshot {
        log::info!("player {} starts a game on a prepared board", player);
        let handle = self.registry.insert(player, board);
        self.render(&handle)
    }

    /// Reveals `(row, col)` in the player's game. Ending the game books its result
    /// and closes the session; the returned snapshot shows the final board.
    pub fn reveal(&self, player: &PlayerId, row: usize, col: usize) -> Result<(Transition, Snapshot)> {
        let handle = self.registry.active_session(player)?;
        let coords = match (Coord::try_from(row), Coord::try_from(col)) {
            (Ok(row), Ok(col)) => (row, col),
            _ => return Err(GameError::InvalidCoordinate(row, col).into()),
        };

        let (transition, snapshot, outcome) = {
            let mut session = handle.lock();
            let transition = session.reveal(coords)?;
            let snapshot = Snapshot::from_session(&session, self.hazard_display);
            let outcome = transition
                .is_terminal()
                .then(|| (session.is_won(), u64::from(session.revealed_count())));
            (transition, snapshot, outcome)
        };
        log::debug!("player {} revealed ({}, {}): {:?}", player, row, col, transition);

        if let Some((won, cells_revealed)) = outcome {
            self.registry.end_session_if(player, &handle);
            let stats = self.stats.record_result(player, won, cells_revealed);
            log::info!(
                "player {} {} after revealing {} cells ({} of {} games won)",
                player,
                if won { "won" } else { "lost" },
                cells_revealed,
                stats.wins,
                stats.games_played
            );
        }

        Ok((transition, snapshot))
    }

    pub fn snapshot(&self, player: &PlayerId) -> Result<Snapshot> {
        let handle = self.registry.active_session(player)?;
        Ok(self.render(&handle))
    }

    /// Drops the player's game without touching stats.
    pub fn abandon(&self, player: &PlayerId) -> bool {
        let had_session = self.registry.end_session(player);
        if had_session {
            log::info!("player {} abandoned their game", player);
        }
        had_session
    }

    pub fn stats(&self, player: &PlayerId) -> PlayerStats {
        self.stats.get(player)
    }

    pub fn flush(&self) -> std::result::Result<(), StoreError> {
        self.stats.persist()
    }

    fn render(&self, handle: &SessionHandle) -> Snapshot {
        Snapshot::from_session(&handle.lock(), self.hazard_display)
    }
}
