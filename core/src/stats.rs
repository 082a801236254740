use serde::{Deserialize, Serialize};

/// Cumulative results of one player's finished games.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub cells_revealed_total: u64,
}

impl PlayerStats {
    /// Accounts one finished game.
    pub fn record(&mut self, won: bool, cells_revealed: u64) {
        self.games_played += 1;
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.cells_revealed_total += cells_revealed;
    }

    /// Share of games won, `None` before the first finished game.
    pub fn win_rate(&self) -> Option<f64> {
        (self.games_played > 0).then(|| self.wins as f64 / self.games_played as f64)
    }
}
