use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player may see of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellView {
    #[default]
    Hidden,
    Revealed(u8),
    Hazard,
}

impl CellView {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Which hazards a finished game shows. Running games never show any.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardDisplay {
    /// Only the hazard that ended a lost game.
    #[default]
    Triggered,
    /// Every hazard of the board.
    All,
}

/// Render-ready copy of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: Coord,
    pub cols: Coord,
    pub hazard_count: CellCount,
    pub state: SessionState,
    pub revealed_count: CellCount,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_session(session: &GameSession, display: HazardDisplay) -> Self {
        let board = session.board();
        let size = board.size();
        let show_all_hazards = session.is_terminal() && display == HazardDisplay::All;

        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let is_hazard = board.is_hazard(coords);
            if session.is_revealed(coords) {
                if is_hazard {
                    CellView::Hazard
                } else {
                    CellView::Revealed(board.neighbor_count(coords))
                }
            } else if show_all_hazards && is_hazard {
                CellView::Hazard
            } else {
                CellView::Hidden
            }
        });

        Self {
            rows: size.0,
            cols: size.1,
            hazard_count: board.hazard_count(),
            state: session.state(),
            revealed_count: session.revealed_count(),
            cells,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, hazards: &[Coord2]) -> GameSession {
        GameSession::new(Board::from_hazard_coords(size, hazards).unwrap())
    }

    fn hazard_views(snapshot: &Snapshot) -> usize {
        snapshot
            .cells
            .iter()
            .filter(|&&cell| cell == CellView::Hazard)
            .count()
    }

    #[test]
    fn fresh_session_is_all_hidden() {
        let snapshot = Snapshot::from_session(&session((2, 3), &[(1, 1)]), HazardDisplay::default());
        assert_eq!(CellView::default(), CellView::Hidden);
        assert!(snapshot.cells.iter().all(|&cell| cell == CellView::default()));
    }

    #[test]
    fn running_game_never_shows_hazards() {
        let mut game = session((3, 3), &[(0, 0), (2, 2)]);
        game.reveal((0, 2)).unwrap();

        let snapshot = Snapshot::from_session(&game, HazardDisplay::All);

        assert_eq!(hazard_views(&snapshot), 0);
        assert_eq!(snapshot.cell_at((0, 2)), Some(CellView::Revealed(0)));
        assert_eq!(snapshot.cell_at((1, 1)), Some(CellView::Revealed(2)));
        assert_eq!(snapshot.cell_at((0, 0)), Some(CellView::Hidden));
        assert_eq!(snapshot.cell_at((3, 0)), None);
        assert_eq!(snapshot.state, SessionState::Active);
        assert_eq!(snapshot.revealed_count, 4);
    }

    #[test]
    fn lost_game_shows_triggered_hazard_only() {
        let mut game = session((3, 3), &[(0, 0), (2, 2)]);
        game.reveal((2, 2)).unwrap();

        let snapshot = Snapshot::from_session(&game, HazardDisplay::Triggered);

        assert_eq!(hazard_views(&snapshot), 1);
        assert_eq!(snapshot.cell_at((2, 2)), Some(CellView::Hazard));
        assert_eq!(snapshot.cell_at((0, 0)), Some(CellView::Hidden));
        assert!(snapshot.is_terminal());
    }

    #[test]
    fn full_reveal_shows_every_hazard_after_end() {
        let mut game = session((3, 3), &[(0, 0), (2, 2)]);
        game.reveal((2, 2)).unwrap();

        let snapshot = Snapshot::from_session(&game, HazardDisplay::All);

        assert_eq!(hazard_views(&snapshot), 2);
        assert_eq!(snapshot.cell_at((0, 0)), Some(CellView::Hazard));
    }

    #[test]
    fn won_game_with_triggered_display_shows_no_hazard() {
        let mut game = session((2, 1), &[(0, 0)]);
        game.reveal((1, 0)).unwrap();

        let snapshot = Snapshot::from_session(&game, HazardDisplay::Triggered);

        assert_eq!(snapshot.state, SessionState::Won);
        assert_eq!(hazard_views(&snapshot), 0);
    }

    #[test]
    fn snapshot_serializes_cells() {
        let game = session((1, 2), &[(0, 1)]);
        let snapshot = Snapshot::from_session(&game, HazardDisplay::Triggered);

        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["state"], "ready");
        assert_eq!(json["hazard_count"], 1);
        let restored: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
