use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One board and its play state. `reveal` is the only mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    board: Board,
    revealed: Array2<bool>,
    revealed_count: CellCount,
    state: SessionState,
    triggered_hazard: Option<Coord2>,
}

impl GameSession {
    pub fn new(board: Board) -> Self {
        let size = board.size();
        Self {
            board,
            revealed: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            state: Default::default(),
            triggered_hazard: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Only meaningful once [`Self::is_terminal`] holds.
    pub fn is_won(&self) -> bool {
        matches!(self.state, SessionState::Won)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.board.contains(coords) && self.revealed[coords.to_nd_index()]
    }

    /// Revealed coordinates in row-major order.
    pub fn revealed_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.revealed
            .indexed_iter()
            .filter(|&(_, &is_revealed)| is_revealed)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// The hazard that ended a lost game.
    pub fn triggered_hazard(&self) -> Option<Coord2> {
        self.triggered_hazard
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<Transition> {
        use Transition::*;

        let coords = self.board.validate_coords(coords)?;

        if self.state.is_terminal() {
            return Ok(AlreadyTerminal);
        }
        if self.revealed[coords.to_nd_index()] {
            return Ok(AlreadyRevealed);
        }

        self.mark_revealed(coords);

        if self.board.is_hazard(coords) {
            self.triggered_hazard = Some(coords);
            self.state = SessionState::Lost;
            return Ok(HitHazard);
        }

        if self.board.neighbor_count(coords) == 0 {
            self.cascade(coords);
        }

        if self.revealed_count == self.board.safe_cell_count() {
            self.state = SessionState::Won;
            Ok(Victory)
        } else {
            self.state = SessionState::Active;
            Ok(SafeReveal)
        }
    }

    /// Opens the zero region around `origin` and its numbered border.
    fn cascade(&mut self, origin: Coord2) {
        let mut to_visit: VecDeque<Coord2> = self.board.iter_neighbors(origin).collect();

        while let Some(coords) = to_visit.pop_front() {
            if self.revealed[coords.to_nd_index()] || self.board.is_hazard(coords) {
                continue;
            }

            self.mark_revealed(coords);

            if self.board.neighbor_count(coords) == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|&pos| !self.revealed[pos.to_nd_index()]),
                );
            }
        }
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        self.revealed[coords.to_nd_index()] = true;
        self.revealed_count += 1;
    }
}
