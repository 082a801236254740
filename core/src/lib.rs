#![no_std]

extern crate alloc;

use core::fmt;
use core::ops::Index;
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use stats::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod stats;
mod types;
mod view;

/// Validated board dimensions and hazard count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    size: Coord2,
    hazards: CellCount,
}

impl GameConfig {
    /// Checks `rows >= 1`, `cols >= 1` and `0 < hazards < rows * cols`.
    pub fn new(rows: usize, cols: usize, hazards: usize) -> Result<Self> {
        let invalid = GameError::InvalidConfiguration {
            rows,
            cols,
            hazards,
        };
        let (Ok(row_count), Ok(col_count)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(invalid);
        };
        if row_count == 0 || col_count == 0 {
            return Err(invalid);
        }
        let total = mult(row_count, col_count);
        match CellCount::try_from(hazards) {
            Ok(hazard_count) if hazard_count > 0 && hazard_count < total => Ok(Self {
                size: (row_count, col_count),
                hazards: hazard_count,
            }),
            _ => Err(invalid),
        }
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn hazards(&self) -> CellCount {
        self.hazards
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.hazards
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    /// `(rows, cols, hazards)` of the preset.
    pub const fn dimensions(self) -> (usize, usize, usize) {
        match self {
            Self::Beginner => (9, 9, 10),
            Self::Intermediate => (16, 16, 40),
            Self::Expert => (16, 30, 99),
        }
    }

    pub fn config(self) -> GameConfig {
        let (rows, cols, hazards) = self.dimensions();
        GameConfig::new(rows, cols, hazards).expect("difficulty presets are valid configurations")
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown difficulty, expected beginner, intermediate or expert")]
pub struct ParseDifficultyError;

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParseDifficultyError)
    }
}

/// Hazard layout together with the per-cell neighbour counts, fixed once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    hazard_mask: Array2<bool>,
    neighbor_counts: Array2<u8>,
    config: GameConfig,
}

impl Board {
    /// Builds a board from a mask, rejecting shapes and counts that no [`GameConfig`] allows.
    pub fn from_hazard_mask(hazard_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = hazard_mask.dim();
        let hazards = hazard_mask.iter().filter(|&&is_hazard| is_hazard).count();
        let config = GameConfig::new(rows, cols, hazards)?;

        let size = config.size();
        let neighbor_counts = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            // in bounds by construction of the shape
            let center = (row as Coord, col as Coord);
            NeighborIter::new(center, size)
                .filter(|&pos| hazard_mask[pos.to_nd_index()])
                .count() as u8
        });

        Ok(Self {
            hazard_mask,
            neighbor_counts,
            config,
        })
    }

    pub fn from_hazard_coords(size: Coord2, hazard_coords: &[Coord2]) -> Result<Self> {
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in hazard_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoordinate(coords.0.into(), coords.1.into()));
            }
            hazard_mask[coords.to_nd_index()] = true;
        }

        Self::from_hazard_mask(hazard_mask)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn hazard_count(&self) -> CellCount {
        self.config.hazards()
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.safe_cells()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate(coords.0.into(), coords.1.into()))
        }
    }

    pub fn is_hazard(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Hazards among the in-bounds Moore neighbours, defined for every cell.
    pub fn neighbor_count(&self, coords: Coord2) -> u8 {
        self.neighbor_counts[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Hazard coordinates in row-major order.
    pub fn hazards(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.hazard_mask
            .indexed_iter()
            .filter(|&(_, &is_hazard)| is_hazard)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for Board {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.hazard_mask[coords.to_nd_index()]
    }
}

/// Result of a single reveal action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    AlreadyTerminal,
    AlreadyRevealed,
    HitHazard,
    SafeReveal,
    Victory,
}

impl Transition {
    pub const fn has_update(self) -> bool {
        use Transition::*;
        match self {
            AlreadyTerminal | AlreadyRevealed => false,
            HitHazard | SafeReveal | Victory => true,
        }
    }

    /// Whether this transition ended the game.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitHazard | Self::Victory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn config_rejects_single_cell_board() {
        for hazards in 0..=1 {
            assert!(matches!(
                GameConfig::new(1, 1, hazards),
                Err(GameError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn config_rejects_out_of_range_values() {
        assert!(GameConfig::new(0, 5, 1).is_err());
        assert!(GameConfig::new(5, 0, 1).is_err());
        assert!(GameConfig::new(5, 5, 0).is_err());
        assert!(GameConfig::new(5, 5, 25).is_err());
        assert!(GameConfig::new(256, 2, 1).is_err());
        assert!(GameConfig::new(5, 5, 24).is_ok());
    }

    #[test]
    fn config_reports_cell_counts() {
        let config = GameConfig::new(4, 6, 5).unwrap();
        assert_eq!(config.size(), (4, 6));
        assert_eq!(config.total_cells(), 24);
        assert_eq!(config.safe_cells(), 19);
    }

    #[test]
    fn presets_are_valid_and_parse() {
        for difficulty in Difficulty::ALL {
            let (rows, cols, hazards) = difficulty.dimensions();
            let config = difficulty.config();
            assert_eq!(usize::from(config.rows()), rows);
            assert_eq!(usize::from(config.cols()), cols);
            assert_eq!(usize::from(config.hazards()), hazards);
            assert_eq!(difficulty.name().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!(" Expert ".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert_eq!("impossible".parse::<Difficulty>(), Err(ParseDifficultyError));
    }

    #[test]
    fn board_counts_neighbors_of_every_cell() {
        let board = Board::from_hazard_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board.hazard_count(), 2);
        assert_eq!(board.neighbor_count((1, 1)), 2);
        assert_eq!(board.neighbor_count((0, 1)), 1);
        assert_eq!(board.neighbor_count((0, 2)), 0);
        assert_eq!(board.neighbor_count((2, 0)), 0);
        // hazard cells carry a count too
        assert_eq!(board.neighbor_count((0, 0)), 0);
        assert_eq!(board.neighbor_count((2, 2)), 0);
    }

    #[test]
    fn board_rejects_out_of_bounds_hazard() {
        assert_eq!(
            Board::from_hazard_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoordinate(2, 0))
        );
    }

    #[test]
    fn board_rejects_full_or_empty_layout() {
        assert!(Board::from_hazard_coords((2, 2), &[]).is_err());
        assert!(Board::from_hazard_coords((1, 2), &[(0, 0), (0, 1)]).is_err());
    }

    #[test]
    fn board_lists_hazards_row_major() {
        let board = Board::from_hazard_coords((2, 3), &[(1, 2), (0, 1)]).unwrap();
        let hazards: Vec<_> = board.hazards().collect();
        assert_eq!(hazards, [(0, 1), (1, 2)]);
        assert!(board.is_hazard((0, 1)));
        assert!(!board.is_hazard((0, 0)));
    }

    #[test]
    fn transition_classification() {
        assert!(Transition::HitHazard.is_terminal());
        assert!(Transition::Victory.is_terminal());
        assert!(!Transition::SafeReveal.is_terminal());
        assert!(!Transition::AlreadyTerminal.has_update());
        assert!(!Transition::AlreadyRevealed.has_update());
        assert!(Transition::SafeReveal.has_update());
    }
}
