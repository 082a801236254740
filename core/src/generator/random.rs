use ndarray::Array2;

use super::*;

/// Uniform generation: every set of `config.hazards()` cells is equally likely for an unknown seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let mut hazard_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let cells = hazard_mask
            .as_slice_mut()
            .expect("freshly allocated mask has standard layout");
        for index in rand::seq::index::sample(&mut rng, cells.len(), usize::from(config.hazards())) {
            cells[index] = true;
        }

        log::debug!(
            "generated {}x{} board with {} hazards from seed {:#x}",
            config.rows(),
            config.cols(),
            config.hazards(),
            self.seed
        );

        Board::from_hazard_mask(hazard_mask).expect("hazard count comes from a validated config")
    }
}
