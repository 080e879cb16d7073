//! Molecule-level alignment operations.
//!
//! [`MolAligner`] owns the alignment settings and borrows a substructure
//! oracle; the operations themselves live in the submodules.

pub mod align;
pub mod best;
pub mod conformers;

use crate::matching::oracle::CorrespondenceOracle;
use crate::matching::provider::CorrespondenceProvider;
use crate::utils::config::AlignConfig;

pub struct MolAligner<'o> {
    oracle: &'o dyn CorrespondenceOracle,
    config: AlignConfig,
}

impl<'o> MolAligner<'o> {
    pub fn new(oracle: &'o dyn CorrespondenceOracle) -> Self {
        Self { oracle, config: AlignConfig::default() }
    }

    pub fn with_config(oracle: &'o dyn CorrespondenceOracle, config: AlignConfig) -> Self {
        Self { oracle, config }
    }

    pub fn config(&self) -> &AlignConfig { &self.config }
    pub fn config_mut(&mut self) -> &mut AlignConfig { &mut self.config }

    pub fn provider(&self) -> CorrespondenceProvider<'o> {
        CorrespondenceProvider::new(self.oracle, self.config.max_matches, self.config.symmetrize)
    }
}
