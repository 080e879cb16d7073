//! # About project
//!
//! Molalign superposes molecular conformations and reports the RMSD between them.
//! Atom correspondences come either from the caller or from a substructure
//! matcher; when chemically equivalent terminal atoms make several
//! correspondences valid, the one with the lowest RMSD is kept.

pub mod error;
pub mod structure;
pub mod matching;
pub mod controller;
pub mod utils;

pub mod prelude {
    pub use crate::error::{AlignError, Result};
    pub use crate::structure::conformer::{ConformationStore, Conformer, ConformerId};
    pub use crate::structure::correspondence::Correspondence;
    pub use crate::structure::molecule::{Atom, BondOrder, Chirality, Molecule};
    pub use crate::structure::superpose::{align_points, AlignParams, Superposition};
    pub use crate::structure::rmsd::{correspondence_rms, rms_from_ssr, weighted_rms};
    pub use crate::structure::transform::RigidTransform;
    pub use crate::matching::oracle::{CorrespondenceOracle, MatchParams, SubgraphOracle};
    pub use crate::matching::provider::CorrespondenceProvider;
    pub use crate::controller::MolAligner;
    pub use crate::controller::conformers::align_mol_conformers;
    pub use crate::utils::config::AlignConfig;
    pub use crate::utils::log::{log_msg, print_log_msg, warn_in, DONE, FAIL, INFO, WARN};
}
