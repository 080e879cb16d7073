//! Error types for alignment and RMSD calculation

use thiserror::Error;

use crate::structure::conformer::ConformerId;

/// Errors that can occur while matching, superposing or scoring conformers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignError {
    /// Neither the caller nor the matcher produced a correspondence
    #[error("No sub-structure match found between the reference and probe mol")]
    NoCorrespondenceFound,

    /// Two sequences that must be the same length are not
    #[error("Mismatch in number of points: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Conformer id not present in the store. `None` means the store is empty.
    #[error("Bad conformer id: {0:?}")]
    InvalidConformationId(Option<ConformerId>),

    #[error("Conformer id {0} is already in use")]
    DuplicateConformationId(ConformerId),

    #[error("Correspondence must contain at least one atom pair")]
    EmptyCorrespondence,

    /// Probe atom mapped twice within one correspondence
    #[error("Probe atom {0} appears more than once in a correspondence")]
    DuplicateProbeIndex(usize),

    #[error("Atom index {index} out of range for {len} atoms")]
    AtomIndexOutOfRange { index: usize, len: usize },

    /// Weights must be finite, non-negative and sum to a positive value
    #[error("Weights must be finite, non-negative and not all zero")]
    DegenerateWeights,

    #[error("SVD decomposition failed to produce singular vectors")]
    SvdFailed,

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AlignError>;
