//! Coordinates, molecules and rigid superposition.

pub mod transform;
pub mod conformer;
pub mod molecule;
pub mod correspondence;
pub mod superpose;
pub mod rmsd;
