//! Atom correspondences between a probe and a reference molecule.
//!
//! The substructure search itself is delegated to a [`oracle::CorrespondenceOracle`];
//! this module builds the query it searches with and collects the candidates.

pub mod query;
pub mod pattern;
pub mod oracle;
pub mod provider;
