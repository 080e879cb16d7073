// File: provider.rs
// Created: 2026-03-05 11:12:40
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use crate::error::{AlignError, Result};
use crate::matching::oracle::{CorrespondenceOracle, MatchParams};
use crate::matching::pattern::symmetrize_terminal_atoms;
use crate::matching::query::MoleculeQuery;
use crate::structure::correspondence::Correspondence;
use crate::structure::molecule::Molecule;
use crate::utils::log::{many_matches_msg, warn_in};

/// Above this many candidates the search is likely to be slow
pub const MANY_MATCHES_THRESHOLD: usize = 1_000_000;

/// Supplies candidate correspondences between a probe and a reference molecule.
pub struct CorrespondenceProvider<'o> {
    oracle: &'o dyn CorrespondenceOracle,
    max_matches: usize,
    symmetrize: bool,
    many_matches_threshold: usize,
}

impl<'o> CorrespondenceProvider<'o> {
    pub fn new(oracle: &'o dyn CorrespondenceOracle, max_matches: usize, symmetrize: bool) -> Self {
        Self { oracle, max_matches, symmetrize, many_matches_threshold: MANY_MATCHES_THRESHOLD }
    }

    pub fn with_many_matches_threshold(mut self, threshold: usize) -> Self {
        self.many_matches_threshold = threshold;
        self
    }

    /// Whether `count` candidates trigger the slowdown warning
    pub fn is_many(&self, count: usize) -> bool {
        count > self.many_matches_threshold
    }

    pub fn candidate_params(&self) -> MatchParams {
        MatchParams {
            recursion_possible: true,
            use_chirality: false,
            use_query_query_matches: false,
            uniquify: false,
            max_matches: self.max_matches,
        }
    }

    /// All candidates: `explicit` when non-empty, otherwise every match the
    /// oracle reports (symmetrized when enabled). `caller` names the operation
    /// in the many-matches warning.
    pub fn candidates(
        &self,
        probe: &Molecule,
        reference: &Molecule,
        explicit: &[Correspondence],
        caller: &str,
    ) -> Result<Vec<Correspondence>> {
        if !explicit.is_empty() {
            return Ok(explicit.to_vec());
        }
        let mut query = MoleculeQuery::from_molecule(probe);
        if self.symmetrize {
            symmetrize_terminal_atoms(probe, &mut query)?;
        }
        let matches = self.oracle.substruct_matches(reference, &query, &self.candidate_params());
        if matches.is_empty() {
            return Err(AlignError::NoCorrespondenceFound);
        }
        if self.is_many(matches.len()) {
            warn_in(caller, &many_matches_msg(matches.len(), probe.name()));
        }
        Ok(matches)
    }

    /// One correspondence: `explicit` if given, otherwise the first oracle match
    /// of the unmodified probe.
    pub fn single(
        &self,
        probe: &Molecule,
        reference: &Molecule,
        explicit: Option<&Correspondence>,
    ) -> Result<Correspondence> {
        if let Some(corr) = explicit {
            return Ok(corr.clone());
        }
        let params = MatchParams {
            recursion_possible: true,
            use_chirality: false,
            use_query_query_matches: true,
            uniquify: true,
            max_matches: 1,
        };
        let query = MoleculeQuery::from_molecule(probe);
        self.oracle
            .substruct_matches(reference, &query, &params)
            .into_iter()
            .next()
            .ok_or(AlignError::NoCorrespondenceFound)
    }
}
