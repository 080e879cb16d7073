// File: best.rs
// Created: 2026-03-06 13:40:07
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved
// Best RMS over all candidate correspondences

use rayon::prelude::*;

use crate::controller::align::superpose_correspondence;
use crate::controller::MolAligner;
use crate::error::{AlignError, Result};
use crate::structure::conformer::{ConformationStore, Conformer, ConformerId};
use crate::structure::correspondence::{check_weights, Correspondence};
use crate::structure::molecule::Molecule;
use crate::structure::rmsd::correspondence_rms;
use crate::structure::superpose::AlignParams;
use crate::structure::transform::RigidTransform;

#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    /// Position of the winner in the candidate list
    pub index: usize,
    pub correspondence: Correspondence,
    pub transform: RigidTransform,
    pub rms: f64,
}

/// Index and value of the first minimum. Ties keep the earlier entry.
fn first_minimum(values: &[f64]) -> Option<(usize, f64)> {
    let (&first, rest) = values.split_first()?;
    let mut best = (0, first);
    for (i, &value) in rest.iter().enumerate() {
        if value < best.1 {
            best = (i + 1, value);
        }
    }
    Some(best)
}

fn check_candidate_weights(candidates: &[Correspondence], weights: Option<&[f64]>) -> Result<()> {
    candidates.iter().try_for_each(|c| check_weights(weights, c.len()))
}

/// Superposes every candidate against the unmodified probe and keeps the
/// lowest RMS. Candidates are scored in parallel; selection follows
/// candidate order, so the result does not depend on scheduling.
pub fn search_best(
    candidates: &[Correspondence],
    probe: &Conformer,
    reference: &Conformer,
    weights: Option<&[f64]>,
    params: &AlignParams,
) -> Result<Option<BestMatch>> {
    check_candidate_weights(candidates, weights)?;
    let superpositions = candidates
        .par_iter()
        .map(|corr| superpose_correspondence(probe, reference, corr, weights, params))
        .collect::<Result<Vec<_>>>()?;
    let rms: Vec<f64> = superpositions.iter().map(|s| s.rms()).collect();
    Ok(first_minimum(&rms).map(|(index, rms)| BestMatch {
        index,
        correspondence: candidates[index].clone(),
        transform: superpositions[index].transform,
        rms,
    }))
}

/// Lowest RMS over the candidates with coordinates taken as they are.
pub fn score_best(
    candidates: &[Correspondence],
    probe: &Conformer,
    reference: &Conformer,
    weights: Option<&[f64]>,
) -> Result<Option<(usize, f64)>> {
    check_candidate_weights(candidates, weights)?;
    let rms = candidates
        .par_iter()
        .map(|corr| correspondence_rms(probe, reference, corr, weights))
        .collect::<Result<Vec<_>>>()?;
    Ok(first_minimum(&rms))
}

impl MolAligner<'_> {
    /// Best superposition over all candidates, without moving anything.
    pub fn best_alignment(
        &self,
        probe: &Molecule,
        reference: &Molecule,
        probe_cid: Option<ConformerId>,
        ref_cid: Option<ConformerId>,
        map: &[Correspondence],
        weights: Option<&[f64]>,
    ) -> Result<BestMatch> {
        let candidates = self.provider().candidates(probe, reference, map, "get_best_rms")?;
        let best = search_best(
            &candidates,
            probe.conformation(probe_cid)?,
            reference.conformation(ref_cid)?,
            weights,
            &self.config.align_params(),
        )?;
        // candidates is never empty here
        best.ok_or(AlignError::NoCorrespondenceFound)
    }

    /// Aligns the probe conformer with the best candidate correspondence and
    /// returns its RMS.
    pub fn get_best_rms(
        &self,
        probe: &mut Molecule,
        reference: &Molecule,
        probe_cid: Option<ConformerId>,
        ref_cid: Option<ConformerId>,
        map: &[Correspondence],
        weights: Option<&[f64]>,
    ) -> Result<f64> {
        let best = self.best_alignment(probe, reference, probe_cid, ref_cid, map, weights)?;
        probe.conformation_mut(probe_cid)?.transform(&best.transform);
        Ok(best.rms)
    }

    /// Lowest in-place RMS over the candidates. Coordinates are not moved,
    /// so the result reflects the current relative placement.
    pub fn calc_rms(
        &self,
        probe: &Molecule,
        reference: &Molecule,
        probe_cid: Option<ConformerId>,
        ref_cid: Option<ConformerId>,
        map: &[Correspondence],
        weights: Option<&[f64]>,
    ) -> Result<f64> {
        let candidates = self.provider().candidates(probe, reference, map, "calc_rms")?;
        score_best(
            &candidates,
            probe.conformation(probe_cid)?,
            reference.conformation(ref_cid)?,
            weights,
        )?
        .map(|(_, rms)| rms)
        .ok_or(AlignError::NoCorrespondenceFound)
    }
}
