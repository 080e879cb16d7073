// File: align.rs
// Created: 2026-03-06 10:03:19
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use crate::controller::MolAligner;
use crate::error::Result;
use crate::structure::conformer::{ConformationStore, Conformer, ConformerId};
use crate::structure::correspondence::{check_weights, Correspondence};
use crate::structure::molecule::Molecule;
use crate::structure::superpose::{align_points, AlignParams, Superposition};
use crate::structure::transform::RigidTransform;

/// Superposes the probe atoms of `corr` onto their reference partners.
pub fn superpose_correspondence(
    probe: &Conformer,
    reference: &Conformer,
    corr: &Correspondence,
    weights: Option<&[f64]>,
    params: &AlignParams,
) -> Result<Superposition> {
    let (probe_pts, ref_pts) = corr.gather_points(probe, reference)?;
    align_points(&ref_pts, &probe_pts, weights, params)
}

impl MolAligner<'_> {
    /// Transform taking the probe conformer onto the reference, and the RMS it
    /// leaves. Without `atom_map` the first substructure match is used.
    pub fn alignment_transform(
        &self,
        probe: &Molecule,
        reference: &Molecule,
        probe_cid: Option<ConformerId>,
        ref_cid: Option<ConformerId>,
        atom_map: Option<&Correspondence>,
        weights: Option<&[f64]>,
    ) -> Result<(RigidTransform, f64)> {
        let corr = self.provider().single(probe, reference, atom_map)?;
        check_weights(weights, corr.len())?;
        let sup = superpose_correspondence(
            probe.conformation(probe_cid)?,
            reference.conformation(ref_cid)?,
            &corr,
            weights,
            &self.config.align_params(),
        )?;
        Ok((sup.transform, sup.rms()))
    }

    /// Like [`Self::alignment_transform`], then moves the probe conformer.
    pub fn align_mol(
        &self,
        probe: &mut Molecule,
        reference: &Molecule,
        probe_cid: Option<ConformerId>,
        ref_cid: Option<ConformerId>,
        atom_map: Option<&Correspondence>,
        weights: Option<&[f64]>,
    ) -> Result<f64> {
        let (trans, rms) = self.alignment_transform(probe, reference, probe_cid, ref_cid, atom_map, weights)?;
        probe.conformation_mut(probe_cid)?.transform(&trans);
        Ok(rms)
    }
}
