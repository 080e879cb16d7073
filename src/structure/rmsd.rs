// File: rmsd.rs
// Created: 2026-03-03 15:02:44
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use nalgebra::Point3;

use crate::error::{AlignError, Result};
use crate::structure::conformer::Conformer;
use crate::structure::correspondence::{check_weights, Correspondence};

/// Residual sum of squares divided by the point count (not the weight sum).
#[inline]
pub fn rms_from_ssr(ssr: f64, num_points: usize) -> f64 {
    (ssr / num_points as f64).sqrt()
}

/// RMS of paired points as they currently are, without superposition.
pub fn weighted_rms(probe: &[Point3<f64>], reference: &[Point3<f64>], weights: Option<&[f64]>) -> Result<f64> {
    if probe.len() != reference.len() {
        return Err(AlignError::DimensionMismatch { expected: reference.len(), found: probe.len() });
    }
    if probe.is_empty() {
        return Err(AlignError::EmptyCorrespondence);
    }
    check_weights(weights, probe.len())?;
    let ssr: f64 = probe
        .iter()
        .zip(reference)
        .enumerate()
        .map(|(i, (p, q))| weights.map_or(1.0, |w| w[i]) * (p - q).norm_squared())
        .sum();
    Ok(rms_from_ssr(ssr, probe.len()))
}

/// RMS between two conformers under a fixed atom mapping.
pub fn correspondence_rms(
    probe: &Conformer,
    reference: &Conformer,
    correspondence: &Correspondence,
    weights: Option<&[f64]>,
) -> Result<f64> {
    check_weights(weights, correspondence.len())?;
    let (probe_pts, ref_pts) = correspondence.gather_points(probe, reference)?;
    weighted_rms(&probe_pts, &ref_pts, weights)
}
