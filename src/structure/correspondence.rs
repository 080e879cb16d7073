// File: correspondence.rs
// Created: 2026-03-03 09:18:27
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use nalgebra::Point3;
use rustc_hash::FxHashSet;

use crate::error::{AlignError, Result};
use crate::structure::conformer::Conformer;

/// (probe atom index, reference atom index)
pub type AtomPair = (usize, usize);

/// Atom-to-atom mapping from a probe structure onto a reference structure.
///
/// Never empty, and a probe atom is mapped at most once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Correspondence {
    pairs: Vec<AtomPair>,
}

impl Correspondence {
    pub fn new(pairs: Vec<AtomPair>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(AlignError::EmptyCorrespondence);
        }
        let mut seen = FxHashSet::default();
        for &(probe, _) in &pairs {
            if !seen.insert(probe) {
                return Err(AlignError::DuplicateProbeIndex(probe));
            }
        }
        Ok(Self { pairs })
    }

    /// Maps atom `i` onto atom `i` for `i` in `0..n`.
    pub fn identity(n: usize) -> Result<Self> {
        Self::new((0..n).map(|i| (i, i)).collect())
    }

    /// Maps each listed atom onto the atom with the same index.
    pub fn from_indices(indices: &[usize]) -> Result<Self> {
        Self::new(indices.iter().map(|&i| (i, i)).collect())
    }

    pub fn pairs(&self) -> &[AtomPair] { &self.pairs }
    pub fn len(&self) -> usize { self.pairs.len() }
    // Always false for a constructed value
    pub fn is_empty(&self) -> bool { self.pairs.is_empty() }

    pub fn probe_indices(&self) -> Vec<usize> {
        self.pairs.iter().map(|&(p, _)| p).collect()
    }

    pub fn ref_indices(&self) -> Vec<usize> {
        self.pairs.iter().map(|&(_, r)| r).collect()
    }

    /// Probe and reference positions, paired in correspondence order.
    pub fn gather_points(
        &self,
        probe: &Conformer,
        reference: &Conformer,
    ) -> Result<(Vec<Point3<f64>>, Vec<Point3<f64>>)> {
        let probe_pts = probe.select(&self.probe_indices())?;
        let ref_pts = reference.select(&self.ref_indices())?;
        Ok((probe_pts, ref_pts))
    }
}

/// Weight vector, when given, has one finite non-negative entry per atom pair
/// and a positive sum.
pub fn check_weights(weights: Option<&[f64]>, num_points: usize) -> Result<()> {
    let Some(w) = weights else {
        return Ok(());
    };
    if w.len() != num_points {
        return Err(AlignError::DimensionMismatch { expected: num_points, found: w.len() });
    }
    if w.iter().any(|&x| !x.is_finite() || x < 0.0) || w.iter().sum::<f64>() <= 0.0 {
        return Err(AlignError::DegenerateWeights);
    }
    Ok(())
}
