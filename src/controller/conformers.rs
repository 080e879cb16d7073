// File: conformers.rs
// Created: 2026-03-07 09:55:21
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use rustc_hash::FxHashMap;

use crate::controller::MolAligner;
use crate::error::Result;
use crate::structure::conformer::{ConformationStore, ConformerId};
use crate::structure::correspondence::check_weights;
use crate::structure::superpose::{align_points, AlignParams, Superposition};

/// Aligns the conformers of one structure onto a reference conformer.
///
/// The reference is the first entry of `conf_ids`, or the first stored
/// conformer when no ids are given. Only the atoms in `atom_ids` (all atoms
/// when `None`) take part in the fit, but every atom is moved. When
/// `rms_list` is given, one RMS per aligned conformer is appended in
/// processing order; the reference contributes none.
///
/// Nothing is moved unless every conformer can be aligned.
pub fn align_mol_conformers<S: ConformationStore + ?Sized>(
    store: &mut S,
    atom_ids: Option<&[usize]>,
    conf_ids: Option<&[ConformerId]>,
    weights: Option<&[f64]>,
    params: &AlignParams,
    rms_list: Option<&mut Vec<f64>>,
) -> Result<()> {
    if store.num_conformations() == 0 {
        return Ok(());
    }
    let ids = match conf_ids {
        Some(ids) => ids.to_vec(),
        None => store.conformation_ids(),
    };
    let Some((&ref_id, probe_ids)) = ids.split_first() else {
        return Ok(());
    };

    let ref_conf = store.conformation(Some(ref_id))?;
    let indices: Vec<usize> = match atom_ids {
        Some(ids) => ids.to_vec(),
        None => (0..ref_conf.num_atoms()).collect(),
    };
    let ref_pts = ref_conf.select(&indices)?;
    check_weights(weights, ref_pts.len())?;

    // A repeated id is already aligned by the time it comes up again, so it
    // only contributes its RMS.
    let mut planned: Vec<(ConformerId, Superposition)> = Vec::with_capacity(probe_ids.len());
    let mut first_seen: FxHashMap<ConformerId, usize> = FxHashMap::default();
    let mut rms_values = Vec::with_capacity(probe_ids.len());
    for &id in probe_ids {
        if let Some(&slot) = first_seen.get(&id) {
            rms_values.push(planned[slot].1.rms());
            continue;
        }
        let probe_pts = store.conformation(Some(id))?.select(&indices)?;
        let sup = align_points(&ref_pts, &probe_pts, weights, params)?;
        rms_values.push(sup.rms());
        first_seen.insert(id, planned.len());
        planned.push((id, sup));
    }

    for (id, sup) in &planned {
        if *id != ref_id {
            store.conformation_mut(Some(*id))?.transform(&sup.transform);
        }
    }
    if let Some(list) = rms_list {
        list.extend(rms_values);
    }
    Ok(())
}

impl MolAligner<'_> {
    /// [`align_mol_conformers`] with this aligner's `reflect` setting.
    pub fn align_conformers<S: ConformationStore + ?Sized>(
        &self,
        store: &mut S,
        atom_ids: Option<&[usize]>,
        conf_ids: Option<&[ConformerId]>,
        weights: Option<&[f64]>,
        rms_list: Option<&mut Vec<f64>>,
    ) -> Result<()> {
        align_mol_conformers(store, atom_ids, conf_ids, weights, &self.config.align_params(), rms_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignError;
    use crate::structure::conformer::Conformer;
    use crate::structure::transform::RigidTransform;
    use nalgebra::{Point3, Rotation3, Vector3};

    fn base() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.4, 0.0, 0.0),
            Point3::new(2.1, 1.2, 0.0),
            Point3::new(1.9, 2.0, 1.1),
        ]
    }

    fn moved(angle: f64, shift: f64) -> Vec<Point3<f64>> {
        let trans = RigidTransform::new(
            *Rotation3::from_euler_angles(angle, 0.3, -angle).matrix(),
            Vector3::new(shift, -shift, 2.0 * shift),
        );
        base().iter().map(|p| trans.apply(p)).collect()
    }

    fn store() -> Vec<Conformer> {
        vec![
            Conformer::new(0, base()),
            Conformer::new(1, moved(0.4, 1.0)),
            Conformer::new(2, moved(-1.2, 3.0)),
        ]
    }

    fn assert_close(a: &[Point3<f64>], b: &[Point3<f64>]) {
        for (p, q) in a.iter().zip(b) {
            assert!((p - q).norm() < 1e-8, "{:?} vs {:?}", p, q);
        }
    }

    #[test]
    fn test_align_all_onto_first() {
        let mut confs = store();
        let mut rms = Vec::new();
        align_mol_conformers(&mut confs, None, None, None, &AlignParams::default(), Some(&mut rms)).unwrap();
        assert_eq!(rms.len(), 2);
        assert!(rms.iter().all(|&r| r < 1e-6));
        for conf in &confs {
            assert_close(conf.positions(), &base());
        }
    }

    #[test]
    fn test_explicit_reference() {
        let mut confs = store();
        let reference = confs[2].positions().to_vec();
        let mut rms = Vec::new();
        align_mol_conformers(&mut confs, None, Some(&[2, 0]), None, &AlignParams::default(), Some(&mut rms)).unwrap();
        assert_eq!(rms.len(), 1);
        assert_close(confs[0].positions(), &reference);
        // Not listed, so untouched
        assert_close(confs[1].positions(), &moved(0.4, 1.0));
    }

    #[test]
    fn test_atom_subset_moves_every_atom() {
        let mut confs = store();
        align_mol_conformers(&mut confs, Some(&[0, 1, 2]), None, Some(&[1.0, 2.0, 1.0]), &AlignParams::default(), None).unwrap();
        assert_close(confs[1].positions(), &base());
        assert_close(confs[2].positions(), &base());
    }

    #[test]
    fn test_empty_and_failures() {
        let mut empty: Vec<Conformer> = Vec::new();
        assert!(align_mol_conformers(&mut empty, None, None, None, &AlignParams::default(), None).is_ok());

        let mut confs = store();
        assert_eq!(
            align_mol_conformers(&mut confs, None, Some(&[0, 1, 7]), None, &AlignParams::default(), None).unwrap_err(),
            AlignError::InvalidConformationId(Some(7))
        );
        // Conformer 1 was not moved even though it came before the bad id
        assert_close(confs[1].positions(), &moved(0.4, 1.0));

        assert_eq!(
            align_mol_conformers(&mut confs, Some(&[0, 1]), None, Some(&[1.0]), &AlignParams::default(), None).unwrap_err(),
            AlignError::DimensionMismatch { expected: 2, found: 1 }
        );
        assert!(align_mol_conformers(&mut confs, Some(&[0, 9]), None, None, &AlignParams::default(), None).is_err());
    }

    #[test]
    fn test_repeated_id_aligned_once() {
        let mut confs = store();
        let mut rms = Vec::new();
        align_mol_conformers(&mut confs, None, Some(&[0, 1, 1]), None, &AlignParams::default(), Some(&mut rms)).unwrap();
        assert_eq!(rms.len(), 2);
        assert_eq!(rms[0], rms[1]);
        assert_close(confs[1].positions(), &base());
    }
}
