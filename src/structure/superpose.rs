// File: superpose.rs
// Created: 2026-03-03 13:47:10
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved
// Weighted least-squares superposition of two point sets (Kabsch, SVD based)

use nalgebra::{Matrix3, Point3, Vector3};

use crate::error::{AlignError, Result};
use crate::structure::correspondence::check_weights;
use crate::structure::rmsd::rms_from_ssr;
use crate::structure::transform::RigidTransform;
use crate::utils::config::DEFAULT_MAX_ITERATIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignParams {
    /// Permit an improper rotation when it lowers the residual
    pub reflect: bool,
    /// Not used by the closed-form solver. Reserved for iterative reweighting.
    pub max_iterations: u32,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self { reflect: false, max_iterations: DEFAULT_MAX_ITERATIONS }
    }
}

impl AlignParams {
    pub fn new(reflect: bool, max_iterations: u32) -> Self {
        Self { reflect, max_iterations }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Superposition {
    /// Maps probe points onto reference points
    pub transform: RigidTransform,
    /// Weighted sum of squared distances after superposition
    pub ssr: f64,
    pub num_points: usize,
}

impl Superposition {
    pub fn rms(&self) -> f64 {
        rms_from_ssr(self.ssr, self.num_points)
    }
}

/// Finds `R, t` minimizing `Σ w·|R·p + t - q|²` for probe `p` and reference `q`.
pub fn align_points(
    reference: &[Point3<f64>],
    probe: &[Point3<f64>],
    weights: Option<&[f64]>,
    params: &AlignParams,
) -> Result<Superposition> {
    // -----------------------------------------------------------------------
    // 1. Basic sanity checks -------------------------------------------------
    // -----------------------------------------------------------------------
    let n = reference.len();
    if probe.len() != n {
        return Err(AlignError::DimensionMismatch { expected: n, found: probe.len() });
    }
    if n == 0 {
        return Err(AlignError::EmptyCorrespondence);
    }
    check_weights(weights, n)?;
    let weight = |i: usize| weights.map_or(1.0, |w| w[i]);
    let total_weight: f64 = (0..n).map(weight).sum();

    // A single pair only fixes the translation
    if n == 1 {
        return Ok(Superposition {
            transform: RigidTransform::from_translation(reference[0] - probe[0]),
            ssr: 0.0,
            num_points: 1,
        });
    }

    // -----------------------------------------------------------------------
    // 2. Weighted centres of mass -------------------------------------------
    // -----------------------------------------------------------------------
    let mut probe_sum = Vector3::<f64>::zeros();
    let mut ref_sum = Vector3::<f64>::zeros();
    for i in 0..n {
        probe_sum += weight(i) * probe[i].coords;
        ref_sum += weight(i) * reference[i].coords;
    }
    let probe_centroid = probe_sum / total_weight;
    let ref_centroid = ref_sum / total_weight;

    // -----------------------------------------------------------------------
    // 3. Cross-covariance (probe x reference) and centred variance ---------
    // -----------------------------------------------------------------------
    let mut h = Matrix3::<f64>::zeros();
    let mut e0 = 0.0;
    for i in 0..n {
        let w = weight(i);
        let p = probe[i].coords - probe_centroid;
        let q = reference[i].coords - ref_centroid;
        h += w * p * q.transpose();
        e0 += w * (p.norm_squared() + q.norm_squared());
    }

    // -----------------------------------------------------------------------
    // 4. SVD and rotation with sign correction -------------------------------
    // -----------------------------------------------------------------------
    let svd = h.svd(true, true);
    let (u, v_t) = svd.u.zip(svd.v_t).ok_or(AlignError::SvdFailed)?;
    let v = v_t.transpose();
    let d = if params.reflect || (v * u.transpose()).determinant() >= 0.0 { 1.0 } else { -1.0 };
    // Singular values are not guaranteed to be sorted
    let mut diag = Vector3::repeat(1.0);
    diag[svd.singular_values.imin()] = d;
    let rotation = v * Matrix3::from_diagonal(&diag) * u.transpose();
    let translation = ref_centroid - rotation * probe_centroid;

    // -----------------------------------------------------------------------
    // 5. Residual from the singular values -----------------------------------
    // -----------------------------------------------------------------------
    let ssr = (e0 - 2.0 * svd.singular_values.dot(&diag)).max(0.0);

    Ok(Superposition {
        transform: RigidTransform::new(rotation, translation),
        ssr,
        num_points: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Rotation3;

    fn tetrahedron() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.5, 0.0, 0.0),
            Point3::new(0.0, 1.2, 0.0),
            Point3::new(0.3, 0.4, 1.7),
            Point3::new(-0.8, 0.9, 0.6),
        ]
    }

    fn apply(points: &[Point3<f64>], transform: &RigidTransform) -> Vec<Point3<f64>> {
        points.iter().map(|p| transform.apply(p)).collect()
    }

    fn explicit_ssr(
        reference: &[Point3<f64>], probe: &[Point3<f64>], weights: Option<&[f64]>, trans: &RigidTransform,
    ) -> f64 {
        (0..reference.len())
            .map(|i| weights.map_or(1.0, |w| w[i]) * (trans.apply(&probe[i]) - reference[i]).norm_squared())
            .sum()
    }

    #[test]
    fn test_identity() {
        let points = tetrahedron();
        let sup = align_points(&points, &points, None, &AlignParams::default()).unwrap();
        assert!((sup.transform.rotation - Matrix3::identity()).norm() < 1e-8);
        assert!(sup.transform.translation.norm() < 1e-8);
        assert!(sup.rms() < 1e-6);
    }

    #[test]
    fn test_translation_recovered() {
        let probe = tetrahedron();
        let shift = Vector3::new(3.0, -1.5, 7.25);
        let reference = apply(&probe, &RigidTransform::from_translation(shift));
        let sup = align_points(&reference, &probe, None, &AlignParams::default()).unwrap();
        assert!((sup.transform.rotation - Matrix3::identity()).norm() < 1e-8);
        assert!((sup.transform.translation - shift).norm() < 1e-8);
        assert!(sup.rms() < 1e-6);
    }

    #[test]
    fn test_proper_rotation_recovered() {
        let probe = tetrahedron();
        let rot = *Rotation3::from_euler_angles(0.7, -1.1, 2.3).matrix();
        let known = RigidTransform::new(rot, Vector3::new(1.0, 2.0, 3.0));
        let reference = apply(&probe, &known);
        let sup = align_points(&reference, &probe, None, &AlignParams::default()).unwrap();
        assert!((sup.transform.rotation - rot).norm() < 1e-8);
        assert!((sup.transform.translation - known.translation).norm() < 1e-8);
        assert!(sup.transform.is_proper());
        assert!(sup.rms() < 1e-6);
    }

    #[test]
    fn test_mirror_needs_reflect() {
        let probe = tetrahedron();
        let mirror = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));
        let rot = *Rotation3::from_euler_angles(0.2, 0.4, -0.9).matrix();
        let reference = apply(&probe, &RigidTransform::new(rot * mirror, Vector3::new(-2.0, 0.5, 1.0)));

        let proper = align_points(&reference, &probe, None, &AlignParams::new(false, 0)).unwrap();
        assert!(proper.transform.is_proper());
        assert!(proper.rms() > 0.1);

        let mirrored = align_points(&reference, &probe, None, &AlignParams::new(true, 0)).unwrap();
        assert!(!mirrored.transform.is_proper());
        assert!((mirrored.transform.rotation - rot * mirror).norm() < 1e-8);
        assert!(mirrored.rms() < 1e-6);
    }

    #[test]
    fn test_analytic_residual_matches_explicit() {
        let probe = tetrahedron();
        let reference = vec![
            Point3::new(0.1, -0.2, 0.05),
            Point3::new(1.4, 0.3, 0.1),
            Point3::new(-0.2, 1.0, 0.3),
            Point3::new(0.5, 0.2, 1.5),
            Point3::new(-0.6, 1.2, 0.9),
        ];
        let weights = [1.0, 2.0, 0.5, 3.0, 1.5];
        for reflect in [false, true] {
            let sup = align_points(&reference, &probe, Some(&weights), &AlignParams::new(reflect, 0)).unwrap();
            let ssr = explicit_ssr(&reference, &probe, Some(&weights), &sup.transform);
            assert!((sup.ssr - ssr).abs() < 1e-9, "reflect={} analytic={} explicit={}", reflect, sup.ssr, ssr);
        }
    }

    #[test]
    fn test_single_point() {
        let sup = align_points(
            &[Point3::new(1.0, 2.0, 3.0)],
            &[Point3::new(-1.0, 0.0, 1.0)],
            None,
            &AlignParams::default(),
        )
        .unwrap();
        assert_eq!(sup.transform.rotation, Matrix3::identity());
        assert_eq!(sup.transform.translation, Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(sup.ssr, 0.0);
    }

    #[test]
    fn test_weighting_pulls_point_closer() {
        // Three colinear reference points and a bent probe: no rigid fit is exact
        let reference = vec![Point3::new(-1.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let probe = vec![Point3::new(-1.0, 0.0, 0.0), Point3::new(0.0, 0.8, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let mut last = f64::MAX;
        for w in [1.0, 2.0, 5.0, 20.0, 100.0] {
            let weights = [1.0, w, 1.0];
            let sup = align_points(&reference, &probe, Some(&weights), &AlignParams::default()).unwrap();
            let dist_sq = (sup.transform.apply(&probe[1]) - reference[1]).norm_squared();
            assert!(dist_sq < last, "weight {} gave {} (previous {})", w, dist_sq, last);
            last = dist_sq;
        }
    }

    #[test]
    fn test_invalid_input() {
        let points = tetrahedron();
        let params = AlignParams::default();
        assert_eq!(
            align_points(&points, &points[..3], None, &params).unwrap_err(),
            AlignError::DimensionMismatch { expected: 5, found: 3 }
        );
        assert_eq!(
            align_points(&points, &points, Some(&[1.0, 1.0]), &params).unwrap_err(),
            AlignError::DimensionMismatch { expected: 5, found: 2 }
        );
        assert_eq!(
            align_points(&points, &points, Some(&[0.0; 5]), &params).unwrap_err(),
            AlignError::DegenerateWeights
        );
        assert_eq!(
            align_points(&points, &points, Some(&[1.0, -1.0, 1.0, 1.0, 1.0]), &params).unwrap_err(),
            AlignError::DegenerateWeights
        );
        assert_eq!(align_points(&[], &[], None, &params).unwrap_err(), AlignError::EmptyCorrespondence);
    }
}
