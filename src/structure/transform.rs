// File: transform.rs
// Created: 2026-03-02 10:12:05
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Rotation (orthogonal, det ±1) followed by translation: `p' = R·p + t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self { rotation, translation }
    }

    pub fn identity() -> Self {
        Self { rotation: Matrix3::identity(), translation: Vector3::zeros() }
    }

    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self { rotation: Matrix3::identity(), translation }
    }

    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * point.coords + self.translation)
    }

    pub fn apply_all(&self, points: &mut [Point3<f64>]) {
        for point in points.iter_mut() {
            *point = self.apply(point);
        }
    }

    pub fn determinant(&self) -> f64 {
        self.rotation.determinant()
    }

    /// False when the rotation part contains a mirror.
    pub fn is_proper(&self) -> bool {
        self.determinant() > 0.0
    }

    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        m
    }
}
