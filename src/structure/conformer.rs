// File: conformer.rs
// Created: 2026-03-02 10:40:51
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use nalgebra::Point3;

use crate::error::{AlignError, Result};
use crate::structure::transform::RigidTransform;

pub type ConformerId = u32;

/// One set of 3D positions for every atom of a molecule
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer {
    id: ConformerId,
    positions: Vec<Point3<f64>>,
}

impl Conformer {
    pub fn new(id: ConformerId, positions: Vec<Point3<f64>>) -> Self {
        Self { id, positions }
    }

    pub fn id(&self) -> ConformerId { self.id }
    pub fn num_atoms(&self) -> usize { self.positions.len() }
    pub fn positions(&self) -> &[Point3<f64>] { &self.positions }
    pub fn positions_mut(&mut self) -> &mut [Point3<f64>] { &mut self.positions }

    pub fn atom_pos(&self, idx: usize) -> Result<&Point3<f64>> {
        self.positions.get(idx).ok_or(AlignError::AtomIndexOutOfRange {
            index: idx,
            len: self.positions.len(),
        })
    }

    /// Positions of the given atoms, in the given order.
    pub fn select(&self, indices: &[usize]) -> Result<Vec<Point3<f64>>> {
        indices.iter().map(|&idx| self.atom_pos(idx).copied()).collect()
    }

    pub fn transform(&mut self, trans: &RigidTransform) {
        trans.apply_all(&mut self.positions);
    }
}

/// Id-addressed access to the conformers of one structure.
///
/// An id of `None` refers to the first stored conformer.
pub trait ConformationStore {
    fn num_conformations(&self) -> usize;
    /// Ids in insertion order
    fn conformation_ids(&self) -> Vec<ConformerId>;
    fn conformation(&self, id: Option<ConformerId>) -> Result<&Conformer>;
    fn conformation_mut(&mut self, id: Option<ConformerId>) -> Result<&mut Conformer>;
}

/// Plain conformer list, used directly by [`crate::structure::molecule::Molecule`].
impl ConformationStore for Vec<Conformer> {
    fn num_conformations(&self) -> usize {
        self.len()
    }

    fn conformation_ids(&self) -> Vec<ConformerId> {
        self.iter().map(|c| c.id()).collect()
    }

    fn conformation(&self, id: Option<ConformerId>) -> Result<&Conformer> {
        let conf = match id {
            None => self.first(),
            Some(id) => self.iter().find(|c| c.id() == id),
        };
        conf.ok_or(AlignError::InvalidConformationId(id))
    }

    fn conformation_mut(&mut self, id: Option<ConformerId>) -> Result<&mut Conformer> {
        let conf = match id {
            None => self.first_mut(),
            Some(id) => self.iter_mut().find(|c| c.id() == id),
        };
        conf.ok_or(AlignError::InvalidConformationId(id))
    }
}
