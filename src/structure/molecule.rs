// File: molecule.rs
// Created: 2026-03-02 11:05:33
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use nalgebra::Point3;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::error::{AlignError, Result};
use crate::structure::conformer::{ConformationStore, Conformer, ConformerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chirality {
    #[default]
    Unspecified,
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom {
    pub atomic_num: u8,
    pub formal_charge: i8,
    pub chirality: Chirality,
}

impl Atom {
    pub fn new(atomic_num: u8) -> Self {
        Self { atomic_num, formal_charge: 0, chirality: Chirality::Unspecified }
    }

    pub fn with_charge(atomic_num: u8, formal_charge: i8) -> Self {
        Self { atomic_num, formal_charge, chirality: Chirality::Unspecified }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        atomic_number(symbol).map(Self::new)
    }
}

// Only the elements that appear in typical organic structures
pub fn atomic_number(symbol: &str) -> Option<u8> {
    let num = match symbol {
        "H" => 1,
        "B" => 5,
        "C" => 6,
        "N" => 7,
        "O" => 8,
        "F" => 9,
        "P" => 15,
        "S" => 16,
        "Cl" => 17,
        "Se" => 34,
        "Br" => 35,
        "I" => 53,
        _ => return None,
    };
    Some(num)
}

/// Labeled molecular graph plus its conformers.
///
/// Atom indices are the graph's node indices and are stable because atoms
/// are never removed.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    name: Option<String>,
    graph: UnGraph<Atom, BondOrder>,
    conformers: Vec<Conformer>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: &str) -> Self {
        Self { name: Some(name.to_string()), ..Self::default() }
    }

    pub fn name(&self) -> Option<&str> { self.name.as_deref() }
    pub fn set_name(&mut self, name: &str) { self.name = Some(name.to_string()); }
    pub fn graph(&self) -> &UnGraph<Atom, BondOrder> { &self.graph }
    pub fn num_atoms(&self) -> usize { self.graph.node_count() }
    pub fn num_bonds(&self) -> usize { self.graph.edge_count() }
    pub fn conformers(&self) -> &[Conformer] { &self.conformers }

    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.graph.add_node(atom).index()
    }

    pub fn add_bond(&mut self, a: usize, b: usize, order: BondOrder) -> Result<()> {
        self.check_atom(a)?;
        self.check_atom(b)?;
        self.graph.update_edge(NodeIndex::new(a), NodeIndex::new(b), order);
        Ok(())
    }

    pub fn atom(&self, idx: usize) -> Result<&Atom> {
        self.check_atom(idx)?;
        Ok(&self.graph[NodeIndex::new(idx)])
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<BondOrder> {
        if a >= self.num_atoms() || b >= self.num_atoms() {
            return None;
        }
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .map(|e| self.graph[e])
    }

    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.neighbors(NodeIndex::new(idx)).map(|n| n.index())
    }

    pub fn degree(&self, idx: usize) -> usize {
        self.neighbors(idx).count()
    }

    /// Adds a conformer with the next free id and returns that id.
    pub fn add_conformer(&mut self, positions: Vec<Point3<f64>>) -> Result<ConformerId> {
        let id = self.conformers.iter().map(|c| c.id() + 1).max().unwrap_or(0);
        self.add_conformer_with_id(id, positions)?;
        Ok(id)
    }

    pub fn add_conformer_with_id(&mut self, id: ConformerId, positions: Vec<Point3<f64>>) -> Result<()> {
        if positions.len() != self.num_atoms() {
            return Err(AlignError::DimensionMismatch {
                expected: self.num_atoms(),
                found: positions.len(),
            });
        }
        if self.conformers.iter().any(|c| c.id() == id) {
            return Err(AlignError::DuplicateConformationId(id));
        }
        self.conformers.push(Conformer::new(id, positions));
        Ok(())
    }

    fn check_atom(&self, idx: usize) -> Result<()> {
        if idx < self.num_atoms() {
            Ok(())
        } else {
            Err(AlignError::AtomIndexOutOfRange { index: idx, len: self.num_atoms() })
        }
    }
}

impl ConformationStore for Molecule {
    fn num_conformations(&self) -> usize {
        self.conformers.num_conformations()
    }

    fn conformation_ids(&self) -> Vec<ConformerId> {
        self.conformers.conformation_ids()
    }

    fn conformation(&self, id: Option<ConformerId>) -> Result<&Conformer> {
        self.conformers.conformation(id)
    }

    fn conformation_mut(&mut self, id: Option<ConformerId>) -> Result<&mut Conformer> {
        self.conformers.conformation_mut(id)
    }
}
