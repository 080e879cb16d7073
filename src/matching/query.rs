// File: query.rs
// Created: 2026-03-04 10:26:13
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use petgraph::graph::{NodeIndex, UnGraph};

use crate::error::{AlignError, Result};
use crate::structure::molecule::{Atom, BondOrder, Chirality, Molecule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtomQuery {
    pub atomic_num: u8,
    /// 0 matches any charge
    pub formal_charge: i8,
    pub chirality: Chirality,
}

impl AtomQuery {
    pub fn matches(&self, atom: &Atom, use_chirality: bool) -> bool {
        if self.atomic_num != atom.atomic_num {
            return false;
        }
        if self.formal_charge != 0 && self.formal_charge != atom.formal_charge {
            return false;
        }
        !use_chirality
            || self.chirality == Chirality::Unspecified
            || self.chirality == atom.chirality
    }
}

impl From<&Atom> for AtomQuery {
    fn from(atom: &Atom) -> Self {
        Self {
            atomic_num: atom.atomic_num,
            formal_charge: atom.formal_charge,
            chirality: atom.chirality,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondQuery {
    Order(BondOrder),
    SingleOrDouble,
}

impl BondQuery {
    pub fn matches(&self, order: &BondOrder) -> bool {
        match self {
            BondQuery::Order(expected) => expected == order,
            BondQuery::SingleOrDouble => matches!(order, BondOrder::Single | BondOrder::Double),
        }
    }
}

/// Query graph derived from a molecule; node `i` stands for atom `i`.
#[derive(Debug, Clone)]
pub struct MoleculeQuery {
    graph: UnGraph<AtomQuery, BondQuery>,
}

impl MoleculeQuery {
    pub fn from_molecule(mol: &Molecule) -> Self {
        let graph = mol
            .graph()
            .map(|_, atom| AtomQuery::from(atom), |_, order| BondQuery::Order(*order));
        Self { graph }
    }

    pub fn graph(&self) -> &UnGraph<AtomQuery, BondQuery> { &self.graph }
    pub fn num_atoms(&self) -> usize { self.graph.node_count() }

    pub fn atom(&self, idx: usize) -> Option<&AtomQuery> {
        self.graph.node_weight(NodeIndex::new(idx))
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<&BondQuery> {
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .and_then(|e| self.graph.edge_weight(e))
    }

    /// Lets the atom match its element regardless of charge.
    pub fn neutralize_atom(&mut self, idx: usize) -> Result<()> {
        let len = self.num_atoms();
        let atom = self
            .graph
            .node_weight_mut(NodeIndex::new(idx))
            .ok_or(AlignError::AtomIndexOutOfRange { index: idx, len })?;
        atom.formal_charge = 0;
        Ok(())
    }

    pub fn relax_bond(&mut self, a: usize, b: usize) -> Result<()> {
        let edge = self
            .graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .ok_or_else(|| AlignError::Pattern(format!("could not find expected bond {}-{}", a, b)))?;
        self.graph[edge] = BondQuery::SingleOrDouble;
        Ok(())
    }
}
