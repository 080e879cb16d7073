// File: oracle.rs
// Created: 2026-03-05 09:31:58
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashSet;

use crate::matching::query::{AtomQuery, BondQuery, MoleculeQuery};
use crate::structure::correspondence::Correspondence;
use crate::structure::molecule::{Atom, BondOrder, Molecule};
use crate::utils::config::DEFAULT_MAX_MATCHES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchParams {
    pub recursion_possible: bool,
    pub use_chirality: bool,
    pub use_query_query_matches: bool,
    /// Drop matches that cover the same set of target atoms
    pub uniquify: bool,
    pub max_matches: usize,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            recursion_possible: true,
            use_chirality: false,
            use_query_query_matches: false,
            uniquify: true,
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }
}

/// Substructure matcher.
///
/// Each returned correspondence maps query (probe) atom indices onto target
/// (reference) atom indices. The order of the returned list must be
/// deterministic: the best-RMS search breaks ties by it.
pub trait CorrespondenceOracle {
    fn substruct_matches(
        &self,
        target: &Molecule,
        query: &MoleculeQuery,
        params: &MatchParams,
    ) -> Vec<Correspondence>;
}

/// Backtracking substructure matcher over the `petgraph` molecule graphs.
///
/// Every query bond must be present in the target, but the target may carry
/// extra bonds among matched atoms (ring closures), so this is a monomorphism
/// search rather than an induced-subgraph one. Query atoms are assigned in
/// index order and target candidates are tried in index order, which fixes the
/// output order.
///
/// Queries built here carry no recursive sub-patterns and the target is a plain
/// molecule, so `recursion_possible` and `use_query_query_matches` do not
/// change the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubgraphOracle;

impl CorrespondenceOracle for SubgraphOracle {
    fn substruct_matches(
        &self,
        target: &Molecule,
        query: &MoleculeQuery,
        params: &MatchParams,
    ) -> Vec<Correspondence> {
        if query.num_atoms() == 0 || query.num_atoms() > target.num_atoms() || params.max_matches == 0 {
            return Vec::new();
        }
        let mut search = MatchState {
            query: query.graph(),
            target: target.graph(),
            params,
            mapping: Vec::with_capacity(query.num_atoms()),
            used: vec![false; target.num_atoms()],
            seen: FxHashSet::default(),
            matches: Vec::new(),
        };
        search.extend();
        search.matches
    }
}

struct MatchState<'a> {
    query: &'a UnGraph<AtomQuery, BondQuery>,
    target: &'a UnGraph<Atom, BondOrder>,
    params: &'a MatchParams,
    /// Target node for query nodes `0..mapping.len()`
    mapping: Vec<usize>,
    used: Vec<bool>,
    seen: FxHashSet<Vec<usize>>,
    matches: Vec<Correspondence>,
}

impl MatchState<'_> {
    fn done(&self) -> bool {
        self.matches.len() >= self.params.max_matches
    }

    fn extend(&mut self) {
        let q = self.mapping.len();
        if q == self.query.node_count() {
            self.record();
            return;
        }
        // Anchor on an already mapped neighbour to restrict candidates
        let anchor = self
            .query
            .neighbors(NodeIndex::new(q))
            .map(|n| n.index())
            .filter(|&n| n < q)
            .min();
        let candidates: Vec<usize> = match anchor {
            Some(a) => {
                let mut c: Vec<usize> =
                    self.target.neighbors(NodeIndex::new(self.mapping[a])).map(|n| n.index()).collect();
                c.sort_unstable();
                c.dedup();
                c
            }
            None => (0..self.target.node_count()).collect(),
        };
        for t in candidates {
            if self.done() {
                return;
            }
            if self.used[t] || !self.feasible(q, t) {
                continue;
            }
            self.used[t] = true;
            self.mapping.push(t);
            self.extend();
            self.mapping.pop();
            self.used[t] = false;
        }
    }

    /// Atom predicate plus every bond back to the mapped part of the query.
    fn feasible(&self, q: usize, t: usize) -> bool {
        let q_node = NodeIndex::new(q);
        let t_node = NodeIndex::new(t);
        if !self.query[q_node].matches(&self.target[t_node], self.params.use_chirality) {
            return false;
        }
        if self.target.neighbors(t_node).count() < self.query.neighbors(q_node).count() {
            return false;
        }
        self.query.edges(q_node).all(|edge| {
            let other = if edge.source() == q_node { edge.target() } else { edge.source() };
            if other.index() >= q {
                return true;
            }
            let t_other = NodeIndex::new(self.mapping[other.index()]);
            self.target
                .find_edge(t_node, t_other)
                .map_or(false, |e| edge.weight().matches(&self.target[e]))
        })
    }

    fn record(&mut self) {
        if self.params.uniquify {
            let mut key = self.mapping.clone();
            key.sort_unstable();
            if !self.seen.insert(key) {
                return;
            }
        }
        // Every query node is mapped, so the pair list is never empty
        if let Ok(corr) = Correspondence::new(self.mapping.iter().copied().enumerate().collect()) {
            self.matches.push(corr);
        }
    }
}
