// File: pattern.rs
// Created: 2026-03-04 14:55:02
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved
// Symmetrization of conjugated terminal groups (carboxylate, amidinium, nitro, ...)

use once_cell::sync::OnceCell;
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;

use crate::error::{AlignError, Result};
use crate::matching::query::MoleculeQuery;
use crate::structure::molecule::{atomic_number, BondOrder, Molecule};

pub const TERMINAL_ATOM_TEMPLATE: &str = "{atomPattern}";
pub const TERMINAL_ATOM_PATTERN: &str = "O,N;D1";

static TERMINAL_PAIR: OnceCell<TerminalPairPattern> = OnceCell::new();
static DEGREE_RE: OnceCell<Regex> = OnceCell::new();
static PLACEHOLDER_RE: OnceCell<Regex> = OnceCell::new();

fn cached_regex(cell: &'static OnceCell<Regex>, pattern: &str) -> Result<&'static Regex> {
    cell.get_or_try_init(|| Regex::new(pattern).map_err(|e| AlignError::Pattern(e.to_string())))
}

/// Turns pattern text into a query object.
///
/// `{name}` placeholders in the text are replaced from `substitutions` first.
pub trait PatternCompiler {
    type Query;
    fn compile(&self, text: &str, substitutions: &FxHashMap<String, String>) -> Result<Self::Query>;
}

/// Element list with an optional degree constraint, e.g. `O,N;D1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomPrimitive {
    pub elements: Vec<u8>,
    pub degree: Option<usize>,
}

impl AtomPrimitive {
    pub fn matches(&self, mol: &Molecule, idx: usize) -> bool {
        let Ok(atom) = mol.atom(idx) else {
            return false;
        };
        self.elements.contains(&atom.atomic_num)
            && self.degree.map_or(true, |d| mol.degree(idx) == d)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AtomPrimitiveCompiler;

impl PatternCompiler for AtomPrimitiveCompiler {
    type Query = AtomPrimitive;

    fn compile(&self, text: &str, substitutions: &FxHashMap<String, String>) -> Result<AtomPrimitive> {
        let expanded = expand_placeholders(text, substitutions)?;
        let degree_re = cached_regex(&DEGREE_RE, r"^D(\d+)$")?;

        let mut elements = Vec::new();
        let mut degree = None;
        for term in expanded.split(';').map(str::trim) {
            if let Some(caps) = degree_re.captures(term) {
                let d = caps[1]
                    .parse::<usize>()
                    .map_err(|e| AlignError::Pattern(e.to_string()))?;
                degree = Some(d);
                continue;
            }
            for symbol in term.split(',').map(str::trim) {
                let num = atomic_number(symbol)
                    .ok_or_else(|| AlignError::Pattern(format!("unknown element `{}` in `{}`", symbol, expanded)))?;
                elements.push(num);
            }
        }
        if elements.is_empty() {
            return Err(AlignError::Pattern(format!("no elements in `{}`", expanded)));
        }
        Ok(AtomPrimitive { elements, degree })
    }
}

fn expand_placeholders(text: &str, substitutions: &FxHashMap<String, String>) -> Result<String> {
    let placeholder = cached_regex(&PLACEHOLDER_RE, r"\{(\w+)\}")?;
    if let Some(missing) = placeholder
        .captures_iter(text)
        .find(|caps| !substitutions.contains_key(&caps[0]))
    {
        return Err(AlignError::Pattern(format!("no substitution for `{}`", &missing[0])));
    }
    let expanded = placeholder.replace_all(text, |caps: &Captures| {
        substitutions.get(&caps[0]).cloned().unwrap_or_default()
    });
    Ok(expanded.into_owned())
}

/// Terminal atom `X` bonded to a center `C` that carries a second terminal
/// atom `Y` of the same kind, with `X-C=Y` or `X=C-Y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalPairPattern {
    terminal: AtomPrimitive,
}

impl TerminalPairPattern {
    pub fn new(terminal: AtomPrimitive) -> Self {
        Self { terminal }
    }

    /// `(terminal atom, center atom)` for each terminal atom of a conjugated pair.
    pub fn find(&self, mol: &Molecule) -> Vec<(usize, usize)> {
        let mut hits = Vec::new();
        for x in 0..mol.num_atoms() {
            if !self.terminal.matches(mol, x) {
                continue;
            }
            for c in mol.neighbors(x) {
                let Some(xc) = mol.bond_between(x, c) else { continue };
                let conjugated = mol.neighbors(c).filter(|&y| y != x).any(|y| {
                    self.terminal.matches(mol, y)
                        && matches!(
                            (xc, mol.bond_between(c, y)),
                            (BondOrder::Single, Some(BondOrder::Double))
                                | (BondOrder::Double, Some(BondOrder::Single))
                        )
                });
                if conjugated {
                    hits.push((x, c));
                }
            }
        }
        hits
    }
}

/// Compiled once per process; immutable afterwards.
pub fn terminal_pair_pattern() -> Result<&'static TerminalPairPattern> {
    TERMINAL_PAIR.get_or_try_init(|| -> Result<TerminalPairPattern> {
        let mut substitutions = FxHashMap::default();
        substitutions.insert(TERMINAL_ATOM_TEMPLATE.to_string(), TERMINAL_ATOM_PATTERN.to_string());
        let terminal = AtomPrimitiveCompiler.compile(TERMINAL_ATOM_TEMPLATE, &substitutions)?;
        Ok(TerminalPairPattern::new(terminal))
    })
}

/// Makes the two terminal atoms of each conjugated pair indistinguishable to
/// the matcher: their query charge is cleared and the bond to the center
/// accepts single or double.
pub fn symmetrize_terminal_atoms(mol: &Molecule, query: &mut MoleculeQuery) -> Result<()> {
    for (terminal, center) in terminal_pair_pattern()?.find(mol) {
        query.neutralize_atom(terminal)?;
        query.relax_bond(terminal, center)?;
    }
    Ok(())
}
