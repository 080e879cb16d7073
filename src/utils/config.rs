// File: config.rs
// Created: 2026-03-02 14:21:40
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2026 Hyunbin Kim, All rights reserved

use toml::map::Map;

use crate::error::{AlignError, Result};
use crate::structure::superpose::AlignParams;

pub const DEFAULT_MAX_ITERATIONS: u32 = 50;
/// Equal to the many-matches warning threshold, so an oracle honouring this
/// cap never returns enough candidates to trigger the warning.
pub const DEFAULT_MAX_MATCHES: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AlignConfig {
    /// Allow improper rotations (mirror images) in superposition
    pub reflect: bool,
    /// Reserved for iterative solvers; the SVD solver ignores it
    pub max_iterations: u32,
    /// Cap on the number of substructure matches requested from the oracle
    pub max_matches: usize,
    /// Treat conjugated terminal O/N pairs as interchangeable
    pub symmetrize: bool,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            reflect: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_matches: DEFAULT_MAX_MATCHES,
            symmetrize: true,
        }
    }
}

impl AlignConfig {
    pub fn new(reflect: bool, max_iterations: u32, max_matches: usize, symmetrize: bool) -> Self {
        Self { reflect, max_iterations, max_matches, symmetrize }
    }

    pub fn align_params(&self) -> AlignParams {
        AlignParams { reflect: self.reflect, max_iterations: self.max_iterations }
    }

    /// Missing keys keep their defaults; unknown keys are ignored.
    pub fn from_toml(toml: &toml::Value) -> Result<Self> {
        let mut config = Self::default();
        let table = toml
            .as_table()
            .ok_or_else(|| AlignError::Config("expected a table".to_string()))?;
        if let Some(value) = table.get("reflect") {
            config.reflect = value
                .as_bool()
                .ok_or_else(|| type_error("reflect", "boolean"))?;
        }
        if let Some(value) = table.get("max_iterations") {
            let iters = value
                .as_integer()
                .ok_or_else(|| type_error("max_iterations", "integer"))?;
            config.max_iterations = u32::try_from(iters)
                .map_err(|_| type_error("max_iterations", "non-negative 32-bit integer"))?;
        }
        if let Some(value) = table.get("max_matches") {
            let matches = value
                .as_integer()
                .ok_or_else(|| type_error("max_matches", "integer"))?;
            config.max_matches = usize::try_from(matches)
                .ok()
                .filter(|&m| m > 0)
                .ok_or_else(|| type_error("max_matches", "positive integer"))?;
        }
        if let Some(value) = table.get("symmetrize") {
            config.symmetrize = value
                .as_bool()
                .ok_or_else(|| type_error("symmetrize", "boolean"))?;
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| AlignError::Config(e.message().to_string()))?;
        Self::from_toml(&toml::Value::Table(table))
    }

    pub fn to_toml(&self) -> toml::Table {
        let mut map = Map::new();
        map.insert("reflect".to_string(), toml::Value::Boolean(self.reflect));
        map.insert("max_iterations".to_string(), toml::Value::Integer(self.max_iterations as i64));
        map.insert("max_matches".to_string(), toml::Value::Integer(self.max_matches as i64));
        map.insert("symmetrize".to_string(), toml::Value::Boolean(self.symmetrize));
        map
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&self.to_toml()).map_err(|e| AlignError::Config(e.to_string()))
    }
}

fn type_error(key: &str, expected: &str) -> AlignError {
    AlignError::Config(format!("`{}` must be a {}", key, expected))
}
