// File: log.rs
// Created: 2023-12-05 21:05:10
// Author: Hyunbin Kim (khb7840@gmail.com)
// Copyright © 2023 Hyunbin Kim, All rights reserved

// Colored string for log
pub const INFO: &str = "\x1b[1;32m[INFO]\x1b[0m";
pub const FAIL: &str = "\x1b[1;31m[FAIL]\x1b[0m";
pub const WARN: &str = "\x1b[1;33m[WARN]\x1b[0m";
pub const DONE: &str = "\x1b[1;34m[DONE]\x1b[0m";

pub fn log_msg(prefix: &str, msg: &str) -> String { format!("{} {}", prefix, msg) }
pub fn print_log_msg(prefix: &str, msg: &str) { eprintln!("{}", log_msg(prefix, msg)); }

/// Warning attributed to the operation that raised it.
pub fn warn_msg_in(function: &str, msg: &str) -> String {
    log_msg(WARN, &format!("Warning in {}: {}", function, msg))
}
pub fn warn_in(function: &str, msg: &str) { eprintln!("{}", warn_msg_in(function, msg)); }

/// Message for candidate sets large enough to slow the search down noticeably.
pub fn many_matches_msg(num_matches: usize, mol_name: Option<&str>) -> String {
    format!(
        "{} matches detected for molecule {}, this may lead to a performance slowdown.",
        num_matches,
        mol_name.unwrap_or("")
    )
}
