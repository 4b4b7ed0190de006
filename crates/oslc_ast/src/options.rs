// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

use std::env;

/// Switches that change how the AST builder reports and classifies things.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Report every warning as an error (`-Werror`). Among other things this
    /// makes writing to a non-output parameter fatal.
    pub warnings_as_errors: bool,
    /// Keep per-variant tallies of live AST nodes.
    pub count_nodes: bool,
    /// Classify locals whose name starts with `__debug_tmp__` as temporaries.
    pub debug_temps: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            warnings_as_errors: false,
            count_nodes: cfg!(debug_assertions),
            debug_temps: cfg!(debug_assertions),
        }
    }
}

impl CompilerOptions {
    pub fn new() -> CompilerOptions {
        CompilerOptions::default()
    }

    /// Start from the defaults and apply `OSLC_WERROR`, `OSLC_COUNT_NODES` and
    /// `OSLC_DEBUG_TEMPS`, each of which takes `1`/`true`/`yes`/`on` or
    /// `0`/`false`/`no`/`off`. Unset or unrecognized values keep the default.
    pub fn from_env() -> CompilerOptions {
        let defaults = CompilerOptions::default();
        CompilerOptions {
            warnings_as_errors: env_flag("OSLC_WERROR").unwrap_or(defaults.warnings_as_errors),
            count_nodes: env_flag("OSLC_COUNT_NODES").unwrap_or(defaults.count_nodes),
            debug_temps: env_flag("OSLC_DEBUG_TEMPS").unwrap_or(defaults.debug_temps),
        }
    }

    pub fn with_warnings_as_errors(mut self, val: bool) -> CompilerOptions {
        self.warnings_as_errors = val;
        self
    }

    pub fn with_count_nodes(mut self, val: bool) -> CompilerOptions {
        self.count_nodes = val;
        self
    }

    pub fn with_debug_temps(mut self, val: bool) -> CompilerOptions {
        self.debug_temps = val;
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|val| parse_flag(&val))
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[test]
fn test_parse_flag() {
    assert_eq!(parse_flag("1"), Some(true));
    assert_eq!(parse_flag(" On "), Some(true));
    assert_eq!(parse_flag("off"), Some(false));
    assert_eq!(parse_flag("maybe"), None);
}

#[test]
fn test_builder() {
    let opts = CompilerOptions::new()
        .with_warnings_as_errors(true)
        .with_count_nodes(false);
    assert!(opts.warnings_as_errors);
    assert!(!opts.count_nodes);
}
