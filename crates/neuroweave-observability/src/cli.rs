//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-neuroweave-engine`, `--debug-neuroweave-plasticity`,
//! etc. to raise one crate's log level without drowning in the others.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable read by [`parse_debug_flags`]
pub const DEBUG_ENV: &str = "NEUROWEAVE_DEBUG";

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use neuroweave_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-neuroweave-engine".to_string()]);
/// assert!(flags.is_enabled("neuroweave-engine"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();

        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }

        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string(), true);
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Get all enabled crates, sorted
    pub fn enabled_crates(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.enabled_crates.keys().collect();
        names.sort();
        names
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// `EnvFilter` directives for the enabled crates, falling back to `default_level`
    ///
    /// Format: "neuroweave-engine=debug,neuroweave_engine=debug,warn". Both the
    /// explicit log target and the module path of each crate are raised.
    pub fn to_filter_string_with_default(&self, default_level: &str) -> String {
        let mut filters = Vec::new();
        for crate_name in self.enabled_crates() {
            filters.push(format!("{}=debug", crate_name));
            let module_path = crate_name.replace('-', "_");
            if module_path != *crate_name {
                filters.push(format!("{}=debug", module_path));
            }
        }
        filters.push(default_level.to_string());
        filters.join(",")
    }

    /// Same as [`Self::to_filter_string_with_default`] with `info` for other crates
    pub fn to_filter_string(&self) -> String {
        self.to_filter_string_with_default("info")
    }

    fn merge_env_value(&mut self, env_var: &str) {
        if env_var == "all" {
            self.enable_all();
            return;
        }
        for crate_name in env_var.split(',') {
            let crate_name = crate_name.trim();
            if !crate_name.is_empty() {
                self.enable(crate_name);
            }
        }
    }
}

/// Helper function to parse debug flags from environment
///
/// Checks both command-line arguments and the `NEUROWEAVE_DEBUG` environment
/// variable. Environment variable format: comma-separated crate names, e.g.
/// "neuroweave-engine,neuroweave-plasticity", or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(env_var) = env::var(DEBUG_ENV) {
        flags.merge_env_value(&env_var);
    }

    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  NEUROWEAVE_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  NEUROWEAVE_DEBUG=all                               Enable debug for all crates

Examples:
  --debug-neuroweave-engine
  --debug-neuroweave-engine --debug-neuroweave-plasticity
  NEUROWEAVE_DEBUG=neuroweave-engine,neuroweave-plasticity
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-neuroweave-engine".to_string()]);
        assert!(flags.is_enabled("neuroweave-engine"));
        assert!(!flags.is_enabled("neuroweave-plasticity"));
    }

    #[test]
    fn test_unrelated_args_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "headless_sim".to_string(),
            "--preset".to_string(),
            "standard".to_string(),
        ]);
        assert!(!flags.any_enabled());
        assert_eq!(flags.to_filter_string(), "info");
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-neuroweave-engine".to_string()]);
        let filter = flags.to_filter_string_with_default("warn");
        assert_eq!(filter, "neuroweave-engine=debug,neuroweave_engine=debug,warn");
    }

    #[test]
    fn test_env_value_merge() {
        let mut flags = CrateDebugFlags::default();
        flags.merge_env_value(" neuroweave-config , ,neuroweave-neural");
        assert!(flags.is_enabled("neuroweave-config"));
        assert!(flags.is_enabled("neuroweave-neural"));
        assert_eq!(flags.enabled_crates().len(), 2);

        let mut flags = CrateDebugFlags::default();
        flags.merge_env_value("all");
        assert_eq!(flags.enabled_crates().len(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-neuroweave-engine".to_string()]);
        assert_eq!(flags.log_level("neuroweave-engine"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("neuroweave-config"), tracing::Level::INFO);
    }
}
