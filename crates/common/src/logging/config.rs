// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Logging configuration types and parsing.
//!
//! # Spec String Format
//!
//! The `TEC_LOG` environment variable uses a semicolon-separated format:
//!
//! ```text
//! stdout=Info;tec_common::telemetry=Debug;is_colored=false
//! ```
//!
//! ## Supported Keys
//!
//! | Key                   | Type      | Description                                  |
//! |-----------------------|-----------|----------------------------------------------|
//! | `stdout`              | Log level | Maximum level for stdout output.             |
//! | `is_colored`          | Boolean   | Enable ANSI colors (default: true).          |
//! | `print_config`        | Boolean   | Print config to stdout at startup.           |
//! | `log_components_only` | Boolean   | Only log components with explicit filters.   |
//! | `<component>`         | Log level | Component-specific log level (exact match).  |
//! | `<module::path>`      | Log level | Module-specific log level (prefix match).    |
//!
//! ## Log Levels
//!
//! All log levels are case-insensitive: `Off`, `Error`, `Warn`, `Info`, `Debug`, `Trace`.
//!
//! ## Boolean Values
//!
//! - Bare flag: `is_colored` → true
//! - Explicit: `is_colored=true`, `is_colored=false`, `is_colored=0`, `is_colored=no`

use std::env;

use ahash::AHashMap;
use log::LevelFilter;
use ustr::Ustr;

use super::parse_level_filter_str;

/// The environment variable holding the logger spec string.
pub const LOG_ENV_VAR: &str = "TEC_LOG";

/// Configuration for the logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Maximum log level for stdout output.
    pub stdout_level: LevelFilter,
    /// Per-component log level overrides (exact match).
    pub component_level: AHashMap<Ustr, LevelFilter>,
    /// Per-module path log level overrides (prefix match).
    pub module_level: AHashMap<Ustr, LevelFilter>,
    /// Log only components with explicit level filters.
    pub log_components_only: bool,
    /// Use ANSI color codes in output.
    pub is_colored: bool,
    /// Print configuration to stdout at startup.
    pub print_config: bool,
}

impl Default for LoggerConfig {
    /// Creates a new default [`LoggerConfig`] instance.
    fn default() -> Self {
        Self {
            stdout_level: LevelFilter::Info,
            component_level: AHashMap::new(),
            module_level: AHashMap::new(),
            log_components_only: false,
            is_colored: true,
            print_config: false,
        }
    }
}

impl LoggerConfig {
    /// Parses a configuration from a spec string.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec string contains invalid syntax or log levels.
    pub fn from_spec(spec: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();

        for kv in spec.split(';') {
            let kv = kv.trim();
            if kv.is_empty() {
                continue;
            }

            let Some((k, v)) = kv.split_once('=') else {
                match kv.to_lowercase().as_str() {
                    "log_components_only" => config.log_components_only = true,
                    "is_colored" => config.is_colored = true,
                    "print_config" => config.print_config = true,
                    _ => anyhow::bail!("Invalid spec pair: {kv}"),
                }
                continue;
            };

            let k = k.trim();
            let v = v.trim();

            match k.to_lowercase().as_str() {
                "is_colored" => config.is_colored = parse_bool_value(v),
                "log_components_only" => config.log_components_only = parse_bool_value(v),
                "print_config" => config.print_config = parse_bool_value(v),
                "stdout" => config.stdout_level = parse_level_filter_str(v)?,
                _ => {
                    let lvl = parse_level_filter_str(v)?;
                    if k.contains("::") {
                        config.module_level.insert(Ustr::from(k), lvl);
                    } else {
                        config.component_level.insert(Ustr::from(k), lvl);
                    }
                }
            }
        }

        Ok(config)
    }

    /// Parses configuration from the `TEC_LOG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or contains invalid syntax.
    pub fn from_env() -> anyhow::Result<Self> {
        let spec = env::var(LOG_ENV_VAR)?;
        Self::from_spec(&spec)
    }

    /// Returns the level filter applying to records from `target`.
    ///
    /// An exact component match wins over the longest matching module prefix. Without
    /// either, the stdout level applies unless only components are logged.
    #[must_use]
    pub fn level_for(&self, target: &str) -> LevelFilter {
        if let Some(lvl) = self.component_level.get(&Ustr::from(target)) {
            return *lvl;
        }

        let module_match = self
            .module_level
            .iter()
            .filter(|(path, _)| target.starts_with(path.as_str()))
            .max_by_key(|(path, _)| path.len())
            .map(|(_, lvl)| *lvl);

        match module_match {
            Some(lvl) => lvl,
            None if self.log_components_only => LevelFilter::Off,
            None => self.stdout_level,
        }
    }
}

/// Parses a boolean value from a string.
///
/// Returns `true` unless the value is explicitly "false", "0", or "no" (case-insensitive).
fn parse_bool_value(v: &str) -> bool {
    !matches!(v.to_lowercase().as_str(), "false" | "0" | "no")
}

/// Parses a log level from a string.
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.stdout_level, LevelFilter::Info);
        assert!(config.component_level.is_empty());
        assert!(config.module_level.is_empty());
        assert!(!config.log_components_only);
        assert!(config.is_colored);
        assert!(!config.print_config);
    }

    #[rstest]
    fn test_from_spec_empty_string() {
        let config = LoggerConfig::from_spec("").unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[rstest]
    fn test_from_spec_with_whitespace_and_trailing_semicolon() {
        let config = LoggerConfig::from_spec("  STDOUT = debug ; ").unwrap();
        assert_eq!(config.stdout_level, LevelFilter::Debug);
    }

    #[rstest]
    #[case("is_colored", true)]
    #[case("is_colored=true", true)]
    #[case("is_colored=false", false)]
    #[case("is_colored=0", false)]
    #[case("is_colored=no", false)]
    #[case("IS_COLORED=FALSE", false)]
    fn test_from_spec_is_colored(#[case] spec: &str, #[case] expected: bool) {
        let config = LoggerConfig::from_spec(spec).unwrap();
        assert_eq!(config.is_colored, expected);
    }

    #[rstest]
    fn test_from_spec_flags() {
        let config = LoggerConfig::from_spec("print_config;log_components_only").unwrap();
        assert!(config.print_config);
        assert!(config.log_components_only);
    }

    #[rstest]
    #[case("Off", LevelFilter::Off)]
    #[case("Error", LevelFilter::Error)]
    #[case("Warn", LevelFilter::Warn)]
    #[case("Warning", LevelFilter::Warn)]
    #[case("Info", LevelFilter::Info)]
    #[case("Debug", LevelFilter::Debug)]
    #[case("Trace", LevelFilter::Trace)]
    fn test_all_log_levels(#[case] level_str: &str, #[case] expected: LevelFilter) {
        let config = LoggerConfig::from_spec(&format!("stdout={level_str}")).unwrap();
        assert_eq!(config.stdout_level, expected);
    }

    #[rstest]
    fn test_from_spec_module_and_component() {
        let config =
            LoggerConfig::from_spec("tec_common::telemetry=Debug;Telemetry=Error").unwrap();
        assert_eq!(
            config.module_level[&Ustr::from("tec_common::telemetry")],
            LevelFilter::Debug
        );
        assert_eq!(
            config.component_level[&Ustr::from("Telemetry")],
            LevelFilter::Error
        );
    }

    #[rstest]
    fn test_from_spec_single_colon_is_component() {
        let config = LoggerConfig::from_spec("Component:Name=Info").unwrap();
        assert!(config.module_level.is_empty());
        assert!(
            config
                .component_level
                .contains_key(&Ustr::from("Component:Name"))
        );
    }

    #[rstest]
    #[case("stdout=InvalidLevel", "Invalid log level")]
    #[case("stdout=", "Invalid log level")]
    #[case("unknown_flag", "Invalid spec pair")]
    fn test_from_spec_errors(#[case] spec: &str, #[case] message: &str) {
        let result = LoggerConfig::from_spec(spec);
        assert!(result.unwrap_err().to_string().contains(message));
    }

    #[rstest]
    #[case("tec_common::telemetry::core", LevelFilter::Trace)]
    #[case("tec_common::telemetry", LevelFilter::Debug)]
    #[case("tec_common::hooks", LevelFilter::Warn)]
    #[case("Telemetry", LevelFilter::Error)]
    fn test_level_for(#[case] target: &str, #[case] expected: LevelFilter) {
        let config = LoggerConfig::from_spec(
            "stdout=Warn;tec_common::telemetry=Debug;tec_common::telemetry::core=Trace;Telemetry=Error",
        )
        .unwrap();
        assert_eq!(config.level_for(target), expected);
    }

    #[rstest]
    fn test_level_for_components_only() {
        let config = LoggerConfig::from_spec("log_components_only;Upsell=Info").unwrap();
        assert_eq!(config.level_for("Upsell"), LevelFilter::Info);
        assert_eq!(config.level_for("tec_common::hooks"), LevelFilter::Off);
    }
}
