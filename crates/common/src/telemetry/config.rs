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

//! Telemetry library configuration.

use serde::{Deserialize, Serialize};

/// The telemetry server API the library reports to.
pub const DEFAULT_SERVER_URL: &str = "https://telemetry-api.moderntribe.qa/api/v1";

/// The prefix of the actions and filters the library fires.
pub const DEFAULT_HOOK_PREFIX: &str = "tec";

/// The slug identifying this plugin to the library.
pub const DEFAULT_PLUGIN_SLUG: &str = "tec-common";

/// Configuration handed to the telemetry library before it starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// The full URL of the telemetry server API.
    pub server_url: String,
    /// The unique prefix of actions and filters.
    pub hook_prefix: String,
    /// The unique plugin slug.
    pub stellar_slug: String,
}

impl Default for TelemetryConfig {
    /// Creates a new default [`TelemetryConfig`] instance.
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            hook_prefix: DEFAULT_HOOK_PREFIX.to_string(),
            stellar_slug: DEFAULT_PLUGIN_SLUG.to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Parses a configuration from JSON, defaulting every missing field.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid configuration object.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        anyhow::ensure!(
            value.is_object(),
            "Telemetry config must be a JSON object, was {value}"
        );
        Ok(serde_json::from_value(value)?)
    }
}
