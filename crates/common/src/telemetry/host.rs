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

//! Seams to the host application and the telemetry library.

use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use tec_core::string::validate_bool;

use super::config::TelemetryConfig;

/// Services provided by the host application.
pub trait PluginHost: Debug {
    /// Returns the main file of the plugin bundling this library.
    fn parent_plugin_file(&self) -> PathBuf;

    /// Returns the display name of the current user, unescaped.
    fn current_user_display_name(&self) -> String;

    /// Returns the public URL of a bundled resource at `path`.
    fn resource_url(&self, path: &str) -> String;
}

/// The third-party telemetry client.
pub trait TelemetryLibrary: Debug {
    /// Applies `config` ahead of initialization.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is rejected.
    fn configure(&self, config: &TelemetryConfig) -> anyhow::Result<()>;

    /// Starts the library for the plugin at `plugin_file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the library fails to start.
    fn init(&self, plugin_file: &Path) -> anyhow::Result<()>;
}

/// The fields submitted with a settings page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsForm {
    fields: IndexMap<String, String>,
}

impl SettingsForm {
    /// Creates a new empty [`SettingsForm`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the form with `name` set to `value`.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the raw value submitted for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns the value submitted for `name` read as a boolean.
    ///
    /// Absent or unrecognized values read as `false`.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).and_then(validate_bool).unwrap_or(false)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SettingsForm {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
