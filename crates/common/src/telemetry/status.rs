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

//! Opt-in status persistence.
//!
//! The status of every plugin sharing the telemetry library lives in a single option:
//!
//! ```json
//! {"token": "…", "plugins": {"tec-common": {"optin": true}, "event-tickets": {"optin": 1}}}
//! ```
//!
//! The record is shared with other writers, so it is kept as untyped JSON: reads look up a
//! single flag with loose truthiness and writes patch only `plugins.{slug}.optin`.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::options::{OptionStore, is_truthy_option};

/// The option holding the telemetry status record.
pub const TELEMETRY_OPTION: &str = "stellarwp_telemetry";

const PLUGINS_KEY: &str = "plugins";
const OPTIN_KEY: &str = "optin";

/// The persisted telemetry status record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusRecord(Map<String, Value>);

impl StatusRecord {
    /// Wraps a stored option value, `None` when it is not a JSON object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns the stored opt-in flag of `slug`, if any.
    ///
    /// Any non-null flag counts, cast to a boolean the way the option was written.
    #[must_use]
    pub fn optin(&self, slug: &str) -> Option<bool> {
        self.0
            .get(PLUGINS_KEY)?
            .as_object()?
            .get(slug)?
            .as_object()?
            .get(OPTIN_KEY)
            .filter(|v| !v.is_null())
            .map(is_truthy_option)
    }

    /// Sets the opt-in flag of `slug`, leaving every other entry untouched.
    ///
    /// Empty arrays stand in for empty objects and are replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if `plugins` or the entry of `slug` holds anything else.
    pub fn set_optin(&mut self, slug: &str, status: bool) -> anyhow::Result<()> {
        let plugins = object_entry(&mut self.0, PLUGINS_KEY)?;
        let plugin = object_entry(plugins, slug)?;
        plugin.insert(OPTIN_KEY.to_string(), Value::Bool(status));
        Ok(())
    }

    /// Returns the record as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
) -> anyhow::Result<&'a mut Map<String, Value>> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    if matches!(entry, Value::Array(a) if a.is_empty()) {
        *entry = Value::Object(Map::new());
    }

    match entry {
        Value::Object(object) => Ok(object),
        other => anyhow::bail!("Expected an object at '{key}', was {other}"),
    }
}

/// Reads and writes the opt-in status of one plugin.
#[derive(Clone, Debug)]
pub struct OptInStatus {
    options: Rc<dyn OptionStore>,
    slug: String,
}

impl OptInStatus {
    /// Creates a new [`OptInStatus`] instance for `slug`.
    #[must_use]
    pub fn new(options: Rc<dyn OptionStore>, slug: impl Into<String>) -> Self {
        Self {
            options,
            slug: slug.into(),
        }
    }

    /// Returns the plugin slug this status applies to.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the persisted record, or an empty one when absent or unreadable.
    #[must_use]
    pub fn get_option(&self) -> StatusRecord {
        let Some(value) = self.options.get_option(TELEMETRY_OPTION) else {
            return StatusRecord::default();
        };

        StatusRecord::from_value(value).unwrap_or_else(|| {
            log::warn!("Ignoring unreadable '{TELEMETRY_OPTION}' option: not an object");
            StatusRecord::default()
        })
    }

    /// Persists `status` as the opt-in flag of this plugin.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record cannot be patched, in which case it is left as
    /// is, or if the store rejects the write.
    pub fn set_status(&self, status: bool) -> anyhow::Result<()> {
        let mut record = match self.options.get_option(TELEMETRY_OPTION) {
            None => StatusRecord::default(),
            Some(value) => StatusRecord::from_value(value).ok_or_else(|| {
                anyhow::anyhow!("Refusing to overwrite unreadable '{TELEMETRY_OPTION}' option")
            })?,
        };
        record.set_optin(&self.slug, status)?;

        self.options
            .update_option(TELEMETRY_OPTION, record.into_value())?;
        log::debug!("Set opt-in status of '{}' to {status}", self.slug);
        Ok(())
    }

    /// Returns whether this plugin is opted in.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.get_option().optin(&self.slug).unwrap_or(false)
    }
}

/// Opts plugins in on behalf of the site.
#[derive(Clone, Debug)]
pub struct OptInSubscriber {
    status: OptInStatus,
}

impl OptInSubscriber {
    /// Creates a new [`OptInSubscriber`] instance.
    #[must_use]
    pub const fn new(status: OptInStatus) -> Self {
        Self { status }
    }

    /// Marks the plugin as opted in.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be persisted.
    pub fn opt_in(&self) -> anyhow::Result<()> {
        self.status.set_status(true)?;
        log::info!("Opted '{}' in to telemetry", self.status.slug());
        Ok(())
    }
}
