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

//! Upsell visibility.
//!
//! Sites hide upsell notices through, in order of precedence:
//!
//! 1. the `TEC_HIDE_UPSELL` constant,
//! 2. the legacy `TRIBE_HIDE_UPSELL` constant,
//! 3. the `TEC_HIDE_UPSELL` environment variable,
//! 4. the `tec_hide_upsell` filter.
//!
//! The first source present decides. A setting is either a flag, `"all"`, a truthy string, or
//! a `|`-delimited list of upsell slugs.

use std::env;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};
use tec_core::string::is_truthy;
use ustr::Ustr;

use crate::hooks::HookRegistry;

/// The filter consulted when no constant or environment variable is present.
pub const HIDE_UPSELL_FILTER: &str = "tec_hide_upsell";

/// The environment variable hiding upsells.
pub const HIDE_UPSELL_ENV_VAR: &str = "TEC_HIDE_UPSELL";

/// The slug standing for every upsell.
pub const ALL_UPSELLS: &str = "all";

/// A configured upsell-hiding value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpsellSetting {
    Flag(bool),
    Slugs(String),
}

impl Default for UpsellSetting {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl UpsellSetting {
    /// Returns whether this setting hides the upsell identified by `slug`.
    #[must_use]
    pub fn hides(&self, slug: &str) -> bool {
        match self {
            Self::Flag(hide) => *hide,
            Self::Slugs(value) => {
                value == ALL_UPSELLS
                    || is_truthy(value)
                    || value.split('|').any(|s| s == ALL_UPSELLS || s == slug)
            }
        }
    }
}

impl From<bool> for UpsellSetting {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for UpsellSetting {
    fn from(value: &str) -> Self {
        Self::Slugs(value.to_string())
    }
}

impl From<String> for UpsellSetting {
    fn from(value: String) -> Self {
        Self::Slugs(value)
    }
}

/// Where an upsell-hiding setting may come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
pub enum UpsellSource {
    #[strum(serialize = "TEC_HIDE_UPSELL constant")]
    TecConstant,
    #[strum(serialize = "TRIBE_HIDE_UPSELL constant")]
    TribeConstant,
    #[strum(serialize = "TEC_HIDE_UPSELL environment variable")]
    Environment,
    #[strum(serialize = "tec_hide_upsell filter")]
    Filter,
}

impl UpsellSource {
    /// The sources in the order they are consulted.
    pub const PRECEDENCE: [Self; 4] = [
        Self::TecConstant,
        Self::TribeConstant,
        Self::Environment,
        Self::Filter,
    ];
}

/// The statically configured upsell-hiding sources.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpsellConfig {
    /// The `TEC_HIDE_UPSELL` constant, when defined.
    pub tec_constant: Option<UpsellSetting>,
    /// The legacy `TRIBE_HIDE_UPSELL` constant, when defined.
    pub tribe_constant: Option<UpsellSetting>,
    /// The `TEC_HIDE_UPSELL` environment variable, when set.
    pub env_var: Option<String>,
}

impl UpsellConfig {
    /// Creates a new [`UpsellConfig`] with the environment variable read from the process.
    #[must_use]
    pub fn from_env() -> Self {
        let env_var = match env::var(HIDE_UPSELL_ENV_VAR) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(e) => {
                log::warn!("Ignoring {HIDE_UPSELL_ENV_VAR}: {e}");
                None
            }
        };

        Self {
            env_var,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tec_constant(mut self, value: impl Into<UpsellSetting>) -> Self {
        self.tec_constant = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_tribe_constant(mut self, value: impl Into<UpsellSetting>) -> Self {
        self.tribe_constant = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_env_var(mut self, value: impl Into<String>) -> Self {
        self.env_var = Some(value.into());
        self
    }

    /// Returns the setting held by a static `source`, `None` for the filter.
    #[must_use]
    pub fn setting(&self, source: UpsellSource) -> Option<UpsellSetting> {
        match source {
            UpsellSource::TecConstant => self.tec_constant.clone(),
            UpsellSource::TribeConstant => self.tribe_constant.clone(),
            UpsellSource::Environment => self.env_var.clone().map(UpsellSetting::Slugs),
            UpsellSource::Filter => None,
        }
    }
}

/// Returns whether the upsell identified by `slug` should be hidden.
///
/// Pass [`ALL_UPSELLS`] to ask whether upsells are hidden across the board.
pub fn tec_hide_upsell(slug: &str, config: &UpsellConfig, hooks: &HookRegistry) -> bool {
    for source in UpsellSource::PRECEDENCE {
        let setting = match source {
            UpsellSource::Filter => hooks.apply_filters(
                HIDE_UPSELL_FILTER,
                UpsellSetting::default(),
                &Ustr::from(slug),
            ),
            _ => match config.setting(source) {
                Some(setting) => setting,
                None => continue,
            },
        };

        let hide = setting.hides(slug);
        log::trace!("Upsell '{slug}' hidden={hide} by {source}");
        return hide;
    }

    false
}
