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

//! Telemetry opt-in bootstrap.
//!
//! [`Telemetry`] configures the third-party telemetry library for this plugin and mediates
//! the plugin's opt-in state:
//!
//! - the opt-in modal arguments and whether the modal shows,
//! - saving the status submitted from the settings page,
//! - migrating sites that opted in through the legacy integration,
//! - reading the current status.
//!
//! Every decision point is exposed as a filter on the [`HookRegistry`](crate::hooks::HookRegistry).

pub mod config;
pub mod core;
pub mod host;
pub mod options;
pub mod status;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

// Re-exports
pub use self::{
    config::TelemetryConfig,
    core::{OptinArgs, Telemetry, TelemetryContainer},
    host::{PluginHost, SettingsForm, TelemetryLibrary},
    options::{InMemoryOptionStore, OptionStore},
    status::{OptInStatus, OptInSubscriber, StatusRecord},
};
