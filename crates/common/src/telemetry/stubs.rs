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

//! Test stubs for the telemetry host and library.

use std::{
    cell::{Cell, RefCell},
    path::{Path, PathBuf},
    rc::Rc,
};

use rstest::fixture;

use super::{
    config::TelemetryConfig,
    core::{Telemetry, TelemetryContainer},
    host::{PluginHost, TelemetryLibrary},
    options::InMemoryOptionStore,
};
use crate::hooks::HookRegistry;

/// Host with a configurable plugin file and user.
#[derive(Debug)]
pub struct StubPluginHost {
    plugin_file: RefCell<PathBuf>,
    display_name: String,
}

impl StubPluginHost {
    #[must_use]
    pub fn new(plugin_file: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            plugin_file: RefCell::new(plugin_file.into()),
            display_name: display_name.into(),
        }
    }

    pub fn set_plugin_file(&self, plugin_file: impl Into<PathBuf>) {
        self.plugin_file.replace(plugin_file.into());
    }
}

impl PluginHost for StubPluginHost {
    fn parent_plugin_file(&self) -> PathBuf {
        self.plugin_file.borrow().clone()
    }

    fn current_user_display_name(&self) -> String {
        self.display_name.clone()
    }

    fn resource_url(&self, path: &str) -> String {
        format!("https://example.com/common/{path}")
    }
}

/// Library recording how it was configured and started.
#[derive(Debug, Default)]
pub struct StubTelemetryLibrary {
    configured: RefCell<Option<TelemetryConfig>>,
    initialized_with: RefCell<Option<PathBuf>>,
    fail_init: Cell<bool>,
}

impl StubTelemetryLibrary {
    #[must_use]
    pub fn configured(&self) -> Option<TelemetryConfig> {
        self.configured.borrow().clone()
    }

    #[must_use]
    pub fn initialized_with(&self) -> Option<PathBuf> {
        self.initialized_with.borrow().clone()
    }

    pub fn fail_init(&self, fail: bool) {
        self.fail_init.set(fail);
    }
}

impl TelemetryLibrary for StubTelemetryLibrary {
    fn configure(&self, config: &TelemetryConfig) -> anyhow::Result<()> {
        self.configured.replace(Some(config.clone()));
        Ok(())
    }

    fn init(&self, plugin_file: &Path) -> anyhow::Result<()> {
        if self.fail_init.get() {
            anyhow::bail!("Telemetry server refused {}", plugin_file.display());
        }
        self.initialized_with.replace(Some(plugin_file.to_path_buf()));
        Ok(())
    }
}

/// A [`Telemetry`] wired to stubs, with handles on each collaborator.
#[derive(Debug)]
pub struct TelemetryFixture {
    pub telemetry: Telemetry,
    pub hooks: Rc<HookRegistry>,
    pub host: Rc<StubPluginHost>,
    pub library: Rc<StubTelemetryLibrary>,
    pub options: Rc<InMemoryOptionStore>,
}

#[fixture]
pub fn telemetry_fixture() -> TelemetryFixture {
    let hooks = Rc::new(HookRegistry::new());
    let host = Rc::new(StubPluginHost::new(
        "/var/www/wp-content/plugins/the-events-calendar/the-events-calendar.php",
        "Ada & Co",
    ));
    let library = Rc::new(StubTelemetryLibrary::default());
    let options = Rc::new(InMemoryOptionStore::new());

    let container = TelemetryContainer {
        hooks: hooks.clone(),
        host: host.clone(),
        library: library.clone(),
        options: options.clone(),
    };

    TelemetryFixture {
        telemetry: Telemetry::new(TelemetryConfig::default(), container),
        hooks,
        host,
        library,
        options,
    }
}
