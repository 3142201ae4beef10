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

//! In-process filter and action hooks.
//!
//! # Filters and actions
//!
//! - **Filters** (`add_filter`, `apply_filters`): every handler registered on a hook name may
//!   rewrite the value passing through it. The result of the last handler is returned.
//! - **Actions** (`add_action`, `do_action`): every handler registered on a hook name is
//!   notified. The registry counts how many times each action fired.
//!
//! Both kinds carry a context value with the extra hook arguments, e.g. the plugin slug for
//! `tec_common_telemetry_do_optin_modal` or the submitted settings form for
//! `tribe_settings_save_field_opt-in-status`.
//!
//! # Architecture
//!
//! The registry uses thread-local storage. Each thread gets its own [`HookRegistry`],
//! avoiding synchronization overhead. Components that need an isolated registry (tests,
//! embedded hosts) may also construct one directly and pass it around as `Rc<HookRegistry>`.

mod api;
pub mod core;
pub mod handler;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

use std::{cell::OnceCell, rc::Rc};

pub use self::{
    api::*,
    core::{DEFAULT_PRIORITY, HookRegistry, HookSubscription},
    handler::{ActionHandler, FilterHandler, ShareableActionHandler, ShareableFilterHandler},
};

/// Inline capacity for handler buffers before heap allocation.
pub(super) const HANDLER_BUFFER_CAP: usize = 16;

thread_local! {
    static HOOK_REGISTRY: OnceCell<Rc<HookRegistry>> = const { OnceCell::new() };
}

/// Sets the thread-local hook registry.
///
/// # Panics
///
/// Panics if a hook registry has already been set for this thread.
pub fn set_hook_registry(registry: Rc<HookRegistry>) {
    HOOK_REGISTRY.with(|cell| {
        assert!(
            cell.set(registry).is_ok(),
            "Failed to set HookRegistry: already initialized for this thread"
        );
    });
}

/// Gets the thread-local hook registry.
///
/// If no registry has been set for this thread, a default one is created and initialized.
pub fn get_hook_registry() -> Rc<HookRegistry> {
    HOOK_REGISTRY.with(|cell| cell.get_or_init(|| Rc::new(HookRegistry::new())).clone())
}
