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

//! Public API functions for interacting with the thread-local hook registry.

use ustr::Ustr;

use super::get_hook_registry;

/// Registers a filter on `hook` in the thread-local registry.
pub fn add_filter<T, C, F>(hook: &str, priority: Option<i32>, callback: F) -> Ustr
where
    T: 'static,
    C: 'static,
    F: Fn(&mut T, &C) + 'static,
{
    get_hook_registry().add_filter(hook, priority, callback)
}

/// Removes a filter from `hook` in the thread-local registry.
pub fn remove_filter(hook: &str, handler_id: Ustr) -> bool {
    get_hook_registry().remove_filter(hook, handler_id)
}

/// Returns whether the thread-local registry has a filter on `hook`.
#[must_use]
pub fn has_filter(hook: &str) -> bool {
    get_hook_registry().has_filter(hook)
}

/// Applies the filters registered on `hook` in the thread-local registry.
pub fn apply_filters<T: 'static, C: 'static>(hook: &str, value: T, context: &C) -> T {
    get_hook_registry().apply_filters(hook, value, context)
}

/// Registers an action on `hook` in the thread-local registry.
pub fn add_action<C, F>(hook: &str, priority: Option<i32>, callback: F) -> Ustr
where
    C: 'static,
    F: Fn(&C) + 'static,
{
    get_hook_registry().add_action(hook, priority, callback)
}

/// Removes an action from `hook` in the thread-local registry.
pub fn remove_action(hook: &str, handler_id: Ustr) -> bool {
    get_hook_registry().remove_action(hook, handler_id)
}

/// Returns whether the thread-local registry has an action on `hook`.
#[must_use]
pub fn has_action(hook: &str) -> bool {
    get_hook_registry().has_action(hook)
}

/// Fires `hook` on the thread-local registry.
pub fn do_action<C: 'static>(hook: &str, context: &C) {
    get_hook_registry().do_action(hook, context);
}

/// Returns how many times `hook` fired on the thread-local registry.
#[must_use]
pub fn did_action(hook: &str) -> usize {
    get_hook_registry().did_action(hook)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_thread_local_filter_round_trip() {
        let id = add_filter("api_test_filter", None, |v: &mut u32, _: &()| *v += 1);
        assert!(has_filter("api_test_filter"));
        assert_eq!(apply_filters("api_test_filter", 1_u32, &()), 2);
        assert!(remove_filter("api_test_filter", id));
        assert_eq!(apply_filters("api_test_filter", 1_u32, &()), 1);
    }

    #[rstest]
    fn test_thread_local_action_counts() {
        let id = add_action("api_test_action", None, |_: &()| {});
        assert!(has_action("api_test_action"));
        do_action("api_test_action", &());
        assert_eq!(did_action("api_test_action"), 1);
        assert!(remove_action("api_test_action", id));
        assert!(!has_action("api_test_action"));
    }
}
