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

//! Core hook registry implementation.
//!
//! # Ordering
//!
//! Handlers run in ascending priority (default [`DEFAULT_PRIORITY`]); handlers sharing a
//! priority run in registration order.
//!
//! # Re-entrancy
//!
//! Matching handlers are copied out of the registry before any of them runs, so a handler
//! may add or remove hooks, or apply other filters, while being dispatched. Changes made
//! during a dispatch take effect from the next one.

use std::{
    any::Any,
    cell::{Cell, RefCell},
};

use ahash::AHashMap;
use smallvec::SmallVec;
use ustr::Ustr;

use super::{
    HANDLER_BUFFER_CAP,
    handler::{ShareableActionHandler, ShareableFilterHandler},
};

/// The priority used when none is given.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Represents the registration of a handler on a hook.
#[derive(Clone, Debug)]
pub struct HookSubscription<H> {
    /// The shareable handler for the subscription.
    pub handler: H,
    /// Store a copy of the handler ID for faster equality checks.
    pub handler_id: Ustr,
    /// Lower priorities run first.
    pub priority: i32,
    /// Registration order, breaks priority ties.
    pub sequence: u64,
}

/// An in-process filter and action registry.
///
/// Filters pass a value through every registered handler and return the result, actions
/// notify every registered handler. Both carry an arbitrary context value holding the extra
/// arguments of the hook.
#[derive(Debug, Default)]
pub struct HookRegistry {
    filters: RefCell<AHashMap<Ustr, Vec<HookSubscription<ShareableFilterHandler>>>>,
    actions: RefCell<AHashMap<Ustr, Vec<HookSubscription<ShareableActionHandler>>>>,
    action_counts: RefCell<AHashMap<Ustr, usize>>,
    next_sequence: Cell<u64>,
}

fn insert_sorted<H>(subs: &mut Vec<HookSubscription<H>>, sub: HookSubscription<H>) {
    let pos = subs.partition_point(|s| {
        (s.priority, s.sequence) <= (sub.priority, sub.sequence)
    });
    subs.insert(pos, sub);
}

impl HookRegistry {
    /// Creates a new empty [`HookRegistry`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_sequence(&self) -> u64 {
        let seq = self.next_sequence.get();
        self.next_sequence.set(seq + 1);
        seq
    }

    /// Registers a filter `handler` on `hook`, returning the handler ID.
    pub fn add_filter_handler(
        &self,
        hook: &str,
        handler: ShareableFilterHandler,
        priority: Option<i32>,
    ) -> Ustr {
        let hook = Ustr::from(hook);
        let handler_id = handler.id();
        let sub = HookSubscription {
            handler,
            handler_id,
            priority: priority.unwrap_or(DEFAULT_PRIORITY),
            sequence: self.next_sequence(),
        };

        let mut filters = self.filters.borrow_mut();
        let subs = filters.entry(hook).or_default();
        if subs.iter().any(|s| s.handler_id == handler_id) {
            log::warn!("Filter {handler_id} already registered on '{hook}'");
            return handler_id;
        }

        log::debug!(
            "Adding filter {handler_id} on '{hook}' with priority {}",
            sub.priority
        );
        insert_sorted(subs, sub);
        handler_id
    }

    /// Registers a typed filter `callback` on `hook`, returning the handler ID.
    pub fn add_filter<T, C, F>(&self, hook: &str, priority: Option<i32>, callback: F) -> Ustr
    where
        T: 'static,
        C: 'static,
        F: Fn(&mut T, &C) + 'static,
    {
        self.add_filter_handler(hook, ShareableFilterHandler::from_fn(callback), priority)
    }

    /// Removes the filter with `handler_id` from `hook`, returning whether it was registered.
    pub fn remove_filter(&self, hook: &str, handler_id: Ustr) -> bool {
        let hook = Ustr::from(hook);
        let mut filters = self.filters.borrow_mut();
        let Some(subs) = filters.get_mut(&hook) else {
            return false;
        };

        let count_before = subs.len();
        subs.retain(|s| s.handler_id != handler_id);
        let removed = subs.len() < count_before;

        if removed {
            log::debug!("Removed filter {handler_id} from '{hook}'");
        }
        removed
    }

    /// Returns whether any filter is registered on `hook`.
    #[must_use]
    pub fn has_filter(&self, hook: &str) -> bool {
        self.filters
            .borrow()
            .get(&Ustr::from(hook))
            .is_some_and(|subs| !subs.is_empty())
    }

    /// Returns the number of filters registered on `hook`.
    #[must_use]
    pub fn filter_count(&self, hook: &str) -> usize {
        self.filters
            .borrow()
            .get(&Ustr::from(hook))
            .map_or(0, Vec::len)
    }

    fn filter_handlers(&self, hook: &str) -> SmallVec<[ShareableFilterHandler; HANDLER_BUFFER_CAP]> {
        self.filters
            .borrow()
            .get(&Ustr::from(hook))
            .map(|subs| subs.iter().map(|s| s.handler.clone()).collect())
            .unwrap_or_default()
    }

    /// Passes `value` through every filter registered on `hook` and returns the result.
    pub fn apply_filters<T: 'static, C: 'static>(&self, hook: &str, value: T, context: &C) -> T {
        let handlers = self.filter_handlers(hook);
        let mut value = value;

        for handler in &handlers {
            handler.0.apply(&mut value as &mut dyn Any, context as &dyn Any);
        }

        value
    }

    /// Registers an action `handler` on `hook`, returning the handler ID.
    pub fn add_action_handler(
        &self,
        hook: &str,
        handler: ShareableActionHandler,
        priority: Option<i32>,
    ) -> Ustr {
        let hook = Ustr::from(hook);
        let handler_id = handler.id();
        let sub = HookSubscription {
            handler,
            handler_id,
            priority: priority.unwrap_or(DEFAULT_PRIORITY),
            sequence: self.next_sequence(),
        };

        let mut actions = self.actions.borrow_mut();
        let subs = actions.entry(hook).or_default();
        if subs.iter().any(|s| s.handler_id == handler_id) {
            log::warn!("Action {handler_id} already registered on '{hook}'");
            return handler_id;
        }

        log::debug!(
            "Adding action {handler_id} on '{hook}' with priority {}",
            sub.priority
        );
        insert_sorted(subs, sub);
        handler_id
    }

    /// Registers a typed action `callback` on `hook`, returning the handler ID.
    pub fn add_action<C, F>(&self, hook: &str, priority: Option<i32>, callback: F) -> Ustr
    where
        C: 'static,
        F: Fn(&C) + 'static,
    {
        self.add_action_handler(hook, ShareableActionHandler::from_fn(callback), priority)
    }

    /// Removes the action with `handler_id` from `hook`, returning whether it was registered.
    pub fn remove_action(&self, hook: &str, handler_id: Ustr) -> bool {
        let hook = Ustr::from(hook);
        let mut actions = self.actions.borrow_mut();
        let Some(subs) = actions.get_mut(&hook) else {
            return false;
        };

        let count_before = subs.len();
        subs.retain(|s| s.handler_id != handler_id);
        let removed = subs.len() < count_before;

        if removed {
            log::debug!("Removed action {handler_id} from '{hook}'");
        }
        removed
    }

    /// Returns whether any action is registered on `hook`.
    #[must_use]
    pub fn has_action(&self, hook: &str) -> bool {
        self.actions
            .borrow()
            .get(&Ustr::from(hook))
            .is_some_and(|subs| !subs.is_empty())
    }

    fn action_handlers(&self, hook: &str) -> SmallVec<[ShareableActionHandler; HANDLER_BUFFER_CAP]> {
        self.actions
            .borrow()
            .get(&Ustr::from(hook))
            .map(|subs| subs.iter().map(|s| s.handler.clone()).collect())
            .unwrap_or_default()
    }

    /// Fires `hook`, notifying every registered action handler with `context`.
    pub fn do_action<C: 'static>(&self, hook: &str, context: &C) {
        *self
            .action_counts
            .borrow_mut()
            .entry(Ustr::from(hook))
            .or_default() += 1;

        let handlers = self.action_handlers(hook);
        log::trace!("Firing '{hook}' for {} handler(s)", handlers.len());

        for handler in &handlers {
            handler.0.handle(context as &dyn Any);
        }
    }

    /// Returns how many times `hook` has been fired.
    #[must_use]
    pub fn did_action(&self, hook: &str) -> usize {
        self.action_counts
            .borrow()
            .get(&Ustr::from(hook))
            .copied()
            .unwrap_or(0)
    }
}
