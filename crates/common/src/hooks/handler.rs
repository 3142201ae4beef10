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

//! Filter and action handlers.
//!
//! Hooks carry values of arbitrary types, so handlers receive `&mut dyn Any` (filters) or
//! `&dyn Any` (actions) and the callback wrappers downcast to the concrete types they were
//! registered for. A handler registered for the wrong types is skipped with an error log,
//! leaving the filtered value unchanged.

use std::{
    any::{Any, type_name},
    fmt::Debug,
    marker::PhantomData,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use ustr::Ustr;

static NEXT_HANDLER_SEQ: AtomicU64 = AtomicU64::new(1);

fn generate_handler_id<F>(callback: &F) -> Ustr {
    let callback_ptr = std::ptr::from_ref(callback);
    let seq = NEXT_HANDLER_SEQ.fetch_add(1, Ordering::Relaxed);
    Ustr::from(&format!("<{callback_ptr:?}>-{seq}"))
}

/// A handler which may modify a filtered value in place.
pub trait FilterHandler: 'static {
    /// Returns the unique identifier for this handler.
    fn id(&self) -> Ustr;

    /// Applies the filter to `value`, with `context` carrying the extra hook arguments.
    fn apply(&self, value: &mut dyn Any, context: &dyn Any);
}

/// A handler which reacts to a fired action.
pub trait ActionHandler: 'static {
    /// Returns the unique identifier for this handler.
    fn id(&self) -> Ustr;

    /// Handles the action, with `context` carrying the hook arguments.
    fn handle(&self, context: &dyn Any);
}

/// A shareable wrapper for filter handlers.
#[derive(Clone)]
pub struct ShareableFilterHandler(pub Rc<dyn FilterHandler>);

impl ShareableFilterHandler {
    /// Creates a filter handler from a typed callback.
    pub fn from_fn<T, C, F>(callback: F) -> Self
    where
        T: 'static,
        C: 'static,
        F: Fn(&mut T, &C) + 'static,
    {
        Self(Rc::new(FilterCallback::new(None::<&str>, callback)))
    }

    /// Creates a filter handler from a typed callback with a custom ID.
    pub fn from_fn_with_id<S, T, C, F>(id: S, callback: F) -> Self
    where
        S: AsRef<str>,
        T: 'static,
        C: 'static,
        F: Fn(&mut T, &C) + 'static,
    {
        Self(Rc::new(FilterCallback::new(Some(id), callback)))
    }

    /// Returns the handler ID.
    #[must_use]
    pub fn id(&self) -> Ustr {
        self.0.id()
    }
}

impl Debug for ShareableFilterHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(ShareableFilterHandler))
            .field("id", &self.0.id())
            .finish()
    }
}

impl PartialEq for ShareableFilterHandler {
    fn eq(&self, other: &Self) -> bool {
        self.0.id() == other.0.id()
    }
}

impl Eq for ShareableFilterHandler {}

/// A shareable wrapper for action handlers.
#[derive(Clone)]
pub struct ShareableActionHandler(pub Rc<dyn ActionHandler>);

impl ShareableActionHandler {
    /// Creates an action handler from a typed callback.
    pub fn from_fn<C, F>(callback: F) -> Self
    where
        C: 'static,
        F: Fn(&C) + 'static,
    {
        Self(Rc::new(ActionCallback::new(None::<&str>, callback)))
    }

    /// Creates an action handler from a typed callback with a custom ID.
    pub fn from_fn_with_id<S, C, F>(id: S, callback: F) -> Self
    where
        S: AsRef<str>,
        C: 'static,
        F: Fn(&C) + 'static,
    {
        Self(Rc::new(ActionCallback::new(Some(id), callback)))
    }

    /// Returns the handler ID.
    #[must_use]
    pub fn id(&self) -> Ustr {
        self.0.id()
    }
}

impl Debug for ShareableActionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(ShareableActionHandler))
            .field("id", &self.0.id())
            .finish()
    }
}

impl PartialEq for ShareableActionHandler {
    fn eq(&self, other: &Self) -> bool {
        self.0.id() == other.0.id()
    }
}

impl Eq for ShareableActionHandler {}

/// Filter handler downcasting the value to `T` and the context to `C`.
struct FilterCallback<T, C, F: Fn(&mut T, &C)> {
    id: Ustr,
    callback: F,
    _marker: PhantomData<(T, C)>,
}

impl<T: 'static, C: 'static, F: Fn(&mut T, &C) + 'static> FilterCallback<T, C, F> {
    fn new<S: AsRef<str>>(id: Option<S>, callback: F) -> Self {
        let id_ustr = id.map_or_else(
            || generate_handler_id(&callback),
            |s| Ustr::from(s.as_ref()),
        );
        Self {
            id: id_ustr,
            callback,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static, C: 'static, F: Fn(&mut T, &C) + 'static> FilterHandler for FilterCallback<T, C, F> {
    fn id(&self) -> Ustr {
        self.id
    }

    fn apply(&self, value: &mut dyn Any, context: &dyn Any) {
        let Some(context) = context.downcast_ref::<C>() else {
            log::error!(
                "Filter {} skipped: expected context {}",
                self.id,
                type_name::<C>()
            );
            return;
        };

        match value.downcast_mut::<T>() {
            Some(value) => (self.callback)(value, context),
            None => log::error!(
                "Filter {} skipped: expected value {}",
                self.id,
                type_name::<T>()
            ),
        }
    }
}

/// Action handler downcasting the context to `C`.
struct ActionCallback<C, F: Fn(&C)> {
    id: Ustr,
    callback: F,
    _marker: PhantomData<C>,
}

impl<C: 'static, F: Fn(&C) + 'static> ActionCallback<C, F> {
    fn new<S: AsRef<str>>(id: Option<S>, callback: F) -> Self {
        let id_ustr = id.map_or_else(
            || generate_handler_id(&callback),
            |s| Ustr::from(s.as_ref()),
        );
        Self {
            id: id_ustr,
            callback,
            _marker: PhantomData,
        }
    }
}

impl<C: 'static, F: Fn(&C) + 'static> ActionHandler for ActionCallback<C, F> {
    fn id(&self) -> Ustr {
        self.id
    }

    fn handle(&self, context: &dyn Any) {
        match context.downcast_ref::<C>() {
            Some(context) => (self.callback)(context),
            None => log::error!(
                "Action {} skipped: expected context {}",
                self.id,
                type_name::<C>()
            ),
        }
    }
}
