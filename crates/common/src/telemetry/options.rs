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

//! Persisted site options.

use std::{cell::RefCell, fmt::Debug};

use indexmap::IndexMap;
use serde_json::Value;

/// Name-keyed persistent settings of the host site.
pub trait OptionStore: Debug {
    /// Returns the option stored under `name`, if any.
    fn get_option(&self, name: &str) -> Option<Value>;

    /// Stores `value` under `name`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn update_option(&self, name: &str, value: Value) -> anyhow::Result<()>;
}

/// An [`OptionStore`] held in memory.
#[derive(Debug, Default)]
pub struct InMemoryOptionStore {
    options: RefCell<IndexMap<String, Value>>,
}

impl InMemoryOptionStore {
    /// Creates a new empty [`InMemoryOptionStore`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.borrow().len()
    }

    /// Returns whether no option is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.borrow().is_empty()
    }
}

impl OptionStore for InMemoryOptionStore {
    fn get_option(&self, name: &str) -> Option<Value> {
        self.options.borrow().get(name).cloned()
    }

    fn update_option(&self, name: &str, value: Value) -> anyhow::Result<()> {
        self.options.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }
}

/// Returns whether a stored option value counts as set.
///
/// Null, `false`, zero, the empty string, `"0"` and empty collections are unset.
#[must_use]
pub fn is_truthy_option(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
