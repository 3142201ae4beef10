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

//! Value kinds: the capability set a concrete value type plugs into [`Value`](super::Value).

use std::fmt::Debug;

use super::fixed::DEFAULT_PRECISION;

/// Snapshot of the base fields of a value, handed to derived-field updates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueState {
    /// The normalized amount.
    pub normalized: f64,
    /// The integer representation at `precision` decimal places.
    pub integer: i64,
    /// The float representation.
    pub float: f64,
    /// The effective precision (after kind and hook overrides).
    pub precision: u8,
}

/// Recomputes one kind-specific derived field from the base state.
pub type DerivedUpdate<K> = fn(&K, &ValueState, &mut <K as ValueKind>::Derived);

/// The capability set of a concrete value type.
///
/// A kind names itself, chooses its precision, may override the figures a value reports, and
/// declares the derived fields it keeps in sync. After every normalization the base fields are
/// refreshed first, then each entry of [`ValueKind::UPDATES`] runs in declaration order.
pub trait ValueKind: Sized + Debug + 'static {
    /// Fields owned by this kind, refreshed on every update.
    type Derived: Debug + Default + Clone;

    /// Derived-field updates, run in order after the base fields are refreshed.
    const UPDATES: &'static [DerivedUpdate<Self>] = &[];

    /// The name used to identify this kind in hooks and logs.
    fn name(&self) -> &'static str;

    /// The precision new values of this kind start with.
    fn precision(&self) -> u8 {
        DEFAULT_PRECISION
    }

    /// Adjusts a freshly normalized amount.
    fn filter_normalized(&self, value: f64) -> f64 {
        value
    }

    /// Adjusts the reported integer representation.
    fn filter_integer(&self, value: i64) -> i64 {
        value
    }

    /// Adjusts the reported float representation.
    fn filter_float(&self, value: f64) -> f64 {
        value
    }

    /// Adjusts the reported precision.
    fn filter_precision(&self, precision: u8) -> u8 {
        precision
    }
}

/// A plain numeric kind with the default precision and no derived fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlainValue;

impl ValueKind for PlainValue {
    type Derived = ();

    fn name(&self) -> &'static str {
        "value"
    }
}
