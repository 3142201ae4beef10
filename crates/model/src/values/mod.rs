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

//! Numeric value objects.
//!
//! A [`Value`] parses an arbitrary human-entered amount (`"kr. 1.234,56"`, `"$1,234.56"`,
//! `42`) into a normalized float and a scaled integer representation.
//!
//! # Fields
//!
//! | Field                    | Source                                                  |
//! |--------------------------|---------------------------------------------------------|
//! | initial representation   | The constructor argument, never modified afterwards.    |
//! | normalized amount        | [`normalize`](normalize::normalize) of the latest amount. |
//! | integer                  | `round(normalized * 10^precision)`.                     |
//! | float                    | Mirrors the normalized amount.                          |
//! | precision                | The kind's precision, 2 by default.                     |
//!
//! # Extension points
//!
//! Concrete value types are expressed as a [`ValueKind`]: the kind may override each
//! reported figure and declares a static list of derived-field updates, run right after the
//! base fields on every normalization. A single [`ValueHook`] then post-processes the figures
//! of every kind.

pub mod amount;
pub mod currency;
pub mod fixed;
pub mod hook;
pub mod kind;
pub mod normalize;
pub mod value;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

// Re-exports
pub use amount::RawAmount;
pub use currency::{Currency, CurrencyFields, CurrencyFormat, CurrencyValue, FormatError, SymbolPosition};
pub use hook::{NoopValueHook, ValueHook};
pub use kind::{DerivedUpdate, PlainValue, ValueKind, ValueState};
pub use value::{Amount, Value};
