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

//! The numeric value object.

use std::{fmt::Display, rc::Rc};

use super::{
    amount::RawAmount,
    fixed::{check_precision, clamp_precision, to_integer},
    hook::{NoopValueHook, ValueHook},
    kind::{PlainValue, ValueKind, ValueState},
    normalize::normalize,
};

/// Base field updates, run before the kind's own [`ValueKind::UPDATES`].
const BASE_UPDATES: [fn(&mut ValueState); 2] = [update_integer_value, update_float_value];

fn update_integer_value(state: &mut ValueState) {
    state.integer = to_integer(state.normalized, state.precision);
}

fn update_float_value(state: &mut ValueState) {
    state.float = state.normalized;
}

/// A numeric amount parsed from an arbitrary human-entered representation.
///
/// The initial representation is kept verbatim for the lifetime of the value. The normalized
/// amount, integer and float representations and every derived field of the kind `K` are
/// recomputed together whenever the value is set.
#[derive(Clone, Debug)]
pub struct Value<K: ValueKind> {
    kind: K,
    hook: Rc<dyn ValueHook>,
    initial_value: RawAmount,
    normalized_amount: f64,
    integer: i64,
    float: f64,
    precision: u8,
    derived: K::Derived,
}

/// A value of the [`PlainValue`] kind.
pub type Amount = Value<PlainValue>;

impl<K: ValueKind> Value<K> {
    /// Creates a new [`Value`] instance of `kind` from `amount`.
    pub fn new(kind: K, amount: impl Into<RawAmount>) -> Self {
        Self::with_hook(kind, amount, Rc::new(NoopValueHook))
    }

    /// Creates a new [`Value`] instance whose figures pass through `hook`.
    pub fn with_hook(kind: K, amount: impl Into<RawAmount>, hook: Rc<dyn ValueHook>) -> Self {
        let initial_value = amount.into();
        let precision = kind.precision();

        let mut value = Self {
            kind,
            hook,
            initial_value: initial_value.clone(),
            normalized_amount: 0.0,
            integer: 0,
            float: 0.0,
            precision,
            derived: K::Derived::default(),
        };
        value.set_normalized_amount(&initial_value);
        value.update();
        value
    }

    /// Sets a new amount, recomputing every dependent field.
    ///
    /// The initial representation is left untouched.
    pub fn set_value(&mut self, amount: impl Into<RawAmount>) {
        self.set_normalized_amount(&amount.into());
        self.update();
    }

    /// Normalizes `value` into a float without modifying this value.
    #[must_use]
    pub fn normalize(&self, value: &RawAmount) -> f64 {
        normalize(value)
    }

    /// Returns the integer representation, after kind and hook overrides.
    #[must_use]
    pub fn integer(&self) -> i64 {
        let value = self.kind.filter_integer(self.integer);
        self.hook.integer(self.kind.name(), value)
    }

    /// Returns the float representation, after kind and hook overrides.
    #[must_use]
    pub fn float(&self) -> f64 {
        let value = self.kind.filter_float(self.float);
        self.hook.float(self.kind.name(), value)
    }

    /// Returns the precision, after kind and hook overrides.
    ///
    /// Overrides beyond [`MAX_PRECISION`](super::fixed::MAX_PRECISION) are clamped.
    #[must_use]
    pub fn precision(&self) -> u8 {
        let value = self.kind.filter_precision(self.precision);
        let value = self.hook.precision(self.kind.name(), value);

        if let Err(e) = check_precision(value) {
            log::warn!("{}: {e}, clamping", self.kind.name());
            return clamp_precision(value);
        }

        value
    }

    /// Returns the normalized amount.
    #[must_use]
    pub const fn normalized_value(&self) -> f64 {
        self.normalized_amount
    }

    /// Returns the amount exactly as this value was constructed with.
    #[must_use]
    pub const fn initial_representation(&self) -> &RawAmount {
        &self.initial_value
    }

    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> &K {
        &self.kind
    }

    /// Returns the fields derived by the kind.
    #[must_use]
    pub const fn derived(&self) -> &K::Derived {
        &self.derived
    }

    fn set_normalized_amount(&mut self, amount: &RawAmount) {
        let normalized = normalize(amount);
        let normalized = self.kind.filter_normalized(normalized);
        let normalized = self.hook.normalized(self.kind.name(), normalized);

        log::debug!("{}: normalized {amount} to {normalized}", self.kind.name());

        self.normalized_amount = normalized;
    }

    fn update(&mut self) {
        let mut state = ValueState {
            normalized: self.normalized_amount,
            integer: 0,
            float: 0.0,
            precision: self.precision(),
        };

        for update in BASE_UPDATES {
            update(&mut state);
        }

        self.integer = state.integer;
        self.float = state.float;

        for update in K::UPDATES {
            update(&self.kind, &state, &mut self.derived);
        }
    }
}

impl<K: ValueKind + Default> Value<K> {
    /// Creates a new [`Value`] instance of the default kind from `amount`.
    pub fn from_amount(amount: impl Into<RawAmount>) -> Self {
        Self::new(K::default(), amount)
    }
}

impl<K: ValueKind + Default> Default for Value<K> {
    fn default() -> Self {
        Self::from_amount(0)
    }
}

impl<K: ValueKind> Display for Value<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.normalized_amount)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::values::stubs::{DoubledIntegerValue, OffsetValueHook, PrecisionValueHook};

    #[rstest]
    fn test_default_amount_is_zero() {
        let value = Amount::default();
        assert_eq!(value.initial_representation(), &RawAmount::Int(0));
        assert_eq!(value.normalized_value(), 0.0);
        assert_eq!(value.integer(), 0);
        assert_eq!(value.float(), 0.0);
        assert_eq!(value.precision(), 2);
    }

    #[rstest]
    #[case("1,234.56", 1234.56, 123_456)]
    #[case("1.234,56", 1234.56, 123_456)]
    #[case("kr. 1.234,56", 1234.56, 123_456)]
    #[case("abc", 0.0, 0)]
    fn test_construct_from_text(
        #[case] input: &str,
        #[case] float: f64,
        #[case] integer: i64,
    ) {
        let value = Amount::from_amount(input);
        assert_eq!(value.normalized_value(), float);
        assert_eq!(value.float(), float);
        assert_eq!(value.integer(), integer);
    }

    #[rstest]
    fn test_construct_from_number() {
        let value = Amount::from_amount(42);
        assert_eq!(value.float(), 42.0);
        assert_eq!(value.integer(), 4200);
    }

    #[rstest]
    fn test_set_value_keeps_initial_representation() {
        let mut value = Amount::from_amount("€ 10,00");
        value.set_value("1.234,56");
        value.set_value(7);

        assert_eq!(
            value.initial_representation(),
            &RawAmount::Text("€ 10,00".to_string())
        );
        assert_eq!(value.normalized_value(), 7.0);
        assert_eq!(value.integer(), 700);
        assert_eq!(value.float(), 7.0);
    }

    #[rstest]
    fn test_normalize_does_not_mutate() {
        let value = Amount::from_amount(3);
        assert_eq!(value.normalize(&RawAmount::from("$1,000.50")), 1000.5);
        assert_eq!(value.normalized_value(), 3.0);
    }

    #[rstest]
    fn test_kind_overrides_integer() {
        let value = Value::new(DoubledIntegerValue, "12.50");
        assert_eq!(value.integer(), 2500);
        assert_eq!(value.float(), 12.5);
    }

    #[rstest]
    fn test_hook_adjusts_normalized_amount_before_derivation() {
        let value = Amount::with_hook(PlainValue, "1,00", Rc::new(OffsetValueHook(0.5)));
        assert_eq!(value.normalized_value(), 1.5);
        assert_eq!(value.integer(), 150);
        assert_eq!(value.float(), 1.5);
    }

    #[rstest]
    fn test_hook_precision_drives_integer_scaling() {
        let value = Amount::with_hook(PlainValue, "1.5", Rc::new(PrecisionValueHook(4)));
        assert_eq!(value.precision(), 4);
        assert_eq!(value.integer(), 15_000);
    }

    #[rstest]
    fn test_hook_precision_is_clamped() {
        let value = Amount::with_hook(PlainValue, 1, Rc::new(PrecisionValueHook(30)));
        assert_eq!(value.precision(), 9);
        assert_eq!(value.integer(), 1_000_000_000);
    }

    #[rstest]
    fn test_display() {
        assert_eq!(Amount::from_amount("1,234.5").to_string(), "1234.5");
    }
}
