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

//! A [`ValueHook`] dispatching through the hook registry.
//!
//! | Figure     | Filters (value type, context `Ustr` kind name)                              |
//! |------------|------------------------------------------------------------------------------|
//! | normalized | `tec_common_{kind}_value_normalized`, `tec_common_value_normalized` (`f64`)  |
//! | integer    | `tec_common_value_{kind}_get_integer`, `tec_common_value_get_integer` (`i64`) |
//! | float      | `tec_common_value_{kind}_get_float`, `tec_common_value_get_float` (`f64`)    |
//! | precision  | `tec_common_value_{kind}_get_precision`, `tec_common_value_get_precision` (`u8`) |
//!
//! After the normalized filters run, the `tec_common_value_normalized` action fires with a
//! [`ValueNormalized`] context.

use std::rc::Rc;

use tec_model::values::ValueHook;
use ustr::Ustr;

use crate::hooks::HookRegistry;

pub const VALUE_NORMALIZED_HOOK: &str = "tec_common_value_normalized";
pub const VALUE_GET_INTEGER_FILTER: &str = "tec_common_value_get_integer";
pub const VALUE_GET_FLOAT_FILTER: &str = "tec_common_value_get_float";
pub const VALUE_GET_PRECISION_FILTER: &str = "tec_common_value_get_precision";

/// Context of the `tec_common_value_normalized` action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueNormalized {
    /// The name of the value kind.
    pub kind: Ustr,
    /// The normalized amount about to be stored.
    pub value: f64,
}

/// Routes every value figure through the filters of a [`HookRegistry`].
#[derive(Clone, Debug)]
pub struct RegistryValueHook {
    hooks: Rc<HookRegistry>,
}

impl RegistryValueHook {
    /// Creates a new [`RegistryValueHook`] instance.
    #[must_use]
    pub const fn new(hooks: Rc<HookRegistry>) -> Self {
        Self { hooks }
    }

    fn filter<T: 'static>(&self, kind_hook: &str, global_hook: &str, kind: &str, value: T) -> T {
        let kind = Ustr::from(kind);
        let value = self.hooks.apply_filters(kind_hook, value, &kind);
        self.hooks.apply_filters(global_hook, value, &kind)
    }
}

impl ValueHook for RegistryValueHook {
    fn normalized(&self, kind: &str, value: f64) -> f64 {
        let value = self.filter(
            &format!("tec_common_{kind}_value_normalized"),
            VALUE_NORMALIZED_HOOK,
            kind,
            value,
        );

        self.hooks.do_action(
            VALUE_NORMALIZED_HOOK,
            &ValueNormalized {
                kind: Ustr::from(kind),
                value,
            },
        );
        value
    }

    fn integer(&self, kind: &str, value: i64) -> i64 {
        self.filter(
            &format!("tec_common_value_{kind}_get_integer"),
            VALUE_GET_INTEGER_FILTER,
            kind,
            value,
        )
    }

    fn float(&self, kind: &str, value: f64) -> f64 {
        self.filter(
            &format!("tec_common_value_{kind}_get_float"),
            VALUE_GET_FLOAT_FILTER,
            kind,
            value,
        )
    }

    fn precision(&self, kind: &str, value: u8) -> u8 {
        self.filter(
            &format!("tec_common_value_{kind}_get_precision"),
            VALUE_GET_PRECISION_FILTER,
            kind,
            value,
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tec_model::values::{Amount, Currency, PlainValue, Value, stubs::currency_usd};

    use super::*;
    use crate::hooks::stubs::get_saving_action_handler;

    #[fixture]
    fn hooks() -> Rc<HookRegistry> {
        Rc::new(HookRegistry::new())
    }

    fn amount(hooks: &Rc<HookRegistry>, raw: &str) -> Amount {
        Value::with_hook(
            PlainValue,
            raw,
            Rc::new(RegistryValueHook::new(hooks.clone())),
        )
    }

    #[rstest]
    fn test_without_filters_figures_are_unchanged(hooks: Rc<HookRegistry>) {
        let value = amount(&hooks, "1.234,56");
        assert_eq!(value.normalized_value(), 1234.56);
        assert_eq!(value.integer(), 123_456);
        assert_eq!(value.float(), 1234.56);
        assert_eq!(value.precision(), 2);
    }

    #[rstest]
    fn test_normalized_filters_and_action(hooks: Rc<HookRegistry>) {
        hooks.add_filter(
            "tec_common_value_value_normalized",
            None,
            |v: &mut f64, _: &Ustr| *v += 1.0,
        );
        hooks.add_filter(VALUE_NORMALIZED_HOOK, None, |v: &mut f64, _: &Ustr| *v *= 2.0);
        let (handler, saver) = get_saving_action_handler::<ValueNormalized>("normalized");
        hooks.add_action_handler(VALUE_NORMALIZED_HOOK, handler, None);

        let value = amount(&hooks, "10");

        assert_eq!(value.normalized_value(), 22.0);
        assert_eq!(value.integer(), 2200);
        assert_eq!(
            saver.received(),
            vec![ValueNormalized {
                kind: Ustr::from("value"),
                value: 22.0,
            }]
        );
    }

    #[rstest]
    fn test_getter_filters_receive_kind(hooks: Rc<HookRegistry>) {
        hooks.add_filter(VALUE_GET_INTEGER_FILTER, None, |v: &mut i64, kind: &Ustr| {
            if kind.as_str() == "currency" {
                *v += 1;
            }
        });
        hooks.add_filter(VALUE_GET_FLOAT_FILTER, None, |v: &mut f64, _: &Ustr| {
            *v = v.floor();
        });

        let plain = amount(&hooks, "3.75");
        assert_eq!(plain.integer(), 375);
        assert_eq!(plain.float(), 3.0);

        let currency: Currency = Value::with_hook(
            currency_usd(),
            "3.75",
            Rc::new(RegistryValueHook::new(hooks.clone())),
        );
        assert_eq!(currency.integer(), 376);
    }

    #[rstest]
    fn test_precision_filter_rescales_integer(hooks: Rc<HookRegistry>) {
        hooks.add_filter(
            "tec_common_value_value_get_precision",
            None,
            |p: &mut u8, _: &Ustr| *p = 3,
        );

        let value = amount(&hooks, "1.5");
        assert_eq!(value.precision(), 3);
        assert_eq!(value.integer(), 1500);
    }

    #[rstest]
    fn test_kind_specific_filter_does_not_leak(hooks: Rc<HookRegistry>) {
        hooks.add_filter(
            "tec_common_value_currency_get_float",
            None,
            |v: &mut f64, _: &Ustr| *v = 0.0,
        );

        let value = amount(&hooks, "8");
        assert_eq!(value.float(), 8.0);
    }
}
