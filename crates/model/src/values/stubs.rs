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

//! Test stubs for value kinds and hooks.

use rstest::fixture;

use super::{
    currency::{CurrencyFormat, CurrencyValue, SymbolPosition},
    hook::ValueHook,
    kind::ValueKind,
};

#[fixture]
pub fn currency_usd() -> CurrencyValue {
    CurrencyValue::new(CurrencyFormat::default())
}

#[fixture]
pub fn currency_dkk() -> CurrencyValue {
    let format = CurrencyFormat::new(2, ",", ".", "kr.", SymbolPosition::Postfix)
        .expect("valid DKK format");
    CurrencyValue::new(format)
}

/// A kind reporting twice its integer representation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubledIntegerValue;

impl ValueKind for DoubledIntegerValue {
    type Derived = ();

    fn name(&self) -> &'static str {
        "doubled"
    }

    fn filter_integer(&self, value: i64) -> i64 {
        value * 2
    }
}

/// A hook adding a fixed offset to every normalized amount.
#[derive(Clone, Copy, Debug)]
pub struct OffsetValueHook(pub f64);

impl ValueHook for OffsetValueHook {
    fn normalized(&self, _kind: &str, value: f64) -> f64 {
        value + self.0
    }
}

/// A hook forcing a fixed precision.
#[derive(Clone, Copy, Debug)]
pub struct PrecisionValueHook(pub u8);

impl ValueHook for PrecisionValueHook {
    fn precision(&self, _kind: &str, _value: u8) -> u8 {
        self.0
    }
}
