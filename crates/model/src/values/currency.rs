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

//! A currency value kind with formatted representations.

use serde::{Deserialize, Serialize};
use tec_core::formatting::format_decimal;
use thiserror::Error;

use super::{
    fixed::{DEFAULT_PRECISION, MAX_PRECISION},
    kind::{DerivedUpdate, ValueKind, ValueState},
    value::Value,
};

/// Errors raised when building a [`CurrencyFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("precision {precision} exceeds maximum {max}")]
    PrecisionExceeded { precision: u8, max: u8 },
    #[error("decimal separator must not be empty")]
    EmptyDecimalSeparator,
    #[error("decimal and thousands separators must differ, both were {0:?}")]
    SeparatorConflict(String),
}

/// Where the currency symbol is placed relative to the amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Prefix,
    Postfix,
}

/// How a currency amount is rendered.
///
/// Deserialization goes through [`CurrencyFormat::new`] and fails on the same inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurrencyFormatFields")]
pub struct CurrencyFormat {
    precision: u8,
    decimal_separator: String,
    thousands_separator: String,
    symbol: String,
    symbol_position: SymbolPosition,
}

#[derive(Debug, Deserialize)]
struct CurrencyFormatFields {
    precision: u8,
    decimal_separator: String,
    thousands_separator: String,
    symbol: String,
    symbol_position: SymbolPosition,
}

impl TryFrom<CurrencyFormatFields> for CurrencyFormat {
    type Error = FormatError;

    fn try_from(fields: CurrencyFormatFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.precision,
            &fields.decimal_separator,
            &fields.thousands_separator,
            &fields.symbol,
            fields.symbol_position,
        )
    }
}

impl CurrencyFormat {
    /// Creates a new [`CurrencyFormat`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `precision` exceeds [`MAX_PRECISION`], if `decimal_separator` is
    /// empty, or if both separators are equal.
    pub fn new(
        precision: u8,
        decimal_separator: &str,
        thousands_separator: &str,
        symbol: &str,
        symbol_position: SymbolPosition,
    ) -> Result<Self, FormatError> {
        if precision > MAX_PRECISION {
            return Err(FormatError::PrecisionExceeded {
                precision,
                max: MAX_PRECISION,
            });
        }
        if decimal_separator.is_empty() {
            return Err(FormatError::EmptyDecimalSeparator);
        }
        if decimal_separator == thousands_separator {
            return Err(FormatError::SeparatorConflict(decimal_separator.to_string()));
        }

        Ok(Self {
            precision,
            decimal_separator: decimal_separator.to_string(),
            thousands_separator: thousands_separator.to_string(),
            symbol: symbol.to_string(),
            symbol_position,
        })
    }

    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Formats `amount` with this format's separators, without the symbol.
    #[must_use]
    pub fn format(&self, amount: f64, precision: u8) -> String {
        format_decimal(
            amount,
            precision,
            &self.decimal_separator,
            &self.thousands_separator,
        )
    }

    /// Places the symbol around an already formatted amount.
    #[must_use]
    pub fn with_symbol(&self, formatted: &str) -> String {
        match self.symbol_position {
            SymbolPosition::Prefix => format!("{}{formatted}", self.symbol),
            SymbolPosition::Postfix => format!("{formatted} {}", self.symbol),
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            decimal_separator: ".".to_string(),
            thousands_separator: ",".to_string(),
            symbol: "$".to_string(),
            symbol_position: SymbolPosition::Prefix,
        }
    }
}

/// Fields kept in sync by [`CurrencyValue`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrencyFields {
    /// The amount with separators applied, e.g. `1.234,56`.
    pub formatted: String,
    /// The formatted amount with its symbol, e.g. `1.234,56 kr.`.
    pub display: String,
}

/// A currency kind rendering amounts according to a [`CurrencyFormat`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrencyValue {
    format: CurrencyFormat,
}

impl CurrencyValue {
    /// Creates a new [`CurrencyValue`] kind with the given `format`.
    #[must_use]
    pub const fn new(format: CurrencyFormat) -> Self {
        Self { format }
    }

    #[must_use]
    pub const fn format(&self) -> &CurrencyFormat {
        &self.format
    }
}

fn update_formatted_value(kind: &CurrencyValue, state: &ValueState, fields: &mut CurrencyFields) {
    fields.formatted = kind.format.format(state.float, state.precision);
}

// Relies on `formatted` being refreshed first.
fn update_display_value(kind: &CurrencyValue, _state: &ValueState, fields: &mut CurrencyFields) {
    fields.display = kind.format.with_symbol(&fields.formatted);
}

impl ValueKind for CurrencyValue {
    type Derived = CurrencyFields;

    const UPDATES: &'static [DerivedUpdate<Self>] = &[update_formatted_value, update_display_value];

    fn name(&self) -> &'static str {
        "currency"
    }

    fn precision(&self) -> u8 {
        self.format.precision
    }
}

/// A value of the [`CurrencyValue`] kind.
pub type Currency = Value<CurrencyValue>;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::values::stubs::{currency_dkk, currency_usd};

    #[rstest]
    fn test_format_new_rejects_excess_precision() {
        let result = CurrencyFormat::new(12, ".", ",", "$", SymbolPosition::Prefix);
        assert_eq!(
            result,
            Err(FormatError::PrecisionExceeded {
                precision: 12,
                max: MAX_PRECISION
            })
        );
    }

    #[rstest]
    fn test_format_new_rejects_conflicting_separators() {
        let result = CurrencyFormat::new(2, ",", ",", "€", SymbolPosition::Postfix);
        assert_eq!(result, Err(FormatError::SeparatorConflict(",".to_string())));
    }

    #[rstest]
    fn test_format_new_rejects_empty_decimal_separator() {
        let result = CurrencyFormat::new(2, "", ",", "€", SymbolPosition::Postfix);
        assert_eq!(result, Err(FormatError::EmptyDecimalSeparator));
    }

    #[rstest]
    fn test_currency_usd_fields(currency_usd: CurrencyValue) {
        let value = Currency::new(currency_usd, "USD 1,234.5");
        assert_eq!(value.float(), 1234.5);
        assert_eq!(value.integer(), 123_450);
        assert_eq!(value.derived().formatted, "1,234.50");
        assert_eq!(value.derived().display, "$1,234.50");
    }

    #[rstest]
    fn test_currency_dkk_fields(currency_dkk: CurrencyValue) {
        let value = Currency::new(currency_dkk, "kr. 1.234,56");
        assert_eq!(value.float(), 1234.56);
        assert_eq!(value.derived().formatted, "1.234,56");
        assert_eq!(value.derived().display, "1.234,56 kr.");
    }

    #[rstest]
    fn test_currency_fields_follow_set_value(currency_usd: CurrencyValue) {
        let mut value = Currency::new(currency_usd, 5);
        assert_eq!(value.derived().display, "$5.00");

        value.set_value("$1,000,000");
        assert_eq!(value.derived().formatted, "1,000,000.00");
        assert_eq!(value.derived().display, "$1,000,000.00");
        assert_eq!(value.initial_representation().to_string(), "5");
    }

    #[rstest]
    fn test_currency_precision_zero() {
        let format = CurrencyFormat::new(0, ".", ",", "¥", SymbolPosition::Prefix).unwrap();
        let value = Currency::new(CurrencyValue::new(format), "¥ 1,234");
        assert_eq!(value.precision(), 0);
        assert_eq!(value.integer(), 1234);
        assert_eq!(value.derived().display, "¥1,234");
    }

    #[rstest]
    fn test_format_deserializes_through_validation() {
        let format: CurrencyFormat = serde_json::from_value(json!({
            "precision": 2,
            "decimal_separator": ",",
            "thousands_separator": ".",
            "symbol": "kr.",
            "symbol_position": "postfix"
        }))
        .unwrap();
        assert_eq!(
            format,
            CurrencyFormat::new(2, ",", ".", "kr.", SymbolPosition::Postfix).unwrap()
        );
        assert_eq!(
            serde_json::from_value::<CurrencyFormat>(serde_json::to_value(&format).unwrap())
                .unwrap(),
            format
        );
    }

    #[rstest]
    #[case(json!({"precision": 30, "decimal_separator": ".", "thousands_separator": ",", "symbol": "$", "symbol_position": "prefix"}), "precision 30 exceeds maximum 9")]
    #[case(json!({"precision": 2, "decimal_separator": "", "thousands_separator": "", "symbol": "$", "symbol_position": "prefix"}), "decimal separator must not be empty")]
    #[case(json!({"precision": 2, "decimal_separator": ",", "thousands_separator": ",", "symbol": "€", "symbol_position": "postfix"}), "separators must differ")]
    fn test_format_deserialize_rejects_invalid(
        #[case] input: serde_json::Value,
        #[case] expected: &str,
    ) {
        let err = serde_json::from_value::<CurrencyFormat>(input).unwrap_err();
        assert!(err.to_string().contains(expected), "{err}");
    }
}
