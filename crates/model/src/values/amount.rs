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

//! Raw amounts as supplied by callers, before normalization.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// An amount exactly as it was handed to a value object.
///
/// Text amounts may carry currency symbols, markup and arbitrary separators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// A whole number.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// Loosely formatted text such as `"kr. 1.234,56"`.
    Text(String),
}

impl RawAmount {
    /// Returns whether the amount can be read as a number without any cleanup.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Float(f) => f.is_finite(),
            Self::Text(s) => is_numeric_str(s),
        }
    }
}

impl Default for RawAmount {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl Display for RawAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawAmount {
                fn from(value: $t) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for RawAmount {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn is_numeric_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Returns the length in bytes of the longest numeric prefix of `s`.
///
/// The accepted grammar is an optional sign, digits with at most one decimal point (at least
/// one digit overall), then an optional exponent. Returns 0 when no digit is found.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let mut digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }

    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        let mut fraction_digits = 0;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
            fraction_digits += 1;
        }
        if digits + fraction_digits > 0 {
            i = j;
            digits += fraction_digits;
        }
    }

    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exponent_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exponent_start {
            i = j;
        }
    }

    i
}

/// Returns whether the whole of `s` (ignoring surrounding whitespace) is a decimal number.
///
/// Accepts forms such as `"42"`, `" -1.5 "`, `".5"`, `"5."` and `"1e3"`; rejects thousands
/// separators, currency symbols and special values like `"inf"`.
#[must_use]
pub fn is_numeric_str(s: &str) -> bool {
    let trimmed = s.trim_matches(is_numeric_whitespace);
    !trimmed.is_empty() && numeric_prefix_len(trimmed) == trimmed.len()
}

/// Parses the leading numeric part of `s`, returning 0.0 when there is none.
///
/// Leading whitespace is skipped and anything after the numeric prefix is ignored, so
/// `"1..5"` reads as `1.0` and `"."` as `0.0`.
#[must_use]
pub fn parse_float_lenient(s: &str) -> f64 {
    let trimmed = s.trim_start_matches(is_numeric_whitespace);
    let len = numeric_prefix_len(trimmed);
    if len == 0 {
        return 0.0;
    }

    trimmed[..len].parse::<f64>().unwrap_or(0.0)
}
