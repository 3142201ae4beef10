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

//! Normalization of loosely formatted amounts into floats.
//!
//! # Algorithm
//!
//! 1. Numeric input is returned as is.
//! 2. Input without a single digit normalizes to `0.0`.
//! 3. Space delimited blocks without digits (currency codes and symbols such as `kr.` or
//!    `.د.م.`) are removed from the string.
//! 4. HTML entities and tags are removed.
//! 5. Each distinct remaining non-digit character is examined in order of first appearance.
//!    Splitting on it and discarding pieces without digits must leave exactly two pieces, the
//!    second shorter than three characters, for it to qualify as the decimal separator. The
//!    first qualifying character is kept as the separator, every other one is removed.
//! 6. The pieces around the separator are reassembled with a `.` and parsed.
//!
//! Input that cannot be made sense of degrades towards `0.0`, normalization never fails.

use tec_core::string::{is_character_block, strip_all_tags, strip_html_entities};

use super::amount::{RawAmount, is_numeric_str, parse_float_lenient};

/// Maximum number of characters after a decimal separator.
const MAX_DECIMAL_DIGITS: usize = 2;

/// Normalizes a raw amount into a float.
#[must_use]
pub fn normalize(value: &RawAmount) -> f64 {
    match value {
        RawAmount::Int(i) => *i as f64,
        RawAmount::Float(f) => *f,
        RawAmount::Text(s) => normalize_str(s),
    }
}

/// Normalizes a loosely formatted numeric string into a float.
///
/// # Examples
///
/// ```
/// use tec_model::values::normalize::normalize_str;
///
/// assert_eq!(normalize_str("1,234.56"), 1234.56);
/// assert_eq!(normalize_str("kr. 1.234,56"), 1234.56);
/// assert_eq!(normalize_str("abc"), 0.0);
/// ```
#[must_use]
pub fn normalize_str(value: &str) -> f64 {
    if is_numeric_str(value) {
        return parse_float_lenient(value);
    }

    if is_character_block(value) {
        return 0.0;
    }

    let value = remove_character_blocks(value);
    let value = remove_html(&value);

    let tokens = non_digit_tokens(&value);
    if tokens.is_empty() {
        return parse_float_lenient(&value);
    }

    let (value, separator) = remove_non_digits(value, &tokens);
    assemble(&value, separator)
}

fn remove_character_blocks(value: &str) -> String {
    let mut result = value.to_string();
    for block in value.split(' ') {
        if block.is_empty() || !is_character_block(block) {
            continue;
        }
        result = result.replace(block, "");
    }
    result
}

fn remove_html(value: &str) -> String {
    strip_all_tags(&strip_html_entities(value.trim()))
}

/// Returns the distinct non-digit characters of `value` in order of first appearance.
fn non_digit_tokens(value: &str) -> Vec<char> {
    let mut tokens: Vec<char> = Vec::new();
    for c in value.chars() {
        if !c.is_ascii_digit() && !tokens.contains(&c) {
            tokens.push(c);
        }
    }
    tokens
}

fn is_decimal_separator(token: char, value: &str) -> bool {
    let pieces: Vec<&str> = value
        .split(token)
        .filter(|piece| !is_character_block(piece))
        .collect();

    match pieces.as_slice() {
        [_, decimals] => decimals.chars().count() <= MAX_DECIMAL_DIGITS,
        _ => false,
    }
}

/// Strips every token except the elected decimal separator, which is returned alongside.
fn remove_non_digits(mut value: String, tokens: &[char]) -> (String, Option<char>) {
    let mut separator = None;

    for &token in tokens {
        if separator.is_none() && is_decimal_separator(token, &value) {
            log::trace!("Elected {token:?} as decimal separator in {value:?}");
            separator = Some(token);
            continue;
        }
        value = value.replace(token, "");
    }

    (value, separator)
}

fn assemble(value: &str, separator: Option<char>) -> f64 {
    let mut pieces: Vec<&str> = match separator {
        Some(sep) => value.split(sep).collect(),
        None => vec![value],
    };

    if let [single] = pieces.as_slice()
        && is_numeric_str(single)
    {
        return parse_float_lenient(single);
    }

    let decimals = pieces.pop().unwrap_or_default();
    let assembled = format!("{}.{decimals}", pieces.concat());
    parse_float_lenient(&assembled)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1,234.56", 1234.56)]
    #[case("1.234,56", 1234.56)]
    #[case("kr. 1.234,56", 1234.56)]
    #[case("1,234.56 .د.م.", 1234.56)]
    #[case("$1,234", 1234.0)]
    #[case("1,234", 1234.0)]
    #[case("1.234.567,89", 1_234_567.89)]
    #[case("1 234,56", 1234.56)]
    #[case("€ 12", 12.0)]
    #[case("12,5 €", 12.5)]
    #[case("0,5", 0.5)]
    #[case("R$ 0,99", 0.99)]
    #[case("<span class=\"amount\">19.99</span> USD", 19.99)]
    #[case("&#36;5.00", 5.0)]
    #[case("&pound;3,50", 3.5)]
    #[case("USD 1,000,000", 1_000_000.0)]
    fn test_normalize_str_formatted(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(normalize_str(input), expected);
    }

    #[rstest]
    #[case("42", 42.0)]
    #[case("-5", -5.0)]
    #[case(" 12.50 ", 12.5)]
    #[case("1e3", 1000.0)]
    fn test_normalize_str_numeric(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(normalize_str(input), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("$")]
    #[case("kr. ,")]
    #[case("<b></b>")]
    fn test_normalize_str_without_digits(#[case] input: &str) {
        assert_eq!(normalize_str(input), 0.0);
    }

    #[rstest]
    fn test_normalize_raw_amounts() {
        assert_eq!(normalize(&RawAmount::from(42)), 42.0);
        assert_eq!(normalize(&RawAmount::from(12.75)), 12.75);
        assert_eq!(normalize(&RawAmount::from("1.234,56")), 1234.56);
    }

    #[rstest]
    fn test_only_first_qualifying_token_is_elected() {
        // '.' qualifies first, the later '-' would also qualify but is stripped.
        assert_eq!(normalize_str("1.-5"), 1.5);
    }

    #[rstest]
    fn test_remove_character_blocks() {
        assert_eq!(remove_character_blocks("kr. 1.234,56"), " 1.234,56");
        assert_eq!(remove_character_blocks("1 234"), "1 234");
    }

    #[rstest]
    #[case(',', "1234,56", true)]
    #[case(',', "1,234", false)]
    #[case('.', "1.234.567", false)]
    #[case('$', "$12", false)]
    #[case('.', "12.5", true)]
    fn test_is_decimal_separator(#[case] token: char, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_decimal_separator(token, value), expected);
    }

    #[rstest]
    fn test_non_digit_tokens_in_order() {
        assert_eq!(non_digit_tokens("$1,234.56,"), vec!['$', ',', '.']);
        assert!(non_digit_tokens("123").is_empty());
    }
}
