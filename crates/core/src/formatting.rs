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

//! Number formatting utilities.

/// Regroups a plain `-1234.56` style numeric string using the given separators.
fn separate_with(s: &str, thousands_sep: &str, decimal_sep: &str) -> String {
    let (neg, digits) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s)
    };

    let (int_part, dec_part) = match digits.find('.') {
        Some(pos) => (&digits[..pos], Some(&digits[pos + 1..])),
        None => (digits, None),
    };

    let mut result = String::with_capacity(s.len() + int_part.len() / 3 * thousands_sep.len());

    if neg {
        result.push('-');
    }

    let chars: Vec<char> = int_part.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            result.push_str(thousands_sep);
        }
        result.push(*c);
    }

    if let Some(dec) = dec_part {
        result.push_str(decimal_sep);
        result.push_str(dec);
    }

    result
}

/// Formats `value` rounded to `precision` decimal places with custom separators.
///
/// # Examples
///
/// ```
/// use tec_core::formatting::format_decimal;
///
/// assert_eq!(format_decimal(1234.5, 2, ",", "."), "1.234,50");
/// assert_eq!(format_decimal(1234.6, 0, ".", ","), "1,235");
/// ```
#[must_use]
pub fn format_decimal(value: f64, precision: u8, decimal_sep: &str, thousands_sep: &str) -> String {
    let plain = format!("{value:.prec$}", prec = usize::from(precision));
    separate_with(&plain, thousands_sep, decimal_sep)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1234.56, 2, ".", ",", "1,234.56")]
    #[case(1234.56, 2, ",", ".", "1.234,56")]
    #[case(0.5, 2, ".", ",", "0.50")]
    #[case(-9876543.219, 2, ".", "'", "-9'876'543.22")]
    #[case(42.0, 0, ".", ",", "42")]
    #[case(1234567.891, 3, ",", " ", "1 234 567,891")]
    #[case(-1234567.0, 0, ".", ",", "-1,234,567")]
    fn test_format_decimal(
        #[case] value: f64,
        #[case] precision: u8,
        #[case] decimal_sep: &str,
        #[case] thousands_sep: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            format_decimal(value, precision, decimal_sep, thousands_sep),
            expected
        );
    }
}
