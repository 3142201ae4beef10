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

//! String manipulation functionality.

use std::sync::OnceLock;

use regex::Regex;

static ENTITY_RE: OnceLock<Regex> = OnceLock::new();
static SCRIPT_STYLE_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();

/// Strings (compared trimmed and lowercased) considered truthy by [`is_truthy`].
pub const TRUTHY_STRINGS: [&str; 7] = ["1", "enable", "enabled", "on", "y", "yes", "true"];

/// Returns whether `value` reads as an affirmative setting.
///
/// # Examples
///
/// ```
/// use tec_core::string::is_truthy;
///
/// assert!(is_truthy(" Yes "));
/// assert!(!is_truthy("promoA|promoB"));
/// ```
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    TRUTHY_STRINGS.contains(&value.as_str())
}

/// Parses a submitted form value as a boolean.
///
/// Returns `Some(true)` for `1`, `true`, `on` and `yes`, `Some(false)` for `0`, `false`,
/// `off`, `no` and the empty string (all case-insensitive, trimmed), and `None` otherwise.
#[must_use]
pub fn validate_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Returns whether `block` contains no ASCII digit at all.
///
/// The empty string is a character block.
#[must_use]
pub fn is_character_block(block: &str) -> bool {
    !block.chars().any(|c| c.is_ascii_digit())
}

/// Removes HTML entities such as `&nbsp;` or `&#36;`.
#[must_use]
pub fn strip_html_entities(value: &str) -> String {
    let re = ENTITY_RE.get_or_init(|| Regex::new(r"&[^;]+;").expect("valid entity regex"));
    re.replace_all(value, "").into_owned()
}

/// Removes every HTML tag from `value`, dropping `<script>` and `<style>` elements together
/// with their content, and trims the result.
#[must_use]
pub fn strip_all_tags(value: &str) -> String {
    let script_style = SCRIPT_STYLE_RE.get_or_init(|| {
        Regex::new(r"(?is)<script[^>]*?>.*?</script>|<style[^>]*?>.*?</style>")
            .expect("valid script/style regex")
    });
    let tags = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

    let without_blocks = script_style.replace_all(value, "");
    tags.replace_all(&without_blocks, "").trim().to_string()
}

/// Escapes the five HTML special characters.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("TRUE", true)]
    #[case(" on ", true)]
    #[case("enabled", true)]
    #[case("y", true)]
    #[case("0", false)]
    #[case("no", false)]
    #[case("", false)]
    #[case("promoA|promoB", false)]
    fn test_is_truthy(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_truthy(input), expected);
    }

    #[rstest]
    #[case("1", Some(true))]
    #[case(" ON ", Some(true))]
    #[case("Yes", Some(true))]
    #[case("off", Some(false))]
    #[case("", Some(false))]
    #[case("enabled", None)]
    #[case("y", None)]
    fn test_validate_bool(#[case] input: &str, #[case] expected: Option<bool>) {
        assert_eq!(validate_bool(input), expected);
    }

    #[rstest]
    #[case("", true)]
    #[case("kr.", true)]
    #[case(".د.م.", true)]
    #[case("$", true)]
    #[case("1.234,56", false)]
    #[case("USD1", false)]
    fn test_is_character_block(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_character_block(input), expected);
    }

    #[rstest]
    #[case("&#36;1,234.56", "1,234.56")]
    #[case("1&nbsp;234", "1234")]
    #[case("no entities", "no entities")]
    fn test_strip_html_entities(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_html_entities(input), expected);
    }

    #[rstest]
    #[case("<span class=\"amount\">12.50</span>", "12.50")]
    #[case("<script>alert(1)</script>7", "7")]
    #[case("<STYLE type=\"text/css\">p{}</STYLE> 9,99 ", "9,99")]
    #[case("plain", "plain")]
    fn test_strip_all_tags(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_all_tags(input), expected);
    }

    #[rstest]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>Tom & \"Jerry's\"</b>"),
            "&lt;b&gt;Tom &amp; &quot;Jerry&#039;s&quot;&lt;/b&gt;"
        );
    }
}
