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

//! Functions for scaling normalized amounts to integer representations.
//!
//! A value with precision `P` stores its integer form as `round(amount * 10^P)`, so
//! `12.34` at the default precision of 2 becomes `1234`.

/// The decimal precision used when a value kind does not specify one.
pub const DEFAULT_PRECISION: u8 = 2;

/// The maximum decimal precision supported for integer scaling.
pub const MAX_PRECISION: u8 = 9;

/// Precomputed powers of 10 for scale lookup, index i contains 10^i.
const POWERS_OF_10: [i64; 10] = [
    1,             // 10^0
    10,            // 10^1
    100,           // 10^2
    1_000,         // 10^3
    10_000,        // 10^4
    100_000,       // 10^5
    1_000_000,     // 10^6
    10_000_000,    // 10^7
    100_000_000,   // 10^8
    1_000_000_000, // 10^9
];

const _: () = assert!(
    (MAX_PRECISION as usize) < POWERS_OF_10.len(),
    "MAX_PRECISION exceeds POWERS_OF_10 table size"
);

/// Checks if a given `precision` value is within the supported range.
///
/// # Errors
///
/// Returns an error if `precision` exceeds [`MAX_PRECISION`].
pub fn check_precision(precision: u8) -> anyhow::Result<()> {
    if precision > MAX_PRECISION {
        anyhow::bail!("`precision` exceeded maximum `MAX_PRECISION` ({MAX_PRECISION}), was {precision}")
    }

    Ok(())
}

/// Returns `precision` limited to [`MAX_PRECISION`].
#[must_use]
pub fn clamp_precision(precision: u8) -> u8 {
    precision.min(MAX_PRECISION)
}

/// Converts an `f64` amount to its integer representation at `precision` decimal places.
///
/// Amounts outside the `i64` range saturate.
///
/// # Panics
///
/// Panics if `precision` exceeds [`MAX_PRECISION`].
#[must_use]
pub fn to_integer(value: f64, precision: u8) -> i64 {
    check_precision(precision).expect("precision within range");
    let scale = POWERS_OF_10[usize::from(precision)];
    (value * scale as f64).round() as i64
}
