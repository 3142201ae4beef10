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

//! Global post-processing applied to every value kind.

use std::fmt::Debug;

/// A post-processing hook shared by all value kinds.
///
/// Each method receives the name of the value kind and the figure computed so far (after the
/// kind's own overrides) and returns the figure to use. All methods default to identity.
pub trait ValueHook: Debug {
    /// Adjusts a freshly normalized amount before it is stored.
    fn normalized(&self, kind: &str, value: f64) -> f64 {
        let _ = kind;
        value
    }

    /// Adjusts the integer representation returned to callers.
    fn integer(&self, kind: &str, value: i64) -> i64 {
        let _ = kind;
        value
    }

    /// Adjusts the float representation returned to callers.
    fn float(&self, kind: &str, value: f64) -> f64 {
        let _ = kind;
        value
    }

    /// Adjusts the precision returned to callers and used for integer scaling.
    fn precision(&self, kind: &str, value: u8) -> u8 {
        let _ = kind;
        value
    }
}

/// A [`ValueHook`] that leaves every figure unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopValueHook;

impl ValueHook for NoopValueHook {}
