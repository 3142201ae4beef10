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

//! Utility functions for deriving identifiers from plugin file paths.

use std::path::Path;

/// Length of the `.php` style extension trimmed from plugin entry files.
const PLUGIN_FILE_EXT_LEN: usize = 4;

/// Returns the slug of a plugin from the path of its main file.
///
/// The slug is the file name with its four character extension removed, so
/// `/plugins/the-events-calendar/the-events-calendar.php` yields `the-events-calendar`.
/// Returns an empty string when the path has no file name.
#[must_use]
pub fn plugin_slug_from_file<P: AsRef<Path>>(file: P) -> String {
    let Some(file_name) = file.as_ref().file_name() else {
        return String::new();
    };

    let chars: Vec<char> = file_name.to_string_lossy().chars().collect();
    let keep = chars.len().saturating_sub(PLUGIN_FILE_EXT_LEN);
    chars[..keep].iter().collect()
}
