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

use std::{
    fmt::Display,
    io::Write,
    sync::atomic::Ordering,
};

use chrono::{DateTime, SecondsFormat, Utc};
use log::{Level, LevelFilter, Log, set_boxed_logger, set_max_level};
use strum::{AsRefStr, Display as StrumDisplay};
use ustr::Ustr;

pub use super::config::LoggerConfig;
use super::{LOGGING_BYPASSED, LOGGING_COLORED, LOGGING_INITIALIZED};

/// The color applied to the message content of a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, StrumDisplay)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LogColor {
    Normal,
    Green,
    Blue,
    Magenta,
    Cyan,
    Yellow,
    Red,
}

impl LogColor {
    /// Returns the ANSI escape sequence for the color.
    #[must_use]
    pub const fn as_ansi(&self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Green => "\x1b[92m",
            Self::Blue => "\x1b[94m",
            Self::Magenta => "\x1b[35m",
            Self::Cyan => "\x1b[36m",
            Self::Yellow => "\x1b[1;33m",
            Self::Red => "\x1b[1;31m",
        }
    }
}

impl From<Level> for LogColor {
    fn from(value: Level) -> Self {
        match value {
            Level::Error => Self::Red,
            Level::Warn => Self::Yellow,
            Level::Info => Self::Normal,
            Level::Debug | Level::Trace => Self::Cyan,
        }
    }
}

const ANSI_RESET: &str = "\x1b[0m";

/// Represents a log event which includes a message.
#[derive(Clone, Debug)]
pub struct LogLine {
    /// The timestamp for the event.
    pub timestamp: DateTime<Utc>,
    /// The log level for the event.
    pub level: Level,
    /// The color for the log message content.
    pub color: LogColor,
    /// The component (log target) the event originated from.
    pub component: Ustr,
    /// The log message content.
    pub message: String,
}

impl LogLine {
    /// Returns the line formatted for output, with ANSI colors when `is_colored`.
    #[must_use]
    pub fn render(&self, is_colored: bool) -> String {
        let ts = self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        if is_colored && self.color != LogColor::Normal {
            format!(
                "{ts} [{}] {}: {}{}{ANSI_RESET}",
                self.level,
                self.component,
                self.color.as_ansi(),
                self.message,
            )
        } else {
            format!("{ts} {self}")
        }
    }
}

impl Display for LogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.component, self.message)
    }
}

/// A synchronous logger writing to stdout, with errors going to stderr.
///
/// Levels are resolved per target through [`LoggerConfig::level_for`].
#[derive(Debug)]
pub struct Logger {
    /// Configuration for logging levels and behavior.
    pub config: LoggerConfig,
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        !LOGGING_BYPASSED.load(Ordering::Relaxed)
            && (metadata.level() == Level::Error
                || metadata.level() <= self.config.level_for(metadata.target()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        let line = LogLine {
            timestamp: Utc::now(),
            level,
            color: level.into(),
            component: Ustr::from(record.target()),
            message: record.args().to_string(),
        };
        let rendered = line.render(LOGGING_COLORED.load(Ordering::Relaxed));

        let result = if level == Level::Error {
            writeln!(std::io::stderr().lock(), "{rendered}")
        } else {
            writeln!(std::io::stdout().lock(), "{rendered}")
        };
        if let Err(e) = result {
            eprintln!("Error writing log line: {e}");
        }
    }

    fn flush(&self) {
        if LOGGING_BYPASSED.load(Ordering::Relaxed) {
            return;
        }

        if let Err(e) = std::io::stdout().flush() {
            eprintln!("Error flushing stdout: {e}");
        }
    }
}

impl Logger {
    /// Initializes the logger based on the `TEC_LOG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the environment variable or parsing the configuration fails.
    pub fn init_with_env() -> anyhow::Result<()> {
        let config = LoggerConfig::from_env()?;
        Self::init_with_config(config)
    }

    /// Initializes the logger with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if another `log` implementation is already registered.
    pub fn init_with_config(config: LoggerConfig) -> anyhow::Result<()> {
        if LOGGING_INITIALIZED.load(Ordering::SeqCst) {
            return Ok(());
        }

        let is_colored = config.is_colored;
        let print_config = config.print_config;
        if print_config {
            println!("Logger initialized with {config:?}");
        }

        set_boxed_logger(Box::new(Self { config }))?;

        let max_level = LevelFilter::Trace;
        set_max_level(max_level);

        if print_config {
            println!("Logger set as `log` implementation with max level {max_level}");
        }

        LOGGING_INITIALIZED.store(true, Ordering::SeqCst);
        LOGGING_COLORED.store(is_colored, Ordering::SeqCst);
        Ok(())
    }
}
