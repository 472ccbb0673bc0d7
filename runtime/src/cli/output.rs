//! Output helpers shared by every subcommand.
//!
//! Global flags are propagated through `JOBSCOPE_*` environment variables by
//! `main`, so any module can check them without threading arguments.

use serde::Serialize;

pub fn is_json() -> bool {
    flag("JOBSCOPE_JSON")
}

pub fn is_quiet() -> bool {
    flag("JOBSCOPE_QUIET")
}

pub fn is_verbose() -> bool {
    flag("JOBSCOPE_VERBOSE")
}

/// How a command should present its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Json,
    Quiet,
    Human,
}

impl Mode {
    /// `--json` wins over `--quiet`.
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => Self::Json,
            (false, true) => Self::Quiet,
            (false, false) => Self::Human,
        }
    }
}

pub fn mode() -> Mode {
    Mode::from_flags(is_json(), is_quiet())
}

fn flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v == "1")
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: cannot serialize output: {e}"),
    }
}

/// Status symbols, plain when `NO_COLOR` is set.
pub struct Styled {
    color: bool,
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

impl Styled {
    pub fn new() -> Self {
        Self {
            color: std::env::var_os("NO_COLOR").is_none() && !flag("JOBSCOPE_NO_COLOR"),
        }
    }

    pub fn ok_sym(&self) -> &'static str {
        if self.color {
            "\x1b[32m✓\x1b[0m"
        } else {
            "[OK]"
        }
    }

    pub fn warn_sym(&self) -> &'static str {
        if self.color {
            "\x1b[33m!\x1b[0m"
        } else {
            "[!!]"
        }
    }

    pub fn bold(&self, s: &str) -> String {
        if self.color {
            format!("\x1b[1m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_symbols() {
        let s = Styled { color: false };
        assert_eq!(s.ok_sym(), "[OK]");
        assert_eq!(s.warn_sym(), "[!!]");
        assert_eq!(s.bold("x"), "x");
    }

    #[test]
    fn test_mode_precedence() {
        assert_eq!(Mode::from_flags(true, true), Mode::Json);
        assert_eq!(Mode::from_flags(false, true), Mode::Quiet);
        assert_eq!(Mode::from_flags(false, false), Mode::Human);
    }
}
