//! # Prompt
//!
//! Validated line input over any `BufRead`/`Write` pair.
//!
//! ## Re-prompt Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Gross salary: abc                                                      │
//! │    ✗ amount has invalid format: must be a number such as 30000 ...     │
//! │  Gross salary: -5                                                       │
//! │    ✗ amount must be between 0 and 1000000000                            │
//! │  Gross salary: 30000                                                    │
//! │       │                                                                 │
//! │       └── Ok(Money(3_000_000))                                          │
//! │                                                                         │
//! │  End of input at any point ──► Err(ErrorCode::InputClosed)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary wraps stdin/stdout; tests drive it with `Cursor` and `Vec<u8>`.

use std::fmt::Display;
use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tally_core::validation::{self, ValidationResult};
use tally_core::{Money, YearMonth};

use crate::error::{ConsoleError, ConsoleResult};

/// ANSI clear screen + cursor home.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Line-oriented operator prompt.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    /// Direct access to the output, for multi-line renderers.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line.
    pub fn say(&mut self, line: impl Display) -> ConsoleResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Writes an empty line.
    pub fn blank(&mut self) -> ConsoleResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Writes a validation failure under the prompt.
    pub fn reject(&mut self, reason: impl Display) -> ConsoleResult<()> {
        self.say(format_args!("  ✗ {}", reason))
    }

    pub fn clear_screen(&mut self) -> ConsoleResult<()> {
        write!(self.output, "{}", CLEAR_SCREEN)?;
        self.output.flush()?;
        Ok(())
    }

    /// Shows `label` and reads one trimmed line.
    pub fn line(&mut self, label: &str) -> ConsoleResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(ConsoleError::input_closed());
        }
        Ok(buf.trim().to_string())
    }

    /// Reads until `parse` accepts the line.
    pub fn parsed<T, E: Display>(
        &mut self,
        label: &str,
        mut parse: impl FnMut(&str) -> Result<T, E>,
    ) -> ConsoleResult<T> {
        loop {
            let raw = self.line(label)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(reason) => self.reject(reason)?,
            }
        }
    }

    /// An integer in `min..=max`.
    pub fn number(&mut self, label: &str, min: u32, max: u32) -> ConsoleResult<u32> {
        self.parsed(label, |raw| match raw.parse::<u32>() {
            Ok(n) if (min..=max).contains(&n) => Ok(n),
            _ => Err(format!("enter a number between {} and {}", min, max)),
        })
    }

    /// Free text passed through a validator (id, name).
    pub fn text(
        &mut self,
        label: &str,
        validate: impl Fn(&str) -> ValidationResult<String>,
    ) -> ConsoleResult<String> {
        self.parsed(label, |raw| validate(raw))
    }

    /// A non-negative amount such as `30000` or `30000,50`.
    pub fn money(&mut self, label: &str) -> ConsoleResult<Money> {
        self.parsed(label, validation::parse_money)
    }

    /// A `YYYY-MM-DD` date.
    pub fn date(&mut self, label: &str) -> ConsoleResult<NaiveDate> {
        self.parsed(label, validation::parse_date)
    }

    /// A `YYYY-MM` month; an empty line picks `default`.
    pub fn month(&mut self, label: &str, default: YearMonth) -> ConsoleResult<YearMonth> {
        self.parsed(label, |raw| {
            if raw.is_empty() {
                Ok(default)
            } else {
                validation::parse_year_month(raw)
            }
        })
    }

    /// Y/N question. An empty answer is "no".
    pub fn confirm(&mut self, label: &str) -> ConsoleResult<bool> {
        self.parsed(label, |raw| match raw.to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" | "" => Ok(false),
            _ => Err("answer Y or N"),
        })
    }

    pub fn pause(&mut self) -> ConsoleResult<()> {
        self.line("Press ENTER to continue...")?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Cursor;

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompt: Prompt<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompt.into_output()).unwrap()
    }

    #[test]
    fn test_number_reprompts_until_in_range() {
        let mut p = prompt("abc\n9\n3\n");
        assert_eq!(p.number("Choice: ", 1, 8).unwrap(), 3);

        let out = output(p);
        assert_eq!(out.matches("Choice: ").count(), 3);
        assert_eq!(out.matches("enter a number between 1 and 8").count(), 2);
    }

    #[test]
    fn test_end_of_input_is_input_closed() {
        let mut p = prompt("");
        let err = p.line("Name: ").unwrap_err();
        assert_eq!(err.code, ErrorCode::InputClosed);

        // invalid lines followed by EOF still end the loop
        let mut p = prompt("x\n");
        assert!(p.number("Choice: ", 1, 2).unwrap_err().is_input_closed());
    }

    #[test]
    fn test_money_accepts_comma() {
        let mut p = prompt("-1\n30000,50\n");
        assert_eq!(p.money("Salary: ").unwrap().cents(), 3_000_050);
    }

    #[test]
    fn test_month_default_on_empty_line() {
        let default: YearMonth = "2025-06".parse().unwrap();
        let mut p = prompt("\n2024-2\n");
        assert_eq!(p.month("Month: ", default).unwrap(), default);
        assert_eq!(p.month("Month: ", default).unwrap().to_string(), "2024-02");
    }

    #[test]
    fn test_date_and_confirm() {
        let mut p = prompt("10/06/2025\n2025-06-10\nmaybe\nY\n\n");
        assert_eq!(
            p.date("Date: ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
        );
        assert!(p.confirm("Sure? ").unwrap());
        assert!(!p.confirm("Sure? ").unwrap());
    }

    #[test]
    fn test_text_uses_validator() {
        let mut p = prompt("   \n  Ada Byron \n");
        let name = p.text("Name: ", validation::validate_full_name).unwrap();
        assert_eq!(name, "Ada Byron");
        assert!(output(p).contains("✗"));
    }
}
