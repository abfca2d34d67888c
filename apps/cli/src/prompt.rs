//! # Operator Prompts
//!
//! Line-oriented input over any `BufRead`/`Write` pair, plus the field
//! parsers the add-product form uses.
//!
//! ## Re-ask Loop
//! ```text
//! Enter price: abc
//! Invalid price: expected a number          ◄── parser error, ask again
//! Enter price: 0
//! Invalid price: Price must be positive     ◄── rule error, ask again
//! Enter price: 19.99
//!      │
//!      ▼
//! Money(1999)
//! ```
//!
//! End of input is surfaced as [`ShellError::Eof`] so every caller can
//! unwind with `?` and the menu loop exits cleanly.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use stockroom_core::money::MAX_PRICE;
use stockroom_core::Money;
use thiserror::Error;

/// Reasons the shell stops reading.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Input stream closed.
    #[error("end of input")]
    Eof,

    /// Terminal read or write failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;

// =============================================================================
// Prompter
// =============================================================================

/// Reads answers from `input` and writes prompts and messages to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Writes one line of output.
    pub fn say(&mut self, text: impl Display) -> ShellResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Shows `label` and returns the trimmed answer.
    pub fn ask(&mut self, label: &str) -> ShellResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::Eof);
        }
        Ok(line.trim().to_string())
    }

    /// Asks until `parse` accepts the answer, printing each rejection.
    pub fn ask_until<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> ShellResult<T> {
        loop {
            let answer = self.ask(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(message) => self.say(message)?,
            }
        }
    }

    /// Asks for a whole number, re-asking on anything else.
    pub fn ask_number(&mut self, label: &str) -> ShellResult<i64> {
        self.ask_until(label, |answer| {
            answer
                .parse::<i64>()
                .map_err(|_| "Please enter a number.".to_string())
        })
    }

    /// Shows a numbered list and returns the chosen index (0-based).
    pub fn choose(&mut self, title: &str, options: &[&str]) -> ShellResult<usize> {
        self.say(format!("\n{}", title))?;
        for (i, option) in options.iter().enumerate() {
            self.say(format!("{}. {}", i + 1, option))?;
        }

        let label = format!("Enter choice (1-{}): ", options.len());
        self.ask_until(&label, |answer| match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Ok(n - 1),
            Ok(_) => Err("Invalid choice. Please try again.".to_string()),
            Err(_) => Err("Please enter a number.".to_string()),
        })
    }

    /// Gives back the underlying reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

// =============================================================================
// Field Parsers
// =============================================================================

/// Unit price in major units; must be positive.
pub fn parse_price(answer: &str) -> Result<Money, String> {
    let amount: f64 = answer
        .parse()
        .map_err(|_| "Invalid price: expected a number".to_string())?;
    let price = Money::from_major_units(amount)
        .ok_or_else(|| "Invalid price: out of range".to_string())?;

    if amount > 0.0 && price.is_zero() {
        return Err("Invalid price: rounds to zero at cent precision".to_string());
    }
    if !price.is_positive() {
        return Err("Invalid price: Price must be positive".to_string());
    }
    if price > MAX_PRICE {
        return Err(format!("Invalid price: must not exceed {}", MAX_PRICE));
    }
    Ok(price)
}

/// Opening stock level; must not be negative.
pub fn parse_stock(answer: &str) -> Result<i64, String> {
    let quantity: i64 = answer
        .parse()
        .map_err(|_| "Invalid quantity: expected a whole number".to_string())?;

    if quantity < 0 {
        return Err("Invalid quantity: Quantity cannot be negative".to_string());
    }
    Ok(quantity)
}

/// Warranty length in whole years; must not be negative.
pub fn parse_warranty_years(answer: &str) -> Result<u32, String> {
    let years: i64 = answer
        .parse()
        .map_err(|_| "Invalid warranty years: expected a whole number".to_string())?;

    if years < 0 {
        return Err("Invalid warranty years: Warranty years cannot be negative".to_string());
    }
    u32::try_from(years).map_err(|_| "Invalid warranty years: too large".to_string())
}

/// `YYYY-MM-DD`, taken as midnight local time.
pub fn parse_expiry_date(answer: &str) -> Result<NaiveDateTime, String> {
    NaiveDate::parse_from_str(answer, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| "Invalid date format. Please use YYYY-MM-DD".to_string())
}
