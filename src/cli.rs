//! Interactive terminal harness over [`OrderBook`].
//!
//! The session owns all text handling: it parses menu choices, sides and
//! numbers, and only calls into the book with well-typed values. Everything
//! it prints comes from the snapshots the book returns.
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//! use unit_book::cli::Session;
//! use unit_book::OrderBook;
//!
//! let input = Cursor::new("1\nbuy\n20.00\n100\n4\n");
//! let mut output = Vec::new();
//!
//! let mut session = Session::new(OrderBook::new(), input, &mut output);
//! session.run().unwrap();
//! assert_eq!(session.book().len(), 1);
//! ```

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{AuditError, BookError};
use crate::orderbook::OrderBook;
use crate::types::{OrderView, Side};

/// Malformed text input. Never reaches the book.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown menu option {0:?}")]
    UnknownChoice(String),

    #[error("unknown order side {0:?}")]
    UnknownSide(String),

    #[error("not a valid number: {0:?}")]
    InvalidNumber(String),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

// ============================================================================
// Input parsing
// ============================================================================

/// Top-level menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddOrder,
    RemoveOrder,
    ShowOrders,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::AddOrder),
            "2" => Ok(MenuChoice::RemoveOrder),
            "3" => Ok(MenuChoice::ShowOrders),
            "4" => Ok(MenuChoice::Exit),
            other => Err(InputError::UnknownChoice(other.to_string())),
        }
    }
}

/// Parse `buy` / `sell`, ignoring case and surrounding whitespace
pub fn parse_side(s: &str) -> Result<Side, InputError> {
    match s.trim().to_lowercase().as_str() {
        "buy" => Ok(Side::Buy),
        "sell" => Ok(Side::Sell),
        _ => Err(InputError::UnknownSide(s.trim().to_string())),
    }
}

/// Parse a decimal price. Sign is not checked here; the book validates it.
pub fn parse_price(s: &str) -> Result<Decimal, InputError> {
    Decimal::from_str(s.trim()).map_err(|_| InputError::InvalidNumber(s.trim().to_string()))
}

/// Parse an unsigned integer (quantity or order id)
pub fn parse_count(s: &str) -> Result<u64, InputError> {
    s.trim()
        .parse()
        .map_err(|_| InputError::InvalidNumber(s.trim().to_string()))
}

// ============================================================================
// Session
// ============================================================================

const MENU: &str = "\nOptions:\n1. Add Order\n2. Remove Order\n3. Show Orders\n4. Exit";

/// A menu-driven session reading from `R` and printing to `W`.
pub struct Session<R, W> {
    book: OrderBook,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(book: OrderBook, input: R, output: W) -> Self {
        Self {
            book,
            input,
            output,
        }
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn into_book(self) -> OrderBook {
        self.book
    }

    /// Replay the demo orders: three buys and two sells, with order 3
    /// cancelled after it briefly held the best buy.
    pub fn seed_demo(&mut self) -> Result<(), CliError> {
        info!("seeding demo orders");
        self.add_order(Side::Buy, Decimal::new(2000, 2), 100)?;
        self.add_order(Side::Sell, Decimal::new(2500, 2), 200)?;
        self.add_order(Side::Buy, Decimal::new(2300, 2), 50)?;
        self.add_order(Side::Buy, Decimal::new(2300, 2), 700)?;
        self.remove_order(3)?;
        self.add_order(Side::Sell, Decimal::new(2800, 2), 100)?;
        Ok(())
    }

    /// Run the menu loop until the user exits or input ends
    pub fn run(&mut self) -> Result<(), CliError> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Select an option: ")? else {
                debug!("input closed");
                return Ok(());
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::AddOrder) => self.add_from_input()?,
                Ok(MenuChoice::RemoveOrder) => self.remove_from_input()?,
                Ok(MenuChoice::ShowOrders) => self.show_orders()?,
                Ok(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting the program.")?;
                    return Ok(());
                }
                Err(err) => {
                    debug!(error = %err, "bad menu input");
                    writeln!(self.output, "Invalid option. Please select a valid number.")?;
                }
            }
        }
    }

    fn add_from_input(&mut self) -> Result<(), CliError> {
        let Some(side_text) = self.prompt("Enter Order Type (buy/sell): ")? else {
            return Ok(());
        };
        let side = match parse_side(&side_text) {
            Ok(side) => side,
            Err(err) => {
                debug!(error = %err, "bad side input");
                writeln!(self.output, "Invalid Order Type. Please enter 'buy' or 'sell'.")?;
                return Ok(());
            }
        };

        let Some(price_text) = self.prompt("Enter Price: ")? else {
            return Ok(());
        };
        let Some(quantity_text) = self.prompt("Enter Quantity: ")? else {
            return Ok(());
        };

        match (parse_price(&price_text), parse_count(&quantity_text)) {
            (Ok(price), Ok(quantity)) => self.add_order(side, price, quantity),
            (Err(err), _) | (_, Err(err)) => {
                debug!(error = %err, "bad price or quantity input");
                writeln!(
                    self.output,
                    "Invalid input for price or quantity. Please enter valid numbers."
                )?;
                Ok(())
            }
        }
    }

    fn remove_from_input(&mut self) -> Result<(), CliError> {
        let Some(id_text) = self.prompt("Enter Order ID to remove: ")? else {
            return Ok(());
        };
        match parse_count(&id_text) {
            Ok(order_id) => self.remove_order(order_id),
            Err(err) => {
                debug!(error = %err, "bad order id input");
                writeln!(self.output, "Invalid input. Please enter a valid Order ID.")?;
                Ok(())
            }
        }
    }

    /// Submit an order and print the side's new best
    pub fn add_order(&mut self, side: Side, price: Decimal, quantity: u64) -> Result<(), CliError> {
        match self.book.submit(side, price, quantity) {
            Ok(submitted) => {
                writeln!(self.output, "\nAfter adding {side} Order ID {}:", submitted.id)?;
                writeln!(
                    self.output,
                    "Best {side} Price Order: {}",
                    format_best(&submitted.best)
                )?;
            }
            Err(err) => writeln!(self.output, "Order rejected: {err}")?,
        }
        Ok(())
    }

    /// Cancel an order and print the outcome
    pub fn remove_order(&mut self, order_id: u64) -> Result<(), CliError> {
        match self.book.cancel(order_id) {
            Ok(()) => writeln!(self.output, "Order ID {order_id} marked as removed.")?,
            Err(BookError::OrderNotFound(_)) => {
                writeln!(self.output, "Order ID {order_id} does not exist.")?
            }
            Err(err) => writeln!(self.output, "Cancel failed: {err}")?,
        }
        Ok(())
    }

    /// Print the full order history and its audit root
    pub fn show_orders(&mut self) -> Result<(), CliError> {
        writeln!(self.output, "Current Orders:")?;
        for view in self.book.list_orders() {
            writeln!(self.output, "{view}")?;
        }
        let receipt = self.book.audit_receipt()?;
        writeln!(self.output, "History root: {}", receipt.history_root_hex())?;
        Ok(())
    }

    /// Print `text`, then read one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// `(unit_price, order)` with the unit price cut to 8 decimal places
fn format_best(view: &OrderView) -> String {
    format!("({}, {view})", view.unit_price.round_dp(8).normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================
