//! Line-oriented terminal storefront.
//!
//! Reads commands from any `BufRead`, drives a [`ShopperSession`] and prints
//! whatever the session's notifications render to.

use std::io::{BufRead, Write};

use agrismart_events::Subscription;
use clap::{CommandFactory, Parser};

use crate::error::StorefrontError;
use crate::notification::Notification;
use crate::render::TextRenderer;
use crate::session::ShopperSession;

/// One line of shopper input.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "agrismart", no_binary_name = true, disable_help_subcommand = true)]
enum Command {
    /// Show the produce list
    #[command(alias = "products")]
    List,
    /// Add a product to the cart
    Add {
        /// Product number from the list
        number: usize,
        /// How many units to add
        #[arg(default_value = "1", allow_hyphen_values = true)]
        quantity: String,
    },
    /// Show the cart
    Cart,
    /// Enter buyer details and place the order
    Checkout,
    /// Show this help
    Help,
    /// Leave the marketplace
    #[command(alias = "exit")]
    Quit,
}

/// `Ok(None)` for a blank line.
fn parse_command(line: &str) -> Result<Option<Command>, clap::Error> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    Command::try_parse_from(line.split_whitespace()).map(Some)
}

pub struct Terminal<R, W> {
    session: ShopperSession,
    renderer: TextRenderer,
    notifications: Subscription<Notification>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(session: ShopperSession, renderer: TextRenderer, input: R, output: W) -> Self {
        let notifications = session.subscribe();
        Self {
            session,
            renderer,
            notifications,
            input,
            output,
        }
    }

    pub fn session(&self) -> &ShopperSession {
        &self.session
    }

    /// Serve commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), StorefrontError> {
        writeln!(self.output, "Welcome to the AgriSmart Marketplace")?;
        let catalog = self.renderer.render_catalog(self.session.catalog());
        write!(self.output, "{catalog}")?;
        writeln!(self.output, "Type 'help' for commands.")?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.dispatch(command)?,
                Ok(None) => {}
                // Usage errors already carry a hint to run `help`.
                Err(err) => write!(self.output, "{err}")?,
            }
            self.flush_notifications()?;
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<(), StorefrontError> {
        match command {
            Command::List => {
                let catalog = self.renderer.render_catalog(self.session.catalog());
                write!(self.output, "{catalog}")?;
            }
            Command::Add { number, quantity } => {
                let product = self
                    .session
                    .catalog()
                    .get(number)
                    .map(|p| p.name().to_string());
                match product {
                    Some(name) => {
                        // Rejected quantities are dropped without a message, like the web form.
                        self.session.request_add_item(&name, &quantity);
                    }
                    None => writeln!(self.output, "No product numbered '{number}'. Try 'list'.")?,
                }
            }
            Command::Cart => {
                let ledger = self.session.ledger();
                match self
                    .renderer
                    .render_cart(&ledger.snapshot_lines(), ledger.compute_total())
                {
                    Some(text) => write!(self.output, "{text}")?,
                    None => writeln!(self.output, "Your cart is empty.")?,
                }
            }
            Command::Checkout => {
                if self.session.ledger().is_empty() {
                    writeln!(self.output, "Your cart is empty.")?;
                    return Ok(());
                }
                let Some(name) = self.prompt("Name: ")? else {
                    return Ok(());
                };
                let Some(location) = self.prompt("Location: ")? else {
                    return Ok(());
                };
                let Some(contact) = self.prompt("Contact: ")? else {
                    return Ok(());
                };
                // The outcome reaches the shopper through notifications.
                let _ = self.session.request_checkout(&name, &location, &contact);
            }
            Command::Help => write!(self.output, "{}", Command::command().render_help())?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn flush_notifications(&mut self) -> Result<(), StorefrontError> {
        for notification in self.notifications.drain() {
            if let Some(text) = self.renderer.render_notification(&notification) {
                write!(self.output, "{text}")?;
            }
        }
        Ok(())
    }

    /// Print `label` and read one line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, StorefrontError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
