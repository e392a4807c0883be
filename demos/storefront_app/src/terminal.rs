// demos/storefront_app/src/terminal.rs

//! A `Surface` that writes to a terminal, either as readable text or as one
//! JSON object per line.

use crate::config::OutputFormat;
use crate::errors::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, Write};
use storefront::view::LineControl;
use storefront::{AddLabel, CartView, CatalogView, Direction, Notice, ProductId, Surface};
use tracing::warn;

/// One JSON output line.
#[derive(Debug, Serialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum Frame<'a> {
  Catalog { view: &'a CatalogView },
  Cart { view: &'a CartView },
  Overlay { open: bool },
  Notice { notice: Notice, text: &'static str },
  AddLabel { id: ProductId, label: AddLabel, text: &'static str },
}

pub struct TerminalSurface<W: Write> {
  out: W,
  format: OutputFormat,
  currency: String,
}

impl TerminalSurface<io::Stdout> {
  pub fn stdout(format: OutputFormat, currency: impl Into<String>) -> Self {
    Self::new(io::stdout(), format, currency)
  }
}

impl<W: Write> TerminalSurface<W> {
  pub fn new(out: W, format: OutputFormat, currency: impl Into<String>) -> Self {
    Self {
      out,
      format,
      currency: currency.into(),
    }
  }

  fn emit(&mut self, frame: Frame<'_>) {
    let rendered = match self.format {
      OutputFormat::Json => encode_json(&frame),
      OutputFormat::Text => Ok(format_text(&frame, &self.currency)),
    };
    let written = rendered.and_then(|text| {
      writeln!(self.out, "{}", text)?;
      self.out.flush()?;
      Ok(())
    });
    if let Err(e) = written {
      warn!(error = %e, "Failed to write frame to the terminal.");
    }
  }
}

impl<W: Write> Surface for TerminalSurface<W> {
  fn show_catalog(&mut self, view: &CatalogView) {
    self.emit(Frame::Catalog { view });
  }

  fn show_cart(&mut self, view: &CartView) {
    self.emit(Frame::Cart { view });
  }

  fn set_cart_open(&mut self, open: bool) {
    self.emit(Frame::Overlay { open });
  }

  fn notify(&mut self, notice: Notice) {
    self.emit(Frame::Notice {
      notice,
      text: notice.text(),
    });
  }

  fn set_add_label(&mut self, id: ProductId, label: AddLabel) {
    self.emit(Frame::AddLabel {
      id,
      label,
      text: label.text(),
    });
  }
}

pub fn encode_json(frame: &Frame<'_>) -> Result<String> {
  Ok(serde_json::to_string(frame)?)
}

pub fn format_text(frame: &Frame<'_>, currency: &str) -> String {
  let mut out = String::new();
  // Writing into a String cannot fail.
  let _ = match frame {
    Frame::Catalog { view } => write_catalog(&mut out, view, currency),
    Frame::Cart { view } => write_cart(&mut out, view, currency),
    Frame::Overlay { open } => write!(out, "[cart {}]", if *open { "opened" } else { "closed" }),
    Frame::Notice { text, .. } => write!(out, "** {} **", text),
    Frame::AddLabel { id, text, .. } => write!(out, "[product {}] {}", id, text),
  };
  out
}

fn write_catalog(out: &mut String, view: &CatalogView, currency: &str) -> std::fmt::Result {
  write!(out, "=== Products ===")?;
  for card in &view.cards {
    let price = format!("{}{}", currency, card.price);
    write!(out, "\n  [{}] {:<16} {:>10}  ({})", card.id, card.name, price, card.add_label.text())?;
    write!(out, "\n      {}", card.description)?;
  }
  Ok(())
}

fn write_cart(out: &mut String, view: &CartView, currency: &str) -> std::fmt::Result {
  let totals = view.totals();
  writeln!(out, "=== Cart ({}) ===", totals.quantity)?;
  match view {
    CartView::Empty { message, .. } => writeln!(out, "  {}", message)?,
    CartView::Items { lines, .. } => {
      for line in lines {
        let controls: Vec<String> = line.controls.iter().map(control_hint).collect();
        let price = format!("{}{}", currency, line.price);
        writeln!(
          out,
          "  {:<16} {:>10} x{:<3} [{}]",
          line.name,
          price,
          line.quantity,
          controls.join(" | ")
        )?;
      }
    }
  }
  write!(out, "  Total: {}{}", currency, totals.price)
}

/// The command that triggers a line control.
fn control_hint(control: &LineControl) -> String {
  match control {
    LineControl::Quantity {
      id,
      direction: Direction::Increase,
    } => format!("inc {}", id),
    LineControl::Quantity {
      id,
      direction: Direction::Decrease,
    } => format!("dec {}", id),
    LineControl::Remove { id } => format!("rm {}", id),
  }
}
