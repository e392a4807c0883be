// demos/storefront_app/src/commands.rs

use crate::errors::{AppError, Result};
use storefront::{CartAction, Catalog, Direction, ProductId};

pub const HELP: &str = "\
Commands:
  products        show the catalog
  open | close    show or hide the cart
  add <id>        add a product to the cart
  inc <id>        increase a line's quantity
  dec <id>        decrease a line's quantity (removes it at 1)
  rm <id>         remove a line
  checkout        buy everything in the cart
  help            show this message
  quit            leave the store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Action(CartAction),
  Products,
  Help,
  Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// Product ids are checked against the catalog here, so only ids a product
/// card could have offered ever reach the controller.
pub fn parse_command(line: &str, catalog: &Catalog) -> Result<Option<Command>> {
  let mut words = line.split_whitespace();
  let Some(verb) = words.next() else {
    return Ok(None);
  };
  let arg = words.next();
  if let Some(extra) = words.next() {
    return Err(AppError::Command(format!("unexpected argument '{}'", extra)));
  }

  let command = match verb.to_ascii_lowercase().as_str() {
    "products" | "ls" => Command::Products,
    "help" | "?" => Command::Help,
    "quit" | "exit" | "q" => Command::Quit,
    "open" => Command::Action(CartAction::OpenCart),
    "close" => Command::Action(CartAction::CloseCart),
    "checkout" => Command::Action(CartAction::Checkout),
    "add" => Command::Action(CartAction::AddToCart(product_arg(verb, arg, catalog)?)),
    "inc" | "+" => Command::Action(CartAction::UpdateQuantity(
      product_arg(verb, arg, catalog)?,
      Direction::Increase,
    )),
    "dec" | "-" => Command::Action(CartAction::UpdateQuantity(
      product_arg(verb, arg, catalog)?,
      Direction::Decrease,
    )),
    "rm" | "remove" => Command::Action(CartAction::RemoveFromCart(product_arg(verb, arg, catalog)?)),
    other => return Err(AppError::Command(format!("unknown command '{}', try 'help'", other))),
  };

  let takes_arg = matches!(
    command,
    Command::Action(CartAction::AddToCart(_) | CartAction::UpdateQuantity(..) | CartAction::RemoveFromCart(_))
  );
  if !takes_arg {
    if let Some(arg) = arg {
      return Err(AppError::Command(format!("'{}' takes no argument, got '{}'", verb, arg)));
    }
  }
  Ok(Some(command))
}

fn product_arg(verb: &str, arg: Option<&str>, catalog: &Catalog) -> Result<ProductId> {
  let raw = arg.ok_or_else(|| AppError::Command(format!("usage: {} <id>", verb)))?;
  let id = raw
    .parse::<u32>()
    .map(ProductId::new)
    .map_err(|_| AppError::Command(format!("'{}' is not a product id", raw)))?;
  if !catalog.contains(id) {
    return Err(AppError::Command(format!("no product with id {}", id)));
  }
  Ok(id)
}
