// demos/storefront_app/src/main.rs

mod commands;
mod config;
mod errors;
mod terminal;

use crate::commands::{parse_command, Command, HELP};
use crate::config::{AppConfig, OutputFormat};
use crate::errors::Result as AppResult;
use crate::terminal::TerminalSurface;

use anyhow::Context as _;
use std::pin::Pin;
use storefront::{CartAction, CartController, Catalog, ProductId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Sleep;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

/// A pending revert of an "Added!" label.
struct LabelReset {
  product_id: ProductId,
  timer: Pin<Box<Sleep>>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;
  init_tracing(&app_config);

  tracing::info!(output = ?app_config.output, "Starting storefront session...");

  let surface = TerminalSurface::stdout(app_config.output, app_config.currency_symbol.clone());
  let mut controller = CartController::new(Catalog::demo(), Box::new(surface));

  if app_config.show_banner && app_config.output == OutputFormat::Text {
    println!("Welcome to the iPhone store. Type 'help' for commands.");
  }
  controller.render_all();

  run_session(&mut controller, &app_config).await?;

  tracing::info!("Storefront session ended.");
  Ok(())
}

fn init_tracing(app_config: &AppConfig) {
  // Logs go to stderr so they never interleave with rendered frames on stdout.
  let builder = tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr);
  match app_config.log_format {
    OutputFormat::Json => builder.json().init(),
    OutputFormat::Text => builder.init(),
  }
}

/// Reads commands from stdin until EOF or `quit`, while the label-reset timer
/// runs alongside.
async fn run_session(controller: &mut CartController, app_config: &AppConfig) -> AppResult<()> {
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut label_reset: Option<LabelReset> = None;

  loop {
    tokio::select! {
      line = lines.next_line() => {
        let Some(line) = line? else {
          break;
        };
        match parse_command(&line, controller.catalog()) {
          Ok(None) => {}
          Ok(Some(Command::Quit)) => break,
          Ok(Some(Command::Help)) => println!("{}", HELP),
          Ok(Some(Command::Products)) => controller.render_all(),
          Ok(Some(Command::Action(action))) => {
            controller.dispatch(action)?;
            if let CartAction::AddToCart(product_id) = action {
              // A newer flash supersedes the pending one.
              if let Some(previous) = label_reset.take() {
                if previous.product_id != product_id {
                  controller.restore_add_label(previous.product_id);
                }
              }
              label_reset = Some(LabelReset {
                product_id,
                timer: Box::pin(tokio::time::sleep(app_config.label_reset)),
              });
            }
          }
          Err(e) => {
            tracing::debug!(error = %e, "Rejected input line.");
            println!("! {}", e);
          }
        }
      }
      _ = wait_for_reset(&mut label_reset), if label_reset.is_some() => {
        if let Some(reset) = label_reset.take() {
          controller.restore_add_label(reset.product_id);
        }
      }
    }
  }

  if let Some(reset) = label_reset.take() {
    controller.restore_add_label(reset.product_id);
  }
  Ok(())
}

async fn wait_for_reset(label_reset: &mut Option<LabelReset>) {
  match label_reset {
    Some(reset) => reset.timer.as_mut().await,
    None => std::future::pending().await,
  }
}
