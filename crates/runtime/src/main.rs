#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

//! # Marcher
//!
//! Entry point for the `marcher` binary.
//!
//! Without `--offline` a window opens and the selected scene is painted into
//! it progressively while the arrow keys (or WASD) walk the camera around.
//! With `--offline <PATH>` one deterministic frame is written to an image file
//! and the process exits.

mod app;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = app::Args::parse();
    app::run(&args)
}
