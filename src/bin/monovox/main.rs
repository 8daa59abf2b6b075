//! monovox - plays a short vibrato phrase through the default output device
//!
//! Run with: cargo run
//! Set RUST_LOG=debug to see voice allocation.

mod app;

use app::Monovox;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Monovox::new()
        .lfo(5.5, 0.35)
        .decay(0.9998)
        .note(60, 400)
        .note(63, 400)
        .note(67, 400)
        .note(72, 1200)
        .rest(200)
        .note(67, 300)
        .note(60, 900)
        .run()
}
