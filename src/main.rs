mod app;
mod config;
mod derivation;
mod error;
mod input;
mod logging;
mod model;
mod render;
mod scheduler;
mod session;
mod sim;
mod storage;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
