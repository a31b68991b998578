//! Basic put/read/release flow.
//!
//! Run with `RUST_LOG=debug cargo run --example basic_usage` to see storage events.

use anyhow::Result;
use bytes_storage::{Config, Storage};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let storage = Storage::from_config(&config)?;

    let once = storage.put(b"This is an example payload.")?;
    println!("{once}");
    println!("{:?}", String::from_utf8_lossy(&once.read()?));
    println!("{once}");

    let head = storage.put_persistent(b"Hello, ")?;
    let tail = storage.put(b"world")?;
    println!("{:?}", String::from_utf8_lossy(&(&head + &tail)?));
    println!("{}", storage.stats()?.blob_count);

    storage.delete()?;
    Ok(())
}
