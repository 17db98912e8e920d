//! List every libiio context that can be reached.
//!
//! # Usage
//!
//! ```bash
//! cargo build -p daq-driver-iio --features hardware --example scan
//!
//! # All backends, or only the ones given
//! ./target/debug/examples/scan
//! ./target/debug/examples/scan usb,ip
//! ```

use daq_driver_iio::{scan, ContextParams};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let backends = env::args().nth(1);

    let results = scan(&ContextParams::default(), backends.as_deref())?;

    println!("Found {} context(s):", results.results_count());
    for (i, result) in results.results().enumerate() {
        println!("  {}: {} [{}]", i, result.uri, result.description);
    }

    Ok(())
}
