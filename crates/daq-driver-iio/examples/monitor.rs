//! Print the calibrated value of every input channel.
//!
//! # Usage
//!
//! ```bash
//! cargo build -p daq-driver-iio --features hardware --example monitor
//!
//! # Optional URI, or a TOML config file with --config
//! ./target/debug/examples/monitor ip:192.168.2.1
//! ./target/debug/examples/monitor --config iio.toml
//!
//! # Dump attribute snapshots as JSON instead
//! ./target/debug/examples/monitor --json
//! ```

use anyhow::Context as _;
use daq_driver_iio::{ChannelSnapshot, IioConfig};
use std::env;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let mut config = IioConfig::default();
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                config = IioConfig::load(&path).with_context(|| format!("loading {}", path))?;
            }
            "--json" => json = true,
            uri => config.uri = Some(uri.to_string()),
        }
    }

    let ctx = config.open_context()?;
    println!("Context: {}", ctx.description());

    let mut snapshots: Vec<ChannelSnapshot> = Vec::new();

    for dev in ctx.devices() {
        for chn in dev.channels().filter(|c| !c.is_output()) {
            if json {
                snapshots.push(chn.snapshot()?);
                continue;
            }

            match chn.value() {
                Ok(v) => println!("  {:<20} {:<16} {:>12.6}", dev.display_name(), chn.id(), v),
                Err(e) if e.is_not_found() => {}
                Err(e) => warn!(device = %dev.id(), channel = %chn.id(), error = %e, "Read failed"),
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    }

    Ok(())
}
