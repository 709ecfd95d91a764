use anyhow::Result;
use log::info;
use std::env;
use std::path::PathBuf;

use zmodel::config::Config;
use zmodel::sim;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut cfg_path = PathBuf::from("config.yaml");
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        if a == "--config" || a == "-c" {
            if let Some(p) = args.next() {
                cfg_path = PathBuf::from(p);
            }
        }
    }
    info!("loading config: {}", cfg_path.display());
    let cfg = Config::from_path(&cfg_path)?;
    info!("{}", cfg.summary());
    let _stats = sim::run(cfg)?;
    Ok(())
}
