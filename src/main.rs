mod corpus;
mod error;
mod ext;
mod format;
mod metric;
mod parse;
mod report;
mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use self::corpus::Corpus;

/// Raw benchmark logs, one `<benchmark>_<mode>_<iteration>.txt` per run.
const RAW_DIR: &str = "./raw";

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let corpus = Corpus::load(Path::new(RAW_DIR)).context("load corpus")?;
  let report = report::build(&corpus).context("reduce")?;

  println!("{}", format::format(&report).context("format")?);

  Ok(())
}
