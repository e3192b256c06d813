use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use imt_hash::{checksum::Checksum, EventHandler, Fetcher, ImtDigest, Source};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "imt-hash", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a <URL> file, compress it as a hash, and save its
    /// hexadecimal string to <DESTINATION>.
    Hash {
        /// URL of the file. Anything without a `http://` or `https://`
        /// scheme is read from the local filesystem.
        url: String,

        /// Path to write the hexadecimal string.
        #[arg(short, long)]
        destination: PathBuf,

        /// Delay, in milliseconds, before reading the file.
        #[arg(short, long, value_name = "MS")]
        throttle: Option<u64>,

        /// Timeout, in seconds, for the HTTP request.
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Expected checksum of the file, like `sha256:<hex>`.
        #[arg(long, value_name = "ALGORITHM:HEX")]
        checksum: Option<Checksum>,
    },
}

struct Logger;

impl EventHandler for Logger {
    fn request(&self, url: &str) {
        tracing::info!("GET {url}");
    }

    fn response(&self, status: u16, content_length: Option<u64>) {
        match content_length {
            Some(length) => tracing::debug!(status, length, "response received"),
            None => tracing::debug!(status, "response received"),
        }
    }

    fn open_file(&self, path: &std::path::Path) {
        tracing::info!("reading {}", path.display());
    }

    fn throttle(&self, delay: Duration) {
        tracing::debug!("throttle: waiting {delay:?}");
    }

    fn progress_bytes(&self, bytes: usize) {
        tracing::trace!(bytes, "data received");
    }

    fn digest(&self, digest: &ImtDigest) {
        tracing::info!("hexadecimal value: {digest}");
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Hash {
            url,
            destination,
            throttle,
            timeout,
            checksum,
        } => {
            let source = Source::from(url);

            tracing::info!("fetching {source}");

            let mut fetcher = Fetcher::new(source).event_handler(Logger);

            if let Some(ms) = throttle {
                fetcher = fetcher.throttle(Duration::from_millis(ms));
            }

            if let Some(secs) = timeout {
                fetcher = fetcher.timeout(Duration::from_secs(secs));
            }

            if let Some(checksum) = checksum {
                fetcher = fetcher.checksum(checksum);
            }

            let digest = fetcher
                .digest()
                .with_context(|| format!("fetch {}", fetcher.source()))?;

            imt_hash::sink::save(&destination, &digest)
                .with_context(|| format!("save digest to {}", destination.display()))?;

            tracing::info!("hexadecimal saved in {}", destination.display());
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("imt-hash error: {:#}", err);
        std::process::exit(1);
    }
}
