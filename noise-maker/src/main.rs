mod args;

use std::io::{self, BufWriter};

use args::CliArgs;
use clap::Parser;
use noise_maker::{
    generator::{Window, generate_batch},
    stream::write_lines,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    info!(
        count = args.count(),
        seed = ?args.seed(),
        start = %args.start(),
        days = args.days(),
        malformed_ratio = args.malformed_ratio(),
        "generating access log lines"
    );

    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let window = Window::new(*args.start(), *args.days());
    let lines = generate_batch(&mut rng, &window, *args.count(), *args.malformed_ratio());

    let mut out = BufWriter::new(io::stdout().lock());
    let written = write_lines(&mut out, &lines)?;
    info!(written, "done");
    Ok(())
}
