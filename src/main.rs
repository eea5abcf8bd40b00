use clap::{CommandFactory, Parser};

use pockyll::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit 1; --help and --version exit 0.
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    if let Err(e) = pockyll::run(cli) {
        eprintln!("ERROR: {e}");
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(1);
    }
}
