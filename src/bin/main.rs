use flowtrack::{cli, config, telemetry};

fn main() {
    let cli = cli::parse_from(std::env::args_os());

    let config = config::load_or_default();
    let _telemetry_guard = telemetry::init(effective_verbosity(&cli), &config.logging);

    if let Err(e) = cli::run(cli, &config) {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn effective_verbosity(cli: &cli::Cli) -> u8 {
    if cli.quiet { 0 } else { cli.verbose }
}
