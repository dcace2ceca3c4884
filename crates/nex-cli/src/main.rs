use clap::Parser;
use nex_io::{parse_network_args, NetworkInput, NetworkSource};
use nex_tui::models::DashboardOptions;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

/// Explore energy-system network scenarios in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Network files to load, each `path` or `path:label`. With no
    /// arguments the bundled demo network is used.
    networks: Vec<String>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Start in dark mode, overriding the saved preference
    #[arg(long)]
    dark: bool,

    /// Do not read or write the UI preferences file
    #[arg(long)]
    no_prefs: bool,
}

fn build_input(args: &[String]) -> NetworkInput {
    match args.len() {
        0 => NetworkInput::Default,
        1 if !args[0].contains(':') => NetworkInput::Single(args[0].clone().into()),
        _ => NetworkInput::Many(
            parse_network_args(args)
                .into_iter()
                .map(|(label, path)| (label, NetworkSource::Path(path)))
                .collect(),
        ),
    }
}

fn main() {
    let cli = Cli::parse();

    // Log to stderr; stdout belongs to the terminal UI.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!(networks = cli.networks.len(), "launching dashboard");

    let opts = DashboardOptions {
        dark_mode: cli.dark.then_some(true),
        persist_prefs: !cli.no_prefs,
        ..DashboardOptions::default()
    };

    if let Err(err) = nex_tui::run_dashboard(build_input(&cli.networks), opts) {
        error!(error = %err, "dashboard failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
