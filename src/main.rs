use atlas_forecast::config::AppConfig;
use atlas_forecast::forecast::ForecastDays;
use atlas_forecast::render::render_report;
use atlas_forecast::{logging, server, ForecastService, LookupError};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

/// Atlas Forecast: multi-day weather for any place on Earth.
///
/// Resolves a free-text location with Nominatim (OpenStreetMap) and fetches
/// the forecast from Open-Meteo. Both services are free and keyless.
///
/// Examples:
///   atlas Tokyo
///   atlas "Karachi, Pakistan" --days 3
///   atlas --location "New York, US" --json
///   atlas --serve --port 8080
#[derive(Parser)]
#[command(name = "atlas", version, about, long_about = None)]
struct Cli {
    /// Location (positional). Example: atlas Tokyo
    #[arg(index = 1)]
    location_positional: Option<String>,

    /// Location (named). Example: --location "Lahore, PK"
    #[arg(long, short = 'l')]
    location: Option<String>,

    /// Forecast days: 3, 5, 7 or 10. Defaults to the config value (7).
    #[arg(long, short = 'd', value_parser = parse_days)]
    days: Option<ForecastDays>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Skip the temperature and precipitation charts.
    #[arg(long)]
    no_charts: bool,

    /// Config file (TOML). Defaults to <config dir>/atlas/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Run the JSON HTTP API instead of a single lookup.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long)]
    host: Option<String>,

    /// Port for --serve.
    #[arg(long)]
    port: Option<u16>,
}

fn parse_days(s: &str) -> Result<ForecastDays, String> {
    s.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Configuration & logging ─────────────────────────────────

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(cli.verbose, &config.logging.level);

    let days = cli.days.unwrap_or(config.defaults.days);
    let service = ForecastService::from_config(&config);

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let host = cli.host.clone().unwrap_or_else(|| config.server.host.clone());
        let port = cli.port.unwrap_or(config.server.port);
        return run_server(&host, port, service, days);
    }

    // ── Single lookup ───────────────────────────────────────────

    let query = cli
        .location
        .or(cli.location_positional)
        .unwrap_or_default();

    let report = match service.lookup(&query, days) {
        Ok(r) => r,
        Err(LookupError::EmptyQuery) => {
            eprintln!("{}", LookupError::EmptyQuery.user_message());
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  atlas Tokyo");
            eprintln!("  atlas \"Karachi, Pakistan\" --days 3");
            eprintln!("  atlas --location \"New York, US\"");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: cannot serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_report(&report, !cli.no_charts));
    }

    ExitCode::SUCCESS
}

fn run_server(host: &str, port: u16, service: ForecastService, days: ForecastDays) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: cannot start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(server::start(host, port, service, days)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error on {}:{}: {}", host, port, e);
            ExitCode::FAILURE
        }
    }
}
