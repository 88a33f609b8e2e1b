use std::{path::PathBuf, sync::Arc};

use clap::{Args as ClapArgs, Parser, Subcommand};
use maser_front::{
    app::MaserApp,
    config::FrontConfig,
    env_state::MaserEnv,
    maser_errors::MaserError,
    parameters::{schema, ParamGroup},
    session,
    submission::HttpService,
};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "maser-front", about = "Parameter front-end of the MASER simulation service")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Simulation endpoint, overrides the configuration.
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Output directory for the figure and the time series, overrides the configuration.
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every input, group after group, with its default value and accepted range.
    Schema,
    /// Draw the default parameters, apply the edits in order and write the latest result.
    Run(RunArgs),
    /// Read `key=value` change events from stdin until end of input.
    Interactive,
}

#[derive(ClapArgs, Debug)]
struct RunArgs {
    /// Edit given as `key=value` or `group.key=value`, may be repeated.
    #[arg(long = "set", value_name = "EDIT")]
    edits: Vec<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        error!(%err, "maser-front failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), MaserError> {
    let mut config = match &cli.config {
        Some(path) => FrontConfig::from_toml_file(path)?,
        None => FrontConfig::default(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(out) = cli.out {
        config.output_dir = out;
    }

    match cli.command {
        Command::Schema => {
            print_schema();
            Ok(())
        }
        Command::Run(args) => {
            let app = build_app(&config)?;
            session::run_edits(&app, &config, &args.edits).await
        }
        Command::Interactive => {
            let app = Arc::new(build_app(&config)?);
            let input = BufReader::new(tokio::io::stdin());
            let summary = session::interactive(app, Arc::new(config), input).await?;
            info!(?summary, "end of input");
            Ok(())
        }
    }
}

fn print_schema() {
    for group in ParamGroup::ALL {
        println!("[{}] {} ({})", group.wire_name(), group.title(), group.container());
        for desc in schema::fields(group) {
            let min = desc.min.map(|b| {
                let op = if b.inclusive { "≥" } else { ">" };
                format!("{op} {}", b.value)
            });
            let max = desc.max.map(|b| {
                let op = if b.inclusive { "≤" } else { "<" };
                format!("{op} {}", b.value)
            });
            let range = [min, max].into_iter().flatten().collect::<Vec<_>>().join(", ");
            println!(
                "  {:<8} {:<45} default {:<12} {}",
                desc.key,
                desc.label,
                desc.default.to_string(),
                range
            );
        }
    }
}

fn build_app(config: &FrontConfig) -> Result<MaserApp<HttpService>, MaserError> {
    let env = MaserEnv::new(config.clone())?;
    info!(endpoint = env.service().endpoint(), "simulation service");
    Ok(MaserApp::new(env.service()).with_download_name(config.download_filename.clone()))
}
