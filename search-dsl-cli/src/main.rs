use std::env;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use search_dsl_cli::{render, run, Args, CliError, Dependencies, Settings};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    match try_main(args).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Operation failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn try_main(args: Args) -> Result<String, CliError> {
    let operation = args.operation()?;
    let block = args.block()?;

    let settings = Settings::from_env()?;
    let deps = Dependencies::new(&settings, args.check_health).await?;

    info!(operation = %operation, "Starting search DSL");
    let response = run(&deps.client, operation, block.as_ref()).await?;

    render(&response, args.pretty)
}

/// Logs go to stderr; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let use_json = env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
