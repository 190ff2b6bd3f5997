//! Skygraph - contribution calendar scraping service
//!
//! Main entry point: parses the CLI, loads configuration, and either
//! runs the HTTP service or performs a one-shot fetch.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skygraph::cli::{Cli, Commands};
use skygraph::config::Config;
use skygraph::request::GraphRequest;
use skygraph::scrape::scraper_from;
use skygraph::server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    match &cli.command {
        Commands::Serve { .. } => {
            // Host/port overrides were already merged in Config::load.
            tracing::info!("Starting scraping service");
            let fetcher = scraper_from(&config);
            server::serve(&config, fetcher).await?;
            Ok(())
        }
        Commands::Fetch {
            name,
            from,
            to,
            pretty,
        } => {
            let request =
                GraphRequest::from_params(Some(name.clone()), from.clone(), to.clone())?;
            tracing::info!(handle = %request.handle, "one-shot fetch");

            let fetcher = scraper_from(&config);
            let graph = fetcher.fetch(request).await?;

            let json = if *pretty {
                serde_json::to_string_pretty(&graph)?
            } else {
                serde_json::to_string(&graph)?
            };
            println!("{}", json);
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "skygraph=debug"
    } else {
        "skygraph=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
