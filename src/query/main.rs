//! Query front end for the cadastral resolver.
//!
//! Resolves a query once from the command line, or serves the resolver over
//! HTTP for launchers and other hosts that render the result list.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use zbgis::config::Config;
use zbgis::{QueryResolver, ResultItem};

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "ZBGIS cadastral map query resolver")]
struct Args {
    /// Config file (TOML), built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one query and print the results in order
    Resolve {
        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Query text, e.g. `nitra 143/12`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Serve the resolver over HTTP
    Serve {
        /// Listen address
        #[arg(short, long, default_value = "0.0.0.0:3000")]
        listen: String,
    },
}

/// Application state shared across handlers
struct AppState {
    resolver: QueryResolver,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for results. RUST_LOG wins over --verbose
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load_or_default(args.config.as_deref())?;
    let resolver = QueryResolver::from_config(&config).context("Invalid service configuration")?;

    match args.command {
        Command::Resolve { json, text } => {
            let query = text.join(" ");
            let items = resolver.resolve(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print_items(&items);
            }
            Ok(())
        }
        Command::Serve { listen } => serve(resolver, &listen).await,
    }
}

fn print_items(items: &[ResultItem]) {
    for (i, item) in items.iter().enumerate() {
        println!("{}. {}", i + 1, item.label);
        println!("   {}", item.description);
        if let Some(url) = item.destination.url() {
            println!("   {}", url);
        }
    }
}

async fn serve(resolver: QueryResolver, listen: &str) -> Result<()> {
    info!("ZBGIS Query Server");
    info!("Reference index holds {} districts", resolver.index().len());

    let state = Arc::new(AppState { resolver });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/resolve", get(resolve_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let districts = state.resolver.index().len();

    Json(HealthResponse {
        status: if districts > 0 { "ok" } else { "degraded" },
        districts,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    districts: usize,
}

/// Resolve a query into ordered result items
async fn resolve_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQueryParams>,
) -> Json<ResolveResponse> {
    let items = state.resolver.resolve(params.text.as_deref().unwrap_or(""));
    Json(ResolveResponse { items })
}

#[derive(Deserialize)]
struct ResolveQueryParams {
    /// Raw query text
    text: Option<String>,
}

#[derive(Serialize)]
struct ResolveResponse {
    items: Vec<ResultItem>,
}
