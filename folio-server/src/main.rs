//! Folio portfolio backend server.
//!
//! Usage:
//!   folio-server --port 8000 --database folio.db --admin-token <token>
//!
//! Serves the public portfolio API, the admin console API and uploaded
//! images from one process.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use folio_server::notify::LogNotifier;
use folio_server::{build_router, AppState};
use folio_storage::ContentStore;

#[derive(Parser, Debug)]
#[command(name = "folio-server")]
#[command(about = "Portfolio content API server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "FOLIO_PORT")]
    port: u16,

    /// Path to the SQLite content database
    #[arg(short, long, default_value = "folio.db", env = "FOLIO_DATABASE")]
    database: PathBuf,

    /// Directory holding uploaded content (served under /content)
    #[arg(long, default_value = "content", env = "FOLIO_CONTENT_DIR")]
    content_dir: PathBuf,

    /// Bearer token required by the admin endpoints
    #[arg(long, env = "FOLIO_ADMIN_TOKEN")]
    admin_token: String,

    /// Origin allowed by CORS
    #[arg(
        long,
        default_value = "http://localhost:3000",
        env = "FOLIO_ALLOWED_ORIGIN"
    )]
    allowed_origin: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("Folio server starting...");
    let store = ContentStore::open(&args.database)
        .with_context(|| format!("failed to open content database at {:?}", args.database))?;

    let state = AppState::new(
        store,
        Arc::new(LogNotifier),
        &args.admin_token,
        args.content_dir.clone(),
    );

    let origin: HeaderValue = args
        .allowed_origin
        .parse()
        .context("invalid allowed origin")?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let app = build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .with_context(|| format!("failed to bind port {}", args.port))?;
    info!(
        "listening on port {} (content dir {:?})",
        args.port, args.content_dir
    );
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
