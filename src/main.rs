use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderName, Method};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bankd::middleware::auth::TokenSigner;
use bankd::models::account;
use bankd::store::postgres::PgStore;
use bankd::store::{AccountStore, NewAccount};
use bankd::{api, cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "bankd=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Serve { port }) => run_server(cfg, port).await,
        Some(cli::Commands::Account { command }) => {
            let db = PgStore::connect(&cfg.database_url).await?;
            db.migrate().await?;
            handle_account_command(&db, command).await
        }
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    // The login route and the ownership gate cannot run without a secret.
    let secret = cfg
        .jwt_secret
        .clone()
        .context("JWT_SECRET must be set to serve the API")?;

    tracing::info!("Connecting to database...");
    let db = PgStore::connect(&cfg.database_url).await?;

    tracing::info!("Running migrations...");
    db.migrate().await?;

    let signer = TokenSigner::new(&secret, cfg.token_ttl_secs);

    let state = Arc::new(AppState {
        db: Arc::new(db),
        signer,
    });

    let app = api::router(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([
                    header::CONTENT_TYPE,
                    HeaderName::from_static("x-jwt-token"),
                ]),
        )
        .layer(axum::middleware::from_fn(request_id_middleware));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("bankd API listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Middleware: injects a unique X-Request-Id into every response.
/// This allows clients to correlate errors with server logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}

async fn handle_account_command(db: &PgStore, cmd: cli::AccountCommands) -> anyhow::Result<()> {
    match cmd {
        cli::AccountCommands::Create {
            first_name,
            last_name,
            password,
        } => {
            let password_hash = account::hash_password(&password)?;

            let mut created = None;
            for _ in 0..5 {
                let new = NewAccount {
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    number: account::random_account_number(),
                    password_hash: password_hash.clone(),
                };
                match db.create_account(new).await {
                    Ok(acc) => {
                        created = Some(acc);
                        break;
                    }
                    Err(bankd::errors::AppError::DuplicateNumber) => continue,
                    Err(e) => anyhow::bail!("failed to create account: {}", e),
                }
            }
            let acc = created.context("could not assign a unique account number")?;
            println!(
                "Account created:\n  ID:     {}\n  Number: {}\n  Name:   {} {}",
                acc.id, acc.number, acc.first_name, acc.last_name
            );
        }
        cli::AccountCommands::List => {
            let accounts = db.get_accounts().await?;
            if accounts.is_empty() {
                println!("No accounts found.");
            } else {
                println!(
                    "{:<6} {:<10} {:<15} {:<15} {:<10}",
                    "ID", "NUMBER", "FIRST", "LAST", "BALANCE"
                );
                for a in accounts {
                    println!(
                        "{:<6} {:<10} {:<15} {:<15} {:<10}",
                        a.id, a.number, a.first_name, a.last_name, a.balance
                    );
                }
            }
        }
        cli::AccountCommands::Delete { id } => {
            match db.delete_account(id).await {
                Ok(()) => println!("Account {} deleted.", id),
                Err(bankd::errors::AppError::AccountNotFound) => {
                    println!("Account {} not found.", id)
                }
                Err(e) => anyhow::bail!("failed to delete account: {}", e),
            }
        }
    }
    Ok(())
}
