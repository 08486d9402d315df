//! Standalone dealer web server binary
//!
//! Usage: cargo run -p dealer-web --bin dealer-web-server

use dealer_engine::deck::Seed;
use dealer_web::{init_logging, ServerConfig, WebServer};

/// Environment variable holding the optional shuffle seed. Read once, at
/// startup; a fixed value reproduces the same dealt hands on every run.
const SEED_ENV_VAR: &str = "DEAL_APP_SEED";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let mut host = "127.0.0.1".to_string();
    let mut port = 8080u16;
    let mut seed: Option<Seed> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--host" | "-h" => {
                if i + 1 < args.len() {
                    host = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --host requires a value");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a value");
                    std::process::exit(1);
                }
            }
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    seed = Some(Seed::parse(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --seed requires a value");
                    std::process::exit(1);
                }
            }
            "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // --seed wins over the environment.
    if seed.is_none() {
        if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
            if !raw.is_empty() {
                seed = Some(Seed::parse(&raw));
            }
        }
    }

    let mut config = ServerConfig::new(host, port);
    if let Some(seed) = seed {
        tracing::info!("shuffling with a configured seed");
        config = config.with_seed(seed);
    }

    tracing::info!("Starting deck dealer server");
    tracing::info!("  Host: {}", config.host());
    tracing::info!("  Port: {}", config.port());

    let server = WebServer::new(config)?;
    let handle = server.start().await?;

    tracing::info!("Server running at http://{}", handle.address());
    println!("Server running at http://{}", handle.address());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down server");
    handle.shutdown().await?;
    tracing::info!("Server stopped cleanly");

    Ok(())
}

fn print_help() {
    println!("Deck Dealer Web Server");
    println!();
    println!("Usage: dealer-web-server [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --host, -h <HOST>    Host to bind to (default: 127.0.0.1)");
    println!("  --port, -p <PORT>    Port to bind to (default: 8080)");
    println!("  --seed, -s <SEED>    Shuffle seed (default: ${SEED_ENV_VAR}, else OS entropy)");
    println!("  --help               Show this help message");
}
