//! GLR Web Service CLI
//!
//! Starts the HTTP server for the report auto-fill pipeline.

use glr_web::{config::WebConfig, start_server, WebError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), WebError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        // Load from specified config file
        let config_path = &args[2];
        WebConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        match WebConfig::default_path() {
            Some(path) if path.exists() => WebConfig::from_file(path)?,
            _ => {
                // The API credential must still come from the environment.
                eprintln!(
                    "Warning: No config file found, using default test configuration"
                );
                eprintln!("Usage: glr-web --config <path-to-config.toml>");
                eprintln!();
                WebConfig::default_test_config()
            }
        }
    };

    // Start the server
    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("GLR Web Service - Insurance Report Auto-Filler");
    println!();
    println!("USAGE:");
    println!("    glr-web --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("    Without --config, ~/.glr/config.toml is used when present.");
    println!();
    println!("EXAMPLE:");
    println!("    glr-web --config config/glr.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - api_key: OpenRouter API credential (optional; the");
    println!("      OPENROUTER_API_KEY environment variable takes precedence)");
    println!("    - model: Model identifier (default: mistralai/mixtral-8x7b)");
    println!("    - referer: Referer header sent with completion requests");
    println!("    - endpoint: Chat-completions endpoint override");
    println!();
}
