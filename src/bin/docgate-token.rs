//! Issues and inspects docgate access tokens.

use std::process::ExitCode;

use chrono::{SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;

use docgate::config::Config;
use docgate::token::{parse_duration, TokenManager};

#[derive(Parser)]
#[command(name = "docgate-token")]
#[command(about = "Generate and validate docgate access tokens", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new token
    Generate {
        /// Lifetime, e.g. 24h, 90m, 1h30m, or a bare number of hours
        #[arg(long, short, default_value = "24h")]
        expires: String,
    },
    /// Validate a token and show its claims
    Validate {
        token: String,
    },
}

fn badge(text: &str, bg: colored::Color) -> colored::ColoredString {
    format!(" {} ", text).black().on_color(bg).bold()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", badge("ERROR", colored::Color::Red), e);
            return ExitCode::FAILURE;
        }
    };
    if config.uses_default_secret() {
        eprintln!(
            "{} {}",
            badge("WARN", colored::Color::Yellow),
            "TOKEN_SECRET not set, using the built-in default".yellow()
        );
    }
    let manager = TokenManager::new(&config.token_secret);

    match cli.command {
        Command::Generate { expires } => {
            let ttl = match parse_duration(&expires) {
                Ok(ttl) => ttl,
                Err(e) => {
                    eprintln!("{} {}", badge("ERROR", colored::Color::Red), e);
                    return ExitCode::FAILURE;
                }
            };
            match manager.issue_token(ttl) {
                Ok((token, wire)) => {
                    println!(
                        "{} expires {}",
                        badge("TOKEN", colored::Color::Green),
                        token.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true).cyan()
                    );
                    println!("{wire}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{} failed to generate token: {}", badge("ERROR", colored::Color::Red), e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Validate { token } => match manager.verify(&token) {
            Ok(valid) => {
                let left = valid.expires_at - Utc::now();
                println!("{} token is valid", badge("OK", colored::Color::Blue));
                println!("  {} {}", "ID:".dimmed(), valid.id.white());
                println!("  {} {}", "Issued:".dimmed(), valid.issued_at.to_rfc3339_opts(SecondsFormat::Secs, true));
                println!("  {} {}", "Expires:".dimmed(), valid.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true));
                println!("  {} {}s", "Time left:".dimmed(), left.num_seconds().to_string().green());
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("{} token validation failed: {}", badge("DENY", colored::Color::Red), e.to_string().red());
                ExitCode::FAILURE
            }
        },
    }
}
