//! TEMADESK CLI - Order desk for an academic-writing service
//!
//! Usage:
//!   temadesk book               Book an order through the six-step wizard
//!   temadesk quote ...          Price an order without booking it
//!   temadesk services           Show the catalog with prices
//!   temadesk login / signup     Manage the auth session

mod auth;
mod book;
mod client;
mod quote;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use temadesk_common::catalog::ServiceKind;
use temadesk_common::config::ClientConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "temadesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TEMADESK - booking desk for TEMADIPLOME.CE")]
struct Cli {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    silent: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Book an order through the six-step wizard
    Book {
        /// Pre-select a service type (same ids as the website deep link)
        #[arg(long, value_name = "SERVICE")]
        service: Option<ServiceKind>,
    },

    /// Price an order without booking it
    Quote(quote::QuoteArgs),

    /// Show services, multipliers and add-ons with prices
    Services,

    /// Sign in to an existing account
    Login,

    /// Create a new account
    Signup,

    /// Sign out and clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami,
}

/// Console output helper honoring the global --silent / --verbose flags
pub struct Console {
    pub silent: bool,
    pub verbose: bool,
}

impl Console {
    pub fn new(silent: bool, verbose: bool) -> Self {
        Self { silent, verbose }
    }

    pub fn log(&self, msg: impl std::fmt::Display) {
        if !self.silent {
            println!("{}", msg);
        }
    }

    pub fn verbose(&self, msg: impl std::fmt::Display) {
        if self.verbose && !self.silent {
            println!("  {}", msg);
        }
    }

    pub fn success(&self, msg: impl std::fmt::Display) {
        if !self.silent {
            println!("✅ {}", msg);
        }
    }

    pub fn warn(&self, msg: impl std::fmt::Display) {
        if !self.silent {
            eprintln!("⚠️  {}", msg);
        }
    }

    pub fn error(&self, msg: impl std::fmt::Display) {
        eprintln!("❌ {}", msg); // Always print errors
    }

    /// Spinner shown while a collaborator request is in flight
    pub fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        if self.silent {
            None
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg}")
                    .expect("static spinner template"),
            );
            pb.set_message(msg.to_string());
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging - only if not in silent mode
    if !cli.silent {
        let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
        let _ = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false)
            .without_time()
            .try_init();
    }

    let console = Console::new(cli.silent, cli.verbose);
    let config = ClientConfig::load()?;

    match cli.command {
        Commands::Book { service } => book::cmd_book(&console, &config, service),
        Commands::Quote(args) => quote::cmd_quote(&console, &args),
        Commands::Services => quote::cmd_services(&console),
        Commands::Login => auth::cmd_login(&console, &config),
        Commands::Signup => auth::cmd_signup(&console, &config),
        Commands::Logout => auth::cmd_logout(&console),
        Commands::Whoami => auth::cmd_whoami(&console),
    }
}
