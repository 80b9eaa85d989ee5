//! Regdesk CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Browse registrations interactively (default command)
//! regdesk
//!
//! # Print page 2 at 20 per page
//! regdesk list --page 2 --page-size 20
//!
//! # Search one field
//! regdesk search maria --field name
//!
//! # Mark as paid, then export everything
//! regdesk pay 000000000000002a
//! regdesk export --output ~/exports
//! ```
//!
//! # Configuration
//!
//! On first run, regdesk will prompt for initial setup. Configuration is stored in
//! the user's config directory (`~/.config/regdesk/config.toml` on Linux).

use regdesk::{
    RegdeskError,
    cli::{Cli, Commands},
    commands::{self, ListOptions},
    config::RegdeskConfig,
    db::Database,
};
use tracing::debug;

type Result<T> = std::result::Result<T, RegdeskError>;

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise `-v` raises the level to info and
/// `-vv` to debug.
fn setup_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("regdesk={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = RegdeskConfig::load_or_setup(cli.quiet)?;
    let quiet = cli.quiet || config.quiet;
    let db_path = cli.db.clone().unwrap_or_else(|| config.database.clone());
    debug!(path = %db_path.display(), "Opening database");
    let db = Database::open(&db_path)?;

    let options = ListOptions {
        page_size: config.page_size,
        cursor_capacity: config.cursor_capacity,
        quiet,
    };

    match cli.get_command() {
        Commands::Browse { page_size } => {
            let options = ListOptions {
                page_size: page_size.unwrap_or(options.page_size),
                ..options
            };
            commands::browse(&db, config.export_dir(), options).await?;
        }
        Commands::List { paging } => commands::list(&db, &paging, options).await?,
        Commands::Search { term, field, paging } => {
            commands::search(&db, &term, field, &paging, options).await?;
        }
        Commands::Show { id, json } => commands::show(&db, &id, json)?,
        Commands::Stats => commands::stats(&db, options).await?,
        Commands::Export { output } => {
            let dir = output.unwrap_or_else(|| config.export_dir());
            commands::export(&db, &dir, options).await?;
        }
        Commands::Import { file, format } => {
            commands::import(&db, &file, format, quiet).await?;
        }
        Commands::Pay { id } => commands::pay(&db, &id, options).await?,
        Commands::Toggle { id, flag } => commands::toggle(&db, &id, flag, options).await?,
        Commands::Edit { id, assignments } => {
            commands::edit(&db, &id, &assignments, options).await?;
        }
        Commands::Delete { id, yes } => commands::delete(&db, &id, yes, options).await?,
    }

    db.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
