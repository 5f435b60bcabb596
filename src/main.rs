mod cli;

use entrycheck::{
    config::{self, Config},
    runner::{RunOutcome, VerificationRunner},
    sink::WriterSink,
};
use entrycheck_db::{
    migrations, pool,
    queries::test_entries,
    store::{SqliteStore, Store},
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

async fn run_verification(config: &Config) -> RunOutcome {
    let db_path = config.database.resolved_path();
    tracing::debug!("Verifying store at {}", db_path);

    let mut runner = VerificationRunner::new(WriterSink::stdio());
    runner
        .run(SqliteStore::connect(db_path, config.database.pool_options()))
        .await
}

async fn list_entries(config: &Config, json: bool) -> Result<()> {
    let store =
        SqliteStore::connect(config.database.resolved_path(), config.database.pool_options())
            .await?;
    let entries = store.find_all_test_entries().await;
    store.disconnect().await?;
    let entries = entries?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No test entries.");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{}  {}  {}",
            entry.id,
            entry.created_at.to_rfc3339(),
            entry.name
        );
    }
    println!("\n{} entries", entries.len());

    Ok(())
}

fn migrate(config: &Config) -> Result<()> {
    let db_path = config.database.resolved_path();
    let pool = pool::init_pool(&db_path, &config.database.pool_options())?;
    let conn = pool::get_conn(&pool)?;
    let version = migrations::current_version(&conn)?;
    let entries = test_entries::count_test_entries(&conn)?;

    println!("Database: {}", db_path);
    println!(
        "Schema version: {} (latest {})",
        version,
        migrations::latest_version()
    );
    println!("Test entries: {}", entries);

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    config::apply_database_override(
        &mut config,
        std::env::var(config::DATABASE_ENV).ok(),
        cli.database.as_deref(),
    )?;

    // RUST_LOG wins, then --verbose, then the config file
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "entrycheck=trace,entrycheck_db=debug".to_string()
        } else {
            config
                .logging
                .filter
                .clone()
                .unwrap_or_else(|| "entrycheck=info,entrycheck_db=warn".to_string())
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    for warning in config::config_warnings(&config) {
        tracing::warn!("{}", warning);
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let rt = tokio::runtime::Runtime::new()?;
            // Store failures were already reported; they do not change the exit code.
            let outcome = rt.block_on(run_verification(&config));
            tracing::debug!("Run finished: verified={}", outcome.is_verified());
            Ok(())
        }
        Commands::List { json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_entries(&config, json))
        }
        Commands::Migrate => migrate(&config),
        Commands::Version => {
            println!("entrycheck {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
