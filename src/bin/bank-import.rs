//! Bank Directory CSV importer
//!
//! Loads `data.csv` (or `IMPORT_FILE`) into the `banks` table once and exits.
//!
//! # Environment Variables
//!
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS`, `DB_NAME`: `PostgreSQL` connection parts
//! - `DATABASE_URL`: full connection URL (overrides the `DB_*` variables)
//! - `STORAGE_MODE`: `postgres` (default) | `in_memory` (dry run)
//! - `IMPORT_FILE`: CSV path (default: `data.csv`)
//! - `IMPORT_MALFORMED_ROWS`: `fail` (default) | `skip`
//! - `RUST_LOG`: Logging level

use std::process::ExitCode;

use bank_directory::import::{CsvImporter, ImportConfig};
use bank_directory::infrastructure::{RepositoryConfig, RepositoryFactory, StorageMode};
use bank_directory::telemetry;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("Failed to create tokio runtime: {error}");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(async_main())
}

async fn async_main() -> ExitCode {
    telemetry::init_tracing();

    let import_config = match ImportConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let repository_config = match RepositoryConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    if repository_config.storage_mode == StorageMode::InMemory {
        tracing::warn!("STORAGE_MODE=in_memory: imported rows are discarded on exit");
    }

    let repository = match RepositoryFactory::new(repository_config).create().await {
        Ok(repository) => {
            tracing::info!("Database connection established");
            repository
        }
        Err(error) => {
            tracing::error!("Failed to initialize repository: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let importer = CsvImporter::new(repository, import_config.malformed_rows);
    match importer.import_file(&import_config.file).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("Error importing CSV: {}", error);
            ExitCode::FAILURE
        }
    }
}
