//! Interactive bookstore inventory manager.
//!
//! # Responsibility
//! - Wire logging, the catalogue database and the menu session together.
//! - Treat an unavailable catalogue as fatal; everything else is recovered
//!   inside the session loop.

mod config;
mod session;
mod table;

use bookstore_core::{core_version, init_logging, open_db, CatalogueService, SeedStatus, SqliteBookRepository};
use config::CliConfig;
use log::{error, info};
use session::Session;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match CliConfig::from_working_dir() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("file logging disabled: {err}");
    }
    info!("event=app_start module=cli status=ok version={}", core_version());

    let (conn, seed_status) = match open_db(&config.db_path) {
        Ok(opened) => opened,
        Err(err) => {
            error!("event=app_exit module=cli status=error error_code=storage_unavailable");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match &seed_status {
        SeedStatus::Seeded { .. } => println!("Database Created."),
        SeedStatus::AlreadyPresent => {}
        SeedStatus::Aborted { .. } => {
            println!("Database error: duplicate unique IDs registered.")
        }
    }

    let repo = match SqliteBookRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            error!("event=app_exit module=cli status=error error_code=catalogue_missing");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(CatalogueService::new(repo), stdin.lock(), stdout.lock());
    match session.run() {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error_code=terminal_io error={err}");
            eprintln!("terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}
