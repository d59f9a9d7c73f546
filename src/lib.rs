pub mod cli;
pub mod constants;
pub mod entry;
pub mod guestbook;
pub mod render;
pub mod server;
pub mod store;
pub mod validation;

use clap::Parser;
use cli::{Cli, Commands, DbArgs};
use guestbook::{Guestbook, GuestbookError, SubmitOutcome};
use server::{ServeRequest, ServeService, ServerError};
use store::{EntryStore, StoreError};
use tracing_subscriber::EnvFilter;
use validation::ValidationError;

#[derive(Debug)]
pub enum AppError {
    Serve(ServerError),
    Store(StoreError),
    Guestbook(GuestbookError),
    Rejected(ValidationError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Serve(err) => write!(f, "{err}"),
            AppError::Store(err) => write!(f, "{err}"),
            AppError::Guestbook(err) => write!(f, "{err}"),
            AppError::Rejected(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Serve(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Guestbook(err) => Some(err),
            AppError::Rejected(err) => Some(err),
        }
    }
}

pub async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => {
            init_tracing(&args.log_level);
            let request = ServeRequest::from(args);
            ServeService.execute(&request).await.map_err(AppError::Serve)
        }
        Commands::Sign(args) => {
            let guestbook = open_guestbook(&args.db)?;
            match guestbook
                .submit(&args.name, &args.message)
                .map_err(AppError::Guestbook)?
            {
                SubmitOutcome::Accepted(entry) => {
                    println!("Signed by {} at {}", entry.name, entry.timestamp);
                    Ok(())
                }
                SubmitOutcome::Rejected(reason) => Err(AppError::Rejected(reason)),
            }
        }
        Commands::List(args) => {
            let guestbook = open_guestbook(&args.db)?;
            let count = guestbook.count().map_err(AppError::Guestbook)?;
            if count == 0 {
                println!("No messages yet.");
                return Ok(());
            }
            println!("{count} guests have said hi so far");
            let entries = guestbook.entries().map_err(AppError::Guestbook)?;
            for entry in &entries {
                println!("{}  {}: {}", entry.timestamp, entry.name, entry.message);
            }
            Ok(())
        }
    }
}

fn open_guestbook(db: &DbArgs) -> Result<Guestbook, AppError> {
    let store = EntryStore::open(&db.path).map_err(AppError::Store)?;
    Ok(Guestbook::new(store))
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}
