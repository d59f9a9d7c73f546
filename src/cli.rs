use crate::constants::{DEFAULT_BIND_ADDR, DEFAULT_DB_PATH, DEFAULT_STATIC_DIR};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the guestbook page and its htmx endpoints.
    Serve(ServeArgs),
    /// Sign the guestbook from the command line.
    Sign(SignArgs),
    /// Print every entry, newest first.
    List(ListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// SQLite database file holding the entries.
    #[arg(long = "db", value_name = "FILE", env = "GUESTBOOK_DB", default_value = DEFAULT_DB_PATH)]
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Address to listen on.
    #[arg(long, value_name = "ADDR", env = "GUESTBOOK_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,

    /// Directory containing style.css and assets/.
    #[arg(long = "static-dir", value_name = "DIR", default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,

    /// Log filter used when RUST_LOG is not set (e.g. info, guestbook=debug).
    #[arg(long = "log-level", value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Name to sign with.
    #[arg(long)]
    pub name: String,

    /// Message to leave.
    #[arg(long)]
    pub message: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub db: DbArgs,
}
