use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "accountd")]
#[command(author, version, about = "User account API service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve,

    /// Block until the configured database accepts queries, then exit
    WaitForDb,
}
