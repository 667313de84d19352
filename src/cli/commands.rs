use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Read-only gateway serving Instagram, YouTube and Twitter content as JSON")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Host to bind (overrides SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check every upstream integration once and print the result
    Health,
}
