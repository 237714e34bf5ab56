//! Command-line entry points of the single binary.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::{check_gallery, hash_password, migrate_gallery};

#[derive(Debug, Parser)]
#[command(name = "rsyi-backend", version, about = "RSYI website backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Move locally stored gallery files to object storage
    MigrateGallery {
        /// Report what would be migrated without uploading or updating anything
        #[arg(long)]
        dry_run: bool,

        /// Delete each local file after its item has been migrated
        #[arg(long)]
        remove_local: bool,

        /// Extra directories to search for files missing from the upload directory
        #[arg(long = "search-dir", value_name = "DIR")]
        search_dirs: Vec<PathBuf>,
    },

    /// Print the gallery catalog, one JSON object per line
    CheckGallery,

    /// Print an Argon2 hash for ADMIN_PASSWORD_HASH
    HashPassword {
        password: String,
    },
}

impl Cli {
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
