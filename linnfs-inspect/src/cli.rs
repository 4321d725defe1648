use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
pub struct Cli {
    /// LinnFS image file
    #[arg(long, short)]
    pub image: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the superblock summary
    Super,

    /// List a directory
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Print file metadata
    Stat { path: String },

    /// Write a regular file to stdout
    Cat { path: String },
}
