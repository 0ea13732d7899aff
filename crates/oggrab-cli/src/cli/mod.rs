//! CLI for oggrab.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use oggrab_core::config::{self, OggrabConfig};
use oggrab_core::driver::{RunConfig, DEFAULT_OUTPUT_DIR};
use oggrab_core::logging;
use std::path::PathBuf;

use commands::{run_links, run_pipeline, run_resolve};

/// Top-level CLI for oggrab.
#[derive(Debug, Parser)]
#[command(name = "oggrab")]
#[command(
    about = "Download the .ogg files behind a page's File: links, convert them to .mp3 and tag them",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: ~/.config/oggrab/config.toml, created if missing).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors to the console.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download, convert and tag every .ogg file linked from a listing page.
    Run {
        /// Listing page containing links to "File:" subpages.
        url: String,

        /// Directory the .mp3 files are written to.
        #[arg(default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Album tag written to every track.
        album: Option<String>,

        /// Artist tag written to every track.
        artist: Option<String>,

        /// Image embedded as cover art (skipped if the file does not exist).
        thumbnail: Option<PathBuf>,

        /// Note log for skipped/failed items (default from config: output_notes.txt).
        #[arg(long, value_name = "PATH")]
        notes_file: Option<PathBuf>,
    },

    /// List the File: subpages a listing page links to, without downloading.
    Links {
        /// Listing page URL.
        url: String,
    },

    /// Show the audio URL a single File: subpage resolves to.
    Resolve {
        /// Subpage URL.
        url: String,
    },
}

impl Cli {
    fn load_config(&self) -> Result<OggrabConfig> {
        match &self.config {
            Some(path) => config::load_or_init_at(path),
            None => config::load_or_init(),
        }
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if logging::init_logging(cli.quiet).is_err() {
            logging::init_logging_console(cli.quiet);
        }
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                url,
                output_dir,
                album,
                artist,
                thumbnail,
                notes_file,
            } => {
                let run = RunConfig {
                    output_dir,
                    album,
                    artist,
                    thumbnail,
                };
                let notes_file = notes_file.unwrap_or_else(|| cfg.notes_file.clone());
                run_pipeline(&cfg, &run, &notes_file, &url)?;
            }
            CliCommand::Links { url } => run_links(&cfg, &url)?,
            CliCommand::Resolve { url } => run_resolve(&cfg, &url)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
