//! Tests for the run subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_run_defaults() {
    match parse(&["oggrab", "run", "https://wiki.example/wiki/Category:OST"]) {
        CliCommand::Run {
            url,
            output_dir,
            album,
            artist,
            thumbnail,
            notes_file,
        } => {
            assert_eq!(url, "https://wiki.example/wiki/Category:OST");
            assert_eq!(output_dir, Path::new("output"));
            assert!(album.is_none());
            assert!(artist.is_none());
            assert!(thumbnail.is_none());
            assert!(notes_file.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_all_positionals() {
    match parse(&[
        "oggrab",
        "run",
        "https://wiki.example/list",
        "music",
        "Game OST",
        "Composer Name",
        "cover.jpg",
    ]) {
        CliCommand::Run {
            output_dir,
            album,
            artist,
            thumbnail,
            ..
        } => {
            assert_eq!(output_dir, Path::new("music"));
            assert_eq!(album.as_deref(), Some("Game OST"));
            assert_eq!(artist.as_deref(), Some("Composer Name"));
            assert_eq!(thumbnail.as_deref(), Some(Path::new("cover.jpg")));
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_notes_file() {
    match parse(&[
        "oggrab",
        "run",
        "https://wiki.example/list",
        "--notes-file",
        "/tmp/notes.txt",
    ]) {
        CliCommand::Run { notes_file, .. } => {
            assert_eq!(notes_file.as_deref(), Some(Path::new("/tmp/notes.txt")));
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_run_requires_url() {
    assert!(Cli::try_parse_from(["oggrab", "run"]).is_err());
}

#[test]
fn cli_global_flags() {
    let cli = Cli::try_parse_from([
        "oggrab",
        "run",
        "https://wiki.example/list",
        "--quiet",
        "--config",
        "/etc/oggrab.toml",
    ])
    .unwrap();
    assert!(cli.quiet);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/oggrab.toml")));
}
