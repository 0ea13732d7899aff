//! Tests for links and resolve.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_links() {
    match parse(&["oggrab", "links", "https://wiki.example/list"]) {
        CliCommand::Links { url } => assert_eq!(url, "https://wiki.example/list"),
        _ => panic!("expected Links"),
    }
}

#[test]
fn cli_parse_resolve() {
    match parse(&["oggrab", "resolve", "https://wiki.example/wiki/File:A.ogg"]) {
        CliCommand::Resolve { url } => assert_eq!(url, "https://wiki.example/wiki/File:A.ogg"),
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["oggrab"]).is_err());
}
