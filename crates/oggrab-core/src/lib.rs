pub mod config;
pub mod logging;

pub mod driver;
pub mod extract;
pub mod fetch;
pub mod notes;
pub mod pipeline;
pub mod retry;
pub mod tagger;
pub mod transcode;
pub mod url_model;
