#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod parse;
pub mod raw_store;
pub mod youtube;
