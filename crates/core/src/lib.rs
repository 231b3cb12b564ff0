//! Store-independent building blocks shared by the `movies-db` and
//! `movies-api` crates.

pub mod config;
pub mod error;
pub mod types;
