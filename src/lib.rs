//! freshctl - manage Freshservice assets from the command line
//!
//! The library side of the crate. [`fresh`] holds the API client and wire
//! model, [`resource`] the lifecycle handlers for managed resources, and
//! [`lookup`] the read-only search and resolution helpers. The binary in
//! `main.rs` is a thin clap front end over these.

pub mod cli;
pub mod config;
pub mod fresh;
pub mod lookup;
pub mod resource;
