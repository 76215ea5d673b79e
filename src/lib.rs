//! Session-backed todo lists served over HTTP.
//!
//! Visitors create named lists and add, complete and delete todos in them.
//! Everything lives in a server-side session identified by a cookie; nothing
//! is written to disk except the configuration file.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod list_manager;
pub mod models;
pub mod router;
pub mod session;
pub mod state;
pub mod views;
