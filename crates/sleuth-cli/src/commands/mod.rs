//! CLI command implementations.
//!
//! Batch commands share the session and table/hexdump rendering with the
//! interactive shell.

pub mod dump;
pub mod hex_utils;
pub mod hexdump;
pub mod list;
pub mod resolve;
pub mod view;
