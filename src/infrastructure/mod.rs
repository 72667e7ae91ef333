//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`; these
//! helpers translate between host-style and sandbox paths.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, strip_host_prefix};
