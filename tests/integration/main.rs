//! Integration tests
//!
//! One test binary for all integration tests (faster linking).

mod helpers;

mod cli_test;
mod config_test;
mod source_test;
mod viewer_test;
