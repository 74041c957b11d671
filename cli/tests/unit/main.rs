//! Unit tests for ranger-bootstrap
//!
//! These tests use mocked ports or temp-dir fixtures and run without network
//! access beyond loopback.

mod http_fetcher;
mod layout_properties;
