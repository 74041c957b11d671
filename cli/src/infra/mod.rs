//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: downloads, archive
//! extraction, hashing, configuration files, and process replacement.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod archive;
pub mod config;
pub mod fetch;
pub mod fs;
pub mod launcher;
