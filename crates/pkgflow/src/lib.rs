//! Pkgflow - deterministic layout for monorepo dependency graphs.
//!
//! This crate provides both a CLI application and a library that turns a list
//! of packages and their dependency edges into positioned diagram nodes, with
//! dependency cycles, isolated packages and affected packages flagged.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod error;
pub mod layout;
pub mod serve;
pub mod worker;

// Public CLI module (needed by binary)
pub mod cli;

// Terminal output helpers
pub mod output;
