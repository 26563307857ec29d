//! # Solder Support
//!
//! Shared text utilities for the Solder wiring toolkit.
//!
//! This crate provides:
//! - Dependency-chain and type-name rendering for diagnostics
//! - Identifier casing helpers used by the code emitters

pub mod ident;
pub mod rendering;
