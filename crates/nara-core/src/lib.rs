//! # nara-core
//!
//! Core types, naming rules, and error types for the NARA library ingestion
//! tools.
//!
//! This crate provides the foundational types shared across all `nara-*` crates:
//! - Catalogue, queue, and maritime demo entities
//! - Category, queue status, and translation language enums
//! - Keyword auto-categorization for harvested works
//! - Storage object naming and public URL helpers
//! - Run summary response type
//! - Cross-cutting error types

pub mod categorize;
pub mod demo;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod naming;
pub mod responses;
