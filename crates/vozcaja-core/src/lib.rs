//! Core library for Spanish voice-transcript bookkeeping.
//!
//! This crate provides:
//! - Direction classification (income vs. expense) from verb keywords
//! - Amount extraction from digits, magnitude phrases and spoken numbers
//! - Keyword-weighted category scoring
//! - Short description synthesis
//! - Ledger summaries over interpreted movements

pub mod error;
pub mod models;
pub mod interpret;

pub use error::{InterpretError, Result, VozcajaError};
pub use models::config::VozcajaConfig;
pub use models::summary::LedgerSummary;
pub use models::transaction::{Category, Direction, ParsedTransaction};
pub use interpret::{
    interpret, interpret_bytes, InterpretationResult, RuleInterpreter, TranscriptInterpreter,
};
pub use interpret::rules::{classify_category, classify_direction, enhance_transcript, extract_amount};
