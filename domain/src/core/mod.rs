//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`] — the subject of a consensus run
//! - [`error::DomainError`] — configuration-time domain errors
//! - [`string::truncate`] — UTF-8 safe preview truncation, with the
//!   shared [`string::DEFAULT_PREVIEW_CHARS`] width

pub mod error;
pub mod question;
pub mod string;
