//! # Whiplash Mood Library
//!
//! Core mood detection for the whiplash services:
//! - Emotion trigger tables and negation markers
//! - Rule-based classification with a sentiment-polarity fallback
//! - Label aggregation and ranking
//!
//! Everything in this crate is pure and synchronous; the lookup tables are
//! built once at first use and never mutated, so concurrent callers need
//! no locking.

pub mod classifier;
pub mod lexicon;
pub mod sentiment;

pub use classifier::detect_mood;
pub use lexicon::{EmotionLexicon, Mood};
