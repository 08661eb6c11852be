//! Lingua Practice - AI dialogue practice for language learners
//!
//! Generates short practice dialogues in a target language with a hosted
//! generative model, stores them for signed-in users, and tracks practice
//! statistics.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
