//! # Domain Models
//!
//! Pure types shared by every feature slice: configuration, the language/tier/skill
//! vocabulary of the exam boards, vocabulary items, `OpenAPI` tags and the slice registry.
//! Keep it lean: no I/O, networking, or scoring logic.

pub mod config;
pub mod constants;
pub mod language;
pub mod registry;
pub mod vocabulary;
