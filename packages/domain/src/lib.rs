//! # Voicestage Domain
//!
//! Shared domain objects and types for the voicestage pipeline.
//!
//! This crate contains the core types that flow between the script
//! compiler, the synthesis orchestrator, and any front end driving the
//! render-event stream, enabling clean separation of concerns.

pub mod character;
pub mod directive;
pub mod error;
pub mod event;
pub mod language;
pub mod segment;

// Re-export core types
pub use character::{CharacterTable, CharacterVoice};
pub use directive::DirectiveMap;
pub use error::RenderError;
pub use event::{AudioClip, RenderEvent};
pub use language::Language;
pub use segment::Segment;
