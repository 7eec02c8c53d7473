//! Synthesis language selector passed through to the TTS collaborator.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target language for a render request.
///
/// `Auto` defers detection to the synthesis engine. The named variants are
/// the languages the reference engine advertises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Auto,
    Chinese,
    English,
    Japanese,
    Korean,
    German,
    French,
    Russian,
    Portuguese,
    Spanish,
    Italian,
}

impl Language {
    /// All languages the pipeline accepts, in presentation order.
    pub const ALL: [Language; 11] = [
        Language::Auto,
        Language::Chinese,
        Language::English,
        Language::Japanese,
        Language::Korean,
        Language::German,
        Language::French,
        Language::Russian,
        Language::Portuguese,
        Language::Spanish,
        Language::Italian,
    ];

    /// The string form handed to the synthesis collaborator.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Language::Auto => "Auto",
            Language::Chinese => "Chinese",
            Language::English => "English",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::German => "German",
            Language::French => "French",
            Language::Russian => "Russian",
            Language::Portuguese => "Portuguese",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = crate::RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::RenderError::InvalidInput(format!("unknown language: {s}")))
    }
}
