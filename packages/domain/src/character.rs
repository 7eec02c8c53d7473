//! Character identity table supplied alongside a screenplay script.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::RenderError;

/// One character's voice settings.
///
/// The table accepts either a plain description string or a record carrying
/// at least a `voice` field; extra record fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharacterVoice {
    /// `"Elena": "British woman, cold, high-status voice"`
    Plain(String),
    /// `"Elena": { "voice": "British woman, ..." }`
    Profile {
        #[serde(default)]
        voice: Option<String>,
    },
}

/// Read-only speaker-name → voice-description table for one render request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterTable(HashMap<String, CharacterVoice>);

impl CharacterTable {
    /// Parse the table from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json)
            .map_err(|e| RenderError::InvalidInput(format!("invalid character table: {e}")))
    }

    /// Resolve a speaker's base voice description.
    ///
    /// Unknown speakers, and profile records without a `voice` field, get a
    /// synthesized placeholder so compilation never fails on a cast gap.
    pub fn base_voice(&self, speaker: &str) -> String {
        match self.0.get(speaker) {
            Some(CharacterVoice::Plain(desc)) => desc.clone(),
            Some(CharacterVoice::Profile { voice: Some(v) }) => v.clone(),
            Some(CharacterVoice::Profile { voice: None }) | None => {
                format!("A voice for {speaker}")
            }
        }
    }

    /// Insert or replace one character entry.
    pub fn insert(&mut self, name: impl Into<String>, voice: CharacterVoice) {
        self.0.insert(name.into(), voice);
    }

    /// Number of cast entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no characters are defined.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
