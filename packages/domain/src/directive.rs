//! Ambient delivery directives for the tag-stream dialect.

/// Insertion-ordered key → value map of delivery directives.
///
/// The tag-stream dialect mutates one ambient map as tags arrive; each
/// flushed segment receives a snapshot (a plain clone) so later mutation
/// never aliases into an already-emitted segment. Keys are stored
/// lower-cased. A `Vec` of pairs rather than a hash map: rendering order
/// must be the stable insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveMap {
    entries: Vec<(String, String)>,
}

impl DirectiveMap {
    /// Directive key that names the current emotion.
    pub const MOOD: &'static str = "mood";

    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite a directive. The key is lower-cased; overwriting
    /// keeps the key's original insertion position.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let key = key.trim().to_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a directive by (lower-cased) key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Current mood, or the neutral default.
    pub fn mood(&self) -> &str {
        self.get(Self::MOOD).unwrap_or(crate::Segment::NEUTRAL)
    }

    /// Non-mood directives in insertion order.
    pub fn tones(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(k, _)| k != Self::MOOD)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_insertion_order() {
        let mut map = DirectiveMap::new();
        map.set("Pace", "slow");
        map.set("mood", "Excited");
        map.set("pace", "fast");
        let tones: Vec<_> = map.tones().collect();
        assert_eq!(tones, vec![("pace", "fast")]);
        assert_eq!(map.mood(), "Excited");
    }

    #[test]
    fn mood_defaults_to_neutral() {
        assert_eq!(DirectiveMap::new().mood(), "Neutral");
    }
}
