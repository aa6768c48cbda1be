use std::collections::HashMap;

/// Formatting actions the transformer recognizes in the spoken-word stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    /// Flush the current line and emit a line break.
    NewLine,
    /// Flush and continue or enter a bulleted list.
    Bullet,
    /// Flush and continue or enter a numbered list.
    Number,
    /// Increase the indent level.
    Indent,
    /// Decrease the indent level, clamped at zero.
    Outdent,
}

/// Phrase table mapping spoken keywords to [`VoiceCommand`]s.
///
/// Matching is case-insensitive against whole words; phrases may span up to
/// two consecutive words (`"new line"`). The table is fixed at construction
/// but extensible through [`Vocabulary::with_phrase`].
#[derive(Debug, Clone)]
pub struct Vocabulary {
    phrases: HashMap<String, VoiceCommand>,
    max_phrase_words: usize,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let mut vocabulary = Self {
            phrases: HashMap::new(),
            max_phrase_words: 1,
        };

        vocabulary.insert("new line", VoiceCommand::NewLine);
        vocabulary.insert("bullet", VoiceCommand::Bullet);
        vocabulary.insert("dash", VoiceCommand::Bullet);
        vocabulary.insert("number", VoiceCommand::Number);
        vocabulary.insert("indent", VoiceCommand::Indent);
        vocabulary.insert("outdent", VoiceCommand::Outdent);

        vocabulary
    }
}

impl Vocabulary {
    /// Add or remap a phrase. Later insertions win.
    pub fn with_phrase(mut self, phrase: &str, command: VoiceCommand) -> Self {
        self.insert(phrase, command);
        self
    }

    /// Longest number of words any phrase spans.
    pub(crate) fn max_phrase_words(&self) -> usize {
        self.max_phrase_words
    }

    /// Look up a candidate phrase, already lowercased and space-joined.
    pub(crate) fn lookup(&self, phrase: &str) -> Option<VoiceCommand> {
        self.phrases.get(phrase).copied()
    }

    fn insert(&mut self, phrase: &str, command: VoiceCommand) {
        let normalized = phrase.trim().to_ascii_lowercase();
        let words = normalized.split_whitespace().count();
        self.max_phrase_words = self.max_phrase_words.max(words);
        self.phrases.insert(normalized, command);
    }
}
