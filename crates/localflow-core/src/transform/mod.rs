//! Spoken formatting commands to structured text.
//!
//! A transcript arrives as a flat word stream. In format mode the words
//! carry inline commands ("bullet", "indent", "new line") that describe the
//! structure the speaker wants. [`CommandTransformer::transform`] replays the
//! stream through a small formatting state and renders indented, listed
//! text.
//!
//! The transform is pure and total: unknown words are literal text, and no
//! input can make it fail. It is not idempotent over its own output —
//! keywords are matched against spoken words only, so re-feeding rendered
//! text is out of contract.

mod vocabulary;

pub use vocabulary::{VoiceCommand, Vocabulary};

/// Active list scheme within a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListMode {
    None,
    Bullet,
    Numbered,
}

/// Formatting state scoped to a single `transform` call.
struct FormattingState {
    indent_level: usize,
    list_mode: ListMode,
    list_counter: usize,
    /// Indent level to restore when the current list block ends.
    base_indent: usize,
    current_line: Vec<String>,
    output_lines: Vec<String>,
    last_was_list_item: bool,
}

impl FormattingState {
    fn new() -> Self {
        Self {
            indent_level: 0,
            list_mode: ListMode::None,
            list_counter: 1,
            base_indent: 0,
            current_line: Vec::new(),
            output_lines: Vec::new(),
            last_was_list_item: false,
        }
    }

    /// Render and append the pending line, if any.
    fn flush(&mut self) {
        if self.current_line.is_empty() {
            return;
        }

        let text = capitalize_first(&self.current_line.join(" "));
        let indent = "  ".repeat(self.indent_level);

        let line = match self.list_mode {
            ListMode::None => {
                // A blank line separates a list block from following prose.
                if self.last_was_list_item {
                    self.output_lines.push(String::new());
                }
                text
            }
            ListMode::Bullet => format!("{indent}- {text}"),
            ListMode::Numbered => {
                let n = self.list_counter;
                self.list_counter += 1;
                format!("{indent}{n}. {text}")
            }
        };

        self.output_lines.push(line);
        self.last_was_list_item = self.list_mode != ListMode::None;
        self.current_line.clear();
    }

    /// `bullet` / `number`: flush the pending line as an item of the list
    /// being continued or entered.
    ///
    /// Entering a list from prose promotes the pending line to the parent
    /// item at the current level and nests the items that follow one level
    /// deeper; a scheme switch at an unchanged level starts a fresh counter
    /// immediately.
    fn enter_list(&mut self, target: ListMode) {
        let entering = self.list_mode != target;
        let from_prose = self.list_mode == ListMode::None;

        if entering {
            if from_prose {
                self.base_indent = self.indent_level;
            }
            self.list_mode = target;
            self.list_counter = 1;
        }

        let had_pending = !self.current_line.is_empty();
        self.flush();

        if entering && from_prose && had_pending {
            self.indent_level += 1;
            self.list_counter = 1;
        }
    }

    /// `new line`: flush, then leave any active list; outside a list an
    /// empty pending line becomes a paragraph break.
    fn new_line(&mut self) {
        let had_pending = !self.current_line.is_empty();
        self.flush();

        if self.list_mode != ListMode::None {
            self.list_mode = ListMode::None;
            self.indent_level = self.base_indent;
        } else if !had_pending {
            self.output_lines.push(String::new());
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        self.output_lines.join("\n")
    }
}

/// Deterministic transformer from a spoken-word stream to structured text.
#[derive(Debug, Clone, Default)]
pub struct CommandTransformer {
    vocabulary: Vocabulary,
}

impl CommandTransformer {
    /// Transformer with a custom phrase table.
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Convert a transcript word stream into rendered text.
    ///
    /// Total over all inputs; an empty stream renders as an empty string.
    pub fn transform<S: AsRef<str>>(&self, words: &[S]) -> String {
        let mut state = FormattingState::new();
        let mut i = 0;

        while i < words.len() {
            if let Some((command, consumed)) = self.match_command(words, i) {
                match command {
                    VoiceCommand::NewLine => state.new_line(),
                    VoiceCommand::Bullet => state.enter_list(ListMode::Bullet),
                    VoiceCommand::Number => state.enter_list(ListMode::Numbered),
                    VoiceCommand::Indent => state.indent_level += 1,
                    VoiceCommand::Outdent => {
                        state.indent_level = state.indent_level.saturating_sub(1);
                    }
                }
                i += consumed;
            } else {
                state.current_line.push(words[i].as_ref().to_string());
                i += 1;
            }
        }

        state.finish()
    }

    /// Longest-match lookup of a command phrase starting at `at`.
    fn match_command<S: AsRef<str>>(&self, words: &[S], at: usize) -> Option<(VoiceCommand, usize)> {
        let max = self.vocabulary.max_phrase_words().min(words.len() - at);
        for len in (1..=max).rev() {
            let phrase = words[at..at + len]
                .iter()
                .map(|w| w.as_ref().to_ascii_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            if let Some(command) = self.vocabulary.lookup(&phrase) {
                return Some((command, len));
            }
        }
        None
    }
}

/// Transform with the default vocabulary.
pub fn transform<S: AsRef<str>>(words: &[S]) -> String {
    CommandTransformer::default().transform(words)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
