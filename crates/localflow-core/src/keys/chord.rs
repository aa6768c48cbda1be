//! Parsing of configured chord strings like `"ctrl+shift+space"`.

use crate::{
    CoreError, CoreResult,
    keys::{KeyIdentity, ModifierKey, codes},
};

use std::{collections::BTreeSet, panic::Location};

use error_location::ErrorLocation;

/// Parse a chord string into its required modifiers and trigger key.
///
/// Tokens are separated by `+` and matched case-insensitively. A chord must
/// name exactly one non-modifier trigger; modifiers may appear in any order.
///
/// # Errors
///
/// Returns [`CoreError::InvalidChord`] for empty chords, unknown tokens,
/// missing triggers, or multiple triggers.
#[track_caller]
pub fn parse_chord(chord: &str) -> CoreResult<(BTreeSet<KeyIdentity>, KeyIdentity)> {
    let mut modifiers = BTreeSet::new();
    let mut trigger: Option<KeyIdentity> = None;

    let tokens: Vec<&str> = chord
        .split('+')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(invalid(chord, "chord is empty"));
    }

    for token in tokens {
        let lower = token.to_ascii_lowercase();
        if let Some(modifier) = parse_modifier(&lower) {
            modifiers.insert(KeyIdentity::Modifier(modifier));
            continue;
        }

        let key = parse_trigger(&lower).ok_or_else(|| {
            invalid(chord, &format!("unknown key token {:?}", token))
        })?;

        if trigger.replace(key).is_some() {
            return Err(invalid(chord, "chord names more than one trigger key"));
        }
    }

    let trigger = trigger.ok_or_else(|| invalid(chord, "chord has no trigger key"))?;

    Ok((modifiers, trigger))
}

fn parse_modifier(token: &str) -> Option<ModifierKey> {
    match token {
        "alt" | "option" | "opt" => Some(ModifierKey::Alt),
        "ctrl" | "control" => Some(ModifierKey::Ctrl),
        "shift" => Some(ModifierKey::Shift),
        "cmd" | "meta" | "super" | "win" => Some(ModifierKey::Meta),
        _ => None,
    }
}

fn parse_trigger(token: &str) -> Option<KeyIdentity> {
    // Single printable characters use their ASCII uppercase value,
    // matching `keys::normalize`.
    if token.len() == 1 {
        let c = token.as_bytes()[0];
        if c.is_ascii_alphanumeric() || c.is_ascii_punctuation() {
            return Some(KeyIdentity::Code(c.to_ascii_uppercase() as u32));
        }
    }

    match token {
        "space" => Some(KeyIdentity::Code(codes::SPACE)),
        "enter" | "return" => Some(KeyIdentity::Code(codes::ENTER)),
        "tab" => Some(KeyIdentity::Code(codes::TAB)),
        "escape" | "esc" => Some(KeyIdentity::Code(codes::ESCAPE)),
        "backspace" => Some(KeyIdentity::Code(codes::BACKSPACE)),
        _ => {
            // f1..f12
            let n: u32 = token.strip_prefix('f')?.parse().ok()?;
            if (1..=12).contains(&n) {
                Some(KeyIdentity::Code(codes::F1 + n - 1))
            } else {
                None
            }
        }
    }
}

#[track_caller]
fn invalid(chord: &str, reason: &str) -> CoreError {
    CoreError::InvalidChord {
        chord: chord.to_string(),
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
