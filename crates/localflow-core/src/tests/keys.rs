use crate::keys::{KeyDirection, KeyEvent, KeyIdentity, ModifierKey, codes, parse_chord};

use rdev::{EventType, Key};

use std::collections::BTreeSet;

/// WHAT: Press and release of the same physical key normalize to equal identities
/// WHY: Release tracking compares identities by value; if the two halves of a
/// keystroke ever produced unequal identities, held keys would leak forever
#[test]
fn given_same_physical_key_when_pressed_and_released_then_identities_equal() {
    // Given: Independently constructed press and release events for Z
    let press = KeyEvent::from_native(&EventType::KeyPress(Key::KeyZ)).unwrap();
    let release = KeyEvent::from_native(&EventType::KeyRelease(Key::KeyZ)).unwrap();

    // Then: Identities compare equal even though the events are distinct values
    assert_eq!(press.identity, release.identity);
    assert_eq!(press.direction, KeyDirection::Press);
    assert_eq!(release.direction, KeyDirection::Release);
}

/// WHAT: Platform-specific keys with a raw code normalize to equal identities
/// WHY: Unknown keys must still support press/release pairing so a chord bound
/// to them behaves like any other key
#[test]
fn given_unknown_key_with_raw_code_when_normalized_then_identity_stable() {
    // Given: An unmapped platform key observed on press and on release
    let press = KeyEvent::from_native(&EventType::KeyPress(Key::Unknown(191))).unwrap();
    let release = KeyEvent::from_native(&EventType::KeyRelease(Key::Unknown(191))).unwrap();

    // Then: Both map to the same code-based identity
    assert_eq!(press.identity, KeyIdentity::Code(191));
    assert_eq!(press.identity, release.identity);
}

/// WHAT: Left and right variants of a modifier collapse to one identity
/// WHY: A chord bound to "ctrl" must match whichever side the user holds
#[test]
fn given_left_and_right_modifier_when_normalized_then_same_identity() {
    let left = KeyEvent::from_native(&EventType::KeyPress(Key::ControlLeft)).unwrap();
    let right = KeyEvent::from_native(&EventType::KeyPress(Key::ControlRight)).unwrap();

    assert_eq!(left.identity, KeyIdentity::Modifier(ModifierKey::Ctrl));
    assert_eq!(left.identity, right.identity);

    let alt = KeyEvent::from_native(&EventType::KeyPress(Key::Alt)).unwrap();
    let alt_gr = KeyEvent::from_native(&EventType::KeyPress(Key::AltGr)).unwrap();
    assert_eq!(alt.identity, alt_gr.identity);

    let shift_l = KeyEvent::from_native(&EventType::KeyPress(Key::ShiftLeft)).unwrap();
    let shift_r = KeyEvent::from_native(&EventType::KeyPress(Key::ShiftRight)).unwrap();
    assert_eq!(shift_l.identity, shift_r.identity);

    let meta_l = KeyEvent::from_native(&EventType::KeyPress(Key::MetaLeft)).unwrap();
    let meta_r = KeyEvent::from_native(&EventType::KeyPress(Key::MetaRight)).unwrap();
    assert_eq!(meta_l.identity, meta_r.identity);
}

/// WHAT: Keys without a stable mapping normalize to the sentinel identity
/// WHY: The sentinel never matches any binding, so stray keys cannot trigger
/// or end a recording
#[test]
fn given_unmapped_key_when_normalized_then_unrecognized() {
    let event = KeyEvent::from_native(&EventType::KeyPress(Key::NumLock)).unwrap();
    assert_eq!(event.identity, KeyIdentity::Unrecognized);
}

/// WHAT: Non-keyboard events produce no key event
/// WHY: Mouse traffic flows through the same hook and must be ignored
#[test]
fn given_mouse_event_when_converting_then_none() {
    let event = KeyEvent::from_native(&EventType::MouseMove { x: 1.0, y: 2.0 });
    assert!(event.is_none());
}

/// WHAT: Named keys map to their documented codes
/// WHY: Chord strings like "ctrl+space" must resolve to the same identity the
/// hook produces at runtime
#[test]
fn given_named_keys_when_normalized_then_expected_codes() {
    let space = KeyEvent::from_native(&EventType::KeyPress(Key::Space)).unwrap();
    assert_eq!(space.identity, KeyIdentity::Code(codes::SPACE));

    let enter = KeyEvent::from_native(&EventType::KeyPress(Key::Return)).unwrap();
    assert_eq!(enter.identity, KeyIdentity::Code(codes::ENTER));

    let f1 = KeyEvent::from_native(&EventType::KeyPress(Key::F1)).unwrap();
    assert_eq!(f1.identity, KeyIdentity::Code(codes::F1));
}

/// WHAT: A simple modifier+letter chord parses into modifiers and a trigger
/// WHY: This is the configuration format every binding flows through
#[test]
fn given_alt_z_chord_when_parsed_then_modifier_set_and_trigger() {
    // When: Parsing "alt+z"
    let (modifiers, trigger) = parse_chord("alt+z").unwrap();

    // Then: One required modifier and an uppercase letter code trigger
    let expected: BTreeSet<KeyIdentity> =
        [KeyIdentity::Modifier(ModifierKey::Alt)].into_iter().collect();
    assert_eq!(modifiers, expected);
    assert_eq!(trigger, KeyIdentity::Code(u32::from('Z')));
}

/// WHAT: Chord parsing is case-insensitive and accepts modifier aliases
/// WHY: Users write chords by hand in the config file
#[test]
fn given_mixed_case_aliases_when_parsed_then_canonical_identities() {
    let (modifiers, trigger) = parse_chord("Cmd+CONTROL+Space").unwrap();

    let expected: BTreeSet<KeyIdentity> = [
        KeyIdentity::Modifier(ModifierKey::Meta),
        KeyIdentity::Modifier(ModifierKey::Ctrl),
    ]
    .into_iter()
    .collect();
    assert_eq!(modifiers, expected);
    assert_eq!(trigger, KeyIdentity::Code(codes::SPACE));
}

/// WHAT: Malformed chords are rejected with InvalidChord
/// WHY: A binding that silently parses wrong would never fire and be very
/// hard to debug from user reports
#[test]
fn given_malformed_chords_when_parsed_then_invalid_chord_error() {
    // No trigger key at all
    assert!(parse_chord("alt+ctrl").is_err());
    // Two triggers
    assert!(parse_chord("alt+z+x").is_err());
    // Unknown token
    assert!(parse_chord("alt+frobnicate").is_err());
    // Empty string
    assert!(parse_chord("").is_err());
    // Modifier with no trigger after the separator
    assert!(parse_chord("shift+").is_err());
}

/// WHAT: Function keys parse by name
/// WHY: F-keys are common push-to-talk triggers
#[test]
fn given_function_key_chord_when_parsed_then_function_code() {
    let (modifiers, trigger) = parse_chord("f5").unwrap();
    assert!(modifiers.is_empty());
    assert_eq!(trigger, KeyIdentity::Code(codes::F1 + 4));
}
