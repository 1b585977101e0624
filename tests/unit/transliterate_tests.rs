/*!
 * Tests for the transliteration engine
 */

use sinsub::rule_table::Rule;
use sinsub::transliterate::{transliterate, Transliterator};

fn rule(find: &str, replace: &str) -> Rule {
    Rule {
        find: find.to_string(),
        replace: replace.to_string(),
    }
}

/// Table order decides the outcome when patterns overlap
#[test]
fn test_transliterate_withOverlappingRules_shouldApplyInTableOrder() {
    let longest_first = vec![rule("ab", "X"), rule("a", "Y")];
    let engine = Transliterator::new(&longest_first);
    assert_eq!(engine.transliterate("ab"), "X");

    let shortest_first = vec![rule("a", "Y"), rule("ab", "X")];
    let engine = Transliterator::new(&shortest_first);
    assert_eq!(engine.transliterate("ab"), "Yb");
}

/// Each rule replaces every non-overlapping occurrence in one pass
#[test]
fn test_transliterate_withRepeatedPattern_shouldReplaceAllOccurrences() {
    let rules = vec![rule("aa", "b")];
    let engine = Transliterator::new(&rules);
    assert_eq!(engine.transliterate("aaaa"), "bb");
    assert_eq!(engine.transliterate("aaaaa"), "bba");
}

/// Empty input maps to empty output
#[test]
fn test_transliterate_withEmptyInput_shouldReturnEmpty() {
    assert_eq!(transliterate(""), "");
}

/// Text matching no rule comes back unchanged
#[test]
fn test_transliterate_withNoMatchingRules_shouldReturnInputUnchanged() {
    let rules = vec![rule("x", "y")];
    let engine = Transliterator::new(&rules);
    assert_eq!(engine.transliterate("hello"), "hello");
}

/// A greeting in the legacy encoding converts to its Unicode form
#[test]
fn test_transliterate_withLegacyGreeting_shouldProduceSinhala() {
    assert_eq!(transliterate("wdhqfndajka"), "ආයුබෝවන්");
}

/// The medial ra form combines with the long vowel sign
#[test]
fn test_transliterate_withRakaransaya_shouldProduceJoinedForm() {
    assert_eq!(transliterate("Y»S"), "ශ්‍රී");
}

/// Composed single glyphs decode to consonant plus vowel sign
#[test]
fn test_transliterate_withComposedGlyphs_shouldDecodePairs() {
    assert_eq!(transliterate("ñksid"), "මිනිසා");
}

/// The pre-base vowel stroke is reordered after its consonant
#[test]
fn test_transliterate_withKombuva_shouldReorderAfterConsonant() {
    assert_eq!(transliterate("fla"), "කේ");
    assert_eq!(transliterate("fl"), "කෙ");
    assert_eq!(transliterate("fld"), "කො");
    assert_eq!(transliterate("flda"), "කෝ");
    assert_eq!(transliterate("ffl"), "කෛ");
}

/// Protected punctuation survives a pass over legacy text
#[test]
fn test_transliterate_withProtectedPunctuation_shouldKeepPunctuation() {
    assert_eq!(transliterate("ñ."), "මි.");
    assert_eq!(transliterate("ñ, ñ"), "මි, මි");
    assert_eq!(transliterate("(ñ)"), "(මි)");
    assert_eq!(transliterate("50%"), "50%");
}

/// Digits are not rule patterns and pass through
#[test]
fn test_transliterate_withDigits_shouldKeepDigits() {
    assert_eq!(transliterate("123"), "123");
}
