/*!
 * Tests for the conversion rule table
 */

use sinsub::rule_table::{duplicate_rules, has_legacy_evidence, is_legacy_char, Rule, RULE_TABLE};

/// The table must build without tripping its construction-time checks
#[test]
fn test_ruleTable_withDefaultBuild_shouldContainRules() {
    assert!(!RULE_TABLE.is_empty());
}

/// Every pattern in the table must be non-empty
#[test]
fn test_ruleTable_withDefaultBuild_shouldHaveNoEmptyPatterns() {
    for rule in RULE_TABLE.iter() {
        assert!(!rule.find.is_empty(), "empty pattern for {:?}", rule.replace);
    }
}

/// Longer kombuva combinations must precede their sub-sequences
#[test]
fn test_ruleTable_withKombuvaRules_shouldOrderLongestFirst() {
    let position = |pattern: &str| -> usize {
        RULE_TABLE
            .iter()
            .position(|r| r.find == pattern)
            .unwrap_or_else(|| panic!("pattern {:?} missing from table", pattern))
    };

    // "flda" (ko with long o) must beat "fld" (ko) which must beat "fl" (ke)
    assert!(position("flda") < position("fld"));
    assert!(position("fld") < position("fl"));
    assert!(position("fla") < position("fl"));
    assert!(position("ffl") < position("fl"));

    // Any kombuva rule must beat the bare consonant and the stray kombuva
    assert!(position("fl") < position("l"));
    assert!(position("fl") < position("f"));
}

/// The shadowed duplicate source pattern must be reported by the audit
#[test]
fn test_duplicateRules_withDefaultTable_shouldReportShadowedRule() {
    let duplicates = duplicate_rules(&RULE_TABLE);

    assert_eq!(duplicates.len(), 1);
    let (earlier, later) = duplicates[0];
    assert!(earlier < later);
    assert_eq!(RULE_TABLE[earlier].find, "ø");
    assert_eq!(RULE_TABLE[later].find, "ø");
    assert_ne!(RULE_TABLE[earlier].replace, RULE_TABLE[later].replace);
}

/// The audit must not flag tables without repeated patterns
#[test]
fn test_duplicateRules_withDistinctPatterns_shouldReportNothing() {
    let rules = vec![
        Rule {
            find: "a".to_string(),
            replace: "x".to_string(),
        },
        Rule {
            find: "b".to_string(),
            replace: "y".to_string(),
        },
    ];

    assert!(duplicate_rules(&rules).is_empty());
}

/// Legacy range detection backs the extended-range evidence signal
#[test]
fn test_isLegacyChar_withVariousChars_shouldMatchRange() {
    assert!(is_legacy_char('ß'));
    assert!(is_legacy_char('»'));
    assert!(is_legacy_char('ñ'));
    assert!(!is_legacy_char('a'));
    assert!(!is_legacy_char('Z'));
    assert!(!is_legacy_char(' '));
    assert!(!is_legacy_char('ක'));
}

/// Extended-range glyphs flag a segment as legacy
#[test]
fn test_hasLegacyEvidence_withExtendedRangeGlyph_shouldDetect() {
    assert!(has_legacy_evidence("ß"));
    assert!(has_legacy_evidence("Y»S"));
    assert!(has_legacy_evidence("ñksid"));
}

/// Fully-ASCII legacy words are detected by the u-vowel sign code
#[test]
fn test_hasLegacyEvidence_withAsciiLegacyWord_shouldDetect() {
    assert!(has_legacy_evidence("wdhqfndajka"));
    assert!(has_legacy_evidence("q"));
    assert!(has_legacy_evidence("Tjqka"));
}

/// A lone base-letter code is a bare glyph, not a word
#[test]
fn test_hasLegacyEvidence_withLoneLetterCode_shouldDetect() {
    assert!(has_legacy_evidence("l"));
    assert!(has_legacy_evidence("w"));
}

/// English words pass even though their letters are chart codes
#[test]
fn test_hasLegacyEvidence_withEnglishText_shouldNotDetect() {
    assert!(!has_legacy_evidence("hello"));
    assert!(!has_legacy_evidence("world"));
    assert!(!has_legacy_evidence("quick"));
    assert!(!has_legacy_evidence("subtitle."));
    assert!(!has_legacy_evidence("a"));
    assert!(!has_legacy_evidence(""));
}
