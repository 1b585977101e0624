/*!
 * Rewrite-rule table for the legacy Sinhala font encoding.
 *
 * The legacy "visual" fonts place Sinhala glyph components on Latin-range
 * code points in glyph order: the kombuva (vowel stroke written before a
 * consonant) precedes the consonant byte, combined consonant-plus-vowel
 * glyphs occupy single high-range code points, and so on. Converting to
 * Unicode therefore needs an ordered cascade of context-sensitive string
 * rewrites, applied longest-pattern-first so that a ligature rule always
 * wins over the rules for its sub-sequences.
 *
 * The table is built once at startup and never mutated. Its shape is:
 *
 * 1. protect phase: ASCII punctuation that the cascade must not touch is
 *    parked on private-use sentinels,
 * 2. composed-glyph and ligature rules, longest/most specific first,
 * 3. generated kombuva (pre-base vowel) reordering rules for every
 *    consonant and medial combination,
 * 4. single vowel-sign and base-letter mappings,
 * 5. restore phase: sentinels back to the same punctuation.
 */

use once_cell::sync::Lazy;

/// Yansaya: hal + zero-width joiner + ya, the medial -ya form.
const YANSAYA: &str = "\u{0DCA}\u{200D}\u{0DBA}";

/// Rakaransaya: hal + zero-width joiner + ra, the medial -ra form.
const RAKARANSAYA: &str = "\u{0DCA}\u{200D}\u{0DBB}";

/// One rewrite rule: replace every occurrence of `find` with `replace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Exact substring to match in the legacy encoding.
    pub find: String,
    /// Unicode (or sentinel) text it becomes.
    pub replace: String,
}

impl Rule {
    fn new(find: &str, replace: &str) -> Self {
        Rule {
            find: find.to_string(),
            replace: replace.to_string(),
        }
    }
}

/// Punctuation parked on private-use sentinels while the cascade runs.
///
/// These characters are legitimate output punctuation; without the detour a
/// later rule could reinterpret them as glyph components. The same pairs
/// are applied in reverse after the last real rule, so on text that never
/// matches a real rule the round trip is a net no-op.
const PROTECTED_PUNCTUATION: [(char, char); 7] = [
    (',', '\u{E000}'),
    ('.', '\u{E001}'),
    ('(', '\u{E002}'),
    (')', '\u{E003}'),
    ('%', '\u{E004}'),
    ('/', '\u{E005}'),
    (':', '\u{E006}'),
];

/// Base consonant code chart: legacy code point to Unicode letter.
///
/// Follows the Wijesekara typewriter layout the legacy fonts inherit;
/// shifted keys carry the aspirated/retroflex partner of the unshifted
/// letter. Codes that would collide with protected punctuation sit on
/// upper-range glyphs instead.
const CONSONANTS: [(char, char); 39] = [
    ('l', 'ක'),
    ('L', 'ඛ'),
    ('·', 'ග'),
    ('>', 'ඝ'),
    ('Õ', 'ඟ'),
    ('p', 'ච'),
    ('P', 'ඡ'),
    ('c', 'ජ'),
    ('C', 'ඣ'),
    ('{', 'ඤ'),
    ('[', 'ඥ'),
    ('g', 'ට'),
    ('G', 'ඨ'),
    ('v', 'ඩ'),
    ('V', 'ඪ'),
    ('K', 'ණ'),
    ('~', 'ඬ'),
    (';', 'ත'),
    ('²', 'ථ'),
    ('o', 'ද'),
    ('O', 'ධ'),
    ('k', 'න'),
    ('|', 'ඳ'),
    ('m', 'ප'),
    ('M', 'ඵ'),
    ('n', 'බ'),
    ('N', 'භ'),
    ('u', 'ම'),
    ('U', 'ඹ'),
    ('h', 'ය'),
    ('r', 'ර'),
    ('¦', 'ල'),
    ('j', 'ව'),
    ('Y', 'ශ'),
    ('I', 'ෂ'),
    ('i', 'ස'),
    ('y', 'හ'),
    ('<', 'ළ'),
    ('*', 'ෆ'),
];

/// Single-glyph composites: one legacy code point that already carries a
/// consonant plus a vowel sign (or hal). These never take part in the
/// kombuva reordering and must be rewritten before the base letters.
const COMPOSED_GLYPHS: [(&str, &str); 23] = [
    ("ß", "රි"),
    ("Í", "රී"),
    ("ú", "වි"),
    ("ù", "වී"),
    ("ñ", "මි"),
    ("ó", "මී"),
    ("á", "ටි"),
    ("à", "ටී"),
    ("ä", "ඩි"),
    ("â", "ඩී"),
    ("ì", "බි"),
    ("î", "බී"),
    ("È", "දි"),
    ("Ê", "දී"),
    ("ð", "ජි"),
    ("Ð", "ජී"),
    ("É", "චි"),
    ("Ü", "චී"),
    ("õ", "ව්"),
    ("ï", "ම්"),
    ("¿", "ළු"),
    ("¨", "ලු"),
    ("Æ", "ලූ"),
];

/// Single vowel signs and marks, applied after every multi-character rule.
/// The stray-kombuva fallback ("f" alone) comes last so it only fires when
/// no reordering rule consumed the stroke.
const SINGLE_SIGNS: [(char, char); 13] = [
    ('E', 'ෑ'),
    ('e', 'ැ'),
    ('S', 'ී'),
    ('s', 'ි'),
    ('q', 'ු'),
    ('Q', 'ූ'),
    ('D', 'ෘ'),
    ('Ø', 'ෲ'),
    ('d', 'ා'),
    ('x', 'ං'),
    ('X', 'ඃ'),
    ('a', '්'),
    ('f', 'ෙ'),
];

/// Independent vowels on their base codes.
const INDEPENDENT_VOWELS: [(char, char); 6] = [
    ('w', 'අ'),
    ('W', 'උ'),
    ('b', 'ඉ'),
    ('B', 'ඊ'),
    ('t', 'එ'),
    ('T', 'ඔ'),
];

/// The full conversion table, in application order.
pub static RULE_TABLE: Lazy<Vec<Rule>> = Lazy::new(build_rule_table);

fn build_rule_table() -> Vec<Rule> {
    let mut rules = Vec::with_capacity(900);

    // Phase 1: park output punctuation on sentinels.
    for (plain, sentinel) in PROTECTED_PUNCTUATION {
        rules.push(Rule::new(&plain.to_string(), &sentinel.to_string()));
    }

    // Composed glyphs. The kombuva-carrying hal composites ("fõ" is ve with
    // the long-e stroke split across two glyphs) must beat the plain
    // composite rules for the same code points.
    rules.push(Rule::new("fõ", "වේ"));
    rules.push(Rule::new("fï", "මේ"));
    for (find, replace) in COMPOSED_GLYPHS {
        rules.push(Rule::new(find, replace));
    }
    // This code point appears twice in the source font chart with different
    // targets; the first assignment consumes every occurrence, so the
    // second is shadowed. Both are kept until a real sample file decides
    // which is right (see duplicate_rules()).
    rules.push(Rule::new("ø", "ළූ"));
    rules.push(Rule::new("ø", "ෆ"));

    // Kombuva reordering: the vowel stroke is written before the consonant
    // in glyph order but follows it in Unicode. Generated per consonant and
    // medial so that every longer combination precedes its sub-sequences.
    push_kombuva_rules(&mut rules);

    // Independent vowel combinations before their base letters.
    rules.push(Rule::new("wE", "ඈ"));
    rules.push(Rule::new("we", "ඇ"));
    rules.push(Rule::new("wd", "ආ"));
    rules.push(Rule::new("W!", "ඌ"));
    rules.push(Rule::new("T!", "ඖ"));
    rules.push(Rule::new("´", "ඕ"));
    rules.push(Rule::new("ft", "ඓ"));
    rules.push(Rule::new("ta", "ඒ"));

    // Medial forms and the repaya (post-written r + hal).
    rules.push(Rule::new("»", RAKARANSAYA));
    rules.push(Rule::new("H", YANSAYA));
    rules.push(Rule::new("¾", "ර්"));

    // Single-character base mappings, last among the real rules.
    for (find, replace) in SINGLE_SIGNS {
        rules.push(Rule::new(&find.to_string(), &replace.to_string()));
    }
    for (find, replace) in CONSONANTS {
        rules.push(Rule::new(&find.to_string(), &replace.to_string()));
    }
    for (find, replace) in INDEPENDENT_VOWELS {
        rules.push(Rule::new(&find.to_string(), &replace.to_string()));
    }

    // Phase 5: restore parked punctuation.
    for (plain, sentinel) in PROTECTED_PUNCTUATION {
        rules.push(Rule::new(&sentinel.to_string(), &plain.to_string()));
    }

    assert_table_invariants(&rules);
    rules
}

/// Emit the kombuva reordering rules for one consonant at a time.
///
/// For a consonant C with optional medial M, glyph order is
/// `f C M [da|!|d|a]` while Unicode wants the vowel sign after `C M`. The
/// endings are ordered so that `da` (long o) wins over `d` (short o) and
/// `a` (long e), and the double-kombuva `ffCM` (ai) wins over `fCM` (e).
fn push_kombuva_rules(rules: &mut Vec<Rule>) {
    let medials: [(&str, &str); 3] = [("»", RAKARANSAYA), ("H", YANSAYA), ("", "")];

    for (code, letter) in CONSONANTS {
        for (medial_code, medial) in medials {
            let stem_find = format!("{code}{medial_code}");
            let stem = format!("{letter}{medial}");

            rules.push(Rule::new(&format!("f{stem_find}da"), &format!("{stem}ෝ")));
            rules.push(Rule::new(&format!("f{stem_find}!"), &format!("{stem}ෞ")));
            rules.push(Rule::new(&format!("f{stem_find}d"), &format!("{stem}ො")));
            rules.push(Rule::new(&format!("f{stem_find}a"), &format!("{stem}ේ")));
            rules.push(Rule::new(&format!("ff{stem_find}"), &format!("{stem}ෛ")));
            rules.push(Rule::new(&format!("f{stem_find}"), &format!("{stem}ෙ")));
        }
    }
}

/// Construction-time checks on the finished table.
///
/// Sentinels may only appear in the protect/restore rules, no pattern may
/// be empty, and no real rule may consume protected punctuation.
fn assert_table_invariants(rules: &[Rule]) {
    let sentinel_count = PROTECTED_PUNCTUATION.len();
    let real = &rules[sentinel_count..rules.len() - sentinel_count];

    for rule in rules {
        assert!(!rule.find.is_empty(), "empty pattern in rule table");
    }

    for rule in real {
        for (plain, sentinel) in PROTECTED_PUNCTUATION {
            assert!(
                !rule.find.contains(sentinel) && !rule.replace.contains(sentinel),
                "sentinel {:?} leaked into rule {:?}",
                sentinel,
                rule.find
            );
            assert!(
                !rule.find.contains(plain),
                "rule {:?} consumes protected punctuation {:?}",
                rule.find,
                plain
            );
        }
    }
}

/// Whether a character sits in the code-point range the legacy fonts occupy
/// beyond plain ASCII.
pub fn is_legacy_char(c: char) -> bool {
    ('\u{0080}'..='\u{024F}').contains(&c)
}

fn is_letter_code(c: char) -> bool {
    CONSONANTS.iter().any(|&(code, _)| code == c)
        || INDEPENDENT_VOWELS.iter().any(|&(code, _)| code == c)
}

/// Whether a whitespace-delimited segment carries evidence of being
/// glyph-order legacy text rather than plain English.
///
/// Most legacy code points are ordinary ASCII letters, so the extended range
/// alone cannot find fully-ASCII legacy words. Evidence, in order of cost:
///
/// 1. any character in the extended legacy range (composed glyphs, medials),
/// 2. the segment is a single base-letter code, which is a bare glyph and
///    never an English word,
/// 3. a `q`/`Q` not followed by `u`: these codes carry the u-vowel sign and
///    only occur after a consonant in legacy text, while English q is
///    virtually always `qu`.
///
/// English words therefore pass through even though their letters are chart
/// codes. Legacy words lacking all three signals are missed; the `full`
/// conversion mode exists for files known to be entirely legacy-encoded.
pub fn has_legacy_evidence(segment: &str) -> bool {
    if segment.chars().any(is_legacy_char) {
        return true;
    }

    let mut chars = segment.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        if is_letter_code(only) {
            return true;
        }
    }

    let mut iter = segment.chars().peekable();
    while let Some(c) = iter.next() {
        if (c == 'q' || c == 'Q') && iter.peek() != Some(&'u') {
            return true;
        }
    }

    false
}

/// Rule indices whose pattern already appeared earlier in the table.
///
/// By the time such a rule runs its pattern can no longer occur in the
/// string, so only the first assignment has an observable effect. Reported
/// rather than dropped so the chart can be checked against real sample
/// files.
pub fn duplicate_rules(rules: &[Rule]) -> Vec<(usize, usize)> {
    let mut duplicates = Vec::new();
    for (later, rule) in rules.iter().enumerate() {
        if let Some(earlier) = rules[..later].iter().position(|r| r.find == rule.find) {
            duplicates.push((earlier, later));
        }
    }
    duplicates
}
