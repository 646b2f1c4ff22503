//! Removal of emoji and decorative symbols.
//!
//! Prose goes through [`Mode::Strict`], which also normalizes whitespace. Code and
//! ASCII-art go through [`Mode::DiagramSafe`], which leaves whitespace alone and turns
//! emoji-style arrows into the plain arrows diagrams are drawn with.

/// Sanitization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Strict,
    DiagramSafe,
}

enum CharClass {
    Range(char, char),
    Glyphs(&'static str),
}

impl CharClass {
    fn contains(&self, c: char) -> bool {
        match self {
            CharClass::Range(lo, hi) => (*lo..=*hi).contains(&c),
            CharClass::Glyphs(set) => set.contains(c),
        }
    }
}

enum Action {
    Delete,
    /// Deleted in strict mode; in diagram-safe mode replaced by the plain arrow, or
    /// deleted when there is none.
    Arrow(Option<char>),
}

/// Rules are checked in order and the first match wins. Characters matching no rule are kept.
const RULES: &[(CharClass, Action)] = &[
    (CharClass::Glyphs("⬆"), Action::Arrow(Some('↑'))),
    (CharClass::Glyphs("⬇"), Action::Arrow(Some('↓'))),
    (CharClass::Glyphs("➡"), Action::Arrow(Some('→'))),
    (CharClass::Glyphs("⬅"), Action::Arrow(Some('←'))),
    (CharClass::Glyphs("↔↕"), Action::Arrow(None)),
    (
        CharClass::Glyphs(
            "⚠✅❌⭐🎯📊📝📌🔄💡🚀🎓📂📄🔍💾🖥⚡🔧📈📉🌐💻🔒🔓🔴🟢🟡🔵⚪⚫🟤🟠🟣\
             ✓✗★☆●○◆◇▶◀▲▼△▽□■◻◼☑☐🔹🔸▪▫",
        ),
        Action::Delete,
    ),
    // variation selectors
    (CharClass::Range('\u{FE0E}', '\u{FE0F}'), Action::Delete),
    // pictographs, supplemental symbols
    (CharClass::Range('\u{1F300}', '\u{1F9FF}'), Action::Delete),
    // emoticons
    (CharClass::Range('\u{1F600}', '\u{1F64F}'), Action::Delete),
    // transport and map
    (CharClass::Range('\u{1F680}', '\u{1F6FF}'), Action::Delete),
    // regional indicators (flags)
    (CharClass::Range('\u{1F1E0}', '\u{1F1FF}'), Action::Delete),
    // miscellaneous symbols, dingbats
    (CharClass::Range('\u{2600}', '\u{26FF}'), Action::Delete),
    (CharClass::Range('\u{2700}', '\u{27BF}'), Action::Delete),
];

fn action_for(c: char) -> Option<&'static Action> {
    RULES
        .iter()
        .find(|(class, _)| class.contains(c))
        .map(|(_, action)| action)
}

fn transform(c: char, mode: Mode) -> Option<char> {
    match (action_for(c), mode) {
        (None, _) => Some(c),
        (Some(Action::Delete), _) => None,
        (Some(Action::Arrow(_)), Mode::Strict) => None,
        (Some(Action::Arrow(plain)), Mode::DiagramSafe) => *plain,
    }
}

/// Strip decorative characters from `text` according to `mode`.
pub fn remove_decorative(text: &str, mode: Mode) -> String {
    let kept: String = text.chars().filter_map(|c| transform(c, mode)).collect();
    match mode {
        Mode::Strict => kept.split_whitespace().collect::<Vec<_>>().join(" "),
        Mode::DiagramSafe => kept,
    }
}

/// Shorthand for [`Mode::Strict`].
pub fn strict(text: &str) -> String {
    remove_decorative(text, Mode::Strict)
}

/// Shorthand for [`Mode::DiagramSafe`].
pub fn diagram_safe(text: &str) -> String {
    remove_decorative(text, Mode::DiagramSafe)
}
