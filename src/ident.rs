use std::{collections::HashSet, sync::LazyLock};

/// Words spelled out in place of a digit that would otherwise start an identifier, or that stand
/// alone as a word segment.
const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Only add entries that are highly unlikely to be non-initialisms. For instance, "ID" is fine,
/// but "AND" is not.
const COMMON_INITIALISMS: [&str; 31] = [
    "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SSH", "TLS", "TTL", "UI", "UID",
    "UUID", "URI", "URL", "UTF8", "VM", "XML",
];

static COMMON: LazyLock<Initialisms> = LazyLock::new(|| Initialisms::new(COMMON_INITIALISMS));

/// A set of tokens that are rendered fully upper-case whenever they make up a whole word segment
/// of an identifier. Lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Initialisms(HashSet<String>);

impl Initialisms {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            words
                .into_iter()
                .map(|e| e.as_ref().to_uppercase())
                .collect(),
        )
    }

    /// The built-in set, shared process-wide and never mutated.
    #[must_use]
    pub fn common() -> &'static Self {
        &COMMON
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(&word.to_uppercase())
    }
}

/// Upper-cases the first character of `raw` and leaves the rest alone.
#[must_use]
pub fn capitalize_first(raw: &str) -> String {
    let mut chars = raw.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Characters that may appear inside an identifier. Everything else separates word segments.
///
/// Limited to ASCII so that case mapping never adds or removes characters.
const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn digit_word(c: char) -> Option<&'static str> {
    c.to_digit(10).map(|d| DIGIT_WORDS[d as usize])
}

/// Turns raw column and table names into pascal-cased identifiers, upper-casing known
/// initialisms.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierFormatter<'a> {
    initialisms: &'a Initialisms,
}

impl Default for IdentifierFormatter<'static> {
    fn default() -> Self {
        Self::new(Initialisms::common())
    }
}

impl<'a> IdentifierFormatter<'a> {
    #[must_use]
    pub const fn new(initialisms: &'a Initialisms) -> Self {
        Self { initialisms }
    }

    /// Formats `raw` into a single identifier token.
    ///
    /// `raw` is split on every character that is not an ASCII letter or digit. Segments
    /// consisting only of digits are spelled out digit by digit, and so is a leading digit of the
    /// first segment, so the result never starts with a digit. The result is empty if `raw`
    /// contains no word characters at all.
    #[must_use]
    pub fn format(&self, raw: &str) -> String {
        let mut segments = Vec::new();

        for segment in raw.split(|c| !is_word_char(c)).filter(|e| !e.is_empty()) {
            if segment.chars().all(|c| c.is_ascii_digit()) {
                segments.extend(segment.chars().filter_map(digit_word).map(str::to_owned));
                continue;
            }

            let mut chars = segment.chars();

            match chars.next().and_then(digit_word) {
                Some(word) if segments.is_empty() => {
                    segments.push(word.to_owned());
                    segments.push(chars.as_str().to_owned());
                }
                _ => segments.push(segment.to_owned()),
            }
        }

        let joined = segments
            .iter()
            .map(|e| self.format_segment(e))
            .collect::<String>();

        // Joining can spell an initialism across segments ("ht_tp"). Settle it here so that
        // formatting an already formatted identifier is a no-op.
        if self.initialisms.contains(&joined) {
            joined.to_uppercase()
        } else {
            joined
        }
    }

    fn format_segment(&self, segment: &str) -> String {
        if self.initialisms.contains(segment) {
            segment.to_uppercase()
        } else {
            capitalize_first(segment)
        }
    }
}
