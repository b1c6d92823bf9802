//! Static word tables the interpreter matches against
//!
//! Order matters: indicator sets are scanned front to back and the first hit wins.

/// Unit word to seconds
pub const TIME_MULTIPLIERS: &[(&str, u64)] = &[
    ("second", 1),
    ("seconds", 1),
    ("sec", 1),
    ("secs", 1),
    ("s", 1),
    ("minute", 60),
    ("minutes", 60),
    ("min", 60),
    ("mins", 60),
    ("m", 60),
    ("hour", 3600),
    ("hours", 3600),
    ("hr", 3600),
    ("hrs", 3600),
    ("h", 3600),
];

pub const CREATE_INDICATORS: &[&str] = &["set", "create", "make", "start", "begin", "add", "new"];
pub const PAUSE_INDICATORS: &[&str] = &["pause", "hold", "wait", "suspend", "freeze"];
pub const RESUME_INDICATORS: &[&str] = &["resume", "continue", "unpause", "start again", "unfreeze"];
pub const STOP_INDICATORS: &[&str] = &["stop", "end", "cancel", "delete", "remove", "clear"];
pub const LIST_INDICATORS: &[&str] = &["list", "show", "display", "view", "what", "status"];

/// Spelled-out numbers, tens only past twenty
pub const WORD_NUMBERS: &[(&str, u64)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

pub const ARTICLES: &[&str] = &["the", "a", "an"];

/// Words that introduce an explicit timer name, e.g. "for tea"
pub const NAME_SEPARATORS: &[&str] = &["for", "called", "named", "label"];

/// Name used when nothing else is left to call the timer
pub const DEFAULT_NAME: &str = "timer";

pub fn unit_multiplier(unit: &str) -> Option<u64> {
    TIME_MULTIPLIERS
        .iter()
        .find(|(word, _)| *word == unit)
        .map(|(_, multiplier)| *multiplier)
}

pub fn word_to_number(word: &str) -> Option<u64> {
    WORD_NUMBERS
        .iter()
        .find(|(spelled, _)| *spelled == word)
        .map(|(_, value)| *value)
}

/// Whether a token carries no naming information
pub fn is_filler_word(token: &str) -> bool {
    unit_multiplier(token).is_some()
        || [
            CREATE_INDICATORS,
            PAUSE_INDICATORS,
            RESUME_INDICATORS,
            STOP_INDICATORS,
            LIST_INDICATORS,
            ARTICLES,
            NAME_SEPARATORS,
        ]
        .iter()
        .any(|set| set.contains(&token))
        || token == DEFAULT_NAME
}
