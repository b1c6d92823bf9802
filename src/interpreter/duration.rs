//! Duration extraction
//!
//! A fixed cascade of passes. The first pass that finds anything wins and
//! later passes never run; matches found within one pass are summed.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use super::tables::{unit_multiplier, word_to_number, TIME_MULTIPLIERS};

/// Total seconds found plus the slice of text they were read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationMatch {
    pub seconds: u64,
    /// From the start of the first match to the end of the last one
    pub text: String,
}

type Pass = fn(&str) -> Option<DurationMatch>;

const PASSES: [Pass; 4] = [compact_pass, spaced_pass, word_pass, bare_number_pass];

static COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*([a-z]+)").expect("valid compact duration regex"));

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\b").expect("valid bare number regex"));

static SPACED: LazyLock<Vec<(Regex, u64)>> = LazyLock::new(|| {
    unit_patterns(|unit| format!(r"(\d+)\s+{}\b", regex::escape(unit)))
});

static WORDED: LazyLock<Vec<(Regex, u64)>> = LazyLock::new(|| {
    unit_patterns(|unit| format!(r"\b([a-z-]+)\s+{}\b", regex::escape(unit)))
});

fn unit_patterns(pattern: impl Fn(&str) -> String) -> Vec<(Regex, u64)> {
    TIME_MULTIPLIERS
        .iter()
        .map(|(unit, multiplier)| {
            let regex = Regex::new(&pattern(unit)).expect("valid unit regex");
            (regex, *multiplier)
        })
        .collect()
}

/// Seconds described by `text`, or `None` when no pass finds a duration.
///
/// A zero-length match such as "0 minutes" still counts as found.
pub fn extract_duration(text: &str) -> Option<u64> {
    find_duration(&text.trim().to_lowercase()).map(|found| found.seconds)
}

/// Run the passes in order over already-normalized text
pub fn find_duration(text: &str) -> Option<DurationMatch> {
    PASSES.iter().find_map(|pass| pass(text))
}

#[derive(Default)]
struct Accumulator {
    seconds: u64,
    span: Option<Range<usize>>,
}

impl Accumulator {
    fn add(&mut self, value: u64, multiplier: u64, range: Range<usize>) {
        let Some(seconds) = value.checked_mul(multiplier) else {
            return;
        };
        self.seconds = self.seconds.saturating_add(seconds);
        self.span = Some(match self.span.take() {
            Some(span) => span.start.min(range.start)..span.end.max(range.end),
            None => range,
        });
    }

    fn finish(self, text: &str) -> Option<DurationMatch> {
        self.span.map(|span| DurationMatch {
            seconds: self.seconds,
            text: text[span].to_string(),
        })
    }
}

/// "1h30m", "5min", "1 hour and 30 minutes": digits followed by a unit word
fn compact_pass(text: &str) -> Option<DurationMatch> {
    let mut found = Accumulator::default();
    for caps in COMPACT.captures_iter(text) {
        let (Some(whole), Some(value), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let (Ok(value), Some(multiplier)) = (value.as_str().parse::<u64>(), unit_multiplier(unit.as_str())) else {
            continue;
        };
        found.add(value, multiplier, whole.range());
    }
    found.finish(text)
}

/// "5 minutes": digits, whitespace, then a unit from the table
fn spaced_pass(text: &str) -> Option<DurationMatch> {
    let mut found = Accumulator::default();
    for (regex, multiplier) in SPACED.iter() {
        for caps in regex.captures_iter(text) {
            let (Some(whole), Some(value)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Ok(value) = value.as_str().parse::<u64>() {
                found.add(value, *multiplier, whole.range());
            }
        }
    }
    found.finish(text)
}

/// "five minutes": a spelled-out number before a unit
fn word_pass(text: &str) -> Option<DurationMatch> {
    let mut found = Accumulator::default();
    for (regex, multiplier) in WORDED.iter() {
        for caps in regex.captures_iter(text) {
            let (Some(whole), Some(word)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Some(value) = word_to_number(word.as_str()) {
                found.add(value, *multiplier, whole.range());
            }
        }
    }
    found.finish(text)
}

/// A lone number is read as minutes
fn bare_number_pass(text: &str) -> Option<DurationMatch> {
    let number = BARE_NUMBER.captures(text)?.get(1)?;
    let value = number.as_str().parse::<u64>().ok()?;
    let mut found = Accumulator::default();
    found.add(value, 60, number.range());
    found.finish(text)
}
