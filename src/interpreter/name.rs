//! Timer name extraction

use std::sync::LazyLock;

use regex::Regex;

use super::tables::{is_filler_word, DEFAULT_NAME, NAME_SEPARATORS};

static LEADING_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(the|a|an)\s+").expect("valid article regex"));

static TIMER_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btimer\b").expect("valid timer word regex"));

/// Strip a leading article and the first "timer" from a candidate name
pub fn clean_name(candidate: &str) -> String {
    let candidate = LEADING_ARTICLE.replace(candidate.trim(), "");
    let candidate = TIMER_WORD.replace(&candidate, "");
    candidate.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Work out what a create command's timer should be called.
///
/// `duration_text` is removed first. An explicit "for/called/named/label ..."
/// wins, otherwise every word that carries no naming information is dropped.
pub fn extract_timer_name(text: &str, duration_text: &str) -> String {
    let text = text.replacen(duration_text, "", 1);
    let text = text.trim();

    for separator in NAME_SEPARATORS {
        if let Some((_, after)) = text.split_once(&format!(" {} ", separator)) {
            let name = clean_name(after);
            if !name.is_empty() {
                return name;
            }
        }
    }

    let remaining: Vec<&str> = text
        .split_whitespace()
        .filter(|token| !is_filler_word(token))
        .collect();

    if remaining.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        remaining.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_introduces_name() {
        assert_eq!(extract_timer_name("set a 5 minute timer for coffee break", "5 minute"), "coffee break");
        assert_eq!(extract_timer_name("start 3 min called the eggs", "3 min"), "eggs");
        assert_eq!(extract_timer_name("make one with label laundry timer", ""), "laundry");
    }

    #[test]
    fn timer_is_only_stripped_as_a_word() {
        assert_eq!(clean_name("mytimer"), "mytimer");
        assert_eq!(clean_name("the timers timer"), "timers");
    }

    #[test]
    fn falls_back_to_leftover_words() {
        assert_eq!(extract_timer_name("start a 25 min pomodoro timer", "25 min"), "pomodoro");
        assert_eq!(extract_timer_name("create 1 hour meeting timer", "1 hour"), "meeting");
    }

    #[test]
    fn defaults_when_nothing_is_left() {
        assert_eq!(extract_timer_name("set a timer for 5 minutes", "5 minutes"), "timer");
        assert_eq!(extract_timer_name("10", "10"), "timer");
    }

    #[test]
    fn empty_separator_tail_keeps_looking() {
        // " for " is followed only by "the timer", so the leftover-word pass names it
        assert_eq!(extract_timer_name("new bread for the timer", ""), "bread");
    }

    #[test]
    fn clean_name_strips_article_and_timer_word() {
        assert_eq!(clean_name(" the coffee timer "), "coffee");
        assert_eq!(clean_name("an oven timer please"), "oven please");
        assert_eq!(clean_name("timers"), "timers");
    }
}
