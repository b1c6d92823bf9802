//! Natural-language command interpreter
//!
//! Turns free-form text such as "pause the coffee timer" into a [`Command`].
//! Matching is substring based and runs an ordered list of matchers; the
//! first matcher that produces a command wins.

pub mod duration;
pub mod name;
pub mod tables;

pub use duration::{extract_duration, find_duration, DurationMatch};
pub use name::{clean_name, extract_timer_name};

use tracing::debug;

use crate::timer::Command;
use tables::{DEFAULT_NAME, LIST_INDICATORS, PAUSE_INDICATORS, RESUME_INDICATORS, STOP_INDICATORS};

type Matcher = fn(&str) -> Option<Command>;

/// List first, then pause/resume/stop, then create as the fallback
const MATCHERS: [Matcher; 3] = [match_list, match_control, match_create];

/// Stateless interpreter handle kept on the application context
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    pub fn interpret(&self, text: &str) -> Option<Command> {
        interpret(text)
    }
}

/// Interpret `text`, returning `None` when it is not understood
pub fn interpret(text: &str) -> Option<Command> {
    let text = text.trim().to_lowercase();
    let command = MATCHERS.iter().find_map(|matcher| matcher(&text));
    debug!("Interpreted {:?} as {:?}", text, command);
    command
}

fn match_list(text: &str) -> Option<Command> {
    LIST_INDICATORS
        .iter()
        .any(|indicator| text.contains(*indicator))
        .then_some(Command::List)
}

fn match_control(text: &str) -> Option<Command> {
    let controls: [(&[&str], fn(String) -> Command); 3] = [
        (PAUSE_INDICATORS, |name| Command::Pause { name }),
        (RESUME_INDICATORS, |name| Command::Resume { name }),
        (STOP_INDICATORS, |name| Command::Stop { name }),
    ];

    controls.iter().find_map(|(indicators, build)| {
        indicators.iter().find_map(|indicator| {
            let (_, after) = text.split_once(*indicator)?;
            let name = clean_name(after);
            Some(build(if name.is_empty() { DEFAULT_NAME.to_string() } else { name }))
        })
    })
}

fn match_create(text: &str) -> Option<Command> {
    let duration = find_duration(text)?;
    let name = extract_timer_name(text, &duration.text);
    Some(Command::Create { name, duration: duration.seconds })
}
