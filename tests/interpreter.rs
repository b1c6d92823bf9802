//! Interpreter behaviour through the public API

use timer_assistant::{
    interpret,
    interpreter::{extract_duration, extract_timer_name},
    Command,
};

#[test]
fn durations() {
    assert_eq!(extract_duration("1 hour and 30 minutes"), Some(5400));
    assert_eq!(extract_duration("5 min"), Some(300));
    assert_eq!(extract_duration("five minutes"), Some(300));
    assert_eq!(extract_duration("10"), Some(600));
    assert_eq!(extract_duration("no time here"), None);
}

#[test]
fn commands() {
    assert_eq!(
        interpret("pause the coffee timer"),
        Some(Command::Pause { name: "coffee".to_string() })
    );
    assert_eq!(
        interpret("set a 5 minute timer for coffee break"),
        Some(Command::Create { name: "coffee break".to_string(), duration: 300 })
    );
    assert_eq!(interpret("gibberish"), None);
}

#[test]
fn input_is_case_and_whitespace_insensitive() {
    assert_eq!(
        interpret("   PAUSE The Coffee Timer  "),
        Some(Command::Pause { name: "coffee".to_string() })
    );
    assert_eq!(interpret("STATUS"), Some(Command::List));
}

#[test]
fn stop_and_resume_default_the_name() {
    assert_eq!(interpret("stop"), Some(Command::Stop { name: "timer".to_string() }));
    assert_eq!(interpret("resume the timer"), Some(Command::Resume { name: "timer".to_string() }));
}

#[test]
fn name_extraction_defaults_to_timer() {
    assert_eq!(extract_timer_name("set a timer", ""), "timer");
    assert_eq!(extract_timer_name("set a timer named bread", ""), "bread");
}

#[test]
fn word_numbers_with_compound_text() {
    assert_eq!(
        interpret("make a twenty minute timer called laundry"),
        Some(Command::Create { name: "laundry".to_string(), duration: 1200 })
    );
}

#[test]
fn hyphenated_number_words_are_not_understood() {
    assert_eq!(interpret("set a twenty-five minute timer for pasta"), None);
    assert_eq!(extract_duration("twenty-five minutes"), None);
}
