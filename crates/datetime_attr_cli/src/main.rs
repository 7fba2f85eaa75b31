//! CLI probe for the date/time attribute core.
//!
//! # Responsibility
//! - Submit a date and a time to an event the way a form would.
//! - Print the combined value and its decomposition.
//!
//! Usage: `datetime_attr_cli [--log-dir <abs path>] <date> <time> [zone]`

use datetime_attr_core::{default_log_level, init_logging, submit_event_form, Event, LogSettings};
use std::process::ExitCode;

const USAGE: &str = "usage: datetime_attr_cli [--log-dir <abs path>] <date> <time> [zone]";

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let log_dir = match take_option(&mut args, "--log-dir") {
        Ok(value) => value,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if args.len() < 2 || args.len() > 3 {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    }

    if let Some(dir) = log_dir {
        let started = LogSettings::parse(default_log_level(), &dir)
            .and_then(|settings| init_logging(&settings));
        if let Err(err) = started {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    match run(&args[0], &args[1], args.get(2).map(String::as_str)) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

// Removes `flag <value>` from `args`.
fn take_option(args: &mut Vec<String>, flag: &str) -> Result<Option<String>, String> {
    let Some(index) = args.iter().position(|arg| arg == flag) else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        return Err(format!("{flag} needs a value"));
    }
    let value = args.remove(index + 1);
    args.remove(index);
    Ok(Some(value))
}

fn run(date: &str, time: &str, zone: Option<&str>) -> Result<bool, Box<dyn std::error::Error>> {
    let mut event = Event::new("cli probe");
    event.time_zone = zone.map(str::to_string);

    let submission = submit_event_form(
        &mut event,
        [
            ("starts_at_date_value", Some(date)),
            ("starts_at_time_value", Some(time)),
        ],
    )?;

    println!("datetime_attr_core version={}", datetime_attr_core::core_version());
    for field in [
        "starts_at",
        "starts_at_date",
        "starts_at_time",
        "starts_at_time_zone",
    ] {
        let value = event.read(field)?;
        println!("{field}={}", value.as_deref().unwrap_or("-"));
    }
    for message in submission.errors.full_messages() {
        println!("invalid: {message}");
    }
    Ok(submission.is_valid())
}

#[cfg(test)]
mod tests {
    use super::take_option;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn take_option_removes_flag_and_value() {
        let mut values = args(&["--log-dir", "/tmp/logs", "2024-03-10", "14:30"]);
        assert_eq!(
            take_option(&mut values, "--log-dir").expect("flag with value"),
            Some("/tmp/logs".to_string())
        );
        assert_eq!(values, args(&["2024-03-10", "14:30"]));
    }

    #[test]
    fn take_option_without_flag_keeps_args() {
        let mut values = args(&["2024-03-10", "14:30", "UTC"]);
        assert_eq!(take_option(&mut values, "--log-dir").expect("no flag"), None);
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn take_option_rejects_missing_value() {
        let mut values = args(&["2024-03-10", "--log-dir"]);
        let err = take_option(&mut values, "--log-dir").expect_err("missing value");
        assert!(err.contains("needs a value"));
    }
}
