use colored::Colorize;
use deadmanssnitch::{Error, FailureReport, Outcome, Snitch, SnitchHandle, TagOutcome};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("{} failed to encode output: {err}", "✗".red()),
    }
}

fn describe(handle: &SnitchHandle) -> String {
    match (&handle.name, &handle.id) {
        (Some(name), Some(id)) => format!("{name} ({id})"),
        (Some(name), None) => name.clone(),
        (None, Some(id)) => id.clone(),
        (None, None) => "snitch".to_string(),
    }
}

/// Report the result of a lifecycle reconciliation.
pub fn outcome(result: &Outcome, verb: &str, json: bool) {
    if json {
        print_json(result);
    } else if result.changed {
        println!("{} {} {}", "✓".green(), verb, describe(&result.snitch));
    } else {
        println!(
            "{} {} already up to date",
            "~".yellow(),
            describe(&result.snitch)
        );
    }
}

/// Report the result of a tag reconciliation.
pub fn tag_outcome(result: &TagOutcome, json: bool) {
    if json {
        print_json(result);
    } else if result.changed {
        println!(
            "{} tags on {}: [{}] -> [{}]",
            "✓".green(),
            describe(&result.snitch),
            result.old_tags.join(", "),
            result.new_tags.join(", ")
        );
    } else {
        println!(
            "{} tags on {} already up to date",
            "~".yellow(),
            describe(&result.snitch)
        );
    }
}

/// Report an action that always mutates, like pause or unpause.
pub fn action(handle: &SnitchHandle, verb: &str, json: bool) {
    if json {
        print_json(handle);
    } else {
        println!("{} {} {}", "✓".green(), verb, describe(handle));
    }
}

/// Print a listing of snitches.
pub fn snitches(found: &[Snitch], json: bool) {
    if json {
        print_json(&found);
        return;
    }
    if found.is_empty() {
        println!("{} no snitches found", "~".yellow());
        return;
    }
    for snitch in found {
        let status = snitch.status.as_deref().unwrap_or("unknown");
        let tags = if snitch.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", snitch.tags.join(", ")).dimmed().to_string()
        };
        println!(
            "{}  {}  {}  {}{}",
            snitch.token.dimmed(),
            snitch.name.bold(),
            snitch.interval.as_str(),
            status,
            tags
        );
    }
}

/// Print a failure report to stderr.
pub fn failure(err: &Error, json: bool) {
    let report = FailureReport::from_error(err);
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => eprintln!("{text}"),
            Err(encode_err) => eprintln!("{} {encode_err}", "✗".red()),
        }
    } else {
        eprintln!("{} {}", "✗".red(), report.msg);
        if let Some(response) = &report.response {
            if let Ok(body) = serde_json::to_string(response) {
                eprintln!("  {}", body.dimmed());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_prefers_both() {
        let handle = SnitchHandle {
            id: Some("abc".to_string()),
            name: Some("job".to_string()),
        };
        assert_eq!(describe(&handle), "job (abc)");
    }

    #[test]
    fn test_describe_falls_back_to_id() {
        let handle = SnitchHandle {
            id: Some("abc".to_string()),
            name: None,
        };
        assert_eq!(describe(&handle), "abc");
    }

    #[test]
    fn test_describe_empty_handle() {
        assert_eq!(describe(&SnitchHandle::default()), "snitch");
    }
}
