// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared output helpers: JSON printing and verdict coloring.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::dataset::Verdict;
use crate::verdict_summary::Signal;

/// Render `value` as JSON, pretty unless `compact`.
pub fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}

/// Print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    println!("{}", to_json(value, compact)?);
    Ok(())
}

pub fn verdict_colored(verdict: Verdict) -> ColoredString {
    let label = verdict.label();
    match verdict {
        Verdict::Safe => label.green(),
        Verdict::Conditional => label.blue(),
        Verdict::Caution => label.yellow(),
        Verdict::Avoid => label.red().bold(),
    }
}

pub fn signal_colored(signal: Signal) -> ColoredString {
    let text = format!("{} {}", signal.icon(), signal.label());
    match signal {
        Signal::Okay => text.green(),
        Signal::CareNeeded => text.blue(),
        Signal::Caution => text.yellow(),
        Signal::Avoid => text.red().bold(),
    }
}

/// Three-level reliability bar: `●●●` for ≥3.0, `●●○` for ≥2.0, else `●○○`.
pub fn reliability_bar(reliability: f64) -> &'static str {
    if reliability >= 3.0 {
        "●●●"
    } else if reliability >= 2.0 {
        "●●○"
    } else {
        "●○○"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_json_has_no_newlines() {
        let value = json!({"query": "커피", "results": [1, 2]});
        assert!(!to_json(&value, true).expect("json").contains('\n'));
        assert!(to_json(&value, false).expect("json").contains('\n'));
    }

    #[test]
    fn reliability_bar_levels() {
        assert_eq!(reliability_bar(5.0), "●●●");
        assert_eq!(reliability_bar(2.0), "●●○");
        assert_eq!(reliability_bar(0.5), "●○○");
    }
}
