use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Averaged reading returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub city: String,
    /// Mean temperature in degrees Celsius.
    pub temp: f64,
    /// Wall-clock time spent producing the result, e.g. `"123.456ms"`.
    pub took: String,
}

impl AggregateResult {
    pub fn new(city: impl Into<String>, temp: f64, elapsed: Duration) -> Self {
        Self {
            city: city.into(),
            temp,
            took: format_elapsed(elapsed),
        }
    }
}

/// Formats a duration the way Go's `time.Duration` prints itself:
/// the largest fitting unit below one second (`ns`, `µs`, `ms`), otherwise
/// `h`/`m`/`s` components, with trailing fractional zeros dropped.
pub fn format_elapsed(elapsed: Duration) -> String {
    const MICRO: u128 = 1_000;
    const MILLI: u128 = 1_000_000;
    const SECOND: u128 = 1_000_000_000;

    let nanos = elapsed.as_nanos();
    match nanos {
        0 => return "0s".to_string(),
        n if n < MICRO => return format!("{n}ns"),
        n if n < MILLI => return format!("{}µs", decimal(n, MICRO)),
        n if n < SECOND => return format!("{}ms", decimal(n, MILLI)),
        _ => {}
    }

    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = u128::from(total_secs % 60) * SECOND + u128::from(elapsed.subsec_nanos());
    let seconds = format!("{}s", decimal(seconds, SECOND));

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}")
    } else {
        seconds
    }
}

fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }

    let width = unit.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
