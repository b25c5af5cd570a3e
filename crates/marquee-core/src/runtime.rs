//! Loose duration parsing for the feed's `Runtime` strings.
//!
//! The feed is inconsistent about runtime formatting ("1h 33m", "92 min",
//! "1:32:00", occasionally free text). Parse failures log a warning and map
//! to `None` instead of failing the ingest: a missing runtime is acceptable,
//! a lost content row is not.

use tracing::warn;

/// Parse a loosely-formatted duration string into whole seconds.
///
/// Accepted forms:
/// - clock strings with one or two colons: `"1:32"` (min:sec),
///   `"3:04:05"` (hour:min:sec)
/// - unit-tagged segments, with or without spaces: `"1h30m"`, `"1 hr 33 min"`,
///   `"2.5 hours"`, `"5400s"`, `"1 hour, 15 minutes"`
///
/// Anything else, including a bare number with no unit, logs a warning and
/// returns `None`.
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
  match parse(raw) {
    Some(secs) => Some(secs.round() as i64),
    None => {
      warn!("could not parse runtime {raw:?}");
      None
    }
  }
}

fn parse(raw: &str) -> Option<f64> {
  let text = raw.trim().to_ascii_lowercase();
  if text.is_empty() {
    return None;
  }
  if text.contains(':') {
    return parse_clock(&text);
  }
  parse_units(&text)
}

fn parse_clock(text: &str) -> Option<f64> {
  let parts: Vec<&str> = text.split(':').collect();
  if parts.len() < 2 || parts.len() > 3 {
    return None;
  }

  let mut total = 0.0;
  for part in parts {
    let value: f64 = part.trim().parse().ok()?;
    if value < 0.0 {
      return None;
    }
    total = total * 60.0 + value;
  }
  Some(total)
}

/// Sum of number/unit segments; a number with no following unit rejects the
/// whole string.
fn parse_units(text: &str) -> Option<f64> {
  let mut total = 0.0;
  let mut matched_any = false;
  let mut pending: Option<f64> = None;

  for token in tokenize(text) {
    if let Ok(value) = token.parse::<f64>() {
      // Two numbers in a row means the first had no unit.
      if pending.replace(value).is_some() {
        return None;
      }
    } else {
      let scale = unit_secs(&token)?;
      total += pending.take()? * scale;
      matched_any = true;
    }
  }

  if pending.is_some() || !matched_any {
    return None;
  }
  Some(total)
}

/// Split into digit runs and letter runs: `"1h30m"` → `["1", "h", "30", "m"]`.
fn tokenize(text: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  for word in text.replace(',', " ").split_whitespace() {
    if word == "and" {
      continue;
    }
    let mut current = String::new();
    let mut numeric = None;
    for ch in word.chars() {
      let is_numeric = ch.is_ascii_digit() || ch == '.';
      if numeric != Some(is_numeric) && !current.is_empty() {
        tokens.push(std::mem::take(&mut current));
      }
      numeric = Some(is_numeric);
      current.push(ch);
    }
    if !current.is_empty() {
      tokens.push(current);
    }
  }
  tokens
}

fn unit_secs(unit: &str) -> Option<f64> {
  match unit {
    "w" | "wk" | "wks" | "week" | "weeks" => Some(604_800.0),
    "d" | "day" | "days" => Some(86_400.0),
    "h" | "hr" | "hrs" | "hour" | "hours" => Some(3600.0),
    "m" | "min" | "mins" | "minute" | "minutes" => Some(60.0),
    "s" | "sec" | "secs" | "second" | "seconds" => Some(1.0),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::parse_duration_secs;

  #[test]
  fn compact_hours_minutes() {
    assert_eq!(parse_duration_secs("1h30m"), Some(5400));
  }

  #[test]
  fn spaced_unit_words() {
    assert_eq!(parse_duration_secs("1 hr 33 min"), Some(5580));
    assert_eq!(parse_duration_secs("2 hours"), Some(7200));
    assert_eq!(parse_duration_secs("90 min"), Some(5400));
  }

  #[test]
  fn seconds_suffix() {
    assert_eq!(parse_duration_secs("5400s"), Some(5400));
  }

  #[test]
  fn fractional_values() {
    assert_eq!(parse_duration_secs("1.5h"), Some(5400));
    assert_eq!(parse_duration_secs("2.5 hours"), Some(9000));
  }

  #[test]
  fn comma_and_conjunction_separators() {
    assert_eq!(parse_duration_secs("1 hour, 15 minutes"), Some(4500));
    assert_eq!(parse_duration_secs("1 hour and 15 minutes"), Some(4500));
  }

  #[test]
  fn clock_minutes_seconds() {
    assert_eq!(parse_duration_secs("1:32"), Some(92));
  }

  #[test]
  fn clock_hours_minutes_seconds() {
    assert_eq!(parse_duration_secs("3:04:05"), Some(11045));
  }

  #[test]
  fn garbage_is_none() {
    assert_eq!(parse_duration_secs("garbage"), None);
  }

  #[test]
  fn bare_number_has_no_unit() {
    assert_eq!(parse_duration_secs("90"), None);
  }

  #[test]
  fn empty_is_none() {
    assert_eq!(parse_duration_secs(""), None);
    assert_eq!(parse_duration_secs("   "), None);
  }

  #[test]
  fn number_without_trailing_unit_rejected() {
    assert_eq!(parse_duration_secs("1h 30"), None);
  }
}
