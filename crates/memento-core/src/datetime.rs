use anyhow::{Context, anyhow};
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};
use regex::Regex;

/// Calendar date for the user's local timezone at the given instant.
/// Due-date defaults and the dashboard header both key off this.
pub fn local_today(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Local).date_naive()
}

/// Parses a date as typed in a form: `YYYY-MM-DD`, the keywords
/// today/now/tomorrow/yesterday, or a relative offset like `+3d`.
pub fn parse_input_date(input: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let token = input.trim();
    if token.is_empty() {
        return Err(anyhow!("empty date value"));
    }

    match token.to_ascii_lowercase().as_str() {
        "today" | "now" => return Ok(today),
        "tomorrow" => {
            return Ok(today.checked_add_days(Days::new(1)).unwrap_or(today));
        }
        "yesterday" => {
            return Ok(today.checked_sub_days(Days::new(1)).unwrap_or(today));
        }
        _ => {}
    }

    let rel_re = Regex::new(r"^(?P<sign>[+-])(?P<num>\d{1,4})d$")
        .map_err(|e| anyhow!("internal regex compile failure: {e}"))?;
    if let Some(caps) = rel_re.captures(token) {
        let sign = caps
            .name("sign")
            .map(|m| m.as_str())
            .ok_or_else(|| anyhow!("missing relative sign"))?;
        let num: u64 = caps
            .name("num")
            .map(|m| m.as_str())
            .ok_or_else(|| anyhow!("missing relative amount"))?
            .parse()
            .context("invalid relative day count")?;
        let shifted = if sign == "-" {
            today.checked_sub_days(Days::new(num))
        } else {
            today.checked_add_days(Days::new(num))
        };
        return shifted.ok_or_else(|| anyhow!("relative date out of range: {token}"));
    }

    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .map_err(|_| anyhow!("unrecognized date expression: {input}"))
        .context("supported formats: today/tomorrow/yesterday, +Nd/-Nd, YYYY-MM-DD")
}

/// `Saturday, June 14th, 2025`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}{}, {}",
        date.format("%A"),
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// `Jun 14, 2025`
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{} {}, {}", date.format("%b"), date.day(), date.year())
}

/// `Jun 14th, 2025`
pub fn format_short_ordinal_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%b"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// `Jun 15`
pub fn format_month_day(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), date.day())
}

fn ordinal_suffix(day: u32) -> &'static str {
    // 11th..13th, not 11st..13rd
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
