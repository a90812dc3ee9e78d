//! Parsing of NWS `validTime` interval tokens.
//!
//! A token is `<instant>/<duration>`, e.g. `2026-03-01T18:00:00+00:00/PT6H`.
//! Both halves come from an external API and may be malformed; parsing never
//! fails. An unusable instant becomes `None` and an unusable duration falls
//! back to one hour, so a single bad sample cannot take down a whole report.

use chrono::{DateTime, FixedOffset};

/// Fallback span when a duration is absent, malformed, or non-positive.
pub const FALLBACK_MS: i64 = 3_600_000;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// A parsed `validTime` token.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    raw: String,
}

impl Interval {
    /// Parse a `validTime` token.
    pub fn parse(token: &str) -> Self {
        let (instant, duration) = match token.split_once('/') {
            Some((instant, duration)) => (instant, Some(duration)),
            None => (token, None),
        };

        let start = DateTime::parse_from_rfc3339(instant).ok();
        let span_ms = duration
            .and_then(parse_duration_ms)
            .filter(|&ms| ms > 0)
            .unwrap_or(FALLBACK_MS);
        // A span that pushes the instant past the representable range gets
        // the same one-hour fallback as an unparseable one.
        let end = start.and_then(|start| {
            start
                .checked_add_signed(chrono::Duration::milliseconds(span_ms))
                .or_else(|| start.checked_add_signed(chrono::Duration::milliseconds(FALLBACK_MS)))
        });

        Self {
            start,
            end,
            raw: token.to_string(),
        }
    }

    /// Duration of the interval in milliseconds.
    pub fn span_ms(&self) -> i64 {
        match (self.start, self.end) {
            (Some(start), Some(end)) => (end - start).num_milliseconds(),
            _ => FALLBACK_MS,
        }
    }

    /// Short label for a report row, e.g. `Sun 18:00-19:00`.
    ///
    /// Falls back to the head of the raw token when the instant did not
    /// parse.
    pub fn label(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                format!("{}-{}", start.format("%a %H:%M"), end.format("%H:%M"))
            }
            _ => self.raw.chars().take(16).collect(),
        }
    }

    /// Label for just the start of the interval, e.g. `Sun 03/01 18:00`.
    pub fn start_label(&self) -> String {
        match self.start {
            Some(start) => start.format("%a %m/%d %H:%M").to_string(),
            None => self.raw.chars().take(16).collect(),
        }
    }
}

/// Parse the duration half of a token into milliseconds.
///
/// Accepts `P[nD][T[nH][nM][nS]]` with non-negative integer counts. Returns
/// `None` for anything else, including fractional counts and leftover text.
fn parse_duration_ms(text: &str) -> Option<i64> {
    let rest = text.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };

    let mut total: i64 = 0;

    let date_rest = take_unit(date_part, 'D', MS_PER_DAY, &mut total)?;
    if !date_rest.is_empty() {
        return None;
    }

    if let Some(time_part) = time_part {
        let rest = take_unit(time_part, 'H', MS_PER_HOUR, &mut total)?;
        let rest = take_unit(rest, 'M', MS_PER_MINUTE, &mut total)?;
        let rest = take_unit(rest, 'S', MS_PER_SECOND, &mut total)?;
        if !rest.is_empty() {
            return None;
        }
    }

    Some(total)
}

/// Consume a leading `<digits><unit>` component if present, accumulating its
/// contribution. Returns the remaining text, or `None` on malformed digits.
fn take_unit<'a>(text: &'a str, unit: char, ms_per: i64, total: &mut i64) -> Option<&'a str> {
    let Some(pos) = text.find(unit) else {
        return Some(text);
    };
    let digits = &text[..pos];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count: i64 = digits.parse().ok()?;
    let ms = count.checked_mul(ms_per)?;
    *total = total.checked_add(ms)?;
    Some(&text[pos + unit.len_utf8()..])
}
