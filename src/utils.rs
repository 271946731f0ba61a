use chrono::{NaiveTime, Timelike as _};
use rust_decimal::Decimal;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parses the loose clock formats the punch feeds produce: "H:mm", "HH:mm",
/// "Hmm", "HHmm", each with an optional am/pm suffix. Canonical form for
/// storage and comparison is 24h "HH:mm".
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let lower = input.trim().to_ascii_lowercase();

    let (body, meridiem) = if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim_end(), Some("am"))
    } else if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim_end(), Some("pm"))
    } else {
        (lower.as_str(), None)
    };

    let (hour, minute): (u32, u32) = match body.split_once(':') {
        Some((h, m)) if !h.is_empty() && m.len() == 2 => (h.parse().ok()?, m.parse().ok()?),
        Some(_) => return None,
        None => {
            // Compact "Hmm"/"HHmm" form, minutes are always the last two digits
            if !(3..=4).contains(&body.len()) || !body.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let (h, m) = body.split_at(body.len() - 2);
            (h.parse().ok()?, m.parse().ok()?)
        }
    };

    let hour = match meridiem {
        Some(_) if !(1..=12).contains(&hour) => return None,
        Some("am") if hour == 12 => 0,
        Some("pm") if hour < 12 => hour + 12,
        _ => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

pub fn canonical_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Clocked duration in hours. An end earlier than the start, or an explicit
/// `overnight` flag, wraps the interval past midnight (modulo 24h).
/// Never negative.
pub fn duration_hours(start: NaiveTime, end: NaiveTime, overnight: bool) -> Decimal {
    let start_minutes = minutes_since_midnight(start);
    let end_minutes = minutes_since_midnight(end);

    let minutes = if end_minutes < start_minutes || overnight {
        (end_minutes - start_minutes).rem_euclid(MINUTES_PER_DAY)
    } else {
        end_minutes - start_minutes
    };

    Decimal::from(minutes) / Decimal::from(60)
}

/// Strict greater-than in minutes since midnight; clocking in exactly on the
/// shift start is not late.
pub fn is_late(in_time: NaiveTime, shift_start: NaiveTime) -> bool {
    minutes_since_midnight(in_time) > minutes_since_midnight(shift_start)
}

/// Picks the field separator for a punch or roster payload from its first
/// line. Feeds arrive either pipe- or comma-delimited.
pub fn sniff_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or_default();

    if first_line.matches('|').count() >= first_line.matches(',').count() {
        b'|'
    } else {
        b','
    }
}
