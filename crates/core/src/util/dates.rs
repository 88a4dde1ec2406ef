use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Fill a `YYYY`/`MM`/`DD` pattern. Each token is replaced once, left to
/// right, so `"DD.MM.YYYY"` and `"YYYY-MM-DD"` both work.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    pattern
        .replacen("YYYY", &date.year().to_string(), 1)
        .replacen("MM", &format!("{:02}", date.month()), 1)
        .replacen("DD", &format!("{:02}", date.day()), 1)
}

/// Coarse "time ago" label. Instants in the future read as "just now".
pub fn relative_time<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let secs = now.clone().signed_duration_since(then.clone()).num_seconds();
    let (count, unit) = if secs < MINUTE {
        return "just now".to_string();
    } else if secs < HOUR {
        (secs / MINUTE, "minute")
    } else if secs < DAY {
        (secs / HOUR, "hour")
    } else if secs < MONTH {
        (secs / DAY, "day")
    } else if secs < YEAR {
        (secs / MONTH, "month")
    } else {
        (secs / YEAR, "year")
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

/// Whether `date` falls on the same calendar day as `now`, in `now`'s zone.
pub fn is_today<Tz: TimeZone>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
    date.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}
