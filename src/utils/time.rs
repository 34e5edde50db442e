use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Accepts plain dates, RFC 3339 timestamps and naive `T`-separated timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Whole years between `birth` and `as_of`, minus one while the birthday has
/// not yet come round in `as_of`'s year.
pub fn age_on(birth: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
