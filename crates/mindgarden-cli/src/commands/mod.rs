pub mod config;
pub mod gate;
pub mod mirror;
pub mod session;
pub mod stats;
pub mod streak;
pub mod villain;

use chrono::NaiveDate;

/// Resolve an optional `--date` argument, defaulting to today (UTC).
pub(crate) fn resolve_date(
    date: Option<String>,
) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(s) => Ok(NaiveDate::parse_from_str(&s, "%Y-%m-%d")?),
        None => Ok(chrono::Utc::now().date_naive()),
    }
}
