// core/src/format.rs

//! Display formatting used by the summary view and the dashboard (en-US style).

use chrono::{DateTime, NaiveDate, Utc};

/// "January 5, 2000"
pub fn long_date(date: NaiveDate) -> String {
  date.format("%B %-d, %Y").to_string()
}

/// "Jan 5, 2024"
pub fn short_date(at: DateTime<Utc>) -> String {
  at.format("%b %-d, %Y").to_string()
}

/// "January 5, 2024 at 03:04 PM"
pub fn long_timestamp(at: DateTime<Utc>) -> String {
  at.format("%B %-d, %Y at %I:%M %p").to_string()
}

pub fn yes_no(flag: bool) -> &'static str {
  if flag {
    "Yes"
  } else {
    "No"
  }
}

pub fn address_line(address: &str, city: &str, country: &str) -> String {
  format!("{}, {}, {}", address, city, country)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn dates_render_like_the_browser_locale() {
    let dob = NaiveDate::from_ymd_opt(2000, 1, 5).unwrap();
    assert_eq!(long_date(dob), "January 5, 2000");

    let at = Utc.with_ymd_and_hms(2024, 11, 3, 15, 4, 0).unwrap();
    assert_eq!(short_date(at), "Nov 3, 2024");
    assert_eq!(long_timestamp(at), "November 3, 2024 at 03:04 PM");
  }

  #[test]
  fn yes_no_and_address() {
    assert_eq!(yes_no(true), "Yes");
    assert_eq!(yes_no(false), "No");
    assert_eq!(address_line("1 Main St", "Lagos", "Nigeria"), "1 Main St, Lagos, Nigeria");
  }
}
