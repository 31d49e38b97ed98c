pub mod models;

use std::collections::HashSet;
use chrono::{DateTime, NaiveDate, TimeZone, Timelike};
use crate::manager_forecast::models::{DailySummary, WeatherSample};

/// Max number of days included in a condensed forecast
pub const FORECAST_DAYS: usize = 3;

/// Condenses a multi-day forecast feed into one summary per calendar day.
///
/// Days are taken in the order they first appear in the feed, today (as seen from `now`)
/// is skipped and at most `FORECAST_DAYS` summaries are returned. Calendar dates and
/// hours are evaluated in the time zone of `now`.
///
/// Every summary carries min/max temperature over all samples of its day, while description,
/// icon and humidity come from the sample closest to noon (the earliest one wins a tie).
///
/// # Arguments
///
/// * 'samples' - forecast samples sorted by timestamp
/// * 'now' - the point in time that decides what today is
pub fn daily_summaries<Tz: TimeZone>(samples: &[WeatherSample], now: &DateTime<Tz>) -> Vec<DailySummary> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut processed: HashSet<NaiveDate> = HashSet::new();
    let mut summaries: Vec<DailySummary> = Vec::new();

    for sample in samples {
        if summaries.len() >= FORECAST_DAYS {
            break;
        }

        let date = local_date(sample, &tz);
        if date == today || processed.contains(&date) {
            continue;
        }

        let day = samples
            .iter()
            .filter(|s| local_date(s, &tz) == date)
            .collect::<Vec<&WeatherSample>>();

        if let Some(summary) = summarize_day(&day, &tz) {
            summaries.push(summary);
        }

        processed.insert(date);
    }

    summaries
}

/// Builds the summary for one day worth of samples, returns None for an empty day
///
/// # Arguments
///
/// * 'day' - all samples sharing one calendar date
/// * 'tz' - time zone to evaluate hour of day in
fn summarize_day<Tz: TimeZone>(day: &[&WeatherSample], tz: &Tz) -> Option<DailySummary> {
    let noon = day
        .iter()
        .copied()
        .reduce(|closest, current| {
            if noon_distance(current, tz) < noon_distance(closest, tz) { current } else { closest }
        })?;

    let (min, max) = day
        .iter()
        .fold((noon.temperature, noon.temperature), |(min, max), s| {
            (min.min(s.temperature), max.max(s.temperature))
        });

    Some(DailySummary {
        date: noon.timestamp,
        temperature_max: max,
        temperature_min: min,
        description: noon.description.clone(),
        icon_code: noon.icon_code.clone(),
        humidity: noon.humidity,
    })
}

/// Returns the calendar date of a sample in the given time zone
///
fn local_date<Tz: TimeZone>(sample: &WeatherSample, tz: &Tz) -> NaiveDate {
    sample.timestamp.with_timezone(tz).date_naive()
}

/// Returns number of whole hours between the sample and noon, in the given time zone
///
fn noon_distance<Tz: TimeZone>(sample: &WeatherSample, tz: &Tz) -> u32 {
    sample.timestamp.with_timezone(tz).hour().abs_diff(12)
}
