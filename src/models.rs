use std::cmp::Ordering;
use std::fmt;

use chrono::{Days, NaiveDate};
use thiserror::Error;

/// Interval used when a plant is created with a name only.
pub const DEFAULT_WATERING_INTERVAL_DAYS: i64 = 7;

/// Invariant violations raised while building or editing a [`Plant`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlantError {
    #[error("watering interval must be greater than zero days (got {0})")]
    InvalidInterval(i64),

    #[error("planted date {planted} is after last watering date {last_watered}")]
    InvalidDateOrder {
        planted: NaiveDate,
        last_watered: NaiveDate,
    },

    #[error("plant name must not be empty")]
    EmptyName,

    #[error("plant {field} must not contain tabs or line breaks")]
    ForbiddenCharacter { field: &'static str },
}

/// A houseplant and its watering schedule.
///
/// Fields are private so that every instance satisfies:
/// - `name` is non-empty and carries no surrounding whitespace,
/// - neither `name` nor `notes` contains a tab or line break,
/// - `watering_interval` (days) is strictly positive,
/// - `planted_date <= last_watering_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    name: String,
    watering_interval: i64,
    notes: String,
    planted_date: NaiveDate,
    last_watering_date: NaiveDate,
}

impl Plant {
    /// Build a plant from its full attribute set.
    ///
    /// `name` and `notes` are trimmed so the stored values survive the
    /// tab-separated record format unchanged.
    pub fn new(
        name: impl Into<String>,
        watering_interval: i64,
        notes: impl Into<String>,
        planted_date: NaiveDate,
        last_watering_date: NaiveDate,
    ) -> Result<Self, PlantError> {
        let name = normalize_name(name.into())?;
        check_interval(watering_interval)?;
        check_date_order(planted_date, last_watering_date)?;

        let notes = normalize_notes(notes.into())?;

        Ok(Self {
            name,
            watering_interval,
            notes,
            planted_date,
            last_watering_date,
        })
    }

    /// A plant planted and watered `today`, with empty notes.
    pub fn with_interval(
        name: impl Into<String>,
        watering_interval: i64,
        today: NaiveDate,
    ) -> Result<Self, PlantError> {
        Self::new(name, watering_interval, "", today, today)
    }

    /// A plant planted and watered `today`, watered every
    /// [`DEFAULT_WATERING_INTERVAL_DAYS`] days.
    pub fn with_name(name: impl Into<String>, today: NaiveDate) -> Result<Self, PlantError> {
        Self::with_interval(name, DEFAULT_WATERING_INTERVAL_DAYS, today)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Days between waterings.
    pub fn watering_interval(&self) -> i64 {
        self.watering_interval
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn planted_date(&self) -> NaiveDate {
        self.planted_date
    }

    pub fn last_watering_date(&self) -> NaiveDate {
        self.last_watering_date
    }

    /// Record a watering on `today`.
    pub fn water_now(&mut self, today: NaiveDate) {
        self.last_watering_date = today;
    }

    /// `last_watering_date + watering_interval`, saturating at the largest
    /// representable date.
    pub fn next_watering_date(&self) -> NaiveDate {
        // watering_interval > 0 is guaranteed by construction.
        self.last_watering_date
            .checked_add_days(Days::new(self.watering_interval as u64))
            .unwrap_or(NaiveDate::MAX)
    }

    /// True once `today` is strictly past the next watering date.
    pub fn is_watering_needed(&self, today: NaiveDate) -> bool {
        today > self.next_watering_date()
    }

    pub fn days_since_last_watering(&self, today: NaiveDate) -> i64 {
        (today - self.last_watering_date).num_days()
    }

    /// Human-readable watering status as of `today`.
    pub fn watering_info(&self, today: NaiveDate) -> String {
        let mut info = format!(
            "The plant was last watered on {} ({} days ago). Watering interval is {} days.",
            self.last_watering_date,
            self.days_since_last_watering(today),
            self.watering_interval,
        );
        if self.is_watering_needed(today) {
            info.push_str(" Consider watering now!");
        }
        info
    }

    /// Default ordering: lexicographic by name.
    pub fn cmp_by_name(&self, other: &Plant) -> Ordering {
        self.name.cmp(&other.name)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), PlantError> {
        self.name = normalize_name(name.into())?;
        Ok(())
    }

    pub fn set_watering_interval(&mut self, watering_interval: i64) -> Result<(), PlantError> {
        check_interval(watering_interval)?;
        self.watering_interval = watering_interval;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), PlantError> {
        self.notes = normalize_notes(notes.into())?;
        Ok(())
    }

    pub fn set_planted_date(&mut self, planted_date: NaiveDate) -> Result<(), PlantError> {
        check_date_order(planted_date, self.last_watering_date)?;
        self.planted_date = planted_date;
        Ok(())
    }

    pub fn set_last_watering_date(&mut self, last_watering_date: NaiveDate) -> Result<(), PlantError> {
        check_date_order(self.planted_date, last_watering_date)?;
        self.last_watering_date = last_watering_date;
        Ok(())
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (every {} days, planted {}, last watered {})",
            self.name,
            self.watering_interval,
            self.planted_date.format("%d-%m-%Y"),
            self.last_watering_date.format("%d-%m-%Y"),
        )?;
        if !self.notes.is_empty() {
            write!(f, " - {}", self.notes)?;
        }
        Ok(())
    }
}

fn normalize_name(name: String) -> Result<String, PlantError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlantError::EmptyName);
    }
    check_single_field(trimmed, "name")?;
    Ok(trimmed.to_string())
}

fn normalize_notes(notes: String) -> Result<String, PlantError> {
    let trimmed = notes.trim();
    check_single_field(trimmed, "notes")?;
    Ok(trimmed.to_string())
}

// Tabs separate record fields and line breaks separate records.
fn check_single_field(value: &str, field: &'static str) -> Result<(), PlantError> {
    if value.contains(['\t', '\n', '\r']) {
        return Err(PlantError::ForbiddenCharacter { field });
    }
    Ok(())
}

fn check_interval(watering_interval: i64) -> Result<(), PlantError> {
    if watering_interval <= 0 {
        return Err(PlantError::InvalidInterval(watering_interval));
    }
    Ok(())
}

fn check_date_order(planted: NaiveDate, last_watered: NaiveDate) -> Result<(), PlantError> {
    if planted > last_watered {
        return Err(PlantError::InvalidDateOrder {
            planted,
            last_watered,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fern() -> Plant {
        Plant::new("Fern", 5, "Shady corner", date(2024, 1, 1), date(2024, 3, 10)).unwrap()
    }

    #[test]
    fn new_keeps_supplied_values() {
        let plant = fern();
        assert_eq!(plant.name(), "Fern");
        assert_eq!(plant.watering_interval(), 5);
        assert_eq!(plant.notes(), "Shady corner");
        assert_eq!(plant.planted_date(), date(2024, 1, 1));
        assert_eq!(plant.last_watering_date(), date(2024, 3, 10));
    }

    #[test]
    fn new_accepts_equal_dates() {
        let day = date(2024, 6, 1);
        assert!(Plant::new("Aloe", 1, "", day, day).is_ok());
    }

    #[test]
    fn rejects_non_positive_interval() {
        let day = date(2024, 1, 1);
        for interval in [0, -1, -30, i64::MIN] {
            let err = Plant::new("Aloe", interval, "", day, day).unwrap_err();
            assert_eq!(err, PlantError::InvalidInterval(interval));
        }
        assert_eq!(
            Plant::with_interval("Aloe", -1, day).unwrap_err(),
            PlantError::InvalidInterval(-1)
        );
    }

    #[test]
    fn rejects_planted_after_last_watered() {
        let err = Plant::new("Aloe", 3, "", date(2024, 2, 2), date(2024, 2, 1)).unwrap_err();
        assert!(matches!(err, PlantError::InvalidDateOrder { .. }));
    }

    #[test]
    fn interval_is_checked_before_date_order() {
        let err = Plant::new("Aloe", 0, "", date(2024, 2, 2), date(2024, 2, 1)).unwrap_err();
        assert_eq!(err, PlantError::InvalidInterval(0));
    }

    #[test]
    fn rejects_blank_name_and_trims_padding() {
        let day = date(2024, 1, 1);
        assert_eq!(Plant::with_name("   ", day).unwrap_err(), PlantError::EmptyName);

        let plant = Plant::new("  Fern ", 3, " wet soil ", day, day).unwrap();
        assert_eq!(plant.name(), "Fern");
        assert_eq!(plant.notes(), "wet soil");
    }

    #[test]
    fn rejects_record_separators_in_text_fields() {
        let day = date(2024, 1, 1);
        for name in ["A\nB", "A\r\nB", "A\tB"] {
            assert_eq!(
                Plant::new(name, 3, "", day, day).unwrap_err(),
                PlantError::ForbiddenCharacter { field: "name" }
            );
        }
        assert_eq!(
            Plant::new("Fern", 3, "line one\nline two", day, day).unwrap_err(),
            PlantError::ForbiddenCharacter { field: "notes" }
        );

        let mut plant = Plant::with_name("Fern", day).unwrap();
        assert!(plant.set_name("Fern\nAloe").is_err());
        assert!(plant.set_notes("a\tb").is_err());
        assert_eq!(plant, Plant::with_name("Fern", day).unwrap());

        // A trailing newline is only padding and gets trimmed away.
        assert_eq!(Plant::with_name("Fern\n", day).unwrap().name(), "Fern");
    }

    #[test]
    fn convenience_constructors_use_today() {
        let today = date(2024, 4, 4);
        let plant = Plant::with_name("Cactus", today).unwrap();
        assert_eq!(plant.watering_interval(), DEFAULT_WATERING_INTERVAL_DAYS);
        assert_eq!(plant.notes(), "");
        assert_eq!(plant.planted_date(), today);
        assert_eq!(plant.last_watering_date(), today);

        let plant = Plant::with_interval("Basil", 2, today).unwrap();
        assert_eq!(plant.watering_interval(), 2);
    }

    #[test]
    fn water_now_only_touches_last_watering_date() {
        let mut plant = fern();
        let before = plant.clone();
        plant.water_now(date(2024, 4, 1));

        assert_eq!(plant.last_watering_date(), date(2024, 4, 1));
        assert_eq!(plant.name(), before.name());
        assert_eq!(plant.notes(), before.notes());
        assert_eq!(plant.watering_interval(), before.watering_interval());
        assert_eq!(plant.planted_date(), before.planted_date());
    }

    #[test]
    fn watering_needed_only_strictly_after_next_date() {
        let plant = fern();
        assert_eq!(plant.next_watering_date(), date(2024, 3, 15));
        assert!(!plant.is_watering_needed(date(2024, 3, 14)));
        assert!(!plant.is_watering_needed(date(2024, 3, 15)));
        assert!(plant.is_watering_needed(date(2024, 3, 16)));
    }

    #[test]
    fn next_watering_date_saturates() {
        let day = date(2024, 1, 1);
        let plant = Plant::new("Stone", i64::MAX, "", day, day).unwrap();
        assert_eq!(plant.next_watering_date(), NaiveDate::MAX);
        assert!(!plant.is_watering_needed(date(2500, 1, 1)));
    }

    #[test]
    fn watering_info_suggests_watering_when_due() {
        let plant = fern();
        assert_eq!(
            plant.watering_info(date(2024, 3, 12)),
            "The plant was last watered on 2024-03-10 (2 days ago). Watering interval is 5 days."
        );
        assert_eq!(
            plant.watering_info(date(2024, 3, 20)),
            "The plant was last watered on 2024-03-10 (10 days ago). Watering interval is 5 days. \
             Consider watering now!"
        );
    }

    #[test]
    fn setters_enforce_invariants() {
        let mut plant = fern();
        assert_eq!(plant.set_watering_interval(0), Err(PlantError::InvalidInterval(0)));
        assert_eq!(plant.watering_interval(), 5);

        assert!(plant.set_planted_date(date(2024, 3, 11)).is_err());
        assert!(plant.set_last_watering_date(date(2023, 12, 31)).is_err());
        assert_eq!(plant, fern());

        plant.set_planted_date(date(2024, 3, 10)).unwrap();
        plant.set_name("Boston fern").unwrap();
        plant.set_notes("moved to bathroom").unwrap();
        assert_eq!(plant.name(), "Boston fern");
        assert_eq!(plant.planted_date(), date(2024, 3, 10));
    }

    #[test]
    fn compares_by_name_only() {
        let day = date(2024, 1, 1);
        let a = Plant::new("Aloe", 9, "x", day, day).unwrap();
        let r = Plant::with_name("Rose", day).unwrap();
        let a2 = Plant::with_name("Aloe", day).unwrap();
        assert_eq!(a.cmp_by_name(&r), Ordering::Less);
        assert_eq!(a.cmp_by_name(&a2), Ordering::Equal);
        assert_ne!(a, a2);
    }

    #[test]
    fn display_uses_day_first_dates() {
        assert_eq!(
            fern().to_string(),
            "Fern (every 5 days, planted 01-01-2024, last watered 10-03-2024) - Shady corner"
        );
    }
}
