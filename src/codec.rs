//! Tab-separated row format for [`Plant`] records.
//!
//! One plant per line, five fields in fixed order:
//!
//! ```text
//! name<TAB>notes<TAB>watering_interval_days<TAB>last_watering_date<TAB>planted_date
//! ```
//!
//! Dates are ISO calendar dates written exactly as `YYYY-MM-DD`: four-digit
//! year, zero-padded month and day. Shorter forms such as `2024-1-5` and
//! signed or five-digit years are rejected, so dates outside years
//! 0000..=9999 cannot be stored. There is no escaping; [`Plant`] refuses
//! tabs and line breaks in `name` and `notes` so every plant fits one row.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Plant, PlantError};

pub const DELIMITER: char = '\t';
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a row could not be turned into a [`Plant`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("expected 5 fields, found {count}: {line:?}")]
    MalformedRow { count: usize, line: String },

    #[error("watering interval is not a number: {line:?}")]
    InvalidInterval { line: String },

    #[error("failed to parse date in {line:?}: {detail}")]
    InvalidDate { line: String, detail: String },

    #[error("row is not valid UTF-8: {line:?}")]
    InvalidEncoding { line: String },

    #[error("row does not describe a valid plant {line:?}: {source}")]
    InvalidPlantState {
        line: String,
        #[source]
        source: PlantError,
    },
}

/// Converts plants to and from record rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlantRecordCodec;

impl PlantRecordCodec {
    /// Render `plant` as a single row (no trailing newline).
    pub fn serialize(plant: &Plant) -> String {
        format!(
            "{name}{d}{notes}{d}{interval}{d}{watered}{d}{planted}",
            name = plant.name(),
            notes = plant.notes(),
            interval = plant.watering_interval(),
            watered = plant.last_watering_date().format(DATE_FORMAT),
            planted = plant.planted_date().format(DATE_FORMAT),
            d = DELIMITER,
        )
    }

    /// Parse one row read as raw bytes, rejecting invalid UTF-8.
    pub fn deserialize_bytes(line: &[u8]) -> Result<Plant, DecodeError> {
        let line = std::str::from_utf8(line).map_err(|_| DecodeError::InvalidEncoding {
            line: String::from_utf8_lossy(line).into_owned(),
        })?;
        Self::deserialize(line)
    }

    /// Parse one row. Every field is trimmed before use.
    pub fn deserialize(line: &str) -> Result<Plant, DecodeError> {
        let fields: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
        let &[name, notes, interval, last_watered, planted] = fields.as_slice() else {
            return Err(DecodeError::MalformedRow {
                count: fields.len(),
                line: line.to_string(),
            });
        };

        let watering_interval: i64 = interval.parse().map_err(|_| DecodeError::InvalidInterval {
            line: line.to_string(),
        })?;
        let last_watering_date = parse_date(last_watered, line)?;
        let planted_date = parse_date(planted, line)?;

        Plant::new(name, watering_interval, notes, planted_date, last_watering_date).map_err(
            |source| DecodeError::InvalidPlantState {
                line: line.to_string(),
                source,
            },
        )
    }
}

fn parse_date(field: &str, line: &str) -> Result<NaiveDate, DecodeError> {
    if !is_iso_date_shape(field) {
        return Err(DecodeError::InvalidDate {
            line: line.to_string(),
            detail: format!("expected YYYY-MM-DD, got {field:?}"),
        });
    }
    NaiveDate::parse_from_str(field, DATE_FORMAT).map_err(|e| DecodeError::InvalidDate {
        line: line.to_string(),
        detail: e.to_string(),
    })
}

fn is_iso_date_shape(field: &str) -> bool {
    let bytes = field.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn serialize_uses_fixed_field_order() {
        let plant = Plant::new("Fern", 7, "Shady", date(2023, 12, 24), date(2024, 1, 5)).unwrap();
        assert_eq!(
            PlantRecordCodec::serialize(&plant),
            "Fern\tShady\t7\t2024-01-05\t2023-12-24"
        );
    }

    #[test]
    fn serialize_keeps_empty_notes_as_a_field() {
        let plant = Plant::with_interval("Aloe", 14, date(2024, 2, 29)).unwrap();
        assert_eq!(
            PlantRecordCodec::serialize(&plant),
            "Aloe\t\t14\t2024-02-29\t2024-02-29"
        );
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let plants = [
            Plant::new("Fern", 7, "Shady", date(2023, 12, 24), date(2024, 1, 5)).unwrap(),
            Plant::new("Monstera deliciosa", 10, "", date(2020, 1, 1), date(2020, 1, 1)).unwrap(),
            Plant::new("Ficus", 365, "repot in spring", date(1999, 6, 30), date(2024, 2, 29)).unwrap(),
        ];
        for plant in plants {
            let row = PlantRecordCodec::serialize(&plant);
            assert_eq!(PlantRecordCodec::deserialize(&row).unwrap(), plant);
        }
    }

    #[test]
    fn trims_padded_fields() {
        let plant = PlantRecordCodec::deserialize(" Fern \t Shady \t 7 \t2024-01-05 \t 2023-12-24\r")
            .unwrap();
        assert_eq!(plant.name(), "Fern");
        assert_eq!(plant.notes(), "Shady");
        assert_eq!(plant.watering_interval(), 7);
        assert_eq!(plant.last_watering_date(), date(2024, 1, 5));
        assert_eq!(plant.planted_date(), date(2023, 12, 24));
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let err = PlantRecordCodec::deserialize("OnlyName\tOnlyNotes").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedRow {
                count: 2,
                line: "OnlyName\tOnlyNotes".to_string(),
            }
        );

        let err = PlantRecordCodec::deserialize("a\tb\t1\t2024-01-01\t2024-01-01\textra").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedRow { count: 6, .. }));

        let err = PlantRecordCodec::deserialize("").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedRow { count: 1, .. }));
    }

    #[test]
    fn non_numeric_interval_is_rejected() {
        let line = "Fern\tShady\tNotANumber\t2024-01-01\t2024-01-01";
        let err = PlantRecordCodec::deserialize(line).unwrap_err();
        assert_eq!(err, DecodeError::InvalidInterval { line: line.to_string() });
        assert!(err.to_string().contains("NotANumber"));
    }

    #[test]
    fn impossible_date_is_rejected() {
        let err = PlantRecordCodec::deserialize("Fern\tShady\t7\t2024-13-40\t2024-01-01").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidDate { .. }));

        let err = PlantRecordCodec::deserialize("Fern\tShady\t7\t2024-01-01\t01.01.2024").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidDate { .. }));
    }

    #[test]
    fn dates_must_be_zero_padded_four_digit_years() {
        for bad in ["2024-1-5", "2024-01-5", "+2024-01-05", "12024-01-05", "2024/01/05"] {
            let line = format!("Fern\tShady\t7\t{bad}\t2024-01-01");
            let err = PlantRecordCodec::deserialize(&line).unwrap_err();
            assert!(
                matches!(err, DecodeError::InvalidDate { .. }),
                "{bad} should be rejected, got {err:?}"
            );
        }

        let plant = PlantRecordCodec::deserialize("Fern\tShady\t7\t0999-12-31\t0999-01-01").unwrap();
        assert_eq!(plant.last_watering_date(), date(999, 12, 31));
        assert_eq!(
            PlantRecordCodec::serialize(&plant),
            "Fern\tShady\t7\t0999-12-31\t0999-01-01"
        );
    }

    #[test]
    fn invalid_utf8_row_is_an_encoding_error() {
        let err = PlantRecordCodec::deserialize_bytes(b"Bad\xff\tx\t7\t2024-01-01\t2024-01-01")
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding { ref line } if line.starts_with("Bad")));

        let plant = PlantRecordCodec::deserialize_bytes("Kapradina\tstín\t7\t2024-01-01\t2024-01-01".as_bytes())
            .unwrap();
        assert_eq!(plant.notes(), "stín");
    }

    #[test]
    fn entity_violations_become_invalid_plant_state() {
        let err = PlantRecordCodec::deserialize("Fern\tShady\t-3\t2024-01-01\t2024-01-01").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidPlantState {
                source: PlantError::InvalidInterval(-3),
                ..
            }
        ));

        let err = PlantRecordCodec::deserialize("Fern\tShady\t3\t2024-01-01\t2024-02-01").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidPlantState {
                source: PlantError::InvalidDateOrder { .. },
                ..
            }
        ));
    }
}
