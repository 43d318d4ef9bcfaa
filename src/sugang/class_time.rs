//! Parsing of the meeting-time strings published by the registration site.
//!
//! Times look like `화(11:00~12:15)`; locations are free-form room labels that
//! line up with the times by position.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::course::ClassPlaceAndTime;
use crate::domain::types::DayOfWeek;

static CLASS_TIME_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"^([월화수목금토일])\((\d{2}):(\d{2})~(\d{2}):(\d{2})\)$")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassTimeError {
    #[error("class time pattern failed to compile")]
    Pattern,
    #[error("malformed class time `{0}`")]
    Malformed(String),
    #[error("class time `{0}` ends before it starts")]
    EmptyInterval(String),
    #[error("{locations} locations do not match {times} class times")]
    LocationMismatch { times: usize, locations: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SlotKey {
    day_weight: u8,
    start_minute: i32,
    end_minute: i32,
}

#[derive(Debug, Clone, Copy)]
struct ParsedTime {
    day: DayOfWeek,
    start_minute: i32,
    end_minute: i32,
}

fn parse_entry(entry: &str) -> Result<ParsedTime, ClassTimeError> {
    let pattern = CLASS_TIME_RE
        .as_ref()
        .map_err(|_| ClassTimeError::Pattern)?;
    let malformed = || ClassTimeError::Malformed(entry.to_string());

    let caps = pattern.captures(entry).ok_or_else(malformed)?;
    let day = DayOfWeek::from_korean(&caps[1]).ok_or_else(malformed)?;
    let number = |idx: usize| caps[idx].parse::<i32>().map_err(|_| malformed());

    let start_minute = number(2)? * 60 + number(3)?;
    let end_minute = number(4)? * 60 + number(5)?;
    if end_minute <= start_minute {
        return Err(ClassTimeError::EmptyInterval(entry.to_string()));
    }

    Ok(ParsedTime {
        day,
        start_minute,
        end_minute,
    })
}

/// Strict variant of [`parse_class_times`] that reports why the input was
/// rejected.
pub fn try_parse_class_times<S: AsRef<str>>(
    times: &[S],
    locations: &[S],
) -> Result<Vec<ClassPlaceAndTime>, ClassTimeError> {
    let parsed = times
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(parse_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let places: Vec<&str> = match locations.len() {
        n if n == parsed.len() => locations.iter().map(AsRef::as_ref).collect(),
        1 => vec![locations[0].as_ref(); parsed.len()],
        0 => vec![""; parsed.len()],
        n => {
            return Err(ClassTimeError::LocationMismatch {
                times: parsed.len(),
                locations: n,
            });
        }
    };

    let mut grouped: BTreeMap<SlotKey, (DayOfWeek, Vec<&str>)> = BTreeMap::new();
    for (time, place) in parsed.iter().zip(places) {
        let key = SlotKey {
            day_weight: time.day.weight(),
            start_minute: time.start_minute,
            end_minute: time.end_minute,
        };
        grouped
            .entry(key)
            .or_insert_with(|| (time.day, Vec::new()))
            .1
            .push(place);
    }

    Ok(grouped
        .into_iter()
        .map(|(key, (day, places))| ClassPlaceAndTime {
            day,
            place: places.join("/"),
            start_minute: key.start_minute,
            end_minute: key.end_minute,
        })
        .collect())
}

/// Turns parallel lists of time strings and room labels into meeting slots.
///
/// Blank time entries are ignored. A single location applies to every time
/// and no locations yields empty places. Slots sharing day, start and end are
/// merged with their places joined by `/`. The result is ordered by weekday
/// and start time. Any malformed input is logged and produces an empty list.
pub fn parse_class_times<S: AsRef<str>>(times: &[S], locations: &[S]) -> Vec<ClassPlaceAndTime> {
    match try_parse_class_times(times, locations) {
        Ok(slots) => slots,
        Err(e) => {
            let times: Vec<&str> = times.iter().map(AsRef::as_ref).collect();
            let locations: Vec<&str> = locations.iter().map(AsRef::as_ref).collect();
            log::error!("Failed to parse class times {times:?} at {locations:?}: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_sorts_by_day_then_start() {
        let slots = parse_class_times(
            &["목(14:00~15:15)", "화(14:00~15:15)"],
            &["301-118", "301-118"],
        );

        assert_eq!(
            slots,
            vec![
                ClassPlaceAndTime {
                    day: DayOfWeek::Tuesday,
                    place: "301-118".to_string(),
                    start_minute: 840,
                    end_minute: 915,
                },
                ClassPlaceAndTime {
                    day: DayOfWeek::Thursday,
                    place: "301-118".to_string(),
                    start_minute: 840,
                    end_minute: 915,
                },
            ]
        );
    }

    #[test]
    fn single_location_is_broadcast() {
        let slots = parse_class_times(&["월(09:00~10:15)", "수(09:00~10:15)"], &["43-1-101"]);
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|s| s.place == "43-1-101"));
    }

    #[test]
    fn missing_locations_become_empty_places() {
        let slots = parse_class_times::<&str>(&["금(13:00~14:50)"], &[]);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].place, "");
    }

    #[test]
    fn identical_slots_merge_places() {
        let slots = parse_class_times(
            &["월(10:00~11:50)", "월(10:00~11:50)"],
            &["302-208", "302-209"],
        );
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].place, "302-208/302-209");
    }

    #[test]
    fn blank_entries_are_skipped() {
        let slots = parse_class_times(&["", "화(11:00~12:15)", " "], &["026-101"]);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start_minute, 660);
    }

    #[test]
    fn split_of_empty_cells_yields_no_slots() {
        let times: Vec<&str> = "".split('/').collect();
        let locations: Vec<&str> = "".split('/').collect();
        assert!(parse_class_times(&times, &locations).is_empty());
    }

    #[test]
    fn malformed_entry_yields_empty_list() {
        assert!(parse_class_times(&["월요일 3교시"], &["301-101"]).is_empty());
        assert!(matches!(
            try_parse_class_times(&["월요일 3교시"], &["301-101"]),
            Err(ClassTimeError::Malformed(_))
        ));
    }

    #[test]
    fn location_count_mismatch_yields_empty_list() {
        let result = try_parse_class_times(&["월(09:00~10:00)"], &["a", "b", "c"]);
        assert_eq!(
            result,
            Err(ClassTimeError::LocationMismatch {
                times: 1,
                locations: 3
            })
        );
        assert!(parse_class_times(&["월(09:00~10:00)"], &["a", "b", "c"]).is_empty());
    }

    #[test]
    fn end_not_after_start_is_rejected() {
        assert!(matches!(
            try_parse_class_times(&["화(12:00~12:00)"], &["x"]),
            Err(ClassTimeError::EmptyInterval(_))
        ));
    }
}
