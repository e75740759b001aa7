//! Versioned JSON envelope around a schedule.

use serde::{Deserialize, Serialize};
use xbtv_model::Schedule;

use super::FORMAT_VERSION;
use crate::error::{ParseError, PersistenceError, Result};

/// File layout, as written.
#[derive(Serialize)]
struct ScheduleFileRef<'a> {
    version: u32,
    schedule: &'a Schedule,
}

/// File layout, as read. Name validation happens in `Schedule`'s own
/// `Deserialize`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScheduleFile {
    #[serde(rename = "version")]
    _version: u32,
    schedule: Schedule,
}

/// Only the version, read first so a newer file is reported as such rather
/// than as malformed.
#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

/// Encode a schedule as an `.xbtv` document (pretty JSON, trailing newline).
pub fn serialize_schedule(schedule: &Schedule) -> Result<String> {
    let file = ScheduleFileRef {
        version: FORMAT_VERSION,
        schedule,
    };
    let mut text = serde_json::to_string_pretty(&file)
        .map_err(|source| PersistenceError::Serialization { source })?;
    text.push('\n');
    Ok(text)
}

/// Decode an `.xbtv` document.
pub fn parse_schedule(input: &str) -> std::result::Result<Schedule, ParseError> {
    parse_schedule_bytes(input.as_bytes())
}

/// Decode an `.xbtv` document from raw file bytes; invalid UTF-8 is a
/// syntax error at its position.
pub(crate) fn parse_schedule_bytes(bytes: &[u8]) -> std::result::Result<Schedule, ParseError> {
    let header: VersionHeader = serde_json::from_slice(bytes)?;
    if header.version > FORMAT_VERSION {
        return Err(ParseError::unsupported_version(
            header.version,
            FORMAT_VERSION,
        ));
    }

    let file: ScheduleFile = serde_json::from_slice(bytes)?;
    Ok(file.schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use xbtv_model::Program;

    #[test]
    fn test_serialized_layout() {
        let mut schedule = Schedule::new("Evening block").unwrap();
        schedule.push(Program::new("local", "/foo/bar/baz"));

        let text = serialize_schedule(&schedule).unwrap();
        assert!(text.ends_with("}\n"));
        insta::assert_snapshot!(text.trim_end(), @r#"
        {
          "version": 1,
          "schedule": {
            "name": "Evening block",
            "programs": [
              {
                "source": "local",
                "location": "/foo/bar/baz"
              }
            ]
          }
        }
        "#);
    }

    #[test]
    fn test_parse_round_trip() {
        let schedule = Schedule::with_programs(
            "Quotes \"and\" \\slashes",
            vec![Program::new("lo\tcal", "line1\nline2"), Program::new("", "")],
        )
        .unwrap();

        let text = serialize_schedule(&schedule).unwrap();
        assert_eq!(parse_schedule(&text).unwrap(), schedule);
    }

    #[test]
    fn test_newer_version_is_reported_before_shape() {
        let err = parse_schedule(r#"{"version": 2, "layout": "unknown"}"#).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnsupportedVersion {
                found: 2,
                max_supported: 1
            }
        );
    }

    #[test]
    fn test_missing_version_is_invalid() {
        let err = parse_schedule(r#"{"schedule": {"name": "a", "programs": []}}"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSchedule);
        assert!(err.message.contains("version"));
    }

    #[test]
    fn test_blank_name_is_invalid() {
        let err = parse_schedule(
            "{\n  \"version\": 1,\n  \"schedule\": {\"name\": \" \", \"programs\": []}\n}",
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSchedule);
        assert!(err.message.contains("name must not be empty"));
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = parse_schedule(
            r#"{"version": 1, "schedule": {"name": "a", "programs": []}, "extra": true}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSchedule);

        let err = parse_schedule(
            r#"{"version": 1, "schedule": {"name": "a", "programs": [{"source": "s", "location": "l", "loop": true}]}}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSchedule);
    }

    #[test]
    fn test_truncated_document() {
        let err = parse_schedule(r#"{"version": 1, "schedule": {"name": "a""#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }
}
