/*!
 * Tests for timestamp parsing and formatting
 */

use hidisub::errors::TimecodeError;
use hidisub::timecode::{format_ass_timestamp, format_cue_timestamp, parse_timestamp};

/// Test the documented example timestamp
#[test]
fn test_parse_timestamp_withDocumentedExample_shouldReturnMillis() {
    assert_eq!(parse_timestamp("01:02:03.456"), Ok(3_723_456));
}

/// Test that surrounding whitespace is ignored
#[test]
fn test_parse_timestamp_withPadding_shouldTrim() {
    assert_eq!(parse_timestamp("  00:00:04.963 "), Ok(4_963));
}

/// Test that a comma separator (SRT style) is rejected
#[test]
fn test_parse_timestamp_withCommaSeparator_shouldFail() {
    assert!(matches!(
        parse_timestamp("00:00:01,000"),
        Err(TimecodeError::InvalidFormat(_))
    ));
}

/// Test that a missing hour field is rejected
#[test]
fn test_parse_timestamp_withTwoClockFields_shouldFail() {
    assert!(parse_timestamp("00:01.000").is_err());
}

/// Test formatting back to the cue layout
#[test]
fn test_format_cue_timestamp_withParsedValue_shouldRoundTrip() {
    for timestamp in ["00:00:00.000", "01:02:03.456", "10:59:59.999"] {
        let ms = parse_timestamp(timestamp).unwrap();
        assert_eq!(format_cue_timestamp(ms), timestamp);
    }
}

/// Test ASS timestamps with rounding and clamping
#[test]
fn test_format_ass_timestamp_shouldRoundAndClamp() {
    assert_eq!(format_ass_timestamp(3_723_456), "1:02:03.46");
    assert_eq!(format_ass_timestamp(5_037), "0:00:05.04");
    assert_eq!(format_ass_timestamp(-100), "0:00:00.00");
}

/// Test that a digit-only but oversized field is a format error, not a panic
#[test]
fn test_scan_withOversizedTimestamp_shouldReturnTimecodeError() {
    use hidisub::cue_scanner::{CueTrack, RoleSet};
    use hidisub::errors::ConversionError;

    let content = "Subtitle-C1_1\n99999999999999:00:00.000 --> 00:00:02.000\n<c.Subtitle-C1_1>x</c>\n";
    let roles = RoleSet::discover(content);

    let err = CueTrack::scan(content, &roles).unwrap_err();

    assert!(matches!(
        err,
        ConversionError::Timecode {
            line: 2,
            source: TimecodeError::InvalidField { field: "hours", .. }
        }
    ));
}
