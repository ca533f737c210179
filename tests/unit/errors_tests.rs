/*!
 * Tests for error types
 */

use hidisub::errors::{AppError, ConversionError, TimecodeError};

/// Test that format errors carry the line number in their message
#[test]
fn test_conversion_error_format_shouldIncludeLine() {
    let err = ConversionError::format(7, "expected a styled span");
    assert_eq!(err.to_string(), "Format error at line 7: expected a styled span");
    assert!(!err.is_config());
}

/// Test that timestamp errors keep their source
#[test]
fn test_conversion_error_timecode_shouldExposeSource() {
    let err = ConversionError::Timecode {
        line: 3,
        source: TimecodeError::InvalidFormat("1:2".to_string()),
    };
    assert!(err.to_string().contains("line 3"));
    assert!(std::error::Error::source(&err).is_some());
}

/// Test conversions into the application error
#[test]
fn test_app_error_from_conversions_shouldPickVariant() {
    let app: AppError = ConversionError::Config("bad".to_string()).into();
    assert!(matches!(app, AppError::Conversion(ref e) if e.is_config()));

    let app: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("other").into();
    assert!(matches!(app, AppError::Unknown(_)));
}
