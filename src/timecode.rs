use crate::errors::TimecodeError;

// @module: Cue and ASS timestamp conversion

/// Parse a cue timestamp (`HH:MM:SS.mmm`) to milliseconds
pub fn parse_timestamp(timestamp: &str) -> Result<i64, TimecodeError> {
    let timestamp = timestamp.trim();
    let (clock, millis) = timestamp
        .split_once('.')
        .ok_or_else(|| TimecodeError::InvalidFormat(timestamp.to_string()))?;

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 {
        return Err(TimecodeError::InvalidFormat(timestamp.to_string()));
    }

    let field = |name: &'static str, value: &str| -> Result<i64, TimecodeError> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimecodeError::InvalidField {
                field: name,
                timestamp: timestamp.to_string(),
            });
        }
        value.parse().map_err(|_| TimecodeError::InvalidField {
            field: name,
            timestamp: timestamp.to_string(),
        })
    };

    // Digit-only fields can still be too large for the millisecond total
    let scaled = |name: &'static str, value: &str, unit: i64| -> Result<i64, TimecodeError> {
        field(name, value)?
            .checked_mul(unit)
            .ok_or_else(|| TimecodeError::InvalidField {
                field: name,
                timestamp: timestamp.to_string(),
            })
    };

    let hours = scaled("hours", parts[0], 3_600_000)?;
    let minutes = scaled("minutes", parts[1], 60_000)?;
    let seconds = scaled("seconds", parts[2], 1_000)?;
    let millis = field("milliseconds", millis)?;

    [minutes, seconds, millis]
        .into_iter()
        .try_fold(hours, i64::checked_add)
        .ok_or_else(|| TimecodeError::InvalidFormat(timestamp.to_string()))
}

/// Format milliseconds as a cue timestamp (HH:MM:SS.mmm)
pub fn format_cue_timestamp(ms: i64) -> String {
    let ms = ms.max(0);
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Format milliseconds as an ASS timestamp (H:MM:SS.cc)
///
/// Negative times are clamped to zero, centiseconds are rounded.
pub fn format_ass_timestamp(ms: i64) -> String {
    let centis = (ms.max(0) + 5) / 10;
    let hours = centis / 360_000;
    let minutes = (centis % 360_000) / 6_000;
    let seconds = (centis % 6_000) / 100;
    let centis = centis % 100;

    format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis)
}
