use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::errors::ConversionError;
use crate::timecode;

// @module: Cue track scanning and role discovery

/// Role of the plain dialogue cues; it never gets a style of its own
pub const BODY_ROLE: &str = "Subtitle";

/// Role of on-screen text captions, positioned absolutely
pub const CAPTION_ROLE: &str = "Caption";

/// Role of song lyrics
pub const SONG_ROLE: &str = "Song";

// @const: Styling span class carrying the role, e.g. <c.Caption-C12_1>
static ROLE_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<c\.([^>\s]*?)-C[0-9]+_[1-9]").unwrap()
});

// @const: Inner text of the first styled span on a line
static SPAN_TEXT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<c(?:\.[^>]*)?>(.+?)</c(?:\.[^>]*)?>").unwrap()
});

// @const: Cue setting hints on the timing line
static POSITION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"position:(\d+(?:\.\d+)?)").unwrap()
});

static LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"line:(\d+(?:\.\d+)?)").unwrap()
});

/// Set of role prefixes used by a track
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeSet<String>,
}

impl RoleSet {
    /// Discover the roles used by a track from its styling spans
    pub fn discover(content: &str) -> Self {
        let roles: BTreeSet<String> = ROLE_SPAN_REGEX
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|role| !role.is_empty())
            .collect();

        debug!("Discovered {} role(s): {:?}", roles.len(), roles);
        Self { roles }
    }

    /// Build a role set from explicit role names
    pub fn from_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Roles in a stable (sorted) order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }

    /// Whether a line is a cue header of one of the roles
    pub fn matches_header(&self, line: &str) -> bool {
        self.roles.iter().any(|role| line.starts_with(role.as_str()))
    }

    /// Whether any role name occurs inside `text`
    pub fn referenced_in(&self, text: &str) -> bool {
        self.roles.iter().any(|role| text.contains(role.as_str()))
    }

    /// Roles that get a style registration of their own
    pub fn styled_roles(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|role| !role.contains(BODY_ROLE))
    }
}

/// Placement hints from the cue timing line, in percent of the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CueLayout {
    pub position: Option<f64>,
    pub line: Option<f64>,
}

impl CueLayout {
    fn parse(timing_line: &str) -> Self {
        let capture = |regex: &Regex| {
            regex
                .captures(timing_line)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
        };
        Self {
            position: capture(&*POSITION_REGEX),
            line: capture(&*LINE_REGEX),
        }
    }
}

// @struct: Single converted event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    // @field: Text, possibly starting with an override block
    pub text: String,

    // @field: Start time in ms
    pub start_ms: i64,

    // @field: End time in ms
    pub end_ms: i64,

    // @field: Style name
    pub style: String,

    // @field: Header ordinal is not 1
    pub is_continuation: bool,

    // @field: Placement hints of the source cue
    pub layout: CueLayout,
}

impl Event {
    /// Creates a new event in the default style
    pub fn new(start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        Event {
            text: text.into(),
            start_ms,
            end_ms,
            style: crate::ass_document::DEFAULT_STYLE.to_string(),
            is_continuation: false,
            layout: CueLayout::default(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_continuation(mut self, is_continuation: bool) -> Self {
        self.is_continuation = is_continuation;
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{} --> {}] ({}) {}",
            timecode::format_cue_timestamp(self.start_ms),
            timecode::format_cue_timestamp(self.end_ms),
            self.style,
            self.text
        )
    }
}

/// One header/timing/text triple, borrowed from the track lines
#[derive(Debug, Clone, Copy)]
pub struct CueBlock<'a> {
    /// 1-based line number of the header
    pub line_no: usize,
    pub header: &'a str,
    pub timing: &'a str,
    pub text: &'a str,
}

impl<'a> CueBlock<'a> {
    /// Turn the block into an event in the default style
    pub fn into_event(self) -> Result<Event, ConversionError> {
        let timing_line_no = self.line_no + 1;
        let tokens: Vec<&str> = self.timing.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(ConversionError::format(
                timing_line_no,
                format!("expected '<start> --> <end>', found '{}'", self.timing.trim()),
            ));
        }

        let parse = |token: &str| {
            timecode::parse_timestamp(token).map_err(|source| ConversionError::Timecode {
                line: timing_line_no,
                source,
            })
        };
        let start_ms = parse(tokens[0])?;
        let end_ms = parse(tokens[2])?;

        let text = SPAN_TEXT_REGEX
            .captures(self.text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                ConversionError::format(
                    self.line_no + 2,
                    format!("expected a styled span, found '{}'", self.text.trim()),
                )
            })?;

        Ok(Event {
            text,
            start_ms,
            end_ms,
            style: crate::ass_document::DEFAULT_STYLE.to_string(),
            is_continuation: header_ordinal(self.header).is_some_and(|n| n != 1),
            layout: CueLayout::parse(self.timing),
        })
    }
}

/// Numeric suffix of a cue header, e.g. 2 for `Subtitle-C12_2`.
///
/// The whole trailing number counts, so `_11` is ordinal 11 and continues its
/// group. A header without trailing digits has no ordinal and starts a group.
pub fn header_ordinal(header: &str) -> Option<u32> {
    let header = header.trim_end();
    let digits_start = header
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    header[digits_start..].parse().ok()
}

/// Events of a track together with their header names
#[derive(Debug, Clone, Default)]
pub struct CueTrack {
    /// Events in track order
    pub events: Vec<Event>,

    /// Header of each event, parallel to `events`
    pub names: Vec<String>,

    /// Header name to the indices of every event carrying it, in track order
    name_index: HashMap<String, Vec<usize>>,
}

impl CueTrack {
    /// Scan the track lines for cue blocks of the given roles
    pub fn scan(content: &str, roles: &RoleSet) -> Result<Self, ConversionError> {
        let lines: Vec<&str> = content.lines().collect();
        let mut track = CueTrack::default();

        if roles.is_empty() {
            warn!("No cue roles found in track, nothing to convert");
            return Ok(track);
        }

        let mut idx = 0;
        while idx < lines.len() {
            let line = lines[idx];
            if !roles.matches_header(line) {
                idx += 1;
                continue;
            }

            let line_no = idx + 1;
            let (Some(timing), Some(text)) =
                (lines.get(idx + 1).copied(), lines.get(idx + 2).copied())
            else {
                return Err(ConversionError::format(
                    line_no,
                    format!("cue '{}' is missing its timing or text line", line.trim()),
                ));
            };

            let block = CueBlock {
                line_no,
                header: line.trim(),
                timing,
                text,
            };
            let event = block.into_event()?;
            track.push(block.header, event);
            idx += 3;
        }

        debug!("Scanned {} cue(s)", track.events.len());
        Ok(track)
    }

    /// Append an event under a header name
    pub fn push(&mut self, name: impl Into<String>, event: Event) {
        let name = name.into();
        self.name_index
            .entry(name.clone())
            .or_default()
            .push(self.events.len());
        self.names.push(name);
        self.events.push(event);
    }

    /// Indices of the events with this header name; empty when there are none
    pub fn indices_of(&self, name: &str) -> &[usize] {
        self.name_index.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
