/*!
 * ASS document model and serialization.
 *
 * The document holds the script info pairs, the style registrations and the
 * final event list. `DocumentAssembler` registers the role styles before the
 * events are styled and finishes the document (metadata, bumper shift) after
 * the merge pass.
 */

use log::debug;
use std::fmt;

use crate::app_config::ConversionConfig;
use crate::cue_scanner::{Event, RoleSet, CAPTION_ROLE, SONG_ROLE};
use crate::errors::ConversionError;
use crate::timecode;

/// Name of the default body style
pub const DEFAULT_STYLE: &str = "Default";

/// Name of the style for cues placed in the upper part of the screen
pub const TOP_STYLE: &str = "Top";

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, \
OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Numpad alignment of a style
pub mod alignment {
    pub const BOTTOM_CENTER: u8 = 2;
    pub const TOP_CENTER: u8 = 8;
}

/// Style registration for ASS output
#[derive(Debug, Clone, PartialEq)]
pub struct AssStyle {
    /// Style name
    pub name: String,
    /// Font name
    pub font_name: String,
    /// Font size
    pub font_size: f64,
    /// Primary color (&HAABBGGRR)
    pub primary_color: String,
    /// Secondary (karaoke) color
    pub secondary_color: String,
    /// Outline color
    pub outline_color: String,
    /// Shadow color
    pub back_color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike_out: bool,
    pub scale_x: f64,
    pub scale_y: f64,
    pub spacing: f64,
    pub angle: f64,
    /// 1 = outline and drop shadow, 3 = opaque box
    pub border_style: u8,
    /// Outline width
    pub outline: f64,
    /// Shadow depth
    pub shadow: f64,
    /// Alignment (numpad style: 1-9)
    pub alignment: u8,
    pub margin_l: i32,
    pub margin_r: i32,
    pub margin_v: i32,
    pub encoding: i32,
}

impl Default for AssStyle {
    fn default() -> Self {
        Self {
            name: DEFAULT_STYLE.to_string(),
            font_name: "Arial".to_string(),
            font_size: 20.0,
            primary_color: "&H00FFFFFF".to_string(),
            secondary_color: "&H000000FF".to_string(),
            outline_color: "&H00000000".to_string(),
            back_color: "&H00000000".to_string(),
            bold: false,
            italic: false,
            underline: false,
            strike_out: false,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
            angle: 0.0,
            border_style: 1,
            outline: 2.0,
            shadow: 2.0,
            alignment: alignment::BOTTOM_CENTER,
            margin_l: 10,
            margin_r: 10,
            margin_v: 10,
            encoding: 1,
        }
    }
}

impl AssStyle {
    /// Copy of this style under another name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for AssStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let flag = |value: bool| if value { -1 } else { 0 };
        write!(
            f,
            "Style: {},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.name,
            self.font_name,
            format_number(self.font_size),
            self.primary_color,
            self.secondary_color,
            self.outline_color,
            self.back_color,
            flag(self.bold),
            flag(self.italic),
            flag(self.underline),
            flag(self.strike_out),
            format_number(self.scale_x),
            format_number(self.scale_y),
            format_number(self.spacing),
            format_number(self.angle),
            self.border_style,
            format_number(self.outline),
            format_number(self.shadow),
            self.alignment,
            self.margin_l,
            self.margin_r,
            self.margin_v,
            self.encoding
        )
    }
}

/// Format a number without a trailing `.0` when it is integral
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// An ASS subtitle document
#[derive(Debug, Clone)]
pub struct AssDocument {
    info: Vec<(String, String)>,
    styles: Vec<AssStyle>,
    /// Events in output order
    pub events: Vec<Event>,
}

impl Default for AssDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl AssDocument {
    /// Create a document with the default style and the standard script info
    pub fn new() -> Self {
        let mut doc = Self {
            info: Vec::new(),
            styles: vec![AssStyle::default()],
            events: Vec::new(),
        };
        doc.set_info("WrapStyle", "0");
        doc.set_info("ScaledBorderAndShadow", "yes");
        doc.set_info("Collisions", "Normal");
        doc.set_info("ScriptType", "v4.00+");
        doc
    }

    /// Set a script info value, keeping the position of an existing key
    pub fn set_info(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.info.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.info.push((key, value)),
        }
    }

    pub fn info(&self, key: &str) -> Option<&str> {
        self.info
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Register a style, replacing one with the same name
    pub fn add_style(&mut self, style: AssStyle) {
        match self.styles.iter_mut().find(|s| s.name == style.name) {
            Some(existing) => *existing = style,
            None => self.styles.push(style),
        }
    }

    pub fn style(&self, name: &str) -> Option<&AssStyle> {
        self.styles.iter().find(|s| s.name == name)
    }

    pub fn style_mut(&mut self, name: &str) -> Option<&mut AssStyle> {
        self.styles.iter_mut().find(|s| s.name == name)
    }

    pub fn styles(&self) -> &[AssStyle] {
        &self.styles
    }

    /// Registered font size of a style, falling back to the default style
    pub fn font_size_of(&self, style: &str) -> f64 {
        self.style(style)
            .or_else(|| self.style(DEFAULT_STYLE))
            .map(|s| s.font_size)
            .unwrap_or_else(|| AssStyle::default().font_size)
    }

    /// Move every event earlier by `offset_ms`
    pub fn shift(&mut self, offset_ms: i64) {
        for event in &mut self.events {
            event.start_ms -= offset_ms;
            event.end_ms -= offset_ms;
        }
    }
}

impl fmt::Display for AssDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[Script Info]")?;
        writeln!(f, "; Script generated by hidisub")?;
        for (key, value) in &self.info {
            writeln!(f, "{}: {}", key, value)?;
        }
        writeln!(f)?;

        writeln!(f, "[V4+ Styles]")?;
        writeln!(f, "{}", STYLE_FORMAT)?;
        for style in &self.styles {
            writeln!(f, "{}", style)?;
        }
        writeln!(f)?;

        writeln!(f, "[Events]")?;
        writeln!(f, "{}", EVENT_FORMAT)?;
        for event in &self.events {
            writeln!(
                f,
                "Dialogue: 0,{},{},{},,0,0,0,,{}",
                timecode::format_ass_timestamp(event.start_ms),
                timecode::format_ass_timestamp(event.end_ms),
                event.style,
                event.text.replace('\n', "\\N")
            )?;
        }
        Ok(())
    }
}

/// Builds the style set of a document and finishes it after the merge pass
pub struct DocumentAssembler<'a> {
    config: &'a ConversionConfig,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self { config }
    }

    /// Create a document with the Default, Top and per-role styles registered
    pub fn with_styles(&self, roles: &RoleSet) -> AssDocument {
        let mut doc = AssDocument::new();

        let default = AssStyle {
            shadow: 0.0,
            outline: 1.0,
            font_size: self.config.default_font_size,
            ..AssStyle::default()
        };
        doc.add_style(default.clone());
        doc.add_style(AssStyle {
            alignment: alignment::TOP_CENTER,
            font_size: self.config.top_font_size,
            ..default.renamed(TOP_STYLE)
        });

        for role in roles.styled_roles() {
            doc.add_style(default.renamed(role));
        }

        if let Some(caption) = doc.style_mut(CAPTION_ROLE) {
            caption.shadow = self.config.caption_shadow;
        }
        if let Some(song) = doc.style_mut(SONG_ROLE) {
            song.font_size = self.config.song_font_size;
        }

        debug!("Registered {} style(s)", doc.styles().len());
        doc
    }

    /// Attach the merged events, set the output metadata and apply the bumper shift
    pub fn finish(
        &self,
        mut doc: AssDocument,
        events: Vec<Event>,
        remove_bumper: bool,
    ) -> Result<AssDocument, ConversionError> {
        doc.events = events;
        doc.set_info("PlayResX", self.config.play_res_x.to_string());
        doc.set_info("PlayResY", self.config.play_res_y.to_string());
        doc.set_info("YCbCr Matrix", "TV.709");

        if remove_bumper {
            let offset = self
                .config
                .bumper_offset_ms()
                .map_err(|e| ConversionError::Config(e.to_string()))?;
            debug!("Removing {}ms bumper from {} event(s)", offset, doc.events.len());
            doc.shift(offset);
        }

        Ok(doc)
    }
}
