/*!
 * Stylesheet parsing and translation into override tags.
 *
 * The player stylesheet styles each cue through selectors nested in the
 * player's DOM (`.rmp-container>...>.rmp-cc-cue .Caption-C3_1`). The DOM part
 * is stripped, leaving the cue header names, and the recognised properties are
 * turned into ASS override tags:
 *
 * - `font-style: italic` → `\i1`
 * - `font-size: 1.5em` → `\fs<base * 1.5>` (resolved per event)
 * - `font-family: ..., "Name"` → `\fnName`
 * - `color: #RRGGBB` / name → `\c&H<mapped>&`
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::app_config::ConversionConfig;
use crate::cue_scanner::RoleSet;

// @const: Block comments
static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// One stylesheet rule reduced to cue selectors and raw properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRule {
    /// Cue header names the rule applies to, in stylesheet order
    pub selectors: Vec<String>,

    /// Property name (lowercase) to raw value; the first declaration wins
    pub properties: HashMap<String, String>,
}

impl StyleRule {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// An override tag produced from a stylesheet property
#[derive(Debug, Clone, PartialEq)]
pub enum StyleTag {
    /// `\i1`
    Italic,
    /// `\fs`, relative to the event's registered font size
    RelativeSize(f64),
    /// `\fn<name>`
    FontName(String),
    /// `\c&H<code>&`
    Color(String),
}

impl StyleTag {
    /// Concrete tag token (without the leading backslash) for an event
    /// whose style has the given font size
    pub fn resolve(&self, base_font_size: f64) -> String {
        match self {
            StyleTag::Italic => "i1".to_string(),
            StyleTag::RelativeSize(scale) => format!("fs{}", (base_font_size * scale) as i64),
            StyleTag::FontName(name) => format!("fn{}", name),
            StyleTag::Color(code) => format!("c&H{}&", code),
        }
    }
}

/// Tags of one rule together with the cue names they apply to
#[derive(Debug, Clone, PartialEq)]
pub struct StyleFragment {
    pub selectors: Vec<String>,
    pub tags: Vec<StyleTag>,
}

/// Parses stylesheets and translates their rules into override tags
pub struct StylesheetTranslator<'a> {
    config: &'a ConversionConfig,
}

impl<'a> StylesheetTranslator<'a> {
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self { config }
    }

    /// Parse the rules of a stylesheet that reference one of the track roles
    pub fn parse(&self, css: &str, roles: &RoleSet) -> Vec<StyleRule> {
        let css = COMMENT_REGEX.replace_all(css, "");
        let mut rules = Vec::new();

        for chunk in css.split('}') {
            let Some((selector_text, body)) = chunk.split_once('{') else {
                continue;
            };

            let selector_text = self.strip_prefixes(selector_text);
            if !roles.referenced_in(&selector_text) {
                continue;
            }

            let selectors: Vec<String> = selector_text
                .split(',')
                .map(|s| s.trim().trim_matches('.').trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();

            let mut properties = HashMap::new();
            for declaration in body.split(';') {
                if let Some((name, value)) = declaration.split_once(':') {
                    properties
                        .entry(name.trim().to_lowercase())
                        .or_insert_with(|| value.trim().to_string());
                }
            }

            rules.push(StyleRule {
                selectors,
                properties,
            });
        }

        debug!("Parsed {} stylesheet rule(s) for the track roles", rules.len());
        rules
    }

    fn strip_prefixes(&self, selector_text: &str) -> String {
        self.config
            .strip_prefixes
            .iter()
            .fold(selector_text.to_string(), |text, prefix| text.replace(prefix.as_str(), ""))
    }

    /// Translate the recognised properties of a rule into override tags
    pub fn translate(&self, rule: &StyleRule) -> StyleFragment {
        let mut tags = Vec::new();
        let mut italic = false;

        if let Some(style) = rule.property("font-style") {
            if style.to_lowercase().contains("italic") {
                italic = true;
                tags.push(StyleTag::Italic);
            } else {
                warn!("Unknown font-style '{}' for {:?}, ignoring", style, rule.selectors);
            }
        }

        if let Some(size) = rule.property("font-size") {
            match parse_relative_size(size) {
                Some(scale) if scale != 1.0 => tags.push(StyleTag::RelativeSize(scale)),
                Some(_) => {}
                None => warn!("Unsupported font-size '{}' for {:?}, ignoring", size, rule.selectors),
            }
        }

        if let Some(family) = rule.property("font-family") {
            let font = family
                .rsplit(',')
                .next()
                .unwrap_or_default()
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim();
            if !font.is_empty() && font != self.config.default_font_name {
                tags.push(StyleTag::FontName(font.to_string()));
            }
        }

        if let Some(color) = rule.property("color") {
            let color = color.trim_start_matches('#').trim();
            if !color.is_empty() && !italic && !self.config.is_default_color(color) {
                tags.push(StyleTag::Color(self.config.map_color(color).to_string()));
            }
        }

        StyleFragment {
            selectors: rule.selectors.clone(),
            tags,
        }
    }

    /// Parse a stylesheet and translate every rule that yields at least one tag
    pub fn translate_all(&self, css: &str, roles: &RoleSet) -> Vec<StyleFragment> {
        self.parse(css, roles)
            .iter()
            .map(|rule| self.translate(rule))
            .filter(|fragment| !fragment.tags.is_empty())
            .collect()
    }
}

/// Parse an `em` (or unitless) font size, accepting a bare leading dot
fn parse_relative_size(value: &str) -> Option<f64> {
    let value = value.trim().to_lowercase();
    let value = value.strip_suffix("em").unwrap_or(&value).trim();
    let value = match value.strip_prefix('.') {
        Some(rest) => format!("0.{}", rest),
        None => value.to_string(),
    };
    value.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}
