/*!
 * # hidisub - styled cue track to ASS converter
 *
 * A Rust library converting role-tagged cue tracks, with an optional
 * player stylesheet, into Advanced SubStation Alpha documents.
 *
 * ## Features
 *
 * - Role discovery from the styling spans of the track
 * - Caption positioning and top-of-screen detection
 * - Stylesheet rules baked into per-event override tags
 * - Continuation cues folded into multi-line events
 * - Optional removal of the intro bumper offset
 * - Atomic output writes and batch conversion of directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Cue and ASS timestamp parsing and formatting
 * - `cue_scanner`: Role discovery and cue block scanning
 * - `classifier`: Role styles and caption positioning
 * - `stylesheet`: Stylesheet parsing and tag translation
 * - `override_tags`: Leading `{\...}` override blocks
 * - `tag_engine`: Applies translated tags to events
 * - `merge`: Continuation merge pass
 * - `ass_document`: Styles, document assembly and serialization
 * - `converter`: Pipeline controller over input files
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod ass_document;
pub mod classifier;
pub mod converter;
pub mod cue_scanner;
pub mod errors;
pub mod file_utils;
pub mod merge;
pub mod override_tags;
pub mod stylesheet;
pub mod tag_engine;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::{Config, ConversionConfig};
pub use ass_document::{AssDocument, AssStyle, DocumentAssembler};
pub use converter::{BatchReport, ConversionOptions, Controller};
pub use cue_scanner::{CueTrack, Event, RoleSet};
pub use errors::{AppError, ConversionError, TimecodeError};
pub use stylesheet::{StyleFragment, StyleRule, StyleTag, StylesheetTranslator};
