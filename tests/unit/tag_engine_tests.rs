/*!
 * Tests for baking stylesheet tags into events
 */

use hidisub::app_config::ConversionConfig;
use hidisub::ass_document::DocumentAssembler;
use hidisub::cue_scanner::{CueTrack, Event, RoleSet};
use hidisub::stylesheet::{StyleFragment, StyleTag};
use hidisub::tag_engine::TagEngine;

fn italic_large(selector: &str) -> StyleFragment {
    StyleFragment {
        selectors: vec![selector.to_string()],
        tags: vec![StyleTag::Italic, StyleTag::RelativeSize(1.5)],
    }
}

/// Test that a relative size resolves against the Default style size
#[test]
fn test_apply_withRelativeSize_shouldResolveAgainstStyle() {
    let config = ConversionConfig::default();
    let doc = DocumentAssembler::new(&config).with_styles(&RoleSet::from_roles(["Subtitle"]));
    let mut track = CueTrack::default();
    track.push("Subtitle-C1_1", Event::new(0, 1_000, "Hello"));

    TagEngine::new(&doc).apply(&mut track, &italic_large("Subtitle-C1_1"));

    assert_eq!(track.events[0].text, r"{\i1\fs33}Hello");
}

/// Test that a relative size resolves against the Top style size
#[test]
fn test_apply_withTopStyle_shouldUseTopFontSize() {
    let config = ConversionConfig::default();
    let doc = DocumentAssembler::new(&config).with_styles(&RoleSet::from_roles(["Subtitle"]));
    let mut track = CueTrack::default();
    track.push("Subtitle-C1_1", Event::new(0, 1_000, "Hello").with_style("Top"));

    TagEngine::new(&doc).apply(&mut track, &italic_large("Subtitle-C1_1"));

    assert_eq!(track.events[0].text, r"{\i1\fs30}Hello");
}

/// Test that applying the same rule twice equals applying it once
#[test]
fn test_apply_twice_shouldBeIdempotent() {
    let config = ConversionConfig::default();
    let doc = DocumentAssembler::new(&config).with_styles(&RoleSet::from_roles(["Subtitle"]));
    let engine = TagEngine::new(&doc);
    let fragment = italic_large("Subtitle-C1_1");

    let mut once = CueTrack::default();
    once.push("Subtitle-C1_1", Event::new(0, 1_000, "Hello"));
    engine.apply(&mut once, &fragment);

    let mut twice = once.clone();
    engine.apply(&mut twice, &fragment);

    assert_eq!(once.events[0].text, twice.events[0].text);
}

/// Test that every event carrying a repeated header name is styled
#[test]
fn test_apply_withRepeatedName_shouldStyleEveryOccurrence() {
    let config = ConversionConfig::default();
    let doc = DocumentAssembler::new(&config).with_styles(&RoleSet::from_roles(["Subtitle"]));
    let mut track = CueTrack::default();
    track.push("Subtitle-C1_1", Event::new(0, 1_000, "one"));
    track.push("Subtitle-C2_1", Event::new(1_000, 2_000, "other"));
    track.push("Subtitle-C1_1", Event::new(2_000, 3_000, "two").with_style("Top"));

    let applied = TagEngine::new(&doc).apply_all(&mut track, &[italic_large("Subtitle-C1_1")]);

    assert_eq!(applied, 2);
    assert_eq!(track.events[0].text, r"{\i1\fs33}one");
    assert_eq!(track.events[1].text, "other");
    assert_eq!(track.events[2].text, r"{\i1\fs30}two");
}
