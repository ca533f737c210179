/*!
 * Integration tests for the track conversion workflow
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use hidisub::app_config::Config;
use hidisub::converter::{ConversionOptions, Controller};
use hidisub::errors::{AppError, ConversionError};
use crate::common;

/// Test the two-cue continuation case end to end
#[test]
fn test_convert_str_withContinuedCue_shouldProduceSingleEvent() -> Result<()> {
    common::init_logging();
    let content = "WEBVTT

Subtitle-C5_1
00:00:01.000 --> 00:00:03.000 line:85%
<c.Subtitle-C5_1>first</c>

Subtitle-C5_2
00:00:02.000 --> 00:00:04.000 line:85%
<c.Subtitle-C5_2>second</c>
";

    let doc = Controller::new().convert_str(content, None, false)?;

    assert_eq!(doc.events.len(), 1);
    assert_eq!(doc.events[0].text, r"first\Nsecond");
    assert_eq!(doc.events[0].start_ms, 1_000);
    assert_eq!(doc.events[0].end_ms, 3_000);
    Ok(())
}

/// Test the sample track with its stylesheet
#[test]
fn test_convert_str_withStylesheet_shouldBakeTagsAndPositions() -> Result<()> {
    common::init_logging();
    let doc = Controller::new().convert_str(common::SAMPLE_TRACK, Some(common::SAMPLE_CSS), false)?;

    assert_eq!(doc.events.len(), 3);
    assert_eq!(doc.events[0].style, "Default");
    assert_eq!(doc.events[0].text, r"{\fs33\c&HFF00FF&}first\Nsecond");
    assert_eq!(doc.events[1].style, "Caption");
    assert_eq!(doc.events[1].text, r"{\an7\pos(320.0,324.0)}STATION");
    assert_eq!(doc.events[2].style, "Song");
    assert_eq!(doc.events[2].text, r"{\i1}la la la");

    let output = doc.to_string();
    assert!(output.contains("PlayResX: 640\n"));
    assert!(output.contains("PlayResY: 360\n"));
    assert!(output.contains("YCbCr Matrix: TV.709\n"));
    assert!(output.contains("Style: Caption,"));
    assert!(output.contains("Style: Song,Arial,20,"));
    Ok(())
}

/// Test that bumper removal shifts every event
#[test]
fn test_convert_str_withBumperRemoval_shouldShiftTimes() -> Result<()> {
    let doc = Controller::new().convert_str(common::SAMPLE_TRACK, None, true)?;

    assert_eq!(doc.events[0].start_ms, 10_000 - 4_963);
    assert!(doc.to_string().contains("Dialogue: 0,0:00:05.04,0:00:07.54,Default,,0,0,0,,first\\Nsecond\n"));
    Ok(())
}

/// Test that a track without roles converts to an empty document
#[test]
fn test_convert_str_withoutRoles_shouldReturnNoEvents() -> Result<()> {
    let doc = Controller::new().convert_str("WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\nplain\n", None, false)?;
    assert!(doc.events.is_empty());
    Ok(())
}

/// Test that a malformed timestamp aborts the file with a format error
#[test]
fn test_convert_str_withBadTimestamp_shouldFail() {
    let content = "Subtitle-C1_1\n00:00:01 --> 00:00:02.000\n<c.Subtitle-C1_1>x</c>\n";
    let err = Controller::new().convert_str(content, None, false).unwrap_err();
    assert!(matches!(err, ConversionError::Timecode { line: 2, .. }));
}

/// Test that the document is written next to the input
#[test]
fn test_run_withSingleTrack_shouldWriteDocument() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let track = common::create_sample_track(&dir, "episode.vtt")?;
    let css = common::create_test_file(&dir, "episode.css", common::SAMPLE_CSS)?;

    let options = ConversionOptions {
        css_file: Some(css),
        remove_bumper: false,
    };
    let report = Controller::new().run(&[track], &options)?;

    assert!(report.is_success());
    assert_eq!(report.converted, vec![dir.join("episode.ass")]);
    let output = fs::read_to_string(dir.join("episode.ass"))?;
    assert!(output.starts_with("[Script Info]"));
    assert!(output.contains(r"{\fs33\c&HFF00FF&}first\Nsecond"));
    Ok(())
}

/// Test that a stylesheet with several inputs is rejected before converting
#[test]
fn test_run_withStylesheetAndDirectory_shouldFailWithConfigError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_track(&dir, "one.vtt")?;
    common::create_sample_track(&dir, "two.vtt")?;
    let css = common::create_test_file(&dir, "style.css", common::SAMPLE_CSS)?;

    let options = ConversionOptions {
        css_file: Some(css),
        remove_bumper: false,
    };
    let result = Controller::new().run(&[dir.clone()], &options);

    assert!(matches!(result, Err(AppError::Conversion(ref e)) if e.is_config()));
    assert!(!dir.join("one.ass").exists());
    Ok(())
}

/// Test that a failing file does not stop the rest of the batch
#[test]
fn test_run_withBrokenTrack_shouldConvertOthersAndReportFailure() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_sample_track(&dir, "a_good.vtt")?;
    common::create_test_file(
        &dir,
        "b_broken.vtt",
        "Subtitle-C1_1\n00:00:01.000 --> 00:00:02.000\n<c.Subtitle-C1_1>x</c>\n\nSubtitle-C1_2\n00:00:03.000 --> 00:00:04.000\n",
    )?;

    let report = Controller::new().run(&[dir.clone()], &ConversionOptions::default())?;

    assert!(!report.is_success());
    assert_eq!(report.converted, vec![dir.join("a_good.ass")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, dir.join("b_broken.vtt"));
    assert!(!dir.join("b_broken.ass").exists());
    Ok(())
}

/// Test that an invalid configuration is rejected by the controller
#[test]
fn test_with_config_withZeroResolution_shouldFail() {
    let mut config = Config::default();
    config.conversion.play_res_x = 0;

    let result = Controller::with_config(config);

    assert!(matches!(result, Err(ConversionError::Config(_))));
}

/// Test that a missing input is reported as a failed file
#[test]
fn test_run_withMissingInput_shouldReportFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing: PathBuf = temp_dir.path().join("missing.vtt");

    let report = Controller::new().run(&[missing.clone()], &ConversionOptions::default())?;

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, missing);
    Ok(())
}
