/*!
 * Common test utilities for the hidisub test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Routes library logs to the test output; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Sample track with a continued body cue, a caption and a song line
pub const SAMPLE_TRACK: &str = "WEBVTT

Subtitle-C1_1
00:00:10.000 --> 00:00:12.500 line:85%
<c.Subtitle-C1_1>first</c>

Subtitle-C1_2
00:00:10.000 --> 00:00:12.500 line:90%
<c.Subtitle-C1_2>second</c>

Caption-C2_1
00:00:13.000 --> 00:00:15.000 position:50% line:90%
<c.Caption-C2_1>STATION</c>

Song-C3_1
00:00:16.000 --> 00:00:18.000 line:10%
<c.Song-C3_1>la la la</c>
";

/// Sample stylesheet written the way the player emits it
pub const SAMPLE_CSS: &str = ".rmp-container>.rmp-content>.rmp-cc-area>.rmp-cc-container>.rmp-cc-display>.rmp-cc-cue .Subtitle-C1_1 {
    font-size: 1.5em;
    color: #FF00FF;
}
.rmp-container>.rmp-content>.rmp-cc-area>.rmp-cc-container>.rmp-cc-display>.rmp-cc-cue .Song-C3_1 { font-style: italic; color: yellow; }
.rmp-container>.rmp-content>.rmp-cc-area>.rmp-cc-container>.rmp-cc-display>.rmp-cc-cue .Caption-C2_1 { color: white; }
";

/// Creates the sample track in the specified directory
pub fn create_sample_track(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_TRACK)
}
