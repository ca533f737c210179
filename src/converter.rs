use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::ass_document::{AssDocument, DocumentAssembler};
use crate::classifier::Classifier;
use crate::cue_scanner::{CueTrack, RoleSet};
use crate::errors::{AppError, ConversionError};
use crate::file_utils::FileManager;
use crate::merge::merge_continuations;
use crate::stylesheet::StylesheetTranslator;
use crate::tag_engine::TagEngine;

// @module: Conversion controller running the pipeline over input files

/// Per-run switches taken from the command line
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Stylesheet applied to the single input track
    pub css_file: Option<PathBuf>,

    /// Shift every event back by the intro bumper length
    pub remove_bumper: bool,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Documents written, in input order
    pub converted: Vec<PathBuf>,

    /// Inputs that failed, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Main application controller for track conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a controller with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, ConversionError> {
        config
            .validate()
            .map_err(|e| ConversionError::Config(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert one track, with an optional stylesheet, into a document
    pub fn convert_str(
        &self,
        content: &str,
        css: Option<&str>,
        remove_bumper: bool,
    ) -> Result<AssDocument, ConversionError> {
        let conversion = &self.config.conversion;

        let roles = RoleSet::discover(content);
        let mut track = CueTrack::scan(content, &roles)?;
        Classifier::new(conversion).classify(&mut track);

        let assembler = DocumentAssembler::new(conversion);
        let doc = assembler.with_styles(&roles);

        if let Some(css) = css {
            let fragments = StylesheetTranslator::new(conversion).translate_all(css, &roles);
            TagEngine::new(&doc).apply_all(&mut track, &fragments);
        }

        let events = merge_continuations(track.events);
        assembler.finish(doc, events, remove_bumper)
    }

    /// Convert a track file and write the document next to it. Returns the output path.
    pub fn convert_file(&self, input: &Path, css: Option<&str>, remove_bumper: bool) -> Result<PathBuf> {
        let start_time = Instant::now();
        let content = FileManager::read_to_string(input)?;

        let doc = self
            .convert_str(&content, css, remove_bumper)
            .with_context(|| format!("Failed to convert {:?}", input))?;

        let output = FileManager::generate_output_path(input);
        FileManager::write_atomically(&output, &doc.to_string())?;

        info!(
            "Converted {:?} → {:?} ({} event(s), {}ms)",
            input,
            output,
            doc.events.len(),
            start_time.elapsed().as_millis()
        );
        Ok(output)
    }

    /// Convert every input path, continuing past per-file failures
    pub fn run(&self, paths: &[PathBuf], options: &ConversionOptions) -> Result<BatchReport, AppError> {
        let inputs = FileManager::expand_inputs(paths)?;

        let css = match &options.css_file {
            Some(_) if inputs.len() > 1 => {
                return Err(ConversionError::Config(format!(
                    "A stylesheet can only be used with a single input, got {}",
                    inputs.len()
                ))
                .into());
            }
            Some(css_file) => Some(
                FileManager::read_to_string(css_file)
                    .map_err(|e| AppError::File(format!("{:#}", e)))?,
            ),
            None => None,
        };

        debug!("Converting {} file(s)", inputs.len());
        let progress_bar = Self::progress_bar(inputs.len());
        let mut report = BatchReport::default();

        for input in &inputs {
            if let Some(pb) = &progress_bar {
                pb.set_message(Self::display_name(input));
            }

            match self.convert_file(input, css.as_deref(), options.remove_bumper) {
                Ok(output) => report.converted.push(output),
                Err(e) => {
                    error!("Failed to convert {:?}: {:#}", input, e);
                    report.failed.push((input.clone(), format!("{:#}", e)));
                }
            }

            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        if inputs.len() > 1 {
            info!(
                "Converted {} of {} file(s), {} failed",
                report.converted.len(),
                inputs.len(),
                report.failed.len()
            );
        }

        Ok(report)
    }

    fn progress_bar(total: usize) -> Option<ProgressBar> {
        if total < 2 {
            return None;
        }

        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style.progress_chars("█▓▒░"));
        Some(pb)
    }

    fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
