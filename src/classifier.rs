/*!
 * Role and position classification.
 *
 * Song and caption cues get their role style, caption cues are pinned to an
 * absolute top-left anchored position on the output canvas, and body cues
 * placed high on screen move to the Top style.
 */

use log::debug;

use crate::app_config::ConversionConfig;
use crate::ass_document::TOP_STYLE;
use crate::cue_scanner::{CueLayout, CueTrack, Event, CAPTION_ROLE, SONG_ROLE};
use crate::override_tags::OverrideBlock;

/// Classifies the events of a track in place
pub struct Classifier<'a> {
    config: &'a ConversionConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self { config }
    }

    /// Assign a style to every event, adding position overrides to caption cues
    pub fn classify(&self, track: &mut CueTrack) {
        let mut positioned = 0;
        for (event, name) in track.events.iter_mut().zip(&track.names) {
            if self.classify_event(name, event) {
                positioned += 1;
            }
        }
        debug!("Classified {} event(s), {} positioned", track.events.len(), positioned);
    }

    /// Classify one event by its header name. Returns whether a position was added.
    pub fn classify_event(&self, name: &str, event: &mut Event) -> bool {
        if name.starts_with(SONG_ROLE) {
            event.style = SONG_ROLE.to_string();
            false
        } else if name.starts_with(CAPTION_ROLE) {
            let block = OverrideBlock::from_tokens(["an7".to_string(), self.position_token(&event.layout)]);
            event.text = block.prepend_to(&event.text);
            event.style = CAPTION_ROLE.to_string();
            true
        } else {
            if let Some(line) = event.layout.line {
                if line < f64::from(self.config.top_line_threshold) {
                    event.style = TOP_STYLE.to_string();
                }
            }
            false
        }
    }

    /// `pos(x,y)` token for the cue's percentage placement
    fn position_token(&self, layout: &CueLayout) -> String {
        let rx = round2(f64::from(self.config.play_res_x) * layout.position.unwrap_or(0.0) / 100.0);
        let ry = round2(f64::from(self.config.play_res_y) * layout.line.unwrap_or(0.0) / 100.0);
        format!("pos({:?},{:?})", rx, ry)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
