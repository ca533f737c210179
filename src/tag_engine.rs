use log::debug;

use crate::ass_document::AssDocument;
use crate::cue_scanner::CueTrack;
use crate::override_tags::OverrideBlock;
use crate::stylesheet::StyleFragment;

// @module: Bakes stylesheet tags into event override blocks

/// Applies translated stylesheet fragments to the events they select
pub struct TagEngine<'a> {
    // @field: Document whose registered styles give the base font sizes
    doc: &'a AssDocument,
}

impl<'a> TagEngine<'a> {
    pub fn new(doc: &'a AssDocument) -> Self {
        Self { doc }
    }

    /// Apply one fragment to every event named by one of its selectors.
    /// Returns the number of events it touched.
    pub fn apply(&self, track: &mut CueTrack, fragment: &StyleFragment) -> usize {
        let mut applied = 0;

        for selector in &fragment.selectors {
            let indices = track.indices_of(selector).to_vec();
            if indices.is_empty() {
                debug!("No cue named '{}', skipping its style rule", selector);
                continue;
            }

            for index in indices {
                let event = &mut track.events[index];
                let base_size = self.doc.font_size_of(&event.style);
                let tokens = fragment.tags.iter().map(|tag| tag.resolve(base_size));
                event.text = OverrideBlock::merge_into_text(&event.text, tokens);
                applied += 1;
            }
        }

        applied
    }

    /// Apply every fragment in order
    pub fn apply_all(&self, track: &mut CueTrack, fragments: &[StyleFragment]) -> usize {
        let applied = fragments
            .iter()
            .map(|fragment| self.apply(track, fragment))
            .sum();
        debug!("Baked {} stylesheet rule(s) into {} event(s)", fragments.len(), applied);
        applied
    }
}
