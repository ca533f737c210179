/*!
 * Continuation merge pass.
 *
 * A cue whose header ordinal is not 1 continues the text of the cue before it.
 * When both share a style, the continuation is folded into the open event as a
 * new line instead of becoming an event of its own.
 */

use log::debug;

use crate::cue_scanner::Event;
use crate::override_tags::OverrideBlock;

/// Colour token left behind by a remapped placeholder colour
const PLACEHOLDER_COLOR: &str = "c&HFFFF&";

/// Colour block restoring white on the continued line
const CARRIED_COLOR: &str = r"{\c&HFFFFFF&}";

/// Hard line break between folded texts
const LINE_BREAK: &str = r"\N";

/// Fold continuation events into the event they continue
pub fn merge_continuations(events: Vec<Event>) -> Vec<Event> {
    let input_len = events.len();

    let merged = events.into_iter().fold(Vec::with_capacity(input_len), |mut out: Vec<Event>, event| {
        match out.last_mut().filter(|open| event.is_continuation && open.style == event.style) {
            Some(open) => fold_into(open, &event),
            None => out.push(event),
        }
        out
    });

    debug!("Merged {} event(s) into {}", input_len, merged.len());
    merged
}

/// Append the candidate text to the open event as a new line
fn fold_into(open: &mut Event, candidate: &Event) {
    let (block, rest) = OverrideBlock::split(&candidate.text);
    let present = OverrideBlock::collect_all(&open.text);

    let (carried, text) = match block {
        Some(mut block) => {
            block.retain(|token| !token.starts_with("pos(") && !present.contains(token));
            ("", block.prepend_to(rest))
        }
        None if present.contains(PLACEHOLDER_COLOR) => (CARRIED_COLOR, candidate.text.clone()),
        None => ("", candidate.text.clone()),
    };

    open.text.push_str(LINE_BREAK);
    open.text.push_str(carried);
    open.text.push_str(&text);
}
