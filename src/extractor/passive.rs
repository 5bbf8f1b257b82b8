// file: src/extractor/passive.rs
// description: passive-voice pattern strategy ("X was abused by Y")
// reference: single regex over the lowercased sentence

use crate::extractor::patterns::PASSIVE_VOICE;
use crate::extractor::strategy::SentenceContext;
use crate::extractor::vocabulary::ACTIONS;
use crate::models::{Event, ExtractionMethod};

pub fn extract(ctx: &SentenceContext<'_>) -> Vec<Event> {
    let Some(captures) = PASSIVE_VOICE.captures(&ctx.lower) else {
        return Vec::new();
    };

    let object = captures[1].trim();
    let action = captures[2].trim();
    let actor = captures[3].trim();

    if !ACTIONS.contains(&action) {
        return Vec::new();
    }

    vec![Event::new(
        Some(actor.to_string()),
        Some(action.to_string()),
        Some(object.to_string()),
        ExtractionMethod::PassiveVoicePattern,
    )]
}
