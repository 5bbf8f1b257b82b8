// file: src/extractor/keyword.rs
// description: rule-based keyword strategy over the actor, action and asset vocabularies
// reference: first vocabulary hit per role, inferred fallbacks for actor and object

use crate::extractor::actors::{keyword_action, keyword_actor, keyword_object};
use crate::extractor::strategy::SentenceContext;
use crate::models::{Event, ExtractionMethod};

/// Actor and object always resolve through fallbacks, so an action is the
/// only requirement.
pub fn extract(ctx: &SentenceContext<'_>) -> Vec<Event> {
    let Some(action) = keyword_action(&ctx.lower) else {
        return Vec::new();
    };

    vec![Event::new(
        Some(keyword_actor(&ctx.lower)),
        Some(action),
        Some(keyword_object(&ctx.lower)),
        ExtractionMethod::RuleBased,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DependencyScope;
    use crate::models::Effect;
    use crate::parser::ParsedSentence;

    fn run(text: &str) -> Vec<Event> {
        let parse = ParsedSentence::empty();
        extract(&SentenceContext::new(text, &parse, DependencyScope::Root))
    }

    #[test]
    fn test_full_vocabulary_hit() {
        let events = run("The attacker exfiltrated the customer database.");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].actor.as_deref(), Some("attacker"));
        assert_eq!(events[0].action.as_deref(), Some("exfiltrated"));
        assert_eq!(events[0].object.as_deref(), Some("database"));
        assert_eq!(events[0].effect, Some(Effect::ConfidentialityBreach));
        assert_eq!(events[0].confidence, 0.70);
    }

    #[test]
    fn test_fallback_roles() {
        let events = run("Beacons connected to <IP_ADDRESS> hourly.");

        assert_eq!(events[0].actor.as_deref(), Some("threat_actor"));
        assert_eq!(events[0].object.as_deref(), Some("network_resource"));
        assert_eq!(events[0].effect, Some(Effect::CommandAndControl));
    }

    #[test]
    fn test_no_action_no_event() {
        assert!(run("The attacker is sophisticated.").is_empty());
    }
}
