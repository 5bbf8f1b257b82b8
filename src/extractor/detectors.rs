// file: src/extractor/detectors.rs
// description: pattern-specific detectors for malware, CVE exploitation and command-and-control mentions
// reference: MITRE ATT&CK tactics initial access and command and control

use crate::extractor::actors::{
    find_cve, keyword_action, keyword_object, match_actor, resolve_known_actor,
};
use crate::extractor::strategy::SentenceContext;
use crate::extractor::vocabulary::{C2_VERBS, EXPLOIT_TERMS, MALWARE_TERMS, contains_any};
use crate::models::{Effect, Event, ExtractionMethod, IocType};

pub fn extract_malware(ctx: &SentenceContext<'_>) -> Vec<Event> {
    if !contains_any(&ctx.lower, MALWARE_TERMS) {
        return Vec::new();
    }

    let Some(action) = keyword_action(&ctx.lower) else {
        return Vec::new();
    };

    vec![Event::new(
        Some("malware".to_string()),
        Some(action),
        Some(keyword_object(&ctx.lower)),
        ExtractionMethod::MalwarePattern,
    )]
}

pub fn extract_vulnerability(ctx: &SentenceContext<'_>) -> Vec<Event> {
    let Some(cve) = find_cve(ctx.text) else {
        return Vec::new();
    };
    if !contains_any(&ctx.lower, EXPLOIT_TERMS) {
        return Vec::new();
    }

    let actor = resolve_known_actor(ctx.text)
        .or_else(|| match_actor(&ctx.lower))
        .unwrap_or_else(|| "threat_actor".to_string());

    vec![
        Event::new(
            Some(actor),
            Some("exploited_vulnerability".to_string()),
            Some(cve),
            ExtractionMethod::VulnerabilityPattern,
        )
        .with_effect(Effect::InitialAccess),
    ]
}

pub fn extract_command_and_control(ctx: &SentenceContext<'_>) -> Vec<Event> {
    let names_infrastructure =
        IocType::Url.is_present_in(ctx.text) || IocType::IpAddress.is_present_in(ctx.text);

    if !names_infrastructure || !contains_any(&ctx.lower, C2_VERBS) {
        return Vec::new();
    }

    let actor = resolve_known_actor(ctx.text)
        .or_else(|| match_actor(&ctx.lower))
        .unwrap_or_else(|| "malware".to_string());

    vec![
        Event::new(
            Some(actor),
            Some("established_c2_connection".to_string()),
            Some("remote_server".to_string()),
            ExtractionMethod::IocPattern,
        )
        .with_effect(Effect::CommandAndControl),
    ]
}
