// file: src/extractor/actors.rs
// description: actor and object canonicalization shared by the extraction strategies
// reference: pronoun, malware and attacker references collapse to canonical roles

use crate::extractor::patterns::{
    ACTION_TERMS, ACTOR_TERMS, ASSET_TERMS, CVE, KNOWN_ACTORS, PLACEHOLDER_TOKEN, first_term,
};
use crate::extractor::vocabulary::{MALWARE_PRONOUNS, is_bad_actor};
use crate::models::IocType;

/// First known group or malware family named in `text`, in surface form.
pub fn resolve_known_actor(text: &str) -> Option<String> {
    KNOWN_ACTORS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
}

/// First CVE identifier in `text`, upper-cased.
pub fn find_cve(text: &str) -> Option<String> {
    CVE.find(text).map(|m| m.as_str().to_uppercase())
}

/// Actor vocabulary hit or a category inferred from malware terms.
pub fn match_actor(text_lower: &str) -> Option<String> {
    if let Some(actor) = first_term(&ACTOR_TERMS, text_lower) {
        return Some(actor.to_string());
    }

    let inferred = if text_lower.contains("malware") {
        "malware"
    } else if text_lower.contains("ransomware") {
        "ransomware_operator"
    } else if text_lower.contains("trojan") || text_lower.contains("backdoor") {
        "malware_operator"
    } else {
        return None;
    };

    Some(inferred.to_string())
}

pub fn keyword_actor(text_lower: &str) -> String {
    match_actor(text_lower).unwrap_or_else(|| "threat_actor".to_string())
}

/// Multi-word actions come back joined with `_`.
pub fn keyword_action(text_lower: &str) -> Option<String> {
    first_term(&ACTION_TERMS, text_lower).map(|action| action.replace(' ', "_"))
}

/// Asset vocabulary hit, else a category inferred from IoC placeholders.
/// Placeholder tokens never count as assets (`<email>` is not "email").
pub fn keyword_object(text_lower: &str) -> String {
    let prose = PLACEHOLDER_TOKEN.replace_all(text_lower, " ");
    if let Some(asset) = first_term(&ASSET_TERMS, &prose) {
        return asset.to_string();
    }

    let mentions = |ioc_type: IocType| text_lower.contains(&ioc_type.placeholder().to_lowercase());

    let inferred = if mentions(IocType::Email) {
        "email_account"
    } else if mentions(IocType::IpAddress) || mentions(IocType::Url) {
        "network_resource"
    } else if mentions(IocType::FileHash) {
        "malicious_file"
    } else {
        "target_system"
    };

    inferred.to_string()
}

/// Canonicalizes a dependency-parse subject. A missing or pronoun subject is
/// first replaced by a known actor named anywhere in the sentence.
pub fn normalize_actor(actor: Option<String>, sentence: &str) -> Option<String> {
    let actor = match actor {
        Some(actor) if !is_bad_actor(&actor) => actor,
        other => match resolve_known_actor(sentence) {
            Some(known) => known,
            None => other?,
        },
    };

    let lower = actor.trim().to_lowercase();

    if MALWARE_PRONOUNS.contains(&lower.as_str()) {
        return Some("malware".to_string());
    }
    if is_bad_actor(&lower) {
        return None;
    }
    if lower.contains("malware") {
        return Some("malware".to_string());
    }
    if lower.contains("attacker") {
        return Some("threat_actor".to_string());
    }

    Some(actor.trim().to_string())
}

/// IoC placeholder objects become infrastructure roles.
pub fn normalize_object(object: Option<String>) -> Option<String> {
    let object = object?;

    if IocType::IpAddress.is_present_in(&object) || IocType::Url.is_present_in(&object) {
        return Some("remote_server".to_string());
    }
    if IocType::FileHash.is_present_in(&object) {
        return Some("malicious_file".to_string());
    }

    Some(object)
}
