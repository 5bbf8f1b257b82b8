// file: src/models/event.rs
// description: actor-action-object event model with effect taxonomy
// reference: FAIR risk taxonomy (threat, method, asset, effect)

use serde::{Deserialize, Serialize};

/// Strategy that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    PassiveVoicePattern,
    RuleBased,
    DependencyParse,
    MalwarePattern,
    VulnerabilityPattern,
    IocPattern,
    NoEvent,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::PassiveVoicePattern => "passive_voice_pattern",
            ExtractionMethod::RuleBased => "rule_based",
            ExtractionMethod::DependencyParse => "dependency_parse",
            ExtractionMethod::MalwarePattern => "malware_pattern",
            ExtractionMethod::VulnerabilityPattern => "vulnerability_pattern",
            ExtractionMethod::IocPattern => "ioc_pattern",
            ExtractionMethod::NoEvent => "no_event",
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            ExtractionMethod::PassiveVoicePattern => 0.75,
            ExtractionMethod::RuleBased => 0.70,
            ExtractionMethod::DependencyParse => 0.65,
            ExtractionMethod::MalwarePattern => 0.75,
            ExtractionMethod::VulnerabilityPattern => 0.85,
            ExtractionMethod::IocPattern => 0.75,
            ExtractionMethod::NoEvent => 0.0,
        }
    }
}

/// Security impact category inferred from an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    ConfidentialityBreach,
    IntegrityViolation,
    AvailabilityLoss,
    InitialAccess,
    Persistence,
    CommandAndControl,
    CredentialTheft,
    SocialEngineering,
    SecurityImpact,
}

/// Checked in order; the first category with a matching verb wins.
const EFFECT_TABLE: &[(Effect, &[&str])] = &[
    (
        Effect::ConfidentialityBreach,
        &["accessed", "exfiltrated", "stole", "steal", "harvested"],
    ),
    (
        Effect::IntegrityViolation,
        &["modified", "modify", "deleted", "corrupted"],
    ),
    (
        Effect::AvailabilityLoss,
        &["encrypted", "disrupted", "disabled"],
    ),
    (
        Effect::InitialAccess,
        &["compromised", "breached", "infiltrated", "exploited"],
    ),
    (Effect::Persistence, &["installed", "deployed", "dropped"]),
    (
        Effect::CommandAndControl,
        &["connected", "communicated", "contacted"],
    ),
    (
        Effect::CredentialTheft,
        &["phished", "harvested", "stole", "steal"],
    ),
    (
        Effect::SocialEngineering,
        &["spoofed", "impersonated", "mimicked", "tricked", "redirected"],
    ),
];

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::ConfidentialityBreach => "confidentiality_breach",
            Effect::IntegrityViolation => "integrity_violation",
            Effect::AvailabilityLoss => "availability_loss",
            Effect::InitialAccess => "initial_access",
            Effect::Persistence => "persistence",
            Effect::CommandAndControl => "command_and_control",
            Effect::CredentialTheft => "credential_theft",
            Effect::SocialEngineering => "social_engineering",
            Effect::SecurityImpact => "security_impact",
        }
    }

    /// Maps an action to its effect. A verb matches when it occurs inside the
    /// action (`exploited_vulnerability`) or when the action is its stem (`exploit`).
    pub fn from_action(action: Option<&str>) -> Option<Effect> {
        let action = action?.trim().to_lowercase();
        if action.is_empty() {
            return None;
        }

        EFFECT_TABLE
            .iter()
            .find(|(_, verbs)| {
                verbs
                    .iter()
                    .any(|verb| action.contains(verb) || verb.starts_with(action.as_str()))
            })
            .map(|(effect, _)| *effect)
            .or(Some(Effect::SecurityImpact))
    }
}

/// Deduplication key: (actor, action, object, source_sentence_id).
pub type EventKey = (Option<String>, Option<String>, Option<String>, String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub actor: Option<String>,
    pub action: Option<String>,
    pub object: Option<String>,
    pub effect: Option<Effect>,
    pub source_sentence_id: String,
    pub confidence: f64,
    pub extraction_method: ExtractionMethod,
}

impl Event {
    pub fn new(
        actor: Option<String>,
        action: Option<String>,
        object: Option<String>,
        extraction_method: ExtractionMethod,
    ) -> Self {
        let effect = Effect::from_action(action.as_deref());

        Self {
            actor,
            action,
            object,
            effect,
            source_sentence_id: String::new(),
            confidence: extraction_method.confidence(),
            extraction_method,
        }
    }

    /// Marks a sentence with no extractable structure.
    pub fn placeholder() -> Self {
        Self::new(None, None, None, ExtractionMethod::NoEvent)
    }

    pub fn with_sentence_id(mut self, sentence_id: &str) -> Self {
        self.source_sentence_id = sentence_id.to_string();
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn key(&self) -> EventKey {
        (
            self.actor.clone(),
            self.action.clone(),
            self.object.clone(),
            self.source_sentence_id.clone(),
        )
    }

    pub fn is_placeholder(&self) -> bool {
        self.extraction_method == ExtractionMethod::NoEvent
    }
}
