// file: src/extractor/vocabulary.rs
// description: fixed vocabularies for the candidate gate and keyword extraction
// reference: lists are scanned in declared order; first hit wins

/// Substrings of a lowercased sentence that make it worth extracting from.
pub const EVENT_VERBS: &[&str] = &[
    "execute",
    "run",
    "download",
    "drop",
    "install",
    "communicate",
    "connect",
    "send",
    "receive",
    "exfiltrate",
    "exploit",
    "abuse",
    "redirect",
    "access",
    "compromise",
    "deploy",
    "encrypt",
    "steal",
];

/// Named groups before generic roles.
pub const THREAT_ACTORS: &[&str] = &[
    "apt28",
    "apt29",
    "apt32",
    "apt41",
    "lazarus",
    "kimsuky",
    "turla",
    "fancy bear",
    "cozy bear",
    "sandworm",
    "threat actor",
    "malicious actor",
    "attacker",
    "adversary",
    "hacker",
    "cybercriminal",
];

/// Surface (past tense) action forms.
pub const ACTIONS: &[&str] = &[
    "accessed",
    "compromised",
    "breached",
    "infiltrated",
    "gained access",
    "deployed",
    "installed",
    "executed",
    "launched",
    "dropped",
    "connected",
    "communicated",
    "sent",
    "transmitted",
    "exfiltrated",
    "encrypted",
    "modified",
    "deleted",
    "stole",
    "harvested",
    "exploited",
    "leveraged",
    "utilized",
    "abused",
    "phished",
    "tricked",
    "deceived",
    "targeted",
    "spoofed",
    "created",
    "designed",
    "redirected",
    "displayed",
    "clicked",
    "observed",
    "attempted",
    "mimicked",
    "impersonated",
];

/// Lemmas accepted as predicates by the dependency strategy.
pub const ACTION_LEMMAS: &[&str] = &[
    "access",
    "compromise",
    "breach",
    "infiltrate",
    "gain",
    "deploy",
    "install",
    "execute",
    "run",
    "launch",
    "drop",
    "download",
    "connect",
    "communicate",
    "send",
    "receive",
    "transmit",
    "exfiltrate",
    "encrypt",
    "modify",
    "delete",
    "steal",
    "harvest",
    "exploit",
    "leverage",
    "utilize",
    "abuse",
    "phish",
    "trick",
    "deceive",
    "target",
    "spoof",
    "create",
    "design",
    "redirect",
    "display",
    "click",
    "observe",
    "attempt",
    "mimic",
    "impersonate",
];

pub const ASSETS: &[&str] = &[
    "credentials",
    "password",
    "database",
    "data",
    "file",
    "document",
    "system",
    "server",
    "endpoint",
    "network",
    "application",
    "email",
    "account",
    "user",
    "administrator",
    "victim",
    "tld",
    "domain",
    "portal",
    "landing page",
    "site",
    "webpage",
    "voicemail",
    "brand",
];

/// Subjects that carry no actor information on their own.
pub const BAD_ACTORS: &[&str] = &[
    "it", "this", "that", "these", "those", "we", "our", "us", "they", "their", "he", "she",
    "who", "which",
];

/// Pronouns that in threat reports almost always refer to the malware under discussion.
pub const MALWARE_PRONOUNS: &[&str] = &["it", "this", "that"];

/// Matched case-sensitively, names before patterns.
pub const KNOWN_ACTOR_NAMES: &[&str] = &[
    "Lazarus",
    "Sandworm",
    "Cozy Bear",
    "Fancy Bear",
    "Kimsuky",
    "Turla",
    "Emotet",
    "TrickBot",
    "QakBot",
    "IcedID",
];

pub const KNOWN_ACTOR_PATTERNS: &[&str] = &[
    r"\bAPT\d+\b",
    r"\bFIN\d+\b",
    r"\bTA\d+\b",
    r"\bUNC\d+\b",
    r"\bDEV-\d+\b",
];

pub const MALWARE_TERMS: &[&str] = &["malware", "ransomware", "trojan"];

pub const EXPLOIT_TERMS: &[&str] = &["exploit", "leveraged"];

pub const C2_VERBS: &[&str] = &["connected", "communicated", "contacted"];

pub fn contains_any(text_lower: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text_lower.contains(term))
}

/// Candidate gate: cheap substring test ahead of every strategy.
pub fn is_candidate_sentence(text: &str) -> bool {
    contains_any(&text.to_lowercase(), EVENT_VERBS)
}

pub fn is_bad_actor(actor: &str) -> bool {
    BAD_ACTORS.contains(&actor.trim().to_lowercase().as_str())
}
