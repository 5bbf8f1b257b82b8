// file: src/models/ioc.rs
// description: indicator of compromise kinds and their canonical placeholders
// reference: stix ioc standards

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IocType {
    Url,
    IpAddress,
    Email,
    FileHash,
}

impl IocType {
    /// Substitution order used by the placeholder engine.
    pub const ALL: [IocType; 4] = [
        IocType::Url,
        IocType::IpAddress,
        IocType::Email,
        IocType::FileHash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IocType::Url => "URL",
            IocType::IpAddress => "IP_ADDRESS",
            IocType::Email => "EMAIL",
            IocType::FileHash => "FILE_HASH",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            IocType::Url => "<URL>",
            IocType::IpAddress => "<IP_ADDRESS>",
            IocType::Email => "<EMAIL>",
            IocType::FileHash => "<FILE_HASH>",
        }
    }

    pub fn is_present_in(&self, text: &str) -> bool {
        text.contains(self.placeholder())
    }
}
