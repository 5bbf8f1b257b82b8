// file: src/normalizer/ioc.rs
// description: rewrites indicators of compromise into canonical typed placeholders
// reference: threat intelligence ioc standards

use crate::models::IocType;
use crate::normalizer::patterns::{
    EMAIL, FILE_HASH, IPV4, MALFORMED_PLACEHOLDERS, OCTET_SEPARATOR, URL,
};
use regex::Captures;

/// Replaces URLs, IPv4 addresses, emails and file hashes, in that order, then
/// canonicalizes any malformed placeholder brackets.
pub fn placehold(text: &str) -> String {
    let text = replace_iocs(text);
    canonicalize_brackets(&text)
}

pub fn replace_iocs(text: &str) -> String {
    let text = URL.replace_all(text, IocType::Url.placeholder());

    let text = IPV4.replace_all(&text, |caps: &Captures| {
        let candidate = &caps[0];
        if has_multi_digit_octet(candidate) {
            IocType::IpAddress.placeholder().to_string()
        } else {
            candidate.to_string()
        }
    });

    let text = EMAIL.replace_all(&text, IocType::Email.placeholder());
    let text = FILE_HASH.replace_all(&text, IocType::FileHash.placeholder());

    text.into_owned()
}

/// Collapses `<<URL>>`, `< URL >` and similar variants into `<URL>`.
pub fn canonicalize_brackets(text: &str) -> String {
    let mut text = text.to_string();

    for (ioc_type, pattern) in MALFORMED_PLACEHOLDERS.iter() {
        if pattern.is_match(&text) {
            text = pattern
                .replace_all(&text, ioc_type.placeholder())
                .into_owned();
        }
    }

    text
}

/// Dotted sequences made only of single-digit parts (`1.2.3.4`) are more
/// often version numbers or section labels than addresses.
fn has_multi_digit_octet(candidate: &str) -> bool {
    OCTET_SEPARATOR
        .split(candidate)
        .any(|octet| octet.chars().count() >= 2)
}
