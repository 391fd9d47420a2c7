//! Built-in domain reputation table.

use std::collections::BTreeMap;

const KNOWN_DOMAINS: &[(&str, u32)] = &[
    // code hosting
    ("github.com", 10),
    ("gitlab.com", 10),
    ("bitbucket.org", 5),
    // distributions and toolchains
    ("kernel.org", 15),
    ("gnu.org", 15),
    ("debian.org", 15),
    ("ubuntu.com", 15),
    ("redhat.com", 15),
    ("fedoraproject.org", 12),
    ("archlinux.org", 12),
    ("apache.org", 15),
    ("apache.com", 15),
    ("python.org", 15),
    ("pypi.org", 12),
    ("pypi.io", 12),
    ("nodejs.org", 15),
    ("npmjs.com", 10),
    ("go.dev", 15),
    ("golang.org", 15),
    ("rust-lang.org", 15),
    ("crates.io", 12),
    // containers and cloud
    ("docker.com", 12),
    ("docker.io", 12),
    ("aws.amazon.com", 12),
    ("azure.microsoft.com", 12),
    ("cloud.google.com", 12),
    // vendors
    ("mozilla.org", 15),
    ("firefox.com", 12),
    ("google.com", 10),
    ("microsoft.com", 10),
    ("apple.com", 10),
    ("cloudflare.com", 12),
];

/// Fresh copy of the built-in table (hostname -> bonus).
pub fn default_known_domains() -> BTreeMap<String, u32> {
    KNOWN_DOMAINS
        .iter()
        .map(|(host, bonus)| (host.to_string(), *bonus))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_lowercase_hostnames() {
        let t = default_known_domains();
        assert_eq!(t.len(), KNOWN_DOMAINS.len());
        assert_eq!(t.get("github.com"), Some(&10));
        assert_eq!(t.get("kernel.org"), Some(&15));
        for host in t.keys() {
            assert_eq!(host, &host.to_lowercase());
            assert!(!host.contains(':') && !host.contains('/'));
        }
    }
}
