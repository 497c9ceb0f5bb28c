//! Platform → chat username mapping.
//!
//! Built once from `platformUser=chatUser` configuration entries and shared
//! read-only across notification jobs.

use std::collections::HashMap;

/// Static lookup table from platform usernames to chat usernames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMap {
    mappings: HashMap<String, String>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from raw `platformUser=chatUser` entries.
    ///
    /// Entries are split at the first `=` and trimmed. Malformed entries are
    /// skipped; a repeated platform user keeps the last mapping.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mappings = HashMap::new();

        for entry in entries {
            let entry = entry.as_ref();
            let Some((platform, chat)) = entry.split_once('=') else {
                tracing::warn!(entry, "Ignoring username mapping without '='");
                continue;
            };

            let (platform, chat) = (platform.trim(), chat.trim());
            if platform.is_empty() || chat.is_empty() {
                tracing::warn!(entry, "Ignoring incomplete username mapping");
                continue;
            }

            if let Some(previous) = mappings.insert(platform.to_string(), chat.to_string()) {
                tracing::warn!(
                    platform_user = platform,
                    previous = %previous,
                    replacement = chat,
                    "Duplicate username mapping, keeping the last one"
                );
            }
        }

        Self { mappings }
    }

    /// Look up the chat username for a platform user. Exact, case-sensitive match.
    pub fn resolve(&self, platform_user: &str) -> Option<&str> {
        self.mappings.get(platform_user).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl FromIterator<(String, String)> for IdentityMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            mappings: iter.into_iter().collect(),
        }
    }
}
