//! Stand-in for the page URL. The fragment is the palette's source of truth;
//! everything else about the URL is only carried along for the share link.

pub const DEFAULT_BASE_URL: &str = "colorman://palette";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    base: String,
    hash: String,
}

impl Location {
    /// Accepts a full URL (`https://host/p#AABBCC`), a fragment with its `#`
    /// (`#AABBCC-DDEEFF`) or bare fragment text (`AABBCC-DDEEFF`).
    /// `default_base` is used when the input carries no base of its own.
    pub fn parse(input: &str, default_base: &str) -> Self {
        let input = input.trim();
        let (base, hash) = match input.split_once('#') {
            Some((base, hash)) => (base, hash),
            None if input.contains("://") => (input, ""),
            None => ("", input),
        };
        let base = if base.is_empty() { default_base } else { base };
        Self {
            base: base.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Fragment text without the leading `#`.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Write the fragment. Returns `true` when it actually changed, which is
    /// when a hash-change notification is due.
    pub fn set_hash(&mut self, fragment: &str) -> bool {
        let fragment = fragment.trim_start_matches('#');
        if self.hash == fragment {
            return false;
        }
        self.hash = fragment.to_string();
        true
    }

    /// Follow a link. Same return contract as [`Location::set_hash`].
    pub fn navigate(&mut self, input: &str) -> bool {
        let next = Self::parse(input, &self.base);
        let changed = next.hash != self.hash;
        *self = next;
        changed
    }

    /// The full URL, suitable for sharing.
    pub fn href(&self) -> String {
        if self.hash.is_empty() {
            self.base.clone()
        } else {
            format!("{}#{}", self.base, self.hash)
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::parse("", DEFAULT_BASE_URL)
    }
}
