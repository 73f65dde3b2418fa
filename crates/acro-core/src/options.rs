//! acro package options.
//!
//! Options are kept in declaration order and passed to `\acsetup`. The
//! plain backend only reads `single`.

/// Valid values for `first-style` and `single-style`.
pub const VALID_STYLES: &[&str] = &["long-short", "short-long", "short", "long", "footnote"];

/// Ordered `key = value` options for the acro package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageOptions {
    items: Vec<(String, String)>,
}

impl PackageOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing an earlier value for the same key in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.items.push((key, value)),
        }
    }

    /// Get an option value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge options from `other`; its values win.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.items {
            self.set(key, value);
        }
    }

    /// Whether the `single` option enables single-use rendering.
    ///
    /// `true` or any positive integer counts as enabled.
    #[must_use]
    pub fn single(&self) -> bool {
        match self.get("single") {
            Some("true") => true,
            Some(value) => value.parse::<u32>().is_ok_and(|n| n > 0),
            None => false,
        }
    }

    /// Check known options and describe every invalid value.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        self.iter()
            .filter(|(key, value)| !is_valid(key, value))
            .map(|(key, value)| format!("unknown value '{value}' for '{key}'"))
            .collect()
    }

    /// The `\acsetup{...}` preamble line, or `None` without options.
    #[must_use]
    pub fn acsetup(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let body: Vec<String> = self.iter().map(|(k, v)| format!("{k}={v}")).collect();
        Some(format!("\\acsetup{{{}}}", body.join(",")))
    }
}

fn is_valid(key: &str, value: &str) -> bool {
    match key {
        "first-style" | "single-style" => VALID_STYLES.contains(&value),
        "single" => value == "true" || value == "false" || value.parse::<u32>().is_ok(),
        _ => true,
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PackageOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.set(key, value);
        }
        options
    }
}
