//! Processor configuration.

/// Settings an [`ElProcessor`](crate::ElProcessor) is built from.
///
/// ```text
/// ProcessorConfig::default()          // cached, writable, bean creation on
///     .cache(false)
///     .read_only(true)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Keep compiled expressions keyed by source text.
    pub cache: bool,
    /// Build the standard resolvers read-only: every write fails with
    /// `PropertyNotWritable`.
    pub read_only: bool,
    /// Assigning to an unknown top-level name defines a bean.
    pub allow_bean_creation: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            cache: true,
            read_only: false,
            allow_bean_creation: true,
        }
    }
}

impl ProcessorConfig {
    #[must_use]
    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub fn allow_bean_creation(mut self, allow: bool) -> Self {
        self.allow_bean_creation = allow;
        self
    }

    /// Defaults overridden by `EL_CACHE` and `EL_READ_ONLY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ProcessorConfig::default();
        if let Some(flag) = lookup("EL_CACHE").as_deref().and_then(parse_flag) {
            config.cache = flag;
        }
        if let Some(flag) = lookup("EL_READ_ONLY").as_deref().and_then(parse_flag) {
            config.read_only = flag;
        }
        config
    }
}

/// `1`/`on`/`true` or `0`/`off`/`false`, case-insensitive.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
