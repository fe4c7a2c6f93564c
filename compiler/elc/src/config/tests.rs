use pretty_assertions::assert_eq;

use super::*;

fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_string())
    }
}

#[test]
fn defaults() {
    let config = ProcessorConfig::default();
    assert!(config.cache);
    assert!(!config.read_only);
    assert!(config.allow_bean_creation);
}

#[test]
fn builder_setters() {
    let config = ProcessorConfig::default()
        .cache(false)
        .read_only(true)
        .allow_bean_creation(false);
    assert_eq!(
        config,
        ProcessorConfig {
            cache: false,
            read_only: true,
            allow_bean_creation: false,
        }
    );
}

#[test]
fn env_disables_cache() {
    assert!(!ProcessorConfig::from_lookup(lookup(&[("EL_CACHE", "0")])).cache);
    assert!(!ProcessorConfig::from_lookup(lookup(&[("EL_CACHE", "OFF")])).cache);
    assert!(ProcessorConfig::from_lookup(lookup(&[("EL_CACHE", "on")])).cache);
}

#[test]
fn env_read_only() {
    assert!(ProcessorConfig::from_lookup(lookup(&[("EL_READ_ONLY", "1")])).read_only);
    assert!(ProcessorConfig::from_lookup(lookup(&[("EL_READ_ONLY", "on")])).read_only);
    assert!(!ProcessorConfig::from_lookup(lookup(&[("EL_READ_ONLY", "0")])).read_only);
}

#[test]
fn unrecognised_values_keep_defaults() {
    let config = ProcessorConfig::from_lookup(lookup(&[
        ("EL_CACHE", "maybe"),
        ("EL_READ_ONLY", ""),
    ]));
    assert_eq!(config, ProcessorConfig::default());
}

#[test]
fn unset_environment_is_default() {
    assert_eq!(
        ProcessorConfig::from_lookup(|_| None),
        ProcessorConfig::default()
    );
}
