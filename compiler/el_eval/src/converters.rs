//! Text-to-object converters for class-typed coercion targets.

use std::fmt;
use std::sync::Arc;

use el_ir::Name;
use el_value::EvalResult;
use rustc_hash::FxHashMap;

/// Converts text to an instance of one class.
pub type Converter = Arc<dyn Fn(&str) -> EvalResult + Send + Sync>;

/// Converters keyed by class name.
///
/// Lookups try the name as given first, then its simple name, so a converter
/// registered for `Color` also serves `com.acme.Color`.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: FxHashMap<Name, Converter>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `convert` for `class_name`, replacing any earlier converter.
    pub fn register(
        &mut self,
        class_name: impl Into<Name>,
        convert: impl Fn(&str) -> EvalResult + Send + Sync + 'static,
    ) {
        self.converters.insert(class_name.into(), Arc::new(convert));
    }

    pub fn get(&self, class_name: &str) -> Option<&Converter> {
        self.converters.get(class_name).or_else(|| {
            let simple = class_name.rsplit('.').next()?;
            self.converters.get(simple)
        })
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.converters.keys().map(|n| &**n).collect();
        names.sort_unstable();
        f.debug_struct("ConverterRegistry")
            .field("classes", &names)
            .finish()
    }
}
