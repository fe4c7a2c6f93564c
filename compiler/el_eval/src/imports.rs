//! Class, package and static-member imports.
//!
//! Classes are known by qualified name and become visible by simple name
//! when imported directly or when their package is imported. `java.lang`
//! is imported by default, as in Java source.

mod java_lang;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use el_ir::Name;
use el_value::{ClassDef, EvalError};

#[derive(Clone, Debug)]
pub struct ImportHandler {
    /// Every defined class, by qualified name.
    known: FxHashMap<Name, Arc<ClassDef>>,
    /// Directly imported classes, by simple name.
    classes: FxHashMap<Name, Arc<ClassDef>>,
    packages: Vec<Name>,
    /// Statically imported members, by member name.
    statics: FxHashMap<Name, Arc<ClassDef>>,
}

impl Default for ImportHandler {
    fn default() -> Self {
        let mut handler = ImportHandler::empty();
        for class in java_lang::classes() {
            handler.define_class(class);
        }
        handler.import_package(java_lang::PACKAGE);
        handler
    }
}

impl ImportHandler {
    /// A handler with the `java.lang` classes and package import.
    pub fn new() -> Self {
        ImportHandler::default()
    }

    /// A handler with nothing defined or imported.
    pub fn empty() -> Self {
        ImportHandler {
            known: FxHashMap::default(),
            classes: FxHashMap::default(),
            packages: Vec::new(),
            statics: FxHashMap::default(),
        }
    }

    /// Make `class` known by qualified name without importing it.
    pub fn define_class(&mut self, class: ClassDef) -> Arc<ClassDef> {
        let class = Arc::new(class);
        self.known
            .insert(class.qualified_name().into(), Arc::clone(&class));
        class
    }

    /// Define `class` and import it by simple name.
    pub fn import_class(&mut self, class: ClassDef) -> Arc<ClassDef> {
        let class = self.define_class(class);
        self.classes.insert(class.name().into(), Arc::clone(&class));
        class
    }

    /// Define and import an enum class.
    pub fn define_enum<I, S>(&mut self, qualified_name: &str, constants: I) -> Arc<ClassDef>
    where
        I: IntoIterator<Item = S>,
        S: Into<Name>,
    {
        self.import_class(ClassDef::enumeration(qualified_name, constants))
    }

    /// Make every known class of `package` visible by simple name.
    pub fn import_package(&mut self, package: impl Into<Name>) {
        let package = package.into();
        if !self.packages.contains(&package) {
            self.packages.push(package);
        }
    }

    /// Import `Class.member` (the class part simple or qualified) so that
    /// `member` resolves as a bare identifier.
    pub fn import_static(&mut self, member: &str) -> Result<(), EvalError> {
        let Some((class_name, member_name)) = member.rsplit_once('.') else {
            return Err(EvalError::new(format!(
                "static import '{member}' must name a class member"
            )));
        };
        let Some(class) = self.resolve_class(class_name) else {
            return Err(EvalError::new(format!(
                "cannot import '{member}': class '{class_name}' not found"
            )));
        };
        if !class.has_member(member_name) {
            return Err(EvalError::new(format!(
                "cannot import '{member}': '{class_name}' has no member '{member_name}'"
            )));
        }
        self.statics.insert(member_name.into(), class);
        Ok(())
    }

    /// The class a simple or qualified name refers to.
    pub fn resolve_class(&self, name: &str) -> Option<Arc<ClassDef>> {
        if let Some(class) = self.classes.get(name) {
            return Some(Arc::clone(class));
        }
        if let Some(class) = self.known.get(name) {
            return Some(Arc::clone(class));
        }
        self.packages.iter().find_map(|package| {
            self.known
                .get(format!("{package}.{name}").as_str())
                .cloned()
        })
    }

    /// The class owning the statically imported member `name`.
    pub fn resolve_static(&self, name: &str) -> Option<&Arc<ClassDef>> {
        self.statics.get(name)
    }
}

#[cfg(test)]
mod tests;
