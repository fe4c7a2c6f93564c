//! Enum types and imported class definitions.

use std::fmt;
use std::sync::Arc;

use el_ir::Name;
use rustc_hash::FxHashMap;

use crate::native::NativeFunction;
use crate::value::Value;

/// An enum type: a name and its constants in ordinal order.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    name: Name,
    constants: Vec<Name>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<Name>, constants: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Name>,
    {
        Arc::new(EnumType {
            name: name.into(),
            constants: constants.into_iter().map(Into::into).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constants(&self) -> &[Name] {
        &self.constants
    }

    pub fn ordinal_of(&self, constant: &str) -> Option<usize> {
        self.constants.iter().position(|c| &**c == constant)
    }

    /// `Enum.valueOf`: the constant named `constant`, if any.
    pub fn value_of(self: &Arc<Self>, constant: &str) -> Option<Value> {
        self.ordinal_of(constant).map(|ordinal| {
            Value::Enum(EnumValue {
                ty: Arc::clone(self),
                ordinal,
            })
        })
    }

    pub fn values(self: &Arc<Self>) -> Vec<Value> {
        (0..self.constants.len())
            .map(|ordinal| {
                Value::Enum(EnumValue {
                    ty: Arc::clone(self),
                    ordinal,
                })
            })
            .collect()
    }
}

/// One enum constant.
#[derive(Clone)]
pub struct EnumValue {
    ty: Arc<EnumType>,
    ordinal: usize,
}

impl EnumValue {
    pub fn ty(&self) -> &Arc<EnumType> {
        &self.ty
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn name(&self) -> &str {
        self.ty.constants.get(self.ordinal).map_or("", |name| &**name)
    }

    /// True if both constants belong to the same enum type.
    pub fn same_type(&self, other: &EnumValue) -> bool {
        Arc::ptr_eq(&self.ty, &other.ty) || self.ty == other.ty
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal && self.same_type(other)
    }
}

impl Eq for EnumValue {}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.ty.name, self.name())
    }
}

/// A class made visible to expressions through the import handler.
///
/// Exposes static fields and static methods; an enum class additionally
/// exposes its constants as static fields.
#[derive(Clone, Debug)]
pub struct ClassDef {
    qualified_name: Name,
    name: Name,
    fields: FxHashMap<Name, Value>,
    methods: FxHashMap<Name, Arc<NativeFunction>>,
    enum_type: Option<Arc<EnumType>>,
}

impl ClassDef {
    /// A class named `qualified_name` (`java.lang.Math`); its simple name is
    /// the part after the last dot.
    pub fn new(qualified_name: impl Into<Name>) -> Self {
        let qualified_name: Name = qualified_name.into();
        let name: Name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&*qualified_name)
            .into();
        ClassDef {
            qualified_name,
            name,
            fields: FxHashMap::default(),
            methods: FxHashMap::default(),
            enum_type: None,
        }
    }

    /// An enum class whose constants are its static fields.
    pub fn enumeration<I, S>(qualified_name: impl Into<Name>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Name>,
    {
        let mut class = ClassDef::new(qualified_name);
        class.enum_type = Some(EnumType::new(Arc::clone(&class.name), constants));
        class
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<Name>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: NativeFunction) -> Self {
        self.methods.insert(method.name().into(), Arc::new(method));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Package part of the qualified name (empty for the default package).
    pub fn package(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or("", |(package, _)| package)
    }

    pub fn enum_type(&self) -> Option<&Arc<EnumType>> {
        self.enum_type.as_ref()
    }

    /// Static field or enum constant.
    pub fn field(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.fields.get(name) {
            return Some(value.clone());
        }
        self.enum_type.as_ref().and_then(|ty| ty.value_of(name))
    }

    pub fn method(&self, name: &str) -> Option<&Arc<NativeFunction>> {
        self.methods.get(name)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.field(name).is_some() || self.methods.contains_key(name)
    }
}

impl PartialEq for ClassDef {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for ClassDef {}
