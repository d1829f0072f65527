//! The class repository: the set of runtime type descriptors available for introspection

use crate::{
    error::{Error, Result},
    types::{ClassDescriptor, ClassKind, TypeRef},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Interfaces whose implementors are treated as collection types
pub const COLLECTION_INTERFACES: &[&str] = &[
    "java.util.Collection",
    "java.util.List",
    "java.util.Set",
    "java.util.SortedSet",
];

/// On-disk form of a domain model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainModel {
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
    /// Classes to introspect at startup; defaults to every declared class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introspect: Option<Vec<String>>,
}

/// All class descriptors known to the metamodel, keyed by binary name
#[derive(Debug, Clone, Default)]
pub struct ClassRepository {
    classes: BTreeMap<String, Arc<ClassDescriptor>>,
    domain_classes: Vec<String>,
}

impl ClassRepository {
    /// An empty repository holding only the builtin JDK-style types
    pub fn new() -> Self {
        let mut repository = Self::default();
        for builtin in builtin_classes() {
            repository
                .classes
                .insert(builtin.name.clone(), Arc::new(builtin));
        }
        repository
    }

    pub fn from_model(model: DomainModel) -> Self {
        let mut repository = Self::new();
        let explicit = model.introspect;
        for class in model.classes {
            if explicit.is_none() {
                repository.domain_classes.push(class.name.clone());
            }
            repository.classes.insert(class.name.clone(), Arc::new(class));
        }
        if let Some(explicit) = explicit {
            repository.domain_classes = explicit;
        }
        repository
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let model: DomainModel = serde_json::from_str(&contents)
            .map_err(|e| Error::ModelError(format!("Failed to parse {}: {e}", path.display())))?;
        debug!(
            "Loaded {} class descriptors from {}",
            model.classes.len(),
            path.display()
        );
        Ok(Self::from_model(model))
    }

    /// Register a domain class; it will be introspected by `SpecificationLoader::init`
    pub fn register(&mut self, class: ClassDescriptor) {
        if !self.domain_classes.contains(&class.name) {
            self.domain_classes.push(class.name.clone());
        }
        self.classes.insert(class.name.clone(), Arc::new(class));
    }

    /// Register a class that is resolvable but not introspected at startup
    pub fn register_supporting(&mut self, class: ClassDescriptor) {
        self.classes.insert(class.name.clone(), Arc::new(class));
    }

    pub fn remove(&mut self, class_name: &str) -> Option<Arc<ClassDescriptor>> {
        self.domain_classes.retain(|name| name != class_name);
        self.classes.remove(class_name)
    }

    /// Look up a class; array descriptors are synthesized on demand
    pub fn get(&self, class_name: &str) -> Option<Arc<ClassDescriptor>> {
        if let Some(class) = self.classes.get(class_name) {
            return Some(Arc::clone(class));
        }
        let component = class_name.strip_suffix("[]")?;
        Some(Arc::new(ClassDescriptor::array(TypeRef::simple(component))))
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.get(class_name).is_some()
    }

    pub fn domain_classes(&self) -> &[String] {
        &self.domain_classes
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether `class_name` is `ancestor` or inherits from it via superclasses or interfaces
    pub fn is_subtype_of(&self, class_name: &str, ancestor: &str) -> bool {
        let mut visited = HashSet::new();
        let mut pending = vec![class_name.to_string()];
        while let Some(current) = pending.pop() {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(class) = self.classes.get(&current) {
                pending.extend(class.superclass.iter().cloned());
                pending.extend(class.interfaces.iter().cloned());
            }
        }
        false
    }

    /// Arrays and anything implementing `java.util.Collection`
    pub fn is_collection_type(&self, class_name: &str) -> bool {
        if class_name.ends_with("[]") {
            return true;
        }
        COLLECTION_INTERFACES
            .iter()
            .any(|iface| self.is_subtype_of(class_name, iface))
    }

    pub fn is_primitive(&self, class_name: &str) -> bool {
        self.classes
            .get(class_name)
            .is_some_and(|class| class.kind == ClassKind::Primitive)
    }

    pub fn is_enum(&self, class_name: &str) -> bool {
        self.classes
            .get(class_name)
            .is_some_and(|class| class.kind == ClassKind::Enum)
    }
}

fn builtin_classes() -> Vec<ClassDescriptor> {
    let object = "java.lang.Object";
    let mut builtins = vec![
        ClassDescriptor::new(object),
        ClassDescriptor::new("java.lang.String").extending(object),
        ClassDescriptor::new("java.lang.Boolean").extending(object),
        ClassDescriptor::new("java.lang.Integer").extending("java.lang.Number"),
        ClassDescriptor::new("java.lang.Long").extending("java.lang.Number"),
        ClassDescriptor::new("java.lang.Number")
            .of_kind(ClassKind::Abstract)
            .extending(object),
        ClassDescriptor::new("java.lang.Enum")
            .of_kind(ClassKind::Abstract)
            .extending(object),
        ClassDescriptor::new("java.util.Collection").of_kind(ClassKind::Interface),
        ClassDescriptor::new("java.util.List")
            .of_kind(ClassKind::Interface)
            .implementing("java.util.Collection"),
        ClassDescriptor::new("java.util.Set")
            .of_kind(ClassKind::Interface)
            .implementing("java.util.Collection"),
        ClassDescriptor::new("java.util.SortedSet")
            .of_kind(ClassKind::Interface)
            .implementing("java.util.Set"),
        ClassDescriptor::new("java.util.ArrayList").implementing("java.util.List"),
        ClassDescriptor::new("java.util.TreeSet").implementing("java.util.SortedSet"),
    ];
    for primitive in ["void", "boolean", "int", "long"] {
        builtins.push(ClassDescriptor::new(primitive).of_kind(ClassKind::Primitive));
    }
    builtins
}
