//! Maps proxy and enhancer classes back to the domain class they stand for

use regex::Regex;
use std::collections::BTreeSet;
use tracing::trace;

use crate::config::MetaModelConfig;
use crate::error::{Error, Result};
use crate::repository::ClassRepository;
use crate::types::{ClassDescriptor, ClassKind};

/// Framework superclasses that are never domain types themselves
const DEFAULT_SKIPPED: &[&str] = &[
    "org.apache.isis.applib.AbstractContainedObject",
    "org.apache.isis.applib.AbstractDomainObject",
    "org.apache.isis.applib.AbstractService",
    "org.apache.isis.applib.AbstractViewModel",
];

const DEFAULT_PROXY_PATTERNS: &[&str] = &[
    r"\$\$EnhancerByCGLIB\$\$",
    r"_\$\$_javassist",
    r"\$HibernateProxy\$",
    r"\$ByteBuddy\$",
];

const DEFAULT_PROXY_INTERFACES: &[&str] = &[
    "javassist.util.proxy.ProxyObject",
    "net.sf.cglib.proxy.Factory",
    "org.hibernate.proxy.HibernateProxy",
];

/// Guards against superclass cycles in hand-written models
const MAX_DEPTH: usize = 32;

/// Normalizes a class name before introspection.
///
/// `substitute` returns `None` for classes that must be skipped entirely.
/// Substitution is idempotent, and names it knows nothing about pass through
/// unchanged.
#[derive(Debug, Clone)]
pub struct ClassSubstitutor {
    skipped: BTreeSet<String>,
    proxy_patterns: Vec<Regex>,
    proxy_interfaces: BTreeSet<String>,
}

impl Default for ClassSubstitutor {
    fn default() -> Self {
        let proxy_patterns: Vec<Regex> = DEFAULT_PROXY_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();
        debug_assert_eq!(proxy_patterns.len(), DEFAULT_PROXY_PATTERNS.len());
        Self {
            skipped: DEFAULT_SKIPPED.iter().map(|s| s.to_string()).collect(),
            proxy_patterns,
            proxy_interfaces: DEFAULT_PROXY_INTERFACES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ClassSubstitutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus the classes listed under `metamodel.substitutor.ignore`
    pub fn from_config(config: &MetaModelConfig) -> Self {
        let mut substitutor = Self::default();
        substitutor
            .skipped
            .extend(config.substitutor_ignored_classes());
        substitutor
    }

    pub fn with_skipped(mut self, class_name: impl Into<String>) -> Self {
        self.skipped.insert(class_name.into());
        self
    }

    pub fn with_proxy_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::ConfigError(format!("Invalid proxy pattern '{pattern}': {e}")))?;
        self.proxy_patterns.push(regex);
        Ok(self)
    }

    pub fn with_proxy_interface(mut self, interface: impl Into<String>) -> Self {
        self.proxy_interfaces.insert(interface.into());
        self
    }

    pub fn is_skipped(&self, class_name: &str) -> bool {
        self.skipped.contains(class_name)
    }

    /// Whether `class` is a generated proxy of its superclass
    pub fn is_proxy(&self, class: &ClassDescriptor) -> bool {
        self.proxy_patterns.iter().any(|p| p.is_match(&class.name))
            || class
                .interfaces
                .iter()
                .any(|i| self.proxy_interfaces.contains(i))
    }

    pub fn substitute(&self, repository: &ClassRepository, class_name: &str) -> Option<String> {
        let resolved = self.resolve(repository, class_name, 0);
        if resolved.as_deref() != Some(class_name) {
            trace!("Substituted {class_name} with {resolved:?}");
        }
        resolved
    }

    fn resolve(&self, repository: &ClassRepository, class_name: &str, depth: usize) -> Option<String> {
        if self.is_skipped(class_name) {
            return None;
        }
        if depth >= MAX_DEPTH {
            return Some(class_name.to_string());
        }
        if let Some(component) = class_name.strip_suffix("[]") {
            let component = self.resolve(repository, component, depth + 1)?;
            return Some(format!("{component}[]"));
        }

        let Some(class) = repository.get(class_name) else {
            return Some(class_name.to_string());
        };
        let Some(superclass) = class.superclass.as_deref() else {
            return Some(class_name.to_string());
        };
        if class.kind != ClassKind::Enum && repository.is_enum(superclass) {
            // constant-specific enum body
            return self.resolve(repository, superclass, depth + 1);
        }
        if self.is_proxy(&class) {
            return self.resolve(repository, superclass, depth + 1);
        }
        Some(class_name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;

    fn repository() -> ClassRepository {
        let mut repository = ClassRepository::new();
        repository.register(ClassDescriptor::new("com.acme.Customer").extending("java.lang.Object"));
        repository.register_supporting(
            ClassDescriptor::new("com.acme.Customer$$EnhancerByCGLIB$$1a2b")
                .extending("com.acme.Customer"),
        );
        repository.register_supporting(
            ClassDescriptor::new("com.acme.Customer_$$_javassist_7")
                .extending("com.acme.Customer$$EnhancerByCGLIB$$1a2b"),
        );
        repository.register_supporting(
            ClassDescriptor::new("com.acme.CustomerProxy")
                .extending("com.acme.Customer")
                .implementing("javassist.util.proxy.ProxyObject"),
        );
        repository.register(
            ClassDescriptor::new("com.acme.Status")
                .of_kind(ClassKind::Enum)
                .extending("java.lang.Enum"),
        );
        repository.register_supporting(
            ClassDescriptor::new("com.acme.Status$1").extending("com.acme.Status"),
        );
        repository
    }

    #[test]
    fn test_proxies_walk_to_the_domain_class() {
        let repository = repository();
        let substitutor = ClassSubstitutor::new();

        for proxy in [
            "com.acme.Customer$$EnhancerByCGLIB$$1a2b",
            "com.acme.Customer_$$_javassist_7",
            "com.acme.CustomerProxy",
        ] {
            assert_eq!(
                substitutor.substitute(&repository, proxy).as_deref(),
                Some("com.acme.Customer"),
                "{proxy}"
            );
        }
    }

    #[test]
    fn test_arrays_and_enum_bodies() {
        let repository = repository();
        let substitutor = ClassSubstitutor::new();

        assert_eq!(
            substitutor
                .substitute(&repository, "com.acme.CustomerProxy[]")
                .as_deref(),
            Some("com.acme.Customer[]")
        );
        assert_eq!(
            substitutor.substitute(&repository, "com.acme.Status$1").as_deref(),
            Some("com.acme.Status")
        );
        assert_eq!(
            substitutor.substitute(&repository, "com.acme.Status").as_deref(),
            Some("com.acme.Status")
        );
    }

    #[test]
    fn test_skipped_classes_and_their_arrays() {
        let repository = repository();
        let config = MetaModelConfig::new().with(keys::SUBSTITUTOR_IGNORE, "com.acme.Internal");
        let substitutor = ClassSubstitutor::from_config(&config);

        assert_eq!(substitutor.substitute(&repository, "com.acme.Internal"), None);
        assert_eq!(substitutor.substitute(&repository, "com.acme.Internal[]"), None);
        assert_eq!(
            substitutor.substitute(&repository, "org.apache.isis.applib.AbstractService"),
            None
        );
    }

    #[test]
    fn test_idempotent_and_unknown_passthrough() {
        let repository = repository();
        let substitutor = ClassSubstitutor::new();

        for name in [
            "com.acme.Customer_$$_javassist_7",
            "com.acme.Status$1",
            "com.acme.Unknown",
            "com.acme.Unknown$$EnhancerByCGLIB$$ff",
        ] {
            let once = substitutor.substitute(&repository, name).unwrap();
            let twice = substitutor.substitute(&repository, &once).unwrap();
            assert_eq!(once, twice);
        }
        assert_eq!(
            substitutor.substitute(&repository, "com.acme.Unknown").as_deref(),
            Some("com.acme.Unknown")
        );
    }

    #[test]
    fn test_superclass_cycles_terminate() {
        let mut repository = ClassRepository::new();
        repository.register(
            ClassDescriptor::new("a.A$$EnhancerByCGLIB$$1").extending("a.B$$EnhancerByCGLIB$$2"),
        );
        repository.register(
            ClassDescriptor::new("a.B$$EnhancerByCGLIB$$2").extending("a.A$$EnhancerByCGLIB$$1"),
        );
        let substitutor = ClassSubstitutor::new();
        assert!(substitutor.substitute(&repository, "a.A$$EnhancerByCGLIB$$1").is_some());
    }

    #[test]
    fn test_builtin_proxy_patterns_compile() {
        for pattern in DEFAULT_PROXY_PATTERNS {
            assert!(Regex::new(pattern).is_ok(), "{pattern}");
        }
        assert_eq!(
            ClassSubstitutor::new().proxy_patterns.len(),
            DEFAULT_PROXY_PATTERNS.len()
        );
    }

    #[test]
    fn test_invalid_custom_pattern() {
        assert!(matches!(
            ClassSubstitutor::new().with_proxy_pattern("(["),
            Err(Error::ConfigError(_))
        ));
    }
}
