//! Collaborator services the metamodel consumes but does not implement

use crate::types::ClassDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A UI layout for a domain class, opaque to the metamodel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Where the layout came from, e.g. a file name
    pub source: String,
    pub layout: serde_json::Value,
}

/// Supplies layouts for domain classes. `None` means "no layout" and is valid.
pub trait GridService: Send + Sync {
    fn grid_for(&self, class: &ClassDescriptor) -> Option<Grid>;
}

/// Translates user-facing names and descriptions
pub trait TranslationService: Send + Sync {
    fn translate(&self, context: &str, text: &str) -> String;
}

/// Optional collaborators handed to facet factories
#[derive(Clone, Default)]
pub struct Services {
    pub grid: Option<Arc<dyn GridService>>,
    pub translation: Option<Arc<dyn TranslationService>>,
}

impl Services {
    pub fn with_grid_service(mut self, service: Arc<dyn GridService>) -> Self {
        self.grid = Some(service);
        self
    }

    pub fn with_translation_service(mut self, service: Arc<dyn TranslationService>) -> Self {
        self.translation = Some(service);
        self
    }

    /// Translate `text` if a translation service is present
    pub fn translate(&self, context: &str, text: &str) -> String {
        match &self.translation {
            Some(service) => service.translate(context, text),
            None => text.to_string(),
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("grid", &self.grid.is_some())
            .field("translation", &self.translation.is_some())
            .finish()
    }
}

/// Grid service backed by an in-memory map of class name to layout
#[derive(Debug, Clone, Default)]
pub struct StaticGridService {
    grids: HashMap<String, Grid>,
}

impl StaticGridService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, class_name: impl Into<String>, grid: Grid) -> Self {
        self.grids.insert(class_name.into(), grid);
        self
    }
}

impl GridService for StaticGridService {
    fn grid_for(&self, class: &ClassDescriptor) -> Option<Grid> {
        self.grids.get(&class.name).cloned()
    }
}
