//! Recognized configuration keys

/// Attach `FilterVisibility` to collections and collection-returning actions
pub const FILTER_VISIBILITY: &str = "metamodel.reflector.facet.filter_visibility";

/// Whether layouts supplied by the grid service may be reloaded at runtime
pub const LAYOUT_RELOAD: &str = "metamodel.reflector.layout.reload";

/// Comma-separated names of facet factories to leave out of the programming model
pub const FACETS_EXCLUDE: &str = "metamodel.reflector.facets.exclude";

pub const VALIDATE_ORPHANED_METHODS: &str = "metamodel.reflector.validator.orphaned_methods";

pub const VALIDATE_UNIQUE_OBJECT_TYPES: &str = "metamodel.reflector.validator.unique_object_types";

/// Minimum search length for auto-complete supporting methods
pub const AUTO_COMPLETE_MIN_LENGTH: &str = "metamodel.reflector.auto_complete.min_length";

/// Comma-separated class names the substitutor should skip entirely
pub const SUBSTITUTOR_IGNORE: &str = "metamodel.substitutor.ignore";

pub const ALL: &[&str] = &[
    FILTER_VISIBILITY,
    LAYOUT_RELOAD,
    FACETS_EXCLUDE,
    VALIDATE_ORPHANED_METHODS,
    VALIDATE_UNIQUE_OBJECT_TYPES,
    AUTO_COMPLETE_MIN_LENGTH,
    SUBSTITUTOR_IGNORE,
];
