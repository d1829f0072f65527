use serde::Serialize;
use std::fmt;

/// The kind of program element a facet factory analyses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Object,
    Property,
    Collection,
    Action,
    ActionParameter,
}

impl FeatureType {
    pub const OBJECTS_ONLY: &'static [FeatureType] = &[FeatureType::Object];
    pub const PROPERTIES_ONLY: &'static [FeatureType] = &[FeatureType::Property];
    pub const COLLECTIONS_ONLY: &'static [FeatureType] = &[FeatureType::Collection];
    pub const ACTIONS_ONLY: &'static [FeatureType] = &[FeatureType::Action];
    pub const PARAMETERS_ONLY: &'static [FeatureType] = &[FeatureType::ActionParameter];
    pub const PROPERTIES_AND_PARAMETERS: &'static [FeatureType] =
        &[FeatureType::Property, FeatureType::ActionParameter];
    pub const COLLECTIONS_AND_ACTIONS: &'static [FeatureType] =
        &[FeatureType::Collection, FeatureType::Action];
    pub const MEMBERS: &'static [FeatureType] = &[
        FeatureType::Property,
        FeatureType::Collection,
        FeatureType::Action,
    ];
    pub const EVERYTHING_BUT_PARAMETERS: &'static [FeatureType] = &[
        FeatureType::Object,
        FeatureType::Property,
        FeatureType::Collection,
        FeatureType::Action,
    ];
    pub const EVERYTHING: &'static [FeatureType] = &[
        FeatureType::Object,
        FeatureType::Property,
        FeatureType::Collection,
        FeatureType::Action,
        FeatureType::ActionParameter,
    ];

    pub fn is_association(self) -> bool {
        matches!(self, FeatureType::Property | FeatureType::Collection)
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeatureType::Object => "object",
            FeatureType::Property => "property",
            FeatureType::Collection => "collection",
            FeatureType::Action => "action",
            FeatureType::ActionParameter => "parameter",
        };
        f.write_str(label)
    }
}
