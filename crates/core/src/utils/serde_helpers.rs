//! Serde helpers for hand-authored domain model files

/// Implements case-insensitive deserialization for fieldless enums, so model
/// files may write `"Enum"`, `"enum"` or `"ENUM"` interchangeably.
///
/// ```ignore
/// impl_case_insensitive_deserialize!(
///     ClassKind,
///     Class => "class",
///     Enum => "enum"
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_deserialize {
    ($enum_type:ty, $($variant:ident => $str_val:literal),+ $(,)?) => {
        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                let normalized = s.to_lowercase().replace(['-', ' '], "_");
                match normalized.as_str() {
                    $(
                        $str_val => Ok(Self::$variant),
                    )+
                    _ => Err(serde::de::Error::custom(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        [$($str_val),+].join(", ")
                    ))),
                }
            }
        }
    };
}
