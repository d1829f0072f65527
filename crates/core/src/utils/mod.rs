pub mod naming;
pub mod serde_helpers;
