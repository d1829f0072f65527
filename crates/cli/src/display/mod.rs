pub mod formatter;

pub use formatter::{format_failures, format_member, format_specification};
