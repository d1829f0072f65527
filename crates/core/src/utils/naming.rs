//! Naming conventions shared by the introspector and facet factories

use std::cmp::Ordering;

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Java-beans decapitalization: `Name` -> `name`, but `URL` stays `URL`
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if let Some(second) = chars.clone().next() {
        if first.is_uppercase() && second.is_uppercase() {
            return name.to_string();
        }
    }
    first.to_lowercase().chain(chars).collect()
}

/// Whether `name` is `prefix` followed by an upper-case letter or digit
pub fn starts_with_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
}

/// `getFirstName` -> `firstName`, `isActive` -> `active`
pub fn accessor_property_name(method_name: &str) -> Option<String> {
    ["get", "is"]
        .iter()
        .find(|prefix| starts_with_prefix(method_name, prefix))
        .map(|prefix| decapitalize(&method_name[prefix.len()..]))
}

/// `firstName` -> `First Name`, `placeOrder` -> `Place Order`
pub fn natural_name(id: &str) -> String {
    let mut natural = String::with_capacity(id.len() + 4);
    let mut previous: Option<char> = None;
    for c in id.chars() {
        if let Some(p) = previous {
            let word_break = (c.is_uppercase() && !p.is_uppercase())
                || (c.is_ascii_digit() && !p.is_ascii_digit());
            if word_break {
                natural.push(' ');
            }
        } else {
            natural.extend(c.to_uppercase());
            previous = Some(c);
            continue;
        }
        natural.push(c);
        previous = Some(c);
    }
    natural
}

/// Dewey-decimal comparison of member order sequences: `1.10` sorts after `1.9`.
/// Non-numeric components compare lexically.
pub fn compare_sequence(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.trim().parse::<u64>(), r.trim().parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decapitalize_follows_bean_rules() {
        assert_eq!(decapitalize("FirstName"), "firstName");
        assert_eq!(decapitalize("URL"), "URL");
        assert_eq!(decapitalize("X"), "x");
        assert_eq!(decapitalize(""), "");
    }

    #[test]
    fn test_prefix_requires_word_boundary() {
        assert!(starts_with_prefix("getName", "get"));
        assert!(starts_with_prefix("choices0PlaceOrder", "choices"));
        assert!(!starts_with_prefix("getaway", "get"));
        assert!(!starts_with_prefix("get", "get"));
    }

    #[test]
    fn test_accessor_property_name() {
        assert_eq!(accessor_property_name("getOrders").as_deref(), Some("orders"));
        assert_eq!(accessor_property_name("isActive").as_deref(), Some("active"));
        assert_eq!(accessor_property_name("island"), None);
    }

    #[test]
    fn test_natural_name() {
        assert_eq!(natural_name("firstName"), "First Name");
        assert_eq!(natural_name("placeOrder"), "Place Order");
        assert_eq!(natural_name("address2"), "Address 2");
        assert_eq!(natural_name("URL"), "URL");
    }

    #[test]
    fn test_dewey_ordering() {
        assert_eq!(compare_sequence("1.9", "1.10"), Ordering::Less);
        assert_eq!(compare_sequence("2", "1.5"), Ordering::Greater);
        assert_eq!(compare_sequence("1", "1.1"), Ordering::Less);
        assert_eq!(compare_sequence("1.0", "1.0"), Ordering::Equal);
    }
}
