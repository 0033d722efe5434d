//! Waypoint name sanitization and uniqueness

/// Replace a leading digit and every non-alphanumeric character with `_`
pub fn sanitize_name(requested: &str) -> String {
    requested
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i == 0 && c.is_ascii_digit() {
                '_'
            } else if c.is_ascii_alphanumeric() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Sanitize `requested` and make it unique among `existing`
///
/// A name already in use gets the smallest suffix above every numeric suffix
/// that existing names with the same prefix carry. An empty name is
/// suffixed after `_` so the result is itself a sanitized name.
pub fn unique_name<'a, I>(requested: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let clean = sanitize_name(requested);

    if !existing.clone().into_iter().any(|name| name == clean) {
        return clean;
    }

    let prefix = if clean.is_empty() { "_" } else { clean.as_str() };
    let highest = existing
        .into_iter()
        .filter_map(|name| name.strip_prefix(prefix))
        .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
        .map(|suffix| suffix.trim_start_matches('0'))
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .unwrap_or("");

    format!("{}{}", prefix, increment_decimal(highest))
}

/// Add one to a string of ASCII digits of any length
fn increment_decimal(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    let mut carry = true;
    for b in out.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
            break;
        }
    }
    let mut next: String = out.into_iter().map(char::from).collect();
    if carry {
        next.insert(0, '1');
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_name("1-bad name!"), "_bad_name_");
        assert_eq!(sanitize_name("Point"), "Point");
        assert_eq!(sanitize_name("P1"), "P1");
        assert_eq!(sanitize_name("9"), "_");
        assert_eq!(sanitize_name("grüße"), "gr__e");
        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn test_unused_name_kept() {
        let existing = ["A", "B"];
        assert_eq!(unique_name("C", existing.iter().copied()), "C");
    }

    #[test]
    fn test_suffix_above_highest() {
        let existing = ["Point", "Point1", "Point7", "PointX3"];
        assert_eq!(unique_name("Point", existing.iter().copied()), "Point8");
    }

    #[test]
    fn test_suffix_on_sanitized_name() {
        let existing = ["_bad_name_"];
        assert_eq!(unique_name("1-bad name!", existing.iter().copied()), "_bad_name_1");
    }

    #[test]
    fn test_empty_name_collision() {
        let existing = [""];
        assert_eq!(unique_name("", existing.iter().copied()), "_1");

        let existing = ["", "_1"];
        let next = unique_name("", existing.iter().copied());
        assert_eq!(next, "_2");
        assert_eq!(sanitize_name(&next), next);
    }

    #[test]
    fn test_suffix_beyond_u64() {
        let existing = ["P", "P18446744073709551615"];
        assert_eq!(unique_name("P", existing.iter().copied()), "P18446744073709551616");

        let existing = ["P", "P999", "P0042"];
        assert_eq!(unique_name("P", existing.iter().copied()), "P1000");
    }

    #[test]
    fn test_increment_decimal() {
        assert_eq!(increment_decimal(""), "1");
        assert_eq!(increment_decimal("7"), "8");
        assert_eq!(increment_decimal("199"), "200");
        assert_eq!(increment_decimal("99"), "100");
    }
}
