use std::collections::BTreeSet;

pub const MAX_VARIANT_LENGTH: usize = 30;

const NUMERIC_SUFFIXES: [&str; 4] = ["1", "123", "2023", "2024"];
const SEPARATORS: [&str; 3] = ["_", ".", "-"];

/// Builds the candidate spellings searched for a username.
///
/// Returned sorted; empty candidates and candidates longer than
/// [`MAX_VARIANT_LENGTH`] characters are dropped.
pub fn generate_variants(username: &str) -> Vec<String> {
    let mut variants = BTreeSet::new();

    variants.insert(username.to_string());
    variants.insert(username.replace(' ', ""));
    for sep in SEPARATORS {
        variants.insert(username.replace(' ', sep));
    }
    for trailing in ["_", "-", "."] {
        variants.insert(format!("{username}{trailing}"));
    }
    for suffix in NUMERIC_SUFFIXES {
        variants.insert(format!("{username}{suffix}"));
    }

    variants.insert(leetspeak(username));
    variants.insert(username.to_lowercase());
    variants.insert(username.to_uppercase());
    variants.insert(title_case(username));
    variants.insert(username.chars().rev().collect());

    for prefix in ["real", "official", "the"] {
        variants.insert(format!("{prefix}{username}"));
    }
    variants.insert(format!("{username}official"));

    variants
        .into_iter()
        .filter(|v| !v.is_empty() && v.chars().count() <= MAX_VARIANT_LENGTH)
        .collect()
}

fn leetspeak(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'a' => '4',
            'e' => '3',
            'i' => '1',
            'o' => '0',
            other => other,
        })
        .collect()
}

// Uppercase a letter that follows a non-letter, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}
