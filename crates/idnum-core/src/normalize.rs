//! # Input Normalization
//!
//! Turns raw user input into the canonical form every validator consumes.
//! Normalization never fails: an empty or garbage result is rejected later by
//! the kind's structural checks.
//!
//! ## Steps
//!
//! 1. Fold look-alike punctuation (Unicode dashes, typographic spaces,
//!    fullwidth full stop) to ASCII and drop zero-width characters.
//! 2. Remove every character listed in `separators`.
//! 3. Trim leading and trailing whitespace.
//! 4. Apply the [`CasePolicy`].
//!
//! Letters and digits are never folded, so text is carried as Unicode scalar
//! values throughout (`Ñ` stays one `char`).

/// Case normalization applied after separator removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    /// Leave case untouched.
    Preserve,
    /// Upper-case the whole string.
    Upper,
    /// Lower-case the whole string.
    Lower,
    /// Lower-case the whole string if it starts with one of the given
    /// prefixes, compared case-insensitively; otherwise leave it untouched.
    LowerIfPrefix(&'static [&'static str]),
}

/// Fold a single character. `None` means the character is dropped.
fn fold_char(c: char) -> Option<char> {
    match c {
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}' => Some('-'),
        '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => Some(' '),
        '\u{FF0E}' => Some('.'),
        '\u{200B}'..='\u{200D}' | '\u{FEFF}' => None,
        other => Some(other),
    }
}

/// Normalize `raw` into canonical form.
///
/// Never raises; see the module docs for the exact steps.
pub fn compact(raw: &str, separators: &str, case: CasePolicy) -> String {
    let stripped: String = raw
        .chars()
        .filter_map(fold_char)
        .filter(|c| !separators.contains(*c))
        .collect();
    apply_case(stripped.trim(), case)
}

/// Fold punctuation and trim, without removing separators or changing case.
///
/// Used by kinds that need to split on separators before removing them.
pub fn clean(raw: &str) -> String {
    let folded: String = raw.chars().filter_map(fold_char).collect();
    folded.trim().to_string()
}

fn apply_case(s: &str, case: CasePolicy) -> String {
    match case {
        CasePolicy::Preserve => s.to_string(),
        CasePolicy::Upper => s.to_uppercase(),
        CasePolicy::Lower => s.to_lowercase(),
        CasePolicy::LowerIfPrefix(prefixes) => {
            if prefixes.iter().any(|p| starts_with_ignore_case(s, p)) {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        }
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// True if every character is an ASCII digit. The empty string qualifies;
/// callers check length separately.
pub fn all_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// Left-pad `s` with `'0'` to `width` characters. Longer input is returned
/// unchanged.
pub fn zero_pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let mut out = "0".repeat(width - len);
    out.push_str(s);
    out
}

/// Digit values of an all-digit string, or `None` if any character is not
/// an ASCII digit.
pub fn digit_values(s: &str) -> Option<Vec<u32>> {
    s.chars().map(|c| c.to_digit(10)).collect()
}
