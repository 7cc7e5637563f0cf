/// Normalizes a phone number to its digits-only international form.
///
/// Strips every non-digit character (spaces, dashes, a leading '+') and
/// accepts the result only if it is 11 to 15 digits long.
pub fn normalize(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if (11..=15).contains(&digits.len()) {
        Some(digits)
    } else {
        None
    }
}
