/// Extract the domain part of an email address.
///
/// Takes everything after the last `@`, trimmed and lower-cased.
/// Returns an empty string when the address has no `@` at all.
pub fn domain_of(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.trim().to_lowercase(),
        None => String::new(),
    }
}
