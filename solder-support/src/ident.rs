//! Identifier casing helpers for emitted source.
//!
//! The emitters derive method, field, and file names from type names;
//! everything funnels through [`snake_case`] so the derived names are
//! deterministic.

/// Converts a `CamelCase` type name to `snake_case`.
///
/// An underscore is inserted before every uppercase letter that follows a
/// lowercase letter or digit, and before the last capital of an acronym
/// run (`HTTPClient` → `http_client`).
///
/// # Examples
/// ```
/// use solder_support::ident::snake_case;
///
/// assert_eq!(snake_case("ConsoleSource"), "console_source");
/// assert_eq!(snake_case("Greeter"), "greeter");
/// assert_eq!(snake_case("HTTPClient"), "http_client");
/// assert_eq!(snake_case("already_snake"), "already_snake");
/// ```
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if i > 0 && (prev_lower || (chars[i - 1].is_uppercase() && next_lower)) {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}
