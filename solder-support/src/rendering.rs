//! Text rendering utilities for human-friendly diagnostics.
//!
//! Helpers to format dependency chains, shorten qualified type names,
//! and produce "did you mean?" suggestions in error output.

/// Renders a dependency chain as a readable string.
///
/// # Examples
/// ```
/// use solder_support::rendering::render_chain;
///
/// let chain = vec!["Greeter", "MessageSource", "Greeter"];
/// assert_eq!(render_chain(&chain), "Greeter → MessageSource → Greeter");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Shortens a fully qualified type name for display.
///
/// Keeps the last segment of every path component, so generic arguments
/// survive the shortening.
///
/// ```
/// use solder_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("app::data::LocalSource"), "LocalSource");
/// assert_eq!(
///     shorten_type_name("alloc::sync::Arc<dyn app::ports::Clock>"),
///     "Arc<dyn Clock>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut out = String::with_capacity(full_name.len());
    let mut segment = String::new();
    let mut chars = full_name.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                // path separator: everything before it was a module prefix
                segment.clear();
            }
            '<' | '>' | ',' | ' ' => {
                out.push_str(&segment);
                out.push(ch);
                segment.clear();
            }
            _ => segment.push(ch),
        }
    }

    out.push_str(&segment);
    out
}

/// Produces "did you mean?" suggestions for an unresolved type name.
///
/// Scores each candidate against the requested name (substring match of
/// the full or shortened names, then common-prefix length) and returns up
/// to `max_suggestions` of the best matches, best first. Ties keep the
/// candidates' input order, so the output is deterministic.
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let wanted = requested.to_lowercase();
    let wanted_short = shorten_type_name(requested).to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&candidate| {
            let name = candidate.to_lowercase();
            let short = shorten_type_name(candidate).to_lowercase();

            if name.contains(&wanted) || wanted.contains(&name) {
                return Some((candidate, 100));
            }
            if short.contains(&wanted_short) || wanted_short.contains(&short) {
                return Some((candidate, 80));
            }

            let prefix = short
                .chars()
                .zip(wanted_short.chars())
                .take_while(|(a, b)| a == b)
                .count();
            (prefix >= 3).then_some((candidate, prefix * 10))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}
