#![forbid(unsafe_code)]

//! Accessible names and live-region announcements.

use crate::config::Verbosity;

/// Label-bearing attributes of an element, as read by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSource {
    /// `aria-label`.
    pub aria_label: Option<String>,
    /// `aria-labelledby` ids, in document order.
    pub labelled_by: Vec<String>,
    /// Text content of the element.
    pub text_content: Option<String>,
}

/// Resolve the accessible name of an element.
///
/// Precedence: non-blank `aria-label`, then the text of the first
/// `aria-labelledby` id (looked up through `lookup`), then the element's own
/// text. All candidates are trimmed; the result is empty if none apply.
pub fn accessible_name<F>(source: &LabelSource, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    fn non_blank(text: Option<&str>) -> Option<String> {
        text.map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
    }

    if let Some(label) = non_blank(source.aria_label.as_deref()) {
        return label;
    }
    if let Some(label) = source
        .labelled_by
        .first()
        .and_then(|id| non_blank(lookup(id).as_deref()))
    {
        return label;
    }
    non_blank(source.text_content.as_deref()).unwrap_or_default()
}

/// Text to publish when `node_id` receives focus, or `None` when
/// announcements are off.
///
/// An empty `name` falls back to the node id. At [`Verbosity::Full`] a role,
/// when present, prefixes the name as `role: name`.
#[must_use]
pub fn announcement(
    name: &str,
    node_id: &str,
    role: Option<&str>,
    verbosity: Verbosity,
) -> Option<String> {
    let name = if name.is_empty() { node_id } else { name };
    match (verbosity, role) {
        (Verbosity::Off, _) => None,
        (Verbosity::Full, Some(role)) => Some(format!("{role}: {name}")),
        _ => Some(name.to_owned()),
    }
}
