//! Namespace-agnostic lookups over the parsed L5X tree.
//!
//! Export tools differ in whether they declare a default namespace on the
//! root element. Every lookup here compares local names only, so callers never
//! see the difference. Missing children and attributes are not errors: they
//! come back as `None`, an empty list, or the caller's default.

use roxmltree::Node;

/// Local (unqualified) name of an element.
pub fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// First child element with the given local name.
pub fn find_child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|c| c.is_element() && local_name(*c) == name)
}

/// All child elements with the given local name, in document order.
pub fn find_children<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Vec<Node<'a, 'i>> {
    node.children()
        .filter(|c| c.is_element() && local_name(*c) == name)
        .collect()
}

/// Every element reachable through a `/`-separated path of local names.
///
/// Intermediate steps fan out over all matches, so `Routines/Routine` finds
/// routines in every `Routines` container, in document order.
pub fn find_all<'a, 'i>(node: Node<'a, 'i>, path: &str) -> Vec<Node<'a, 'i>> {
    path.split('/').fold(vec![node], |nodes, segment| {
        nodes
            .into_iter()
            .flat_map(|n| find_children(n, segment))
            .collect()
    })
}

/// Attribute value by local name.
pub fn attr_opt<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|a| a.name() == name)
        .map(|a| a.value())
}

/// Attribute value by local name, or `default` when absent.
pub fn attr(node: Node<'_, '_>, name: &str, default: &str) -> String {
    attr_opt(node, name).unwrap_or(default).to_string()
}

/// First present attribute among `names`, or `default`.
pub fn attr_any(node: Node<'_, '_>, names: &[&str], default: &str) -> String {
    names
        .iter()
        .find_map(|name| attr_opt(node, name))
        .unwrap_or(default)
        .to_string()
}

/// Attribute interpreted as an L5X boolean (`true`/`false`, any case).
pub fn attr_flag(node: Node<'_, '_>, name: &str) -> bool {
    attr_opt(node, name).is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Concatenated text and CDATA content directly under an element.
pub fn text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

/// Description text of an entity, trimmed, or empty when there is none.
///
/// Falls back to the first `LocalizedDescription` for multilingual exports.
pub fn description(node: Node<'_, '_>) -> String {
    let Some(desc) = find_child(node, "Description") else {
        return String::new();
    };
    let direct = text(desc);
    if !direct.trim().is_empty() {
        return direct.trim().to_string();
    }
    find_child(desc, "LocalizedDescription")
        .map(|localized| text(localized).trim().to_string())
        .unwrap_or_default()
}
