//! Tag classifiers: scope, usage and type/alias display.
//!
//! Usage inference is an ordered rule chain ([`USAGE_RULES`]). The first rule
//! whose predicate holds decides; a tag no rule matches is [`Usage::Unknown`].

use crate::model::{Scope, Tag, TagType, Usage};
use crate::xml;
use regex::Regex;
use roxmltree::Node;
use std::sync::LazyLock;

// Base address of an alias target, i.e. everything before the first member
// access: `Local:1:I.Data.3` -> `Local:1:I`.
static RE_IO_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^.\[]*:I(?:[.\[]|$)").unwrap());

static RE_IO_OUTPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^.\[]*:O(?:[.\[]|$)").unwrap());

/// Raw usage signals read from a tag element.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsageHints<'a> {
    /// `Usage` attribute as declared.
    pub declared: Option<&'a str>,
    /// `AliasFor` attribute as declared.
    pub alias_for: Option<&'a str>,
}

impl<'a> UsageHints<'a> {
    pub fn from_node(node: Node<'a, '_>) -> Self {
        Self {
            declared: xml::attr_opt(node, "Usage").filter(|v| !v.is_empty()),
            alias_for: xml::attr_opt(node, "AliasFor").filter(|v| !v.is_empty()),
        }
    }

    fn declared_is(&self, usage: &str) -> bool {
        self.declared.is_some_and(|d| d.eq_ignore_ascii_case(usage))
    }
}

/// One step of the usage rule chain.
pub struct UsageRule {
    pub name: &'static str,
    pub predicate: fn(&UsageHints) -> bool,
    pub usage: Usage,
}

/// Usage rules in evaluation order.
pub const USAGE_RULES: &[UsageRule] = &[
    UsageRule {
        name: "declared-input",
        predicate: |h| h.declared_is("Input"),
        usage: Usage::Input,
    },
    UsageRule {
        name: "declared-output",
        predicate: |h| h.declared_is("Output"),
        usage: Usage::Output,
    },
    UsageRule {
        name: "declared-local",
        predicate: |h| h.declared_is("Local"),
        usage: Usage::Local,
    },
    UsageRule {
        name: "alias-input-image",
        predicate: |h| h.alias_for.is_some_and(|a| RE_IO_INPUT.is_match(a)),
        usage: Usage::Input,
    },
    UsageRule {
        name: "alias-output-image",
        predicate: |h| h.alias_for.is_some_and(|a| RE_IO_OUTPUT.is_match(a)),
        usage: Usage::Output,
    },
    UsageRule {
        name: "alias-other",
        predicate: |h| h.alias_for.is_some(),
        usage: Usage::Local,
    },
];

/// Run the rule chain. Returns the usage and the name of the deciding rule.
pub fn classify_usage(hints: &UsageHints) -> (Usage, &'static str) {
    USAGE_RULES
        .iter()
        .find(|rule| (rule.predicate)(hints))
        .map(|rule| (rule.usage, rule.name))
        .unwrap_or((Usage::Unknown, "fallback"))
}

/// A declared `Usage` value that none of the `declared-*` rules accepted.
pub fn unrecognized_declared<'a>(hints: &UsageHints<'a>, rule: &str) -> Option<&'a str> {
    hints.declared.filter(|_| !rule.starts_with("declared-"))
}

/// Scope of a tag element, decided by where it sits in the tree.
///
/// A direct child of `Controller/Tags` is controller-scoped; otherwise the
/// nearest enclosing program (or add-on instruction) names the scope.
pub fn scope_of(node: Node<'_, '_>) -> Scope {
    let parent = node.parent_element();
    let grandparent = parent.and_then(|p| p.parent_element());
    if let (Some(p), Some(g)) = (parent, grandparent) {
        if xml::local_name(p) == "Tags" && xml::local_name(g) == "Controller" {
            return Scope::Controller;
        }
    }

    for ancestor in node.ancestors().filter(|a| a.is_element()) {
        match xml::local_name(ancestor) {
            "Program" => return Scope::Program(xml::attr(ancestor, "Name", "")),
            "AddOnInstructionDefinition" => {
                return Scope::Instruction(xml::attr(ancestor, "Name", ""))
            }
            _ => {}
        }
    }

    tracing::debug!(
        tag = %xml::attr(node, "Name", ""),
        "tag outside any program, treating as controller scope"
    );
    Scope::Controller
}

/// Type/alias display for a tag.
///
/// Aliases keep their literal first-level target; chains are not followed.
/// Otherwise the declared type is used verbatim, with `[dims]` appended for
/// arrays declared through a separate dimensions attribute.
pub fn tag_type(data_type: &str, dimensions: Option<&str>, alias_for: Option<&str>) -> TagType {
    if let Some(target) = alias_for.filter(|a| !a.is_empty()) {
        return TagType::Alias(target.to_string());
    }
    match dimensions.map(str::trim).filter(|d| is_array_dimension(d)) {
        Some(dims) if !data_type.contains('[') => TagType::Base(format!("{data_type}[{dims}]")),
        _ => TagType::Base(data_type.to_string()),
    }
}

/// True when a dimension attribute actually declares an array.
pub fn is_array_dimension(dims: &str) -> bool {
    !dims.is_empty() && dims.split([' ', ',']).any(|d| !d.is_empty() && d != "0")
}

/// Build the immutable tag record for a `Tag` or `LocalTag` element.
pub fn classify_tag(node: Node<'_, '_>) -> Tag {
    let hints = UsageHints::from_node(node);
    let name = xml::attr(node, "Name", "");
    let (usage, rule) = classify_usage(&hints);
    if let Some(declared) = unrecognized_declared(&hints, rule) {
        tracing::warn!(tag = %name, usage = declared, rule, "unrecognized usage value");
    } else if usage == Usage::Unknown {
        tracing::debug!(tag = %name, "no usage hint");
    }
    tracing::trace!(tag = %name, %usage, rule, "classified usage");

    Tag {
        tag_type: tag_type(
            xml::attr_opt(node, "DataType").unwrap_or(""),
            xml::attr_opt(node, "Dimensions"),
            hints.alias_for,
        ),
        scope: scope_of(node),
        usage,
        description: xml::description(node),
        name,
    }
}
