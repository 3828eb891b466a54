//! Routine content extractors, one per routine language.
//!
//! - RLL: rungs with comments and logic text
//! - ST: code blocks, whitespace preserved exactly
//! - FBD / SFC: element counts only, no layout

use crate::model::*;
use crate::xml;
use roxmltree::Node;

/// Extract every routine under `parent/Routines/Routine`, in source order.
pub fn extract_routines(parent: Node<'_, '_>) -> Vec<Routine> {
    xml::find_all(parent, "Routines/Routine")
        .into_iter()
        .map(extract_routine)
        .collect()
}

/// Extract one routine, dispatching on its `Type` attribute.
pub fn extract_routine(routine: Node<'_, '_>) -> Routine {
    let name = xml::attr(routine, "Name", "");
    let kind = xml::attr(routine, "Type", "");

    let content = match kind.as_str() {
        "RLL" => RoutineContent::Ladder(extract_rungs(routine)),
        "ST" => RoutineContent::StructuredText(extract_st_blocks(routine)),
        "FBD" => RoutineContent::FunctionBlock(summarize_fbd(routine)),
        "SFC" => RoutineContent::Chart(summarize_sfc(routine)),
        _ => {
            tracing::warn!(routine = %name, kind = %kind, "unsupported routine type");
            RoutineContent::Unsupported(kind)
        }
    };
    tracing::debug!(routine = %name, kind = content.kind(), "extracted routine");

    Routine {
        name,
        description: xml::description(routine),
        content,
    }
}

fn extract_rungs(routine: Node<'_, '_>) -> Vec<Rung> {
    xml::find_all(routine, "RLLContent/Rung")
        .into_iter()
        .map(extract_rung)
        .collect()
}

fn extract_rung(rung: Node<'_, '_>) -> Rung {
    let raw_number = xml::attr(rung, "Number", "");
    let number = raw_number.trim().parse::<u32>().ok();
    if number.is_none() {
        tracing::warn!(number = %raw_number, "rung without a valid number");
    }

    let comments = xml::find_children(rung, "Comment")
        .into_iter()
        .filter_map(|comment| {
            let text = xml::text(comment).trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(RungComment {
                operand: xml::attr_opt(comment, "Operand")
                    .filter(|o| !o.is_empty())
                    .map(str::to_string),
                text,
            })
        })
        .collect();

    // Online edits can leave the logic split over several Text elements.
    // Rung text is a single line, so only the exporter's line breaks go.
    let logic = xml::find_children(rung, "Text")
        .into_iter()
        .map(xml::text)
        .collect::<String>()
        .replace(['\r', '\n'], "");

    Rung {
        number,
        rung_type: xml::attr(rung, "Type", "N"),
        comments,
        logic,
    }
}

fn extract_st_blocks(routine: Node<'_, '_>) -> Vec<StBlock> {
    xml::find_children(routine, "STContent")
        .into_iter()
        .map(|content| StBlock {
            online_edit_type: xml::attr(content, "OnlineEditType", ""),
            code: st_code(content),
        })
        .collect()
}

/// Code of one `STContent`, line text untouched apart from the export wrapping.
fn st_code(content: Node<'_, '_>) -> String {
    let lines = xml::find_children(content, "Line");
    if lines.is_empty() {
        return unwrap_outer_newlines(&xml::text(content)).to_string();
    }
    lines
        .into_iter()
        .map(|line| unwrap_outer_newlines(&xml::text(line)).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip the single line break the exporter adds around directly embedded
/// CDATA. Indentation and inner blank lines stay.
fn unwrap_outer_newlines(text: &str) -> &str {
    let text = text
        .strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text);
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

const FBD_BLOCK_ELEMENTS: &[&str] = &["Block", "Function", "AddOnInstruction"];

fn summarize_fbd(routine: Node<'_, '_>) -> FbdSummary {
    let sheets = xml::find_all(routine, "FBDContent/Sheet");
    let mut summary = FbdSummary {
        sheets: sheets.len(),
        ..FbdSummary::default()
    };
    for sheet in sheets {
        summary.blocks += FBD_BLOCK_ELEMENTS
            .iter()
            .map(|name| xml::find_children(sheet, name).len())
            .sum::<usize>();
        summary.wires += xml::find_children(sheet, "Wire").len();
    }
    summary
}

fn summarize_sfc(routine: Node<'_, '_>) -> SfcSummary {
    let steps = xml::find_all(routine, "SFCContent/Step");
    SfcSummary {
        transitions: xml::find_all(routine, "SFCContent/Transition").len(),
        actions: steps
            .iter()
            .map(|step| xml::find_children(*step, "Action").len())
            .sum(),
        step_names: steps
            .iter()
            .map(|step| xml::attr_any(*step, &["Operand", "Name"], "unnamed"))
            .collect(),
        steps: steps.len(),
    }
}
