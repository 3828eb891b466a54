//! Routine blocks, shared by the programs and add-on instruction reports.

use crate::model::*;
use crate::render::layout::{self, BLOCK_RULE_WIDTH, ROUTINE_RULE_WIDTH};

/// Append one routine, framed and indented by `indent`.
pub fn render_routine(lines: &mut Vec<String>, routine: &Routine, indent: &str) {
    let frame = "=".repeat(ROUTINE_RULE_WIDTH);
    lines.push(String::new());
    lines.push(format!("{indent}{frame}"));
    lines.push(format!(
        "{indent}ROUTINE: {} ({})",
        routine.name,
        routine.content.kind()
    ));
    if !routine.description.is_empty() {
        layout::labeled(lines, indent, "Desc", &routine.description);
    }
    lines.push(format!("{indent}{frame}"));

    match &routine.content {
        RoutineContent::Ladder(rungs) => {
            if rungs.is_empty() {
                lines.push(format!("{indent}(No rungs)"));
            }
            for rung in rungs {
                render_rung(lines, rung, indent);
            }
        }
        RoutineContent::StructuredText(blocks) => {
            if blocks.is_empty() {
                lines.push(format!("{indent}(No code)"));
            }
            for block in blocks {
                render_st_block(lines, block, indent);
            }
        }
        RoutineContent::FunctionBlock(fbd) => {
            lines.push(format!("{indent}[Function Block Diagram]"));
            lines.push(format!(
                "{indent}  Sheets: {}, Blocks: {}, Wires: {}",
                fbd.sheets, fbd.blocks, fbd.wires
            ));
            lines.push(format!(
                "{indent}  Note: Function Block Diagram - graphical content summary only"
            ));
        }
        RoutineContent::Chart(sfc) => {
            lines.push(format!("{indent}[Sequential Function Chart]"));
            lines.push(format!(
                "{indent}  Steps: {}, Transitions: {}, Actions: {}",
                sfc.steps, sfc.transitions, sfc.actions
            ));
            if !sfc.step_names.is_empty() {
                lines.push(format!("{indent}  Step Names: {}", sfc.step_names.join(", ")));
            }
            lines.push(format!(
                "{indent}  Note: Sequential Function Chart - structure summary only"
            ));
        }
        RoutineContent::Unsupported(kind) => {
            lines.push(format!("{indent}[Unsupported Routine Type: {kind}]"));
            lines.push(format!(
                "{indent}  Logic parsing for routine type \"{kind}\" is not implemented"
            ));
        }
    }
}

fn render_rung(lines: &mut Vec<String>, rung: &Rung, indent: &str) {
    match rung.number {
        Some(n) => lines.push(format!("{indent}[Rung {n}]")),
        None => lines.push(format!("{indent}[Rung ?]")),
    }
    if rung.rung_type != "N" {
        lines.push(format!("{indent}  (Type: {})", rung.rung_type));
    }
    for comment in &rung.comments {
        let text = match &comment.operand {
            Some(operand) => format!("Operand {operand}: {}", comment.text),
            None => comment.text.clone(),
        };
        render_comment(lines, &text, indent);
    }
    if !rung.logic.is_empty() {
        lines.push(format!("{indent}  {}", rung.logic));
    }
    lines.push(format!("{indent}  {}", "-".repeat(BLOCK_RULE_WIDTH)));
}

/// `/* ... */` with continuation lines aligned under the opening text.
fn render_comment(lines: &mut Vec<String>, text: &str, indent: &str) {
    let body: Vec<&str> = text.lines().map(str::trim_end).collect();
    let last = body.len().saturating_sub(1);
    for (i, line) in body.iter().enumerate() {
        let open = if i == 0 { "/* " } else { "   " };
        let close = if i == last { " */" } else { "" };
        lines.push(format!("{indent}  {open}{line}{close}").trim_end().to_string());
    }
}

fn render_st_block(lines: &mut Vec<String>, block: &StBlock, indent: &str) {
    if block.online_edit_type.is_empty() {
        lines.push(format!("{indent}[Structured Text Code]"));
    } else {
        lines.push(format!(
            "{indent}[Structured Text - Online Edit: {}]",
            block.online_edit_type
        ));
    }
    let rule = format!("{indent}  {}", "-".repeat(BLOCK_RULE_WIDTH));
    lines.push(rule.clone());
    for line in block.code.split('\n') {
        if line.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{indent}  {line}"));
        }
    }
    lines.push(rule);
}
