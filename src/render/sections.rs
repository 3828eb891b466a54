//! The seven section reports.

use crate::model::*;
use crate::render::layout::{
    self, Table, MEMBER_COLUMNS, MODULE_COLUMNS, PARAMETER_COLUMNS, TAG_COLUMNS,
};
use crate::render::routine::render_routine;

/// Controller attributes listed first, in this order.
const PRIORITY_FIELDS: &[&str] = &["Name", "ProcessorType", "Revision"];

pub fn controller_info(project: &Project) -> Vec<String> {
    let mut lines = Vec::new();
    let info = &project.controller;
    layout::banner(&mut lines, "CONTROLLER INFO");

    let lookup = |key: &str| {
        info.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };
    for field in PRIORITY_FIELDS {
        let value = match *field {
            "Revision" => lookup("Revision").or_else(|| revision_from_parts(&lookup)),
            other => lookup(other),
        };
        if let Some(value) = value {
            lines.push(format!("{field}: {value}"));
        }
    }
    if !info.description.is_empty() {
        layout::labeled(&mut lines, "", "Description", &info.description);
    }
    for (key, value) in &info.attributes {
        if !PRIORITY_FIELDS.contains(&key.as_str()) {
            lines.push(format!("{key}: {value}"));
        }
    }

    if !project.export.is_empty() {
        lines.push(String::new());
        layout::banner(&mut lines, "EXPORT");
        for (key, value) in &project.export {
            lines.push(format!("{key}: {value}"));
        }
    }
    lines
}

/// `MajorRev.MinorRev`, for exports that carry no `Revision` attribute.
fn revision_from_parts(lookup: &dyn Fn(&str) -> Option<String>) -> Option<String> {
    let major = lookup("MajorRev")?;
    Some(match lookup("MinorRev") {
        Some(minor) => format!("{major}.{minor}"),
        None => major,
    })
}

pub fn tags(project: &Project) -> Vec<String> {
    let mut lines = Vec::new();
    layout::banner(
        &mut lines,
        &format!("CONTROLLER TAGS - Found {}", project.tags.len()),
    );
    tag_table(&mut lines, &project.tags, "");
    if project.tags.is_empty() {
        lines.push("(No tags)".to_string());
    }
    lines
}

/// Header, rule and one row per tag.
fn tag_table(lines: &mut Vec<String>, tags: &[Tag], indent: &str) {
    let table = Table::new(TAG_COLUMNS, indent);
    table.header(lines);
    for tag in tags {
        let tag_type = tag.tag_type.to_string();
        let description = layout::table_text(&tag.description);
        lines.push(table.row(&[&tag.name, tag.usage.as_str(), &tag_type, &description]));
    }
}

pub fn data_types(project: &Project) -> Vec<String> {
    let mut lines = Vec::new();
    let user_types: Vec<&DataType> = project
        .data_types
        .iter()
        .filter(|dt| dt.class.is_empty() || dt.class == "User")
        .collect();
    layout::banner(
        &mut lines,
        &format!("USER DEFINED TYPES (UDTs) - Found {}", user_types.len()),
    );

    let table = Table::new(MEMBER_COLUMNS, "  ");
    for dt in user_types {
        lines.push(String::new());
        lines.push(format!("UDT: {}", dt.name));
        if !dt.family.is_empty() && dt.family != "NoFamily" {
            lines.push(format!("Family: {}", dt.family));
        }
        if !dt.description.is_empty() {
            layout::labeled(&mut lines, "", "Desc", &dt.description);
        }
        lines.push("-".repeat(60));

        let visible: Vec<&Member> = dt.members.iter().filter(|m| !m.hidden).collect();
        if visible.is_empty() {
            lines.push("  (No members)".to_string());
            continue;
        }
        table.header(&mut lines);
        for member in visible {
            let data_type = if member.dimension.is_empty() {
                member.data_type.clone()
            } else {
                format!("{}[{}]", member.data_type, member.dimension)
            };
            let description = layout::table_text(&member.description);
            lines.push(table.row(&[&member.name, &data_type, &description]));
        }
    }
    lines
}

pub fn instructions(project: &Project) -> Vec<String> {
    let mut lines = Vec::new();
    layout::banner(
        &mut lines,
        &format!(
            "ADD-ON INSTRUCTIONS (AOIs) - Found {}",
            project.instructions.len()
        ),
    );

    let params = Table::new(PARAMETER_COLUMNS, "  ");
    for aoi in &project.instructions {
        lines.push(String::new());
        lines.push("#".repeat(layout::BANNER_WIDTH));
        lines.push(format!("AOI: {}", aoi.name));
        if !aoi.revision.is_empty() {
            lines.push(format!("Revision: {}", aoi.revision));
        }
        if !aoi.vendor.is_empty() {
            lines.push(format!("Vendor: {}", aoi.vendor));
        }
        if !aoi.description.is_empty() {
            layout::labeled(&mut lines, "", "Desc", &aoi.description);
        }
        lines.push("=".repeat(70));

        lines.push(String::new());
        lines.push(format!("  [PARAMETERS] - Found {}", aoi.parameters.len()));
        if !aoi.parameters.is_empty() {
            params.header(&mut lines);
            for p in &aoi.parameters {
                let marker = if p.required { "*" } else { " " };
                let name = format!("{marker}{}", p.name);
                let description = layout::table_text(&p.description);
                lines.push(params.row(&[&name, &p.usage, &p.data_type, &description]));
            }
        }

        lines.push(String::new());
        lines.push(format!("  [LOCAL TAGS] - Found {}", aoi.local_tags.len()));
        if !aoi.local_tags.is_empty() {
            tag_table(&mut lines, &aoi.local_tags, "  ");
        }

        lines.push(String::new());
        lines.push(format!("  [ROUTINES] - Found {}", aoi.routines.len()));
        for routine in &aoi.routines {
            render_routine(&mut lines, routine, "    ");
        }
    }
    lines
}

pub fn modules(project: &Project) -> Vec<String> {
    let mut lines = Vec::new();
    layout::banner(
        &mut lines,
        &format!("I/O MODULES - Found {}", project.modules.len()),
    );
    lines.push(String::new());

    let table = Table::new(MODULE_COLUMNS, "");
    table.header(&mut lines);
    for module in &project.modules {
        let parent = match &module.parent {
            Some(p) if p.port.is_empty() => p.module.clone(),
            Some(p) => format!("{}:{}", p.module, p.port),
            None => "-".to_string(),
        };
        let mut description = layout::table_text(&module.description);
        if module.inhibited {
            description = format!("[Inhibited] {description}");
        }
        lines.push(table.row(&[
            &module.name,
            &module.catalog_number,
            &parent,
            &description,
        ]));
    }

    let with_ports: Vec<&Module> = project
        .modules
        .iter()
        .filter(|m| !m.ports.is_empty())
        .collect();
    if !with_ports.is_empty() {
        lines.push(String::new());
        lines.push("PORTS".to_string());
        lines.push("-".repeat(layout::BANNER_WIDTH));
        for module in with_ports {
            lines.push(format!("{}:", module.name));
            for port in &module.ports {
                lines.push(port_line(port));
            }
        }
    }
    lines
}

/// `  Port 1: Compact, Address 0 (upstream)`
fn port_line(port: &Port) -> String {
    let mut line = format!("  Port {}: {}", port.id, port.port_type);
    if !port.address.is_empty() {
        line.push_str(&format!(", Address {}", port.address));
    }
    if port.upstream {
        line.push_str(" (upstream)");
    }
    line
}

pub fn tasks(project: &Project) -> Vec<String> {
    let mut lines = Vec::new();
    layout::banner(&mut lines, &format!("TASKS - Found {}", project.tasks.len()));

    for task in &project.tasks {
        lines.push(String::new());
        lines.push(format!("TASK: {}", task.name));
        lines.push(format!("  Type: {}", task.task_type));
        if !task.rate.is_empty() {
            lines.push(format!("  Rate: {} ms", task.rate));
        }
        lines.push(format!("  Priority: {}", task.priority));
        if !task.watchdog.is_empty() {
            lines.push(format!("  Watchdog: {} ms", task.watchdog));
        }
        if let Some(event) = &task.event {
            if event.tag.is_empty() {
                lines.push(format!("  Event Trigger: {}", event.trigger));
            } else {
                lines.push(format!("  Event Trigger: {} ({})", event.trigger, event.tag));
            }
        }
        if task.inhibited {
            lines.push("  *** TASK INHIBITED ***".to_string());
        }
        if !task.description.is_empty() {
            layout::labeled(&mut lines, "  ", "Desc", &task.description);
        }
        if !task.scheduled_programs.is_empty() {
            lines.push("  Scheduled Programs:".to_string());
            for program in &task.scheduled_programs {
                lines.push(format!("    - {program}"));
            }
        }
    }
    lines
}

pub fn programs(project: &Project) -> Vec<String> {
    let mut lines = Vec::new();
    layout::banner(
        &mut lines,
        &format!("PROGRAMS - Found {}", project.programs.len()),
    );

    for program in &project.programs {
        lines.push(String::new());
        lines.push(format!("PROGRAM: {}", program.name));
        if !program.description.is_empty() {
            layout::labeled(&mut lines, "", "Desc", &program.description);
        }
        if let Some(main) = &program.main_routine {
            lines.push(format!("Main Routine: {main}"));
        }
        if let Some(fault) = &program.fault_routine {
            lines.push(format!("Fault Routine: {fault}"));
        }
        if !program.class.is_empty() && program.class != "Standard" {
            lines.push(format!("Class: {}", program.class));
        }
        if program.disabled {
            lines.push("*** PROGRAM DISABLED ***".to_string());
        }
        lines.push("=".repeat(75));

        lines.push(String::new());
        lines.push(format!("  [LOCAL TAGS] - Found {}", program.tags.len()));
        if !program.tags.is_empty() {
            tag_table(&mut lines, &program.tags, "  ");
        }

        lines.push(String::new());
        lines.push(format!(
            "  [ROUTINES & LOGIC] - Found {}",
            program.routines.len()
        ));
        for routine in &program.routines {
            render_routine(&mut lines, routine, "    ");
        }

        lines.push(String::new());
        lines.push("#".repeat(layout::BANNER_WIDTH));
    }
    lines
}
