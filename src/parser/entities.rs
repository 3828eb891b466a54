//! Extractors for the controller-level entity sections.

use crate::classify;
use crate::model::*;
use crate::parser::routine;
use crate::xml;
use roxmltree::Node;
use std::collections::HashSet;

pub fn controller_info(controller: Node<'_, '_>) -> ControllerInfo {
    ControllerInfo {
        attributes: attributes(controller),
        description: xml::description(controller),
    }
}

/// All attributes of an element as owned pairs, in source order.
pub fn attributes(node: Node<'_, '_>) -> Vec<(String, String)> {
    node.attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect()
}

/// Classify every tag under `container_path`; duplicate names are reported
/// and kept.
pub fn tags(parent: Node<'_, '_>, container_path: &str) -> Vec<Tag> {
    let tags: Vec<Tag> = xml::find_all(parent, container_path)
        .into_iter()
        .map(classify::classify_tag)
        .collect();

    {
        let mut seen = HashSet::new();
        for tag in &tags {
            if !seen.insert(tag.name.as_str()) {
                tracing::warn!(tag = %tag.name, scope = %tag.scope, "duplicate tag name in scope");
            }
        }
    }
    tags
}

pub fn data_types(controller: Node<'_, '_>) -> Vec<DataType> {
    xml::find_all(controller, "DataTypes/DataType")
        .into_iter()
        .map(|dt| DataType {
            name: xml::attr(dt, "Name", ""),
            family: xml::attr(dt, "Family", ""),
            class: xml::attr(dt, "Class", ""),
            description: xml::description(dt),
            members: xml::find_all(dt, "Members/Member")
                .into_iter()
                .map(member)
                .collect(),
        })
        .collect()
}

fn member(node: Node<'_, '_>) -> Member {
    let dimension = xml::attr(node, "Dimension", "");
    Member {
        name: xml::attr(node, "Name", ""),
        data_type: xml::attr(node, "DataType", ""),
        dimension: if classify::is_array_dimension(dimension.trim()) {
            dimension.trim().to_string()
        } else {
            String::new()
        },
        hidden: xml::attr_flag(node, "Hidden"),
        description: xml::description(node),
    }
}

pub fn instructions(controller: Node<'_, '_>) -> Vec<AddOnInstruction> {
    xml::find_all(
        controller,
        "AddOnInstructionDefinitions/AddOnInstructionDefinition",
    )
    .into_iter()
    .map(|aoi| {
        let name = xml::attr(aoi, "Name", "");
        tracing::debug!(instruction = %name, "extracting add-on instruction");
        AddOnInstruction {
            revision: xml::attr(aoi, "Revision", ""),
            vendor: xml::attr(aoi, "Vendor", ""),
            description: xml::description(aoi),
            parameters: xml::find_all(aoi, "Parameters/Parameter")
                .into_iter()
                .map(|p| Parameter {
                    name: xml::attr(p, "Name", ""),
                    data_type: xml::attr(p, "DataType", ""),
                    usage: xml::attr(p, "Usage", ""),
                    required: xml::attr_flag(p, "Required"),
                    description: xml::description(p),
                })
                .collect(),
            local_tags: tags(aoi, "LocalTags/LocalTag"),
            routines: routine::extract_routines(aoi),
            name,
        }
    })
    .collect()
}

pub fn modules(controller: Node<'_, '_>) -> Vec<Module> {
    xml::find_all(controller, "Modules/Module")
        .into_iter()
        .map(|m| Module {
            name: xml::attr(m, "Name", ""),
            catalog_number: xml::attr(m, "CatalogNumber", ""),
            parent: xml::attr_opt(m, "ParentModule")
                .filter(|p| !p.is_empty())
                .map(|p| ModuleParent {
                    module: p.to_string(),
                    port: xml::attr(m, "ParentModPortId", ""),
                }),
            inhibited: xml::attr_flag(m, "Inhibited"),
            description: xml::description(m),
            ports: xml::find_all(m, "Ports/Port")
                .into_iter()
                .map(|port| Port {
                    id: xml::attr(port, "Id", ""),
                    address: xml::attr(port, "Address", ""),
                    port_type: xml::attr(port, "Type", ""),
                    upstream: xml::attr_flag(port, "Upstream"),
                })
                .collect(),
        })
        .collect()
}

pub fn tasks(controller: Node<'_, '_>) -> Vec<Task> {
    xml::find_all(controller, "Tasks/Task")
        .into_iter()
        .map(|t| Task {
            name: xml::attr(t, "Name", ""),
            task_type: xml::attr(t, "Type", ""),
            rate: xml::attr(t, "Rate", ""),
            priority: xml::attr(t, "Priority", ""),
            watchdog: xml::attr(t, "Watchdog", ""),
            inhibited: xml::attr_flag(t, "InhibitTask"),
            event: xml::find_child(t, "EventInfo").map(|e| EventTrigger {
                trigger: xml::attr(e, "EventTrigger", ""),
                tag: xml::attr(e, "EventTag", ""),
            }),
            description: xml::description(t),
            scheduled_programs: xml::find_all(t, "ScheduledPrograms/ScheduledProgram")
                .into_iter()
                .filter_map(|p| xml::attr_opt(p, "Name").filter(|n| !n.is_empty()))
                .map(str::to_string)
                .collect(),
        })
        .collect()
}

pub fn programs(controller: Node<'_, '_>) -> Vec<Program> {
    xml::find_all(controller, "Programs/Program")
        .into_iter()
        .map(|p| {
            let name = xml::attr(p, "Name", "");
            tracing::debug!(program = %name, "extracting program");
            Program {
                description: xml::description(p),
                main_routine: non_empty_attr(p, "MainRoutineName"),
                fault_routine: non_empty_attr(p, "FaultRoutineName"),
                disabled: xml::attr_flag(p, "Disabled"),
                class: xml::attr(p, "Class", ""),
                tags: tags(p, "Tags/Tag"),
                routines: routine::extract_routines(p),
                name,
            }
        })
        .collect()
}

fn non_empty_attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    xml::attr_opt(node, name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
