//! Extraction orchestrator: one pass from the L5X tree to a [`Project`].
//!
//! Order is fixed: root validation, controller metadata, global tags, data
//! types, add-on instructions, modules, tasks, programs. A missing container
//! gives an empty section; only a wrong root element is fatal.

pub mod entities;
pub mod routine;

use crate::error::ExportError;
use crate::model::Project;
use crate::xml;
use roxmltree::{Document, Node};
use std::fs;
use std::path::Path;

/// Local name every L5X export root carries.
pub const ROOT_ELEMENT_NAME: &str = "RSLogix5000Content";

/// Read and extract an L5X file.
pub fn load_file(path: &Path) -> Result<Project, ExportError> {
    let source = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source)
}

/// Parse L5X text and extract the project model.
pub fn parse(source: &str) -> Result<Project, ExportError> {
    let doc = Document::parse(source)?;
    extract(&doc)
}

/// Extract the project model from an already parsed document.
pub fn extract(doc: &Document<'_>) -> Result<Project, ExportError> {
    let root = doc.root_element();
    validate_root(root)?;

    let mut project = Project {
        export: entities::attributes(root),
        ..Project::default()
    };

    let Some(controller) = xml::find_child(root, "Controller") else {
        tracing::warn!("no Controller element, all sections will be empty");
        return Ok(project);
    };

    project.controller = entities::controller_info(controller);
    project.tags = entities::tags(controller, "Tags/Tag");
    project.data_types = entities::data_types(controller);
    project.instructions = entities::instructions(controller);
    project.modules = entities::modules(controller);
    project.tasks = entities::tasks(controller);
    project.programs = entities::programs(controller);

    tracing::info!(
        tags = project.tags.len(),
        data_types = project.data_types.len(),
        instructions = project.instructions.len(),
        modules = project.modules.len(),
        tasks = project.tasks.len(),
        programs = project.programs.len(),
        "extracted project"
    );
    Ok(project)
}

fn validate_root(root: Node<'_, '_>) -> Result<(), ExportError> {
    let found = xml::local_name(root);
    if found != ROOT_ELEMENT_NAME {
        return Err(ExportError::InvalidRoot {
            found: found.to_string(),
            expected: ROOT_ELEMENT_NAME,
        });
    }
    Ok(())
}
