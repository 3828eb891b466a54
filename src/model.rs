//! Extracted project model. Built once per run and never written back to the tree.

use std::fmt;

/// Everything extracted from one L5X document.
#[derive(Debug, Default)]
pub struct Project {
    /// Attributes of the `RSLogix5000Content` root, in source order.
    pub export: Vec<(String, String)>,
    pub controller: ControllerInfo,
    pub tags: Vec<Tag>,
    pub data_types: Vec<DataType>,
    pub instructions: Vec<AddOnInstruction>,
    pub modules: Vec<Module>,
    pub tasks: Vec<Task>,
    pub programs: Vec<Program>,
}

/// Controller element attributes plus its description.
#[derive(Debug, Default)]
pub struct ControllerInfo {
    /// Attributes in source order.
    pub attributes: Vec<(String, String)>,
    pub description: String,
}

/// Where a tag is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Controller,
    Program(String),
    /// Local tag of an add-on instruction definition.
    Instruction(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controller => f.write_str("Controller"),
            Self::Program(name) => write!(f, "Program:{name}"),
            Self::Instruction(name) => write!(f, "AOI:{name}"),
        }
    }
}

/// Tag usage classification. Every tag gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Input,
    Output,
    Local,
    Unknown,
}

impl Usage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Output => "Output",
            Self::Local => "Local",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A base data type or a first-level alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagType {
    /// Declared data type, array suffix included.
    Base(String),
    /// Alias target exactly as written in `AliasFor`.
    Alias(String),
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(name) => f.write_str(name),
            Self::Alias(target) => write!(f, "Alias->{target}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tag {
    pub name: String,
    pub scope: Scope,
    pub tag_type: TagType,
    pub usage: Usage,
    pub description: String,
}

#[derive(Debug)]
pub struct DataType {
    pub name: String,
    pub family: String,
    pub class: String,
    pub description: String,
    pub members: Vec<Member>,
}

#[derive(Debug)]
pub struct Member {
    pub name: String,
    pub data_type: String,
    /// Array dimension; empty for scalars.
    pub dimension: String,
    pub hidden: bool,
    pub description: String,
}

#[derive(Debug)]
pub struct AddOnInstruction {
    pub name: String,
    pub revision: String,
    pub vendor: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
    pub local_tags: Vec<Tag>,
    pub routines: Vec<Routine>,
}

#[derive(Debug)]
pub struct Parameter {
    pub name: String,
    pub data_type: String,
    /// Direction as declared (`Input`, `Output`, `InOut`).
    pub usage: String,
    pub required: bool,
    pub description: String,
}

#[derive(Debug)]
pub struct Module {
    pub name: String,
    pub catalog_number: String,
    /// Absent for the root chassis / local controller.
    pub parent: Option<ModuleParent>,
    pub inhibited: bool,
    pub description: String,
    pub ports: Vec<Port>,
}

/// A module communication port. `Upstream` ports face the parent.
#[derive(Debug)]
pub struct Port {
    pub id: String,
    pub address: String,
    pub port_type: String,
    pub upstream: bool,
}

#[derive(Debug)]
pub struct ModuleParent {
    pub module: String,
    pub port: String,
}

#[derive(Debug)]
pub struct Task {
    pub name: String,
    pub task_type: String,
    pub rate: String,
    pub priority: String,
    pub watchdog: String,
    pub inhibited: bool,
    pub event: Option<EventTrigger>,
    pub description: String,
    pub scheduled_programs: Vec<String>,
}

#[derive(Debug)]
pub struct EventTrigger {
    pub trigger: String,
    pub tag: String,
}

#[derive(Debug)]
pub struct Program {
    pub name: String,
    pub description: String,
    pub main_routine: Option<String>,
    pub fault_routine: Option<String>,
    pub disabled: bool,
    pub class: String,
    pub tags: Vec<Tag>,
    pub routines: Vec<Routine>,
}

#[derive(Debug)]
pub struct Routine {
    pub name: String,
    pub description: String,
    pub content: RoutineContent,
}

/// Routine body by content kind.
#[derive(Debug)]
pub enum RoutineContent {
    Ladder(Vec<Rung>),
    StructuredText(Vec<StBlock>),
    FunctionBlock(FbdSummary),
    Chart(SfcSummary),
    /// Content kind outside RLL/ST/FBD/SFC, kept as declared.
    Unsupported(String),
}

impl RoutineContent {
    /// Content-kind code as it appears in the `Type` attribute.
    pub fn kind(&self) -> &str {
        match self {
            Self::Ladder(_) => "RLL",
            Self::StructuredText(_) => "ST",
            Self::FunctionBlock(_) => "FBD",
            Self::Chart(_) => "SFC",
            Self::Unsupported(kind) => kind,
        }
    }
}

#[derive(Debug)]
pub struct Rung {
    /// `None` when the `Number` attribute is missing or not an integer.
    pub number: Option<u32>,
    /// `N` for a normal rung; anything else marks a pending online edit.
    pub rung_type: String,
    pub comments: Vec<RungComment>,
    /// Logic text, all fragments concatenated in source order.
    pub logic: String,
}

#[derive(Debug)]
pub struct RungComment {
    /// Set for operand comments.
    pub operand: Option<String>,
    pub text: String,
}

#[derive(Debug)]
pub struct StBlock {
    /// Empty for the committed body.
    pub online_edit_type: String,
    pub code: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FbdSummary {
    pub sheets: usize,
    pub blocks: usize,
    pub wires: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SfcSummary {
    pub steps: usize,
    pub transitions: usize,
    pub actions: usize,
    pub step_names: Vec<String>,
}
