//! Report rendering: one self-contained text document per section.
//!
//! Rendering is pure. The same [`Project`] always yields byte-identical text:
//! fixed section order, fixed column widths, `\n` line endings and a single
//! trailing newline.

pub mod layout;
pub mod routine;
pub mod sections;

use crate::model::Project;
use std::io::{self, Write};

/// The seven report sections, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Controller,
    Tags,
    DataTypes,
    Instructions,
    Modules,
    Tasks,
    Programs,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Controller,
        Section::Tags,
        Section::DataTypes,
        Section::Instructions,
        Section::Modules,
        Section::Tasks,
        Section::Programs,
    ];

    /// Human-readable section name for progress and error messages.
    pub fn title(self) -> &'static str {
        match self {
            Self::Controller => "Controller Info",
            Self::Tags => "Global Tags",
            Self::DataTypes => "Data Types (UDTs)",
            Self::Instructions => "Add-On Instructions",
            Self::Modules => "I/O Modules",
            Self::Tasks => "Tasks",
            Self::Programs => "Programs",
        }
    }

    /// Report file name inside the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Controller => "extract_controller_info.txt",
            Self::Tags => "extract_tags.txt",
            Self::DataTypes => "extract_data_types.txt",
            Self::Instructions => "extract_aoi_definitions.txt",
            Self::Modules => "extract_modules.txt",
            Self::Tasks => "extract_tasks.txt",
            Self::Programs => "extract_programs.txt",
        }
    }
}

/// A fully rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub section: Section,
    pub text: String,
}

impl Report {
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.text.as_bytes())?;
        out.flush()
    }
}

/// Render one section.
pub fn render_section(project: &Project, section: Section) -> Report {
    let lines = match section {
        Section::Controller => sections::controller_info(project),
        Section::Tags => sections::tags(project),
        Section::DataTypes => sections::data_types(project),
        Section::Instructions => sections::instructions(project),
        Section::Modules => sections::modules(project),
        Section::Tasks => sections::tasks(project),
        Section::Programs => sections::programs(project),
    };
    let mut text = lines.join("\n");
    text.push('\n');
    Report { section, text }
}

/// Render every section, in [`Section::ALL`] order.
pub fn render_all(project: &Project) -> Vec<Report> {
    Section::ALL
        .iter()
        .map(|&section| {
            let report = render_section(project, section);
            tracing::debug!(section = section.title(), bytes = report.text.len(), "rendered");
            report
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    const PROJECT: &str = r#"<RSLogix5000Content SchemaRevision="1.0" SoftwareRevision="33.00">
<Controller Name="Mixer" ProcessorType="1769-L33ER" MajorRev="33" MinorRev="1">
<Tags>
<Tag Name="Valve_Open" TagType="Alias" AliasFor="Local:1:O.Data.0"><Description><![CDATA[Opens the
inlet valve]]></Description></Tag>
<Tag Name="Level_Sensor" TagType="Alias" AliasFor="Local:2:I.Ch0Data"/>
<Tag Name="Batch_Count" TagType="Base" DataType="DINT"/>
<Tag Name="Recipes" TagType="Base" DataType="Recipe" Dimensions="10"/>
<Tag Name="Mode" TagType="Base" DataType="DINT" Usage="Local"/>
</Tags>
<Programs>
<Program Name="Mixing" MainRoutineName="Main" Disabled="true">
<Routines>
<Routine Name="Main" Type="RLL"><RLLContent>
<Rung Number="0" Type="N"><Comment><![CDATA[Start]]></Comment><Comment><![CDATA[Second note]]></Comment><Text><![CDATA[XIC(Start)OTE(Run);]]></Text></Rung>
<Rung Number="1" Type="N"><Text><![CDATA[XIC(Run)]]></Text><Text><![CDATA[TON(Timer,?,?);]]></Text></Rung>
<Rung Number="4" Type="N"><Text><![CDATA[NOP();]]></Text></Rung>
</RLLContent></Routine>
<Routine Name="Legacy" Type="Custom"/>
<Routine Name="Calc" Type="ST"><STContent><Line Number="0"><![CDATA[IF Run THEN]]></Line><Line Number="1"><![CDATA[]]></Line><Line Number="2"><![CDATA[    Count := Count + 1;]]></Line><Line Number="3"><![CDATA[END_IF;]]></Line></STContent></Routine>
</Routines>
</Program>
</Programs>
</Controller>
</RSLogix5000Content>"#;

    fn render(section: Section) -> String {
        let project = parser::parse(PROJECT).unwrap();
        render_section(&project, section).text
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_all(&parser::parse(PROJECT).unwrap());
        let second = render_all(&parser::parse(PROJECT).unwrap());
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
        assert!(first.iter().all(|r| r.text.ends_with('\n') && !r.text.ends_with("\n\n")));
    }

    #[test]
    fn every_tag_gets_one_row_with_a_usage() {
        let text = render(Section::Tags);
        let rows: Vec<&str> = text.lines().skip(4).collect();
        assert_eq!(rows.len(), 5);
        for row in &rows {
            let usage = row.split(" | ").nth(1).unwrap().trim();
            assert!(["Input", "Output", "Local", "Unknown"].contains(&usage), "{row}");
        }
    }

    #[test]
    fn tag_rows() {
        let text = render(Section::Tags);
        assert!(text.starts_with("CONTROLLER TAGS - Found 5\n"));
        let valve = text.lines().find(|l| l.starts_with("Valve_Open")).unwrap();
        assert_eq!(
            valve,
            format!(
                "{:<30} | {:<10} | {:<30} | Opens the inlet valve",
                "Valve_Open", "Output", "Alias->Local:1:O.Data.0"
            )
        );
        assert!(text.contains(&format!("{:<30} | {:<10} | Alias->", "Level_Sensor", "Input")));
        assert!(text.contains(&format!("{:<30} | {:<10} | DINT", "Batch_Count", "Unknown")));
        assert!(text.contains(&format!("{:<10} | Recipe[10]", "Unknown")));
    }

    #[test]
    fn controller_priority_fields_first() {
        let text = render(Section::Controller);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "CONTROLLER INFO");
        assert_eq!(lines[2], "Name: Mixer");
        assert_eq!(lines[3], "ProcessorType: 1769-L33ER");
        assert_eq!(lines[4], "Revision: 33.1");
        assert_eq!(lines[5], "MajorRev: 33");
        assert!(text.contains("EXPORT\n"));
        assert!(text.contains("SoftwareRevision: 33.00\n"));
    }

    #[test]
    fn program_logic() {
        let text = render(Section::Programs);
        assert!(text.contains("PROGRAM: Mixing\n"));
        assert!(text.contains("*** PROGRAM DISABLED ***"));

        let rung_order: Vec<&str> = text.lines().filter(|l| l.trim_start().starts_with("[Rung")).collect();
        assert_eq!(rung_order, vec!["    [Rung 0]", "    [Rung 1]", "    [Rung 4]"]);

        let start = text.find("/* Start */").unwrap();
        let second = text.find("/* Second note */").unwrap();
        let logic = text.find("XIC(Start)OTE(Run);").unwrap();
        assert!(start < second && second < logic);

        assert!(text.contains("      XIC(Run)TON(Timer,?,?);\n"));
        assert!(text.contains("      IF Run THEN\n\n          Count := Count + 1;\n      END_IF;\n"));
    }

    #[test]
    fn unsupported_routine_does_not_stop_the_program() {
        let text = render(Section::Programs);
        let legacy = text.find("[Unsupported Routine Type: Custom]").unwrap();
        let calc = text.find("ROUTINE: Calc (ST)").unwrap();
        assert!(legacy < calc);
    }

    #[test]
    fn empty_sections_still_render() {
        let text = render(Section::Tasks);
        assert_eq!(text, format!("TASKS - Found 0\n{}\n", "=".repeat(80)));
        let modules = render(Section::Modules);
        assert!(modules.starts_with("I/O MODULES - Found 0\n"));
    }

    #[test]
    fn module_ports_follow_the_table() {
        let project = parser::parse(
            r#"<RSLogix5000Content><Controller Name="C"><Modules>
<Module Name="Local" CatalogNumber="1769-L33ER" ParentModule="Local" ParentModPortId="1"><Ports>
<Port Id="1" Address="0" Type="Compact" Upstream="false"/>
</Ports></Module>
<Module Name="Card" CatalogNumber="1769-IQ16" ParentModule="Local" ParentModPortId="1"><Ports>
<Port Id="1" Address="1" Type="Compact" Upstream="true"/>
</Ports></Module>
<Module Name="Bare" CatalogNumber="1769-OB16"/>
</Modules></Controller></RSLogix5000Content>"#,
        )
        .unwrap();
        let text = render_section(&project, Section::Modules).text;
        let ports = &text[text.find("\nPORTS\n").unwrap()..];
        assert_eq!(
            ports,
            format!(
                "\nPORTS\n{}\nLocal:\n  Port 1: Compact, Address 0\nCard:\n  Port 1: Compact, Address 1 (upstream)\n",
                "-".repeat(80)
            )
        );
    }

    #[test]
    fn report_write_to() {
        let report = render_section(&Project::default(), Section::Tasks);
        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), report.text);
    }
}
