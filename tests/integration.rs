use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const REPORTS: [&str; 7] = [
    "extract_controller_info.txt",
    "extract_tags.txt",
    "extract_data_types.txt",
    "extract_aoi_definitions.txt",
    "extract_modules.txt",
    "extract_tasks.txt",
    "extract_programs.txt",
];

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_l5x-export")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn export(fixture: &str, out: &Path) {
    cmd()
        .arg(fixture_path(fixture))
        .arg(out)
        .assert()
        .success();
}

fn report(out: &Path, name: &str) -> String {
    fs::read_to_string(out.join(name)).unwrap()
}

fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

// -- successful exports --

#[test]
fn writes_all_seven_reports() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_path("sample.L5X"))
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing file:"))
        .stdout(predicate::str::contains("  > Global Tags exported to"))
        .stdout(predicate::str::contains("  > Programs exported to"))
        .stdout(predicate::str::contains("Export completed successfully!"));

    for name in REPORTS {
        let text = report(out.path(), name);
        assert!(text.ends_with('\n') && !text.ends_with("\n\n"), "{name}");
    }
    assert_eq!(entry_count(out.path()), 7);
}

#[test]
fn reports_match_expected_output() {
    let out = TempDir::new().unwrap();
    export("sample.L5X", out.path());

    for name in REPORTS {
        let expected =
            fs::read_to_string(fixture_path(&format!("sample.expected/{name}"))).unwrap();
        let output = report(out.path(), name);
        assert_eq!(output, expected, "{name}");
    }
}

#[test]
fn creates_missing_output_directory() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("reports/latest");
    export("sample.L5X", &out);
    assert_eq!(entry_count(&out), 7);
}

#[test]
fn output_is_identical_across_runs() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    export("sample.L5X", first.path());
    export("sample.L5X", second.path());

    for name in REPORTS {
        assert_eq!(
            fs::read(first.path().join(name)).unwrap(),
            fs::read(second.path().join(name)).unwrap(),
            "{name} differs between runs"
        );
    }
}

#[test]
fn namespaced_export_reads_the_same() {
    let plain = TempDir::new().unwrap();
    let namespaced = TempDir::new().unwrap();
    export("sample.L5X", plain.path());
    export("namespaced.L5X", namespaced.path());

    let plain_tags = report(plain.path(), "extract_tags.txt");
    let ns_tags = report(namespaced.path(), "extract_tags.txt");
    assert!(ns_tags.starts_with("CONTROLLER TAGS - Found 2\n"));
    for line in ns_tags.lines().filter(|l| l.contains("Alias->")) {
        let name = line.split(" | ").next().unwrap().trim_end();
        let plain_line = plain_tags.lines().find(|l| l.starts_with(name)).unwrap();
        let plain_cells = plain_line.split(" | ").take(3).collect::<Vec<_>>().join(" | ");
        assert_eq!(line, plain_cells.trim_end());
    }
}

// -- report content --

#[test]
fn tags_report_classifies_aliases() {
    let out = TempDir::new().unwrap();
    export("sample.L5X", out.path());
    let tags = report(out.path(), "extract_tags.txt");

    assert!(tags.starts_with("CONTROLLER TAGS - Found 5\n"));
    assert!(tags.contains(&format!(
        "{:<30} | {:<10} | {:<30} | Opens the inlet valve\n",
        "Valve_Open", "Output", "Alias->Local:1:O.Data.0"
    )));
    assert!(tags.contains(&format!(
        "{:<30} | {:<10} | Alias->Local:2:I.Ch0Data\n",
        "Level_Sensor", "Input"
    )));
    assert!(tags.contains(&format!("{:<30} | {:<10} | DINT\n", "Batch_Count", "Unknown")));
    assert!(tags.contains(&format!("{:<30} | {:<10} | Recipe[10]\n", "Recipes", "Unknown")));
    assert!(tags.contains(&format!("{:<30} | {:<10} | DINT\n", "Mode", "Local")));
}

#[test]
fn programs_report_keeps_logic_order() {
    let out = TempDir::new().unwrap();
    export("sample.L5X", out.path());
    let programs = report(out.path(), "extract_programs.txt");

    let rungs: Vec<&str> = programs
        .lines()
        .filter(|l| l.trim_start().starts_with("[Rung"))
        .map(str::trim_start)
        .collect();
    assert_eq!(rungs, vec!["[Rung 0]", "[Rung 1]", "[Rung 5]"]);

    let comment = programs.find("/* Start the agitator */").unwrap();
    let logic = programs.find("XIC(Start)OTE(Agitator);").unwrap();
    assert!(comment < logic);
    assert!(programs.contains("XIC(Agitator)TON(MixTimer,?,?);"));
}

#[test]
fn programs_report_preserves_structured_text() {
    let out = TempDir::new().unwrap();
    export("sample.L5X", out.path());
    let programs = report(out.path(), "extract_programs.txt");

    assert!(programs.contains("ROUTINE: Calc (ST)"));
    assert!(programs.contains("      IF Agitator THEN\n          Count := Count + 1;\n      END_IF;\n"));
}

#[test]
fn unsupported_routine_is_a_placeholder() {
    let out = TempDir::new().unwrap();
    export("sample.L5X", out.path());
    let programs = report(out.path(), "extract_programs.txt");

    let legacy = programs.find("[Unsupported Routine Type: Custom]").unwrap();
    let calc = programs.find("ROUTINE: Calc (ST)").unwrap();
    assert!(legacy < calc);
}

#[test]
fn definition_reports() {
    let out = TempDir::new().unwrap();
    export("sample.L5X", out.path());

    let controller = report(out.path(), "extract_controller_info.txt");
    assert!(controller.contains("Name: Mixer\nProcessorType: 1769-L33ER\nRevision: 33.11\n"));
    assert!(controller.contains("Description: Batch mixing skid\n"));

    let types = report(out.path(), "extract_data_types.txt");
    assert!(types.contains("UDT: Recipe\n"));
    assert!(types.contains("DINT[8]"));

    let aois = report(out.path(), "extract_aoi_definitions.txt");
    assert!(aois.contains("AOI: Debounce\n"));
    assert!(aois.contains("*Raw"));
    assert!(aois.contains("XIC(Raw)TON(Timer,?,?)XIC(Timer.DN)OTE(Out);"));

    let modules = report(out.path(), "extract_modules.txt");
    assert!(modules.contains("[Inhibited] Slot 1 inputs"));

    let tasks = report(out.path(), "extract_tasks.txt");
    assert!(tasks.contains("TASK: MainTask\n"));
    assert!(tasks.contains("    - Mixing\n"));
}

// -- existing reports --

#[test]
fn second_run_writes_timestamped_copies() {
    let out = TempDir::new().unwrap();
    export("sample.L5X", out.path());
    export("sample.L5X", out.path());

    assert_eq!(entry_count(out.path()), 14);
    let copies = fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("extract_tags_") && n.ends_with(".txt"))
        .count();
    assert_eq!(copies, 1);
}

#[test]
fn overwrite_flag_replaces_reports() {
    let out = TempDir::new().unwrap();
    export("sample.L5X", out.path());
    cmd()
        .arg("--overwrite")
        .arg(fixture_path("sample.L5X"))
        .arg(out.path())
        .assert()
        .success();
    assert_eq!(entry_count(out.path()), 7);
}

// -- fatal errors --

#[test]
fn invalid_root_writes_nothing() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_path("invalid_root.xml"))
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid L5X file"))
        .stderr(predicate::str::contains("Project"));
    assert_eq!(entry_count(out.path()), 0);
}

#[test]
fn malformed_xml_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    cmd()
        .arg(fixture_path("malformed.L5X"))
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("XML parsing error"));
    assert!(!out.exists());
}

#[test]
fn missing_input_fails() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_path("does_not_exist.L5X"))
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
    assert_eq!(entry_count(out.path()), 0);
}

#[test]
fn missing_arguments_is_usage_error() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
