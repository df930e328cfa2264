//! Command tests
//!
//! Drive `init`, `add`, `list` and `remove` against a temporary project
//! directory, with icons served from memory.

use std::fs;
use std::path::{Path, PathBuf};

use iconsmith::commands::{
    execute_add, execute_add_with, execute_init, execute_list, execute_remove, AddOptions,
    InitOptions, ListOptions, Project, RemoveOptions,
};
use iconsmith::config::{Config, CONFIG_FILE};
use iconsmith::prompt::{Confirmation, ScriptedConfirm};
use iconsmith::registry::MemorySource;
use iconsmith::{Framework, ModuleDocument};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init(root: &Path, output: Option<&str>) -> Project {
    execute_init(InitOptions {
        root: root.to_path_buf(),
        config: PathBuf::from(CONFIG_FILE),
        output: output.map(PathBuf::from),
        yes: true,
        ..Default::default()
    })
    .unwrap();
    Project::load(root, Path::new(CONFIG_FILE)).unwrap()
}

const CHECK: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M20 6L9 17l-5-5"/></svg>"#;

fn source() -> MemorySource {
    MemorySource::new()
        .with("lucide:check", CHECK)
        .with("lucide:home", CHECK)
}

fn add(icons: &[&str]) -> AddOptions {
    AddOptions {
        icons: icons.iter().map(|s| s.to_string()).collect(),
        yes: true,
        ..Default::default()
    }
}

#[test]
fn test_init_writes_config_and_empty_barrel() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), None);

    assert_eq!(project.config, Config::default());
    let text = fs::read_to_string(dir.path().join("src/icons.tsx")).unwrap();
    let document = ModuleDocument::parse(&text).unwrap();
    assert!(document.entries().unwrap().is_empty());
    assert!(text.contains("import type { SVGProps } from \"react\";"));
    assert!(text.contains("export type IconName = never;"));
}

#[test]
fn test_init_refuses_to_overwrite_config() {
    let dir = TempDir::new().unwrap();
    init(dir.path(), None);

    let err = execute_init(InitOptions {
        root: dir.path().to_path_buf(),
        config: PathBuf::from(CONFIG_FILE),
        yes: true,
        ..Default::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_init_javascript_preact() {
    let dir = TempDir::new().unwrap();
    execute_init(InitOptions {
        root: dir.path().to_path_buf(),
        config: PathBuf::from(CONFIG_FILE),
        framework: Some(Framework::Preact),
        js: true,
        yes: true,
        ..Default::default()
    })
    .unwrap();

    let text = fs::read_to_string(dir.path().join("src/icons.jsx")).unwrap();
    assert!(!text.contains("import type"));
    assert!(!text.contains("export type"));
}

#[test]
fn test_init_folder_mode() {
    let dir = TempDir::new().unwrap();
    init(dir.path(), Some("src/icons"));

    let index = fs::read_to_string(dir.path().join("src/icons/index.ts")).unwrap();
    assert!(index.contains("export type IconName = never;"));
    let types = fs::read_to_string(dir.path().join("src/icons/types.ts")).unwrap();
    assert!(types.contains("export type IconProps = SVGProps<SVGSVGElement>;"));
}

#[test]
fn test_add_writes_barrel() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), None);

    let ok = execute_add(add(&["lucide:home", "lucide:check"]), &project, &source()).unwrap();

    assert!(ok);
    let text = fs::read_to_string(dir.path().join("src/icons.tsx")).unwrap();
    assert_eq!(ModuleDocument::parse(&text).unwrap().entries().unwrap(), vec!["Check", "Home"]);
    assert!(text.contains("export type IconName = \"Check\" | \"Home\";"));
}

#[test]
fn test_add_reports_failure_but_keeps_good_icons() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), None);

    let ok = execute_add(add(&["lucide:check", "lucide:missing"]), &project, &source()).unwrap();

    assert!(!ok);
    let text = fs::read_to_string(dir.path().join("src/icons.tsx")).unwrap();
    assert_eq!(ModuleDocument::parse(&text).unwrap().entries().unwrap(), vec!["Check"]);
}

#[test]
fn test_add_dry_run_leaves_barrel_untouched() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), None);
    let barrel = dir.path().join("src/icons.tsx");
    let before = fs::read_to_string(&barrel).unwrap();

    let options = AddOptions {
        dry_run: true,
        ..add(&["lucide:check"])
    };
    let ok = execute_add(options, &project, &source()).unwrap();

    assert!(ok);
    assert_eq!(fs::read_to_string(&barrel).unwrap(), before);
}

#[test]
fn test_add_dry_run_creates_no_folder_files() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), Some("src/icons"));
    let index = dir.path().join("src/icons/index.ts");
    let before = fs::read_to_string(&index).unwrap();

    let options = AddOptions {
        dry_run: true,
        ..add(&["lucide:check"])
    };
    execute_add(options, &project, &source()).unwrap();

    assert!(!dir.path().join("src/icons/Check.tsx").exists());
    assert_eq!(fs::read_to_string(&index).unwrap(), before);
}

#[test]
fn test_add_cancelled_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), None);
    execute_add(add(&["lucide:check"]), &project, &source()).unwrap();
    let barrel = dir.path().join("src/icons.tsx");
    let before = fs::read_to_string(&barrel).unwrap();

    let confirm = ScriptedConfirm::new([Confirmation::Cancelled]);
    let options = AddOptions {
        yes: false,
        ..add(&["lucide:home", "lucide:check"])
    };
    let ok = execute_add_with(options, &project, &source(), &confirm).unwrap();

    assert!(!ok);
    assert_eq!(confirm.prompts().len(), 1);
    assert_eq!(fs::read_to_string(&barrel).unwrap(), before);
}

#[test]
fn test_remove_from_barrel() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), None);
    let barrel = dir.path().join("src/icons.tsx");
    fs::write(
        &barrel,
        "export const icons = {\n  Check: (props) => (<svg {...props} />),\n  Home: (props) => (<svg {...props} />),\n};\n\nexport type IconName = \"Check\" | \"Home\";\n",
    )
    .unwrap();

    execute_remove(
        RemoveOptions {
            names: vec!["Check".to_string()],
            yes: true,
        },
        &project,
    )
    .unwrap();

    let text = fs::read_to_string(&barrel).unwrap();
    assert_eq!(
        text,
        "export const icons = {\n  Home: (props) => (<svg {...props} />),\n};\n\nexport type IconName = \"Home\";\n"
    );
}

#[test]
fn test_remove_unknown_icon_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), None);
    let barrel = dir.path().join("src/icons.tsx");
    let before = fs::read_to_string(&barrel).unwrap();

    let err = execute_remove(
        RemoveOptions {
            names: vec!["Missing".to_string()],
            yes: true,
        },
        &project,
    )
    .unwrap_err();

    assert!(err.to_string().contains("No icon named Missing"));
    assert_eq!(fs::read_to_string(&barrel).unwrap(), before);
}

#[test]
fn test_remove_from_folder_rebuilds_index() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), Some("src/icons"));
    let icons = dir.path().join("src/icons");
    fs::write(icons.join("Check.tsx"), "export default () => null;\n").unwrap();
    fs::write(icons.join("Home.tsx"), "export default () => null;\n").unwrap();

    execute_remove(
        RemoveOptions {
            names: vec!["Home".to_string()],
            yes: true,
        },
        &project,
    )
    .unwrap();

    assert!(!icons.join("Home.tsx").exists());
    let index = fs::read_to_string(icons.join("index.ts")).unwrap();
    assert!(index.contains("import Check from \"./Check\";"));
    assert!(!index.contains("Home"));
}

#[test]
fn test_list_reads_barrel() {
    let dir = TempDir::new().unwrap();
    let project = init(dir.path(), None);
    execute_list(ListOptions { json: true }, &project).unwrap();
    execute_list(ListOptions::default(), &project).unwrap();
}

#[test]
fn test_commands_without_config_point_to_init() {
    let dir = TempDir::new().unwrap();
    let err = Project::load(dir.path(), Path::new(CONFIG_FILE))
        .err()
        .unwrap();
    assert!(err.to_string().contains("iconsmith init"));
}
