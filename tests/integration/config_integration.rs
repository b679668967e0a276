//! Integration tests for configuration loading

use super::test_utils::with_config_home;
use model_routes::cli::{Commands, RunContext};
use model_routes::config::{global_config_path, ConfigLoader, OutputFormat};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_global_config_path_uses_xdg_config_home() {
    let temp_dir = TempDir::new().unwrap();
    with_config_home(&temp_dir, || {
        let path = global_config_path().unwrap();
        assert_eq!(
            path,
            temp_dir.path().join("xdg").join("model-routes").join("config.toml")
        );
    });
}

#[test]
fn test_global_config_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    with_config_home(&temp_dir, || {
        let global = global_config_path().unwrap();
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(&global, "[output]\nformat = \"table\"\n").unwrap();

        let workspace = temp_dir.path().join("workspace");
        std::fs::create_dir_all(&workspace).unwrap();
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.output.format, OutputFormat::Table);
    });
}

#[test]
fn test_workspace_config_overrides_global_config() {
    let temp_dir = TempDir::new().unwrap();
    with_config_home(&temp_dir, || {
        let global = global_config_path().unwrap();
        std::fs::create_dir_all(global.parent().unwrap()).unwrap();
        std::fs::write(&global, "[output]\nformat = \"table\"\nheader = false\n").unwrap();

        let workspace = temp_dir.path().join("workspace");
        std::fs::create_dir_all(workspace.join("config")).unwrap();
        std::fs::write(
            workspace.join("config").join("config.toml"),
            "[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.header, "unset keys keep the global value");
    });
}

#[test]
fn test_configured_inflections_drive_the_cli() {
    let temp_dir = TempDir::new().unwrap();
    with_config_home(&temp_dir, || {
        let workspace = temp_dir.path().join("workspace");
        std::fs::create_dir_all(workspace.join("config")).unwrap();
        std::fs::write(
            workspace.join("config").join("config.toml"),
            r#"
[inflections]
uncountable = ["staff"]

[output]
header = false
"#,
        )
        .unwrap();
        std::fs::write(
            workspace.join("routes.toml"),
            "[[draw]]\nkind = \"model\"\nname = \"Staff\"\n",
        )
        .unwrap();

        let context = RunContext::new(workspace.clone(), None).unwrap();
        let out = context
            .execute(&Commands::Draw {
                file: PathBuf::from("routes.toml"),
                format: None,
                no_header: false,
            })
            .unwrap();
        assert!(out.contains("staff_index GET"));
        assert!(!out.contains("Prefix"));
    });
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    std::fs::write(&config_file, "[logging]\nlevel = \"loud\"\n").unwrap();

    let result = RunContext::new(temp_dir.path().to_path_buf(), Some(config_file));
    assert!(result.is_err());
}
