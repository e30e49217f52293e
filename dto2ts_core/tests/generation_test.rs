//! End-to-end generation tests: configuration file, class sources, and the
//! files written for each class.

use dto2ts_core::config::{CONFIG_FILE_NAME, Dto2TsConfig};
use dto2ts_core::tooling::{ClassOutcome, ClassResolver, build_resolver, generate_with_config};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DESCRIPTORS: &str = r#"{
    "classes": [
        {
            "name": "UserDto",
            "package": "com.example.dto",
            "fields": [
                {"name": "id", "type": "int"},
                {"name": "tags", "type": "String", "array": true},
                {"name": "created", "type": "Date", "qualified_type": "java.util.Date"},
                {"name": "active", "type": "Boolean"},
                {"name": "password", "type": "String", "modifiers": ["private"]},
                {"name": "VERSION", "type": "long", "modifiers": ["public", "static", "final"]},
                {"name": "owner", "type": "Person"}
            ]
        }
    ]
}"#;

const RUST_SOURCE: &str = r#"
use chrono::NaiveDateTime;

pub struct OrderDto {
    pub id: u32,
    pub amounts: Vec<f64>,
    pub placed_at: Option<NaiveDateTime>,
    pub paid: bool,
    note: String,
}
"#;

fn write_project(dir: &Path, config: &str) {
    fs::write(dir.join("classes.json"), DESCRIPTORS).unwrap();
    fs::create_dir_all(dir.join("backend/src/orders")).unwrap();
    fs::write(
        dir.join("backend/Cargo.toml"),
        "[package]\nname = \"shop\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();
    fs::write(dir.join("backend/src/orders/mod.rs"), RUST_SOURCE).unwrap();
    fs::write(dir.join(CONFIG_FILE_NAME), config).unwrap();
}

fn load(dir: &Path) -> Dto2TsConfig {
    Dto2TsConfig::from_path(dir.join(CONFIG_FILE_NAME)).unwrap()
}

#[test]
fn test_descriptor_class_full_output() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"
classes = ["com.example.dto.UserDto"]
output_folder = "out"

[source]
descriptors = "classes.json"
"#,
    );

    let report = generate_with_config(&load(dir.path())).unwrap();
    assert_eq!(report.written(), 1);

    let content = fs::read_to_string(dir.path().join("out/userDto.ts")).unwrap();
    assert_eq!(
        content,
        "export class UserDto {\n\
         \tpublic id: number; // int\n\
         \tpublic tags: Array<String>; \n\
         \tpublic created: String; // java.util.Date\n\
         \tpublic active: boolean; \n\
         \tpublic password: String; \n\
         \tpublic VERSION: number; // long\n\
         \tpublic owner: any; \n\
         }\n"
    );
}

#[test]
fn test_public_only_with_namespace_from_package() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"
classes = ["com.example.dto.UserDto"]
output_folder = "out"
prefix = "api-"
suffix = ".model"
add_namespace = true
include_private = false
namespace = ""

[source]
descriptors = "classes.json"
"#,
    );

    let report = generate_with_config(&load(dir.path())).unwrap();
    assert_eq!(report.written(), 1);

    let content = fs::read_to_string(dir.path().join("out/api-userDto.model.ts")).unwrap();
    assert_eq!(
        content,
        "namespace com.example.dto {\n\
         export class UserDto {\n\
         \tpublic id: number; // int\n\
         \tpublic tags: Array<String>; \n\
         \tpublic created: String; // java.util.Date\n\
         \tpublic active: boolean; \n\
         \tpublic owner: any; \n\
         }\n\
         }\n"
    );
}

#[test]
fn test_scanned_rust_struct_output() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"
classes = ["shop::orders::OrderDto"]
output_folder = "out"
add_namespace = true
namespace = "Shop"

[source]
scan_path = "backend"
"#,
    );

    let report = generate_with_config(&load(dir.path())).unwrap();
    assert_eq!(report.written(), 1, "{:?}", report);

    let content = fs::read_to_string(dir.path().join("out/orderDto.ts")).unwrap();
    assert_eq!(
        content,
        "namespace Shop {\n\
         export class OrderDto {\n\
         \tpublic id: number; // int\n\
         \tpublic amounts: Array<number>; // double[]\n\
         \tpublic placed_at: any; \n\
         \tpublic paid: boolean; \n\
         \tpublic note: String; \n\
         }\n\
         }\n"
    );
}

#[test]
fn test_both_sources_and_unresolvable_class() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"
classes = ["com.example.dto.Missing", "OrderDto", "UserDto"]
output_folder = "out"

[source]
scan_path = "backend"
descriptors = "classes.json"
"#,
    );

    let config = load(dir.path());
    let resolver = build_resolver(&config).unwrap();
    assert_eq!(
        resolver.known_classes(),
        vec!["com.example.dto.UserDto", "shop.orders.OrderDto"]
    );

    let report = generate_with_config(&config).unwrap();
    assert_eq!(report.failed(), 1);
    assert_eq!(report.written(), 2);
    assert!(matches!(report.classes[0].outcome, ClassOutcome::Failed { .. }));
    assert!(dir.path().join("out/orderDto.ts").is_file());
    assert!(dir.path().join("out/userDto.ts").is_file());
}

#[test]
fn test_no_overwrite_keeps_existing_file() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"
classes = ["com.example.dto.UserDto"]
output_folder = "out"
overwrite = false

[source]
descriptors = "classes.json"
"#,
    );
    fs::create_dir_all(dir.path().join("out")).unwrap();
    fs::write(dir.path().join("out/userDto.ts"), "// customized\n").unwrap();

    let report = generate_with_config(&load(dir.path())).unwrap();
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(
        fs::read_to_string(dir.path().join("out/userDto.ts")).unwrap(),
        "// customized\n"
    );
}

#[test]
fn test_missing_descriptor_file_is_setup_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "classes = [\"A\"]\n[source]\ndescriptors = \"nope.json\"\n",
    )
    .unwrap();

    assert!(generate_with_config(&load(dir.path())).is_err());
}
