//! ---
//! rome_section: "15-testing-qa"
//! rome_subsection: "integration-tests"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Schema to header flows across the workspace crates."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use std::fs;
use std::path::PathBuf;

use rome_codegen::Generator;
use rome_config::GeneratorConfig;
use rome_schema::{
    compile, Declarations, PrimitiveType, SchemaBuilder, SchemaError, SchemaLoader, SchemaSource,
};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

struct DriveMessages;

impl Declarations for DriveMessages {
    fn declare(&self, builder: &mut SchemaBuilder) -> rome_schema::Result<()> {
        builder
            .message("battery", 0x20)
            .param("millivolts", PrimitiveType::U16)
            .param("charging", PrimitiveType::U8);
        builder
            .message("odometry", 0x10)
            .param("x", PrimitiveType::F32)
            .param("y", PrimitiveType::F32)
            .param("theta", PrimitiveType::F32);
        builder
            .message("set_speed", 0x02)
            .param("left", PrimitiveType::I16)
            .param("right", PrimitiveType::I16);
        builder.message("ping", 0x01);
        Ok(())
    }
}

#[test]
fn named_schema_compiles_and_renders() {
    let loader = SchemaLoader::new([fixtures()]);
    let schema = loader.load(&SchemaSource::Named("drive".into())).unwrap();
    let compiled = compile(&schema).unwrap();

    let ids: Vec<u8> = compiled.messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, [0x01, 0x02, 0x10, 0x20]);
    assert_eq!(compiled.max_payload_size, 12);
    assert_eq!(compiled.message("battery").unwrap().payload_size, 3);

    let header = Generator::default().header(&compiled, None).unwrap();
    assert!(header.contains("#define MAX_PAYLOAD_SIZE 12\n"));
    assert!(header.contains("  IDENTIFIER_ODOMETRY = 0x10,\n"));
    assert!(header.contains("      float theta;\n"));
    assert!(header.contains("      uint16_t millivolts;\n"));
    assert!(header.contains("  (_f)->battery.charging = (_a_charging); \\\n"));
    assert!(header.contains("#ifdef DISABLE_BATTERY\n# define IDENTIFIER_BATTERY 0\n#endif\n"));
}

#[test]
fn code_declarations_match_the_toml_document() {
    let loader = SchemaLoader::new([fixtures()]);
    let from_file = compile(&loader.load(&SchemaSource::Named("drive".into())).unwrap()).unwrap();

    let mut builder = SchemaBuilder::new("drive");
    builder.declare_from(&DriveMessages).unwrap();
    let from_code = compile(&builder.finish().unwrap()).unwrap();

    let generator = Generator::default();
    assert_eq!(
        generator.header(&from_file, None).unwrap(),
        generator.header(&from_code, None).unwrap()
    );
}

#[test]
fn output_is_byte_identical_across_runs() {
    let source = SchemaSource::File(fixtures().join("drive.toml"));
    let loader = SchemaLoader::default();
    let generator = Generator::default();

    let first = generator
        .generate(&compile(&loader.load(&source).unwrap()).unwrap(), None)
        .unwrap();
    let second = generator
        .generate(&compile(&loader.load(&source).unwrap()).unwrap(), None)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn config_search_paths_resolve_named_schemas() {
    let dir = tempfile::tempdir().unwrap();
    let schemas = dir.path().join("schemas");
    fs::create_dir(&schemas).unwrap();
    fs::copy(fixtures().join("drive.toml"), schemas.join("drive.toml")).unwrap();
    let config_path = dir.path().join("romegen.toml");
    fs::write(
        &config_path,
        "[schema]\nsearch_paths = [\"missing\", \"schemas\"]\n\n[naming]\nprefix = \"drv\"\n",
    )
    .unwrap();

    let config = GeneratorConfig::from_path(&config_path).unwrap();
    let schema = config
        .schema_loader()
        .load(&SchemaSource::Named("drive".into()))
        .unwrap();
    let generator = Generator::new(config.naming.clone()).unwrap();
    let header = generator.header(&compile(&schema).unwrap(), None).unwrap();
    assert!(header.contains("#ifndef DRV_MESSAGES_H\n"));
    assert!(header.contains("#define DRV_SEND_PING(_i) do { \\\n"));
}

#[test]
fn unknown_schema_name_lists_inspected_paths() {
    let dir = tempfile::tempdir().unwrap();
    let loader = SchemaLoader::new([dir.path().join("a"), dir.path().join("b")]);
    let err = loader
        .load(&SchemaSource::Named("drive".into()))
        .unwrap_err();
    match err {
        SchemaError::SchemaNotFound { name, searched } => {
            assert_eq!(name, "drive");
            assert_eq!(
                searched,
                [dir.path().join("a/drive.toml"), dir.path().join("b/drive.toml")]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_schemas_are_rejected_before_emission() {
    let loader = SchemaLoader::default();
    let origin = PathBuf::from("inline.toml");

    let empty = loader.load_str("inline", &origin, "").unwrap_err();
    assert!(matches!(empty, SchemaError::EmptySchema { .. }));

    let duplicate = loader
        .load_str(
            "inline",
            &origin,
            "[[message]]\nname = \"a\"\nid = 7\n[[message]]\nname = \"b\"\nid = 7\n",
        )
        .unwrap();
    assert!(matches!(
        compile(&duplicate),
        Err(SchemaError::DuplicateMessageId { id: 7, .. })
    ));

    let bad_type = loader
        .load_str(
            "inline",
            &origin,
            "[[message]]\nname = \"a\"\nid = 1\nparams = [{ name = \"v\", type = \"double\" }]\n",
        )
        .unwrap();
    match compile(&bad_type) {
        Err(SchemaError::UnsupportedType { type_name, .. }) => assert_eq!(type_name, "double"),
        other => panic!("unexpected result: {other:?}"),
    }
}
