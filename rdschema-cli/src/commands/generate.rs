use std::path::{Path, PathBuf};

use anyhow::Context;
use rdschema::{
    build_level, character,
    emit::{json_schema, typescript},
    LevelSchema,
};

use crate::{app::InputOptions, commands::common::with_context};

/// Derive the level schema and write the level and character schemas into `out_dir`.
pub fn run(input: &InputOptions, out_dir: &Path) -> anyhow::Result<()> {
    let level = with_context(input, |ctx| Ok(build_level(ctx)?))?;

    let written = write_schemas(&level, out_dir)?;
    for path in &written {
        log::info!("Wrote {}", path.display());
    }

    if !level.diagnostics.is_empty() {
        log::warn!(
            "{} members were emitted as unknown; extend the type registry to cover them",
            level.diagnostics.len()
        );
    }
    Ok(())
}

fn write_schemas(level: &LevelSchema, out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let character = character();
    let mut written = Vec::with_capacity(4);
    for (name, json, dts) in [
        ("level", json_schema::level(level), typescript::level(level)),
        (
            "character",
            json_schema::character(&character),
            typescript::character(&character),
        ),
    ] {
        let json_path = out_dir.join(format!("{name}.json"));
        let mut text = serde_json::to_string_pretty(&json)?;
        text.push('\n');
        std::fs::write(&json_path, text)
            .with_context(|| format!("failed to write {}", json_path.display()))?;

        let dts_path = out_dir.join(format!("{name}.d.ts"));
        std::fs::write(&dts_path, dts)
            .with_context(|| format!("failed to write {}", dts_path.display()))?;

        written.push(json_path);
        written.push(dts_path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdschema::{catalog::level_root, Shape, ValueSchema};

    #[test]
    fn writes_level_and_character_files() {
        let shape = Shape::new().required("type", ValueSchema::Literal("Flash".to_string()));
        let event = ValueSchema::Union(vec![ValueSchema::Object(shape).named("FlashEvent")]);
        let mut level = LevelSchema::default();
        level.root = level_root(
            event.named("Event"),
            ValueSchema::Union(Vec::new()).named("Conditional"),
        );

        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("schemas");
        let written = write_schemas(&level, &out_dir).unwrap();
        let names: Vec<_> = written
            .iter()
            .filter_map(|path| path.file_name()?.to_str())
            .collect();
        assert_eq!(names, ["level.json", "level.d.ts", "character.json", "character.d.ts"]);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(json["$id"], json_schema::LEVEL_SCHEMA_ID);
        assert!(json["definitions"]["FlashEvent"].is_object());

        let dts = std::fs::read_to_string(&written[1]).unwrap();
        assert!(dts.contains("export type Event = FlashEvent;"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written[2]).unwrap()).unwrap();
        assert_eq!(json["$id"], json_schema::CHARACTER_SCHEMA_ID);

        let dts = std::fs::read_to_string(&written[3]).unwrap();
        assert!(dts.ends_with("};\n"));
        assert!(dts.contains("export type Character = {"));
    }
}
