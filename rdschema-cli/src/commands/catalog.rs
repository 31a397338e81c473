use rdschema::{build_level, catalog::LevelSchema};
use serde::Serialize;

use crate::{
    app::{GlobalOptions, InputOptions},
    commands::common::with_context,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct CatalogRow {
    id: String,
    kind: &'static str,
    properties: usize,
    required: usize,
}

#[derive(Debug, Serialize)]
struct CatalogOutput {
    entries: Vec<CatalogRow>,
    unknown_members: usize,
}

pub fn run(input: &InputOptions, global: &GlobalOptions) -> anyhow::Result<()> {
    let level = with_context(input, |ctx| Ok(build_level(ctx)?))?;
    let output = summarize(&level);

    print_output(&output, global, |output| {
        let mut table = TabWriter::new(vec![
            ("ID", Align::Left),
            ("KIND", Align::Left),
            ("PROPERTIES", Align::Right),
            ("REQUIRED", Align::Right),
        ]);
        for row in &output.entries {
            table.row(vec![
                row.id.clone(),
                row.kind.to_string(),
                row.properties.to_string(),
                row.required.to_string(),
            ]);
        }
        table.print();

        if output.unknown_members > 0 {
            println!();
            println!("{} members have unrecognized types", output.unknown_members);
        }
    })
}

fn summarize(level: &LevelSchema) -> CatalogOutput {
    let events = level.events.iter().map(|entry| (entry, "event"));
    let conditionals = level.conditionals.iter().map(|entry| (entry, "conditional"));

    let entries = events
        .chain(conditionals)
        .map(|((id, shape), kind)| CatalogRow {
            id: id.clone(),
            kind,
            properties: shape.len(),
            required: shape.iter().filter(|(_, entry)| entry.required).count(),
        })
        .collect();

    CatalogOutput {
        entries,
        unknown_members: level.diagnostics.len(),
    }
}
