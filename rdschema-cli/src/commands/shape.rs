use rdschema::{
    emit::{json_schema, typescript},
    EventOptions, Shape, ShapeBuilder,
};
use serde::Serialize;

use crate::{
    app::{GlobalOptions, InputOptions, ShapeKind},
    commands::common::{full_type_name, with_context},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct ShapeOutput {
    name: String,
    schema: serde_json::Value,
    diagnostics: Vec<String>,
    #[serde(skip)]
    shape: Shape,
}

pub fn run(
    input: &InputOptions,
    name: &str,
    kind: ShapeKind,
    options: EventOptions,
    global: &GlobalOptions,
) -> anyhow::Result<()> {
    let output = with_context(input, |ctx| {
        let mut builder = ShapeBuilder::new(ctx);
        let shape = match kind {
            ShapeKind::Type => builder.type_shape(&full_type_name(name))?,
            ShapeKind::Event => builder.event_shape(name, options)?,
            ShapeKind::Conditional => builder.conditional_shape(name)?,
        };

        Ok(ShapeOutput {
            name: name.to_string(),
            schema: json_schema::shape_schema(&shape),
            diagnostics: builder
                .into_diagnostics()
                .iter()
                .map(ToString::to_string)
                .collect(),
            shape,
        })
    })?;

    print_output(&output, global, |output| {
        let mut table = TabWriter::new(vec![
            ("PROPERTY", Align::Left),
            ("REQUIRED", Align::Left),
            ("TYPE", Align::Left),
        ]);
        for (key, entry) in &output.shape {
            table.row(vec![
                key.clone(),
                if entry.required { "yes" } else { "" }.to_string(),
                typescript::render(&entry.schema),
            ]);
        }
        table.print();

        for diagnostic in &output.diagnostics {
            println!("warning: {diagnostic}");
        }
    })
}
