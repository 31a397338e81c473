use anyhow::Context;
use rdschema::{AssemblyImage, File, MetadataContext, SchemaConfig};

use crate::app::InputOptions;

/// Load the assembly named by `input` and run `f` against its metadata context.
pub fn with_context<T>(
    input: &InputOptions,
    f: impl FnOnce(&MetadataContext) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let path = &input.assembly;
    let file = File::from_file(path)
        .with_context(|| format!("failed to load assembly: {}", path.display()))?;
    let metadata = file
        .metadata()
        .with_context(|| format!("no CLR metadata in {}", path.display()))?;
    let image = AssemblyImage::read(metadata)
        .with_context(|| format!("failed to read metadata of {}", path.display()))?;

    let config = SchemaConfig {
        clamp_int_ranges: input.clamp_ints,
        ..SchemaConfig::default()
    };
    let ctx = MetadataContext::new(&image, config)?;
    f(&ctx)
}

/// `Namespace.Name` to the `Namespace\0Name` form metadata lookups use.
pub fn full_type_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((namespace, name)) => format!("{namespace}\0{name}"),
        None => format!("\0{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_names() {
        assert_eq!(
            full_type_name("RDLevelEditor.SoundDataStruct"),
            "RDLevelEditor\0SoundDataStruct"
        );
        assert_eq!(full_type_name("UnityEngine.UI.Image"), "UnityEngine.UI\0Image");
        assert_eq!(full_type_name("Float2"), "\0Float2");
    }
}
