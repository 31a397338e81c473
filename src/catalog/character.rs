//! Custom character files: sprite sheet size and animation clips.

use crate::schema::{Shape, ValueSchema};

fn int_pair() -> ValueSchema {
    ValueSchema::Tuple(vec![ValueSchema::int(), ValueSchema::int()])
}

fn clip() -> ValueSchema {
    let shape = Shape::new()
        .required("name", ValueSchema::String)
        .required("frames", ValueSchema::int().array())
        .optional("loopStart", ValueSchema::int())
        .required("loop", ValueSchema::string_enum(&["yes", "onBeat", "no"]))
        .required("fps", ValueSchema::float())
        .optional("portraitOffset", int_pair())
        .optional("portraitSize", int_pair())
        .optional("portraitScale", ValueSchema::float());
    ValueSchema::Object(shape).named("Clip")
}

/// The character file object.
///
/// Nothing here is read from the assembly; character files are parsed by hand-written
/// code in the game.
#[must_use]
pub fn character() -> Shape {
    Shape::new()
        .optional("$schema", ValueSchema::Url)
        .optional("name", ValueSchema::String)
        .optional("voice", ValueSchema::String)
        .required("size", int_pair())
        .required("clips", clip().array())
        .optional("rowPreviewOffset", int_pair())
        .optional("rowPreviewFrame", ValueSchema::int())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_keys() {
        let shape = character();
        assert_eq!(
            shape.keys().collect::<Vec<_>>(),
            ["$schema", "name", "voice", "size", "clips", "rowPreviewOffset", "rowPreviewFrame"]
        );
        assert!(shape.get("size").unwrap().required);
        assert!(shape.get("clips").unwrap().required);
        assert_eq!(shape.get("size").unwrap().schema, int_pair());
    }

    #[test]
    fn clip_loop_modes() {
        let ValueSchema::Object(clip) = clip().resolved().clone() else {
            panic!("Clip is not an object");
        };
        let entry = clip.get("loop").unwrap();
        assert!(entry.required);
        assert_eq!(entry.schema, ValueSchema::string_enum(&["yes", "onBeat", "no"]));
        assert!(!clip.get("portraitSize").unwrap().required);
    }
}
