//! The level file around its events: settings, rows, decorations, bookmarks and the
//! color palette.

use crate::schema::{
    registry::row_type, rooms_entry, row_entry, FloatRange, IntRange, Shape, ValueSchema,
};

/// Colors a level's palette can hold
pub const PALETTE_SIZE: usize = 21;

fn with_row_and_rooms(mut shape: Shape) -> Shape {
    shape.insert("row", row_entry());
    shape.insert("rooms", rooms_entry());
    shape
}

fn settings() -> ValueSchema {
    let shape = Shape::new()
        .required("version", ValueSchema::int())
        .optional("artist", ValueSchema::BoundedString(256))
        .optional("song", ValueSchema::BoundedString(256))
        .optional(
            "specialArtistType",
            ValueSchema::string_enum(&["None", "AuthorIsArtist", "PublicLicense"]),
        )
        .optional("artistPermission", ValueSchema::String)
        .optional("artistLinks", ValueSchema::String)
        .optional("author", ValueSchema::BoundedString(256))
        .optional("difficulty", ValueSchema::string_enum(&["Easy", "Medium", "Tough", "VeryTough"]))
        .optional("seizureWarning", ValueSchema::Boolean)
        .optional("previewImage", ValueSchema::String)
        .optional("syringeIcon", ValueSchema::String)
        .optional("previewSong", ValueSchema::String)
        .optional("previewSongStartTime", ValueSchema::float())
        .optional("previewSongDuration", ValueSchema::float())
        .optional("songNameHue", ValueSchema::float())
        .optional("songLabelGrayscale", ValueSchema::Boolean)
        .optional("description", ValueSchema::BoundedString(1000))
        .optional("tags", ValueSchema::String)
        .optional("separate2PLevelFilename", ValueSchema::String)
        .optional(
            "canBePlayedOn",
            ValueSchema::string_enum(&["OnePlayerOnly", "TwoPlayerOnly", "BothModes"]),
        )
        .optional(
            "firstBeatBehavior",
            ValueSchema::string_enum(&["RunNormally", "RunEventsOnPrebar"]),
        )
        .optional("customClass", ValueSchema::String)
        .optional("inkFile", ValueSchema::String)
        .optional(
            "multiplayerAppearance",
            ValueSchema::string_enum(&["HorizontalStrips", "Nothing"]),
        )
        .optional("levelVolume", ValueSchema::float())
        .required("rankMaxMistakes", ValueSchema::int().array_of_len(4))
        .optional("mods", ValueSchema::String.array().or(ValueSchema::String))
        .required("rankDescription", ValueSchema::String.array_of_len(6));
    ValueSchema::Object(shape).named("Settings")
}

fn player() -> ValueSchema {
    ValueSchema::string_enum(&["P1", "P2", "CPU"]).named("Player")
}

fn row() -> ValueSchema {
    let shape = Shape::new()
        .required("character", ValueSchema::String)
        .optional("rowType", row_type());
    let shape = with_row_and_rooms(shape)
        .optional("player", player())
        .optional("cpuMarker", ValueSchema::String)
        .optional("hideAtStart", ValueSchema::Boolean)
        .optional("rowToMimic", ValueSchema::int())
        .optional("muteBeats", ValueSchema::Boolean)
        .required("pulseSound", ValueSchema::String)
        .optional("pulseSoundVolume", ValueSchema::int())
        .optional("pulseSoundPitch", ValueSchema::int())
        .optional("pulseSoundPan", ValueSchema::int())
        .optional("pulseSoundOffset", ValueSchema::int());
    ValueSchema::Object(shape).named("Row")
}

fn decoration() -> ValueSchema {
    let shape = with_row_and_rooms(Shape::new().required("id", ValueSchema::String))
        .required("filename", ValueSchema::String)
        .required("depth", ValueSchema::int())
        .required("visible", ValueSchema::Boolean);
    ValueSchema::Object(shape).named("Decoration")
}

fn bookmark() -> ValueSchema {
    let shape = Shape::new()
        .required("bar", ValueSchema::BoundedInt(IntRange::at_least(1)))
        .required("beat", ValueSchema::BoundedFloat(FloatRange::at_least(1.0)))
        .required("color", ValueSchema::int());
    ValueSchema::Object(shape).named("Bookmark")
}

/// A hex color with optional alpha
fn color() -> ValueSchema {
    ValueSchema::Pattern("^(?:[0-9A-Fa-f]{2}){3,4}$".to_string()).named("Color")
}

/// The level object: `event` and `conditional` are the schemas of one event and one
/// conditional.
#[must_use]
pub fn level_root(event: ValueSchema, conditional: ValueSchema) -> Shape {
    Shape::new()
        .optional("$schema", ValueSchema::Url)
        .optional("settings", settings())
        .required("rows", row().array())
        .optional("decorations", decoration().array())
        .required("events", event.array())
        .optional("conditionals", conditional.array())
        .optional("bookmarks", bookmark().array())
        .optional("colorPalette", color().array_of(0, Some(PALETTE_SIZE)))
}
