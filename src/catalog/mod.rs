//! The level file catalog: which event and conditional types make up a level, the
//! corrections applied on top of their derived shapes, and the hand-written parts.
//!
//! Shapes derived from metadata describe what the editor writes today. Level files written
//! by older editor versions use a few more keys and looser value types; the overrides here
//! let validators accept them.
//!
//! Events the editor serializes by hand, the level object around the events, and the
//! character file have no metadata to derive from and are written out in [`events`],
//! [`level`] and [`character`].

use indexmap::IndexMap;

use crate::{
    metadata::context::MetadataContext,
    schema::{
        Diagnostic, EventOptions, Override, Shape, ShapeBuilder, ShapeEntry, ValueSchema,
    },
    Result,
};

use self::CatalogItem::{Derived, Fixed, Union};

mod character;
mod events;
mod level;

pub use character::character;
pub use level::{level_root, PALETTE_SIZE};

/// One derived event or conditional type of the catalog.
#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    /// Definition id in the generated schemas
    pub id: &'static str,
    /// Type name, the suffix of `LevelEvent_` or `Conditional_`
    pub name: &'static str,
    /// Corrections applied after derivation
    pub overrides: fn() -> Vec<Override>,
}

impl CatalogEntry {
    const fn new(id: &'static str, name: &'static str) -> Self {
        CatalogEntry {
            id,
            name,
            overrides: Vec::new,
        }
    }

    const fn with(id: &'static str, name: &'static str, overrides: fn() -> Vec<Override>) -> Self {
        CatalogEntry {
            id,
            name,
            overrides,
        }
    }
}

/// A node of the event tree.
#[derive(Clone, Copy, Debug)]
pub enum CatalogItem {
    /// Shaped from the assembly
    Derived(CatalogEntry),
    /// Written out by hand
    Fixed {
        /// Definition id
        id: &'static str,
        /// The shape
        shape: fn() -> Shape,
    },
    /// Any of several items, under its own definition id
    Union {
        /// Definition id
        id: &'static str,
        /// The variants, in schema order
        items: &'static [CatalogItem],
    },
}

const fn derived(id: &'static str, name: &'static str) -> CatalogItem {
    Derived(CatalogEntry::new(id, name))
}

const fn derived_with(
    id: &'static str,
    name: &'static str,
    overrides: fn() -> Vec<Override>,
) -> CatalogItem {
    Derived(CatalogEntry::with(id, name, overrides))
}

const fn fixed(id: &'static str, shape: fn() -> Shape) -> CatalogItem {
    Fixed { id, shape }
}

/// Definition id of the union of every event
pub const EVENT_ID: &str = "Event";

/// Definition id of the union of every conditional
pub const CONDITIONAL_ID: &str = "Conditional";

/// Event groups, in schema order. Their union is [`EVENT_ID`].
pub static EVENTS: &[CatalogItem] = &[
    Union {
        id: "SoundEvent",
        items: &[
            derived_with("PlaySongEvent", "PlaySong", play_song),
            derived("SetCrotchetsPerBarEvent", "SetCrotchetsPerBar"),
            derived_with("PlaySoundEvent", "PlaySound", play_sound),
            derived("SetBeatsPerMinuteEvent", "SetBeatsPerMinute"),
            derived_with("SetClapSoundsEvent", "SetClapSounds", set_clap_sounds),
            derived("SetHeartExplodeVolumeEvent", "SetHeartExplodeVolume"),
            derived("SetHeartExplosionIntervalEvent", "SetHeartExplodeInterval"),
            fixed("SayReadyGetSetGoEvent", events::say_ready_get_set_go),
            fixed("SetGameSoundEvent", events::set_game_sound),
            derived_with("SetBeatSoundEvent", "SetBeatSound", play_sound),
            fixed("SetCountingSoundEvent", events::set_counting_sound),
            fixed("ReadNarrationEvent", events::read_narration),
            fixed("NarrateRowInfoEvent", events::narrate_row_info),
        ],
    },
    Union {
        id: "RowEvent",
        items: &[
            fixed("AddClassicBeatEvent", events::add_classic_beat),
            fixed("SetRowXsEvent", events::set_row_xs),
            fixed("AddFreeTimeBeatEvent", events::add_free_time_beat),
            fixed("PulseFreeTimeBeatEvent", events::pulse_free_time_beat),
            fixed("AddOneshotBeatEvent", events::add_oneshot_beat),
            fixed("SetOneshotWaveEvent", events::set_oneshot_wave),
        ],
    },
    Union {
        id: "ActionEvent",
        items: &[
            fixed("SetThemeEvent", events::set_theme),
            Union {
                id: "SetVFXPresetEvent",
                items: &[
                    fixed("EnableOrdinaryVFXPresetEvent", events::enable_ordinary_vfx_preset),
                    fixed("EnableBloomVFXPresetEvent", events::enable_bloom_vfx_preset),
                    fixed("EnableScreenVFXPresetEvent", events::enable_screen_vfx_preset),
                    fixed("EnableEaseableVFXPresetEvent", events::enable_easeable_vfx_preset),
                    fixed("DisableVFXPresetEvent", events::disable_vfx_preset),
                ],
            },
            derived_with("SetBackgroundEvent", "SetBackgroundColor", set_background),
            fixed("SetForegroundEvent", events::set_foreground),
            derived("SetSpeedEvent", "SetSpeed"),
            derived("FlashEvent", "Flash"),
            derived("CustomFlashEvent", "CustomFlash"),
            fixed("MoveCameraEvent", events::move_camera),
            derived_with("HideRowEvent", "HideRow", hide_row),
            fixed("MoveRowEvent", events::move_row),
            derived("PlayExpressionEvent", "PlayExpression"),
            derived_with("PaintRowsEvent", "TintRows", tint_rows),
            derived("BassDropEvent", "BassDrop"),
            derived("ShakeScreenEvent", "ShakeScreen"),
            derived_with("FlipScreenEvent", "FlipScreen", flip_screen),
            derived("InvertColorsEvent", "InvertColors"),
            derived("PulseCameraEvent", "PulseCamera"),
            derived("TextExplosionEvent", "TextExplosion"),
            fixed("ShowDialogueEvent", events::show_dialogue),
            derived("ShowStatusSignEvent", "ShowStatusSign"),
            derived_with("FloatingTextEvent", "FloatingText", floating_text),
            fixed("AdvanceFloatingTextEvent", events::advance_text),
            derived("ChangePlayersRowsEvent", "ChangePlayersRows"),
            derived("FinishLevelEvent", "FinishLevel"),
            Union {
                id: "CommentEvent",
                items: &[
                    fixed("OrdinaryCommentEvent", events::ordinary_comment),
                    fixed("SpriteCommentEvent", events::sprite_comment),
                ],
            },
            derived("ShowHandsEvent", "ShowHands"),
            fixed("PaintHandsEvent", events::paint_hands),
            fixed("AssignHandsEvent", events::assign_hands),
            derived_with("TagActionEvent", "TagAction", tag_action),
            derived("SetPlayStyleEvent", "SetPlayStyle"),
            derived("StutterEvent", "Stutter"),
            fixed("CallCustomMethodEvent", events::call_custom_method),
            fixed("WindowDanceEvent", events::window_dance),
        ],
    },
    Union {
        id: "DecorationEvent",
        items: &[
            fixed("MoveSpriteEvent", events::move_sprite),
            fixed("PaintSpriteEvent", events::paint_sprite),
            fixed("PlayAnimationEvent", events::play_animation),
            fixed("HideSpriteEvent", events::hide_sprite),
        ],
    },
    Union {
        id: "RoomEvent",
        items: &[
            derived("ShowRoomsHorizontallyEvent", "ShowRooms"),
            fixed("MoveRoomEvent", events::move_room),
            derived("ReorderRoomsEvent", "ReorderRooms"),
            derived("SetRoomContentModeEvent", "SetRoomContentMode"),
            fixed("MaskRoomEvent", events::mask_room),
            derived("FadeRoomEvent", "FadeRoom"),
            fixed("SetRoomPerspectiveEvent", events::set_room_perspective),
        ],
    },
];

/// Conditional types, in schema order. Their union is [`CONDITIONAL_ID`].
pub static CONDITIONALS: &[CatalogEntry] = &[
    CatalogEntry::new("LastHitConditional", "LastHit"),
    CatalogEntry::with("CustomConditional", "Custom", custom_conditional),
    CatalogEntry::new("TimesExecutedConditional", "TimesExecuted"),
    CatalogEntry::with("LanguageConditional", "Language", language_conditional),
    CatalogEntry::new("PlayerModeConditional", "PlayerMode"),
];

/// Every derived event entry of [`EVENTS`], in schema order.
#[must_use]
pub fn derived_events() -> Vec<&'static CatalogEntry> {
    fn walk(items: &'static [CatalogItem], out: &mut Vec<&'static CatalogEntry>) {
        for item in items {
            match item {
                Derived(entry) => out.push(entry),
                Fixed { .. } => {}
                Union { items, .. } => walk(items, out),
            }
        }
    }

    let mut out = Vec::new();
    walk(EVENTS, &mut out);
    out
}

/// Shapes of every catalog entry, keyed by definition id, and the level object built
/// from them.
#[derive(Clone, Debug, Default)]
pub struct LevelSchema {
    /// Event shapes in [`EVENTS`] order, derived and hand-written alike
    pub events: IndexMap<String, Shape>,
    /// Conditional shapes in [`CONDITIONALS`] order
    pub conditionals: IndexMap<String, Shape>,
    /// The level object; events and conditionals appear in it as named schemas
    pub root: Shape,
    /// Members whose type was not recognized
    pub diagnostics: Vec<Diagnostic>,
}

/// Shape every catalog entry, apply its overrides, and assemble the level object.
///
/// # Errors
/// Returns the first error of [`ShapeBuilder::event_shape`] or
/// [`ShapeBuilder::conditional_shape`]; a missing catalog type is fatal.
pub fn build_level(ctx: &MetadataContext) -> Result<LevelSchema> {
    let mut builder = ShapeBuilder::new(ctx);

    let mut events = IndexMap::new();
    let mut groups = Vec::with_capacity(EVENTS.len());
    for item in EVENTS {
        groups.push(event_item(&mut builder, item, &mut events)?);
    }
    let event = ValueSchema::Union(groups).named(EVENT_ID);

    let mut conditionals = IndexMap::with_capacity(CONDITIONALS.len());
    let mut variants = Vec::with_capacity(CONDITIONALS.len());
    for entry in CONDITIONALS {
        let mut shape = builder.conditional_shape(entry.name)?;
        shape.apply_overrides(&(entry.overrides)());
        log::debug!("{}: {} properties", entry.id, shape.len());
        variants.push(ValueSchema::Object(shape.clone()).named(entry.id));
        conditionals.insert(entry.id.to_string(), shape);
    }
    let conditional = ValueSchema::Union(variants).named(CONDITIONAL_ID);

    let diagnostics = builder.into_diagnostics();
    if !diagnostics.is_empty() {
        log::warn!("{} members have unrecognized types", diagnostics.len());
    }

    Ok(LevelSchema {
        events,
        conditionals,
        root: level_root(event, conditional),
        diagnostics,
    })
}

/// Shape `item`, recording every event shape in `events`, and return its named schema.
fn event_item(
    builder: &mut ShapeBuilder,
    item: &CatalogItem,
    events: &mut IndexMap<String, Shape>,
) -> Result<ValueSchema> {
    let (id, shape) = match item {
        Derived(entry) => {
            let mut shape = builder.event_shape(entry.name, EventOptions::default())?;
            shape.apply_overrides(&(entry.overrides)());
            (entry.id, shape)
        }
        Fixed { id, shape } => (*id, shape()),
        Union { id, items } => {
            let variants = items
                .iter()
                .map(|item| event_item(builder, item, events))
                .collect::<Result<Vec<_>>>()?;
            return Ok(ValueSchema::Union(variants).named(id));
        }
    };

    log::debug!("{}: {} properties", id, shape.len());
    let schema = ValueSchema::Object(shape.clone()).named(id);
    events.insert(id.to_string(), shape);
    Ok(schema)
}

/// Sound keys of the flat layout older level files use, optionally prefixed
/// (`p1Filename`, `p1Sound`, ...).
fn legacy_sound(prefix: Option<&str>) -> Vec<Override> {
    let key = |name: &str| match prefix {
        None => name.to_string(),
        Some(prefix) => {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => format!("{prefix}{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => prefix.to_string(),
            }
        }
    };

    let optional = ShapeEntry::optional;
    vec![
        Override::replace(key("filename"), optional(ValueSchema::String)),
        Override::replace(key("sound"), optional(ValueSchema::String)),
        Override::replace(key("offset"), optional(ValueSchema::int())),
        Override::replace(key("volume"), optional(ValueSchema::int())),
        Override::replace(key("pitch"), optional(ValueSchema::int())),
        Override::replace(key("pan"), optional(ValueSchema::int())),
    ]
}

/// Legacy keys, except that `sound` keeps its derived schema and also accepts a plain
/// file name.
fn legacy_sound_widened(prefix: Option<&str>, sound_key: &str) -> Vec<Override> {
    let mut overrides: Vec<Override> = legacy_sound(prefix)
        .into_iter()
        .filter(|entry| entry.key != sound_key)
        .collect();
    overrides.push(Override::widen(sound_key, ValueSchema::String));
    overrides
}

fn play_song() -> Vec<Override> {
    legacy_sound(None)
}

fn play_sound() -> Vec<Override> {
    legacy_sound_widened(None, "sound")
}

fn set_clap_sounds() -> Vec<Override> {
    let mut overrides = Vec::new();
    for player in ["p1", "p2", "cpu"] {
        overrides.extend(legacy_sound_widened(Some(player), &format!("{player}Sound")));
    }
    for player in ["p1", "p2", "cpu"] {
        overrides.push(Override::replace(
            format!("{player}Used"),
            ShapeEntry::optional(ValueSchema::Boolean),
        ));
    }
    overrides
}

fn set_background() -> Vec<Override> {
    vec![Override::replace("image", ShapeEntry::optional(image_sequence()))]
}

fn hide_row() -> Vec<Override> {
    vec![Override::widen("show", ValueSchema::Boolean)]
}

fn tint_rows() -> Vec<Override> {
    vec![
        Override::replace("borderOpacity", ShapeEntry::optional(ValueSchema::int())),
        Override::replace("tintOpacity", ShapeEntry::optional(ValueSchema::int())),
    ]
}

fn flip_screen() -> Vec<Override> {
    vec![
        Override::replace("x", ShapeEntry::optional(ValueSchema::Boolean)),
        Override::widen("y", ValueSchema::Boolean),
    ]
}

fn floating_text() -> Vec<Override> {
    vec![Override::require("text"), Override::require("times")]
}

fn tag_action() -> Vec<Override> {
    vec![Override::require("Tag")]
}

fn custom_conditional() -> Vec<Override> {
    vec![Override::require("expression")]
}

fn language_conditional() -> Vec<Override> {
    vec![Override::require("Language")]
}

/// One image or an animation of several frames
fn image_sequence() -> ValueSchema {
    ValueSchema::String
        .array()
        .or(ValueSchema::String)
        .named("ImageSequence")
}
