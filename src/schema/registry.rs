//! Named types the signature decoder recognizes.
//!
//! A `CLASS`/`VALUETYPE` element names a type by `namespace\0name`. The registry maps that
//! name to a [`NamedType`], which says how to turn it into a [`ValueSchema`]. Names that are
//! not registered decode to [`ValueSchema::Unknown`] with a diagnostic.

use std::collections::HashMap;

use crate::schema::{IntRange, ValueSchema};

/// How a registered type becomes a schema.
#[derive(Clone, Copy, Debug)]
pub enum NamedType {
    /// Inline string enum
    Enum(&'static [&'static str]),
    /// String enum emitted once under a definition id
    SharedEnum {
        /// Definition id
        id: &'static str,
        /// Enum values in declaration order
        values: &'static [&'static str],
    },
    /// A fixed schema
    Schema(fn() -> ValueSchema),
    /// Pair of nullable floats bounded by the member's float2 range attribute
    Float2,
    /// Pair of floats bounded by the member's vector2 range attribute
    Vector2,
    /// Struct shaped from its own instance fields, emitted under a definition id
    Struct {
        /// Definition id
        id: &'static str,
        /// Fields data files must contain
        required: &'static [&'static str],
    },
    /// Known, but deliberately left untyped; no diagnostic
    Opaque,
}

/// Name to [`NamedType`] lookup.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, NamedType>,
}

impl TypeRegistry {
    /// A registry without entries
    #[must_use]
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// The registry for the Rhythm Doctor assembly.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = TypeRegistry {
            entries: HashMap::with_capacity(BUILTIN.len()),
        };
        for (name, named) in BUILTIN {
            registry.register(name, *named);
        }
        registry
    }

    /// Register `named` under `full_name` (`namespace\0name`), replacing any previous
    /// entry.
    pub fn register(&mut self, full_name: &str, named: NamedType) {
        self.entries.insert(full_name.to_string(), named);
    }

    /// The entry for `full_name`
    #[must_use]
    pub fn get(&self, full_name: &str) -> Option<&NamedType> {
        self.entries.get(full_name)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A level condition: a condition expression string, or a list of conditional ids.
#[must_use]
pub fn condition_expression() -> ValueSchema {
    ValueSchema::String
        .or(ValueSchema::int().array())
        .named("ConditionExpression")
}

/// A hex color with optional alpha, or a palette index `palN`.
#[must_use]
pub fn color_or_palette_index() -> ValueSchema {
    ValueSchema::Pattern(r"^(?:(?:[0-9A-Fa-f]{2}){3,4}|pal\d+)$".to_string())
        .named("ColorOrPaletteIndex")
}

/// A number, an expression string, or `null`.
#[must_use]
pub fn expression() -> ValueSchema {
    ValueSchema::float()
        .or(ValueSchema::String)
        .or(ValueSchema::Null)
        .named("Expression")
}

/// Tween easing curve
#[must_use]
pub fn easing() -> ValueSchema {
    ValueSchema::string_enum(EASING).named("Easing")
}

/// Row or sprite border style
#[must_use]
pub fn border() -> ValueSchema {
    ValueSchema::string_enum(BORDER).named("Border")
}

/// How an image fills its area
#[must_use]
pub fn content_mode() -> ValueSchema {
    ValueSchema::string_enum(CONTENT_MODE).named("ContentMode")
}

/// Which hands an event acts on
#[must_use]
pub fn hands() -> ValueSchema {
    ValueSchema::string_enum(HANDS).named("Hands")
}

/// Screen reader narration category
#[must_use]
pub fn narration_category() -> ValueSchema {
    ValueSchema::string_enum(NARRATION_CATEGORY).named("NarrationCategory")
}

/// Game display language
#[must_use]
pub fn language() -> ValueSchema {
    ValueSchema::string_enum(LANGUAGE).named("Language")
}

/// Values of [`language`] in declaration order
#[must_use]
pub fn languages() -> &'static [&'static str] {
    LANGUAGE
}

/// Classic or oneshot row
#[must_use]
pub fn row_type() -> ValueSchema {
    ValueSchema::string_enum(ROW_TYPE).named("RowType")
}

fn character() -> ValueSchema {
    ValueSchema::String
}

fn expression_pair() -> ValueSchema {
    ValueSchema::Tuple(vec![expression(), expression()])
}

fn room_select() -> ValueSchema {
    ValueSchema::BoundedInt(IntRange::new(0, 3))
}

const BORDER: &[&str] = &["None", "Outline", "Glow"];

const CONTENT_MODE: &[&str] = &[
    "ScaleToFill",
    "AspectFit",
    "AspectFill",
    "Center",
    "Tiled",
    "Real",
];

const HANDS: &[&str] = &["Left", "Right", "p1", "p2", "Both"];

const NARRATION_CATEGORY: &[&str] = &[
    "Fallback",
    "Navigation",
    "Instruction",
    "Notification",
    "Dialogue",
    "Description",
    "Subtitles",
];

const SORTING_LAYER: &[&str] = &["Default", "Background", "Foreground"];

const ROW_TYPE: &[&str] = &["Classic", "Oneshot"];

const EASING: &[&str] = &[
    "Unset",
    "Linear",
    "InSine",
    "OutSine",
    "InOutSine",
    "InQuad",
    "OutQuad",
    "InOutQuad",
    "InCubic",
    "OutCubic",
    "InOutCubic",
    "InQuart",
    "OutQuart",
    "InOutQuart",
    "InQuint",
    "OutQuint",
    "InOutQuint",
    "InExpo",
    "OutExpo",
    "InOutExpo",
    "InCirc",
    "OutCirc",
    "InOutCirc",
    "InElastic",
    "OutElastic",
    "InOutElastic",
    "InBack",
    "OutBack",
    "InOutBack",
    "InBounce",
    "OutBounce",
    "InOutBounce",
];

const FILTER_MODE: &[&str] = &["NearestNeighbor", "Bilinear"];

const GAME_SOUND_TYPE: &[&str] = &[
    "ClapSoundP1Classic",
    "ClapSoundP2Classic",
    "ClapSoundP1Oneshot",
    "ClapSoundP2Oneshot",
    "SmallMistake",
    "BigMistake",
    "Hand1PopSound",
    "Hand2PopSound",
    "HeartExplosion",
    "HeartExplosion2",
    "HeartExplosion3",
    "ClapSoundHoldLongEnd",
    "ClapSoundHoldLongStart",
    "ClapSoundHoldShortEnd",
    "ClapSoundHoldShortStart",
    "PulseSoundHoldStart",
    "PulseSoundHoldShortEnd",
    "PulseSoundHoldEnd",
    "PulseSoundHoldStartAlt",
    "PulseSoundHoldShortEndAlt",
    "PulseSoundHoldEndAlt",
    "ClapSoundCPUClassic",
    "ClapSoundCPUOneshot",
    "ClapSoundHoldLongEndP2",
    "ClapSoundHoldLongStartP2",
    "ClapSoundHoldShortEndP2",
    "ClapSoundHoldShortStartP2",
    "PulseSoundHoldStartP2",
    "PulseSoundHoldShortEndP2",
    "PulseSoundHoldEndP2",
    "PulseSoundHoldStartAltP2",
    "PulseSoundHoldShortEndAltP2",
    "PulseSoundHoldEndAltP2",
    "FreezeshotSoundCueLow",
    "FreezeshotSoundCueHigh",
    "FreezeshotSoundRiser",
    "FreezeshotSoundCymbal",
    "BurnshotSoundCueLow",
    "BurnshotSoundCueHigh",
    "BurnshotSoundRiser",
    "BurnshotSoundCymbal",
    "ClapSoundHold",
    "PulseSoundHold",
    "ClapSoundHoldP2",
    "PulseSoundHoldP2",
    "FreezeshotSound",
    "BurnshotSound",
    "Skipshot",
];

const STRENGTH: &[&str] = &["Low", "Medium", "High"];

const TILING_TYPE: &[&str] = &["Scroll", "Pulse"];

const LANGUAGE: &[&str] = &[
    "English",
    "Spanish",
    "Portuguese",
    "ChineseSimplified",
    "ChineseTraditional",
    "Korean",
    "Polish",
    "Japanese",
    "German",
];

#[rustfmt::skip]
static BUILTIN: &[(&str, NamedType)] = &[
    ("\0AlphaMode", NamedType::Enum(&["Normal", "Inverted"])),
    ("\0BackgroundType", NamedType::Enum(&["Color", "Image"])),
    ("\0BorderType", NamedType::SharedEnum { id: "Border", values: BORDER }),
    ("\0Character", NamedType::Schema(character)),
    ("\0CharacterReorderType", NamedType::Enum(&["Smooth", "Instant", "None"])),
    ("\0ColorOrPalette", NamedType::Schema(color_or_palette_index)),
    ("\0ContentMode", NamedType::SharedEnum { id: "ContentMode", values: CONTENT_MODE }),
    ("\0EasingType", NamedType::Enum(&["Repeat", "Mirror"])),
    ("\0EditorShakeType", NamedType::Enum(&["Normal", "Smooth", "Rotate", "BassDrop"])),
    ("\0Float2", NamedType::Float2),
    ("\0FloatExpression", NamedType::Schema(expression)),
    ("\0FloatExpression2", NamedType::Schema(expression_pair)),
    ("\0FreezeBurnMode", NamedType::Enum(&["Freezeshot", "Burnshot"])),
    ("\0GameSoundType", NamedType::SharedEnum { id: "GameSoundType", values: GAME_SOUND_TYPE }),
    ("\0Hand", NamedType::SharedEnum { id: "Hands", values: HANDS }),
    ("\0HandAction", NamedType::Enum(&["Show", "Hide", "Raise", "Lower"])),
    ("\0HandExtent", NamedType::Enum(&["Full", "Short"])),
    ("\0HeartExplodeType", NamedType::Enum(&[
        "OneBeatAfter", "Instant", "GatherNoCeil", "GatherAndCeil", "Disabled",
    ])),
    ("\0HoldCueType", NamedType::Enum(&["Auto", "Early", "Late"])),
    ("\0MaskType", NamedType::Enum(&["Image", "Room", "Color", "None"])),
    ("\0MoveRowTarget", NamedType::Enum(&["WholeRow", "Character", "Heart"])),
    ("\0NarrateInfoType", NamedType::Enum(&[
        "Connect", "Update", "Disconnect", "Online", "Offline",
    ])),
    ("\0NarrationCategory", NamedType::SharedEnum { id: "NarrationCategory", values: NARRATION_CATEGORY }),
    ("\0OffsetType", NamedType::Enum(&[
        "Perfect", "SlightlyEarly", "SlightlyLate", "VeryEarly", "VeryLate", "AnyEarlyOrLate",
        "Missed",
    ])),
    ("\0OneshotPulseType", NamedType::Enum(&["Wave", "Square", "Heart", "Triangle"])),
    ("\0OverrideExpression", NamedType::Enum(&[
        "Neutral", "Happy", "Barely", "Missed", "Prehit", "Beep",
    ])),
    ("\0PanelSide", NamedType::Enum(&["Bottom", "Top"])),
    ("\0PivotAnchorType", NamedType::Enum(&[
        "None", "LeftEdge", "RightEdge", "BottomEdge", "TopEdge",
    ])),
    ("\0PlayStyleChange", NamedType::Enum(&[
        "Normal", "Loop", "Prolong", "Immediately", "ExtraImmediately", "ProlongOneBar",
        "Default", "OnNextBar", "BeatLoopOnly", "ScrubToNext", "None",
    ])),
    ("\0PortraitSide", NamedType::Enum(&["Left", "Right"])),
    ("\0RDPlayer", NamedType::Enum(&["P1", "P2", "CPU", "NoChange"])),
    ("\0RDSortingLayer", NamedType::SharedEnum { id: "SortingLayer", values: SORTING_LAYER }),
    ("\0RDTheme", NamedType::Opaque),
    ("\0RDThemeFX", NamedType::Opaque),
    ("\0ReferenceType", NamedType::Enum(&["Center", "Edge"])),
    ("\0RoomSelectType", NamedType::Schema(room_select)),
    ("\0RowEffect", NamedType::Enum(&["None", "Electric"])),
    ("\0RowType", NamedType::SharedEnum { id: "RowType", values: ROW_TYPE }),
    ("\0RowVisibilityMode", NamedType::Enum(&["Visible", "Hidden", "OnlyCharacter", "OnlyRow"])),
    ("\0SamePresetBehavior", NamedType::Enum(&["Keep", "Reset"])),
    ("\0SpriteBlendType", NamedType::Enum(&["None", "Additive", "Multiply", "Invert"])),
    ("\0StutterAction", NamedType::Enum(&["Add", "Cancel"])),
    ("\0SyncoStyle", NamedType::Enum(&["Chirp", "Beep"])),
    ("\0TagAction", NamedType::Enum(&[
        "Run", "RunAll", "Enable", "Disable", "EnableAll", "DisableAll",
    ])),
    ("\0TextExplosionDirection", NamedType::Enum(&["Left", "Right"])),
    ("\0TextExplosionMode", NamedType::Enum(&["OneColor", "Random"])),
    ("\0TextureFilter", NamedType::SharedEnum { id: "FilterMode", values: FILTER_MODE }),
    ("\0TilingType", NamedType::SharedEnum { id: "TilingType", values: TILING_TYPE }),
    ("\0TransitionType", NamedType::Enum(&["Smooth", "Instant", "Full"])),
    ("\0WaveType", NamedType::Enum(&[
        "BoomAndRush", "Ball", "Spring", "Spike", "SpikeHuge", "Single",
    ])),
    ("\0WindowDancePreset", NamedType::Enum(&["Move", "Sway", "Wrap", "Ellipse", "ShakePer"])),
    ("DG.Tweening\0Ease", NamedType::SharedEnum { id: "Easing", values: EASING }),
    ("RDLevelEditor\0CountingVoiceSource", NamedType::Enum(&[
        "JyiCount", "JyiCountFast", "JyiCountCalm", "JyiCountTired", "JyiCountVeryTired",
        "JyiCountEnglish", "JyiCountJapanese", "IanCount", "IanCountFast", "IanCountCalm",
        "IanCountSlow", "IanCountSlower", "IanCountEnglish", "IanCountEnglishFast",
        "IanCountEnglishCalm", "IanCountEnglishSlow", "WhistleCount", "BirdCount",
        "ParrotCount", "OwlCount", "OrioleCount", "WrenCount", "CanaryCount", "SpearCount",
        "JyiCountLegacy", "Custom",
    ])),
    ("RDLevelEditor\0CustomSoundType", NamedType::Enum(&[
        "CueSound", "MusicSound", "BeatSound", "HitSound", "OtherSound",
    ])),
    ("RDLevelEditor\0FloatingTextMode", NamedType::Enum(&["FadeOut", "HideAbruptly"])),
    ("RDLevelEditor\0GameVoiceSource", NamedType::Enum(&[
        "Nurse", "NurseTired", "NurseSwing", "NurseSwingCalm", "IanExcited", "IanCalm",
        "IanSlow", "NoneBottom", "NoneTop",
    ])),
    ("RDLevelEditor\0LevelEventExecutionTime", NamedType::Enum(&["OnPrebar", "OnBar"])),
    ("RDLevelEditor\0NarrateSkipBeats", NamedType::Enum(&["On", "Custom", "Off"])),
    ("RDLevelEditor\0OneshotPhraseToSay", NamedType::Enum(&[
        "SayReaDyGetSetGoNew", "SayGetSetGo", "SayReaDyGetSetOne", "SayGetSetOne", "JustSayRea",
        "JustSayDy", "JustSayGet", "JustSaySet", "JustSayAnd", "JustSayGo", "JustSayStop",
        "JustSayAndStop", "SaySwitch", "SayWatch", "SayListen", "Count1", "Count2", "Count3",
        "Count4", "Count5", "Count6", "Count7", "Count8", "Count9", "Count10",
        "SayReadyGetSetGo", "JustSayReady",
    ])),
    ("RDLevelEditor\0PivotMode", NamedType::Enum(&["Default", "AnchorEdge"])),
    ("RDLevelEditor\0PlayerMode", NamedType::Enum(&["OnePlayer", "TwoPlayers", "OneOrTwoPlayers"])),
    ("RDLevelEditor\0PulseAction", NamedType::Enum(&["Increment", "Decrement", "Custom", "Remove"])),
    ("RDLevelEditor\0SetXs", NamedType::Enum(&["ThreeBeat", "FourBeat"])),
    ("RDLevelEditor\0SimpleDuration", NamedType::Enum(&["Short", "Medium", "Long"])),
    ("RDLevelEditor\0SoundDataStruct", NamedType::Struct { id: "Sound", required: &["filename"] }),
    ("RDLevelEditor\0SpinningRowsAction", NamedType::Enum(&[
        "Connect", "Disconnect", "Rotate", "ConstantRotation", "WavyRotation", "Merge", "Split",
    ])),
    ("RDLevelEditor\0StrengthLevel", NamedType::SharedEnum { id: "Strength", values: STRENGTH }),
    ("RDLevelEditor\0WindowContentMode", NamedType::Enum(&["OnTop", "Room"])),
    ("RDLevelEditor\0WindowNameAction", NamedType::Enum(&["Set", "Append", "Reset"])),
    ("RDLevelEditor\0ZoomMode", NamedType::Enum(&["Fill", "Fit", "None"])),
    ("UnityEngine\0SystemLanguage", NamedType::SharedEnum { id: "Language", values: LANGUAGE }),
    ("UnityEngine\0TextAnchor", NamedType::Enum(&[
        "UpperLeft", "UpperCenter", "UpperRight", "MiddleLeft", "MiddleCenter", "MiddleRight",
        "LowerLeft", "LowerCenter", "LowerRight",
    ])),
    ("UnityEngine\0Vector2", NamedType::Vector2),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let registry = TypeRegistry::builtin();
        assert_eq!(registry.len(), BUILTIN.len());
    }

    #[test]
    fn builtin_lookups() {
        let registry = TypeRegistry::builtin();

        assert!(matches!(
            registry.get("\0BorderType"),
            Some(NamedType::SharedEnum { id: "Border", .. })
        ));
        assert!(matches!(registry.get("UnityEngine\0Vector2"), Some(NamedType::Vector2)));
        assert!(matches!(registry.get("\0RDTheme"), Some(NamedType::Opaque)));
        assert!(registry.get("BorderType").is_none());

        let Some(NamedType::Schema(room)) = registry.get("\0RoomSelectType") else {
            panic!("RoomSelectType is not a fixed schema");
        };
        assert_eq!(room(), ValueSchema::BoundedInt(IntRange::new(0, 3)));
    }

    #[test]
    fn register_replaces() {
        let mut registry = TypeRegistry::new();
        assert!(registry.is_empty());

        registry.register("NS\0Mode", NamedType::Enum(&["A"]));
        registry.register("NS\0Mode", NamedType::Opaque);
        assert_eq!(registry.len(), 1);
        assert!(matches!(registry.get("NS\0Mode"), Some(NamedType::Opaque)));
    }

    #[test]
    fn shared_enums_match_registered_ones() {
        let registry = TypeRegistry::builtin();
        let Some(NamedType::SharedEnum { id, values }) = registry.get("DG.Tweening\0Ease") else {
            panic!("Ease is not a shared enum");
        };
        assert_eq!(easing(), ValueSchema::string_enum(values).named(id));
        assert!(matches!(border(), ValueSchema::Named { ref id, .. } if id == "Border"));
        assert_eq!(languages().len(), 9);
    }

    #[test]
    fn shared_schemas() {
        assert!(matches!(
            condition_expression(),
            ValueSchema::Named { ref id, .. } if id == "ConditionExpression"
        ));
        let ValueSchema::Named { schema, .. } = expression() else {
            panic!("Expression is not named");
        };
        assert_eq!(
            *schema,
            ValueSchema::Union(vec![ValueSchema::float(), ValueSchema::String, ValueSchema::Null])
        );
    }
}
