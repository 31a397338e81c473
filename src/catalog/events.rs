//! Event shapes written out by hand.
//!
//! These events serialize through custom code in the editor, so their members carry no
//! JSON property markers to derive from. They share the structural keys of derived events.

use crate::schema::{
    registry::{
        border, color_or_palette_index, content_mode, easing, expression, hands, languages,
        narration_category,
    },
    structural_keys, EventInfo, EventOptions, FloatRange, IntRange, Shape, ValueSchema,
};

use super::image_sequence;

fn base(name: &str) -> Shape {
    structural_keys(name, &EventInfo::BASE, EventOptions::default())
}

fn on_row(name: &str) -> Shape {
    structural_keys(name, &EventInfo::BASE.with_row(), EventOptions::default())
}

fn in_rooms(name: &str) -> Shape {
    structural_keys(name, &EventInfo::BASE.with_rooms(), EventOptions::default())
}

fn at_least(min: f64) -> ValueSchema {
    ValueSchema::BoundedFloat(FloatRange::at_least(min))
}

fn between(min: f32, max: f32) -> ValueSchema {
    ValueSchema::BoundedFloat(FloatRange::new(min, max))
}

fn int_between(min: i32, max: i32) -> ValueSchema {
    ValueSchema::BoundedInt(IntRange::new(min, max))
}

fn pair(item: ValueSchema) -> ValueSchema {
    item.array_of_len(2)
}

pub(super) fn say_ready_get_set_go() -> Shape {
    base("SayReadyGetSetGo")
        .optional(
            "phraseToSay",
            ValueSchema::string_enum(&[
                "SayReaDyGetSetGoNew",
                "SayGetSetGo",
                "SayReaDyGetSetOne",
                "SayGetSetOne",
                "JustSayRea",
                "JustSayDy",
                "JustSayGet",
                "JustSaySet",
                "JustSayAnd",
                "JustSayGo",
                "JustSayStop",
                "JustSayAndStop",
                "Count1",
                "Count2",
                "SayReadyGetSetGo",
                "JustSayReady",
            ]),
        )
        .optional(
            "voiceSource",
            ValueSchema::string_enum(&[
                "Nurse",
                "NurseTired",
                "IanExcited",
                "IanCalm",
                "IanSlow",
                "NoneBottom",
                "NoneTop",
            ]),
        )
        .required("tick", ValueSchema::float())
        .optional("volume", ValueSchema::int())
}

pub(super) fn set_game_sound() -> Shape {
    base("SetGameSound")
        .optional(
            "soundType",
            ValueSchema::string_enum(&[
                "ClapSoundP1Classic",
                "ClapSoundP2Classic",
                "ClapSoundP1Oneshot",
                "ClapSoundP2Oneshot",
                "PulseSoundRow0",
                "PulseSoundRow1",
                "PulseSoundRow2",
                "PulseSoundRow3",
                "PulseSoundRow4",
                "PulseSoundRow5",
                "PulseSoundRow6",
                "PulseSoundRow7",
                "PulseSoundRow8",
                "PulseSoundRow9",
                "PulseSoundRow10",
                "PulseSoundRow11",
                "PulseSoundRow12",
                "PulseSoundRow13",
                "PulseSoundRow14",
                "PulseSoundRow15",
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
            ]),
        )
        .required("filename", ValueSchema::String)
        .optional("volume", ValueSchema::int())
        .optional("pitch", ValueSchema::int())
        .optional("pan", ValueSchema::int())
        .optional("offset", ValueSchema::int())
}

pub(super) fn set_counting_sound() -> Shape {
    on_row("SetCountingSound")
        .optional(
            "voiceSource",
            ValueSchema::string_enum(&[
                "JyiCount",
                "JyiCountFast",
                "JyiCountCalm",
                "JyiCountTired",
                "JyiCountVeryTired",
                "JyiCountEnglish",
                "JyiCountJapanese",
                "IanCount",
                "IanCountFast",
                "IanCountCalm",
                "IanCountSlow",
                "IanCountSlower",
                "IanCountEnglish",
                "IanCountEnglishFast",
                "IanCountEnglishCalm",
                "BirdCount",
                "OwlCount",
                "WhistleCount",
                "JyiCountLegacy",
                "ParrotCount",
                "OrioleCount",
                "WrenCount",
                "CanaryCount",
            ]),
        )
        .required("enabled", ValueSchema::Boolean)
        .optional("volume", ValueSchema::int())
}

pub(super) fn read_narration() -> Shape {
    base("ReadNarration")
        .required("text", ValueSchema::String)
        .optional("category", narration_category())
}

pub(super) fn narrate_row_info() -> Shape {
    on_row("NarrateRowInfo")
        .optional(
            "infoType",
            ValueSchema::string_enum(&["Connect", "Update", "Disconnect", "Online", "Offline"]),
        )
        .optional("soundOnly", ValueSchema::Boolean)
        .optional("narrateSkipBeats", ValueSchema::string_enum(&["on", "custom", "off"]))
        .optional("customPattern", ValueSchema::Pattern("^[-x]{6}$".to_string()))
        .optional("skipsUnstable", ValueSchema::Boolean)
}

pub(super) fn add_classic_beat() -> Shape {
    on_row("AddClassicBeat")
        .required("tick", at_least(0.0))
        .optional("swing", at_least(0.0))
        .optional("legacy", ValueSchema::Boolean)
        .optional("setXs", ValueSchema::string_enum(&["ThreeBeat", "FourBeat"]))
        .optional("hold", ValueSchema::float())
}

pub(super) fn set_row_xs() -> Shape {
    on_row("SetRowXs")
        .required("pattern", ValueSchema::Pattern("^[-xudbr]{6}$".to_string()))
        .optional("syncoBeat", ValueSchema::int())
        .optional("syncoSwing", ValueSchema::float())
}

pub(super) fn add_free_time_beat() -> Shape {
    on_row("AddFreeTimeBeat")
        .optional("hold", ValueSchema::float())
        .required("pulse", int_between(0, 6))
}

pub(super) fn pulse_free_time_beat() -> Shape {
    on_row("PulseFreeTimeBeat")
        .optional("hold", ValueSchema::float())
        .optional(
            "action",
            ValueSchema::string_enum(&["Increment", "Decrement", "Custom", "Remove"]),
        )
        .required("customPulse", int_between(0, 6))
}

pub(super) fn add_oneshot_beat() -> Shape {
    on_row("AddOneshotBeat")
        .optional("pulseType", ValueSchema::string_enum(&["Wave", "Square", "Heart", "Triangle"]))
        .optional("loops", ValueSchema::int())
        .optional("interval", at_least(0.0))
        .optional("delay", at_least(0.0))
        .optional("squareSound", ValueSchema::Boolean)
        .optional("skipshot", ValueSchema::Boolean)
        .required("tick", at_least(0.0))
}

pub(super) fn set_oneshot_wave() -> Shape {
    on_row("SetOneshotWave")
        .optional(
            "waveType",
            ValueSchema::string_enum(&[
                "BoomAndRush",
                "Ball",
                "Spring",
                "Spike",
                "SpikeHuge",
                "Single",
            ]),
        )
        .required("height", ValueSchema::int())
        .required("width", ValueSchema::int())
}

pub(super) fn set_theme() -> Shape {
    in_rooms("SetTheme").optional(
        "preset",
        ValueSchema::string_enum(&[
            "None",
            "Intimate",
            "IntimateSimple",
            "InsomniacDay",
            "InsomniacNight",
            "Matrix",
            "NeonMuseum",
            "CrossesStraight",
            "CrossesFalling",
            "CubesFalling",
            "CubesFallingNiceBlue",
            "CubesFallingWithBlueBloomAndCrossesAndMatrix",
            "OrientalTechno",
            "Kaleidoscope",
            "PoliticiansRally",
            "Rooftop",
            "BackAlley",
            "Sky",
            "NightSky",
            "HallOfMirrors",
            "CoffeeShop",
            "CoffeeShopNight",
            "Garden",
            "GardenNight",
            "TrainDay",
            "TrainNight",
            "DesertDay",
            "DesertNight",
            "HospitalWard",
            "HospitalWardNight",
            "PaigeOffice",
            "Basement",
            "ColeWardNight",
            "ColeWardSunrise",
            "BoyWard",
            "GirlWard",
            "Skyline",
            "SkylineBlue",
            "FloatingHeart",
            "FloatingHeartWithCubes",
            "FloatingHeartBroken",
            "FloatingHeartBrokenWithCubes",
            "ZenGarden",
            "Space",
            "Tutorial",
            "RollerDisco",
            "Vaporwave",
        ]),
    )
}

const ORDINARY_VFX_PRESETS: &[&str] = &[
    "SilhouettesOnHBeat",
    "Vignette",
    "VignetteFlicker",
    "ColourfulShockwaves",
    "BassDropOnHit",
    "ShakeOnHeartBeat",
    "ShakeOnHit",
    "WavyRows",
    "Tile2",
    "Tile3",
    "Tile4",
    "LightStripVert",
    "VHS",
    "ScreenScrollX",
    "ScreenScroll",
    "ScreenScrollXSansVHS",
    "ScreenScrollSansVHS",
    "RowGlowWhite",
    "RowOutline",
    "RowShadow",
    "RowAllWhite",
    "RowSilhouetteGlow",
    "RowPlain",
    "CutsceneMode",
    "Blackout",
    "Noise",
    "GlitchObstruction",
    "Matrix",
    "MiawMiaw",
    "Confetti",
    "FallingPetals",
    "FallingPetalsInstant",
    "FallingPetalsSnow",
    "Snow",
    "OrangeBloom",
    "BlueBloom",
    "HallOfMirrors",
    "BlackAndWhite",
    "Sepia",
    "NumbersAbovePulses",
    "Funk",
];

const BLOOM_VFX_PRESETS: &[&str] = &["Bloom"];

const SCREEN_VFX_PRESETS: &[&str] = &["TileN", "CustomScreenScroll"];

const EASEABLE_VFX_PRESETS: &[&str] = &[
    "Rain",
    "JPEG",
    "Mosaic",
    "ScreenWaves",
    "Grain",
    "Blizzard",
    "Drawing",
    "Aberration",
    "Blur",
    "RadialBlur",
    "HueShift",
];

fn vfx_preset(enable: bool) -> Shape {
    in_rooms("SetVFXPreset").required("enable", ValueSchema::BooleanLiteral(enable))
}

pub(super) fn enable_ordinary_vfx_preset() -> Shape {
    vfx_preset(true).optional("preset", ValueSchema::string_enum(ORDINARY_VFX_PRESETS))
}

pub(super) fn enable_bloom_vfx_preset() -> Shape {
    vfx_preset(true)
        .required("preset", ValueSchema::string_enum(BLOOM_VFX_PRESETS))
        .required("threshold", ValueSchema::float())
        .required("intensity", ValueSchema::float())
        .required("color", color_or_palette_index())
        .optional("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn enable_screen_vfx_preset() -> Shape {
    vfx_preset(true)
        .required("preset", ValueSchema::string_enum(SCREEN_VFX_PRESETS))
        .required("floatX", ValueSchema::float())
        .required("floatY", ValueSchema::float())
        .optional("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn enable_easeable_vfx_preset() -> Shape {
    vfx_preset(true)
        .required("preset", ValueSchema::string_enum(EASEABLE_VFX_PRESETS))
        .optional("intensity", ValueSchema::int())
        .optional("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn disable_vfx_preset() -> Shape {
    let presets: Vec<&str> = [
        ORDINARY_VFX_PRESETS,
        BLOOM_VFX_PRESETS,
        SCREEN_VFX_PRESETS,
        EASEABLE_VFX_PRESETS,
    ]
    .concat();
    vfx_preset(false).optional("preset", ValueSchema::string_enum(&presets))
}

pub(super) fn set_foreground() -> Shape {
    in_rooms("SetForeground")
        .optional("contentMode", content_mode())
        .required("color", color_or_palette_index())
        .required("image", image_sequence())
        .optional("fps", ValueSchema::float())
        .required("scrollX", ValueSchema::float())
        .required("scrollY", ValueSchema::float())
        .optional("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn move_camera() -> Shape {
    in_rooms("MoveCamera")
        .optional("cameraPosition", pair(between(-100.0, 200.0).nullable()))
        .optional("zoom", int_between(1, 9999))
        .optional("angle", between(-9999.0, 9999.0))
        .required("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn move_row() -> Shape {
    on_row("MoveRow")
        .optional("target", ValueSchema::string_enum(&["WholeRow", "Character", "Heart"]))
        .optional("customPosition", ValueSchema::Boolean)
        .optional("rowPosition", pair(expression()))
        .optional("scale", pair(expression()))
        .optional("angle", expression())
        .optional("pivot", ValueSchema::float())
        .required("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn show_dialogue() -> Shape {
    let mut shape = base("ShowDialogue")
        .required("text", ValueSchema::String)
        .optional("localized", ValueSchema::Boolean);
    for language in languages() {
        shape = shape.optional(format!("text{language}"), ValueSchema::String);
    }
    shape
        .optional("panelSide", ValueSchema::string_enum(&["Bottom", "Top"]))
        .optional("portraitSide", ValueSchema::string_enum(&["Left", "Right"]))
        .required("speed", ValueSchema::float())
        .optional("playTextSounds", ValueSchema::Boolean)
}

pub(super) fn advance_text() -> Shape {
    base("AdvanceText")
        .optional("fadeOutDuration", ValueSchema::float())
        .required("id", ValueSchema::int())
}

pub(super) fn ordinary_comment() -> Shape {
    base("Comment")
        .optional("tab", ValueSchema::string_enum(&["Song", "Actions", "Rooms"]))
        .optional("show", ValueSchema::Boolean)
        .required("text", ValueSchema::String)
        .optional("color", color_or_palette_index())
}

pub(super) fn sprite_comment() -> Shape {
    base("Comment")
        .required("tab", ValueSchema::Literal("Sprites".to_string()))
        .required("target", ValueSchema::String)
        .optional("show", ValueSchema::Boolean)
        .required("text", ValueSchema::String)
        .optional("color", color_or_palette_index())
}

/// Border and tint keys shared by row and sprite painting
fn tint(shape: Shape) -> Shape {
    shape
        .optional("border", border())
        .required("borderColor", color_or_palette_index())
        .required("tint", ValueSchema::Boolean)
        .required("tintColor", color_or_palette_index())
        .optional("borderOpacity", ValueSchema::int())
        .optional("tintOpacity", ValueSchema::int())
}

pub(super) fn paint_hands() -> Shape {
    tint(in_rooms("PaintHands").optional("hands", hands()))
        .optional("opacity", int_between(0, 100))
        .optional("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn assign_hands() -> Shape {
    in_rooms("SetHandOwner")
        .optional("hand", hands())
        .optional("character", ValueSchema::String)
}

pub(super) fn call_custom_method() -> Shape {
    base("CallCustomMethod")
        .required("methodName", ValueSchema::String)
        .optional("executionTime", ValueSchema::string_enum(&["OnPrebar", "OnBar"]))
        .required("sortOffset", ValueSchema::int())
}

pub(super) fn window_dance() -> Shape {
    in_rooms("NewWindowDance")
        .optional(
            "preset",
            ValueSchema::string_enum(&["Move", "Sway", "Wrap", "Ellipse", "ShakePer"]),
        )
        .optional("usePosition", ValueSchema::string_enum(&["New", "Current"]))
        .required("position", pair(ValueSchema::float()))
        .optional("reference", ValueSchema::string_enum(&["Center", "Edge"]))
        .optional("useCircle", ValueSchema::Boolean)
        .required("speed", ValueSchema::float())
        .required("amplitude", ValueSchema::float())
        .required("amplitudeVector", pair(ValueSchema::float()))
        .required("angle", ValueSchema::float())
        .required("frequency", ValueSchema::float())
        .required("period", ValueSchema::float())
        .optional("easeType", ValueSchema::string_enum(&["Repeat", "Mirror"]))
        .required("easingDuration", ValueSchema::float())
        .optional("ease", easing())
}

fn sprite(name: &str) -> Shape {
    base(name).required("target", ValueSchema::String)
}

pub(super) fn move_sprite() -> Shape {
    sprite("Move")
        .optional("position", pair(expression()))
        .optional("scale", pair(expression()))
        .optional("angle", expression())
        .optional("pivot", pair(ValueSchema::float().nullable()))
        .required("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn paint_sprite() -> Shape {
    tint(sprite("Tint"))
        .optional("opacity", int_between(0, 100))
        .optional("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn play_animation() -> Shape {
    sprite("PlayAnimation").required("expression", ValueSchema::String)
}

pub(super) fn hide_sprite() -> Shape {
    sprite("SetVisible").required("visible", ValueSchema::Boolean)
}

pub(super) fn move_room() -> Shape {
    base("MoveRoom")
        .optional("roomPosition", pair(between(-10000.0, 10000.0).nullable()))
        .optional("scale", pair(ValueSchema::float().nullable()))
        .optional("angle", between(-9999.0, 9999.0))
        .optional("pivot", pair(ValueSchema::float().nullable()))
        .required("duration", ValueSchema::float())
        .optional("ease", easing())
}

pub(super) fn mask_room() -> Shape {
    base("MaskRoom")
        .optional("maskType", ValueSchema::string_enum(&["Image", "Room", "Color", "None"]))
        .optional("alphaMode", ValueSchema::string_enum(&["Normal", "Inverted"]))
        .optional("sourceRoom", ValueSchema::int())
        .required("image", image_sequence())
        .optional("fps", ValueSchema::float())
        .optional("keyColor", color_or_palette_index())
        .optional("colorCutoff", ValueSchema::int())
        .optional("colorFeathering", ValueSchema::int())
        .optional("contentMode", content_mode())
}

pub(super) fn set_room_perspective() -> Shape {
    let corner = pair(between(-10000.0, 10000.0).nullable());
    base("SetRoomPerspective")
        .required("cornerPositions", corner.array_of_len(4))
        .required("duration", ValueSchema::float())
        .optional("ease", easing())
}
