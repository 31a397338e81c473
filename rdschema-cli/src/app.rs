use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// rdschema - Rhythm Doctor level schemas from the game assembly
#[derive(Debug, Parser)]
#[command(name = "rdschema", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where to read the assembly from and how to derive schemas from it.
#[derive(Debug, Args)]
pub struct InputOptions {
    /// Path to the game's Assembly-CSharp.dll.
    #[arg(long, env = "RD_ASSEMBLY_PATH", value_name = "FILE")]
    pub assembly: PathBuf,

    /// Apply the int range attributes of integer members.
    #[arg(long)]
    pub clamp_ints: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write level.json, level.d.ts, character.json and character.d.ts.
    Generate {
        #[command(flatten)]
        input: InputOptions,

        /// Directory the schema files are written to.
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print the derived shape of one type.
    Shape {
        #[command(flatten)]
        input: InputOptions,

        /// Event or conditional name (e.g. PlaySound), or a full type name for --kind type
        /// (e.g. RDLevelEditor.SoundDataStruct).
        #[arg(value_name = "NAME")]
        name: String,

        /// What NAME refers to.
        #[arg(short, long, value_enum, default_value_t = ShapeKind::Event)]
        kind: ShapeKind,

        /// Leave out the `y` key of an event.
        #[arg(long)]
        fixed_y: bool,
    },

    /// List the catalog's events and conditionals with their property counts.
    Catalog {
        #[command(flatten)]
        input: InputOptions,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShapeKind {
    /// Any type, by namespace-qualified name.
    Type,
    /// A `LevelEvent_<NAME>` type.
    Event,
    /// A `Conditional_<NAME>` type.
    Conditional,
}
