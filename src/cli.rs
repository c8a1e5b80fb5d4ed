use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CambiaDietas — swap a food for an equivalent amount of another from the same group.
#[derive(Parser, Debug)]
#[command(name = "cambia_dietas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a food catalog (JSON, or CSV by extension). Uses the bundled catalog if omitted.
    #[arg(short, long, global = true, env = "CAMBIADIETAS_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick foods from menus and convert amounts interactively.
    Interactive,

    /// List food categories.
    Categories,

    /// List the foods of a category.
    Foods {
        /// Category name (exact match).
        category: String,
    },

    /// Convert an amount of one food into an equivalent amount of another.
    Convert {
        /// Reference food name (exact, case-sensitive).
        food: String,

        /// Amount of the reference food.
        amount: String,

        /// Alternative food name from the same category.
        alternative: String,
    },

    /// Check the catalog for data integrity problems.
    Validate,

    /// Export the catalog as CSV.
    Export {
        /// Output CSV path.
        output: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Interactive
    }
}
