//! Save files, the compact `.orbyte` binary codec, and trail CSV export.

pub mod orbyte;
pub mod save;
pub mod trail;

use thiserror::Error;

use orbyte_system::SimulationError;

pub use save::{SAVE_VERSION, SaveFile, SavedBody, read_auto, write_auto};
pub use trail::{write_trails, writer_for_path};

/// Errors raised while writing or reading persisted simulations.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("body name must not be empty")]
    EmptyName,
    #[error("name '{name}' is {len} bytes; at most 255 fit in a save file")]
    NameTooLong { name: String, len: usize },
    #[error("{0} bodies do not fit in a save file")]
    TooManyBodies(usize),
    #[error("not an .orbyte file (magic {0:?})")]
    BadMagic([u8; 4]),
    #[error("unsupported save version {0}")]
    UnsupportedVersion(u32),
    #[error("unknown gravity mode tag {0}")]
    UnknownMode(u8),
    #[error("save data ends early at byte {offset}")]
    Truncated { offset: usize },
    #[error("name is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("body {body} references parent {parent}, which is not stored before it")]
    DanglingParent { body: usize, parent: usize },
    #[error("saved state rejected: {0}")]
    Simulation(#[from] SimulationError),
}
