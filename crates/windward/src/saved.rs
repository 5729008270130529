//! Saved-game header access.
//!
//! Restoring a game only needs three attributes peeked from the header
//! before any server exists: the owner's name and the single-player and
//! public-server flags (all string-encoded), plus any client options
//! stored with the save. The save body is the launcher's business.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors while reading a save header.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The save file does not exist.
    #[error("could not find save file {0}")]
    NotFound(PathBuf),

    /// The save file exists but could not be read.
    #[error("could not load save file: {0}")]
    Io(#[from] std::io::Error),

    /// The header is present but unreadable.
    #[error("malformed save header: {0}")]
    Malformed(String),
}

/// Raw header as stored: all attributes optional, booleans as strings.
#[derive(Debug, Deserialize)]
struct RawHeader {
    owner: Option<String>,
    single_player: Option<String>,
    public_server: Option<String>,
    #[serde(default)]
    options: HashMap<String, String>,
}

/// The peeked save attributes, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedHeader {
    /// Name of the player who saved the game, if recorded.
    pub owner: Option<String>,
    /// Whether the save was a single-player game. Defaults to `true`
    /// when the attribute is missing or unparsable.
    pub single_player: bool,
    /// Whether the save's server was public. Defaults to `false`.
    pub public_server: bool,
    /// Client options stored with the save.
    pub options: HashMap<String, String>,
}

impl SavedHeader {
    /// Reads the header from any byte stream.
    pub fn read(mut reader: impl Read) -> Result<Self, SaveError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        let header: RawHeader = serde_json::from_str(&raw)
            .map_err(|e| SaveError::Malformed(e.to_string()))?;

        Ok(Self {
            owner: header.owner,
            single_player: parse_flag(header.single_player, true),
            public_server: parse_flag(header.public_server, false),
            options: header.options,
        })
    }

    /// Opens a save file and reads its header.
    pub fn open(path: &Path) -> Result<Self, SaveError> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SaveError::NotFound(path.to_path_buf())
            } else {
                SaveError::Io(e)
            }
        })?;
        Self::read(file)
    }
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    value
        .as_deref()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(default)
}
