//! Filter-panel expansion state persistence
//!
//! Stores which filter sections the user keeps expanded, so the panel
//! reopens the way it was left. State lives in a single JSON file inside a
//! caller-supplied directory; a missing file means the user never touched
//! the panel, and a corrupted file is discarded and treated the same way.

use std::fs;
use std::path::Path;

/// File name for the stored expansion state.
const STATE_FILE: &str = "filter_accordion_state.json";

/// Error type for accordion state operations
#[derive(Debug)]
pub enum AccordionError {
    IoError(String),
}

impl std::fmt::Display for AccordionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccordionError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AccordionError {}

impl From<std::io::Error> for AccordionError {
    fn from(err: std::io::Error) -> Self {
        AccordionError::IoError(err.to_string())
    }
}

/// Load the stored expansion state.
///
/// # Arguments
/// * `state_dir` - Directory holding the state file
///
/// # Returns
/// `Ok(Some(sections))` when a valid state file exists, `Ok(None)` when it
/// does not. A file that fails to parse is removed and reported as absent.
pub fn load_state(state_dir: &Path) -> Result<Option<Vec<usize>>, AccordionError> {
    let state_path = state_dir.join(STATE_FILE);

    if !state_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&state_path)?;

    match serde_json::from_str::<Vec<usize>>(&contents) {
        Ok(sections) => Ok(Some(sections)),
        Err(_) => {
            fs::remove_file(&state_path)?;
            Ok(None)
        }
    }
}

/// Save an expansion state, replacing any previous one.
pub fn save_state(state_dir: &Path, sections: &[usize]) -> Result<(), AccordionError> {
    fs::create_dir_all(state_dir)?;

    let state_path = state_dir.join(STATE_FILE);
    let contents = serde_json::to_string(sections)
        .map_err(|e| AccordionError::IoError(e.to_string()))?;

    fs::write(&state_path, contents)?;
    Ok(())
}

/// Remove the stored expansion state, if any.
pub fn clear_state(state_dir: &Path) -> Result<(), AccordionError> {
    let state_path = state_dir.join(STATE_FILE);

    if state_path.exists() {
        fs::remove_file(&state_path)?;
    }

    Ok(())
}
