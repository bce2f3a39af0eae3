use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

/// Newest-first list of notes, optionally mirrored to a JSON file.
#[derive(Debug, Default)]
pub struct NoteBook {
    notes: Vec<Note>,
    path: Option<PathBuf>,
}

impl NoteBook {
    /// An in-memory notebook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a notebook backed by `path`. A missing file is an empty notebook;
    /// an unreadable one is logged and ignored so the assistant still starts.
    pub fn open(path: PathBuf) -> Self {
        let notes = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => {
                    info!("Loaded {} notes from {:?}", notes.len(), path);
                    notes
                }
                Err(e) => {
                    warn!("Failed to parse notes file {:?}: {}", path, e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            notes,
            path: Some(path),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Adds a note. Blank content is rejected.
    pub fn add(&mut self, content: &str) -> Result<Note, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Note content is empty".to_string()));
        }
        let note = Note {
            id: Uuid::new_v4(),
            content: content.to_string(),
            timestamp: Local::now(),
        };
        self.notes.insert(0, note.clone());
        self.persist()?;
        Ok(note)
    }

    /// Deletes a note. Returns whether it existed.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, AppError> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = self.notes.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&self.notes)?)?;
        }
        Ok(())
    }
}
