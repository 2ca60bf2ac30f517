use chrono::Local;

/// A saved study note
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub saved_at: String,
    pub text: String,
}

/// Scratch notebook shown next to the chat
#[derive(Debug, Default)]
pub struct Notebook {
    /// Text currently in the editor
    pub entry: String,
    notes: Vec<Note>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the editor contents as a note and clear the editor.
    ///
    /// Returns `false` and keeps the editor untouched when it is blank.
    pub fn save(&mut self) -> bool {
        let text = self.entry.trim();
        if text.is_empty() {
            return false;
        }
        self.notes.push(Note {
            saved_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
            text: text.to_string(),
        });
        self.entry.clear();
        true
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_stores_and_clears() {
        let mut notebook = Notebook::new();
        notebook.entry = " Newton's second law: F = ma \n".into();
        assert!(notebook.save());
        assert!(notebook.entry.is_empty());
        assert_eq!(notebook.notes().len(), 1);
        assert_eq!(notebook.notes()[0].text, "Newton's second law: F = ma");
    }

    #[test]
    fn test_blank_entry_is_ignored() {
        let mut notebook = Notebook::new();
        notebook.entry = "   ".into();
        assert!(!notebook.save());
        assert!(notebook.notes().is_empty());
        assert_eq!(notebook.entry, "   ");
    }
}
