//! File picker used by Open and Save.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Open,
    Save,
}

/// Result of feeding a key to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerStep {
    Pending,
    Picked(PathBuf),
    Cancelled,
}

/// A row in the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    /// Display name (file name or "..")
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Directory listing plus a name field.
///
/// By default only directories and `.txt` files are listed; Ctrl+T shows
/// every file. Typing fills the name field, which wins over the listing
/// on Enter and may hold a relative or absolute path.
#[derive(Debug, Clone)]
pub struct FilePicker {
    pub mode: PickerMode,
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub selected: usize,
    pub name: String,
    pub show_all: bool,
    pub error: Option<String>,
}

impl FilePicker {
    pub fn new(mode: PickerMode, dir: &Path, show_all: bool) -> Self {
        let mut picker = Self {
            mode,
            dir: dir.to_path_buf(),
            entries: Vec::new(),
            selected: 0,
            name: String::new(),
            show_all,
            error: None,
        };
        picker.load_directory(dir);
        picker
    }

    /// Prefill the name field.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        if let Some(idx) = self.entries.iter().position(|e| e.name == self.name) {
            self.selected = idx;
        }
        self
    }

    pub const fn title(&self) -> &'static str {
        match self.mode {
            PickerMode::Open => "Open",
            PickerMode::Save => "Save",
        }
    }

    /// Scan `dir` and replace the listing. On failure the previous listing
    /// is kept and the error is shown in the picker.
    pub fn load_directory(&mut self, dir: &Path) {
        match list_directory(dir, self.show_all) {
            Ok(entries) => {
                self.dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
                self.entries = entries;
                self.selected = 0;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(format!("Cannot list {}: {err}", dir.display()));
            }
        }
    }

    pub fn selected_entry(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerStep {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => PickerStep::Cancelled,
            KeyCode::Char('t') if ctrl => {
                self.show_all = !self.show_all;
                let dir = self.dir.clone();
                self.load_directory(&dir);
                PickerStep::Pending
            }
            KeyCode::Up => {
                self.move_selection(-1);
                PickerStep::Pending
            }
            KeyCode::Down => {
                self.move_selection(1);
                PickerStep::Pending
            }
            KeyCode::PageUp => {
                self.move_selection(-10);
                PickerStep::Pending
            }
            KeyCode::PageDown => {
                self.move_selection(10);
                PickerStep::Pending
            }
            KeyCode::Tab => {
                if let Some(entry) = self.selected_entry() {
                    self.name = entry.name.clone();
                }
                PickerStep::Pending
            }
            KeyCode::Backspace => {
                if self.name.pop().is_none() {
                    self.go_to_parent();
                }
                PickerStep::Pending
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.name.push(c);
                PickerStep::Pending
            }
            _ => PickerStep::Pending,
        }
    }

    fn activate(&mut self) -> PickerStep {
        if !self.name.is_empty() {
            let target = self.dir.join(&self.name);
            if target.is_dir() {
                self.name.clear();
                self.load_directory(&target);
                return PickerStep::Pending;
            }
            return PickerStep::Picked(target);
        }
        let Some(entry) = self.selected_entry().cloned() else {
            return PickerStep::Pending;
        };
        if entry.is_dir {
            self.load_directory(&entry.path);
            PickerStep::Pending
        } else {
            PickerStep::Picked(entry.path)
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let max = self.entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(max);
        if self.mode == PickerMode::Save
            && let Some(entry) = self.entries.get(self.selected)
            && !entry.is_dir
        {
            self.name = entry.name.clone();
        }
    }

    fn go_to_parent(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.load_directory(&parent);
        }
    }
}

fn list_directory(dir: &Path, show_all: bool) -> std::io::Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type()?.is_dir()
            || (entry.file_type()?.is_symlink() && entry.path().is_dir());
        if !is_dir && !show_all && !is_text_file(&name) {
            continue;
        }
        let item = PickerEntry {
            name,
            path: entry.path(),
            is_dir,
        };
        if is_dir {
            dirs.push(item);
        } else {
            files.push(item);
        }
    }
    dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = canonical.parent() {
        entries.push(PickerEntry {
            name: "..".to_string(),
            path: parent.to_path_buf(),
            is_dir: true,
        });
    }
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}

fn is_text_file(name: &str) -> bool {
    name.to_lowercase().ends_with(".txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(picker: &mut FilePicker, text: &str) {
        for c in text.chars() {
            assert_eq!(picker.handle_key(press(KeyCode::Char(c))), PickerStep::Pending);
        }
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("A.TXT"), "a").unwrap();
        std::fs::write(dir.path().join("image.png"), "png").unwrap();
        std::fs::write(dir.path().join(".hidden.txt"), "h").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        dir
    }

    fn names(picker: &FilePicker) -> Vec<&str> {
        picker.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_lists_dirs_then_text_files() {
        let dir = fixture();
        let picker = FilePicker::new(PickerMode::Open, dir.path(), false);
        assert_eq!(names(&picker), vec!["..", "sub", "A.TXT", "b.txt"]);
        assert!(picker.error.is_none());
    }

    #[test]
    fn test_ctrl_t_shows_all_files() {
        let dir = fixture();
        let mut picker = FilePicker::new(PickerMode::Open, dir.path(), false);
        picker.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert!(picker.show_all);
        assert!(names(&picker).contains(&"image.png"));
        assert!(!names(&picker).contains(&".hidden.txt"));
    }

    #[test]
    fn test_enter_on_file_picks_it() {
        let dir = fixture();
        let mut picker = FilePicker::new(PickerMode::Open, dir.path(), false);
        picker.handle_key(press(KeyCode::Down));
        picker.handle_key(press(KeyCode::Down));
        let step = picker.handle_key(press(KeyCode::Enter));
        let PickerStep::Picked(path) = step else {
            panic!("expected a pick, got {step:?}");
        };
        assert_eq!(path.file_name().unwrap(), "A.TXT");
    }

    #[test]
    fn test_enter_on_dir_navigates() {
        let dir = fixture();
        std::fs::write(dir.path().join("sub").join("inner.txt"), "i").unwrap();
        let mut picker = FilePicker::new(PickerMode::Open, dir.path(), false);
        picker.handle_key(press(KeyCode::Down));
        assert_eq!(picker.handle_key(press(KeyCode::Enter)), PickerStep::Pending);
        assert!(picker.dir.ends_with("sub"));
        assert_eq!(names(&picker), vec!["..", "inner.txt"]);
    }

    #[test]
    fn test_typed_name_wins_over_selection() {
        let dir = fixture();
        let mut picker = FilePicker::new(PickerMode::Save, dir.path(), false);
        type_text(&mut picker, "fresh");
        let step = picker.handle_key(press(KeyCode::Enter));
        assert_eq!(step, PickerStep::Picked(picker.dir.join("fresh")));
    }

    #[test]
    fn test_typed_absolute_path_is_used_as_is() {
        let dir = fixture();
        let other = tempdir().unwrap();
        let target = other.path().join("elsewhere");
        let mut picker = FilePicker::new(PickerMode::Save, dir.path(), false);
        type_text(&mut picker, &target.to_string_lossy());
        assert_eq!(picker.handle_key(press(KeyCode::Enter)), PickerStep::Picked(target));
    }

    #[test]
    fn test_typed_directory_name_navigates() {
        let dir = fixture();
        let mut picker = FilePicker::new(PickerMode::Save, dir.path(), false);
        type_text(&mut picker, "sub");
        assert_eq!(picker.handle_key(press(KeyCode::Enter)), PickerStep::Pending);
        assert!(picker.dir.ends_with("sub"));
        assert!(picker.name.is_empty());
    }

    #[test]
    fn test_backspace_edits_name_then_goes_up() {
        let dir = fixture();
        let sub = dir.path().join("sub");
        let mut picker = FilePicker::new(PickerMode::Save, &sub, false);
        type_text(&mut picker, "x");
        picker.handle_key(press(KeyCode::Backspace));
        assert!(picker.name.is_empty());
        assert!(picker.dir.ends_with("sub"));
        picker.handle_key(press(KeyCode::Backspace));
        assert_eq!(picker.dir, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_save_mode_selection_fills_name() {
        let dir = fixture();
        let mut picker = FilePicker::new(PickerMode::Save, dir.path(), false);
        picker.handle_key(press(KeyCode::Down));
        assert!(picker.name.is_empty(), "directories do not fill the name");
        picker.handle_key(press(KeyCode::Down));
        assert_eq!(picker.name, "A.TXT");
    }

    #[test]
    fn test_with_name_selects_matching_entry() {
        let dir = fixture();
        let picker = FilePicker::new(PickerMode::Save, dir.path(), false).with_name("b.txt");
        assert_eq!(picker.selected_entry().unwrap().name, "b.txt");
    }

    #[test]
    fn test_escape_cancels() {
        let dir = fixture();
        let mut picker = FilePicker::new(PickerMode::Open, dir.path(), false);
        assert_eq!(picker.handle_key(press(KeyCode::Esc)), PickerStep::Cancelled);
    }

    #[test]
    fn test_unreadable_directory_reports_error() {
        let dir = fixture();
        let picker = FilePicker::new(PickerMode::Open, &dir.path().join("missing"), false);
        assert!(picker.error.as_deref().unwrap().starts_with("Cannot list"));
        assert!(picker.entries.is_empty());
    }
}
