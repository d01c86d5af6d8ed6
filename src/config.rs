use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::session::ExitPolicy;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub strict_exit: bool,
    pub all_files: bool,
    pub log_file: Option<PathBuf>,
    pub start_dir: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            strict_exit: self.strict_exit || other.strict_exit,
            all_files: self.all_files || other.all_files,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
            start_dir: other.start_dir.clone().or_else(|| self.start_dir.clone()),
        }
    }

    pub const fn exit_policy(&self) -> ExitPolicy {
        if self.strict_exit {
            ExitPolicy::Strict
        } else {
            ExitPolicy::Lenient
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("jotpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("jotpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("jotpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("jotpad").join("config");
        }
    }

    PathBuf::from(".jotpadrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".jotpadrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# jotpad defaults (saved with --save)".to_string()];
    if flags.strict_exit {
        lines.push("--strict-exit".to_string());
    }
    if flags.all_files {
        lines.push("--all-files".to_string());
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(dir) = &flags.start_dir {
        lines.push(format!("--start-dir {}", dir.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list (CLI args or config file words).
/// Unknown tokens, such as the positional file, are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--strict-exit" {
            flags.strict_exit = true;
        } else if token == "--all-files" {
            flags.all_files = true;
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        } else if token == "--start-dir" {
            if let Some(next) = tokens.get(i + 1) {
                flags.start_dir = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--start-dir=") {
            flags.start_dir = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "jotpad".to_string(),
            "--strict-exit".to_string(),
            "--all-files".to_string(),
            "--log-file".to_string(),
            "jotpad.log".to_string(),
            "--start-dir=/srv/notes".to_string(),
            "todo.txt".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.strict_exit);
        assert!(flags.all_files);
        assert_eq!(flags.log_file, Some(PathBuf::from("jotpad.log")));
        assert_eq!(flags.start_dir, Some(PathBuf::from("/srv/notes")));
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            strict_exit: true,
            log_file: Some(PathBuf::from("file.log")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            all_files: true,
            log_file: Some(PathBuf::from("cli.log")),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.strict_exit);
        assert!(merged.all_files);
        assert_eq!(merged.log_file, Some(PathBuf::from("cli.log")));
    }

    #[test]
    fn test_exit_policy_follows_strict_flag() {
        assert_eq!(ConfigFlags::default().exit_policy(), ExitPolicy::Lenient);
        let strict = ConfigFlags {
            strict_exit: true,
            ..ConfigFlags::default()
        };
        assert_eq!(strict.exit_policy(), ExitPolicy::Strict);
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            strict_exit: true,
            all_files: true,
            log_file: Some(PathBuf::from("jotpad.log")),
            start_dir: Some(PathBuf::from("notes")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}
