use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use anyhow::Result;

/// Command history kept next to the stores
pub struct History {
    file_path: PathBuf,
    commands: Vec<String>,
    max_size: usize,
}

impl History {
    pub fn new(file_path: PathBuf, max_size: usize) -> Self {
        History {
            file_path,
            commands: Vec::new(),
            max_size,
        }
    }

    /// Load history from disk; a missing file is an empty history
    pub fn load(&mut self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        let reader = BufReader::new(File::open(&self.file_path)?);

        self.commands.clear();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                self.commands.push(line);
            }
        }

        if self.commands.len() > self.max_size {
            self.commands.drain(..self.commands.len() - self.max_size);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.file_path)?;

        for cmd in &self.commands {
            writeln!(file, "{}", cmd)?;
        }

        Ok(())
    }

    pub fn add(&mut self, command: &str) {
        let command = command.trim();
        if command.is_empty() {
            return;
        }

        // Skip consecutive duplicates
        if self.commands.last().map(String::as_str) == Some(command) {
            return;
        }

        self.commands.push(command.to_string());

        if self.commands.len() > self.max_size {
            self.commands.remove(0);
        }
    }

    pub fn get_all(&self) -> &[String] {
        &self.commands
    }

    pub fn search(&self, pattern: &str) -> Vec<String> {
        self.commands
            .iter()
            .filter(|cmd| cmd.contains(pattern))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_add_skips_blank_and_repeated() {
        let mut history = History::new(PathBuf::from("unused"), 10);
        history.add("write 1K");
        history.add("write 1K");
        history.add("   ");
        history.add("read");

        assert_eq!(history.get_all(), ["write 1K", "read"]);
        assert_eq!(history.search("write"), vec!["write 1K".to_string()]);
    }

    #[test]
    fn test_save_and_load_keeps_newest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("history.txt");

        let mut history = History::new(path.clone(), 5);
        for i in 0..5 {
            history.add(&format!("write {}", i));
        }
        history.save().unwrap();

        let mut reloaded = History::new(path, 3);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all(), ["write 2", "write 3", "write 4"]);
    }
}
