use std::path::Path;

/// Ordered label list; index `i` names output `i` of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn new(labels: Vec<String>) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if labels.is_empty() {
            return Err("Label set is empty".into());
        }
        Ok(Self { labels })
    }

    /// One label per line. Blank lines are skipped.
    pub fn from_text(text: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let labels = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(labels)
    }

    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read labels {}: {}", path.display(), e))?;
        Self::from_text(&text)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_text_skips_blank_lines() {
        let labels = LabelSet::from_text("n02085620-Chihuahua\n\n  n02085782-Japanese_spaniel \r\n").unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.as_slice()[1], "n02085782-Japanese_spaniel");
    }

    #[test]
    fn test_empty_text_is_an_error() {
        assert!(LabelSet::from_text("\n \n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "000-affenpinscher").unwrap();
        writeln!(file, "001-afghan_hound").unwrap();

        let labels = LabelSet::from_file(file.path()).unwrap();

        assert_eq!(labels.as_slice(), &["000-affenpinscher", "001-afghan_hound"]);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = LabelSet::from_file(Path::new("does/not/exist.txt")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.txt"));
    }
}
