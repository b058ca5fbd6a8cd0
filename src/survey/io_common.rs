use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// An empty field is an unanswered question.
pub fn read_cell(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_cell(""), None);
        // Whitespace is an answer, even if an odd one.
        assert_eq!(read_cell(" "), Some(" ".to_string()));
        assert_eq!(read_cell("Nunca"), Some("Nunca".to_string()));
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/survey/spanish.csv"), "spanish.csv");
        assert_eq!(simplify_file_name("english.csv"), "english.csv");
    }
}
