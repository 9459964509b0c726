use crate::utils::types::{Entry, Highlight};

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Suffix filter. Applied to every entry, directories included, so a
/// directory not ending in the suffix hides its whole subtree.
pub fn matches_suffix(name: &str, suffix: Option<&str>) -> bool {
    match suffix {
        Some(suffix) => name.ends_with(suffix),
        None => true,
    }
}

/// Case-insensitive substring match. `query` is expected lowercased.
pub fn matches_query(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(query)
}

/// Picks the style for an entry: search hit, then directory, then source file.
pub fn classify(entry: &Entry, query: Option<&str>, source_suffix: &str) -> Highlight {
    if let Some(q) = query {
        if matches_query(&entry.name, q) {
            return Highlight::Match;
        }
    }
    if entry.is_dir() {
        Highlight::Directory
    } else if entry.is_file() && !source_suffix.is_empty() && entry.name.ends_with(source_suffix)
    {
        Highlight::SourceFile
    } else {
        Highlight::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::types::EntryKind;
    use std::path::PathBuf;

    fn entry(name: &str, kind: EntryKind) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from("/project").join(name),
            kind,
            is_symlink: false,
            size: (kind == EntryKind::File).then_some(10),
        }
    }

    #[test]
    fn dotfiles_are_hidden() {
        assert!(is_hidden(".git"));
        assert!(is_hidden(".env"));
        assert!(!is_hidden("src"));
        assert!(!is_hidden("a.b"));
    }

    #[test]
    fn suffix_filter_applies_to_any_name() {
        assert!(matches_suffix("main.py", Some(".py")));
        assert!(!matches_suffix("notes.txt", Some(".py")));
        assert!(!matches_suffix("docs", Some(".py")));
        assert!(matches_suffix("docs", None));
    }

    #[test]
    fn search_match_wins_over_directory_style() {
        let dir = entry("Reports", EntryKind::Dir);
        assert_eq!(classify(&dir, Some("port"), ".py"), Highlight::Match);
        assert_eq!(classify(&dir, Some("zzz"), ".py"), Highlight::Directory);
        assert_eq!(classify(&dir, None, ".py"), Highlight::Directory);
    }

    #[test]
    fn source_style_only_for_files() {
        assert_eq!(
            classify(&entry("tool.py", EntryKind::File), None, ".py"),
            Highlight::SourceFile
        );
        assert_eq!(
            classify(&entry("pkg.py", EntryKind::Dir), None, ".py"),
            Highlight::Directory
        );
        assert_eq!(
            classify(&entry("fifo.py", EntryKind::Other), None, ".py"),
            Highlight::Plain
        );
        assert_eq!(
            classify(&entry("lib.rs", EntryKind::File), None, ".rs"),
            Highlight::SourceFile
        );
        assert_eq!(
            classify(&entry("README", EntryKind::File), None, ""),
            Highlight::Plain
        );
    }
}
