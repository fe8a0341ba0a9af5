// src/output/split.rs
// =============================================================================
// Writes each Markdown section to its own file (--split-dir).
//
// Files are named <NN>_<title>.md, where NN is the 1-based position and the
// title comes from the section's first heading:
//
//   01_Overview.md
//   02_Architecture.md
//   03_chapter_03.md      (section without a heading)
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use tracing::{debug, info};

use super::paths::sanitize_component;
use super::writer::write_text;
use crate::error::ExportError;
use crate::markdown::first_heading;

// Longest title kept in a chapter file name
const MAX_TITLE_LEN: usize = 50;

/// Writes one file per section into `dir`
///
/// Returns: the paths written, in section order
pub fn write_chapters(
    dir: &Path,
    sections: &[String],
    encoding: &'static Encoding,
) -> Result<Vec<PathBuf>, ExportError> {
    if sections.is_empty() {
        info!("No sections to save in {}", dir.display());
        return Ok(Vec::new());
    }

    fs::create_dir_all(dir).map_err(|e| ExportError::write(dir, e))?;

    let mut written = Vec::with_capacity(sections.len());
    for (index, section) in sections.iter().enumerate() {
        let path = dir.join(chapter_filename(index, section));
        write_text(&path, section, encoding)?;
        debug!("Saved section {} as {}", index + 1, path.display());
        written.push(path);
    }

    info!("Saved {} section(s) to {}", written.len(), dir.display());
    Ok(written)
}

// File name for the section at `index` (0-based)
fn chapter_filename(index: usize, section: &str) -> String {
    let number = index + 1;
    let title = first_heading(section)
        .map(|heading| sanitize_component(&heading))
        .filter(|title| title != "untitled")
        .unwrap_or_else(|| format!("chapter_{:02}", number));

    // Sanitized titles are ASCII, so truncating by bytes is safe
    let mut title = title;
    title.truncate(MAX_TITLE_LEN);

    format!("{:02}_{}.md", number, title.trim_end_matches(['.', '_']))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;
    use tempfile::TempDir;

    #[test]
    fn test_chapter_filenames() {
        assert_eq!(chapter_filename(0, "# Overview\n\ntext"), "01_Overview.md");
        assert_eq!(
            chapter_filename(11, "## Build & Test: `cargo`\n"),
            "12_Build_Test_cargo.md"
        );
        assert_eq!(chapter_filename(2, "no heading here"), "03_chapter_03.md");
        assert_eq!(chapter_filename(3, "# !!!\n"), "04_chapter_04.md");
    }

    #[test]
    fn test_long_titles_truncated() {
        let section = format!("# {}", "word ".repeat(40));
        let name = chapter_filename(0, &section);
        assert!(name.len() <= "01_".len() + MAX_TITLE_LEN + ".md".len(), "{}", name);
        assert!(!name.contains("_.md"));
    }

    #[test]
    fn test_write_chapters() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("chapters");
        let sections = vec!["# One\n\nfirst".to_string(), "# Two\n\nsecond".to_string()];

        let written = write_chapters(&target, &sections, UTF_8).unwrap();

        assert_eq!(
            written,
            vec![target.join("01_One.md"), target.join("02_Two.md")]
        );
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), "# One\n\nfirst");
        assert_eq!(fs::read_to_string(&written[1]).unwrap(), "# Two\n\nsecond");
    }

    #[test]
    fn test_no_sections_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("chapters");

        assert!(write_chapters(&target, &[], UTF_8).unwrap().is_empty());
        assert!(!target.exists());
    }
}
