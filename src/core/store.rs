//! MemoStore - sequence numbering, filename resolution and listing
//!
//! The memo directory itself is the index: every memo is a flat file named
//! `{number}-{YYYY-MM-DD}-{slug}.md` and the sequence number space is
//! derived by scanning those names. There is no database.
//!
//! Two patterns with different jobs:
//! - allocation counts every entry with a `{number}-` prefix, so retired
//!   numbers (see [`MemoStore::delete`]) stay unavailable
//! - resolution and listing only accept the full memo filename shape;
//!   anything else in the directory is invisible to them
//!
//! # Usage
//! ```no_run
//! use memo::core::store::MemoStore;
//!
//! let store = MemoStore::open("/home/user/memo");
//! let (number, path) = store.create("Shopping list")?;
//! assert_eq!(store.resolve(number)?, Some(path));
//! # anyhow::Ok(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::Serialize;

use super::error::{Error, Result};
use super::fsprobe;

/// Matches anything carrying a sequence number prefix. Used for allocation
/// only: retirement markers and stray numbered files all occupy their number.
static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-").expect("valid regex"));

/// Matches a complete memo filename: `{number}-{YYYY-MM-DD}-{slug}.md`.
static MEMO_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-\d{4}-\d{2}-\d{2}-(.+)\.md$").expect("valid regex"));

/// One row of the memo listing.
#[derive(Debug, Clone, Serialize)]
pub struct MemoSummary {
    pub number: u32,
    pub title: String,
    pub path: PathBuf,
}

impl MemoSummary {
    /// Listing line: `Memo {number}: {title}`
    pub fn display_line(&self) -> String {
        format!("Memo {}: {}", self.number, self.title)
    }
}

/// Handle on a memo directory.
///
/// Opening is cheap and performs no IO; every operation re-scans the
/// directory so concurrent edits from other invocations are picked up.
/// There is no cross-process locking: two processes racing through
/// `create` can allocate the same number (single-user tool, accepted).
#[derive(Debug, Clone)]
pub struct MemoStore {
    dir: PathBuf,
}

impl MemoStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Next free sequence number: one past the highest number present.
    ///
    /// Creates the memo directory when missing (first run), in which case
    /// the answer is 1. Entries whose prefix does not parse are skipped.
    pub fn allocate_number(&self) -> Result<u32> {
        fsprobe::ensure_dir(&self.dir)?;
        Ok(self.scan_max()? + 1)
    }

    /// Highest sequence number currently occupied, 0 when none.
    fn scan_max(&self) -> Result<u32> {
        let mut max = 0u32;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(caps) = NUMBER_PREFIX.captures(name) {
                if let Ok(number) = caps[1].parse::<u32>() {
                    max = max.max(number);
                }
            }
        }
        Ok(max)
    }

    /// Canonical filename for a new memo: `{number}-{date}-{slug}.md`.
    pub fn file_name(number: u32, title: &str, date: NaiveDate) -> String {
        format!("{}-{}-{}.md", number, date.format("%Y-%m-%d"), slugify(title))
    }

    /// Allocate the next number and write the initial memo file.
    ///
    /// The file starts as `# {title}` (empty for an empty title); the
    /// caller opens the editor on it afterwards. The file stays on disk
    /// even if that editor session later fails.
    pub fn create(&self, title: &str) -> Result<(u32, PathBuf)> {
        let number = self.allocate_number()?;
        let name = Self::file_name(number, title, Local::now().date_naive());
        let path = self.dir.join(name);

        let initial = if title.trim().is_empty() {
            String::new()
        } else {
            format!("# {}\n\n", title.trim())
        };
        fs::write(&path, initial)?;

        Ok((number, path))
    }

    /// Resolve a sequence number to the memo file carrying it.
    ///
    /// `Ok(None)` means no memo has that number; the caller decides how
    /// loud to be about it. A missing memo directory is an error ("you
    /// have no memos yet"). If several files share the number the last
    /// one in directory-listing order wins; that state is corrupt and
    /// the pick is not a guarantee.
    pub fn resolve(&self, number: u32) -> Result<Option<PathBuf>> {
        if !fsprobe::dir_exists(&self.dir) {
            return Err(Error::MissingDir(self.dir.clone()));
        }

        let mut matched = None;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(caps) = MEMO_FILE.captures(name) else {
                continue;
            };
            match caps[1].parse::<u32>() {
                Ok(n) if n == number => matched = Some(self.dir.join(name)),
                _ => {}
            }
        }
        Ok(matched)
    }

    /// Remove a memo. The number is retired: when the removed memo held
    /// the highest number, a `{number}-retired` marker keeps the slot
    /// occupied for future allocations. The marker has no date segment
    /// and no `.md` suffix, so listing and resolution never see it.
    pub fn delete(&self, number: u32) -> Result<PathBuf> {
        let path = self
            .resolve(number)?
            .ok_or(Error::NotFound(number))?;
        fs::remove_file(&path)?;

        if self.scan_max()? < number {
            fs::write(self.dir.join(format!("{number}-retired")), b"")?;
        }

        Ok(path)
    }

    /// All memo files, ascending by sequence number.
    ///
    /// An absent directory lists as empty, same as a directory with no
    /// memo files in it. Non-memo entries and subdirectories are skipped.
    pub fn entries(&self) -> Result<Vec<(u32, PathBuf)>> {
        if !fsprobe::dir_exists(&self.dir) {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(caps) = MEMO_FILE.captures(name) else {
                continue;
            };
            if let Ok(number) = caps[1].parse::<u32>() {
                entries.push((number, self.dir.join(name)));
            }
        }

        entries.sort_by_key(|(number, _)| *number);
        Ok(entries)
    }

    /// The formatted listing: number and content title per memo.
    ///
    /// A memo whose content cannot be read is logged and skipped rather
    /// than aborting the whole listing.
    pub fn list(&self) -> Result<Vec<MemoSummary>> {
        let mut summaries = Vec::new();
        for (number, path) in self.entries()? {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!("skipping unreadable memo {}: {}", path.display(), err);
                    continue;
                }
            };
            summaries.push(MemoSummary {
                number,
                title: extract_title(&content),
                path,
            });
        }
        Ok(summaries)
    }
}

/// Filesystem-safe rendering of a memo title.
///
/// Every run of characters outside `[A-Za-z0-9]` collapses to a single
/// underscore, the result is lowercased and leading/trailing underscores
/// are dropped. An empty title becomes `unnamed` so the filename always
/// has a slug segment.
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_gap = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_gap && !slug.is_empty() {
                slug.push('_');
            }
            pending_gap = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_gap = true;
        }
    }

    if slug.is_empty() {
        "unnamed".to_string()
    } else {
        slug
    }
}

/// Title of a memo as shown in listings: the first line with non-blank
/// content, one leading heading marker stripped.
pub fn extract_title(content: &str) -> String {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let stripped = trimmed.strip_prefix('#').unwrap_or(trimmed);
        return stripped.trim().to_string();
    }
    "No title for this file".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, MemoStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoStore::open(dir.path());
        (dir, store)
    }

    #[test]
    fn test_monotonic_allocation() -> Result<()> {
        let (_dir, store) = store();

        for expected in 1..=5u32 {
            let (number, path) = store.create(&format!("memo {}", expected))?;
            assert_eq!(number, expected);
            assert!(path.is_file());
        }

        Ok(())
    }

    #[test]
    fn test_allocate_creates_missing_dir() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let memo_dir = dir.path().join("memo");
        let store = MemoStore::open(&memo_dir);

        assert_eq!(store.allocate_number()?, 1);
        assert!(memo_dir.is_dir());

        Ok(())
    }

    #[test]
    fn test_resolution_round_trip() -> Result<()> {
        let (_dir, store) = store();

        let (number, path) = store.create("groceries")?;
        assert_eq!(store.resolve(number)?, Some(path));

        Ok(())
    }

    #[test]
    fn test_resolve_unknown_number() -> Result<()> {
        let (_dir, store) = store();
        store.create("one")?;

        assert_eq!(store.resolve(42)?, None);

        Ok(())
    }

    #[test]
    fn test_resolve_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoStore::open(dir.path().join("nothing"));

        assert!(matches!(store.resolve(1), Err(Error::MissingDir(_))));
    }

    #[test]
    fn test_slug_safety() {
        for title in [
            "hello world",
            "a/b\\c:d",
            "  spaces  everywhere  ",
            "émojis 🎉 and ünïcode",
            "!!!punctuation!!!",
        ] {
            let slug = slugify(title);
            assert!(
                slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "unsafe slug {:?} from {:?}",
                slug,
                title
            );
            assert!(!slug.starts_with('_'), "leading underscore in {:?}", slug);
            assert!(!slug.ends_with('_'), "trailing underscore in {:?}", slug);

            // The generated filename must stay resolvable
            let name = MemoStore::file_name(7, title, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
            assert!(MEMO_FILE.is_match(&name), "unresolvable name {:?}", name);
        }
    }

    #[test]
    fn test_slug_collapses_runs() {
        assert_eq!(slugify("Shopping   list!"), "shopping_list");
        assert_eq!(slugify("a - b - c"), "a_b_c");
    }

    #[test]
    fn test_empty_title_slug() {
        assert_eq!(slugify(""), "unnamed");
        assert_eq!(slugify("   "), "unnamed");
        assert_eq!(slugify("!!!"), "unnamed");

        let name = MemoStore::file_name(1, "", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(name, "1-2024-01-02-unnamed.md");
    }

    #[test]
    fn test_deletion_retires_number() -> Result<()> {
        let (_dir, store) = store();

        let (first, _) = store.create("short lived")?;
        assert_eq!(first, 1);
        store.delete(first)?;

        let (second, _) = store.create("replacement")?;
        assert_eq!(second, 2);

        Ok(())
    }

    #[test]
    fn test_delete_below_max_leaves_no_marker() -> Result<()> {
        let (dir, store) = store();

        store.create("one")?;
        store.create("two")?;
        store.delete(1)?;

        assert!(!dir.path().join("1-retired").exists());
        assert_eq!(store.allocate_number()?, 3);

        Ok(())
    }

    #[test]
    fn test_delete_unknown_number() -> Result<()> {
        let (_dir, store) = store();
        store.create("keep me")?;

        assert!(matches!(store.delete(9), Err(Error::NotFound(9))));
        assert_eq!(store.entries()?.len(), 1);

        Ok(())
    }

    #[test]
    fn test_listing_order() -> Result<()> {
        let (dir, store) = store();

        // Written out of order on purpose
        std::fs::write(dir.path().join("3-2024-01-03-c.md"), "# Third\n")?;
        std::fs::write(dir.path().join("1-2024-01-01-a.md"), "# First\n")?;
        std::fs::write(dir.path().join("2-2024-01-02-b.md"), "# Second\n")?;

        let numbers: Vec<u32> = store.entries()?.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn test_foreign_file_immunity() -> Result<()> {
        let (dir, store) = store();

        std::fs::write(dir.path().join("notes.txt"), "not a memo")?;
        std::fs::write(dir.path().join("abc-2024-01-01-x.md"), "not a memo")?;

        assert_eq!(store.allocate_number()?, 1);
        assert!(store.list()?.is_empty());
        assert_eq!(store.resolve(1)?, None);

        Ok(())
    }

    #[test]
    fn test_subdirectory_occupies_number_but_stays_invisible() -> Result<()> {
        let (dir, store) = store();

        // A directory with a numeric prefix counts for allocation (any
        // `{number}-` entry does) but is never listed or resolved.
        std::fs::create_dir(dir.path().join("7-2024-01-01-subdir.md"))?;

        assert_eq!(store.allocate_number()?, 8);
        assert!(store.list()?.is_empty());
        assert_eq!(store.resolve(7)?, None);

        Ok(())
    }

    #[test]
    fn test_numeric_prefix_counts_for_allocation_only() -> Result<()> {
        let (dir, store) = store();

        // Occupies number 9 without being a memo
        std::fs::write(dir.path().join("9-retired"), "")?;

        assert_eq!(store.allocate_number()?, 10);
        assert!(store.list()?.is_empty());
        assert_eq!(store.resolve(9)?, None);

        Ok(())
    }

    #[test]
    fn test_duplicate_number_last_wins() -> Result<()> {
        let (dir, store) = store();

        std::fs::write(dir.path().join("1-2024-01-01-a.md"), "a")?;
        std::fs::write(dir.path().join("1-2024-01-02-b.md"), "b")?;

        // Corrupt state: some file with number 1 is returned
        let resolved = store.resolve(1)?.unwrap();
        assert!(resolved.file_name().unwrap().to_str().unwrap().starts_with("1-"));

        Ok(())
    }

    #[test]
    fn test_listing_titles() -> Result<()> {
        let (dir, store) = store();

        std::fs::write(
            dir.path().join("1-2024-01-01-groceries.md"),
            "# Groceries\nmilk\n",
        )?;
        std::fs::write(dir.path().join("2-2024-01-02-todo.md"), "todo list\n")?;

        let listing = store.list()?;
        let lines: Vec<String> = listing.iter().map(MemoSummary::display_line).collect();
        assert_eq!(lines, vec!["Memo 1: Groceries", "Memo 2: todo list"]);

        Ok(())
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Groceries\nmilk\n"), "Groceries");
        assert_eq!(extract_title("\n\n  plain line\n"), "plain line");
        assert_eq!(extract_title("## Nested\n"), "# Nested");
        assert_eq!(extract_title(""), "No title for this file");
        assert_eq!(extract_title("\n \n\t\n"), "No title for this file");
    }

    #[test]
    fn test_list_missing_dir_is_empty() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoStore::open(dir.path().join("nothing"));

        assert!(store.list()?.is_empty());

        Ok(())
    }

    #[test]
    fn test_create_writes_heading() -> Result<()> {
        let (_dir, store) = store();

        let (_, path) = store.create("Plans")?;
        assert_eq!(std::fs::read_to_string(&path)?, "# Plans\n\n");

        let (_, empty) = store.create("")?;
        assert_eq!(std::fs::read_to_string(&empty)?, "");

        Ok(())
    }
}
