//! Navigation menu model.
//!
//! The host page shows a dropdown of report sections. Each entry carries the
//! class names the fallback search looks for.

use tracing::info;

/// One entry of the host page's navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Label shown to the user.
    pub name: String,
    /// Link target, absolute or relative to the viewer origin.
    pub href: String,
    /// Class names attached to the entry.
    pub classes: Vec<String>,
}

impl MenuEntry {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
            classes: Vec::new(),
        }
    }

    /// Attach a class name.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Build the menu entry for a file found in a crash report archive.
    ///
    /// Profiles map to their pprof section, the raw stack dump maps to the
    /// stack page. Anything else is skipped and `None` is returned.
    ///
    /// ```ignore
    /// let entry = MenuEntry::for_report_file("profiles/heap.prof").unwrap();
    /// assert_eq!(entry.name, "Heap");
    /// assert_eq!(entry.href, "/heap");
    /// ```
    pub fn for_report_file(file_name: &str) -> Option<Self> {
        let base = file_name.rsplit('/').next().unwrap_or(file_name);
        let (name, url) = match base {
            "allocs.prof" => ("Allocations", "allocs"),
            "block.prof" => ("Block", "block"),
            "goroutine.prof" => ("Goroutines", "goroutine"),
            "heap.prof" => ("Heap", "heap"),
            "mutex.prof" => ("Mutex", "mutex"),
            "threadcreate.prof" => ("Threads", "threadcreate"),
            "stack" => ("Stack", "stack"),
            _ => {
                info!("Skipping {}", file_name);
                return None;
            }
        };
        Some(MenuEntry::new(name, format!("/{}", url)).with_class(url))
    }
}

/// The host page's navigation menu, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self { entries }
    }

    /// Menu for the files of a crash report archive, skipping unknown files.
    pub fn from_report_files<'a>(files: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(files.into_iter().filter_map(MenuEntry::for_report_file).collect())
    }

    pub fn push(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.has_class(class))
    }

    /// Pick an entry by class name priority.
    ///
    /// `classes` is ordered from highest to lowest priority. The list is
    /// evaluated in reverse and every hit replaces the previous one, so the
    /// first class that exists in the menu wins. With no hit at all the first
    /// menu entry is returned. `None` only for an empty menu.
    pub fn element_or_default<S: AsRef<str>>(&self, classes: &[S]) -> Option<&MenuEntry> {
        let mut result = self.entries.first();
        for class in classes.iter().rev() {
            if let Some(entry) = self.find_by_class(class.as_ref()) {
                result = Some(entry);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(entries: &[(&str, &str)]) -> Menu {
        Menu::new(
            entries
                .iter()
                .map(|(name, class)| MenuEntry::new(*name, format!("/{}", name)).with_class(*class))
                .collect(),
        )
    }

    #[test]
    fn test_stacktrace_beats_info() {
        let menu = menu(&[("heap", "heap"), ("info", "Info"), ("trace", "stacktrace")]);
        let entry = menu.element_or_default(&["stacktrace", "Info"]).unwrap();
        assert_eq!(entry.name, "trace");
    }

    #[test]
    fn test_only_stacktrace_present() {
        let menu = menu(&[("heap", "heap"), ("trace", "stacktrace")]);
        let entry = menu.element_or_default(&["stacktrace", "Info"]).unwrap();
        assert_eq!(entry.name, "trace");
    }

    #[test]
    fn test_only_info_present() {
        let menu = menu(&[("heap", "heap"), ("info", "Info")]);
        let entry = menu.element_or_default(&["stacktrace", "Info"]).unwrap();
        assert_eq!(entry.name, "info");
    }

    #[test]
    fn test_no_match_uses_first_entry() {
        let menu = menu(&[("heap", "heap"), ("block", "block")]);
        let entry = menu.element_or_default(&["stacktrace", "Info"]).unwrap();
        assert_eq!(entry.name, "heap");
    }

    #[test]
    fn test_empty_menu() {
        assert!(Menu::default().element_or_default(&["stacktrace"]).is_none());
    }

    #[test]
    fn test_for_report_file() {
        let heap = MenuEntry::for_report_file("profiles/heap.prof").unwrap();
        assert_eq!(heap.name, "Heap");
        assert_eq!(heap.href, "/heap");
        assert!(heap.has_class("heap"));

        let threads = MenuEntry::for_report_file("threadcreate.prof").unwrap();
        assert_eq!(threads.name, "Threads");

        let stack = MenuEntry::for_report_file("stack").unwrap();
        assert_eq!(stack.href, "/stack");

        assert!(MenuEntry::for_report_file("README.md").is_none());
    }

    #[test]
    fn test_menu_from_report_files_skips_unknown() {
        let menu = Menu::from_report_files(["allocs.prof", "notes.txt", "stack"]);
        let names: Vec<_> = menu.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Allocations", "Stack"]);
    }
}
