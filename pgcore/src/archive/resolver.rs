//! Archive load order resolution.
//!
//! The engine builds its archive list in two passes:
//!
//! 1. Archives named in the INI `[Archive]` fields, in configured order
//! 2. For each active plugin in load order, the archives "belonging" to it
//!
//! An archive belongs to a plugin by naming convention: `Plugin.bsa` is the
//! plugin's main archive, and `Plugin - Textures.bsa`, `Plugin 2.bsa` or
//! `Plugin0.bsa` are continuations of it. `Pluginbar.bsa` belongs to a
//! different plugin that happens to share the prefix.
//!
//! ```text
//! plugin "Foo", archives on disk:
//!
//!   Foo.bsa            exact        -> first
//!   Foo - Textures.bsa " -"         -> accepted
//!   Foo2.bsa           digit        -> accepted
//!   Foo 5.bsa          " " + digit  -> accepted
//!   Foo Extra.bsa      " " + other  -> rejected
//!   Foobar.bsa         other        -> rejected
//! ```

use std::collections::HashSet;

use serde::Serialize;
use tracing::{trace, warn};

use super::name::ArchiveName;
use super::order::OrderedArchiveList;
use super::DEFAULT_ARCHIVE_EXTENSION;

/// How an archive relates to a plugin name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    /// `<plugin>.<ext>`: the plugin's main archive.
    Exact,
    /// A suffix continuation such as `<plugin> - Textures.<ext>`.
    Suffix,
    /// Shares the prefix but belongs to another plugin.
    PrefixCollision,
    /// Does not start with the plugin name.
    Unrelated,
}

/// Result of resolving the archive load order.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveResolution {
    /// Archives in engine load order (last loaded wins).
    pub order: OrderedArchiveList,

    /// Archives present on disk that no plugin or INI entry loads.
    pub orphans: Vec<ArchiveName>,
}

/// Computes the order in which the engine loads archives.
///
/// # Example
///
/// ```
/// use pgcore::archive::{ArchiveName, ArchivePriorityResolver};
///
/// let config = vec![ArchiveName::new("Skyrim - Misc.bsa")];
/// let plugins = vec!["Skyrim".to_string(), "Foo".to_string()];
/// let on_disk: Vec<ArchiveName> = ["Foo.bsa", "Foo - Textures.bsa", "Foobar.bsa", "Skyrim - Misc.bsa"]
///     .into_iter()
///     .map(ArchiveName::new)
///     .collect();
///
/// let resolution = ArchivePriorityResolver::new().resolve(&config, &plugins, &on_disk);
///
/// let order: Vec<_> = resolution.order.iter().map(|a| a.as_str()).collect();
/// assert_eq!(order, vec!["Skyrim - Misc.bsa", "Foo.bsa", "Foo - Textures.bsa"]);
/// assert_eq!(resolution.orphans, vec![ArchiveName::new("Foobar.bsa")]);
/// ```
#[derive(Debug, Clone)]
pub struct ArchivePriorityResolver {
    /// Folded archive extension, without the leading dot.
    extension: String,
}

impl Default for ArchivePriorityResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchivePriorityResolver {
    /// Create a resolver for `.bsa` archives.
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_ARCHIVE_EXTENSION)
    }

    /// Create a resolver for a different archive extension.
    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_lowercase(),
        }
    }

    /// Resolve the archive load order.
    ///
    /// # Arguments
    ///
    /// * `config_archives` - Archives listed in the INI files, in order
    /// * `plugins` - Active plugin names (extension trimmed), in load order
    /// * `on_disk` - Archives present in the data directory, any order
    ///
    /// INI archives come first, in their configured order. Each plugin then
    /// appends its archives: the exact-name archive first, then suffix
    /// continuations in discovery order. Archives already placed are never
    /// moved. Archives on disk that end up unplaced are reported as orphans
    /// and logged at warn level; they do not affect the order.
    pub fn resolve(
        &self,
        config_archives: &[ArchiveName],
        plugins: &[String],
        on_disk: &[ArchiveName],
    ) -> ArchiveResolution {
        let mut order: OrderedArchiveList = config_archives.iter().cloned().collect();

        for plugin in plugins {
            order.extend(self.attribute(plugin, on_disk));
        }

        trace!(
            "Archive Load Order: {}",
            order
                .iter()
                .map(ArchiveName::as_str)
                .collect::<Vec<_>>()
                .join(",")
        );

        let mut orphans = Vec::new();
        let mut seen = HashSet::new();
        for archive in on_disk {
            if !order.contains(archive) && seen.insert(archive) {
                warn!("Archive {} not loaded by any active plugin or INI.", archive);
                orphans.push(archive.clone());
            }
        }

        ArchiveResolution { order, orphans }
    }

    /// Archives on disk that belong to `plugin`, in the order the plugin
    /// loads them.
    pub fn attribute(&self, plugin: &str, on_disk: &[ArchiveName]) -> Vec<ArchiveName> {
        let plugin_folded = plugin.to_lowercase();
        if plugin_folded.is_empty() {
            return Vec::new();
        }

        trace!("Finding archive files that correspond to plugin {}", plugin);

        let mut exact = Vec::new();
        let mut suffixed = Vec::new();

        for archive in on_disk {
            match self.classify(&plugin_folded, archive) {
                Attribution::Exact => exact.push(archive.clone()),
                Attribution::Suffix => suffixed.push(archive.clone()),
                Attribution::PrefixCollision | Attribution::Unrelated => continue,
            }
            trace!("Found archive file that corresponds to plugin {}: {}", plugin, archive);
        }

        exact.extend(suffixed);
        exact
    }

    /// Classify how `archive` relates to an already folded plugin name.
    pub fn classify(&self, plugin_folded: &str, archive: &ArchiveName) -> Attribution {
        let Some(rest) = archive.folded().strip_prefix(plugin_folded) else {
            return Attribution::Unrelated;
        };

        if let Some(ext) = rest.strip_prefix('.') {
            if ext == self.extension {
                return Attribution::Exact;
            }
        }

        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => Attribution::Suffix,
            Some(c) if c.is_whitespace() => match chars.next() {
                Some('-') => Attribution::Suffix,
                Some(c) if c.is_ascii_digit() => Attribution::Suffix,
                _ => Attribution::PrefixCollision,
            },
            _ => Attribution::PrefixCollision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn archives(names: &[&str]) -> Vec<ArchiveName> {
        names.iter().map(|n| ArchiveName::new(*n)).collect()
    }

    fn plugins(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn names(list: &OrderedArchiveList) -> Vec<&str> {
        list.iter().map(|a| a.as_str()).collect()
    }

    #[test]
    fn test_attribution_prefix_rules() {
        let resolver = ArchivePriorityResolver::new();
        let on_disk = archives(&["Foo - Textures.bsa", "Foobar.bsa", "Foo2.bsa", "Foo.bsa"]);

        let found = resolver.attribute("Foo", &on_disk);

        let found: Vec<_> = found.iter().map(|a| a.as_str()).collect();
        assert_eq!(found, vec!["Foo.bsa", "Foo - Textures.bsa", "Foo2.bsa"]);
    }

    #[test]
    fn test_space_then_digit_is_accepted() {
        let resolver = ArchivePriorityResolver::new();
        assert_eq!(
            resolver.classify("foo", &ArchiveName::new("Foo 5.bsa")),
            Attribution::Suffix
        );
    }

    #[test]
    fn test_space_then_dash_is_accepted() {
        let resolver = ArchivePriorityResolver::new();
        assert_eq!(
            resolver.classify("foo", &ArchiveName::new("Foo -Name.bsa")),
            Attribution::Suffix
        );
    }

    #[test]
    fn test_space_then_letter_is_rejected() {
        let resolver = ArchivePriorityResolver::new();
        assert_eq!(
            resolver.classify("foo", &ArchiveName::new("Foo Bar.bsa")),
            Attribution::PrefixCollision
        );
    }

    #[test]
    fn test_dotted_continuation_is_rejected() {
        let resolver = ArchivePriorityResolver::new();
        assert_eq!(
            resolver.classify("foo", &ArchiveName::new("Foo.Extra.bsa")),
            Attribution::PrefixCollision
        );
        assert_eq!(
            resolver.classify("foo", &ArchiveName::new("Foo.ba2")),
            Attribution::PrefixCollision
        );
    }

    #[test]
    fn test_unrelated_archive() {
        let resolver = ArchivePriorityResolver::new();
        assert_eq!(
            resolver.classify("foo", &ArchiveName::new("Bar.bsa")),
            Attribution::Unrelated
        );
    }

    #[test]
    fn test_plugin_matching_is_case_insensitive() {
        let resolver = ArchivePriorityResolver::new();
        let on_disk = archives(&["FOO - textures.BSA", "foo.bsa"]);

        let found = resolver.attribute("Foo", &on_disk);

        let found: Vec<_> = found.iter().map(|a| a.as_str()).collect();
        assert_eq!(found, vec!["foo.bsa", "FOO - textures.BSA"]);
    }

    #[test]
    fn test_config_archives_come_first() {
        let resolver = ArchivePriorityResolver::new();
        let config = archives(&["Skyrim - Misc.bsa", "Foo.bsa"]);
        let on_disk = archives(&["Foo - Textures.bsa", "Foo.bsa", "Skyrim - Misc.bsa"]);

        let resolution = resolver.resolve(&config, &plugins(&["Foo"]), &on_disk);

        assert_eq!(
            names(&resolution.order),
            vec!["Skyrim - Misc.bsa", "Foo.bsa", "Foo - Textures.bsa"]
        );
        assert!(resolution.orphans.is_empty());
    }

    #[test]
    fn test_plugins_append_in_load_order() {
        let resolver = ArchivePriorityResolver::new();
        let on_disk = archives(&["B.bsa", "A.bsa", "A - Textures.bsa"]);

        let resolution = resolver.resolve(&[], &plugins(&["A", "B"]), &on_disk);

        assert_eq!(names(&resolution.order), vec!["A.bsa", "A - Textures.bsa", "B.bsa"]);
    }

    #[test]
    fn test_config_only_archive_not_on_disk_is_kept() {
        let resolver = ArchivePriorityResolver::new();
        let config = archives(&["Missing.bsa"]);

        let resolution = resolver.resolve(&config, &plugins(&["Foo"]), &[]);

        assert_eq!(names(&resolution.order), vec!["Missing.bsa"]);
    }

    #[test]
    fn test_orphans_reported_not_inserted() {
        let resolver = ArchivePriorityResolver::new();
        let on_disk = archives(&["Foo.bsa", "Foobar.bsa", "Stray.bsa"]);

        let resolution = resolver.resolve(&[], &plugins(&["Foo"]), &on_disk);

        assert_eq!(names(&resolution.order), vec!["Foo.bsa"]);
        assert_eq!(resolution.orphans, archives(&["Foobar.bsa", "Stray.bsa"]));
    }

    #[test]
    fn test_orphans_reported_once_per_archive() {
        let resolver = ArchivePriorityResolver::new();
        let on_disk = archives(&["Stray.bsa", "Other.bsa", "STRAY.BSA", "other.bsa"]);

        let resolution = resolver.resolve(&[], &[], &on_disk);

        assert_eq!(resolution.orphans, archives(&["Stray.bsa", "Other.bsa"]));
    }

    #[test]
    fn test_duplicate_plugins_are_harmless() {
        let resolver = ArchivePriorityResolver::new();
        let on_disk = archives(&["Foo.bsa", "Bar.bsa"]);

        let resolution = resolver.resolve(&[], &plugins(&["Foo", "Bar", "foo"]), &on_disk);

        assert_eq!(names(&resolution.order), vec!["Foo.bsa", "Bar.bsa"]);
    }

    #[test]
    fn test_empty_inputs_return_config_deduplicated() {
        let resolver = ArchivePriorityResolver::new();
        let config = archives(&["A.bsa", "B.bsa", "a.bsa"]);

        let no_plugins = resolver.resolve(&config, &[], &archives(&["A.bsa", "C.bsa"]));
        assert_eq!(names(&no_plugins.order), vec!["A.bsa", "B.bsa"]);

        let no_disk = resolver.resolve(&config, &plugins(&["C"]), &[]);
        assert_eq!(names(&no_disk.order), vec!["A.bsa", "B.bsa"]);
        assert!(no_disk.orphans.is_empty());
    }

    #[test]
    fn test_empty_plugin_name_attributes_nothing() {
        let resolver = ArchivePriorityResolver::new();
        assert!(resolver.attribute("", &archives(&["Foo.bsa"])).is_empty());
    }

    #[test]
    fn test_custom_extension() {
        let resolver = ArchivePriorityResolver::with_extension(".BA2");
        let on_disk = archives(&["Foo - Main.ba2", "Foo.ba2", "Foo.bsa"]);

        let found = resolver.attribute("Foo", &on_disk);

        let found: Vec<_> = found.iter().map(|a| a.as_str()).collect();
        assert_eq!(found, vec!["Foo.ba2", "Foo - Main.ba2"]);
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "Foo", "foo", "Foo2", "Foo - Textures", "Foo 5", "Foobar", "Bar", "BAR", "Bar -x",
            "Baz",
        ])
        .prop_map(|stem| format!("{}.bsa", stem))
    }

    proptest! {
        #[test]
        fn prop_output_has_no_duplicates(
            config in prop::collection::vec(name_strategy(), 0..6),
            on_disk in prop::collection::vec(name_strategy(), 0..10),
            load_order in prop::collection::vec(
                prop::sample::select(vec!["Foo", "foo", "Bar", "Baz", "Qux"]),
                0..6,
            ),
        ) {
            let resolver = ArchivePriorityResolver::new();
            let config: Vec<_> = config.into_iter().map(ArchiveName::new).collect();
            let on_disk: Vec<_> = on_disk.into_iter().map(ArchiveName::new).collect();
            let load_order: Vec<String> = load_order.into_iter().map(String::from).collect();

            let resolution = resolver.resolve(&config, &load_order, &on_disk);

            let unique: HashSet<_> = resolution.order.iter().map(|a| a.folded()).collect();
            prop_assert_eq!(unique.len(), resolution.order.len());
        }

        #[test]
        fn prop_config_archives_form_prefix(
            config in prop::collection::vec(name_strategy(), 0..6),
            on_disk in prop::collection::vec(name_strategy(), 0..10),
            load_order in prop::collection::vec(
                prop::sample::select(vec!["Foo", "Bar", "Baz"]),
                0..4,
            ),
        ) {
            let resolver = ArchivePriorityResolver::new();
            let config: Vec<_> = config.into_iter().map(ArchiveName::new).collect();
            let on_disk: Vec<_> = on_disk.into_iter().map(ArchiveName::new).collect();
            let load_order: Vec<String> = load_order.into_iter().map(String::from).collect();

            let resolution = resolver.resolve(&config, &load_order, &on_disk);

            let seeded: OrderedArchiveList = config.iter().cloned().collect();
            let prefix = &resolution.order.as_slice()[..seeded.len()];
            prop_assert_eq!(prefix, seeded.as_slice());
        }

        #[test]
        fn prop_orphans_disjoint_from_order(
            on_disk in prop::collection::vec(name_strategy(), 0..10),
            load_order in prop::collection::vec(
                prop::sample::select(vec!["Foo", "Bar"]),
                0..3,
            ),
        ) {
            let resolver = ArchivePriorityResolver::new();
            let on_disk: Vec<_> = on_disk.into_iter().map(ArchiveName::new).collect();
            let load_order: Vec<String> = load_order.into_iter().map(String::from).collect();

            let resolution = resolver.resolve(&[], &load_order, &on_disk);

            for orphan in &resolution.orphans {
                prop_assert!(!resolution.order.contains(orphan));
            }
            for archive in &on_disk {
                prop_assert!(resolution.order.contains(archive) || resolution.orphans.contains(archive));
            }
        }
    }
}
