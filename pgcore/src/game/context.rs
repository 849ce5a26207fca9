//! Game context: ties profile, paths, load order and configuration together.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::paths::GamePaths;
use super::profile::GameType;
use super::GameError;
use crate::archive::{ArchiveDiscovery, ArchiveName, ArchivePriorityResolver, ArchiveResolution};
use crate::config::{ArchiveListFields, ConfigSource, ConfigTree};
use crate::load_order::ActivePlugins;

/// Creation Club plugin list in the game root.
const CREATION_CLUB_FILE: &str = "Skyrim.ccc";

/// Load order file in the per-game application data folder.
const PLUGINS_FILE: &str = "plugins.txt";

/// A validated game installation.
///
/// Replaces process-wide game state: every component that needs to know
/// where the game lives is handed a context explicitly.
#[derive(Debug, Clone)]
pub struct GameContext {
    game_type: GameType,
    paths: GamePaths,
}

impl GameContext {
    /// Validate the installation and create a context.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameDirNotFound`] if the game directory does not exist
    /// - [`GameError::InvalidGameDir`] if `Data/` lacks the profile's check file
    pub fn new(game_type: GameType, paths: GamePaths) -> Result<Self, GameError> {
        if !paths.game_dir().is_dir() {
            return Err(GameError::GameDirNotFound(paths.game_dir().to_path_buf()));
        }

        let check = paths.data_dir().join(game_type.data_check_file());
        if !check.is_file() {
            return Err(GameError::InvalidGameDir {
                data_dir: paths.data_dir().to_path_buf(),
                check_file: game_type.data_check_file(),
            });
        }

        info!(
            game = %game_type,
            game_dir = %paths.game_dir().display(),
            "Game installation validated"
        );

        Ok(Self { game_type, paths })
    }

    /// The game profile.
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    /// Resolved paths.
    pub fn paths(&self) -> &GamePaths {
        &self.paths
    }

    /// `plugins.txt` location.
    pub fn plugins_file(&self) -> PathBuf {
        self.paths.app_data_dir().join(PLUGINS_FILE)
    }

    /// Active plugins in load order.
    pub fn active_plugins(&self, trim_extension: bool) -> Result<Vec<String>, GameError> {
        let plugins = ActivePlugins::new(self.paths.data_dir(), self.plugins_file())
            .with_always_loaded(self.game_type.always_loaded().iter().copied())
            .with_base_masters(self.game_type.base_masters())
            .with_creation_club_file(self.paths.game_dir().join(CREATION_CLUB_FILE))
            .read(trim_extension)?;
        Ok(plugins)
    }

    /// The game INI and its custom override, in that order.
    pub fn ini_sources(&self) -> (ConfigSource, ConfigSource) {
        let names = self.game_type.ini_names();
        let docs = self.paths.documents_dir();
        (
            ConfigSource::required(docs.join(names.ini)),
            ConfigSource::optional(docs.join(names.custom)),
        )
    }

    /// Effective game configuration: the game INI with the custom INI merged on top.
    pub fn game_config(&self) -> Result<ConfigTree, GameError> {
        let (base, custom) = self.ini_sources();
        Ok(ConfigSource::load_layered(&base, &custom)?)
    }

    /// INI files directly in the data directory, sorted by name (case-insensitive).
    pub fn data_ini_files(&self) -> Result<Vec<PathBuf>, GameError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(self.paths.data_dir())? {
            let path = entry?.path();
            let is_ini = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("ini"))
                .unwrap_or(false);
            if is_ini && path.is_file() {
                files.push(path);
            }
        }

        files.sort_by_cached_key(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default()
        });
        Ok(files)
    }

    /// Archives named by the `[Archive]` INI fields, in configured order.
    ///
    /// Sources in ascending precedence: the game INI, the custom INI, then
    /// each INI in the data directory in name order. Each source is read on
    /// its own, so an empty field never clears a lower source's value. Data
    /// directory INIs that cannot be read or parsed are skipped with a warning.
    pub fn config_archive_list(&self) -> Result<Vec<ArchiveName>, GameError> {
        let (base, custom) = self.ini_sources();
        let mut sources = vec![base.load()?, custom.load()?];

        for path in self.data_ini_files()? {
            match ConfigSource::required(&path).load() {
                Ok(tree) => sources.push(tree),
                Err(e) => warn!("Ignoring INI {}: {}", path.display(), e),
            }
        }

        let archives = ArchiveListFields::default().extract(&sources);
        debug!(count = archives.len(), "Archives loaded through INI");
        Ok(archives.into_vec())
    }

    /// Archives present in the data directory.
    pub fn discover_archives(&self) -> Result<Vec<ArchiveName>, GameError> {
        Ok(ArchiveDiscovery::new(self.paths.data_dir()).list_archives()?)
    }

    /// Compute the archive load order for this installation.
    pub fn resolve_archive_order(&self) -> Result<ArchiveResolution, GameError> {
        let config_archives = self.config_archive_list()?;
        let plugins = self.active_plugins(true)?;
        let on_disk = self.discover_archives()?;

        let resolution =
            ArchivePriorityResolver::new().resolve(&config_archives, &plugins, &on_disk);

        info!(
            archives = resolution.order.len(),
            orphans = resolution.orphans.len(),
            "Resolved archive load order"
        );
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install(check_file: &str) -> (TempDir, GamePaths) {
        let temp = TempDir::new().unwrap();
        let game = temp.path().join("game");
        fs::create_dir_all(game.join("Data")).unwrap();
        fs::write(game.join("Data").join(check_file), b"").unwrap();
        let docs = temp.path().join("docs");
        let appdata = temp.path().join("appdata");
        fs::create_dir_all(&docs).unwrap();
        fs::create_dir_all(&appdata).unwrap();
        let paths = GamePaths::new(game, docs, appdata);
        (temp, paths)
    }

    #[test]
    fn test_rejects_missing_check_file() {
        let (_temp, paths) = install("Skyrim.esm");
        let err = GameContext::new(GameType::SkyrimVr, paths).unwrap_err();
        assert!(matches!(err, GameError::InvalidGameDir { .. }));
    }

    #[test]
    fn test_rejects_missing_game_dir() {
        let temp = TempDir::new().unwrap();
        let paths = GamePaths::new(temp.path().join("nope"), temp.path(), temp.path());
        let err = GameContext::new(GameType::SkyrimSe, paths).unwrap_err();
        assert!(matches!(err, GameError::GameDirNotFound(_)));
    }

    #[test]
    fn test_missing_plugins_txt_is_error() {
        let (_temp, paths) = install("Skyrim.esm");
        let context = GameContext::new(GameType::SkyrimSe, paths).unwrap();
        let err = context.active_plugins(false).unwrap_err();
        assert!(matches!(err, GameError::LoadOrder(_)));
    }

    #[test]
    fn test_missing_game_ini_is_error() {
        let (_temp, paths) = install("Skyrim.esm");
        let context = GameContext::new(GameType::SkyrimSe, paths).unwrap();
        assert!(matches!(context.game_config(), Err(GameError::Config(_))));
    }

    #[test]
    fn test_data_inis_sorted_case_insensitively() {
        let (_temp, paths) = install("Skyrim.esm");
        let data = paths.data_dir().to_path_buf();
        fs::write(data.join("b.ini"), "").unwrap();
        fs::write(data.join("A.INI"), "").unwrap();
        fs::write(data.join("c.txt"), "").unwrap();
        let context = GameContext::new(GameType::SkyrimSe, paths).unwrap();

        let names: Vec<_> = context
            .data_ini_files()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.INI", "b.ini"]);
    }

    #[test]
    fn test_data_ini_overrides_game_ini() {
        let (_temp, paths) = install("Skyrim.esm");
        fs::write(
            paths.documents_dir().join("skyrim.ini"),
            "[Archive]\nsResourceArchiveList=Base.bsa\nsResourceArchiveList2=Two.bsa\n",
        )
        .unwrap();
        fs::write(
            paths.data_dir().join("Mod.ini"),
            "[Archive]\nsResourceArchiveList=Mod.bsa\n",
        )
        .unwrap();
        let context = GameContext::new(GameType::SkyrimSe, paths).unwrap();

        let names: Vec<_> = context
            .config_archive_list()
            .unwrap()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(names, vec!["Mod.bsa", "Two.bsa"]);
    }

    #[test]
    fn test_empty_custom_field_keeps_game_ini_value() {
        let (_temp, paths) = install("Skyrim.esm");
        fs::write(
            paths.documents_dir().join("skyrim.ini"),
            "[Archive]\nsResourceArchiveList=Skyrim - Misc.bsa\n",
        )
        .unwrap();
        fs::write(
            paths.documents_dir().join("skyrimcustom.ini"),
            "[Archive]\nsResourceArchiveList=\nsResourceArchiveList2=Custom.bsa\n",
        )
        .unwrap();
        let context = GameContext::new(GameType::SkyrimSe, paths).unwrap();

        let names: Vec<_> = context
            .config_archive_list()
            .unwrap()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(names, vec!["Skyrim - Misc.bsa", "Custom.bsa"]);
    }

    #[test]
    fn test_malformed_data_ini_is_skipped() {
        let (_temp, paths) = install("Skyrim.esm");
        fs::write(
            paths.documents_dir().join("skyrim.ini"),
            "[Archive]\nsResourceArchiveList=Base.bsa\n",
        )
        .unwrap();
        fs::write(paths.data_dir().join("Broken.ini"), "[General\nfoo=1\n").unwrap();
        fs::write(
            paths.data_dir().join("Mod.ini"),
            "[Archive]\nsResourceArchiveList2=Mod.bsa\n",
        )
        .unwrap();
        let context = GameContext::new(GameType::SkyrimSe, paths).unwrap();

        let names: Vec<_> = context
            .config_archive_list()
            .unwrap()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(names, vec!["Base.bsa", "Mod.bsa"]);
    }
}
