//! Supported game profiles.
//!
//! Each profile fixes the file names and folder names the engine uses for a
//! particular game release.

use std::fmt;
use std::str::FromStr;

/// Masters the engine loads even when `plugins.txt` omits them, if present.
const SKYRIM_BASE_MASTERS: [&str; 4] = [
    "Update.esm",
    "Dawnguard.esm",
    "HearthFires.esm",
    "Dragonborn.esm",
];

/// A supported Bethesda game release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameType {
    /// Skyrim Special Edition / Anniversary Edition (Steam).
    #[default]
    SkyrimSe,
    /// Skyrim Special Edition (GOG).
    SkyrimGog,
    /// Skyrim VR.
    SkyrimVr,
    /// Original Skyrim (Legendary Edition).
    Skyrim,
    /// Enderal: Forgotten Stories.
    Enderal,
    /// Enderal: Forgotten Stories Special Edition.
    EnderalSe,
}

/// INI file names for a profile, relative to the documents folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IniNames {
    pub ini: &'static str,
    pub prefs: &'static str,
    pub custom: &'static str,
}

impl GameType {
    /// All profiles, in display order.
    pub const ALL: [GameType; 6] = [
        GameType::SkyrimSe,
        GameType::SkyrimGog,
        GameType::SkyrimVr,
        GameType::Skyrim,
        GameType::Enderal,
        GameType::EnderalSe,
    ];

    /// Short identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            GameType::SkyrimSe => "skyrimse",
            GameType::SkyrimGog => "skyrimgog",
            GameType::SkyrimVr => "skyrimvr",
            GameType::Skyrim => "skyrim",
            GameType::Enderal => "enderal",
            GameType::EnderalSe => "enderalse",
        }
    }

    /// Human readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            GameType::SkyrimSe => "Skyrim Special Edition",
            GameType::SkyrimGog => "Skyrim Special Edition (GOG)",
            GameType::SkyrimVr => "Skyrim VR",
            GameType::Skyrim => "Skyrim",
            GameType::Enderal => "Enderal",
            GameType::EnderalSe => "Enderal Special Edition",
        }
    }

    /// INI file names in the documents folder.
    pub fn ini_names(self) -> IniNames {
        match self {
            GameType::Enderal | GameType::EnderalSe => IniNames {
                ini: "enderal.ini",
                prefs: "enderalprefs.ini",
                custom: "enderalcustom.ini",
            },
            _ => IniNames {
                ini: "skyrim.ini",
                prefs: "skyrimprefs.ini",
                custom: "skyrimcustom.ini",
            },
        }
    }

    /// Folder under `Documents/My Games` holding the INIs.
    pub fn documents_folder(self) -> &'static str {
        match self {
            GameType::SkyrimSe => "Skyrim Special Edition",
            GameType::SkyrimGog => "Skyrim Special Edition GOG",
            GameType::SkyrimVr => "Skyrim VR",
            GameType::Skyrim => "Skyrim",
            GameType::Enderal => "Enderal",
            GameType::EnderalSe => "Enderal Special Edition",
        }
    }

    /// Folder under the local application data directory holding `plugins.txt`.
    pub fn app_data_folder(self) -> &'static str {
        // Same names as the documents folders for every release
        self.documents_folder()
    }

    /// File that must exist in `Data/` for the install to be valid.
    pub fn data_check_file(self) -> &'static str {
        match self {
            GameType::SkyrimVr => "SkyrimVR.esm",
            GameType::Enderal | GameType::EnderalSe => "Enderal - Forgotten Stories.esm",
            _ => "Skyrim.esm",
        }
    }

    /// Masters loaded unconditionally.
    pub fn always_loaded(self) -> &'static [&'static str] {
        &["Skyrim.esm"]
    }

    /// Masters loaded when present in the data directory, in order.
    pub fn base_masters(self) -> Vec<&'static str> {
        let mut masters = SKYRIM_BASE_MASTERS.to_vec();
        if self == GameType::SkyrimVr {
            masters.push("SkyrimVR.esm");
        }
        masters
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when parsing an unknown game identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown game type '{0}' (expected one of: skyrimse, skyrimgog, skyrimvr, skyrim, enderal, enderalse)")]
pub struct UnknownGameType(pub String);

impl FromStr for GameType {
    type Err = UnknownGameType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        GameType::ALL
            .into_iter()
            .find(|game| game.id() == wanted)
            .ok_or_else(|| UnknownGameType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        for game in GameType::ALL {
            assert_eq!(game.id().parse::<GameType>().unwrap(), game);
        }
        assert_eq!("Skyrim-SE".parse::<GameType>().unwrap(), GameType::SkyrimSe);
        assert_eq!("enderal_se".parse::<GameType>().unwrap(), GameType::EnderalSe);
        assert!("oblivion".parse::<GameType>().is_err());
    }

    #[test]
    fn test_enderal_uses_own_inis() {
        let names = GameType::EnderalSe.ini_names();
        assert_eq!(names.ini, "enderal.ini");
        assert_eq!(names.custom, "enderalcustom.ini");
        assert_eq!(GameType::Skyrim.ini_names().ini, "skyrim.ini");
    }

    #[test]
    fn test_check_files() {
        assert_eq!(GameType::SkyrimSe.data_check_file(), "Skyrim.esm");
        assert_eq!(GameType::SkyrimVr.data_check_file(), "SkyrimVR.esm");
        assert_eq!(
            GameType::Enderal.data_check_file(),
            "Enderal - Forgotten Stories.esm"
        );
    }

    #[test]
    fn test_vr_adds_vr_master() {
        assert!(!GameType::SkyrimSe.base_masters().contains(&"SkyrimVR.esm"));
        assert_eq!(GameType::SkyrimVr.base_masters().last(), Some(&"SkyrimVR.esm"));
    }

    #[test]
    fn test_folders() {
        assert_eq!(GameType::SkyrimGog.documents_folder(), "Skyrim Special Edition GOG");
        assert_eq!(GameType::EnderalSe.app_data_folder(), "Enderal Special Edition");
    }
}
