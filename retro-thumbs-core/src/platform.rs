//! Platform name equivalence between LaunchBox and RetroArch.
//!
//! LaunchBox names platforms like "Sega Genesis" while RetroArch playlists
//! use libretro database names like "Sega - Mega Drive - Genesis". The
//! equivalence table covers the names that differ, and may list several
//! playlists per platform when games can end up in more than one of them.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Manufacturer prefixes dropped from playlist names before the fallback
/// substring comparison.
const MANUFACTURER_PREFIXES: &[&str] = &["Nintendo - ", "Bandai - ", "Coleco - "];

/// Source platform name -> acceptable playlist names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEquivalence {
    table: BTreeMap<String, Vec<String>>,
}

impl Default for PlatformEquivalence {
    fn default() -> Self {
        const TURBOGRAFX: &[&str] = &[
            "NEC - PC Engine - TurboGrafx 16",
            "NEC - PC Engine CD - TurboGrafx-CD",
            "NEC - PC Engine SuperGrafx",
        ];
        const JAGUAR: &[&str] = &["Atari - Jaguar", "Atari - Jaguar CD"];
        const SINCLAIR: &[&str] = &[
            "Sinclair - ZX 81",
            "Sinclair - ZX Spectrum +3",
            "Sinclair - ZX Spectrum",
        ];
        const PSP: &[&str] = &[
            "Sony - PlayStation Portable",
            "Sony - PlayStation Portable Vita",
        ];
        const SNES: &[&str] = &[
            "Nintendo - Satellaview",
            "Nintendo - Super Nintendo Entertainment System",
        ];
        const VTECH: &[&str] = &["VTech - CreatiVision", "VTech - V.Smile"];

        let entries: &[(&str, &[&str])] = &[
            ("3DO Interactive Multiplayer", &["The 3DO Company - 3DO"]),
            ("Atari Jaguar", JAGUAR),
            ("Atari Jaguar CD", JAGUAR),
            ("Magnavox Odyssey", &["Magnavox - Odyssey2"]),
            ("Magnavox Odyssey 2", &["Magnavox - Odyssey2"]),
            ("MS-DOS", &["DOS"]),
            ("NEC PC-9801", &["NEC - PC-98"]),
            ("NEC TurboGrafx-16", TURBOGRAFX),
            ("NEC TurboGrafx-CD", TURBOGRAFX),
            (
                "Nintendo DS",
                &[
                    "Nintendo - Nintendo DS",
                    "Nintendo - Nintendo DS Decrypted",
                    "Nintendo - Nintendo DSi",
                    "Nintendo - Nintendo DSi Decrypted",
                ],
            ),
            (
                "Nintendo Famicom Disk System",
                &["Nintendo - Nintendo Entertainment System"],
            ),
            ("Nintendo Satellaview", SNES),
            ("PC Engine SuperGrafx", TURBOGRAFX),
            (
                "Sega 32X",
                &[
                    "Sega - 32X",
                    "Sega - Mega Drive - Genesis",
                    "Sega - Mega-CD - Sega CD",
                ],
            ),
            ("Sega CD", &["Sega - 32X", "Sega - Mega-CD - Sega CD"]),
            ("Sega Dreamcast VMU", &["Sega - Dreamcast"]),
            ("Sega Genesis", &["Sega - 32X", "Sega - Mega Drive - Genesis"]),
            ("Sinclair ZX Spectrum", SINCLAIR),
            ("Sinclair ZX-81", SINCLAIR),
            // Keeps PlayStation 2/3 playlists out of the fallback match
            ("Sony Playstation", &["Sony - PlayStation"]),
            ("Sony PSP", PSP),
            ("Sony PSP Minis", PSP),
            ("Super Nintendo Entertainment System", SNES),
            ("VTech CreatiVision", VTECH),
            ("VTech Socrates", VTECH),
        ];

        Self::from_pairs(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect())),
        )
    }
}

impl PlatformEquivalence {
    /// An empty table: every comparison goes through the fallback heuristic.
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            table: pairs.into_iter().collect(),
        }
    }

    /// Add or replace the playlists accepted for one source platform.
    pub fn insert(&mut self, source: impl Into<String>, playlists: Vec<String>) {
        self.table.insert(source.into(), playlists);
    }

    pub fn get(&self, source: &str) -> Option<&[String]> {
        self.table.get(source).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Whether games of `source_platform` may appear in the playlist named
    /// `playlist`.
    ///
    /// Tabled platforms compare against the playlist name with any
    /// ` (...)` groups removed. Other platforms fall back to a case-folded
    /// substring test against the playlist name with ` - ` separators
    /// removed, both with and without its manufacturer prefix. The fallback
    /// can accept a longer name that contains the platform (e.g.
    /// "PlayStation 2" for "PlayStation").
    pub fn accepts(&self, source_platform: &str, playlist: &str) -> bool {
        match self.table.get(source_platform) {
            Some(accepted) => {
                let stripped = strip_parenthesized(playlist);
                accepted.iter().any(|name| *name == stripped)
            }
            None => {
                let source = source_platform.to_lowercase();
                fallback_names(playlist).iter().any(|n| n.contains(&source))
            }
        }
    }
}

/// Remove every ` (...)` group, e.g. "Sega - 32X (Hacks)" -> "Sega - 32X".
pub fn strip_parenthesized(name: &str) -> String {
    static PAREN_RE: OnceLock<Regex> = OnceLock::new();
    let re = PAREN_RE
        .get_or_init(|| Regex::new(r"\s*\([\w.,;'\-\s]*\)").expect("static pattern"));
    re.replace_all(name, "").into_owned()
}

fn fallback_names(playlist: &str) -> Vec<String> {
    let normalize = |name: &str| name.replace(" - ", " ").to_lowercase();
    let mut names = vec![normalize(playlist)];
    if let Some(rest) = MANUFACTURER_PREFIXES
        .iter()
        .find_map(|prefix| playlist.strip_prefix(prefix))
    {
        names.push(normalize(rest));
    }
    names
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;
