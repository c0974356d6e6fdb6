//! Region priority resolution.
//!
//! LaunchBox keeps images in per-region subfolders ("North America",
//! "Europe, Japan", ...) below each media folder, with region-less images in
//! the media folder itself. Game file names usually carry a region code in
//! parentheses, e.g. `Super Game (E) (Disc 1).bin`. [`RegionPolicy::resolve`]
//! turns the two into an ordered list of region folders to search.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pseudo-region meaning "the media folder itself, not a region subfolder".
pub const REGION_FREE: &str = "Region Free";

/// Platform on which a lone `F` code means World rather than France.
const WORLD_F_PLATFORM: &str = "Sega Genesis";

/// A set of equivalent file-name region codes and the LaunchBox region
/// folders they map to, in search order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCodeGroup {
    pub codes: Vec<String>,
    pub regions: Vec<String>,
}

impl RegionCodeGroup {
    pub fn new(codes: &[&str], regions: &[&str]) -> Self {
        Self {
            codes: codes.iter().map(|c| c.to_string()).collect(),
            regions: regions.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Exact (case-sensitive) code membership.
    pub fn contains(&self, token: &str) -> bool {
        self.codes.iter().any(|c| c == token)
    }
}

/// The default region search order.
pub fn default_region_priority() -> Vec<String> {
    [
        REGION_FREE,
        "North America",
        "United States",
        "United States, Europe",
        "United States, Europe, Brazil",
        "United States, Australia",
        "United States, Japan",
        "United States, Japan, Europe",
        "United States, Korea",
        "United States, Brazil",
        "World",
        "Europe",
        "Europe, Japan",
        "Australia",
        "Canada",
        "Japan",
        "Japan, Korea",
        "Asia",
        "Oceania",
        "South America",
        "Brazil",
        "China",
        "Finland",
        "France",
        "Germany",
        "Greece",
        "Holland",
        "Hong Kong",
        "Italy",
        "Korea",
        "Norway",
        "Russia",
        "Spain",
        "Sweden",
        "Taiwan",
        "The Netherlands",
    ]
    .iter()
    .map(|r| r.to_string())
    .collect()
}

/// The default region auto-detect table, in match-priority order.
pub fn default_region_table() -> Vec<RegionCodeGroup> {
    vec![
        // Common region codes
        RegionCodeGroup::new(&["USA", "U", "US", "NA"], &["North America", "United States"]),
        RegionCodeGroup::new(&["Europe", "E", "EU", "EUR"], &["Europe", "Europe, Japan"]),
        RegionCodeGroup::new(&["Japan", "J", "JP", "JAP"], &["Japan", "Japan, Korea", "Asia"]),
        // Dual region codes
        RegionCodeGroup::new(
            &["UE", "EU", "USA, Europe", "Europe, USA"],
            &["United States, Europe"],
        ),
        RegionCodeGroup::new(
            &["UJ", "JU", "USA, Japan", "Japan, USA"],
            &["United States, Japan"],
        ),
        RegionCodeGroup::new(
            &["EJ", "JE", "Europe, Japan", "Japan, Europe"],
            &["Europe, Japan"],
        ),
        RegionCodeGroup::new(&["1", "JK"], &["Japan, Korea"]),
        RegionCodeGroup::new(&["4", "UB"], &["United States, Brazil"]),
        // NTSC / PAL
        RegionCodeGroup::new(
            &["5"],
            &[
                "North America",
                "United States",
                "Canada",
                "World",
                "Japan",
                "Japan, Korea",
                "Korea",
                "Taiwan",
            ],
        ),
        RegionCodeGroup::new(
            &["8"],
            &[
                "Europe",
                "Australia",
                "Brazil",
                "China",
                "Finland",
                "Germany",
                "Greece",
                "Hong Kong",
                "Italy",
                "Norway",
                "Spain",
                "Sweden",
                "The Netherlands",
            ],
        ),
        // Country codes
        RegionCodeGroup::new(
            &["Australia", "A", "AU", "AUS"],
            &["Australia", "United States, Australia", "Oceania"],
        ),
        RegionCodeGroup::new(
            &["Brazil", "B", "BR", "BRA"],
            &["Brazil", "United States, Brazil", "South America"],
        ),
        RegionCodeGroup::new(&["Canada", "CA", "CAN"], &["Canada", "North America"]),
        RegionCodeGroup::new(&["China", "C", "CN", "CHN"], &["China", "Asia"]),
        RegionCodeGroup::new(&["Finland", "FI", "FIN"], &["Finland", "Europe"]),
        RegionCodeGroup::new(
            &["France", "F", "FR", "FRA", "FC"],
            &["France", "French Canadian", "Europe"],
        ),
        RegionCodeGroup::new(&["Germany", "G", "DE", "DEU"], &["Germany", "Europe"]),
        RegionCodeGroup::new(&["Greece", "GR", "GRC"], &["Greece", "Europe"]),
        RegionCodeGroup::new(&["Hong Kong", "HK", "HKG"], &["Hong Kong", "Asia"]),
        RegionCodeGroup::new(&["Italy", "I", "IT", "ITA"], &["Italy", "Europe"]),
        RegionCodeGroup::new(
            &["Korea", "K", "KR", "KOR"],
            &["Korea", "Japan, Korea", "Asia"],
        ),
        RegionCodeGroup::new(&["Norway", "NO", "NOR"], &["Norway", "Europe"]),
        RegionCodeGroup::new(&["Russia", "R", "RU", "RUS"], &["Russia", "Europe"]),
        RegionCodeGroup::new(&["Spain", "S", "ES", "ESP"], &["Spain", "Europe"]),
        RegionCodeGroup::new(&["Sweden", "SW", "SWE"], &["Sweden", "Europe"]),
        RegionCodeGroup::new(&["Taiwan", "T", "TW", "TWN"], &["Taiwan", "Asia"]),
        RegionCodeGroup::new(
            &["The Netherlands", "NL", "NLD", "H"],
            &["The Netherlands", "Holland", "Europe"],
        ),
        // Most unlicensed releases come out of Taiwan
        RegionCodeGroup::new(&["Unlicensed", "Unl"], &["Taiwan", "Asia"]),
        RegionCodeGroup::new(
            &["World", "W", "UEJ", "UJE", "EUJ", "EJU", "JUE", "JEU"],
            &["World", "United States, Japan, Europe"],
        ),
    ]
}

/// Outcome of [`RegionPolicy::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionResolution {
    /// The file-name code that matched the table, if any (after the
    /// Genesis `F` -> `W` rewrite).
    pub detected_code: Option<String>,
    /// Region folders to search, highest priority first.
    pub priority: Vec<String>,
}

/// Region search configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPolicy {
    pub priority: Vec<String>,
    pub table: Vec<RegionCodeGroup>,
    /// Only search the detected (or declared) region's folders.
    pub detected_regions_only: bool,
    /// Put [`REGION_FREE`] ahead of detected regions.
    pub always_prioritize_region_free: bool,
}

impl Default for RegionPolicy {
    fn default() -> Self {
        Self {
            priority: default_region_priority(),
            table: default_region_table(),
            detected_regions_only: false,
            always_prioritize_region_free: false,
        }
    }
}

impl RegionPolicy {
    /// Build the region search order for one game file.
    ///
    /// The first table group (in declaration order) with a code equal to
    /// any bracketed token wins. Without a code match the catalog-declared
    /// region leads the list; without either the configured priority is
    /// returned as is.
    pub fn resolve(
        &self,
        file_stem: &str,
        declared_region: Option<&str>,
        platform: &str,
    ) -> RegionResolution {
        let tokens: Vec<&str> = bracketed_tokens(file_stem)
            .into_iter()
            .map(|t| {
                if t == "F" && platform == WORLD_F_PLATFORM {
                    "W"
                } else {
                    t
                }
            })
            .collect();

        for group in &self.table {
            if let Some(code) = tokens.iter().find(|t| group.contains(t)) {
                let mut priority = Vec::new();
                if self.always_prioritize_region_free {
                    priority.push(REGION_FREE.to_string());
                }
                priority.extend(group.regions.iter().cloned());
                self.append_defaults(&mut priority);
                return RegionResolution {
                    detected_code: Some(code.to_string()),
                    priority,
                };
            }
        }

        match declared_region.map(str::trim).filter(|r| !r.is_empty()) {
            Some(region) => {
                let mut priority = vec![region.to_string()];
                self.append_defaults(&mut priority);
                RegionResolution {
                    detected_code: None,
                    priority,
                }
            }
            None => RegionResolution {
                detected_code: None,
                priority: self.priority.clone(),
            },
        }
    }

    fn append_defaults(&self, priority: &mut Vec<String>) {
        if self.detected_regions_only {
            return;
        }
        for region in &self.priority {
            if !priority.contains(region) {
                priority.push(region.clone());
            }
        }
    }
}

/// Whether a region name refers to the media folder itself.
pub fn is_region_free(region: &str) -> bool {
    region == REGION_FREE || region.is_empty() || region == "."
}

/// Contents of every `(...)` or `[...]` group in a file stem, without the
/// brackets.
pub fn bracketed_tokens(stem: &str) -> Vec<&str> {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    let re = TOKEN_RE
        .get_or_init(|| Regex::new(r"[(\[]([\w.,;'\-\s]*)[)\]]").expect("static pattern"));
    re.captures_iter(stem)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
#[path = "tests/region_tests.rs"]
mod tests;
