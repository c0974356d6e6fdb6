//! LaunchBox data files.
//!
//! - `Data/Platforms.xml` lists `<PlatformFolder>` records mapping each
//!   platform's media types to image folders.
//! - `Data/Platforms/<Platform>.xml` lists `<Game>` records and
//!   `<AdditionalApplication>` records (extra discs, versions, hacks) that
//!   point back to a game by ID.

use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;
use std::path::{Component, Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::CatalogError;
use crate::provider::SourceCatalog;
use crate::types::{MediaFolder, SourceEntry};

/// A flat XML record: child element name -> text.
pub type Record = HashMap<String, String>;

/// A LaunchBox installation, fully indexed at open time.
#[derive(Debug, Clone)]
pub struct LaunchBoxCatalog {
    root: PathBuf,
    platforms: BTreeMap<String, Vec<MediaFolder>>,
    entries: HashMap<PathBuf, SourceEntry>,
}

impl LaunchBoxCatalog {
    /// Read `Data/Platforms.xml` and every platform file under
    /// `Data/Platforms/`.
    ///
    /// `root` may also point at a file inside the installation folder
    /// (e.g. `LaunchBox.exe`).
    pub fn open(root: &Path) -> Result<Self, CatalogError> {
        let root = if root.is_file() {
            root.parent().unwrap_or(root).to_path_buf()
        } else {
            root.to_path_buf()
        };
        if !root.is_dir() {
            return Err(CatalogError::not_found(format!(
                "LaunchBox folder {}",
                root.display()
            )));
        }

        let platforms_xml = root.join("Data").join("Platforms.xml");
        if !platforms_xml.is_file() {
            return Err(CatalogError::not_found(format!(
                "LaunchBox platforms file {}",
                platforms_xml.display()
            )));
        }
        let platforms_dir = root.join("Data").join("Platforms");
        if !platforms_dir.is_dir() {
            return Err(CatalogError::not_found(format!(
                "LaunchBox platforms folder {}",
                platforms_dir.display()
            )));
        }

        let platforms = load_platform_folders(&platforms_xml, &root)?;
        log::debug!(
            "Loaded media folders for {} LaunchBox platforms",
            platforms.len()
        );

        let mut files: Vec<PathBuf> = std::fs::read_dir(&platforms_dir)
            .map_err(|e| CatalogError::io(&platforms_dir, e))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "xml"))
            .collect();
        files.sort();

        let entries = index_games(&files, &root)?;
        log::debug!("Indexed {} LaunchBox game paths", entries.len());

        Ok(Self {
            root,
            platforms,
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl SourceCatalog for LaunchBoxCatalog {
    fn platforms(&self) -> &BTreeMap<String, Vec<MediaFolder>> {
        &self.platforms
    }

    fn find_entry_by_path(&self, path: &Path) -> Option<SourceEntry> {
        self.entries.get(&normalize_path(path)).cloned()
    }
}

fn load_platform_folders(
    path: &Path,
    root: &Path,
) -> Result<BTreeMap<String, Vec<MediaFolder>>, CatalogError> {
    let mut platforms: BTreeMap<String, Vec<MediaFolder>> = BTreeMap::new();
    for (_, record) in read_records_file(path, &["PlatformFolder"])? {
        let (Some(platform), Some(media_type), Some(folder)) = (
            field(&record, "Platform"),
            field(&record, "MediaType"),
            field(&record, "FolderPath"),
        ) else {
            log::warn!("Skipping incomplete PlatformFolder record in {}", path.display());
            continue;
        };
        platforms
            .entry(platform.to_string())
            .or_default()
            .push(MediaFolder::new(media_type, resolve_path(root, folder)));
    }
    Ok(platforms)
}

/// Build the application path index across all platform files.
///
/// Within a file, additional applications are indexed ahead of games, and
/// earlier files win over later ones for the same path.
fn index_games(
    files: &[PathBuf],
    root: &Path,
) -> Result<HashMap<PathBuf, SourceEntry>, CatalogError> {
    let mut parsed = Vec::with_capacity(files.len());
    for file in files {
        parsed.push(read_records_file(file, &["Game", "AdditionalApplication"])?);
    }

    let mut games_by_id: HashMap<String, (&str, &str, Option<&str>)> = HashMap::new();
    for records in &parsed {
        for (tag, record) in records {
            if tag != "Game" {
                continue;
            }
            if let (Some(id), Some(platform), Some(title)) = (
                field(record, "ID"),
                field(record, "Platform"),
                field(record, "Title"),
            ) {
                games_by_id
                    .entry(id.to_string())
                    .or_insert((platform, title, field(record, "Region")));
            }
        }
    }

    let mut entries = HashMap::new();
    for records in &parsed {
        for (_, record) in records.iter().filter(|(t, _)| t == "AdditionalApplication") {
            let (Some(app_path), Some(game_id)) =
                (field(record, "ApplicationPath"), field(record, "GameID"))
            else {
                continue;
            };
            let Some(&(platform, title, game_region)) = games_by_id.get(game_id) else {
                log::debug!("Additional application {} has no parent game", app_path);
                continue;
            };
            entries
                .entry(resolve_path(root, app_path))
                .or_insert_with(|| SourceEntry {
                    platform: platform.to_string(),
                    title: title.to_string(),
                    region: field(record, "Region").or(game_region).map(str::to_string),
                    alternate_of: Some(game_id.to_string()),
                });
        }
        for (_, record) in records.iter().filter(|(t, _)| t == "Game") {
            let (Some(app_path), Some(platform), Some(title)) = (
                field(record, "ApplicationPath"),
                field(record, "Platform"),
                field(record, "Title"),
            ) else {
                continue;
            };
            entries
                .entry(resolve_path(root, app_path))
                .or_insert_with(|| SourceEntry {
                    platform: platform.to_string(),
                    title: title.to_string(),
                    region: field(record, "Region").map(str::to_string),
                    alternate_of: None,
                });
        }
    }
    Ok(entries)
}

fn field<'a>(record: &'a Record, name: &str) -> Option<&'a str> {
    record
        .get(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

fn read_records_file(path: &Path, tags: &[&str]) -> Result<Vec<(String, Record)>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| CatalogError::io(path, e))?;
    read_records(std::io::BufReader::new(file), tags).map_err(|e| CatalogError::xml(path, e))
}

/// Collect every top-level record whose element name is in `tags`, as a
/// map of its child elements' text.
pub fn read_records<R: BufRead>(
    reader: R,
    tags: &[&str],
) -> Result<Vec<(String, Record)>, quick_xml::Error> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut current: Option<(String, Record)> = None;
    let mut current_field = String::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if current.is_none() && tags.contains(&name.as_str()) {
                    current = Some((name, Record::new()));
                } else if current.is_some() {
                    current_field = name;
                }
            }
            Event::Empty(ref e) => {
                if let Some((_, record)) = current.as_mut() {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    record.entry(name).or_default();
                }
            }
            Event::Text(ref e) => {
                if let Some((_, record)) = current.as_mut() {
                    if !current_field.is_empty() {
                        let text = e.unescape()?.to_string();
                        record.insert(current_field.clone(), text);
                    }
                }
            }
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match current.take() {
                    Some((tag, record)) if tag == name => records.push((tag, record)),
                    other => current = other,
                }
                current_field.clear();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

/// Resolve a LaunchBox-stored path: Windows separators are accepted and
/// relative paths are taken from the installation root.
pub fn resolve_path(root: &Path, stored: &str) -> PathBuf {
    let converted: String = if std::path::MAIN_SEPARATOR == '\\' {
        stored.to_string()
    } else {
        stored.replace('\\', "/")
    };
    let path = Path::new(&converted);
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&root.join(path))
    }
}

/// Lexically remove `.` and `..` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
