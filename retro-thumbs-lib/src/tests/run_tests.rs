use super::*;
use std::fs;
use std::path::Path;

use retro_thumbs_catalog::{
    MediaFolder, MemoryDestinationCatalog, MemorySourceCatalog, PlaylistEntry, SourceEntry,
};
use tempfile::TempDir;

use crate::config::{GlobalOptions, Preset};
use crate::materialize::SaveOutcome;
use crate::selection::RandomChooser;

const PLATFORM: &str = "Sony Playstation";
const TITLE: &str = "Final Fantasy VII";

struct Fixture {
    tmp: TempDir,
    source: MemorySourceCatalog,
    destination: MemoryDestinationCatalog,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let destination = MemoryDestinationCatalog::new(tmp.path().join("ra/thumbnails"));
        Self {
            tmp,
            source: MemorySourceCatalog::new(),
            destination,
        }
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn media(&mut self, media_type: &str) -> PathBuf {
        let dir = self.root().join("lb/Images").join(PLATFORM).join(media_type);
        fs::create_dir_all(&dir).unwrap();
        self.source
            .add_media_folder(PLATFORM, MediaFolder::new(media_type, dir.clone()));
        dir
    }

    fn image(&self, dir: &Path, name: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    /// A ROM known to LaunchBox and listed in the PlayStation playlist.
    fn game(&mut self, name: &str, label: &str) -> PathBuf {
        let dir = self.root().join("roms");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, b"rom").unwrap();
        self.source.add_entry(
            path.clone(),
            SourceEntry {
                platform: PLATFORM.to_string(),
                title: TITLE.to_string(),
                region: None,
                alternate_of: None,
            },
        );
        self.destination
            .add_entry("Sony - PlayStation", PlaylistEntry::new(path.clone(), label));
        path
    }

    fn thumbnail(&self, category: MediaCategory, label: &str) -> PathBuf {
        self.root()
            .join("ra/thumbnails/Sony - PlayStation")
            .join(category.thumbnail_dir())
            .join(format!("{label}.png"))
    }

    fn run(&self, config: &RunConfig, session: &mut SelectionSession) -> RunSummary {
        let runner = Runner::new(config, &self.source, &self.destination, None);
        let mut chooser = RandomChooser::seeded(7);
        runner
            .run(&[self.root().join("roms")], session, &mut chooser, &mut |_| {})
            .unwrap()
    }
}

fn contents(path: &Path) -> String {
    String::from_utf8(fs::read(path).unwrap()).unwrap()
}

#[test]
fn test_multi_disc_alternation() {
    let mut fx = Fixture::new();
    let boxes = fx.media("Box - Front");
    fx.image(&boxes.join("North America"), "Final Fantasy VII-01.png");
    fx.image(&boxes.join("North America"), "Final Fantasy VII-02.png");
    let shots = fx.media("Screenshot - Gameplay");
    for n in 1..=3 {
        fx.image(&shots, &format!("Final Fantasy VII-0{n}.png"));
    }
    for disc in 1..=3 {
        fx.game(
            &format!("Final Fantasy VII (USA) (Disc {disc}).chd"),
            &format!("Final Fantasy VII (Disc {disc})"),
        );
    }

    let config = RunConfig::new(Preset::default(), &GlobalOptions::default());
    let mut session = SelectionSession::new();
    let summary = fx.run(&config, &mut session);

    assert_eq!(summary.games_matched, 3);
    assert_eq!(summary.images_found, 8);
    assert_eq!(summary.images_saved, 9);
    assert_eq!(summary.save_errors, 0);

    // Boxart alternation is off: every disc gets the first box
    for disc in 1..=3 {
        let label = format!("Final Fantasy VII (Disc {disc})");
        assert_eq!(
            contents(&fx.thumbnail(MediaCategory::FrontBoxart, &label)),
            "Final Fantasy VII-01.png"
        );
        // Gameplay alternation is on: each disc gets the next screenshot
        assert_eq!(
            contents(&fx.thumbnail(MediaCategory::GameplayScreen, &label)),
            format!("Final Fantasy VII-0{disc}.png")
        );
    }
}

#[test]
fn test_second_run_skips_existing() {
    let mut fx = Fixture::new();
    let boxes = fx.media("Box - Front");
    fx.image(&boxes, "Final Fantasy VII-01.png");
    fx.game("Final Fantasy VII (USA) (Disc 1).chd", "Final Fantasy VII (Disc 1)");

    let config = RunConfig::new(Preset::default(), &GlobalOptions::default());
    let mut session = SelectionSession::new();
    let first = fx.run(&config, &mut session);
    assert_eq!(first.images_saved, 1);

    let mut session = session.carry_over();
    let second = fx.run(&config, &mut session);
    assert_eq!(second.images_saved, 1);
    assert_eq!(second.skipped, 1);
    assert_eq!(
        session.log().entries().last().unwrap().outcome,
        SaveOutcome::SkippedExists
    );
}

#[test]
fn test_other_region_images_are_shared() {
    let mut fx = Fixture::new();
    let boxes = fx.media("Box - Front");
    fx.image(&boxes.join("North America"), "Final Fantasy VII-01.png");
    fx.game("Final Fantasy VII (USA).chd", "FF7 USA");
    fx.game("Final Fantasy VII (Japan).chd", "FF7 Japan");

    let config = RunConfig::new(Preset::default(), &GlobalOptions::default());
    let mut session = SelectionSession::new();
    fx.run(&config, &mut session);
    assert_eq!(
        contents(&fx.thumbnail(MediaCategory::FrontBoxart, "FF7 Japan")),
        "Final Fantasy VII-01.png"
    );

    // Detected regions only: the Japanese release gets nothing
    let fx2 = {
        let mut fx = Fixture::new();
        let boxes = fx.media("Box - Front");
        fx.image(&boxes.join("North America"), "Final Fantasy VII-01.png");
        fx.game("Final Fantasy VII (USA).chd", "FF7 USA");
        fx.game("Final Fantasy VII (Japan).chd", "FF7 Japan");
        fx
    };
    let options = GlobalOptions {
        detected_regions_only: true,
        ..GlobalOptions::default()
    };
    let config = RunConfig::new(Preset::default(), &options);
    let mut session = SelectionSession::new();
    fx2.run(&config, &mut session);
    assert!(fx2.thumbnail(MediaCategory::FrontBoxart, "FF7 USA").exists());
    assert!(!fx2.thumbnail(MediaCategory::FrontBoxart, "FF7 Japan").exists());
}

#[test]
fn test_skipped_categories_and_unknown_files() {
    let mut fx = Fixture::new();
    let boxes = fx.media("Box - Front");
    fx.image(&boxes, "Final Fantasy VII-01.png");
    let shots = fx.media("Screenshot - Gameplay");
    fx.image(&shots, "Final Fantasy VII-01.png");
    fx.game("Final Fantasy VII (USA).chd", "FF7");
    // Present on disk, unknown to LaunchBox
    fs::write(fx.root().join("roms/Homebrew.chd"), b"rom").unwrap();

    let preset = crate::config::find_preset(&Default::default(), "boxart-only").unwrap();
    let config = RunConfig::new(
        Preset {
            height: crate::resize::SizeChange::NoChange,
            ..preset
        },
        &GlobalOptions::default(),
    );
    let runner = Runner::new(&config, &fx.source, &fx.destination, None);
    let mut session = SelectionSession::new();
    let mut chooser = RandomChooser::seeded(1);
    let mut unmatched = 0;
    let mut saved = Vec::new();
    runner
        .run(
            &[fx.root().join("roms")],
            &mut session,
            &mut chooser,
            &mut |event: RunEvent<'_>| match event {
                RunEvent::Searched {
                    result: FileSearch::Unmatched,
                    ..
                } => unmatched += 1,
                RunEvent::Materialized { entry } => saved.push(entry.category),
                _ => {}
            },
        )
        .unwrap();

    assert_eq!(unmatched, 1);
    assert_eq!(saved, vec![MediaCategory::FrontBoxart]);
    assert!(!fx.thumbnail(MediaCategory::GameplayScreen, "FF7").exists());
}
