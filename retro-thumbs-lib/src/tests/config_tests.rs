use super::*;
use tempfile::TempDir;

#[test]
fn test_builtin_preset_names() {
    let names: Vec<String> = builtin_presets().into_iter().map(|p| p.name).collect();
    assert_eq!(
        names,
        vec![
            "default",
            "back-cover",
            "3d-box",
            "boxart-only",
            "japan",
            "random-gameplay",
            "bonus-discs"
        ]
    );
}

#[test]
fn test_default_preset_categories() {
    let preset = Preset::default();
    assert_eq!(
        preset.media_types(MediaCategory::FrontBoxart).unwrap()[0],
        "Box - Front"
    );
    assert_eq!(preset.alternation(MediaCategory::FrontBoxart), Alternation::Off);
    assert_eq!(preset.alternation(MediaCategory::TitleScreen), Alternation::Off);
    assert_eq!(
        preset.alternation(MediaCategory::GameplayScreen),
        Alternation::On
    );
    assert_eq!(preset.preferred_number(MediaCategory::TitleScreen), None);
    assert!(preset.size_policy().is_noop());
}

#[test]
fn test_skipped_categories() {
    let mut preset = Preset::default();
    preset.title.media_types = Some(vec![]);
    preset.gameplay.media_types = Some(vec!["Screenshot - Gameplay".into(), "Skip".into()]);
    assert!(preset.media_types(MediaCategory::FrontBoxart).is_some());
    assert!(preset.media_types(MediaCategory::TitleScreen).is_none());
    assert!(preset.media_types(MediaCategory::GameplayScreen).is_none());
}

#[test]
fn test_bonus_discs_preset() {
    let preset = find_preset(&PresetFile::default(), "Bonus-Discs").unwrap();
    assert_eq!(preset.format, Some(ImageFormat::Png));
    assert_eq!(preset.preferred_number(MediaCategory::TitleScreen), Some(2));
    assert_eq!(preset.preferred_number(MediaCategory::FrontBoxart), None);
    assert_eq!(preset.alternation(MediaCategory::FrontBoxart), Alternation::On);
    assert_eq!(preset.height, SizeChange::Downscale(720));
    assert_eq!(preset.save.level(), 9);
}

#[test]
fn test_compression_level_clamped() {
    let low = SaveParams {
        optimize: false,
        compression_level: -3,
    };
    let high = SaveParams {
        optimize: false,
        compression_level: 42,
    };
    assert_eq!(low.level(), 1);
    assert_eq!(high.level(), 9);
    assert_eq!(SaveParams::default().level(), 6);
}

#[test]
fn test_preset_file_created_with_builtins() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config/presets.toml");

    let created = PresetFile::load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(created.presets, builtin_presets());

    let reloaded = PresetFile::load_from(&path).unwrap();
    assert_eq!(reloaded, created);
}

#[test]
fn test_partial_user_preset_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("presets.toml");
    std::fs::write(
        &path,
        r#"
[[preset]]
name = "mine"
regions = ["Europe"]
format = "jpeg"

[preset.gameplay]
alternate = "random"

[preset.width]
mode = "by-percent"
value = 50.0
"#,
    )
    .unwrap();

    let file = PresetFile::load_from(&path).unwrap();
    let preset = find_preset(&file, "MINE").unwrap();
    assert_eq!(preset.regions, vec!["Europe".to_string()]);
    assert_eq!(preset.format, Some(ImageFormat::Jpg));
    assert_eq!(preset.width, SizeChange::ByPercent(50.0));
    assert_eq!(preset.height, SizeChange::NoChange);
    assert!(preset.keep_aspect_ratio);
    assert_eq!(
        preset.alternation(MediaCategory::GameplayScreen),
        Alternation::Random
    );
    assert!(preset.media_types(MediaCategory::TitleScreen).is_some());
}

#[test]
fn test_invalid_preset_file_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("presets.toml");
    std::fs::write(&path, "[[preset]]\nname = 5\n").unwrap();
    assert!(matches!(
        PresetFile::load_from(&path),
        Err(ThumbsError::Config(_))
    ));
}

#[test]
fn test_user_presets_override_builtins() {
    let user = PresetFile {
        presets: vec![
            Preset {
                name: "Japan".into(),
                description: "mine".into(),
                ..Preset::default()
            },
            Preset {
                name: "extra".into(),
                ..Preset::default()
            },
        ],
    };
    let presets = available_presets(&user);
    assert_eq!(presets.len(), builtin_presets().len() + 1);
    let japan = presets.iter().find(|p| p.name == "Japan").unwrap();
    assert_eq!(japan.description, "mine");
    assert_eq!(presets.last().unwrap().name, "extra");
}

#[test]
fn test_unknown_preset_is_not_found() {
    assert!(matches!(
        find_preset(&PresetFile::default(), "nope"),
        Err(ThumbsError::NotFound(_))
    ));
}

#[test]
fn test_run_config_regions() {
    let japan = find_preset(&PresetFile::default(), "japan").unwrap();
    let config = RunConfig::new(japan, &GlobalOptions::default());
    assert_eq!(config.regions.priority[0], "Japan");
    assert!(!config.regions.detected_regions_only);

    let options = GlobalOptions {
        detected_regions_only: true,
        always_prioritize_region_free: true,
        ..GlobalOptions::default()
    };
    let config = RunConfig::new(Preset::default(), &options);
    assert_eq!(config.regions.priority[0], retro_thumbs_core::REGION_FREE);
    assert!(config.regions.detected_regions_only);
    assert!(config.regions.always_prioritize_region_free);
}

#[test]
fn test_run_config_platform_overrides() {
    let mut options = GlobalOptions::default();
    options
        .platforms
        .insert("My Console".into(), vec!["Homebrew - Console".into()]);
    let config = RunConfig::new(Preset::default(), &options);
    assert!(config.platforms.accepts("My Console", "Homebrew - Console"));
    assert!(config.platforms.get("Sony Playstation").is_some());
}

#[test]
fn test_game_file_extensions() {
    let options = GlobalOptions {
        game_extensions: vec![".ISO".into(), "chd".into()],
        ..GlobalOptions::default()
    };
    let config = RunConfig::new(Preset::default(), &options);
    assert!(config.is_game_file(Path::new("/roms/Game (USA).iso")));
    assert!(config.is_game_file(Path::new("/roms/Game (USA).CHD")));
    assert!(!config.is_game_file(Path::new("/roms/readme.txt")));
    assert!(!config.is_game_file(Path::new("/roms/noext")));

    let defaults = RunConfig::new(Preset::default(), &GlobalOptions::default());
    assert!(defaults.is_game_file(Path::new("/roms/Tetris (World).gb")));
    assert!(defaults.is_game_file(Path::new("/roms/FF7.m3u")));
}
