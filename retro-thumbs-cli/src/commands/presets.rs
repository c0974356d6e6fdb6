use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_thumbs_core::MediaCategory;
use retro_thumbs_lib::settings::presets_path;
use retro_thumbs_lib::{Preset, available_presets, builtin_presets};

use crate::commands::{load_presets, load_settings};

pub(crate) fn run_presets() {
    let settings = load_settings();
    let user = load_presets();
    let active = settings.preset_name();
    let builtins = builtin_presets();

    log::info!("Presets ({}):", presets_path().display());
    log::info!("");
    for preset in available_presets(&user) {
        let is_active = preset.name.eq_ignore_ascii_case(active);
        let edited = builtins
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(&preset.name))
            .is_none_or(|b| *b != preset);

        log::info!(
            "{} {}{}",
            if is_active {
                format!("{}", "\u{2714}".if_supports_color(Stdout, |t| t.green()))
            } else {
                " ".to_string()
            },
            preset.name.if_supports_color(Stdout, |t| t.bold()),
            if edited {
                format!(" {}", "(user)".if_supports_color(Stdout, |t| t.cyan()))
            } else {
                String::new()
            },
        );
        if !preset.description.is_empty() {
            log::info!("    {}", preset.description);
        }
        log::info!("    {}", category_line(&preset));
    }
}

fn category_line(preset: &Preset) -> String {
    MediaCategory::ALL
        .iter()
        .map(|&category| match preset.media_types(category) {
            Some(types) if types.len() > 1 => {
                format!("{}: {} (+{})", category, types[0], types.len() - 1)
            }
            Some(types) => format!("{}: {}", category, types.join(", ")),
            None => format!("{}: skip", category),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
