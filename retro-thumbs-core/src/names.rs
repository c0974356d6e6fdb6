//! File-name normalization for both applications' image naming schemes.

/// Characters LaunchBox replaces with `_` when naming image files after a
/// game title. Single quotes are legal in file names but LaunchBox still
/// replaces them.
const LAUNCHBOX_ILLEGAL: &[char] = &['*', '\\', '|', ':', '\'', '"', '<', '>', '/', '?'];

/// Characters RetroArch replaces with `_` when looking up a thumbnail by
/// playlist label.
const RETROARCH_ILLEGAL: &[char] = &['&', '*', '/', ':', '`', '<', '>', '?', '\\', '|', '"'];

/// The stem LaunchBox uses for a title's image files.
pub fn launchbox_image_stem(title: &str) -> String {
    title.replace(LAUNCHBOX_ILLEGAL, "_")
}

/// The PNG file name RetroArch looks for, given a playlist label.
pub fn thumbnail_file_name(label: &str) -> String {
    format!("{}.png", label.replace(RETROARCH_ILLEGAL, "_"))
}
