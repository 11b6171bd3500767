//! Common export size presets.

/// A named export size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePreset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub description: &'static str,
}

const fn preset(name: &'static str, width: u32, height: u32, description: &'static str) -> SizePreset {
    SizePreset {
        name,
        width,
        height,
        description,
    }
}

/// Built-in presets, smallest first.
pub const SIZE_PRESETS: &[SizePreset] = &[
    preset("16x16", 16, 16, "small icon, favicon"),
    preset("32x32", 32, 32, "standard icon"),
    preset("64x64", 64, 64, "medium icon, app icon"),
    preset("128x128", 128, 128, "large icon"),
    preset("256x256", 256, 256, "high-resolution icon, small logo"),
    preset("512x512", 512, 512, "standard logo, promotional image"),
    preset("1024x1024", 1024, 1024, "high-resolution design asset"),
    preset("1200x630", 1200, 630, "social share image (Facebook, Twitter)"),
    preset("1080x1080", 1080, 1080, "Instagram, WeChat Moments"),
    preset("1920x1080", 1920, 1080, "Full HD wallpaper"),
];

/// Look up a preset by name (`1200x630`, case-insensitive, `×` accepted).
pub fn find_preset(name: &str) -> Option<&'static SizePreset> {
    let name = name.trim().to_ascii_lowercase().replace('×', "x");
    SIZE_PRESETS.iter().find(|preset| preset.name == name)
}
