//! Light and dark palettes selected by the session's dark-mode flag

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub accent: &'static str,
    pub alert: &'static str,
}

pub const LIGHT: Palette = Palette {
    name: "light",
    background: "#ffffff",
    foreground: "#1f2933",
    accent: "#2563eb",
    alert: "#dc2626",
};

pub const DARK: Palette = Palette {
    name: "dark",
    background: "#111827",
    foreground: "#e5e7eb",
    accent: "#60a5fa",
    alert: "#f87171",
};

impl Palette {
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            DARK
        } else {
            LIGHT
        }
    }
}
