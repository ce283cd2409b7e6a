//! Card palettes for the light and dark themes.

use colored::Color;
use routefind_core::Theme;

/// Colors used by the text renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Card index numbers.
    pub index: Color,
    /// Route path.
    pub path: Color,
    /// Absolute URL.
    pub url: Color,
    /// Page title.
    pub title: Color,
    /// `[external]` tag.
    pub tag: Color,
    /// Descriptions and hints.
    pub muted: Color,
}

impl Palette {
    /// Palette for a resolved theme. `System` is treated as dark.
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                index: Color::Blue,
                path: Color::Blue,
                url: Color::BrightBlack,
                title: Color::Black,
                tag: Color::Magenta,
                muted: Color::BrightBlack,
            },
            Theme::Dark | Theme::System => Self {
                index: Color::BrightBlue,
                path: Color::BrightCyan,
                url: Color::BrightBlack,
                title: Color::White,
                tag: Color::BrightMagenta,
                muted: Color::BrightBlack,
            },
        }
    }

    /// Resolve `theme` against the terminal and pick its palette.
    #[must_use]
    pub fn detect(theme: Theme) -> Self {
        let colorfgbg = std::env::var("COLORFGBG").ok();
        Self::for_theme(theme.resolve(colorfgbg.as_deref()))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_and_dark_differ() {
        assert_ne!(Palette::for_theme(Theme::Light), Palette::for_theme(Theme::Dark));
    }

    #[test]
    fn test_system_falls_back_to_dark() {
        assert_eq!(Palette::for_theme(Theme::System), Palette::default());
    }
}
