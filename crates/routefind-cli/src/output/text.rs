//! Text output formatting

use colored::Colorize;
use routefind_core::{FailureKind, Notice, NoticeLevel, Route};

use super::formatter::{HintStyle, RouteListing};
use super::theme::Palette;
use crate::utils::formatting::{terminal_width, truncate_to_width};

const CARD_INDENT: &str = "     ";
const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Human-readable rendering of listings, failures and notices.
pub struct TextFormatter;

impl TextFormatter {
    /// Route cards for one page, followed by a summary and pagination hints
    pub fn render_page(listing: &RouteListing<'_>, palette: &Palette, hint: HintStyle) -> String {
        let view = &listing.view;
        let width = terminal_width()
            .unwrap_or(DEFAULT_TERMINAL_WIDTH)
            .saturating_sub(CARD_INDENT.len());

        let cards: Vec<String> = view
            .items
            .iter()
            .enumerate()
            .map(|(offset, route)| render_card(view.start_index + offset + 1, route, palette, width))
            .collect();

        let mut out = cards.join("\n\n");
        if !view.items.is_empty() {
            out.push('\n');
        }

        let first = if view.items.is_empty() { 0 } else { view.start_index + 1 };
        let last = view.start_index + view.items.len();
        out.push_str(&format!(
            "\n→ Showing {}-{} of {} routes for {} (page {}/{})\n",
            first,
            last,
            view.total_items.to_string().green(),
            listing.source_url,
            view.page,
            view.total_pages
        ));

        let tips = pagination_hints(view.page, view.has_previous(), view.has_next(), hint);
        if !tips.is_empty() {
            out.push_str(&format!("  {}\n", tips.join(", ").color(palette.muted)));
        }
        out
    }

    /// Error banner, or the "No Routes Found" panel for empty results
    pub fn render_failure(kind: FailureKind, message: &str) -> String {
        match kind {
            FailureKind::NoRoutes => format!(
                "{}\n  {}\n",
                "No Routes Found".yellow().bold(),
                message
            ),
            FailureKind::Configuration | FailureKind::Authentication | FailureKind::Transport => {
                format!("{} {}\n  {}\n", "✗".red(), "Error".red().bold(), message)
            },
        }
    }

    /// One-line toast; informational notices render dimmed
    pub fn render_notice(notice: &Notice, palette: &Palette) -> String {
        match notice.level {
            NoticeLevel::Info => notice.message.color(palette.muted).to_string(),
            NoticeLevel::Success => format!("{} {}", "✓".green(), notice.message),
            NoticeLevel::Error => format!("{} {}", "✗".red(), notice.message),
        }
    }
}

fn render_card(number: usize, route: &Route, palette: &Palette, width: usize) -> String {
    let mut header = format!(
        "{} {}",
        format!("{number:>3}.").color(palette.index),
        route.path.color(palette.path).bold()
    );
    if route.is_external {
        header.push_str(&format!("  {}", "[external]".color(palette.tag)));
    }

    let mut lines = vec![header, format!("{CARD_INDENT}{}", route.url.color(palette.url))];
    if let Some(title) = route.title.as_deref().filter(|t| !t.trim().is_empty()) {
        lines.push(format!(
            "{CARD_INDENT}{}",
            truncate_to_width(title.trim(), width).color(palette.title)
        ));
    }
    if let Some(description) = route.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(format!(
            "{CARD_INDENT}{}",
            truncate_to_width(description.trim(), width).color(palette.muted)
        ));
    }
    lines.join("\n")
}

fn pagination_hints(page: usize, has_previous: bool, has_next: bool, style: HintStyle) -> Vec<String> {
    let mut tips = Vec::new();
    match style {
        HintStyle::Flags => {
            if has_next {
                tips.push(format!("Tip: see more with \"--page {}\"", page + 1));
            }
            if has_previous {
                tips.push(format!("\"--page {}\" goes back", page - 1));
            }
        },
        HintStyle::Commands => {
            if has_next {
                tips.push("Tip: \":next\" for more".to_string());
            }
            if has_previous {
                tips.push("\":prev\" goes back".to_string());
            }
        },
    }
    tips
}
