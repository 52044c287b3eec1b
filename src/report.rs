//! Report Module
//! Plain text and JSON output of a category summary.

use crate::dashboard::CategorySummary;
use std::fmt::{self, Write};

pub const TITLE: &str = "Přehled cen pohonných hmot";
pub const HEADER: &str = "Ceny pohonných hmot podle typu paliva";

/// Output format of the command line front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render the summary the way the dashboard lays it out: title, yearly
/// series, then the lowest and highest price with their year.
pub fn render_text(summary: &CategorySummary) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{HEADER}: {}", summary.category)?;
    writeln!(out)?;
    writeln!(out, "{:<6} {:>10}", "Rok", "Cena")?;
    for row in &summary.series {
        writeln!(out, "{:<6} {:>10.2}", row.year, row.price)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Nejnižší cena paliva ({}): {:.2} Kč ({})",
        summary.category,
        summary.min_price(),
        summary.min_year()
    )?;
    writeln!(
        out,
        "Nejvyšší cena paliva ({}): {:.2} Kč ({})",
        summary.category,
        summary.max_price(),
        summary.max_year()
    )?;
    Ok(out)
}

pub fn render_json(summary: &CategorySummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

pub fn render_categories(categories: &[String]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for category in categories {
        writeln!(out, "{category}")?;
    }
    Ok(out)
}
