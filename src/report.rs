use once_cell::sync::Lazy;
use regex::Regex;
use sheetwright::{ActionEconomy, ActivityRow, Context, DASH, EconomyBucket, FilterConfig, FilterForm, Row};

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

mod ansi {
    const RESET: &str = "\x1b[0m";

    /// What a span of report text is, rather than its color.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Style {
        Title,
        Rule,
        Name,
        Good,
        Warn,
        Roll,
        Accent,
        Muted,
    }

    impl Style {
        fn sgr(self) -> &'static str {
            match self {
                Style::Title => "\x1b[1;36m",
                Style::Rule => "\x1b[90m",
                Style::Name => "\x1b[1;32m",
                Style::Good => "\x1b[32m",
                Style::Warn => "\x1b[33m",
                Style::Roll => "\x1b[34m",
                Style::Accent => "\x1b[36m",
                Style::Muted => "\x1b[2m",
            }
        }
    }

    /// Plain text when color is off.
    pub struct Palette(pub bool);

    impl Palette {
        pub fn paint(&self, text: impl AsRef<str>, style: Style) -> String {
            let text = text.as_ref();
            if self.0 { format!("{}{text}{RESET}", style.sgr()) } else { text.to_string() }
        }
    }
}

use ansi::{Palette, Style};

pub fn print_economy(ctx: &Context<'_>, filters: &FilterConfig, economy: &ActionEconomy, color: bool) {
    let palette = Palette(color);
    println!("\n{}", palette.paint(format!("⚔  {}", ctx.localize("ACTION_SHEET.Title")), Style::Title));

    println!("\n{}", palette.paint(format!("━━━ {} ━━━", FilterForm::title(ctx)), Style::Rule));
    print_filters(ctx, filters, &palette);

    for bucket in EconomyBucket::ALL {
        let rows = economy.bucket(bucket);
        let heading = format!("━━━ {} ({}) ━━━", ctx.localize(bucket_key(bucket)), rows.len());
        println!("\n{}", palette.paint(heading, Style::Rule));
        if rows.is_empty() {
            println!("{}", palette.paint(format!("  {}", ctx.localize("ACTION_SHEET.Empty")), Style::Muted));
            continue;
        }
        for row in rows {
            print_row(row, &palette);
        }
    }

    let stats = &economy.stats;
    println!("\n{}", palette.paint("━━━ Build ━━━", Style::Rule));
    println!(
        "  Items: {}  │  Rows: {}  │  No activation: {}  │  Filtered: {}  │  Duplicates: {}",
        palette.paint(stats.considered.to_string(), Style::Good),
        palette.paint(economy.total().to_string(), Style::Good),
        palette.paint(stats.without_bucket.to_string(), Style::Muted),
        palette.paint(stats.filtered.to_string(), Style::Muted),
        palette.paint(stats.duplicates.to_string(), Style::Muted),
    );
    if stats.enrich_failures > 0 {
        println!(
            "  {}",
            palette.paint(format!("⚠ {} description(s) shown unenriched", stats.enrich_failures), Style::Warn)
        );
    }
    println!("  Elapsed: {}", palette.paint(format!("{:?}", stats.elapsed), Style::Accent));
    println!();
}

fn bucket_key(bucket: EconomyBucket) -> &'static str {
    match bucket {
        EconomyBucket::Action => "ACTION_SHEET.Action",
        EconomyBucket::Bonus => "ACTION_SHEET.BonusAction",
        EconomyBucket::Reaction => "ACTION_SHEET.Reaction",
    }
}

fn print_filters(ctx: &Context<'_>, filters: &FilterConfig, palette: &Palette) {
    let form = FilterForm::open(filters);
    for field in form.fields(ctx) {
        let mark = if field.checked { palette.paint("✓", Style::Good) } else { palette.paint("✗", Style::Muted) };
        let label = if field.disabled { palette.paint(&field.label, Style::Muted) } else { field.label.clone() };
        println!("  {} {} {}", mark, label, palette.paint(format!("({})", field.name), Style::Muted));
    }
}

fn print_row(row: &Row, palette: &Palette) {
    println!(
        "  {} {} {}",
        palette.paint(&row.name, Style::Name),
        palette.paint("│ uses:", Style::Muted),
        palette.paint(&row.uses, Style::Warn),
    );
    println!(
        "      {} {}  {} {}",
        palette.paint("roll:", Style::Muted),
        palette.paint(&row.roll_text, Style::Roll),
        palette.paint("│ dmg:", Style::Muted),
        palette.paint(damage_summary(row), Style::Accent),
    );
    println!(
        "      {} {}  {} {}",
        palette.paint("range:", Style::Muted),
        row.range,
        palette.paint("│ target:", Style::Muted),
        row.target,
    );
    for activity in &row.activities {
        print_activity(activity, palette);
    }
}

fn print_activity(activity: &ActivityRow, palette: &Palette) {
    let mut caps = Vec::new();
    if activity.has_use {
        caps.push("use");
    }
    if activity.has_roll_attack {
        caps.push("attack");
    }
    if activity.has_roll_damage {
        caps.push("damage");
    }
    println!(
        "      {} {} {} {} {}",
        palette.paint("↳", Style::Rule),
        activity.name,
        palette.paint(format!("[{}]", activity.time_short), Style::Roll),
        palette.paint(format!("uses {}", activity.uses_text), Style::Muted),
        palette.paint(caps.join(","), Style::Muted),
    );
}

/// Plain damage text: the label text when present, else the markup with tags
/// stripped.
fn damage_summary(row: &Row) -> String {
    if !row.dmg_text.is_empty() && row.dmg_text != DASH {
        return row.dmg_text.clone();
    }
    let text = TAG.replace_all(&row.dmg_html, " ");
    let text = SPACES.replace_all(text.trim(), " ");
    if text.is_empty() { DASH.to_string() } else { text.into_owned() }
}
