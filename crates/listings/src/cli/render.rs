use chrono::{DateTime, Utc};
use colored::Colorize;
use listingsapp::commands::{CmdMessage, MessageLevel};
use listingsapp::filters::label::format_number;
use listingsapp::filters::FilterChip;
use listingsapp::model::{ContactInfo, ListingDetails, ListingPage};
use listingsapp::session::{PanelStatus, WidgetState};
use listingsapp::widgets::WidgetView;
use serde_json::Value;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PRICE_WIDTH: usize = 12;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_location(location: &str) {
    println!("{} {}", "url:".dimmed(), location);
}

pub(super) fn print_chips(chips: &[FilterChip]) {
    if chips.is_empty() {
        return;
    }
    let labels: Vec<String> = chips
        .iter()
        .map(|c| format!("[{}]", c.label).cyan().to_string())
        .collect();
    println!("{}", labels.join(" "));
}

pub(super) fn print_listings(page: &ListingPage) {
    if page.data.is_empty() {
        println!("No listings found.");
        return;
    }

    for listing in &page.data {
        let id = format!("{}  ", listing.id);
        let price = listing
            .price
            .map(format_number)
            .unwrap_or_else(|| "-".to_string());
        let price = format!("{:>width$}  ", price, width = PRICE_WIDTH);
        let time_ago = format_time_ago(listing.created_at);

        let fixed = id.width() + price.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let title = truncate_to_width(&listing.title, available);
        let padding = available.saturating_sub(title.width());

        println!(
            "{}{}{}{}{}",
            id.yellow(),
            price.bold(),
            title,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }

    println!(
        "{}",
        format!(
            "page {} of {} ({} listings)",
            page.page,
            page.total_pages.max(1),
            page.total
        )
        .dimmed()
    );
}

pub(super) fn print_details(details: &ListingDetails) {
    let listing = &details.listing;
    println!("{} {}", listing.id.to_string().yellow(), listing.title.bold());
    println!("--------------------------------");
    if let Some(price) = listing.price {
        println!("price: {}", format_number(price));
    }
    for (code, value) in &listing.attributes {
        println!("{}: {}", code, display_json(value));
    }
    if let Some(description) = &listing.description {
        println!();
        println!("{}", description);
    }
    println!();
    println!("{}", listing.external_url().underline());
    println!();
    print_contact_lines(&details.details);
}

pub(super) fn print_contact_lines(contact: &ContactInfo) {
    let field = |label: &str, value: &Option<String>| {
        let shown = value.as_deref().unwrap_or("-");
        println!("{} {}", format!("{}:", label).dimmed(), shown);
    };
    field("author", &contact.author_name);
    field("phone", &contact.author_phone);
    field("notes", &contact.notes);
}

pub(super) fn print_panel(panel: &PanelStatus) {
    for widget in &panel.widgets {
        print_widget(widget);
    }
    if panel.has_unsaved_changes {
        println!("{}", "pending changes not applied".yellow());
    }
}

fn print_widget(widget: &WidgetState) {
    println!("{}", widget.name.bold());
    match &widget.view {
        WidgetView::Range {
            min_text,
            max_text,
            min_placeholder,
            max_placeholder,
        } => {
            let min = or_placeholder(min_text, *min_placeholder);
            let max = or_placeholder(max_text, *max_placeholder);
            println!("  {} - {}", min, max);
        }
        WidgetView::Select { options, .. } => {
            for option in options {
                let mark = if option.selected { "[x]" } else { "[ ]" };
                let line = format!("  {} {}", mark, option.value);
                if option.available {
                    println!("{}", line);
                } else {
                    println!("{}", line.dimmed());
                }
            }
        }
        WidgetView::Toggle { state, .. } => {
            let shown = match state {
                Some(true) => "yes",
                Some(false) => "no",
                None => "any",
            };
            println!("  {}", shown);
        }
        WidgetView::DateRange { from, to } => {
            println!(
                "  {} - {}",
                from.as_deref().unwrap_or("…"),
                to.as_deref().unwrap_or("…")
            );
        }
    }
}

fn or_placeholder(text: &str, placeholder: f64) -> String {
    if text.is_empty() {
        format_number(placeholder).dimmed().to_string()
    } else {
        text.to_string()
    }
}

fn display_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
