use colored::Colorize;
use termkit::{format, markup};

/// Print a formatted value, rendering its markup when color is on
pub fn value(text: &str) {
    println!("{}", styled(text));
}

/// Markup rendered to ANSI or stripped, following the format color flag
pub fn styled(text: &str) -> String {
    if format::color_enabled() {
        markup::render(text)
    } else {
        markup::plain(text)
    }
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

