use console::style;
use std::fmt::Display;

/// Magenta bold — hearts, the big romantic beats
pub fn heart<D: Display>(text: D) -> String {
    style(text).magenta().bold().to_string()
}

/// White bold — section headers, titles
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim — subtitles, secondary text, decorative lines
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Green bold — success checkmarks, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// Red bold — the denied flash and the lockout countdown
pub fn denied<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Yellow — warnings, the evading button's taunts
pub fn taunt<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Cyan — scene captions, field labels
pub fn scene<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}

/// Cyan underlined — URLs, links
pub fn url<D: Display>(text: D) -> String {
    style(text).cyan().underlined().to_string()
}
