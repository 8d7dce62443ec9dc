//! CLI styling utilities
//!
//! Provides semantic styling via the [`Stylize`] trait with automatic
//! terminal color support detection (delegated to `owo-colors`), plus the
//! `#`-framed milestone banner the CI logs are grepped for.
//!
//! # Usage
//!
//! ```ignore
//! use crate::cli::style::banner;
//!
//! banner("Beginning Chrome");
//! ```

use std::fmt::{self, Display};

use owo_colors::{OwoColorize, Stream, Style};

const EMPHASIS: Style = Style::new().bold();

/// A value with semantic styling applied.
///
/// Implements [`Display`] to render with ANSI codes when supported.
/// Color support detection is handled by `owo-colors` (respects `NO_COLOR`,
/// `CLICOLOR`, `CLICOLOR_FORCE`, and TTY detection).
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Single point where color detection + rendering happens.
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

/// Extension trait for semantic terminal styling.
///
/// Automatically implemented for all [`Display`] types. Methods take `&self`
/// to avoid moving the value, allowing styling of borrowed data.
pub trait Stylize: Display {
    /// Emphasis style (bold) for headers and milestones.
    fn emphasis(&self) -> Styled<&Self> {
        Styled {
            value: self,
            style: EMPHASIS,
            stream: Stream::Stdout,
        }
    }
}

// Blanket implementation for all Display types
impl<T: Display + ?Sized> Stylize for T {}

/// Render a milestone banner.
///
/// The frame width tracks the phrase so the banner stays readable in raw
/// CI logs.
pub fn banner_lines(phrase: &str) -> [String; 3] {
    let bar = "#".repeat(phrase.chars().count() + 4);
    [bar.clone(), format!("### {phrase}"), bar]
}

/// Print a milestone banner to stdout, followed by a blank line.
pub fn banner(phrase: &str) {
    let [top, middle, bottom] = banner_lines(phrase);
    println!("{top}");
    println!("{}", middle.emphasis());
    println!("{bottom}");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_frame_tracks_phrase_width() {
        let [top, middle, bottom] = banner_lines("Beginning Chrome");
        assert_eq!(top, "#".repeat(20));
        assert_eq!(middle, "### Beginning Chrome");
        assert_eq!(bottom, top);
    }

    #[test]
    fn test_banner_counts_chars_not_bytes() {
        let [top, ..] = banner_lines("🎉 done 🎉");
        assert_eq!(top.chars().count(), "🎉 done 🎉".chars().count() + 4);
    }
}
