//! Utility functions for formatting metric output

use colored::Colorize;

/// Format a percentage with up to 2 meaningful decimal places (strips trailing zeros)
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}", value)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a count together with its share of the total, the share in dimmed color
///
/// Returns a formatted string like "12 (27.5%)"
pub fn format_share(count: usize, share_percent: f64) -> String {
    format!(
        "{} {}",
        count,
        format!("({}%)", format_percentage(share_percent)).truecolor(150, 150, 150)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_drop_trailing_zeros() {
        assert_eq!(format_percentage(50.0), "50");
        assert_eq!(format_percentage(12.5), "12.5");
        assert_eq!(format_percentage(33.333), "33.33");
    }
}
