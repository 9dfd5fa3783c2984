//! Mapping quotes to display attributes.
//!
//! Everything here is a pure function of the quote, so repeated renders of
//! unchanged data always produce the same text in the same color.

use ticker_common::Quote;

use super::surface::Color;

/// Percent changes closer to zero than this count as unchanged.
pub const PERCENT_EPSILON: f64 = 0.001;

/// Color class of a rendered quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Market not in its regular session.
    Closed,
    /// Up on the previous close.
    Positive,
    /// Unchanged.
    Neutral,
    /// Down on the previous close.
    Negative,
}

impl Tone {
    /// Foreground color for this tone.
    pub fn color(self) -> Color {
        match self {
            Tone::Closed => Color::DarkGrey,
            Tone::Positive => Color::Green,
            Tone::Neutral => Color::White,
            Tone::Negative => Color::Red,
        }
    }
}

/// Tone of the value column: price against the previous close.
pub fn value_tone(quote: &Quote) -> Tone {
    if !quote.market_open {
        Tone::Closed
    } else if quote.current > quote.previous_close {
        Tone::Positive
    } else if quote.current == quote.previous_close {
        Tone::Neutral
    } else {
        Tone::Negative
    }
}

/// Tone of the percentage column.
pub fn percent_tone(quote: &Quote) -> Tone {
    if !quote.market_open {
        Tone::Closed
    } else if quote.percentage_change > 0.0 {
        Tone::Positive
    } else if quote.percentage_change.abs() < PERCENT_EPSILON {
        Tone::Neutral
    } else {
        Tone::Negative
    }
}

/// Price truncated toward zero, digits grouped in threes with `separator`.
pub fn format_value(current: f64, separator: char) -> String {
    group_thousands(current as i64, separator)
}

/// Signed percent change with one decimal, e.g. `+0.5%`.
pub fn format_percent(percentage_change: f64) -> String {
    format!("{:+.1}%", percentage_change)
}

fn group_thousands(value: i64, separator: char) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    let lead = match digits.len() % 3 {
        0 => 3,
        n => n,
    };
    for (i, digit) in digits.chars().enumerate() {
        if i >= lead && (i - lead) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(current: f64, previous_close: f64, percentage_change: f64) -> Quote {
        Quote::new(current, previous_close, percentage_change, true)
    }

    #[test]
    fn closed_market_wins_over_any_delta() {
        for quote in [
            Quote::new(10.0, 5.0, 100.0, false),
            Quote::new(5.0, 10.0, -50.0, false),
            Quote::new(5.0, 5.0, 0.0, false),
        ] {
            assert_eq!(value_tone(&quote), Tone::Closed);
            assert_eq!(percent_tone(&quote), Tone::Closed);
        }
    }

    #[test]
    fn value_tone_compares_against_previous_close() {
        assert_eq!(value_tone(&open(4500.25, 4480.0, 0.0)), Tone::Positive);
        assert_eq!(value_tone(&open(4480.0, 4480.0, 0.0)), Tone::Neutral);
        assert_eq!(value_tone(&open(4479.99, 4480.0, 0.0)), Tone::Negative);
    }

    #[test]
    fn value_tone_ignores_the_percentage() {
        assert_eq!(value_tone(&open(10.0, 5.0, -3.0)), Tone::Positive);
    }

    #[test]
    fn percent_tone_uses_an_epsilon_for_unchanged() {
        assert_eq!(percent_tone(&open(0.0, 0.0, 0.45)), Tone::Positive);
        assert_eq!(percent_tone(&open(0.0, 0.0, 0.0)), Tone::Neutral);
        assert_eq!(percent_tone(&open(0.0, 0.0, -0.0009)), Tone::Neutral);
        assert_eq!(percent_tone(&open(0.0, 0.0, -0.002)), Tone::Negative);
        assert_eq!(percent_tone(&open(0.0, 0.0, -1.2)), Tone::Negative);
    }

    #[test]
    fn tiny_positive_change_still_reads_positive() {
        assert_eq!(percent_tone(&open(0.0, 0.0, 0.0005)), Tone::Positive);
    }

    #[test]
    fn values_are_truncated_and_grouped() {
        assert_eq!(format_value(4500.25, ','), "4,500");
        assert_eq!(format_value(15999.99, ','), "15,999");
        assert_eq!(format_value(34123.0, '.'), "34.123");
        assert_eq!(format_value(999.9, ','), "999");
        assert_eq!(format_value(1_234_567.0, ','), "1,234,567");
        assert_eq!(format_value(0.0, ','), "0");
        assert_eq!(format_value(-1234.5, ','), "-1,234");
    }

    #[test]
    fn percentages_carry_sign_and_one_decimal() {
        assert_eq!(format_percent(0.45), "+0.5%");
        assert_eq!(format_percent(-1.26), "-1.3%");
        assert_eq!(format_percent(0.0), "+0.0%");
        assert_eq!(format_percent(12.0), "+12.0%");
    }

    #[test]
    fn tones_map_to_the_palette() {
        assert_eq!(Tone::Closed.color(), Color::DarkGrey);
        assert_eq!(Tone::Positive.color(), Color::Green);
        assert_eq!(Tone::Neutral.color(), Color::White);
        assert_eq!(Tone::Negative.color(), Color::Red);
    }
}
