//! Physical units, display formatting and the per-unit "nice step" tables
//! consumed by axis tick generation.

use serde::{Deserialize, Serialize};

/// How a unit renders values into axis/cursor labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStyle {
    /// SI-prefixed decimal formatting (`1.5K`, `20m`, `3u`, ...).
    Si,
    /// Time formatting; `custom_format` renders `1d 2h 3m 4s` components
    /// instead of SI prefixes for values >= 1 second.
    Time { custom_format: bool },
}

/// A physical unit with its display symbol, precision and nice-step table.
///
/// The step table is ascending and seeds dynamic-axis tick subdivision; the
/// finest entry also bounds the smallest zoomable window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    name: String,
    symbol: String,
    steps: Vec<f64>,
    precision: i32,
    style: UnitStyle,
}

const SUB_SECOND_STEPS: [f64; 12] = [
    1e-12, 1e-11, 1e-10, 1e-9, 1e-8, 1e-7, 1e-6, 1e-5, 1e-4, 1e-3, 1e-2, 1e-1,
];

impl Unit {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        steps: Vec<f64>,
        precision: i32,
        style: UnitStyle,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            steps,
            precision,
            style,
        }
    }

    #[must_use]
    pub fn time() -> Self {
        let mut steps = SUB_SECOND_STEPS.to_vec();
        steps.extend([
            1.0,
            10.0,
            60.0,
            10.0 * 60.0,
            60.0 * 60.0,
            24.0 * 60.0 * 60.0,
            7.0 * 24.0 * 60.0 * 60.0,
            30.0 * 24.0 * 60.0 * 60.0,
            365.0 * 24.0 * 60.0 * 60.0,
        ]);
        Self::new(
            "time",
            "s",
            steps,
            12,
            UnitStyle::Time {
                custom_format: true,
            },
        )
    }

    /// Time unit that formats with plain SI prefixes (axis labels in data
    /// viewers use this; the `d/h/m/s` form is for cursors and legends).
    #[must_use]
    pub fn time_si() -> Self {
        let mut unit = Self::time();
        unit.style = UnitStyle::Time {
            custom_format: false,
        };
        unit
    }

    #[must_use]
    pub fn voltage() -> Self {
        Self::new("voltage", "V", half_decade_steps(), 12, UnitStyle::Si)
    }

    #[must_use]
    pub fn current() -> Self {
        let mut steps = half_decade_steps();
        // The current table skips 50 between 10 and 100.
        steps.retain(|step| *step != 50.0);
        Self::new("current", "A", steps, 12, UnitStyle::Si)
    }

    #[must_use]
    pub fn power() -> Self {
        let mut steps = half_decade_steps();
        steps.retain(|step| *step != 50.0);
        Self::new("power", "W", steps, 12, UnitStyle::Si)
    }

    #[must_use]
    pub fn joule() -> Self {
        let mut steps = half_decade_steps();
        steps.retain(|step| *step != 50.0);
        Self::new("joule", "J", steps, 12, UnitStyle::Si)
    }

    #[must_use]
    pub fn frequency() -> Self {
        Self::new("frequency", "Hz", decade_steps(1e10), 12, UnitStyle::Si)
    }

    #[must_use]
    pub fn sampling_rate() -> Self {
        Self::new(
            "sampling rate",
            "S/s",
            decade_steps(1e12),
            12,
            UnitStyle::Si,
        )
    }

    #[must_use]
    pub fn decibel() -> Self {
        Self::new("decibel", "dB", decade_steps(1e12), 12, UnitStyle::Si)
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::new("unknown", "", half_decade_steps(), 12, UnitStyle::Si)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn steps(&self) -> &[f64] {
        &self.steps
    }

    #[must_use]
    pub fn precision(&self) -> i32 {
        self.precision
    }

    /// Rounds at the unit's display precision.
    #[must_use]
    pub fn round_value(&self, value: f64) -> f64 {
        round_number(value, self.precision)
    }

    /// Formats a value at the unit's own precision.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        self.format_value_with_precision(value, self.precision)
    }

    /// Formats a value rounded to `precision` decimal digits, selecting an SI
    /// prefix (or `d/h/m/s` components for custom-format time units).
    #[must_use]
    pub fn format_value_with_precision(&self, value: f64, precision: i32) -> String {
        let value = round_number(value, precision);

        if let UnitStyle::Time {
            custom_format: true,
        } = self.style
        {
            return self.format_time_components(value);
        }

        let is_time = matches!(self.style, UnitStyle::Time { .. });
        if value == 0.0 {
            return "0".to_owned();
        }

        // K/M/G prefixes make no sense for seconds.
        if !is_time {
            if value.abs() >= 1e9 {
                return self.with_prefix(round_number(value / 1e9, self.precision - 9), "G");
            }
            if value.abs() >= 1e6 {
                return self.with_prefix(round_number(value / 1e6, self.precision - 6), "M");
            }
            if value.abs() >= 1e3 {
                return self.with_prefix(round_number(value / 1e3, self.precision - 3), "K");
            }
        }

        if self.precision >= 12 && value.abs() < 1e-9 {
            return self.with_prefix(round_number(value * 1e12, self.precision - 12), "p");
        }
        if self.precision >= 9 && value.abs() < 1e-6 {
            return self.with_prefix(round_number(value * 1e9, self.precision - 9), "n");
        }
        if self.precision >= 6 && value.abs() < 1e-3 {
            return self.with_prefix(round_number(value * 1e6, self.precision - 6), "u");
        }
        if self.precision >= 3 && value.abs() < 1.0 {
            return self.with_prefix(round_number(value * 1e3, self.precision - 3), "m");
        }

        self.with_prefix(value, "")
    }

    /// Parses a formatted value back into a number.
    ///
    /// Accepts SI-prefixed forms (`"2.5mV"`), the bare symbol (`"10V"`), plain
    /// numbers, and `d/h/m/s` component syntax for custom-format time units.
    #[must_use]
    pub fn parse_value(&self, text: &str) -> Option<f64> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return None;
        }

        let is_time = matches!(self.style, UnitStyle::Time { .. });
        let prefixes: &[(&str, f64)] = if is_time {
            &[("p", 1e-12), ("n", 1e-9), ("u", 1e-6), ("m", 1e-3)]
        } else {
            &[
                ("p", 1e-12),
                ("n", 1e-9),
                ("u", 1e-6),
                ("m", 1e-3),
                ("K", 1e3),
                ("M", 1e6),
                ("G", 1e9),
            ]
        };

        let mut numeric = compact.as_str();
        let mut factor = 1.0;
        for (prefix, prefix_factor) in prefixes {
            let suffix = format!("{prefix}{}", self.symbol);
            if let Some(stripped) = numeric.strip_suffix(suffix.as_str()) {
                numeric = stripped;
                factor = *prefix_factor;
                break;
            }
        }
        if factor == 1.0 && !self.symbol.is_empty() {
            if let Some(stripped) = numeric.strip_suffix(self.symbol.as_str()) {
                numeric = stripped;
            }
        }

        if let Some(value) = parse_strict_float(numeric) {
            return Some(value * factor);
        }

        if let UnitStyle::Time {
            custom_format: true,
        } = self.style
        {
            return parse_time_components(text);
        }

        None
    }

    fn with_prefix(&self, rounded: f64, prefix: &str) -> String {
        if rounded == 0.0 {
            return "0".to_owned();
        }
        format!("{rounded}{prefix}{}", self.symbol)
    }

    fn format_time_components(&self, value: f64) -> String {
        if value == 0.0 {
            return "0".to_owned();
        }

        if self.precision >= 12 && value.abs() < 1e-9 {
            return format!("{}ps", round_number(value * 1e12, self.precision - 12));
        }
        if self.precision >= 9 && value.abs() < 1e-6 {
            return format!("{}ns", round_number(value * 1e9, self.precision - 9));
        }
        if self.precision >= 6 && value.abs() < 1e-3 {
            return format!("{}us", round_number(value * 1e6, self.precision - 6));
        }
        if self.precision >= 3 && value.abs() < 1.0 {
            return format!("{}ms", round_number(value * 1e3, self.precision - 3));
        }

        let (sign, mut rest) = if value < 0.0 {
            ("-", -value)
        } else {
            ("", value)
        };

        let mut result = String::new();

        let days = (rest / (24.0 * 60.0 * 60.0)).floor();
        if days >= 1.0 {
            result.push_str(&format!("{days}d"));
            rest -= days * 24.0 * 60.0 * 60.0;
        }

        let hours = (rest / (60.0 * 60.0)).floor();
        if hours >= 1.0 {
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(&format!("{hours}h"));
            rest -= hours * 60.0 * 60.0;
        }

        let minutes = (rest / 60.0).floor();
        if minutes >= 1.0 {
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(&format!("{minutes}m"));
            rest -= minutes * 60.0;
        }

        let seconds = round_number(rest, self.precision);
        if seconds > 0.0 {
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(&format!("{seconds}s"));
        } else if result.is_empty() {
            return "0".to_owned();
        }

        format!("{sign}{result}")
    }
}

/// Rounds to `digits` decimal places (negative digit counts clamp to zero).
#[must_use]
pub fn round_number(value: f64, digits: i32) -> f64 {
    let digits = digits.max(0).min(15);
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

fn parse_strict_float(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    // Reject forms like "inf"/"NaN" that `f64::from_str` would accept.
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_time_components(text: &str) -> Option<f64> {
    const SUFFIXES: [(char, f64); 4] = [
        ('d', 24.0 * 60.0 * 60.0),
        ('h', 60.0 * 60.0),
        ('m', 60.0),
        ('s', 1.0),
    ];

    let mut result = 0.0;
    let mut suffix_index = 0;
    let mut matched_any = false;

    for part in text.split_whitespace() {
        let part = part.to_ascii_lowercase();
        let mut matched = false;
        while suffix_index < SUFFIXES.len() {
            let (suffix, seconds) = SUFFIXES[suffix_index];
            suffix_index += 1;
            if let Some(number) = part.strip_suffix(suffix) {
                result += parse_strict_float(number)? * seconds;
                matched = true;
                matched_any = true;
                break;
            }
        }
        if !matched {
            return None;
        }
    }

    matched_any.then_some(result)
}

fn half_decade_steps() -> Vec<f64> {
    let mut steps = SUB_SECOND_STEPS.to_vec();
    // Half-decade refinements in the hand-adjusted mid band.
    steps.extend([0.005, 0.05, 0.5, 1.0, 5.0, 10.0, 50.0, 100.0]);
    steps.extend(decade_tail(1e3, 1e10));
    steps.sort_by(|a, b| a.total_cmp(b));
    steps.dedup();
    steps
}

fn decade_steps(max: f64) -> Vec<f64> {
    let mut steps = SUB_SECOND_STEPS.to_vec();
    steps.push(1.0);
    steps.extend(decade_tail(10.0, max));
    steps
}

fn decade_tail(from: f64, to: f64) -> Vec<f64> {
    let mut steps = Vec::new();
    let mut step = from;
    while step <= to * 1.5 {
        steps.push(step);
        step *= 10.0;
    }
    steps
}
