//! Number base, ASCII and microcontroller clock arithmetic

use crate::error::{EmbedLinkError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Radix understood by the base converter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Dec,
    Hex,
    Bin,
}

impl Radix {
    fn value(&self) -> u32 {
        match self {
            Radix::Dec => 10,
            Radix::Hex => 16,
            Radix::Bin => 2,
        }
    }
}

impl FromStr for Radix {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dec" | "decimal" | "10" => Ok(Radix::Dec),
            "hex" | "hexadecimal" | "16" => Ok(Radix::Hex),
            "bin" | "binary" | "2" => Ok(Radix::Bin),
            _ => Err(format!(
                "Invalid base: '{}'. Valid bases are: dec, hex, bin",
                s
            )),
        }
    }
}

/// The same number rendered in all three bases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseConversion {
    pub dec: String,
    pub hex: String,
    pub bin: String,
}

/// Convert `input` given in `from` into decimal, upper-case hex and binary.
/// A `0x`/`0b` prefix is accepted for hex/binary input.
pub fn convert_base(input: &str, from: Radix) -> Result<BaseConversion> {
    let trimmed = input.trim();
    let digits = match from {
        Radix::Hex => trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed),
        Radix::Bin => trimmed
            .strip_prefix("0b")
            .or_else(|| trimmed.strip_prefix("0B"))
            .unwrap_or(trimmed),
        Radix::Dec => trimmed,
    };

    let value = i128::from_str_radix(digits, from.value()).map_err(|_| {
        EmbedLinkError::InvalidInput(format!("'{}' is not a valid base-{} number", input, from.value()))
    })?;

    let (sign, magnitude) = if value < 0 { ("-", value.unsigned_abs()) } else { ("", value as u128) };
    Ok(BaseConversion {
        dec: value.to_string(),
        hex: format!("{}{:X}", sign, magnitude),
        bin: format!("{}{:b}", sign, magnitude),
    })
}

/// Text to space-separated two-digit upper-case hex codes.
pub fn text_to_hex(text: &str) -> String {
    text.chars()
        .map(|c| format!("{:02X}", c as u32))
        .collect::<Vec<_>>()
        .join(" ")
}

fn whitespace_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Hex byte string back to text. Whitespace is ignored; an odd digit count
/// is rejected as incomplete; pairs that are not hex are skipped.
pub fn hex_to_text(hex: &str) -> Result<String> {
    let clean: Vec<char> = whitespace_regex().replace_all(hex, "").chars().collect();
    if clean.len() % 2 != 0 {
        return Err(EmbedLinkError::InvalidInput(
            "Incomplete hex input: expected an even number of digits".to_string(),
        ));
    }

    let out = clean
        .chunks(2)
        .filter_map(|pair| u8::from_str_radix(&pair.iter().collect::<String>(), 16).ok())
        .map(char::from)
        .collect();
    Ok(out)
}

/// UART baud-rate divider for 16x oversampling
#[derive(Debug, Clone, PartialEq)]
pub struct BaudResult {
    pub divider: f64,
    pub mantissa: u64,
    pub fraction: u64,
    pub actual_baud: f64,
    pub error_percent: f64,
}

impl fmt::Display for BaudResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "USARTDIV = {:.4} (mantissa {}, fraction {})\nActual baud = {:.0}\nError = {:.2}%",
            self.divider, self.mantissa, self.fraction, self.actual_baud, self.error_percent
        )
    }
}

/// `pclk_mhz` peripheral clock in MHz, `baud` target rate.
pub fn calculate_baud(pclk_mhz: f64, baud: f64) -> Result<BaudResult> {
    if !(pclk_mhz > 0.0) || !(baud > 0.0) {
        return Err(EmbedLinkError::InvalidInput(
            "Clock and baud rate must be positive".to_string(),
        ));
    }
    let f = pclk_mhz * 1_000_000.0;
    let divider = f / (16.0 * baud);
    let mantissa = divider.floor();
    if mantissa < 1.0 {
        return Err(EmbedLinkError::InvalidInput(format!(
            "USARTDIV {:.4} is below 1: {} baud is too fast for a {} MHz clock",
            divider, baud, pclk_mhz
        )));
    }
    let fraction = ((divider - mantissa) * 16.0).round();
    let actual_baud = f / (16.0 * (mantissa + fraction / 16.0));
    let error_percent = (actual_baud - baud) / baud * 100.0;

    Ok(BaudResult {
        divider,
        mantissa: mantissa as u64,
        fraction: fraction as u64,
        actual_baud,
        error_percent,
    })
}

/// Timer update event rate for a prescaler/auto-reload pair
#[derive(Debug, Clone, PartialEq)]
pub struct TimerResult {
    pub frequency_hz: f64,
    pub period_s: f64,
}

impl TimerResult {
    pub fn frequency_display(&self) -> String {
        if self.frequency_hz < 1000.0 {
            format!("{:.2} Hz", self.frequency_hz)
        } else {
            format!("{:.2} KHz", self.frequency_hz / 1000.0)
        }
    }

    pub fn period_display(&self) -> String {
        if self.period_s < 0.001 {
            format!("{:.2} us", self.period_s * 1_000_000.0)
        } else {
            format!("{:.2} ms", self.period_s * 1000.0)
        }
    }
}

/// `prescaler` and `period` are the register values (PSC, ARR); the
/// hardware divides by value + 1.
pub fn calculate_timer(clock_mhz: f64, prescaler: u32, period: u32) -> Result<TimerResult> {
    if !(clock_mhz > 0.0) {
        return Err(EmbedLinkError::InvalidInput(
            "Timer clock must be positive".to_string(),
        ));
    }
    let f = clock_mhz * 1_000_000.0;
    let psc = prescaler as f64 + 1.0;
    let arr = period as f64 + 1.0;
    let frequency_hz = f / (psc * arr);

    Ok(TimerResult {
        frequency_hz,
        period_s: 1.0 / frequency_hz,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_from_each_base() {
        let expected = BaseConversion {
            dec: "1024".into(),
            hex: "400".into(),
            bin: "10000000000".into(),
        };
        assert_eq!(convert_base("1024", Radix::Dec).unwrap(), expected);
        assert_eq!(convert_base("0x400", Radix::Hex).unwrap(), expected);
        assert_eq!(convert_base("10000000000", Radix::Bin).unwrap(), expected);
    }

    #[test]
    fn test_hex_output_is_upper_case() {
        assert_eq!(convert_base("255", Radix::Dec).unwrap().hex, "FF");
        assert_eq!(convert_base("ff", Radix::Hex).unwrap().dec, "255");
    }

    #[test]
    fn test_invalid_digits_rejected() {
        assert!(convert_base("102", Radix::Bin).is_err());
        assert!(convert_base("xyz", Radix::Hex).is_err());
        assert!(convert_base("", Radix::Dec).is_err());
    }

    #[test]
    fn test_text_hex_both_ways() {
        assert_eq!(text_to_hex("Hello"), "48 65 6C 6C 6F");
        assert_eq!(hex_to_text("48 65 6C 6C 6F").unwrap(), "Hello");
        assert_eq!(hex_to_text("4865\n6C6C6F").unwrap(), "Hello");
    }

    #[test]
    fn test_hex_to_text_odd_length() {
        assert!(hex_to_text("48 6").is_err());
    }

    #[test]
    fn test_hex_to_text_skips_bad_pairs() {
        assert_eq!(hex_to_text("48 ZZ 69").unwrap(), "Hi");
    }

    #[test]
    fn test_hex_to_text_counts_characters_not_bytes() {
        assert_eq!(hex_to_text("4é").unwrap(), "");
        assert_eq!(hex_to_text("48 é9 69").unwrap(), "Hi");
        assert!(hex_to_text("48é").is_err());
    }

    #[test]
    fn test_baud_72mhz_115200() {
        let r = calculate_baud(72.0, 115200.0).unwrap();
        assert!((r.divider - 39.0625).abs() < 1e-9);
        assert_eq!(r.mantissa, 39);
        assert_eq!(r.fraction, 1);
        assert!(r.error_percent.abs() < 1e-9);
    }

    #[test]
    fn test_baud_with_error() {
        let r = calculate_baud(8.0, 115200.0).unwrap();
        // 8e6 / (16 * 115200) = 4.3403, fraction round(5.44) = 5
        assert_eq!(r.mantissa, 4);
        assert_eq!(r.fraction, 5);
        assert_eq!(format!("{:.2}", r.error_percent), "0.64");
    }

    #[test]
    fn test_baud_rejects_zero() {
        assert!(calculate_baud(0.0, 9600.0).is_err());
        assert!(calculate_baud(72.0, 0.0).is_err());
    }

    #[test]
    fn test_baud_divider_below_one_rejected() {
        match calculate_baud(1.0, 3_000_000.0) {
            Err(EmbedLinkError::InvalidInput(msg)) => assert!(msg.contains("below 1")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert_eq!(calculate_baud(16.0, 1_000_000.0).unwrap().mantissa, 1);
    }

    #[test]
    fn test_timer_1khz() {
        let r = calculate_timer(72.0, 71, 999).unwrap();
        assert!((r.frequency_hz - 1000.0).abs() < 1e-9);
        assert_eq!(r.frequency_display(), "1.00 KHz");
        assert_eq!(r.period_display(), "1.00 ms");
    }

    #[test]
    fn test_timer_slow_and_fast_units() {
        let slow = calculate_timer(72.0, 7199, 9999).unwrap();
        assert_eq!(slow.frequency_display(), "1.00 Hz");
        assert_eq!(slow.period_display(), "1000.00 ms");

        let fast = calculate_timer(72.0, 0, 71).unwrap();
        assert_eq!(fast.frequency_display(), "1000.00 KHz");
        assert_eq!(fast.period_display(), "1.00 us");
    }
}
