//! Utility functions

use crate::types::Unit;
use std::path::PathBuf;

/// Get the application data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("metrix")
}

/// Format a number for display: integers without a fractional part,
/// everything else rounded to at most 6 decimals with trailing zeros removed.
pub fn format_number(num: f64) -> String {
    if num.is_nan() {
        return "NaN".to_string();
    }
    if num.is_infinite() {
        return if num > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if num.abs() >= 1e21 {
        return format!("{:e}", num).replacen('e', "e+", 1);
    }
    if num.fract() == 0.0 {
        return normalize_zero(format!("{}", num));
    }

    let fixed = to_fixed_6(num);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    normalize_zero(trimmed.to_string())
}

/// Six-decimal rendering where an exact halfway value rounds away from zero.
/// `{:.6}` alone breaks ties to even.
fn to_fixed_6(num: f64) -> String {
    // 1074 fractional digits represent any f64 exactly
    let exact = format!("{:.1074}", num.abs());
    let Some((int_part, frac)) = exact.split_once('.') else {
        return format!("{:.6}", num);
    };
    let rest = &frac[6..];
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{:.6}", num);
    }

    let mut digits: Vec<u8> = int_part.bytes().chain(frac[..6].bytes()).collect();
    let mut carry = true;
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            carry = false;
            break;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let split = digits.len() - 6;
    let mut out = String::with_capacity(digits.len() + 2);
    if num < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|&b| b as char));
    out.push('.');
    out.extend(digits[split..].iter().map(|&b| b as char));
    out
}

fn normalize_zero(s: String) -> String {
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Resolve a unit code to its display name, falling back to the code itself
pub fn unit_display_name(units: &[Unit], code: &str) -> String {
    units
        .iter()
        .find(|u| u.code == code)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| code.to_string())
}
