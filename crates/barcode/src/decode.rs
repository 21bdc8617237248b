//! Code 128 reader
//!
//! Used to verify generated symbols. Works on symbol values, module runs, or
//! a scanned grayscale raster.

use crate::code128::{
    checksum, CodeSet, CODE_A, CODE_B, CODE_C, FNC1, PATTERNS, SHIFT, START_A, START_B, START_C,
    STOP,
};
use crate::raster::Raster;
use crate::{BarcodeError, Result};

/// Pixels darker than this count as bar
const DARK_THRESHOLD: u8 = 128;

fn malformed(msg: impl Into<String>) -> BarcodeError {
    BarcodeError::MalformedSymbol(msg.into())
}

/// Decode a complete value sequence (start, data, checksum, stop)
pub fn decode_values(values: &[u8]) -> Result<String> {
    if values.len() < 3 {
        return Err(malformed("symbol too short"));
    }
    if values[values.len() - 1] != STOP {
        return Err(malformed("missing stop pattern"));
    }

    let body = &values[..values.len() - 2];
    let found = values[values.len() - 2];
    let expected = checksum(body);
    if expected != found {
        return Err(BarcodeError::ChecksumMismatch { expected, found });
    }

    let mut set = match body[0] {
        START_A => CodeSet::A,
        START_B => CodeSet::B,
        START_C => CodeSet::C,
        other => return Err(malformed(format!("invalid start value {}", other))),
    };

    let mut text = String::new();
    let mut shifted = false;
    for &value in &body[1..] {
        // A shift applies to exactly one symbol
        let active = if shifted {
            shifted = false;
            match set {
                CodeSet::A => CodeSet::B,
                _ => CodeSet::A,
            }
        } else {
            set
        };

        match active {
            CodeSet::C => match value {
                0..=99 => text.push_str(&format!("{:02}", value)),
                CODE_B => set = CodeSet::B,
                CODE_A => set = CodeSet::A,
                FNC1 => {}
                _ => return Err(malformed(format!("invalid value {} in code set C", value))),
            },
            CodeSet::B => match value {
                0..=95 => text.push((value + 32) as char),
                SHIFT => shifted = true,
                CODE_C => set = CodeSet::C,
                CODE_A => set = CodeSet::A,
                // FNC1..FNC4 carry no text
                96 | 97 | CODE_B | FNC1 => {}
                _ => return Err(malformed(format!("invalid value {} in code set B", value))),
            },
            CodeSet::A => match value {
                0..=63 => text.push((value + 32) as char),
                64..=95 => text.push((value - 64) as char),
                SHIFT => shifted = true,
                CODE_C => set = CodeSet::C,
                CODE_B => set = CodeSet::B,
                96 | 97 | CODE_A | FNC1 => {}
                _ => return Err(malformed(format!("invalid value {} in code set A", value))),
            },
        }
    }

    Ok(text)
}

/// Decode a module sequence, `true` for a bar. Leading and trailing quiet
/// zones are ignored.
pub fn decode_modules(modules: &[bool]) -> Result<String> {
    let runs = runs(modules.iter().copied());
    decode_runs(&runs)
}

/// Decode the middle row of a raster
pub fn decode_raster(raster: &Raster) -> Result<String> {
    let row = raster
        .row(raster.height / 2)
        .ok_or_else(|| BarcodeError::InvalidRaster("raster has no rows".to_string()))?;
    let runs = runs(row.iter().map(|p| *p < DARK_THRESHOLD));
    decode_runs(&runs)
}

/// Run lengths from the first bar to the last bar
fn runs(cells: impl Iterator<Item = bool>) -> Vec<usize> {
    let mut runs: Vec<usize> = Vec::new();
    let mut current: Option<bool> = None;
    for bar in cells {
        match current {
            Some(c) if c == bar => {
                if let Some(last) = runs.last_mut() {
                    *last += 1;
                }
            }
            _ => {
                // Skip the leading quiet zone
                if current.is_none() && !bar {
                    continue;
                }
                runs.push(1);
                current = Some(bar);
            }
        }
    }
    // Drop the trailing quiet zone
    if current == Some(false) {
        runs.pop();
    }
    runs
}

fn decode_runs(runs: &[usize]) -> Result<String> {
    if runs.len() < 13 || (runs.len() - 7) % 6 != 0 {
        return Err(malformed(format!("unexpected bar count {}", runs.len())));
    }

    let symbols = (runs.len() - 7) / 6;
    let modules = symbols * 11 + 13;
    let total: usize = runs.iter().sum();
    let unit = total as f64 / modules as f64;

    let widths: Vec<u8> = runs
        .iter()
        .map(|r| (*r as f64 / unit).round().clamp(1.0, 4.0) as u8)
        .collect();

    let mut values = Vec::with_capacity(symbols + 1);
    for chunk in widths[..symbols * 6].chunks(6) {
        values.push(lookup(chunk)?);
    }
    if lookup(&widths[symbols * 6..])? != STOP {
        return Err(malformed("missing stop pattern"));
    }
    values.push(STOP);

    decode_values(&values)
}

fn lookup(widths: &[u8]) -> Result<u8> {
    let key: String = widths.iter().map(|w| (b'0' + w) as char).collect();
    PATTERNS
        .iter()
        .position(|p| *p == key)
        .map(|v| v as u8)
        .ok_or_else(|| malformed(format!("unknown pattern {}", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code128::{encode, Symbol};
    use crate::raster::{rasterize, RasterOptions};
    use proptest::prelude::*;

    #[test]
    fn test_invoice_number_round_trip() {
        let symbol = encode("INV-0001").unwrap();
        assert_eq!(decode_values(symbol.values()).unwrap(), "INV-0001");
        assert_eq!(decode_modules(&symbol.modules()).unwrap(), "INV-0001");

        let raster = rasterize(&symbol, &RasterOptions::default()).unwrap();
        assert_eq!(decode_raster(&raster).unwrap(), "INV-0001");
    }

    #[test]
    fn test_checksum_mismatch() {
        let symbol = encode("AB").unwrap();
        let mut values = symbol.values().to_vec();
        values[1] += 1;
        assert!(matches!(
            decode_values(&values),
            Err(BarcodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_set_a_and_shift() {
        // Start A, 'A', CR (77), SHIFT, 'a' read in B (65)
        let symbol = Symbol::from_data_values(START_A, &[33, 77, SHIFT, 65, 34], "");
        assert_eq!(decode_values(symbol.values()).unwrap(), "A\raB");
    }

    #[test]
    fn test_code_switches() {
        // Start C, "12", to B, 'x', to C, "34", to A, 'Q'
        let symbol =
            Symbol::from_data_values(START_C, &[12, CODE_B, 88, CODE_C, 34, CODE_A, 49], "");
        assert_eq!(decode_values(symbol.values()).unwrap(), "12x34Q");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(decode_values(&[START_B]).is_err());
        assert!(decode_values(&[START_B, 33, 10]).is_err());
        assert!(decode_modules(&[true, false, true]).is_err());
        assert!(decode_modules(&[]).is_err());
    }

    #[test]
    fn test_wide_modules_and_quiet_zone() {
        let symbol = encode("LAB-2024-00017").unwrap();
        let options = RasterOptions::default()
            .with_module_width(5)
            .with_quiet_zone(3)
            .with_height(7);
        let raster = rasterize(&symbol, &options).unwrap();
        assert_eq!(decode_raster(&raster).unwrap(), "LAB-2024-00017");
    }

    proptest! {
        #[test]
        fn prop_printable_ascii_round_trip(text in "[ -~]{1,40}", scale in 1u32..4) {
            let symbol = encode(&text).unwrap();
            let raster = rasterize(&symbol, &RasterOptions::default().with_module_width(scale)).unwrap();
            prop_assert_eq!(decode_raster(&raster).unwrap(), text);
        }
    }
}
