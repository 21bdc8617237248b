//! Code 128 encoder
//!
//! Printable ASCII is encoded in code set B. Runs of four or more digits are
//! packed two per symbol in code set C. Every symbol value maps to a fixed
//! pattern of three bars and three spaces, eleven modules wide; the stop
//! pattern has an extra terminating bar and is thirteen modules wide.

use crate::{BarcodeError, Result};

/// Bar/space widths for symbol values 0..=106, bars first
pub(crate) const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212",
    "221213", "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221",
    "223211", "221132", "221231", "213212", "223112", "312131", "311222", "321122", "321221",
    "312212", "322112", "322211", "212123", "212321", "232121", "111323", "131123", "131321",
    "112313", "132113", "132311", "211313", "231113", "231311", "112133", "112331", "132131",
    "113123", "113321", "133121", "313121", "211331", "231131", "213113", "213311", "213131",
    "311123", "311321", "331121", "312113", "312311", "332111", "314111", "221411", "431111",
    "111224", "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111", "111242",
    "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311",
    "113141", "114131", "311141", "411131", "211412", "211214", "211232", "2331112",
];

pub const START_A: u8 = 103;
pub const START_B: u8 = 104;
pub const START_C: u8 = 105;
pub const STOP: u8 = 106;

/// Switch to code set C (from A or B)
pub const CODE_C: u8 = 99;
/// Switch to code set B (from A or C); FNC4 in set B
pub const CODE_B: u8 = 100;
/// Switch to code set A (from B or C); FNC4 in set A
pub const CODE_A: u8 = 101;
/// Read the next symbol in the other of sets A and B
pub const SHIFT: u8 = 98;
pub const FNC1: u8 = 102;

/// Modules per data symbol
pub const SYMBOL_MODULES: usize = 11;
/// Modules in the stop pattern
pub const STOP_MODULES: usize = 13;

/// Shortest digit run worth switching to code set C
const MIN_DIGIT_RUN: usize = 4;

/// Code 128 character sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    A,
    B,
    C,
}

/// An encoded Code 128 symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    data: String,
    /// Start, data, checksum and stop values in order
    values: Vec<u8>,
}

impl Symbol {
    /// Build a symbol from a start value and data values, appending the
    /// checksum and stop values
    pub fn from_data_values(start: u8, data_values: &[u8], data: impl Into<String>) -> Self {
        let mut values = Vec::with_capacity(data_values.len() + 3);
        values.push(start);
        values.extend_from_slice(data_values);
        values.push(checksum(&values));
        values.push(STOP);
        Self {
            data: data.into(),
            values,
        }
    }

    /// The text this symbol encodes
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Every symbol value, start and stop included
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn checksum(&self) -> u8 {
        self.values[self.values.len() - 2]
    }

    /// Alternating bar/space widths in modules, starting with a bar
    pub fn widths(&self) -> Vec<u8> {
        self.values
            .iter()
            .flat_map(|v| PATTERNS[*v as usize].bytes().map(|b| b - b'0'))
            .collect()
    }

    /// One entry per module, `true` for a bar
    pub fn modules(&self) -> Vec<bool> {
        let mut modules = Vec::with_capacity(self.module_count());
        for (i, width) in self.widths().into_iter().enumerate() {
            let bar = i % 2 == 0;
            modules.extend(std::iter::repeat(bar).take(width as usize));
        }
        modules
    }

    /// Width of the symbol in modules, without quiet zones
    pub fn module_count(&self) -> usize {
        (self.values.len() - 1) * SYMBOL_MODULES + STOP_MODULES
    }
}

/// Weighted modulo-103 checksum over the start and data values
pub fn checksum(values: &[u8]) -> u8 {
    let sum: u32 = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i.max(1) as u32) * (*v as u32))
        .sum();
    (sum % 103) as u8
}

/// Encode printable ASCII text as a Code 128 symbol
pub fn encode(text: &str) -> Result<Symbol> {
    if text.is_empty() {
        return Err(BarcodeError::Empty);
    }
    if let Some((position, ch)) = text
        .chars()
        .enumerate()
        .find(|(_, ch)| !(' '..='~').contains(ch))
    {
        return Err(BarcodeError::UnsupportedCharacter { ch, position });
    }

    // Every character is ASCII from here on
    let bytes = text.as_bytes();
    let mut values = Vec::with_capacity(bytes.len() + 2);
    let mut i = 0;

    let mut set = if digit_run(bytes, 0) >= MIN_DIGIT_RUN {
        CodeSet::C
    } else {
        CodeSet::B
    };
    let start = match set {
        CodeSet::C => START_C,
        _ => START_B,
    };

    while i < bytes.len() {
        match set {
            CodeSet::C => {
                let run = digit_run(bytes, i);
                let pairs = run / 2;
                for _ in 0..pairs {
                    values.push((bytes[i] - b'0') * 10 + (bytes[i + 1] - b'0'));
                    i += 2;
                }
                if i < bytes.len() {
                    values.push(CODE_B);
                    set = CodeSet::B;
                }
            }
            _ => {
                if digit_run(bytes, i) >= MIN_DIGIT_RUN {
                    values.push(CODE_C);
                    set = CodeSet::C;
                    continue;
                }
                values.push(bytes[i] - 32);
                i += 1;
            }
        }
    }

    Ok(Symbol::from_data_values(start, &values, text))
}

/// Number of consecutive ASCII digits starting at `from`
fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
}
