//! Code table sidecar artifact.
//!
//! One line per symbol in ascending order: the symbol as three zero-padded
//! decimal digits, a `:` delimiter, then the code tokens.
//!
//! ```text
//! 010:0
//! 032:10
//! 065:11
//! ```
//!
//! The symbol never appears as a raw byte, so whitespace and control bytes
//! round-trip like any other value.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::code_table::CodeTable;
use crate::error::{HuffError, Result};

const DELIMITER: u8 = b':';
const SYMBOL_WIDTH: usize = 3;

pub fn save<W: Write>(table: &CodeTable, writer: &mut W) -> io::Result<()> {
    for (symbol, code) in table.iter() {
        writeln!(writer, "{:03}:{}", symbol, code)?;
    }
    Ok(())
}

/// Reads every entry. Zero entries is not an error here; see [`load_from_path`].
pub fn load<R: Read>(reader: R) -> Result<CodeTable> {
    let mut table = CodeTable::new();
    let mut seen_codes = HashSet::new();
    let mut line_no = 0;

    for line in BufReader::new(reader).split(b'\n') {
        line_no += 1;
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.is_empty() {
            continue;
        }

        let (symbol, code) = parse_line(&line, line_no)?;
        if !seen_codes.insert(code.clone()) {
            return Err(HuffError::malformed_table(line_no, format!("duplicate code {}", code)));
        }
        if table.insert(symbol, code).is_some() {
            return Err(HuffError::malformed_table(line_no, format!("duplicate symbol {}", symbol)));
        }
    }

    // a code shadowed by a shorter one would never decode
    if !table.is_prefix_free() {
        return Err(HuffError::malformed_table(line_no, "codes are not prefix-free"));
    }

    Ok(table)
}

fn parse_line(line: &[u8], line_no: usize) -> Result<(u8, String)> {
    if line.len() < SYMBOL_WIDTH + 2 {
        return Err(HuffError::malformed_table(line_no, "line too short"));
    }
    let (symbol_field, rest) = line.split_at(SYMBOL_WIDTH);

    if !symbol_field.iter().all(u8::is_ascii_digit) {
        return Err(HuffError::malformed_table(line_no, "symbol field is not three digits"));
    }
    let symbol = symbol_field
        .iter()
        .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0'));
    let symbol = u8::try_from(symbol)
        .map_err(|_| HuffError::malformed_table(line_no, format!("symbol {} out of range", symbol)))?;

    if rest[0] != DELIMITER {
        return Err(HuffError::malformed_table(line_no, "missing ':' after symbol"));
    }
    let code = &rest[1..];
    if !code.iter().all(|&b| b == b'0' || b == b'1') {
        return Err(HuffError::malformed_table(line_no, "code contains tokens other than 0 and 1"));
    }

    // only '0' and '1' remain, always valid UTF-8
    let code = String::from_utf8_lossy(code).into_owned();
    Ok((symbol, code))
}

pub fn save_to_path(table: &CodeTable, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    save(table, &mut writer)?;
    writer.flush()?;
    log::debug!("wrote {} code table entries to {}", table.len(), path.display());
    Ok(())
}

/// Loads a sidecar, failing with [`HuffError::TableNotFound`] when the file
/// is missing or holds no entries.
pub fn load_from_path(path: &Path) -> Result<CodeTable> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(HuffError::table_not_found(path)),
        Err(e) => return Err(e.into()),
    };

    let table = load(file)?;
    if table.is_empty() {
        return Err(HuffError::table_not_found(path));
    }
    log::debug!("loaded {} code table entries from {}", table.len(), path.display());
    Ok(table)
}
