//! Report emission.
//!
//! The catalog serializes straight into the external JSON schema; this
//! module only chooses the rendition. Besides pretty and compact JSON
//! there is a flat CSV form, one row per (opcode, variant, arg), with
//! the bit lists collapsed to hex masks the way downstream spreadsheet
//! tooling consumes them.

use crate::error::Result;
use crate::insnbuf::bits_to_mask;
use crate::layout::Catalog;
use std::io::Write;

/// CSV column header.
pub const CSV_HEADER: &str =
    "opcode,format,slot,format_bits,opcode_bits,arg,dir,reg,num_regs,flags,field_bits";

/// Render the catalog as pretty-printed JSON.
pub fn to_json_string(catalog: &Catalog) -> Result<String> {
    Ok(serde_json::to_string_pretty(catalog)?)
}

/// Render the catalog as compact single-line JSON.
pub fn to_json_string_compact(catalog: &Catalog) -> Result<String> {
    Ok(serde_json::to_string(catalog)?)
}

/// Write the catalog as JSON to `out`, with a trailing newline.
pub fn emit_json(catalog: &Catalog, out: &mut impl Write, pretty: bool) -> Result<()> {
    let doc = if pretty {
        to_json_string(catalog)?
    } else {
        to_json_string_compact(catalog)?
    };
    writeln!(out, "{doc}")?;
    Ok(())
}

/// Write the catalog as flat CSV to `out`.
///
/// Variants without operands still get one row, with the arg columns
/// empty, so every discovered variant is visible in the flat form.
pub fn emit_csv(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for op in &catalog.opcodes {
        for v in &op.variants {
            let prefix = format!(
                "{},{},{},{:#x},{:#x}",
                op.opcode,
                v.format,
                v.slot,
                bits_to_mask(&v.format_bits),
                bits_to_mask(&v.opcode_bits),
            );
            if v.args.is_empty() {
                writeln!(out, "{prefix},,,,,")?;
                continue;
            }
            for arg in &v.args {
                writeln!(
                    out,
                    "{prefix},{},{},{},{},{},{:#x}",
                    arg.arg,
                    arg.dir,
                    arg.reg,
                    arg.num_regs,
                    arg.flags,
                    bits_to_mask(&arg.field_bits),
                )?;
            }
        }
    }
    Ok(())
}
