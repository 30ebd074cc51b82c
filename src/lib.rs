//! ISA Bitprobe - Black-Box Instruction Bit-Layout Discovery
//!
//! This library reverse-engineers the physical bit positions of every
//! architecturally meaningful unit of an instruction word for ISAs that
//! are described only as opaque encode functions: format-selector bits,
//! per-slot opcode identity bits, and per-operand field bits.
//!
//! # How it works
//!
//! The engine never inspects an encoder. It relies on one assumption:
//! every encoding transform is a pure bit permutation, moving individual
//! bits without mixing or computing them. Under that assumption, setting
//! exactly one bit of an abstract field value must surface as exactly
//! one bit of the instruction word, so probing value bits one at a time
//! recovers the full permutation. This holds empirically for existing
//! binutils-style ISA overlays; an encoder that mixes bits is detected
//! and reported rather than mis-described.
//!
//! # Quick Start
//!
//! ```rust
//! use isa_bitprobe::{description::sample, discover, report};
//!
//! fn main() -> isa_bitprobe::Result<()> {
//!     let desc = sample::demo_core();
//!     let catalog = discover(&desc)?;
//!     let json = report::to_json_string(&catalog)?;
//!     println!("{json}");
//!     Ok(())
//! }
//! ```
//!
//! # Supplying a description
//!
//! An [`description::IsaDescription`] is a read-only bundle of six
//! tables: formats, slots, opcodes, instruction classes, operands and
//! register files. Encode, placement and field-setter operations are
//! plain closures; see [`description::sample`] for a complete worked
//! example.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod description;
pub mod discovery;
pub mod error;
pub mod insnbuf;
pub mod layout;
pub mod report;

pub use discovery::discover;
pub use error::{ProbeError, Result};
pub use insnbuf::{bits_to_mask, InsnBuf, MAX_INSN_BITS};
pub use layout::{ArgLayout, Catalog, OpcodeLayout, Variant};

/// Get version information for this library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
