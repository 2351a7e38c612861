//! `ct-output`: line writers for rust_ct reports.
//!
//! Two backends are provided:
//!
//! | Backend          | Destination                                         |
//! |------------------|-----------------------------------------------------|
//! | `TextFileWriter` | One buffered text file, one report line per row     |
//! | `MemoryWriter`   | A `Vec<String>`; used by tests and for inspection   |
//!
//! Both implement [`LineWriter`], the only seam a report needs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ct_output::{LineWriter, TextFileWriter};
//!
//! let mut w = TextFileWriter::create(Path::new("reports/contacts.txt"))?;
//! w.write_line("10;1;2;10;5;5;7;9")?;
//! w.finish()?;
//! ```

pub mod error;
pub mod memory;
pub mod text;
pub mod writer;


pub use error::{OutputError, OutputResult};
pub use memory::MemoryWriter;
pub use text::TextFileWriter;
pub use writer::LineWriter;
