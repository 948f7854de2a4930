//! Netscape bookmark file format (`<!DOCTYPE NETSCAPE-Bookmark-file-1>`)
//!
//! This is the HTML export/import format every major browser understands.
//! Folders (`<H3>` + nested `<DL>`) are flattened on read; output is always
//! a single flat list.

pub mod parser;
pub mod writer;

pub use parser::parse_file;
pub use writer::write_file;
