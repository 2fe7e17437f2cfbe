// Copyright 2022-2023 Andrew D. Straw.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT
// or http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Incremental parser for the EBML lists of WebM and Matroska files.
//!
//! A [ListParser] is created for one top-level list (typically the EBML
//! header or the Segment) and fed bytes as they arrive. Elements are
//! checked against the per-list tables in [registry] and reported to a tree
//! of [ListClient] implementations; nothing is buffered or copied by the
//! parser itself.
//!
//! ```
//! use ebml_list_parser::{ids, ListClient, ListParser, Result};
//!
//! #[derive(Default)]
//! struct DocType(Option<String>);
//!
//! impl ListClient for DocType {
//!     fn on_list_start(&mut self, _id: u32) -> Result<()> {
//!         Ok(())
//!     }
//!     fn child_client(&mut self, _id: u32) -> Option<&mut dyn ListClient> {
//!         Some(self)
//!     }
//!     fn on_list_end(&mut self, _id: u32) -> Result<()> {
//!         Ok(())
//!     }
//!     fn on_string(&mut self, id: u32, val: &str) -> Result<()> {
//!         if id == ids::DOC_TYPE {
//!             self.0 = Some(val.to_string());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! // EBML header containing only DocType "webm".
//! let buf = [0x1A, 0x45, 0xDF, 0xA3, 0x87, 0x42, 0x82, 0x84, b'w', b'e', b'b', b'm'];
//! let mut parser = ListParser::new(ids::EBML_HEADER, DocType::default())?;
//! // Bytes may arrive in arbitrary pieces.
//! let used = parser.parse(&buf[..7])?;
//! let used = used + parser.parse(&buf[used..])?;
//! assert_eq!(used, buf.len());
//! assert!(parser.is_parsing_complete());
//! assert_eq!(parser.client().0.as_deref(), Some("webm"));
//! # Ok::<(), ebml_list_parser::Error>(())
//! ```

pub use client::ListClient;
pub use error::{Error, Result};
pub use header::{
    parse_element_header, read_header_field, ElementHeader, ElementSize, HeaderField,
    MAX_ID_LEN, MAX_SIZE_LEN,
};
pub use ids::IdFmt;
pub use leaf::{decode_date, decode_float, decode_string, decode_uint};
pub use parser::{ListParser, OpenList};
pub use registry::ElementKind;

mod client;
mod error;
mod header;
pub mod ids;
mod leaf;
mod parser;
pub mod registry;
