// Copyright 2022-2023 Andrew D. Straw.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT
// or http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::ids::IdFmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions reported by the parser and by [crate::ListClient]
/// implementations.
///
/// "Not enough data yet" is never an error; it is reported as a short
/// (possibly zero) byte count from [crate::ListParser::parse].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no length marker within the first {max_len} bytes of a header field")]
    InvalidHeaderField { max_len: usize },
    #[error("expected root element {expected}, found {found}")]
    UnexpectedRoot { expected: IdFmt, found: IdFmt },
    #[error("element {0} is not a registered list")]
    UnknownList(IdFmt),
    #[error("element {id} is not a valid child of {parent}")]
    UnexpectedElement { id: IdFmt, parent: IdFmt },
    #[error("list {id} has level {level} but would open at level {expected}")]
    LevelMismatch { id: IdFmt, level: u8, expected: usize },
    #[error("element {0} may not have an unknown size")]
    UnknownSizeNotAllowed(IdFmt),
    #[error("element {id} ({size} bytes) does not fit in the {remaining} bytes left in {parent}")]
    BudgetExceeded {
        id: IdFmt,
        parent: IdFmt,
        size: u64,
        remaining: u64,
    },
    #[error("unsigned integer payload of {0} bytes")]
    InvalidUIntWidth(usize),
    #[error("unsigned integer {0} does not fit in i64")]
    UIntOverflow(u64),
    #[error("float payload of {0} bytes")]
    InvalidFloatWidth(usize),
    #[error("invalid date payload of {0} bytes")]
    InvalidDate(usize),
    #[error("no handler for element {0}")]
    UnhandledElement(IdFmt),
    #[error("list {0} was accepted but no client was supplied for its children")]
    MissingChildClient(IdFmt),
    #[error("client rejected element {id}: {reason}")]
    Client { id: IdFmt, reason: String },
    #[error("parser is in the error state")]
    Poisoned,
    #[error("parsing of the root list is complete")]
    ParsingComplete,
}

impl Error {
    /// Convenience constructor for [ListClient](crate::ListClient)
    /// implementations that reject an element.
    pub fn client<S: Into<String>>(id: u32, reason: S) -> Self {
        Error::Client {
            id: IdFmt(id),
            reason: reason.into(),
        }
    }
}
