// Copyright 2022-2023 Andrew D. Straw.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT
// or http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::client::{client_for, ListClient};
use crate::error::{Error, Result};
use crate::header::{parse_element_header, ElementHeader, ElementSize};
use crate::ids::IdFmt;
use crate::leaf;
use crate::registry::{self, ElementKind, ListElementInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NeedListHeader,
    InsideList,
    DoneParsingList,
    ParseError,
}

/// Bookkeeping for one open list.
#[derive(Debug)]
struct ListState {
    id: u32,
    size: ElementSize,
    /// Bytes of this list's payload accounted for so far.
    bytes_parsed: u64,
    info: &'static ListElementInfo,
}

/// Progress through one open list, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenList {
    pub id: u32,
    /// Declared payload size.
    pub size: ElementSize,
    /// Header bytes of open child lists plus the full size of every
    /// completed child.
    pub bytes_parsed: u64,
}

/// Incremental parser for one list element and everything inside it.
///
/// Bytes are supplied with [ListParser::parse] in chunks of any size; every
/// element found is reported to the [ListClient] tree rooted at the client
/// given to [ListParser::new].
pub struct ListParser<C> {
    state: State,
    root_id: u32,
    root_level: u8,
    root_client: C,
    list_state_stack: Vec<ListState>,
    /// IDs of the open lists, kept alongside `list_state_stack` to address
    /// clients.
    path: Vec<u32>,
}

impl<C: ListClient> ListParser<C> {
    /// Create a parser for the list element `root_id`.
    pub fn new(root_id: u32, root_client: C) -> Result<Self> {
        let root_level = registry::list_level(root_id).ok_or(Error::UnknownList(IdFmt(root_id)))?;
        Ok(Self {
            state: State::NeedListHeader,
            root_id,
            root_level,
            root_client,
            list_state_stack: Vec::new(),
            path: Vec::new(),
        })
    }

    /// Forget all progress and wait for the root element header again.
    pub fn reset(&mut self) {
        self.state = State::NeedListHeader;
        self.list_state_stack.clear();
        self.path.clear();
    }

    /// The root list and all of its children have been parsed.
    pub fn is_parsing_complete(&self) -> bool {
        self.state == State::DoneParsingList
    }

    /// The lists that are currently open, outermost first.
    pub fn open_lists(&self) -> impl ExactSizeIterator<Item = OpenList> + '_ {
        self.list_state_stack.iter().map(|list_state| OpenList {
            id: list_state.id,
            size: list_state.size,
            bytes_parsed: list_state.bytes_parsed,
        })
    }

    pub fn client(&self) -> &C {
        &self.root_client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.root_client
    }

    pub fn into_client(self) -> C {
        self.root_client
    }

    /// Parse as much of `buf` as possible.
    ///
    /// Returns the number of bytes consumed. Fewer bytes than `buf.len()`
    /// (possibly zero) are consumed when the next element is incomplete or
    /// when the root list ended; in the first case call again with the
    /// unconsumed bytes followed by more data.
    ///
    /// Any error is final: later calls fail with [Error::Poisoned] without
    /// looking at their input. Once the root list is complete, later calls
    /// fail with [Error::ParsingComplete].
    pub fn parse(&mut self, buf: &[u8]) -> Result<usize> {
        match self.state {
            State::ParseError => return Err(Error::Poisoned),
            State::DoneParsingList => return Err(Error::ParsingComplete),
            State::NeedListHeader | State::InsideList => {}
        }

        let mut bytes_parsed = 0;
        while bytes_parsed < buf.len() {
            let cur = &buf[bytes_parsed..];
            let result = match parse_element_header(cur) {
                Ok(Some(header)) => match self.state {
                    State::NeedListHeader => self.parse_root_header(&header),
                    State::InsideList => self.parse_list_element(&header, &cur[header.len..]),
                    State::DoneParsingList | State::ParseError => break,
                },
                Ok(None) => Ok(0),
                Err(e) => Err(e),
            };
            match result {
                Ok(0) => break,
                Ok(n) => bytes_parsed += n,
                Err(e) => {
                    tracing::debug!("parse error at offset {bytes_parsed} of chunk: {e}");
                    self.state = State::ParseError;
                    return Err(e);
                }
            }
            if self.state == State::DoneParsingList {
                break;
            }
        }
        Ok(bytes_parsed)
    }

    fn parse_root_header(&mut self, header: &ElementHeader) -> Result<usize> {
        if header.id != self.root_id {
            return Err(Error::UnexpectedRoot {
                expected: IdFmt(self.root_id),
                found: IdFmt(header.id),
            });
        }
        self.state = State::InsideList;
        self.on_list_start(header.id, header.size)?;
        Ok(header.len)
    }

    /// Handle one element inside the innermost open list. Returns the number
    /// of bytes consumed, zero if more data is needed first.
    fn parse_list_element(&mut self, header: &ElementHeader, data: &[u8]) -> Result<usize> {
        let id = header.id;

        // Find the kind of this element. An ID that does not belong in an
        // unknown-size list but does belong to an enclosing context ends
        // that list; the search then continues in the parent.
        let kind = loop {
            let Some(list_state) = self.list_state_stack.last_mut() else {
                // All lists ended.
                return Ok(0);
            };
            if let Some(kind) = registry::find_id_kind(id, list_state.info) {
                break kind;
            }
            if list_state.size != ElementSize::Unknown
                || !registry::is_sibling_or_ancestor(list_state.id, id)
            {
                return Err(Error::UnexpectedElement {
                    id: IdFmt(id),
                    parent: IdFmt(list_state.id),
                });
            }
            tracing::trace!(
                "{} ends unknown-size list {} after {} bytes",
                IdFmt(id),
                IdFmt(list_state.id),
                list_state.bytes_parsed
            );
            list_state.size = ElementSize::Known(list_state.bytes_parsed);
            self.on_list_end()?;
        };

        let header_len = header.len as u64;
        // The whole element must fit inside the current list.
        if let Some(list_state) = self.list_state_stack.last() {
            if let ElementSize::Known(list_size) = list_state.size {
                let remaining = list_size - list_state.bytes_parsed;
                let fits = match header.size {
                    ElementSize::Known(size) => {
                        header_len.checked_add(size).is_some_and(|total| total <= remaining)
                    }
                    ElementSize::Unknown => false,
                };
                if !fits {
                    return Err(Error::BudgetExceeded {
                        id: IdFmt(id),
                        parent: IdFmt(list_state.id),
                        size: header.size.known().map_or(u64::MAX, |s| s.saturating_add(header_len)),
                        remaining,
                    });
                }
            }
        }

        if kind == ElementKind::List {
            if let Some(list_state) = self.list_state_stack.last_mut() {
                list_state.bytes_parsed += header_len;
            }
            self.on_list_start(id, header.size)?;
            return Ok(header.len);
        }

        let ElementSize::Known(element_size) = header.size else {
            return Err(Error::UnknownSizeNotAllowed(IdFmt(id)));
        };
        // Wait until the entire element is buffered.
        let payload = match usize::try_from(element_size) {
            Ok(size) if size <= data.len() => &data[..size],
            _ => return Ok(0),
        };

        tracing::trace!("{} ({kind:?}, {element_size} bytes)", IdFmt(id));
        self.dispatch_leaf(kind, id, payload)?;

        if let Some(list_state) = self.list_state_stack.last_mut() {
            list_state.bytes_parsed += header_len + element_size;
            if list_state.size == ElementSize::Known(list_state.bytes_parsed) {
                self.on_list_end()?;
            }
        }
        Ok(header.len + payload.len())
    }

    fn dispatch_leaf(&mut self, kind: ElementKind, id: u32, payload: &[u8]) -> Result<()> {
        if kind == ElementKind::Skip {
            return Ok(());
        }
        let client = client_for(&mut self.root_client, &self.path)?;
        match kind {
            ElementKind::UInt => client.on_uint(id, leaf::decode_uint(payload)?),
            ElementKind::Float => client.on_float(id, leaf::decode_float(payload)?),
            ElementKind::Binary => client.on_binary(id, payload),
            ElementKind::String => client.on_string(id, &leaf::decode_string(payload)),
            ElementKind::List | ElementKind::Skip => Ok(()),
        }
    }

    fn on_list_start(&mut self, id: u32, size: ElementSize) -> Result<()> {
        let info = registry::find_list_info(id).ok_or(Error::UnknownList(IdFmt(id)))?;
        let expected = usize::from(self.root_level) + self.list_state_stack.len();
        if usize::from(info.level) != expected {
            return Err(Error::LevelMismatch {
                id: IdFmt(id),
                level: info.level,
                expected,
            });
        }
        if size == ElementSize::Unknown && !registry::may_have_unknown_size(id) {
            return Err(Error::UnknownSizeNotAllowed(IdFmt(id)));
        }

        // The new list must not extend past the end of the current one.
        if let (Some(parent), ElementSize::Known(size)) = (self.list_state_stack.last(), size) {
            if let ElementSize::Known(parent_size) = parent.size {
                let remaining = parent_size - parent.bytes_parsed;
                if size > remaining {
                    return Err(Error::BudgetExceeded {
                        id: IdFmt(id),
                        parent: IdFmt(parent.id),
                        size,
                        remaining,
                    });
                }
            }
        }

        tracing::trace!("start of list {} (size {size})", IdFmt(id));
        let client = client_for(&mut self.root_client, &self.path)?;
        client.on_list_start(id)?;
        if client.child_client(id).is_none() {
            return Err(Error::MissingChildClient(IdFmt(id)));
        }

        self.list_state_stack.push(ListState {
            id,
            size,
            bytes_parsed: 0,
            info,
        });
        self.path.push(id);

        if size == ElementSize::Known(0) {
            return self.on_list_end();
        }
        Ok(())
    }

    /// Close every list, innermost first, whose payload has been completely
    /// parsed.
    fn on_list_end(&mut self) -> Result<()> {
        while let Some(list_state) = self.list_state_stack.last() {
            if list_state.size != ElementSize::Known(list_state.bytes_parsed) {
                break;
            }
            let id = list_state.id;
            let bytes_parsed = list_state.bytes_parsed;
            self.list_state_stack.pop();
            self.path.pop();
            if let Some(parent) = self.list_state_stack.last_mut() {
                parent.bytes_parsed += bytes_parsed;
            }
            tracing::trace!("end of list {} ({bytes_parsed} bytes)", IdFmt(id));
            client_for(&mut self.root_client, &self.path)?.on_list_end(id)?;
        }
        if self.list_state_stack.is_empty() {
            self.state = State::DoneParsingList;
        }
        Ok(())
    }
}

impl<C> std::fmt::Debug for ListParser<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListParser")
            .field("state", &self.state)
            .field("root_id", &IdFmt(self.root_id))
            .field("open_lists", &self.list_state_stack)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ids;

    #[derive(Debug, Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ListClient for Recorder {
        fn on_list_start(&mut self, id: u32) -> Result<()> {
            self.events.push(format!("start {id:x}"));
            Ok(())
        }
        fn child_client(&mut self, _id: u32) -> Option<&mut dyn ListClient> {
            Some(self)
        }
        fn on_list_end(&mut self, id: u32) -> Result<()> {
            self.events.push(format!("end {id:x}"));
            Ok(())
        }
        fn on_uint(&mut self, id: u32, val: i64) -> Result<()> {
            self.events.push(format!("uint {id:x} {val}"));
            Ok(())
        }
    }

    #[test_log::test]
    fn root_must_be_a_list() {
        assert!(matches!(
            ListParser::new(ids::TIMECODE, Recorder::default()),
            Err(Error::UnknownList(_))
        ));
    }

    #[test_log::test]
    fn empty_input_needs_more() -> Result<()> {
        let mut parser = ListParser::new(ids::CLUSTER, Recorder::default())?;
        assert_eq!(parser.parse(&[])?, 0);
        assert_eq!(parser.parse(&[0x1F, 0x43])?, 0);
        assert!(parser.client().events.is_empty());
        Ok(())
    }

    #[test_log::test]
    fn empty_root_list() -> Result<()> {
        let mut parser = ListParser::new(ids::CLUSTER, Recorder::default())?;
        assert_eq!(parser.parse(&[0x1F, 0x43, 0xB6, 0x75, 0x80, 0xEC])?, 5);
        assert!(parser.is_parsing_complete());
        assert_eq!(parser.client().events, vec!["start 1f43b675", "end 1f43b675"]);
        assert!(matches!(parser.parse(&[0xEC]), Err(Error::ParsingComplete)));
        Ok(())
    }

    #[test_log::test]
    fn reset_allows_reuse() -> Result<()> {
        let cluster = [0x1F, 0x43, 0xB6, 0x75, 0x83, 0xE7, 0x81, 0x05];
        let mut parser = ListParser::new(ids::CLUSTER, Recorder::default())?;
        assert_eq!(parser.parse(&cluster[..6])?, 5);
        parser.reset();
        assert!(!parser.is_parsing_complete());
        assert_eq!(parser.parse(&cluster)?, cluster.len());
        assert!(parser.is_parsing_complete());
        let events = parser.into_client().events;
        assert_eq!(
            events,
            vec!["start 1f43b675", "start 1f43b675", "uint e7 5", "end 1f43b675"]
        );
        Ok(())
    }

    #[test_log::test]
    fn unknown_size_only_for_segment_and_cluster() -> Result<()> {
        let mut parser = ListParser::new(ids::TRACKS, Recorder::default())?;
        let unknown = [0x16, 0x54, 0xAE, 0x6B, 0xFF];
        assert!(matches!(
            parser.parse(&unknown),
            Err(Error::UnknownSizeNotAllowed(IdFmt(ids::TRACKS)))
        ));
        assert!(matches!(parser.parse(&unknown), Err(Error::Poisoned)));
        Ok(())
    }
}
