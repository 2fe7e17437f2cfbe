// Copyright 2022-2023 Andrew D. Straw.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT
// or http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::error::{Error, Result};
use crate::ids::IdFmt;

fn unhandled(what: &str, id: u32) -> Error {
    tracing::debug!("unexpected {what} element {}", IdFmt(id));
    Error::UnhandledElement(IdFmt(id))
}

/// Receiver of the elements found by a [crate::ListParser].
///
/// Each open list is associated with one client: the one returned by
/// [ListClient::child_client] of the client associated with its parent (the
/// root list is associated with the client handed to the parser). That
/// client receives the list's leaf children and the start and end of its
/// child lists.
///
/// Every method rejects by default, so an implementation only overrides the
/// handlers of the elements it owns. Returning an error from any method
/// aborts parsing.
pub trait ListClient {
    /// A child list `id` starts.
    fn on_list_start(&mut self, id: u32) -> Result<()> {
        Err(unhandled("list", id))
    }

    /// The client receiving the children of the currently open child list
    /// `id`.
    ///
    /// Called after a successful [ListClient::on_list_start] and again each
    /// time the parser dispatches to the children of that list, so it must
    /// keep returning the same client until [ListClient::on_list_end].
    fn child_client(&mut self, _id: u32) -> Option<&mut dyn ListClient> {
        None
    }

    /// The child list `id` ended.
    fn on_list_end(&mut self, id: u32) -> Result<()> {
        Err(unhandled("list end", id))
    }

    fn on_uint(&mut self, id: u32, _val: i64) -> Result<()> {
        Err(unhandled("uint", id))
    }

    fn on_float(&mut self, id: u32, _val: f64) -> Result<()> {
        Err(unhandled("float", id))
    }

    /// `data` is only valid for the duration of the call.
    fn on_binary(&mut self, id: u32, _data: &[u8]) -> Result<()> {
        Err(unhandled("binary", id))
    }

    fn on_string(&mut self, id: u32, _val: &str) -> Result<()> {
        Err(unhandled("string", id))
    }
}

impl<T: ListClient + ?Sized> ListClient for &mut T {
    fn on_list_start(&mut self, id: u32) -> Result<()> {
        (**self).on_list_start(id)
    }
    fn child_client(&mut self, id: u32) -> Option<&mut dyn ListClient> {
        (**self).child_client(id)
    }
    fn on_list_end(&mut self, id: u32) -> Result<()> {
        (**self).on_list_end(id)
    }
    fn on_uint(&mut self, id: u32, val: i64) -> Result<()> {
        (**self).on_uint(id, val)
    }
    fn on_float(&mut self, id: u32, val: f64) -> Result<()> {
        (**self).on_float(id, val)
    }
    fn on_binary(&mut self, id: u32, data: &[u8]) -> Result<()> {
        (**self).on_binary(id, data)
    }
    fn on_string(&mut self, id: u32, val: &str) -> Result<()> {
        (**self).on_string(id, val)
    }
}

/// Walk from `root` through the clients of the open lists in `path`.
///
/// Returns the client associated with the last list in `path`, or `root`
/// itself for an empty path.
pub(crate) fn client_for<'a>(
    root: &'a mut dyn ListClient,
    path: &[u32],
) -> Result<&'a mut dyn ListClient> {
    let mut client = root;
    for id in path {
        client = client
            .child_client(*id)
            .ok_or(Error::MissingChildClient(IdFmt(*id)))?;
    }
    Ok(client)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ids;

    struct Nothing;
    impl ListClient for Nothing {}

    #[derive(Default)]
    struct Inner {
        uints: Vec<(u32, i64)>,
    }
    impl ListClient for Inner {
        fn on_uint(&mut self, id: u32, val: i64) -> Result<()> {
            self.uints.push((id, val));
            Ok(())
        }
    }

    #[derive(Default)]
    struct Outer {
        inner: Inner,
    }
    impl ListClient for Outer {
        fn child_client(&mut self, id: u32) -> Option<&mut dyn ListClient> {
            (id == ids::CLUSTER).then_some(&mut self.inner as &mut dyn ListClient)
        }
    }

    #[test]
    fn default_handlers_reject() {
        let mut c = Nothing;
        assert!(matches!(
            c.on_uint(ids::TIMECODE, 1),
            Err(Error::UnhandledElement(IdFmt(ids::TIMECODE)))
        ));
        assert!(c.on_list_start(ids::CLUSTER).is_err());
        assert!(c.on_list_end(ids::CLUSTER).is_err());
        assert!(c.on_float(ids::DURATION, 1.0).is_err());
        assert!(c.on_binary(ids::SIMPLE_BLOCK, &[]).is_err());
        assert!(c.on_string(ids::DOC_TYPE, "webm").is_err());
        assert!(c.child_client(ids::CLUSTER).is_none());
    }

    #[test]
    fn walk_to_nested_client() -> Result<()> {
        let mut outer = Outer::default();
        client_for(&mut outer, &[ids::CLUSTER])?.on_uint(ids::TIMECODE, 7)?;
        assert_eq!(outer.inner.uints, vec![(ids::TIMECODE, 7)]);
        assert!(matches!(
            client_for(&mut outer, &[ids::CLUSTER, ids::BLOCK_GROUP]),
            Err(Error::MissingChildClient(IdFmt(ids::BLOCK_GROUP)))
        ));
        // Through a borrowed client.
        let mut borrowed = &mut outer;
        client_for(&mut borrowed, &[ids::CLUSTER])?.on_uint(ids::TIMECODE, 8)?;
        assert_eq!(outer.inner.uints.len(), 2);
        Ok(())
    }
}
