// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weak grab handles and the per-point grab registry.
//!
//! ## Overview
//!
//! Grabbers live in an external object graph (widgets, scene items, gesture handlers) whose
//! lifetime this crate does not control. A grabbable object owns a [`GrabToken`]; consumers that
//! claim a contact store a [`GrabRef`] handed out by that token. The token is the only strong
//! reference, so dropping it (typically from the object's destructor) invalidates every
//! outstanding [`GrabRef`] at once. Reads of an invalidated handle yield `None`.
//!
//! ```
//! use understory_pointer::grab::{GrabRef, GrabToken};
//!
//! let button = GrabToken::new(7_u32);
//! let handle: GrabRef<u32> = button.grab_ref();
//! assert_eq!(handle.get(), Some(7));
//!
//! drop(button);
//! assert_eq!(handle.get(), None);
//! assert!(!handle.is_live());
//! ```
//!
//! [`Grabs`] is the registry embedded in each [`EventPoint`](crate::EventPoint): at most one
//! exclusive grabber plus an ordered list of passive grabbers. It has no arbitration policy;
//! the last write wins and duplicates are kept.

use alloc::rc::{Rc, Weak};
use core::fmt;

use smallvec::SmallVec;

/// Registration token owned by a grabbable object.
///
/// Not `Clone`: a second strong owner would keep grab handles alive past the object's
/// destruction.
pub struct GrabToken<K> {
    inner: Rc<K>,
}

impl<K> GrabToken<K> {
    /// Register an object identified by `key`.
    pub fn new(key: K) -> Self {
        Self { inner: Rc::new(key) }
    }

    /// The key this token was registered with.
    pub fn key(&self) -> &K {
        &self.inner
    }

    /// Hand out a non-owning handle to this object.
    pub fn grab_ref(&self) -> GrabRef<K> {
        GrabRef {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Number of handles currently pointing at this token (live or stored in a registry).
    pub fn handle_count(&self) -> usize {
        Rc::weak_count(&self.inner)
    }
}

impl<K: fmt::Debug> fmt::Debug for GrabToken<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GrabToken").field(&*self.inner).finish()
    }
}

/// Non-owning handle to a grabbable object.
///
/// Equality is identity: two handles are equal when they were handed out by the same token
/// (or are both [`GrabRef::empty`]).
pub struct GrabRef<K> {
    inner: Weak<K>,
}

impl<K> GrabRef<K> {
    /// A handle that refers to nothing.
    pub fn empty() -> Self {
        Self { inner: Weak::new() }
    }

    /// Returns true while the referenced token is alive.
    pub fn is_live(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Key of the referenced object, or `None` if it was destroyed or this handle is empty.
    pub fn get(&self) -> Option<K>
    where
        K: Clone,
    {
        self.inner.upgrade().map(|k| (*k).clone())
    }

    /// Returns true if both handles refer to the same registration.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns true if this handle was handed out by `token`.
    pub fn refers_to(&self, token: &GrabToken<K>) -> bool {
        core::ptr::eq(self.inner.as_ptr(), Rc::as_ptr(&token.inner))
    }
}

impl<K> Clone for GrabRef<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K> Default for GrabRef<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K> PartialEq for GrabRef<K> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<K> Eq for GrabRef<K> {}

impl<K> From<&GrabToken<K>> for GrabRef<K> {
    fn from(token: &GrabToken<K>) -> Self {
        token.grab_ref()
    }
}

impl<K: fmt::Debug> fmt::Debug for GrabRef<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.upgrade() {
            Some(k) => f.debug_tuple("GrabRef").field(&*k).finish(),
            None => f.write_str("GrabRef(<empty>)"),
        }
    }
}

/// Grab registry of one contact.
pub struct Grabs<K> {
    exclusive: GrabRef<K>,
    passive: SmallVec<[GrabRef<K>; 2]>,
}

impl<K> Grabs<K> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            exclusive: GrabRef::empty(),
            passive: SmallVec::new(),
        }
    }

    /// Current exclusive grabber, `None` if unset or destroyed.
    pub fn exclusive(&self) -> Option<K>
    where
        K: Clone,
    {
        self.exclusive.get()
    }

    /// The stored exclusive handle, which may be empty.
    pub fn exclusive_ref(&self) -> &GrabRef<K> {
        &self.exclusive
    }

    /// Replace the exclusive grabber. Returns true if the stored handle changed.
    pub fn set_exclusive(&mut self, grabber: GrabRef<K>) -> bool {
        if self.exclusive.ptr_eq(&grabber) {
            return false;
        }
        self.exclusive = grabber;
        true
    }

    /// Passive grabbers in insertion order. Entries whose object is gone read as empty.
    pub fn passive(&self) -> &[GrabRef<K>] {
        &self.passive
    }

    /// Keys of the passive grabbers that are still alive, in insertion order.
    pub fn live_passive(&self) -> impl Iterator<Item = K> + '_
    where
        K: Clone,
    {
        self.passive.iter().filter_map(GrabRef::get)
    }

    /// Replace the passive list wholesale. Duplicates are kept.
    pub fn set_passive(&mut self, grabbers: impl IntoIterator<Item = GrabRef<K>>) {
        self.passive.clear();
        self.passive.extend(grabbers);
    }

    /// Append one passive grabber. Duplicates are kept.
    pub fn add_passive(&mut self, grabber: GrabRef<K>) {
        self.passive.push(grabber);
    }

    /// Remove the first passive entry equal to `grabber`. Returns true if one was removed.
    pub fn remove_passive(&mut self, grabber: &GrabRef<K>) -> bool {
        match self.passive.iter().position(|g| g.ptr_eq(grabber)) {
            Some(i) => {
                self.passive.remove(i);
                true
            }
            None => false,
        }
    }

    /// Drop every passive grabber.
    pub fn clear_passive(&mut self) {
        self.passive.clear();
    }

    /// Returns true if a live exclusive or passive grabber is registered.
    pub fn is_grabbed(&self) -> bool {
        self.exclusive.is_live() || self.passive.iter().any(GrabRef::is_live)
    }
}

impl<K> Default for Grabs<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for Grabs<K> {
    fn clone(&self) -> Self {
        Self {
            exclusive: self.exclusive.clone(),
            passive: self.passive.clone(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Grabs<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grabs")
            .field("exclusive", &self.exclusive)
            .field("passive", &self.passive)
            .finish()
    }
}
