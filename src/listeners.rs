use std::fmt::Debug;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::Flow;

/// A type-erased change listener.
pub type Listener<T> = Rc<dyn Fn(&T) -> Flow>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct ListenerId(u64);

pub(crate) type Snapshot<T> = SmallVec<[(ListenerId, Listener<T>); 8]>;

/// Listeners of a single cell, kept in registration order.
pub(crate) struct Listeners<T> {
	next_id: u64,
	entries: SmallVec<[(ListenerId, Listener<T>); 4]>,
}

impl<T> Listeners<T> {
	pub const fn new() -> Self {
		Listeners {
			next_id: 0,
			entries: SmallVec::new_const(),
		}
	}

	pub fn add(&mut self, listener: Listener<T>) -> ListenerId {
		let id = ListenerId(self.next_id);
		self.next_id += 1;
		self.entries.push((id, listener));
		id
	}

	pub fn remove(&mut self, id: ListenerId) -> bool {
		match self.entries.iter().position(|(entry, _)| *entry == id) {
			Some(index) => {
				self.entries.remove(index);
				true
			}
			None => false,
		}
	}

	pub fn contains(&self, id: ListenerId) -> bool {
		self.entries.iter().any(|(entry, _)| *entry == id)
	}

	/// Copies the current registrations so that a notification pass
	/// can run while the set itself keeps changing.
	pub fn snapshot(&self) -> Snapshot<T> {
		self.entries
			.iter()
			.map(|(id, listener)| (*id, listener.clone()))
			.collect()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}
}

pub(crate) trait Registry {
	fn release(&self, id: ListenerId);
}

/// Handle that removes exactly one listener registration.
///
/// Calling [`Unsubscribe::unsubscribe`] after the listener is gone (or after
/// the cell itself was dropped) does nothing.
#[derive(Clone)]
pub struct Unsubscribe {
	registry: Weak<dyn Registry>,
	id: ListenerId,
}

impl Unsubscribe {
	pub(crate) fn new(registry: Weak<dyn Registry>, id: ListenerId) -> Self {
		Unsubscribe { registry, id }
	}

	pub fn unsubscribe(&self) {
		if let Some(registry) = self.registry.upgrade() {
			registry.release(self.id);
		}
	}
}

impl Debug for Unsubscribe {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Unsubscribe")
			.field("id", &self.id)
			.field("alive", &(self.registry.strong_count() > 0))
			.finish()
	}
}
