use std::cell::{Ref, RefCell};
use std::fmt::Debug;
use std::rc::{Rc, Weak};

use crate::computed::{computed, Computed};
use crate::listeners::{ListenerId, Listeners, Registry};
use crate::{Flow, IntoFlow, Listener, Observable, Unsubscribe};

/// A mutable reactive value.
///
/// Cloning a `Val` produces another handle to the same cell.
pub struct Val<T> {
	body: Rc<ValBody<T>>,
}

/// Value and listener storage shared by plain, derived and packed cells.
pub(crate) struct ValBody<T> {
	value: RefCell<T>,
	listeners: RefCell<Listeners<T>>,
}

impl<T> Clone for Val<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T> Default for Val<T>
where
	T: Default + 'static,
{
	fn default() -> Self {
		Val::new(Default::default())
	}
}

pub trait Toggle {
	fn toggle(&mut self);
}

impl Toggle for bool {
	fn toggle(&mut self) {
		*self = !*self
	}
}

impl<T> Val<T>
where
	T: 'static,
{
	pub fn new(value: T) -> Self {
		Val {
			body: ValBody::new(value),
		}
	}

	#[inline]
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.body.get()
	}

	/// Runs `func` against the current value without cloning it.
	#[inline]
	pub fn with<R>(&self, func: impl FnOnce(&T) -> R) -> R {
		func(&self.body.borrow())
	}

	/// Stores `value` and notifies listeners, unless it equals the current value.
	#[inline]
	pub fn set(&self, value: T)
	where
		T: PartialEq + Clone,
	{
		self.body.set(value, true);
	}

	/// Stores `value`, notifying listeners only when `notify` is set.
	///
	/// Returns `false` when `value` equals the current one, in which case
	/// nothing is stored and nobody is notified.
	#[inline]
	pub fn store(&self, value: T, notify: bool) -> bool
	where
		T: PartialEq + Clone,
	{
		self.body.set(value, notify)
	}

	#[inline]
	pub fn replace(&self, value: T) -> T
	where
		T: PartialEq + Clone,
	{
		self.body.replace(value)
	}

	/// Mutates the value in place and notifies if it ended up different.
	///
	/// `func` runs while the cell is mutably borrowed: reading this same
	/// cell from inside it panics.
	#[inline]
	pub fn update(&self, func: impl FnOnce(&mut T))
	where
		T: PartialEq + Clone,
	{
		self.body.update(func)
	}

	#[inline]
	pub fn toggle(&self)
	where
		T: Toggle + PartialEq + Clone,
	{
		self.update(T::toggle)
	}

	/// Invokes every current listener with the current value.
	#[inline]
	pub fn notify(&self)
	where
		T: Clone,
	{
		self.body.notify()
	}

	/// Registers `listener`; returning `false` or [`Flow::Unsubscribe`]
	/// from it removes the registration.
	pub fn watch<F, R>(&self, listener: F) -> Unsubscribe
	where
		F: Fn(&T) -> R + 'static,
		R: IntoFlow,
	{
		self.body.watch(Rc::new(move |value: &T| listener(value).into_flow()))
	}

	pub fn watcher_count(&self) -> usize {
		self.body.watcher_count()
	}

	pub fn map<F, R>(&self, func: F) -> Computed<R>
	where
		F: Fn(&T) -> R + 'static,
		T: Clone,
		R: PartialEq + Clone + 'static,
	{
		computed(move |value: T| func(&value), self.clone())
	}
}

impl<T> ValBody<T>
where
	T: 'static,
{
	pub fn new(value: T) -> Rc<Self> {
		Rc::new(ValBody {
			value: RefCell::new(value),
			listeners: RefCell::new(Listeners::new()),
		})
	}

	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	pub fn borrow(&self) -> Ref<'_, T> {
		self.value.borrow()
	}

	pub fn set(&self, value: T, notify: bool) -> bool
	where
		T: PartialEq + Clone,
	{
		{
			let mut current = self.value.borrow_mut();
			if *current == value {
				return false;
			}
			*current = value;
		}

		if notify {
			self.notify();
		}

		true
	}

	pub fn replace(&self, value: T) -> T
	where
		T: PartialEq + Clone,
	{
		let (old, changed) = {
			let mut current = self.value.borrow_mut();
			let old = std::mem::replace(&mut *current, value);
			let changed = old != *current;
			(old, changed)
		};

		if changed {
			self.notify();
		}

		old
	}

	pub fn update(&self, func: impl FnOnce(&mut T))
	where
		T: PartialEq + Clone,
	{
		self.modify(|value| {
			let previous = value.clone();
			func(value);
			*value != previous
		});
	}

	/// Mutates the value in place; `func` reports whether anything changed.
	pub fn modify(&self, func: impl FnOnce(&mut T) -> bool) -> bool
	where
		T: Clone,
	{
		let changed = func(&mut self.value.borrow_mut());
		if changed {
			self.notify();
		}

		changed
	}

	/// Runs one notification pass over a snapshot of the listeners.
	///
	/// Each listener receives the value current at the moment it runs.
	/// Listeners registered during the pass wait for the next one, listeners
	/// removed during the pass are skipped. No borrow is held while a
	/// listener runs, so listeners may freely read and write cells.
	pub fn notify(&self)
	where
		T: Clone,
	{
		let snapshot = self.listeners.borrow().snapshot();
		tracing::trace!(listeners = snapshot.len(), "notify");

		for (id, listener) in snapshot {
			if !self.listeners.borrow().contains(id) {
				continue;
			}

			let value = self.get();
			if listener(&value) == Flow::Unsubscribe {
				self.release(id);
			}
		}
	}

	pub fn watch(self: &Rc<Self>, listener: Listener<T>) -> Unsubscribe {
		let id = self.listeners.borrow_mut().add(listener);
		let registry = Rc::downgrade(self) as Weak<dyn Registry>;
		Unsubscribe::new(registry, id)
	}

	pub fn watcher_count(&self) -> usize {
		self.listeners.borrow().len()
	}
}

impl<T> Registry for ValBody<T> {
	fn release(&self, id: ListenerId) {
		if self.listeners.borrow_mut().remove(id) {
			tracing::trace!(?id, "listener removed");
		}
	}
}

impl<T> Observable for Val<T>
where
	T: Clone + 'static,
{
	type Item = T;

	fn get(&self) -> T {
		self.body.get()
	}

	fn subscribe(&self, listener: Listener<T>) -> Unsubscribe {
		self.body.watch(listener)
	}
}

impl<T> Debug for Val<T>
where
	T: Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.body.value.borrow().fmt(f)
	}
}
