use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::{computed, Computed, IntoFlow, Listener, Observable, Packed, Record, Unsubscribe, Val};

/// A read-only view of any cell, with the concrete kind erased.
pub struct ReadVal<T> {
	value: Rc<dyn Observable<Item = T>>,
}

impl<T> Clone for ReadVal<T> {
	fn clone(&self) -> Self {
		ReadVal {
			value: self.value.clone(),
		}
	}
}

impl<T> ReadVal<T>
where
	T: 'static,
{
	pub fn new(value: impl Observable<Item = T>) -> Self {
		ReadVal {
			value: Rc::new(value),
		}
	}

	#[inline]
	pub fn get(&self) -> T {
		self.value.get()
	}

	pub fn watch<F, R>(&self, listener: F) -> Unsubscribe
	where
		F: Fn(&T) -> R + 'static,
		R: IntoFlow,
	{
		self.value
			.subscribe(Rc::new(move |value: &T| listener(value).into_flow()))
	}

	pub fn map<F, R>(&self, func: F) -> Computed<R>
	where
		F: Fn(&T) -> R + 'static,
		R: PartialEq + Clone + 'static,
	{
		computed(move |value: T| func(&value), self.clone())
	}
}

impl<T> Observable for ReadVal<T>
where
	T: 'static,
{
	type Item = T;

	fn get(&self) -> T {
		self.value.get()
	}

	fn subscribe(&self, listener: Listener<T>) -> Unsubscribe {
		self.value.subscribe(listener)
	}
}

impl<T> From<Val<T>> for ReadVal<T>
where
	T: Clone + 'static,
{
	fn from(val: Val<T>) -> Self {
		ReadVal::new(val)
	}
}

impl<T> From<Computed<T>> for ReadVal<T>
where
	T: Clone + 'static,
{
	fn from(computed: Computed<T>) -> Self {
		ReadVal::new(computed)
	}
}

impl<K, V> From<Packed<K, V>> for ReadVal<Record<K, V>>
where
	K: Eq + Hash + Clone + 'static,
	V: Clone + 'static,
{
	fn from(packed: Packed<K, V>) -> Self {
		ReadVal::new(packed)
	}
}

impl<T> Debug for ReadVal<T>
where
	T: Debug + 'static,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.get().fmt(f)
	}
}
