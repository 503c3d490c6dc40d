use std::fmt::Debug;
use std::rc::Rc;

use enclose::enclose;

use crate::sources::Sources;
use crate::val::ValBody;
use crate::watch::{group, Unwatch};
use crate::{Flow, IntoFlow, Listener, Observable, Unsubscribe};

/// A read-only cell derived from other cells.
///
/// The value is computed eagerly on construction and recomputed every time
/// one of the sources changes. Listeners run only when the recomputed value
/// differs from the cached one.
///
/// The sources keep the cell alive: it goes on following them after every
/// handle is dropped, until [`Computed::release`] detaches it.
pub struct Computed<T> {
	body: Rc<ComputedBody<T>>,
}

struct ComputedBody<T> {
	cell: Rc<ValBody<T>>,
	unwatch: Unwatch,
}

impl<T> Clone for Computed<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

/// Creates a derived cell from `func` over the current values of `sources`.
///
/// ```ignore
/// let age = Val::new(15);
/// let legal_age = Val::new(18);
/// let is_adult = computed(|(age, legal)| age >= legal, (age.clone(), legal_age.clone()));
/// ```
///
/// Cyclic graphs are not detected and recurse until the stack runs out.
pub fn computed<S, F, T>(func: F, sources: S) -> Computed<T>
where
	S: Sources,
	F: Fn(S::Values) -> T + 'static,
	T: PartialEq + Clone + 'static,
{
	let sources = Rc::new(sources);
	let cell = ValBody::new(func(sources.values()));

	let unwatch = group(
		sources,
		Rc::new(enclose!((cell) move |values: S::Values| {
			cell.set(func(values), true);
			Flow::Continue
		})),
	);

	Computed {
		body: Rc::new(ComputedBody { cell, unwatch }),
	}
}

impl<T> Computed<T>
where
	T: 'static,
{
	#[inline]
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.body.cell.get()
	}

	#[inline]
	pub fn with<R>(&self, func: impl FnOnce(&T) -> R) -> R {
		func(&self.body.cell.borrow())
	}

	pub fn watch<F, R>(&self, listener: F) -> Unsubscribe
	where
		F: Fn(&T) -> R + 'static,
		R: IntoFlow,
	{
		self.body
			.cell
			.watch(Rc::new(move |value: &T| listener(value).into_flow()))
	}

	pub fn watcher_count(&self) -> usize {
		self.body.cell.watcher_count()
	}

	/// Unsubscribes from the sources. The last value stays readable and
	/// never changes again.
	pub fn release(&self) {
		self.body.unwatch.unwatch();
	}

	pub fn is_released(&self) -> bool {
		!self.body.unwatch.is_active()
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

impl<T> Observable for Computed<T>
where
	T: Clone + 'static,
{
	type Item = T;

	fn get(&self) -> T {
		self.body.cell.get()
	}

	fn subscribe(&self, listener: Listener<T>) -> Unsubscribe {
		self.body.cell.watch(listener)
	}
}

impl<T> Debug for Computed<T>
where
	T: Debug + 'static,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.with(|value| value.fmt(f))
	}
}
