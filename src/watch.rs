use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use enclose::enclose;

use crate::sources::{Handles, Sources, Trigger};
use crate::{Flow, IntoFlow};

/// Tears down every subscription of one watch group at once.
///
/// Cloned handles refer to the same group. Calling [`Unwatch::unwatch`]
/// more than once is harmless. Until it is called, the group keeps its
/// sources alive.
#[derive(Clone, Default)]
pub struct Unwatch {
	handles: Rc<RefCell<Handles>>,
}

impl Unwatch {
	pub fn unwatch(&self) {
		let handles = std::mem::take(&mut *self.handles.borrow_mut());
		if handles.is_empty() {
			return;
		}

		tracing::trace!(handles = handles.len(), "unwatch");
		for handle in handles {
			handle.unsubscribe();
		}
	}

	/// `false` once the group has been torn down.
	pub fn is_active(&self) -> bool {
		!self.handles.borrow().is_empty()
	}
}

impl Debug for Unwatch {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Unwatch")
			.field("handles", &self.handles.borrow().len())
			.finish()
	}
}

/// Calls `callback` with the current values of all `sources` whenever any
/// of them changes.
///
/// The callback does not run on registration. Returning `false` (or
/// [`Flow::Unsubscribe`]) from it tears down the whole group, exactly like
/// calling the returned [`Unwatch`].
///
/// ```ignore
/// let name = Val::new("Miguel");
/// let age = Val::new(15);
///
/// watch(|(name, age)| println!("{name} is {age}"), (name.clone(), age.clone()));
/// ```
pub fn watch<S, F, R>(callback: F, sources: S) -> Unwatch
where
	S: Sources,
	F: Fn(S::Values) -> R + 'static,
	R: IntoFlow,
{
	group(
		Rc::new(sources),
		Rc::new(move |values: S::Values| callback(values).into_flow()),
	)
}

/// Same as [`watch`], but also calls `callback` once right away.
///
/// The immediate call happens after the group is subscribed, so returning
/// `false` from it tears the group down before any change is observed.
pub fn effect<S, F, R>(callback: F, sources: S) -> Unwatch
where
	S: Sources,
	F: Fn(S::Values) -> R + 'static,
	R: IntoFlow,
{
	let sources = Rc::new(sources);
	let callback = Rc::new(move |values: S::Values| callback(values).into_flow());

	let unwatch = group(sources.clone(), callback.clone());
	if callback(sources.values()) == Flow::Unsubscribe {
		unwatch.unwatch();
	}

	unwatch
}

pub(crate) fn group<S, F>(sources: Rc<S>, callback: Rc<F>) -> Unwatch
where
	S: Sources,
	F: Fn(S::Values) -> Flow + 'static,
{
	let unwatch = Unwatch::default();

	let trigger: Trigger = Rc::new(enclose!((sources, unwatch) move || {
		let flow = callback(sources.values());
		if flow == Flow::Unsubscribe {
			unwatch.unwatch();
		}

		flow
	}));

	*unwatch.handles.borrow_mut() = sources.subscribe_all(&trigger);
	unwatch
}
