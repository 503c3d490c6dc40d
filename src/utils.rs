use crate::{Observable, Sources, Val};

/// Reads the current value of any cell.
#[inline]
pub fn get<O: Observable>(source: &O) -> O::Item {
	source.get()
}

/// Writes `value` into `val`, notifying its listeners on change.
#[inline]
pub fn set<T>(val: &Val<T>, value: T)
where
	T: PartialEq + Clone + 'static,
{
	val.set(value)
}

/// Reads every source of a group at once, in source order.
///
/// ```ignore
/// let (name, age) = get_values(&(name, age));
/// ```
#[inline]
pub fn get_values<S: Sources>(sources: &S) -> S::Values {
	sources.values()
}

/// `true` when an optional cell currently holds a value.
pub fn is_present<O, T>(source: &O) -> bool
where
	O: Observable<Item = Option<T>>,
{
	source.get().is_some()
}
