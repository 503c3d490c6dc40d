use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use enclose::enclose;
use fxhash::FxHashMap;

use crate::val::ValBody;
use crate::watch::{group, Unwatch};
use crate::{Flow, IntoFlow, Listener, Observable, ReadVal, Sources, Unsubscribe};

/// Field values of a packed cell, keyed by field name.
///
/// Cloning is cheap: clones share the fields until one of them is written.
pub struct Record<K, V> {
	fields: Rc<FxHashMap<K, V>>,
}

impl<K, V> Clone for Record<K, V> {
	fn clone(&self) -> Self {
		Record {
			fields: self.fields.clone(),
		}
	}
}

impl<K, V> Record<K, V>
where
	K: Eq + Hash,
{
	pub fn new() -> Self {
		Record {
			fields: Rc::new(FxHashMap::default()),
		}
	}

	pub fn get(&self, key: &K) -> Option<&V> {
		self.fields.get(key)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
		self.fields.iter()
	}

	/// Writes `value` under `key` and reports whether the field changed.
	fn write(&mut self, key: &K, value: V) -> bool
	where
		K: Clone,
		V: PartialEq + Clone,
	{
		if self.fields.get(key) == Some(&value) {
			return false;
		}

		Rc::make_mut(&mut self.fields).insert(key.clone(), value);
		true
	}
}

impl<K, V> Default for Record<K, V>
where
	K: Eq + Hash,
{
	fn default() -> Self {
		Record::new()
	}
}

impl<K, V> PartialEq for Record<K, V>
where
	K: Eq + Hash,
	V: PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.fields == other.fields
	}
}

impl<K, V> Eq for Record<K, V>
where
	K: Eq + Hash,
	V: Eq,
{
}

impl<K, V> FromIterator<(K, V)> for Record<K, V>
where
	K: Eq + Hash,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Record {
			fields: Rc::new(iter.into_iter().collect()),
		}
	}
}

impl<K, V> std::ops::Index<&K> for Record<K, V>
where
	K: Eq + Hash,
{
	type Output = V;

	fn index(&self, key: &K) -> &V {
		&self.fields[key]
	}
}

impl<K, V> Debug for Record<K, V>
where
	K: Debug,
	V: Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.fields.iter()).finish()
	}
}

/// A read-only cell mirroring a fixed set of named source cells.
///
/// The record lives inside the cell and is updated field by field. Listeners
/// run once per source change, and only if some field actually changed.
/// Like [`Computed`](crate::Computed), it keeps following its sources after
/// the last handle is dropped, until [`Packed::release`] is called.
///
/// Every field shares the value type `V`; the [`pack!`](crate::pack!) macro
/// builds typed records from cells of different types.
pub struct Packed<K, V> {
	body: Rc<PackedBody<K, V>>,
}

struct PackedBody<K, V> {
	cell: Rc<ValBody<Record<K, V>>>,
	unwatch: Unwatch,
}

impl<K, V> Clone for Packed<K, V> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

/// Aggregates named cells into a single [`Record`]-valued cell.
///
/// Keys are fixed at construction; a key given twice keeps the later source.
pub fn pack<K, V, I, S>(fields: I) -> Packed<K, V>
where
	I: IntoIterator<Item = (K, S)>,
	S: Into<ReadVal<V>>,
	K: Eq + Hash + Clone + 'static,
	V: PartialEq + Clone + 'static,
{
	let mut keys: Vec<K> = Vec::new();
	let mut sources: Vec<ReadVal<V>> = Vec::new();
	for (key, source) in fields {
		match keys.iter().position(|existing| *existing == key) {
			Some(index) => sources[index] = source.into(),
			None => {
				keys.push(key);
				sources.push(source.into());
			}
		}
	}

	let mut record = Record::new();
	sync(&mut record, &keys, sources.values());

	let cell = ValBody::new(record);
	let unwatch = group(
		Rc::new(sources),
		Rc::new(enclose!((cell) move |values: Vec<V>| {
			cell.modify(|record| sync(record, &keys, values));
			Flow::Continue
		})),
	);

	Packed {
		body: Rc::new(PackedBody { cell, unwatch }),
	}
}

/// Copies every source value into `record`; true if any field changed.
fn sync<K, V>(record: &mut Record<K, V>, keys: &[K], values: Vec<V>) -> bool
where
	K: Eq + Hash + Clone,
	V: PartialEq + Clone,
{
	let mut changed = false;
	for (key, value) in keys.iter().zip(values) {
		changed |= record.write(key, value);
	}

	changed
}

impl<K, V> Packed<K, V>
where
	K: Eq + Hash + Clone + 'static,
	V: Clone + 'static,
{
	#[inline]
	pub fn get(&self) -> Record<K, V> {
		self.body.cell.get()
	}

	#[inline]
	pub fn with<R>(&self, func: impl FnOnce(&Record<K, V>) -> R) -> R {
		func(&self.body.cell.borrow())
	}

	pub fn watch<F, R>(&self, listener: F) -> Unsubscribe
	where
		F: Fn(&Record<K, V>) -> R + 'static,
		R: IntoFlow,
	{
		self.body
			.cell
			.watch(Rc::new(move |record: &Record<K, V>| listener(record).into_flow()))
	}

	pub fn watcher_count(&self) -> usize {
		self.body.cell.watcher_count()
	}

	/// Unsubscribes from the sources; the record stops changing.
	pub fn release(&self) {
		self.body.unwatch.unwatch();
	}
}

impl<K, V> Observable for Packed<K, V>
where
	K: Eq + Hash + Clone + 'static,
	V: Clone + 'static,
{
	type Item = Record<K, V>;

	fn get(&self) -> Record<K, V> {
		self.body.cell.get()
	}

	fn subscribe(&self, listener: Listener<Record<K, V>>) -> Unsubscribe {
		self.body.cell.watch(listener)
	}
}

impl<K, V> Debug for Packed<K, V>
where
	K: Eq + Hash + Clone + Debug + 'static,
	V: Clone + Debug + 'static,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.with(|record| record.fmt(f))
	}
}
