//! Tiny synchronous reactive values.
//!
//! A [`Val`] holds a value and notifies its listeners when the value changes.
//! Cells compose through explicit dependencies: [`watch`] and [`effect`]
//! observe groups of cells, [`computed`] derives read-only cells, and [`pack`]
//! aggregates named cells into a single [`Record`].
//!
//! Everything runs synchronously on the calling thread: a `set` returns only
//! after every listener downstream of it has run.
//!
//! ```ignore
//! use tinyval::{computed, Val};
//!
//! let age = Val::new(15);
//! let legal_age = Val::new(18);
//! let is_adult = computed(|(age, legal)| age >= legal, (age.clone(), legal_age.clone()));
//!
//! is_adult.watch(|adult| println!("adult: {adult}"));
//! age.set(19); // prints "adult: true"
//! ```

pub mod macros;
pub mod utils;

mod computed;
mod flow;
mod listeners;
mod pack;
mod sources;
mod val;
mod value;
mod watch;

pub use computed::{computed, computed as select, Computed};
pub use flow::{Flow, IntoFlow};
pub use listeners::{Listener, Unsubscribe};
pub use pack::{pack, Packed, Record};
pub use sources::Sources;
pub use utils::{get, get_values, is_present, set};
pub use val::{Toggle, Val};
pub use value::ReadVal;
pub use watch::{effect, watch, Unwatch};

/// Common interface of every readable cell.
pub trait Observable: 'static {
	type Item;

	/// Returns a copy of the current value.
	fn get(&self) -> Self::Item;

	/// Registers a listener, invoked with the new value after each change.
	fn subscribe(&self, listener: Listener<Self::Item>) -> Unsubscribe;
}
