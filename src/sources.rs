use std::rc::Rc;

use smallvec::SmallVec;

use crate::{Computed, Flow, Observable, Packed, ReadVal, Unsubscribe, Val};

/// Callback shared by every per-source listener of one watch group.
#[doc(hidden)]
pub type Trigger = Rc<dyn Fn() -> Flow>;

#[doc(hidden)]
pub type Handles = SmallVec<[Unsubscribe; 4]>;

/// An ordered group of cells that can be watched together.
///
/// Implemented for every cell handle, for tuples of up to eight handles of
/// possibly different types, and for a `Vec` of same-typed handles.
pub trait Sources: 'static {
	/// Current values of all sources, in source order.
	type Values;

	fn values(&self) -> Self::Values;

	#[doc(hidden)]
	fn subscribe_all(&self, trigger: &Trigger) -> Handles;
}

fn subscribe<S>(source: &S, trigger: &Trigger) -> Unsubscribe
where
	S: Observable,
{
	let trigger = trigger.clone();
	source.subscribe(Rc::new(move |_: &S::Item| trigger()))
}

macro_rules! single_sources {
	($([$($generic:ident),*] $source:ty => $item:ty;)*) => {$(
		impl<$($generic),*> Sources for $source
		where
			$($generic: 'static,)*
			$source: Observable<Item = $item>,
		{
			type Values = $item;

			fn values(&self) -> Self::Values {
				Observable::get(self)
			}

			fn subscribe_all(&self, trigger: &Trigger) -> Handles {
				let mut handles = Handles::new();
				handles.push(subscribe(self, trigger));
				handles
			}
		}
	)*};
}

single_sources! {
	[T] Val<T> => T;
	[T] Computed<T> => T;
	[T] ReadVal<T> => T;
	[K, V] Packed<K, V> => crate::Record<K, V>;
}

macro_rules! tuple_sources {
	($($source:ident . $index:tt),+) => {
		impl<$($source),+> Sources for ($($source,)+)
		where
			$($source: Observable,)+
		{
			type Values = ($(<$source as Observable>::Item,)+);

			fn values(&self) -> Self::Values {
				($(self.$index.get(),)+)
			}

			fn subscribe_all(&self, trigger: &Trigger) -> Handles {
				let mut handles = Handles::new();
				$(handles.push(subscribe(&self.$index, trigger));)+
				handles
			}
		}
	};
}

tuple_sources!(A.0);
tuple_sources!(A.0, B.1);
tuple_sources!(A.0, B.1, C.2);
tuple_sources!(A.0, B.1, C.2, D.3);
tuple_sources!(A.0, B.1, C.2, D.3, E.4);
tuple_sources!(A.0, B.1, C.2, D.3, E.4, F.5);
tuple_sources!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
tuple_sources!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);

impl<S> Sources for Vec<S>
where
	S: Observable,
{
	type Values = Vec<S::Item>;

	fn values(&self) -> Self::Values {
		self.iter().map(Observable::get).collect()
	}

	fn subscribe_all(&self, trigger: &Trigger) -> Handles {
		self.iter().map(|source| subscribe(source, trigger)).collect()
	}
}
