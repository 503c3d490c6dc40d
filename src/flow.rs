/// What a listener wants after it has been invoked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	/// Stay subscribed.
	#[default]
	Continue,
	/// Remove this listener; it will not be invoked again.
	Unsubscribe,
}

/// Conversion of listener return values into a [`Flow`].
///
/// Closures may return `()` (keep listening), a `bool` (`false` unsubscribes)
/// or an explicit [`Flow`].
pub trait IntoFlow {
	fn into_flow(self) -> Flow;
}

impl IntoFlow for Flow {
	#[inline]
	fn into_flow(self) -> Flow {
		self
	}
}

impl IntoFlow for () {
	#[inline]
	fn into_flow(self) -> Flow {
		Flow::Continue
	}
}

impl IntoFlow for bool {
	#[inline]
	fn into_flow(self) -> Flow {
		if self {
			Flow::Continue
		} else {
			Flow::Unsubscribe
		}
	}
}
