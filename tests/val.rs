use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use mockall::predicate::eq;
use mockall::Sequence;
use tinyval::{get, is_present, set, Flow, Unsubscribe, Val};


use mock::Spy;

#[test]
fn holds_value() {
	let value = Val::<Option<u32>>::new(None);
	assert_eq!(value.get(), None);
	assert!(!is_present(&value));

	value.set(Some(1));

	assert_eq!(value.get(), Some(1));
	assert!(is_present(&value));
}

#[test]
fn notifies_each_change() {
	let value = Val::new(0u32);

	let mock = mock::SharedMock::new();
	value.watch({
		let mock = mock.clone();
		move |value| mock.get().number(*value)
	});

	let mut seq = Sequence::new();
	mock.get()
		.expect_number()
		.with(eq(1))
		.times(1)
		.in_sequence(&mut seq)
		.return_const(());
	mock.get()
		.expect_number()
		.with(eq(2))
		.times(1)
		.in_sequence(&mut seq)
		.return_const(());

	value.set(1);
	value.set(2);

	mock.get().checkpoint();
}

#[test]
fn same_value_is_ignored() {
	let value = Val::new(String::from("a"));
	let calls = Rc::new(Cell::new(0));

	value.watch({
		let calls = calls.clone();
		move |_| calls.set(calls.get() + 1)
	});

	value.set(String::from("b"));
	value.set(String::from("b"));

	assert_eq!(calls.get(), 1);
	assert!(!value.store(String::from("b"), true));
}

#[test]
fn store_without_notify() {
	let value = Val::new(1u32);
	let calls = Rc::new(Cell::new(0));

	value.watch({
		let calls = calls.clone();
		move |_| calls.set(calls.get() + 1)
	});

	assert!(value.store(2, false));
	assert_eq!(value.get(), 2);
	assert_eq!(calls.get(), 0);

	value.notify();
	assert_eq!(calls.get(), 1);
}

#[test]
fn unsubscribe_handle_is_idempotent() {
	let value = Val::new(0u32);
	let calls = Rc::new(Cell::new(0));

	let unsubscribe = value.watch({
		let calls = calls.clone();
		move |_| calls.set(calls.get() + 1)
	});

	value.set(1);
	unsubscribe.unsubscribe();
	unsubscribe.unsubscribe();
	value.set(2);

	assert_eq!(calls.get(), 1);
	assert_eq!(value.watcher_count(), 0);
}

#[test]
fn unsubscribe_outlives_cell() {
	let value = Val::new(0u32);
	let unsubscribe = value.watch(|_| {});

	drop(value);
	unsubscribe.unsubscribe();
}

#[test]
fn explicit_flow() {
	let value = Val::new(0u32);
	let seen = Rc::new(RefCell::new(Vec::new()));

	value.watch({
		let seen = seen.clone();
		move |value| {
			seen.borrow_mut().push(*value);
			if *value >= 2 {
				Flow::Unsubscribe
			} else {
				Flow::Continue
			}
		}
	});

	for next in 1..=4 {
		value.set(next);
	}

	assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn removal_during_pass_skips_nobody() {
	let value = Val::new(0u32);
	let seen = Rc::new(RefCell::new(Vec::new()));

	for name in ["a", "b", "c"] {
		value.watch({
			let seen = seen.clone();
			move |_| {
				seen.borrow_mut().push(name);
				name != "a"
			}
		});
	}

	value.set(1);
	value.set(2);

	assert_eq!(*seen.borrow(), vec!["a", "b", "c", "b", "c"]);
}

#[test]
fn listener_removed_by_sibling_is_skipped() {
	let value = Val::new(0u32);
	let seen = Rc::new(RefCell::new(Vec::new()));
	let victim: Rc<RefCell<Option<Unsubscribe>>> = Default::default();

	value.watch({
		let seen = seen.clone();
		let victim = victim.clone();
		move |_| {
			seen.borrow_mut().push("first");
			if let Some(victim) = victim.borrow_mut().take() {
				victim.unsubscribe();
			}
		}
	});

	let handle = value.watch({
		let seen = seen.clone();
		move |_| seen.borrow_mut().push("second")
	});
	*victim.borrow_mut() = Some(handle);

	value.set(1);

	assert_eq!(*seen.borrow(), vec!["first"]);
	assert_eq!(value.watcher_count(), 1);
}

#[test]
fn listener_added_during_pass_waits() {
	let value = Val::new(0u32);
	let calls = Rc::new(Cell::new(0));

	value.watch({
		let value = value.clone();
		let calls = calls.clone();
		move |_| {
			let calls = calls.clone();
			value.watch(move |_| calls.set(calls.get() + 1));
			false
		}
	});

	value.set(1);
	assert_eq!(calls.get(), 0);

	value.set(2);
	assert_eq!(calls.get(), 1);
}

#[test]
fn reentrant_set_is_visible_to_later_listeners() {
	let value = Val::new(0u32);
	let seen = Rc::new(RefCell::new(Vec::new()));

	value.watch({
		let value = value.clone();
		move |current| {
			if *current == 1 {
				value.set(10);
			}
		}
	});
	value.watch({
		let seen = seen.clone();
		move |current| seen.borrow_mut().push(*current)
	});

	value.set(1);

	assert_eq!(*seen.borrow(), vec![10, 10]);
	assert_eq!(value.get(), 10);
}

#[test]
fn panicking_listener_aborts_pass() {
	let value = Val::new(0u32);
	let seen = Rc::new(RefCell::new(Vec::new()));

	value.watch({
		let seen = seen.clone();
		move |_| seen.borrow_mut().push("before")
	});
	value.watch(|current| {
		if *current == 1 {
			panic!("listener failed");
		}
	});
	value.watch({
		let seen = seen.clone();
		move |_| seen.borrow_mut().push("after")
	});

	let result = catch_unwind(AssertUnwindSafe(|| value.set(1)));

	assert!(result.is_err());
	assert_eq!(*seen.borrow(), vec!["before"]);
	assert_eq!(value.get(), 1);

	value.set(2);
	assert_eq!(*seen.borrow(), vec!["before", "before", "after"]);
}

#[test]
fn update_replace_toggle() {
	let flag = Val::new(false);
	let calls = Rc::new(Cell::new(0));

	flag.watch({
		let calls = calls.clone();
		move |_| calls.set(calls.get() + 1)
	});

	flag.toggle();
	assert!(flag.get());

	assert!(flag.replace(true));
	assert_eq!(calls.get(), 1);

	flag.update(|value| *value = false);
	flag.update(|value| *value = false);
	assert_eq!(calls.get(), 2);

	assert!(!flag.replace(true));
	assert_eq!(calls.get(), 3);
}

#[test]
fn functional_helpers() {
	let value = Val::new(1u32);
	let count = Rc::new(Cell::new(0));

	value.watch({
		let count = count.clone();
		move |_| count.set(count.get() + 1)
	});

	set(&value, 5);
	assert_eq!(get(&value), 5);
	assert_eq!(count.get(), 1);
	assert_eq!(value.with(|value| value * 2), 10);
}
