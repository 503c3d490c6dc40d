use mockall::predicate::eq;
use mockall::Sequence;
use tinyval::{computed, pack, watch, Val};


use mock::{user, Field, Spy};

#[test]
fn derived_follows_sources() {
	let age = Val::new(15);
	let legal_age = Val::new(18);
	let is_adult = computed(|(age, legal)| age >= legal, (age.clone(), legal_age.clone()));

	assert!(!is_adult.get());

	age.set(19);

	assert!(is_adult.get());
}

#[test]
fn derived_notifies_only_on_change() {
	mock::trace();

	let age = Val::new(15);
	let legal_age = Val::new(18);
	let is_adult = computed(|(age, legal)| age >= legal, (age.clone(), legal_age.clone()));

	let mock = mock::SharedMock::new();
	is_adult.watch({
		let mock = mock.clone();
		move |adult| mock.get().flag(*adult)
	});

	mock.get().expect_flag().with(eq(true)).times(1).return_const(());

	age.set(19);
	age.set(20);

	mock.get().checkpoint();
}

#[test]
fn pack_reports_whole_record() {
	let name = Val::new(Field::from("Jose"));
	let age = Val::new(Field::from(15u32));
	let packed = pack([("name", name.clone()), ("age", age.clone())]);

	assert_eq!(packed.get(), user("Jose", 15));

	let mock = mock::SharedMock::new();
	packed.watch({
		let mock = mock.clone();
		move |record| mock.get().user(record.clone())
	});

	mock.get()
		.expect_user()
		.withf(|record| *record == user("Maria", 15))
		.times(1)
		.return_const(());

	name.set(Field::from("Maria"));

	mock.get().checkpoint();
}

#[test]
fn returning_false_unsubscribes() {
	let value = Val::new(0u32);

	let mock = mock::SharedMock::new();
	value.watch({
		let mock = mock.clone();
		move |value| {
			mock.get().number(*value);
			false
		}
	});

	mock.get().expect_number().with(eq(1)).times(1).return_const(());

	value.set(1);
	value.set(2);
	value.set(3);

	mock.get().checkpoint();
	assert_eq!(value.watcher_count(), 0);
}

#[test]
fn watch_reads_every_source() {
	let name = Val::new(String::from("Miguel"));
	let age = Val::new(15u32);

	let mock = mock::SharedMock::new();
	watch(
		{
			let mock = mock.clone();
			move |(name, age)| mock.get().person(name, age)
		},
		(name.clone(), age.clone()),
	);

	let mut seq = Sequence::new();
	mock.get()
		.expect_person()
		.with(eq(String::from("Maria")), eq(15))
		.times(1)
		.in_sequence(&mut seq)
		.return_const(());
	mock.get()
		.expect_person()
		.with(eq(String::from("Maria")), eq(18))
		.times(1)
		.in_sequence(&mut seq)
		.return_const(());

	name.set(String::from("Maria"));
	age.set(18);

	mock.get().checkpoint();
}
