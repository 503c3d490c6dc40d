pub use enclose::*;

/// Packs cells of any types into a typed record cell.
///
/// With a struct name, the record is that struct, built from fields of the
/// same names. Without one, an anonymous record type is generated whose
/// fields are named after the identifiers. The result is a [`Computed`],
/// so listeners run only when some field changed.
///
/// ```ignore
/// let user = pack!(User { name, age });
/// let user = pack!(User { name: first_name.clone(), age: years.clone() });
/// let user = pack!(name, age);
/// assert_eq!(user.get().age, 15);
/// ```
///
/// For a keyed map over cells of one type, see [`pack`](crate::pack()).
///
/// [`Computed`]: crate::Computed
#[macro_export]
macro_rules! pack {
    ($record:ident { $($field:ident),+ $(,)? }) => {
        $crate::pack!($record { $($field: $field.clone()),+ })
    };
    ($record:ident { $($field:ident : $source:expr),+ $(,)? }) => {
        $crate::computed(
            |($($field,)+)| $record { $($field),+ },
            ($($source,)+),
        )
    };
    ($($field:ident),+ $(,)?) => {
        $crate::pack!($($field: $field.clone()),+)
    };
    ($($field:ident : $source:expr),+ $(,)?) => {{
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, PartialEq)]
        struct Packed<$($field),+> {
            $($field: $field),+
        }

        $crate::pack!(Packed { $($field: $source),+ })
    }};
}

/// Watches cells, cloning the listed captures into the callback first.
///
/// ```ignore
/// watch!((log) (name, age) => |(name, age)| log.borrow_mut().push((name, age)));
/// ```
#[macro_export]
macro_rules! watch {
    (( $($d_tt:tt)* ) $sources:expr => $($b:tt)*) => {
        $crate::watch($crate::macros::enclose!(($( $d_tt )*) move $($b)*), $sources)
    };
}

/// Like [`watch!`], but runs the callback once right away.
#[macro_export]
macro_rules! effect {
    (( $($d_tt:tt)* ) $sources:expr => $($b:tt)*) => {
        $crate::effect($crate::macros::enclose!(($( $d_tt )*) move $($b)*), $sources)
    };
}
