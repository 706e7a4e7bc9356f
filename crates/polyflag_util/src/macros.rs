/// Defines newtypes around unsigned integers that implement
/// [`TypedIndex`](crate::ti::TypedIndex).
///
/// Each index is displayed as `#n`.
#[macro_export]
macro_rules! typed_index_struct {
    ($(
        $(#[$attr:meta])*
        $vis:vis struct $name:ident($inner_vis:vis $inner:ty);
    )+) => {$(
        $(#[$attr])*
        #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name($inner_vis $inner);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl $crate::ti::TypedIndex for $name {
            const MAX_INDEX: usize = <$inner>::MAX as usize;
            const TYPE_NAME: &'static str = stringify!($name);

            fn to_index(self) -> usize {
                self.0 as usize
            }

            fn try_from_index(index: usize) -> Result<Self, $crate::ti::IndexOverflow> {
                <$inner>::try_from(index)
                    .map(Self)
                    .map_err(|_| $crate::ti::IndexOverflow::new::<Self>())
            }
        }
    )+};
}
