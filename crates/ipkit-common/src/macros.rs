/// Declares a field-less enum whose variants carry a stable textual name. The generated type gets `name`, `from_name`, a
/// declaration-ordered `ALL` slice and a `Display` implementation writing the name.
///
/// ```
/// ipkit_common::name_enum! {
///     #[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
///     pub enum Scope {
///         Host = "host",
///         Link = "link"
///     }
/// }
///
/// assert_eq!(Scope::Link.name(), "link");
/// assert_eq!(Scope::from_name("host"), Some(Scope::Host));
/// ```
#[macro_export]
macro_rules! name_enum {
    (
        $(#[$outer:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$inner:ident $($args:tt)*])*
                $value_name:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        $vis enum $name {
            $(
                $(#[$inner $($args)*])*
                $value_name,
            )*
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$value_name),*];

            pub const fn name(&self) -> &'static str {
                match self {
                    $(
                        Self::$value_name => $value,
                    )*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(
                        $value => Some(Self::$value_name),
                    )*
                    _ => None
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str(self.name())
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.name()
            }
        }
    };
}
