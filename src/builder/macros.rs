//! Macros for declaring state enums.

/// Declare a state enum with its tokens.
///
/// Generates the enum, its [`State`](crate::core::State) implementation,
/// serde support using the tokens, `all()` (every declared state, in
/// order, ready for [`StateMachineBuilder::new`](crate::builder::StateMachineBuilder::new))
/// and `from_name()`.
///
/// # Example
///
/// ```
/// use waypoint::core::State;
/// use waypoint::state_enum;
///
/// state_enum! {
///     pub enum MemberStatus {
///         Created => "created",
///         Enrolled => "enrolled",
///         Suspended => "suspended",
///     }
/// }
///
/// assert_eq!(MemberStatus::Enrolled.name(), "enrolled");
/// assert_eq!(MemberStatus::all().len(), 3);
/// assert_eq!(MemberStatus::from_name("suspended"), Some(MemberStatus::Suspended));
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $token:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $token)]
                $variant
            ),*
        }

        #[allow(dead_code)]
        impl $name {
            /// Every declared state, in declaration order.
            pub fn all() -> ::std::vec::Vec<Self> {
                ::std::vec![$(Self::$variant),*]
            }

            /// Look a state up by its token.
            pub fn from_name(name: &str) -> ::std::option::Option<Self> {
                match name {
                    $($token => ::std::option::Option::Some(Self::$variant),)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $token),*
                }
            }
        }
    };
}
