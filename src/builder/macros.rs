//! Macros for declaring state and event enums.

/// Generate a `StateId` implementation for a fieldless enum.
///
/// The enum gets the derives the engine needs (`Clone`, `Copy`, `Eq`,
/// `Hash`, `Debug`, serde); the name of each variant is its identifier.
///
/// # Example
///
/// ```
/// use statewise::core::StateId;
/// use statewise::state_enum;
///
/// state_enum! {
///     pub enum OrderState {
///         Submitted,
///         Paid,
///         Fulfilled,
///         Cancelled,
///     }
/// }
///
/// assert_eq!(OrderState::Paid.name(), "Paid");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateId for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate an `EventKind` implementation for a fieldless enum.
///
/// ```
/// use statewise::core::EventKind;
/// use statewise::event_enum;
///
/// event_enum! {
///     pub enum OrderEvent {
///         Pay,
///         Fulfill,
///         Cancel,
///     }
/// }
///
/// assert_eq!(OrderEvent::Cancel.name(), "Cancel");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::EventKind for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
