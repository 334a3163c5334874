//! Macros for ergonomic state and event declarations.

/// Declare a fieldless enum and implement `Labelable` for it.
///
/// Labels default to the variant name; `Variant => "text"` overrides one.
/// `all_values()` lists variants in declaration order.
///
/// # Example
///
/// ```
/// use statewise::core::Labelable;
/// use statewise::labelable_enum;
///
/// labelable_enum! {
///     pub enum Order {
///         Placed,
///         Shipped => "Shipped to customer",
///         Delivered,
///     }
/// }
///
/// assert_eq!(Order::Placed.label(), "Placed");
/// assert_eq!(Order::Shipped.label(), "Shipped to customer");
/// assert_eq!(Order::all_values(), vec![Order::Placed, Order::Shipped, Order::Delivered]);
/// ```
#[macro_export]
macro_rules! labelable_enum {
    (@label $variant:ident) => {
        stringify!($variant)
    };
    (@label $variant:ident $label:literal) => {
        $label
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Labelable for $name {
            fn label(&self) -> String {
                match self {
                    $(Self::$variant => $crate::labelable_enum!(@label $variant $($label)?).to_string()),*
                }
            }

            fn all_values() -> Vec<Self> {
                vec![$(Self::$variant),*]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Labelable;

    labelable_enum! {
        enum Number {
            One => "one",
            Two => "two",
            Three => "three",
        }
    }

    #[test]
    fn labelable_enum_uses_explicit_labels() {
        assert_eq!(Number::One.label(), "one");
        assert_eq!(Number::Two.label(), "two");
        assert_eq!(Number::Three.label(), "three");
    }

    #[test]
    fn labelable_enum_enumerates_in_declaration_order() {
        assert_eq!(
            Number::all_values(),
            vec![Number::One, Number::Two, Number::Three]
        );
    }

    #[test]
    fn labelable_enum_defaults_to_variant_name() {
        labelable_enum! {
            pub enum Mixed {
                Plain,
                Quoted => "An \"awesome\" state",
            }
        }

        assert_eq!(Mixed::Plain.label(), "Plain");
        assert_eq!(Mixed::Quoted.label(), "An \"awesome\" state");
    }

    #[test]
    fn labelable_enum_keeps_attributes() {
        labelable_enum! {
            /// Documented enum
            #[derive(PartialOrd, Ord)]
            enum Priority {
                Low,
                High,
            }
        }

        assert!(Priority::Low < Priority::High);
        assert_eq!(Priority::all_values().len(), 2);
    }
}
