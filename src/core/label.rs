//! The `Labelable` capability for closed sets of values.
//!
//! Graph rendering needs two things from the state and event types: a
//! human-readable label for each value and the exhaustive, ordered list of
//! every value in the set. Both are declared alongside the type rather than
//! discovered at runtime.

/// A closed set of values with display labels and an exhaustive enumeration.
///
/// # Example
///
/// ```rust
/// use statewise::core::Labelable;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl Labelable for Light {
///     fn label(&self) -> String {
///         match self {
///             Self::Red => "red".to_string(),
///             Self::Green => "green".to_string(),
///         }
///     }
///
///     fn all_values() -> Vec<Self> {
///         vec![Self::Red, Self::Green]
///     }
/// }
///
/// assert_eq!(Light::Green.label(), "green");
/// assert_eq!(Light::all_values(), vec![Light::Red, Light::Green]);
/// ```
pub trait Labelable: Sized {
    /// Human-readable label for this value.
    fn label(&self) -> String;

    /// Every value of the set, in a fixed declaration order.
    ///
    /// The order determines node ids and edge order in rendered graphs, so
    /// it must be stable across calls.
    fn all_values() -> Vec<Self>;
}
