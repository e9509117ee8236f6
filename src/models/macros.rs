/// Declares a fixed, ordered enumeration of boolean interest flags.
///
/// Each entry is `Variant => ("column", "key", "label")`:
/// * `column`: the boolean column holding the flag on user (and title) records.
/// * `key`: the per-flag recommendation key. Genres use it as a table suffix,
///   streaming services use it as the row subject key.
/// * `label`: the human readable name interpolated into carousel headings.
///
/// The generated `ALL` constant lists the variants in declaration order. Every
/// caller that walks the flags goes through `ALL`, so carousel ordering never
/// depends on hash map iteration.
///
/// # Example
/// ```rust,ignore
/// interest_flags! {
///     /// Colours
///     pub enum Colour {
///         Red => ("red", "red", "Red Things"),
///         Blue => ("blue", "blue", "Blue Things"),
///     }
/// }
/// assert_eq!(Colour::ALL, [Colour::Red, Colour::Blue]);
/// ```
#[macro_export]
macro_rules! interest_flags {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($column:literal, $key:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every flag, in fixed enumeration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Boolean column backing this flag
            pub const fn column(self) -> &'static str {
                match self {
                    $($name::$variant => $column),+
                }
            }

            /// Recommendation key for this flag
            pub const fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            /// Display label used in carousel headings
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}
