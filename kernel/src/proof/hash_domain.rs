//! Typed domain separators for canonical hashing.
//!
//! Every hash in the workspace selects a domain via [`HashDomain`]; the enum,
//! `as_bytes()`, `ALL` and `Display` all come from one macro invocation.

macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Grid layout (rendered symbol text).
    GridLayout => b"GRIDWALK::GRID_LAYOUT::V1\0",

    /// State identity bytes (position + facts).
    SearchNode => b"GRIDWALK::SEARCH_NODE::V1\0",

    /// Canonical JSON of a reconstructed solution.
    Solution => b"GRIDWALK::SOLUTION::V1\0",

    /// Canonical JSON of search counters.
    SearchStats => b"GRIDWALK::SEARCH_STATS::V1\0",
}
