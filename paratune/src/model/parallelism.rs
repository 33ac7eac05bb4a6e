use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! parallelism_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "u32", into = "u32")]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const MIN: Self = Self(1);

            /// Values below one are floored to `MIN`.
            pub const fn new(p: u32) -> Self {
                if p == 0 { Self::MIN } else { Self(p) }
            }

            pub const fn as_u32(&self) -> u32 {
                self.0
            }

            pub fn as_f64(&self) -> f64 {
                f64::from(self.0)
            }

            pub const fn halve(self) -> Self {
                Self::new(self.0 / 2)
            }

            pub const fn double(self) -> Self {
                Self::new(self.0.saturating_mul(2))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::MIN
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(p: u32) -> Self {
                Self::new(p)
            }
        }

        impl From<$name> for u32 {
            fn from(p: $name) -> Self {
                p.0
            }
        }

        impl From<$name> for i64 {
            fn from(p: $name) -> Self {
                Self::from(p.0)
            }
        }
    };
}

parallelism_newtype!(
    /// Level of parallelism: the number of data partitions a stage processes.
    Lop
);

parallelism_newtype!(
    /// Degree of parallelism: the number of worker threads per executor slot.
    Dop
);

#[cfg(test)]
pub fn arb_lop() -> impl proptest::strategy::Strategy<Value = Lop> {
    use proptest::prelude::*;
    any::<u32>().prop_map(Lop::new)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_floor_at_one() {
        assert_eq!(Lop::new(0), Lop::MIN);
        assert_eq!(Dop::new(0).as_u32(), 1);
        assert_eq!(Lop::MIN.halve(), Lop::MIN);
        assert_eq!(Dop::new(3).halve(), Dop::MIN);
        assert_eq!(Dop::new(8).halve(), Dop::new(4));
    }

    #[test]
    fn test_const_construction() {
        const FLOORED: Lop = Lop::new(0);
        const HALVED: Dop = Dop::new(1).halve();
        assert_eq!(FLOORED, Lop::MIN);
        assert_eq!(HALVED.as_u32(), 1);
        assert_eq!(Dop::MIN.as_u32(), 1);
    }

    #[test]
    fn test_double_saturates() {
        assert_eq!(Lop::new(16).double(), Lop::new(32));
        assert_eq!(Lop::new(u32::MAX).double(), Lop::new(u32::MAX));
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&Lop::new(64)).unwrap();
        assert_eq!(json, "64");
        let dop: Dop = serde_json::from_str("12").unwrap();
        assert_eq!(dop, Dop::new(12));
        let lop: Lop = serde_json::from_str("0").unwrap();
        assert_eq!(lop, Lop::MIN);
    }

    proptest! {
        #[test]
        fn test_lop_never_below_min(lop in arb_lop()) {
            prop_assert!(Lop::MIN <= lop);
            prop_assert!(Lop::MIN <= lop.halve());
            prop_assert!(lop <= lop.double());
        }
    }
}
