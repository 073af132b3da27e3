//! Property-based tests verifying round-trip guarantees across generated inputs.
//!
//! `Value::Number` is an `f64`, so integer round-tripping is only exact within the `f64`
//! safe-integer range (`|n| < 2^53`); generators are bounded to that range rather than the
//! full `i64`/`u64` domain.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use toon::{from_str, to_string};

const SAFE_INT: i64 = 1 << 53;

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64_safe_range(n in -SAFE_INT..=SAFE_INT) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_f64_finite(n in -1e15..1e15) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_string(s in "[a-zA-Z0-9 _.,:\"\\-]{0,40}") {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_vec_string(v in prop::collection::vec("[a-zA-Z0-9 ]{0,10}", 0..10)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }
}
