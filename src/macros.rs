//! The `toon!` literal macro, building [`Value`] trees for tests and examples without going
//! through `serde::Serialize`.

#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toon!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ToonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ToonMap::new();
        $(
            object.insert($key, $crate::toon!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{ToonMap, Value};

    #[test]
    fn primitives() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(false), Value::Bool(false));
        assert_eq!(toon!(42), Value::Number(42.0));
        assert_eq!(toon!(3.5), Value::Number(3.5));
        assert_eq!(toon!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn arrays() {
        assert_eq!(toon!([]), Value::Array(vec![]));
        let arr = toon!([1, 2, 3]);
        assert_eq!(arr, Value::Array(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]));
    }

    #[test]
    fn objects() {
        assert_eq!(toon!({}), Value::Object(ToonMap::new()));

        let obj = toon!({
            "name": "Alice",
            "age": 30
        });

        let Value::Object(map) = obj else { panic!("expected object") };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
        assert_eq!(map.get("age"), Some(&Value::Number(30.0)));
    }

    #[test]
    fn nested() {
        let value = toon!({
            "items": [1, 2, 3],
            "meta": { "ok": true }
        });
        let Value::Object(map) = value else { panic!("expected object") };
        assert!(map.get("items").unwrap().is_array());
        assert!(map.get("meta").unwrap().is_object());
    }
}
