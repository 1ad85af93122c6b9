//! Dotted-path access into JSON payloads.
//!
//! Every field lookup made while assembling a document goes through this crate, so
//! missing data is handled in one place: a path that runs into a missing key, a null
//! or a scalar resolves to nothing instead of failing.

pub mod error;
mod path;

pub use error::JPathError;
pub use path::{
    parse_path, resolve, resolve_array, resolve_f64, resolve_str, stringify, try_resolve,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_simple_path() {
        let data = json!({ "customer": { "name": "ACME" } });
        assert_eq!(resolve("customer.name", &data), Some(&json!("ACME")));
    }

    #[test]
    fn test_resolve_array_index() {
        let data = json!({ "orders": [ { "id": "A" }, { "id": "B" } ] });
        assert_eq!(resolve_str("orders.1.id", &data), "B");
        assert_eq!(resolve("orders.7.id", &data), None);
        assert_eq!(resolve("orders.x", &data), None);
    }

    #[test]
    fn test_short_circuit_on_missing_and_null() {
        let data = json!({ "a": { "b": null }, "s": "text" });
        assert_eq!(resolve("a.b", &data), None);
        assert_eq!(resolve("a.b.c.d", &data), None);
        assert_eq!(resolve("missing.deeper", &data), None);
        assert_eq!(resolve("s.length", &data), None);
        assert_eq!(resolve_str("a.b.c", &data), "");
    }

    #[test]
    fn test_malformed_paths() {
        let data = json!({ "a": 1 });
        assert_eq!(try_resolve("", &data), Err(JPathError::EmptyPath));
        assert_eq!(try_resolve("   ", &data), Err(JPathError::EmptyPath));
        assert!(matches!(
            try_resolve("a..b", &data),
            Err(JPathError::EmptySegment { position: 1, .. })
        ));
        assert_eq!(resolve("a..b", &data), None);
    }

    #[test]
    fn test_segments_are_trimmed() {
        let data = json!({ "a": { "b": 2 } });
        assert_eq!(resolve(" a . b ", &data), Some(&json!(2)));
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!("x")), "x");
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(3.0)), "3");
        assert_eq!(stringify(&json!(2.5)), "2.5");
        assert_eq!(stringify(&json!(-7)), "-7");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(null)), "");
        assert_eq!(stringify(&json!([1, "a", null])), "1,a,");
        assert_eq!(stringify(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn test_resolve_numbers_and_arrays() {
        let data = json!({ "total": "12.50", "qty": 3, "items": [1, 2], "label": "n/a" });
        assert_eq!(resolve_f64("total", &data), Some(12.5));
        assert_eq!(resolve_f64("qty", &data), Some(3.0));
        assert_eq!(resolve_f64("label", &data), None);
        assert_eq!(resolve_array("items", &data).len(), 2);
        assert!(resolve_array("qty", &data).is_empty());
        assert!(resolve_array("nothing", &data).is_empty());
    }
}
