//! `{{dotted.path}}` substitution over JSON document trees.
//!
//! This is deliberately not a template language: there are no conditionals, loops or
//! helpers. A marker is replaced by the value its path resolves to in the payload.

mod substitute;

pub use substitute::{contains_placeholder, placeholders, substitute, substitute_str, unresolved};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replaces_marker_in_text_node() {
        let tree = json!({ "content": [{ "text": "Hello {{customer.name}}" }] });
        let payload = json!({ "customer": { "name": "Acme" } });
        let out = substitute(&tree, &payload);
        assert_eq!(out["content"][0]["text"], "Hello Acme");
    }

    #[test]
    fn test_whitespace_inside_braces_is_ignored() {
        let payload = json!({ "a": { "b": "x" } });
        assert_eq!(substitute(&json!("{{ a.b }}|{{a.b}}"), &payload), json!("x|x"));
    }

    #[test]
    fn test_missing_path_becomes_empty_string() {
        let payload = json!({ "a": { "b": null }, "c": "partial" });
        let out = substitute(&json!("[{{a.b.c}}][{{nope}}][{{c.d}}]"), &payload);
        assert_eq!(out, json!("[][][]"));
    }

    #[test]
    fn test_non_string_values_are_stringified() {
        let payload = json!({ "n": 3, "f": 2.0, "ok": false, "list": ["a", "b"] });
        let out = substitute(&json!("{{n}} {{f}} {{ok}} {{list}}"), &payload);
        assert_eq!(out, json!("3 2 false a,b"));
    }

    #[test]
    fn test_tree_without_markers_is_unchanged() {
        let tree = json!({
            "content": [
                "plain",
                { "text": "no markers", "style": ["a", "b"], "fontSize": 12 },
                { "table": { "body": [[1, true, null]] } },
                "{ single braces }"
            ],
            "pageSize": "A4"
        });
        let payload = json!({ "anything": 1 });
        assert_eq!(substitute(&tree, &payload), tree);
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let tree = json!({ "text": "Total: {{total}} {{currency}}" });
        let payload = json!({ "total": 10, "currency": "USD" });
        let once = substitute(&tree, &payload);
        assert_eq!(substitute(&once, &payload), once);
    }

    #[test]
    fn test_input_is_not_mutated_and_keys_are_kept() {
        let tree = json!({ "{{key}}": "{{key}}", "order": [3, 2, 1] });
        let before = tree.clone();
        let out = substitute(&tree, &json!({ "key": "v" }));
        assert_eq!(tree, before);
        assert_eq!(out["{{key}}"], "v");
        assert_eq!(out["order"], json!([3, 2, 1]));
    }

    #[test]
    fn test_placeholder_listing() {
        let tree = json!({ "a": "{{x.y}} and {{ z }}", "b": ["{{x.y}}"], "c": 1 });
        assert_eq!(placeholders(&tree), vec!["x.y", "z", "x.y"]);
        assert!(contains_placeholder("pre {{a}} post"));
        assert!(!contains_placeholder("pre {{}} post"));
        assert_eq!(unresolved(&json!("{{a}} {{b}}"), &json!({ "a": 1 })), vec!["b"]);
    }
}
