use crate::json::Value;
use crate::xml::{Document, NodeId};

pub fn compare_values(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Object(l_map), Value::Object(r_map)) => {
            if l_map.len() != r_map.len() {
                return false;
            }
            l_map
                .iter()
                .all(|(k, v)| r_map.get(k).is_some_and(|rv| compare_values(v, rv)))
        }
        (Value::Array(l_arr), Value::Array(r_arr)) => {
            if l_arr.len() != r_arr.len() {
                return false;
            }
            l_arr
                .iter()
                .zip(r_arr.iter())
                .all(|(l, r)| compare_values(l, r))
        }
        (Value::Number(l), Value::Number(r)) => (l - r).abs() < f64::EPSILON,
        (Value::String(l), Value::String(r)) => l == r,
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

/// Asserts that two values are equal
///
/// # Panics
///
/// Panics if the values are not equal
pub fn assert_values_equal(left: &Value, right: &Value, message: &str) {
    assert!(
        compare_values(left, right),
        "{}\nLeft: {:?}\nRight: {:?}",
        message,
        left,
        right
    );
}

/// Structural equality of two subtrees, possibly in different documents:
/// same kinds, names, text, attributes (in order) and children.
pub fn trees_equal(left: &Document, l_node: NodeId, right: &Document, r_node: NodeId) -> bool {
    if left.node_kind(l_node) != right.node_kind(r_node) {
        return false;
    }
    let l_children = left.children(l_node);
    let r_children = right.children(r_node);
    l_children.len() == r_children.len()
        && l_children
            .iter()
            .zip(r_children.iter())
            .all(|(&l, &r)| trees_equal(left, l, right, r))
}

/// Asserts that two subtrees are structurally equal
///
/// # Panics
///
/// Panics if the subtrees differ
pub fn assert_trees_equal(left: &Document, l_node: NodeId, right: &Document, r_node: NodeId) {
    assert!(
        trees_equal(left, l_node, right, r_node),
        "Trees differ\nLeft: {:?}\nRight: {:?}",
        crate::xml::serialize_node(left, l_node, &crate::FormatConfig::compact()),
        crate::xml::serialize_node(right, r_node, &crate::FormatConfig::compact()),
    );
}
