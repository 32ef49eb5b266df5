use indexmap::IndexMap;

use crate::config::FormatConfig;
use crate::json::value::Value;

/// Largest magnitude written as a plain integer
const INTEGER_LIMIT: f64 = 1e15;

pub fn serialize(value: &Value) -> String {
    serialize_with_config(value, &FormatConfig::compact())
}

/// Pretty output with two-space indentation
pub fn serialize_pretty(value: &Value) -> String {
    serialize_with_config(value, &FormatConfig::default())
}

pub fn serialize_with_config(value: &Value, config: &FormatConfig) -> String {
    let mut out = String::new();
    format_value(&mut out, value, 0, config);
    out
}

fn format_value(out: &mut String, value: &Value, indent: usize, config: &FormatConfig) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::String(s) => format_string(out, s),
        Value::Array(items) => format_array(out, items, indent, config),
        Value::Object(map) => format_object(out, map, indent, config),
    }
}

fn format_array(out: &mut String, items: &[Value], indent: usize, config: &FormatConfig) {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_line_break(out, indent + 1, config);
        format_value(out, item, indent + 1, config);
    }
    if !items.is_empty() {
        push_line_break(out, indent, config);
    }
    out.push(']');
}

fn format_object(
    out: &mut String,
    map: &IndexMap<String, Value>,
    indent: usize,
    config: &FormatConfig,
) {
    out.push('{');
    for (i, (key, item)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_line_break(out, indent + 1, config);
        format_string(out, key);
        out.push_str(if config.is_compact() { ":" } else { ": " });
        format_value(out, item, indent + 1, config);
    }
    if !map.is_empty() {
        push_line_break(out, indent, config);
    }
    out.push('}');
}

fn push_line_break(out: &mut String, indent: usize, config: &FormatConfig) {
    if !config.is_compact() {
        out.push('\n');
        out.push_str(&" ".repeat(indent * config.indent_spaces));
    }
}

/// Integral values print without a fraction; non-finite values have no JSON
/// form and become `null`.
fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < INTEGER_LIMIT {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

fn format_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
}
