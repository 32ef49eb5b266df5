//! Entity escaping for XML text and attribute values

const ENTITIES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&apos;"),
];

/// The three entities decoded inside character data
const TEXT_ENTITIES: [(char, &str); 3] = [('<', "&lt;"), ('>', "&gt;"), ('&', "&amp;")];

/// Escapes the five XML special characters.
///
/// The serializer uses this for text, attribute values and everything else
/// it writes outside of comments and CDATA sections.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    escape_into(&mut out, input);
    out
}

pub(crate) fn escape_into(out: &mut String, input: &str) {
    for c in input.chars() {
        match ENTITIES.iter().find(|(ch, _)| *ch == c) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(c),
        }
    }
}

/// Decodes `&amp;`, `&lt;`, `&gt;`, `&quot;` and `&apos;`.
///
/// Any other `&` sequence (numeric references included) is kept verbatim.
pub fn unescape(input: &str) -> String {
    decode_with(input, &ENTITIES)
}

/// Decodes only `&lt;`, `&gt;` and `&amp;`, the entities recognised in
/// element text.
pub fn decode_text_entities(input: &str) -> String {
    decode_with(input, &TEXT_ENTITIES)
}

fn decode_with(input: &str, table: &[(char, &str)]) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        let (before, tail) = rest.split_at(amp);
        out.push_str(before);

        match table.iter().find(|(_, entity)| tail.starts_with(entity)) {
            Some((c, entity)) => {
                out.push(*c);
                rest = tail.get(entity.len()..).unwrap_or_default();
            }
            None => {
                out.push('&');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }

    out.push_str(rest);
    out
}
