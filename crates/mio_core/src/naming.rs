use crate::item::ItemRecord;

pub const DEFAULT_TEMPLATE: &str = "{code} - {name}";
pub const OUTPUT_EXTENSION: &str = "mio";

/// Expand a filename template for one item.
///
/// Tokens are `{code}` (the full `G-` code), `{brand}`, `{name}` and
/// `{author}`. Each token is replaced at its first occurrence only, in that
/// order; later occurrences are left literal.
pub fn format_file_stem(template: &str, item: &ItemRecord) -> String {
    let full_code = item.full_code();
    let replacements = [
        ("{code}", full_code.as_str()),
        ("{brand}", item.brand.as_str()),
        ("{name}", item.name.as_str()),
        ("{author}", item.author.as_str()),
    ];

    let mut out = template.to_string();
    for (token, value) in replacements {
        out = out.replacen(token, &sanitize_component(value), 1);
    }
    out
}

// Decoded metadata is untrusted; keep it inside the category directory.
fn sanitize_component(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}
