//! Delimited-line tokenizer shared by the CSV parsers

/// Split one CSV line into trimmed fields.
///
/// Fields may be wrapped in `"`; inside quotes `""` is a literal quote and
/// `,` is not a separator. An unterminated quote runs to the end of the line.
/// The last field is always emitted, so an empty line yields one empty field.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
