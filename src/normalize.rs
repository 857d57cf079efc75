use crate::FormatError;

pub fn normalize(raw: &str) -> Result<String, FormatError> {
    let cleaned: String = raw
        .replace("\r\n", "\n")
        .chars()
        .map(|ch| {
            if ch == '\n' {
                '\n'
            } else if ch.is_control() {
                ' '
            } else {
                ch
            }
        })
        .collect();

    let mut paragraphs: Vec<String> = Vec::new();
    let mut words: Vec<&str> = Vec::new();
    for line in cleaned.lines() {
        if line.trim().is_empty() {
            if !words.is_empty() {
                paragraphs.push(words.join(" "));
                words.clear();
            }
        } else {
            words.extend(line.split_whitespace());
        }
    }
    if !words.is_empty() {
        paragraphs.push(words.join(" "));
    }

    let normalized = paragraphs.join("\n\n");
    if normalized.is_empty() {
        return Err(FormatError::EmptyContent);
    }
    Ok(normalized)
}
