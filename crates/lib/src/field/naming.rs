//! Name derivation for fields.

/// Derives a human readable label by splitting camel case and separators.
///
/// ```
/// # use wikimodel::field::pretty_name;
/// assert_eq!(pretty_name("someFieldName"), "Some Field Name");
/// assert_eq!(pretty_name("page_title"), "Page Title");
/// assert_eq!(pretty_name("URLPath"), "URL Path");
/// ```
pub fn pretty_name(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = match prev {
            Some(p) => {
                (c.is_uppercase() && !p.is_uppercase())
                    // last capital of an acronym starts the next word
                    || (c.is_uppercase()
                        && p.is_uppercase()
                        && chars.peek().is_some_and(|n| n.is_lowercase()))
                    || (c.is_ascii_digit() && !p.is_ascii_digit())
                    || (!c.is_ascii_digit() && p.is_ascii_digit())
            }
            None => false,
        };
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derives the accessor name used to look up a structured-value property.
///
/// Non-alphanumeric separators are stripped and every following segment is
/// capitalized; the first segment starts lower case.
///
/// ```
/// # use wikimodel::field::accessor_name;
/// assert_eq!(accessor_name("some_class.Field"), "someClassField");
/// ```
pub fn accessor_name(field_name: &str) -> String {
    let mut out = String::with_capacity(field_name.len());
    for (i, segment) in field_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        if i == 0 {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_lowercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.push_str(&capitalize(segment));
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
