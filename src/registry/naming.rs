/// Short scanner name: the class name without a `Scanner` suffix, in snake case.
///
/// `LongBlockScanner` becomes `long_block`; acronyms stay together, so
/// `HTTPClientScanner` becomes `http_client`.
#[must_use]
pub fn scanner_short_name(class_name: &str) -> String {
    let base = class_name.strip_suffix("Scanner").unwrap_or(class_name);
    let chars: Vec<char> = base.chars().collect();
    let mut out = String::with_capacity(base.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let boundary = prev.is_some_and(|p| {
                p.is_lowercase()
                    || p.is_ascii_digit()
                    || (p.is_uppercase() && next.is_some_and(|n| n.is_lowercase()))
            });
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
