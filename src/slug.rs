//! URL-safe identifiers derived from recipe names.

/// Turn a recipe name into a lowercase kebab-case slug.
///
/// Common Latin accented letters are folded to ASCII and `@` is spelled
/// out as `at`. Whitespace, `-` and `_` separate words; any other
/// punctuation is dropped. The result never starts or ends with `-`.
///
/// Scripts other than Latin are not transliterated: their letters are
/// dropped, so a name written only in them (`寿司`) yields an empty slug.
/// Callers must treat an empty result as unusable; the seeder rejects the
/// batch rather than store a recipe without a slug.
pub fn slugify(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());

    for c in name.chars() {
        if c == '@' {
            normalized.push_str(" at ");
        } else if let Some(ascii) = fold_latin(c) {
            normalized.push_str(ascii);
        } else if c.is_ascii_alphanumeric() {
            normalized.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            normalized.push(' ');
        }
    }

    normalized.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Check that a slug is lowercase kebab-case
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn fold_latin(c: char) -> Option<&'static str> {
    let ascii = match c.to_lowercase().next().unwrap_or(c) {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => "a",
        'æ' => "ae",
        'ç' | 'č' | 'ć' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'ñ' | 'ń' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => "o",
        'œ' => "oe",
        'ß' => "ss",
        'š' | 'ś' => "s",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => "u",
        'ý' | 'ÿ' => "y",
        'ž' | 'ź' | 'ż' => "z",
        'ł' => "l",
        _ => return None,
    };
    Some(ascii)
}
