//! Transliterating slug generation.
//!
//! Catalog data arrives mostly in Russian (and sometimes Ukrainian), so the
//! slug rules transliterate Cyrillic to Latin instead of discarding it.

/// Generate a URL-safe slug from human-readable text.
///
/// 1. Lowercase the input.
/// 2. Replace `&amp;` and `&` with ` and `.
/// 3. Transliterate Cyrillic and drop characters that are neither ASCII
///    alphanumerics, `_`, `-` nor whitespace.
/// 4. Collapse every run of whitespace and hyphens into a single `-`.
/// 5. Trim `-` from both ends.
///
/// # Examples
///
/// ```
/// use catalog_core::slug::slugify;
///
/// assert_eq!(slugify("Привет Мир"), "privet-mir");
/// assert_eq!(slugify("Tables & Chairs"), "tables-and-chairs");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text
        .to_lowercase()
        .replace("&amp;", " and ")
        .replace('&', " and ");

    let mut stripped = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace() {
            stripped.push(c);
        } else if let Some(latin) = transliterate(c) {
            stripped.push_str(latin);
        }
    }

    let mut slug = String::with_capacity(stripped.len());
    let mut in_separator = false;
    for c in stripped.chars() {
        if c == '-' || c.is_whitespace() {
            in_separator = true;
            continue;
        }
        if in_separator && !slug.is_empty() {
            slug.push('-');
        }
        in_separator = false;
        slug.push(c);
    }
    slug
}

/// Latin replacement for a lowercase character, or `None` when the
/// character is not part of the slug alphabet.
///
/// Hard and soft signs, quotes and the numero sign are in the alphabet
/// but transliterate to nothing.
fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ы' => "yi",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        // Ukrainian
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        // Dashes survive as hyphens.
        '–' | '—' | '‒' | '−' => "-",
        'ъ' | 'ь' | '\'' | '"' | '‘' | '’' | '«' | '»' | '“' | '”' | '…' | '№' => "",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(slugify("Hello,  World!"), "hello-world");
    }

    #[test]
    fn ampersand_becomes_and() {
        assert_eq!(slugify("Tables & Chairs"), "tables-and-chairs");
        assert_eq!(slugify("Tables &amp; Chairs"), "tables-and-chairs");
    }

    #[test]
    fn russian_transliteration() {
        assert_eq!(slugify("Привет Мир"), "privet-mir");
        assert_eq!(slugify("Щука & Ёж"), "schuka-and-yozh");
        assert_eq!(slugify("Чайник"), "chajnik");
    }

    #[test]
    fn signs_vanish() {
        assert_eq!(slugify("Объявление"), "obyavlenie");
        assert_eq!(slugify("Мебель"), "mebel");
    }

    #[test]
    fn ukrainian_letters() {
        assert_eq!(slugify("Їжак Ґанок"), "yizhak-ganok");
    }

    #[test]
    fn underscores_are_kept() {
        assert_eq!(slugify("acme_Стул_123"), "acme_stul_123");
    }

    #[test]
    fn hyphen_runs_collapse() {
        assert_eq!(slugify("a - - b"), "a-b");
    }

    #[test]
    fn em_dash_becomes_hyphen() {
        assert_eq!(slugify("Стул—кресло"), "stul-kreslo");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(slugify(" Acme "), "acme");
        assert_eq!(slugify("\t- Acme -\n"), "acme");
    }

    #[test]
    fn dropped_trailing_character_leaves_no_hyphen() {
        assert_eq!(slugify("Hello World !"), "hello-world");
        assert_eq!(slugify("«Стул»"), "stul");
    }

    #[test]
    fn spaced_em_dash_collapses() {
        assert_eq!(slugify("Стул — кресло"), "stul-kreslo");
        assert_eq!(slugify("a , - b"), "a-b");
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(slugify(" !? "), "");
    }

    #[test]
    fn deterministic() {
        assert_eq!(slugify("Кресло Офисное"), slugify("Кресло Офисное"));
    }

    #[test]
    fn empty_input() {
        assert_eq!(slugify(""), "");
    }
}
