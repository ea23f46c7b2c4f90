//! URL slug generation for catalog entries.

/// Convert free text into a URL-safe slug.
///
/// Lower-cases, folds common Latin accents to ASCII, collapses every run of
/// non-alphanumeric characters into a single `-` and trims leading/trailing
/// dashes.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        let folded = fold_accent(ch);
        if folded.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(folded);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Default slug for a vehicle listing: `brand-model-year`.
pub fn vehicle_slug(brand: &str, model: &str, year: i32) -> String {
    slugify(&format!("{brand} {model} {year}"))
}

/// Whether a string is already a well-formed slug.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}

fn fold_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_slug() {
        assert_eq!(slugify("Ducati Monster SP"), "ducati-monster-sp");
    }

    #[test]
    fn collapses_punctuation_and_trims() {
        assert_eq!(slugify("  --KTM 390 / Duke!! "), "ktm-390-duke");
    }

    #[test]
    fn folds_accents() {
        assert_eq!(slugify("Blouson Été Cuir"), "blouson-ete-cuir");
    }

    #[test]
    fn empty_and_symbol_only_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn vehicle_slug_includes_year() {
        assert_eq!(vehicle_slug("Yamaha", "Ténéré 700", 2022), "yamaha-tenere-700-2022");
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("bmw-r-1250-gs"));
        assert!(!is_valid_slug("BMW R 1250"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug(""));
    }
}
