use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug separator regex"));

static COMBINING_MARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Mn}+").expect("valid combining mark regex"));

/// Lowercases, strips Vietnamese diacritics, and joins words with `-`,
/// so "Hà Giang" becomes "ha-giang". Decomposed (NFD) input folds the same way
/// because combining marks are dropped after the precomposed table runs.
pub fn slugify(text: &str) -> String {
    let folded: String = text.chars().flat_map(char::to_lowercase).map(fold_char).collect();
    let folded = COMBINING_MARK_RE.replace_all(&folded, "");
    NON_SLUG_RE
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ' | 'ẩ'
        | 'ẫ' | 'ậ' => 'a',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' => 'e',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => 'i',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ' | 'ở'
        | 'ỡ' | 'ợ' => 'o',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' => 'u',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => 'y',
        'đ' => 'd',
        other => other,
    }
}

/// A needle with no letters or digits has an empty slug and matches nothing.
pub fn slug_contains(haystack: &str, needle: &str) -> bool {
    let needle = slugify(needle);
    !needle.is_empty() && slugify(haystack).contains(needle.as_str())
}
