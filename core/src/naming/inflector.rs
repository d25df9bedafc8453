#![deny(missing_docs)]

//! # Inflector
//!
//! Word-level helpers shared by the naming strategies: casing joins,
//! slugging, and English noun singularization.

/// Words whose singular and plural are the same.
const UNINFLECTED: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "information",
    "media",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Plural -> singular forms that no suffix rule covers. Matched on whole words.
const IRREGULAR: &[(&str, &str)] = &[
    ("aliases", "alias"),
    ("analyses", "analysis"),
    ("axes", "axis"),
    ("buses", "bus"),
    ("campuses", "campus"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("echoes", "echo"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("heroes", "hero"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("oxen", "ox"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("potatoes", "potato"),
    ("shelves", "shelf"),
    ("shoes", "shoe"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("tomatoes", "tomato"),
    ("vertices", "vertex"),
    ("viruses", "virus"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Uppercases the first character.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character.
pub fn uncapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercases the first letter of every word delimited by ` `, `_` or `-`, then
/// drops the delimiters. Inner capitals are kept.
///
/// e.g. `get_petById` -> `GetPetById`
pub fn classify(word: &str) -> String {
    word.split([' ', '_', '-']).map(capitalize).collect()
}

/// [`classify`] with a lowercase first letter.
///
/// e.g. `GetPetById` -> `getPetById`
pub fn camelize(word: &str) -> String {
    uncapitalize(&classify(word))
}

/// Splits arbitrary text into ASCII slug tokens.
///
/// Non-ASCII characters are transliterated first; runs of anything that is not
/// alphanumeric separate tokens. Case is kept, so `getHTTPResponse` is a single
/// token.
pub fn slug_tokens(text: &str) -> Vec<String> {
    deunicode::deunicode(text)
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins slug tokens into a slug with `separator`.
pub fn slugify(text: &str, separator: &str) -> String {
    slug_tokens(text).join(separator)
}

/// Returns the singular form of an English noun, keeping the case of its first letter.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNINFLECTED.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return match_case(word, singular);
    }

    let stem_len = |suffix_len: usize| word.len() - suffix_len;

    if lower.len() > 4 && lower.ends_with("ies") {
        return format!("{}y", &word[..stem_len(3)]);
    }
    if lower.ends_with("quizzes") {
        return word[..stem_len(3)].to_string();
    }
    if ["sses", "xes", "ches", "shes", "zzes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return word[..stem_len(2)].to_string();
    }
    if ["ss", "us", "is"].iter().any(|suffix| lower.ends_with(suffix)) {
        return word.to_string();
    }
    if lower.len() > 1 && lower.ends_with('s') {
        return word[..stem_len(1)].to_string();
    }

    word.to_string()
}

fn match_case(original: &str, replacement: &str) -> String {
    let is_upper = |c: char| c.is_ascii_uppercase();
    if original.len() > 1 && original.chars().all(is_upper) {
        replacement.to_ascii_uppercase()
    } else if original.chars().next().is_some_and(is_upper) {
        capitalize(replacement)
    } else {
        replacement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_and_camelize() {
        assert_eq!(classify("get_pet-by id"), "GetPetById");
        assert_eq!(classify("getPetById"), "GetPetById");
        assert_eq!(camelize("GetPetById"), "getPetById");
        assert_eq!(camelize(""), "");
    }

    #[test]
    fn test_slug_tokens() {
        assert_eq!(slug_tokens("find-pets_by status"), vec!["find", "pets", "by", "status"]);
        assert_eq!(slug_tokens("  pets::list  "), vec!["pets", "list"]);
        assert_eq!(slug_tokens("Créer l'élève"), vec!["Creer", "l", "eleve"]);
        assert!(slug_tokens("!!!").is_empty());
        assert_eq!(slugify("Get Pet", "-"), "Get-Pet");
    }

    #[test]
    fn test_slug_tokens_keep_case() {
        assert_eq!(slug_tokens("findPetsByStatus"), vec!["findPetsByStatus"]);
        assert_eq!(slug_tokens("getHTTPResponse"), vec!["getHTTPResponse"]);
        assert_eq!(slug_tokens("get_HTTP.response"), vec!["get", "HTTP", "response"]);
    }

    #[test]
    fn test_singularize_regular() {
        assert_eq!(singularize("Pets"), "Pet");
        assert_eq!(singularize("Categories"), "Category");
        assert_eq!(singularize("Boxes"), "Box");
        assert_eq!(singularize("Addresses"), "Address");
        assert_eq!(singularize("Responses"), "Response");
        assert_eq!(singularize("Ties"), "Tie");
        assert_eq!(singularize("Quizzes"), "Quiz");
        assert_eq!(singularize("PopQuizzes"), "PopQuiz");
        assert_eq!(singularize("Buzzes"), "Buzz");
    }

    #[test]
    fn test_singularize_leaves_singulars_alone() {
        assert_eq!(singularize("Pet"), "Pet");
        assert_eq!(singularize("Status"), "Status");
        assert_eq!(singularize("Address"), "Address");
        assert_eq!(singularize("Analysis"), "Analysis");
        assert_eq!(singularize(""), "");
    }

    #[test]
    fn test_singularize_irregular_and_uninflected() {
        assert_eq!(singularize("People"), "Person");
        assert_eq!(singularize("children"), "child");
        assert_eq!(singularize("STATUSES"), "STATUS");
        assert_eq!(singularize("Series"), "Series");
        assert_eq!(singularize("Data"), "Data");
    }
}
