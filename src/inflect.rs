//! English singularization for table names.
//!
//! The generator assumes the conventional primary key `<singular>_id`, so
//! `accounts` maps to `account_id` and `company_types` to `company_type_id`.
//! Only the last `_`-separated word is inflected. The rules cover regular
//! plurals, a handful of irregulars and uncountable nouns; anything else
//! falls through unchanged, in which case the primary key is simply not
//! recognised.

use once_cell::sync::Lazy;
use regex::Regex;

static UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
    "staff",
];

static IRREGULAR: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("children", "child"),
    ("criteria", "criterion"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("indices", "index"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

/// Ordered suffix rules, first match wins. Rules see the lowercased word;
/// the original casing is restored afterwards.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(quiz)zes$", "$1"),
        (r"(matri)ces$", "${1}x"),
        (r"(vert|ind)ices$", "${1}ex"),
        (r"^(ox)en$", "$1"),
        (r"(alias|status|bus|campus|virus)es$", "$1"),
        (r"(octop|vir)i$", "${1}us"),
        (r"^(ax|cris|test)es$", "${1}is"),
        (r"(shoe|move|cookie|movie)s$", "$1"),
        (r"(x|ch|ss|sh|zz)es$", "$1"),
        (r"([ml])ice$", "${1}ouse"),
        (r"([^aeiouy]|qu)ies$", "${1}y"),
        (r"^(kni|wi|li)ves$", "${1}fe"),
        (r"([lr])ves$", "${1}f"),
        (r"(ar|ea)ves$", "${1}f"),
        (r"([ti])a$", "${1}um"),
        (r"(n)ews$", "${1}ews"),
        (r"(ss|us|is)$", "$1"),
        (r"s$", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("singular rule is a valid regex"),
            replacement,
        )
    })
    .collect()
});

/// Singular form of a (snake_case) table name.
pub fn singularize(name: &str) -> String {
    match name.rsplit_once('_') {
        Some((head, last)) if !last.is_empty() => {
            format!("{}_{}", head, singularize_word(last))
        }
        _ => singularize_word(name),
    }
}

/// Conventional primary key column for a table: `singular(name) + "_id"`.
pub fn primary_key_for(table: &str) -> String {
    format!("{}_id", singularize(table))
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return match_case(word, singular);
    }
    for (re, replacement) in RULES.iter() {
        if re.is_match(&lower) {
            return match_case(word, &re.replace(&lower, *replacement));
        }
    }
    word.to_string()
}

fn match_case(original: &str, replacement: &str) -> String {
    if !original.is_empty() && original.chars().all(|c| !c.is_lowercase()) {
        replacement.to_uppercase()
    } else if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(singularize("accounts"), "account");
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("branches"), "branch");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("wolves"), "wolf");
        assert_eq!(singularize("knives"), "knife");
    }

    #[test]
    fn test_snake_case_inflects_last_word() {
        assert_eq!(singularize("company_types"), "company_type");
        assert_eq!(singularize("order_line_items"), "order_line_item");
        assert_eq!(singularize("user_categories"), "user_category");
    }

    #[test]
    fn test_irregular_and_uncountable() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("children"), "child");
        assert_eq!(singularize("sheep"), "sheep");
        assert_eq!(singularize("news"), "news");
        assert_eq!(singularize("equipment"), "equipment");
    }

    #[test]
    fn test_already_singular() {
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("account"), "account");
        assert_eq!(singularize("address"), "address");
    }

    #[test]
    fn test_primary_key_for() {
        assert_eq!(primary_key_for("accounts"), "account_id");
        assert_eq!(primary_key_for("company_types"), "company_type_id");
        assert_eq!(primary_key_for("people"), "person_id");
    }

    #[test]
    fn test_match_case() {
        assert_eq!(singularize("People"), "Person");
        assert_eq!(singularize("PEOPLE"), "PERSON");
        assert_eq!(singularize("Categories"), "Category");
    }

    #[test]
    fn test_rules_ignore_case() {
        assert_eq!(primary_key_for("ACCOUNTS"), "ACCOUNT_id");
        assert_eq!(primary_key_for("COMPANY_TYPES"), "COMPANY_TYPE_id");
        assert_eq!(singularize("BOXES"), "BOX");
    }

    #[test]
    fn test_fe_plurals_need_whole_word() {
        assert_eq!(singularize("olives"), "olive");
        assert_eq!(singularize("lives"), "life");
        assert_eq!(singularize("wives"), "wife");
    }
}
