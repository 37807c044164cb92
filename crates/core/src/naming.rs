//! Naming-convention transformers.
//!
//! Every transformer segments its input the same way, so one raw identifier
//! such as `BlogPost`, `blog_post`, `blog-post` or `blog post` yields the
//! same class, variable, table, file and URL names.

/// Split an identifier into lowercase-insensitive words.
///
/// Any non-alphanumeric character is a break, and so is a lowercase letter
/// immediately followed by an uppercase one.
pub fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }

        if let Some(p) = prev {
            if p.is_lowercase() && c.is_uppercase() && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
        prev = Some(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}

/// `user_account` -> `UserAccount`
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// `user_account` -> `userAccount`
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// `UserAccount` -> `user_account`
pub fn to_snake_case(s: &str) -> String {
    join_lowercase(s, "_")
}

/// `UserAccount` -> `user-account`
pub fn to_kebab_case(s: &str) -> String {
    join_lowercase(s, "-")
}

fn join_lowercase(s: &str, separator: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `My-Cool_App` -> `my.cool.app`
pub fn to_package_name(s: &str) -> String {
    s.to_lowercase().replace(['-', '_'], ".")
}

/// Naive English pluralisation used for table names and URL segments.
///
/// Only the final word is affected, so `blog_post` becomes `blog_posts`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    if let Some(stem) = word.strip_suffix(['y', 'Y']) {
        let before = stem.chars().last();
        if before.is_some_and(|c| c.is_alphabetic() && !"aeiouAEIOU".contains(c)) {
            return format!("{}ies", stem);
        }
    }

    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("sh")
        || lower.ends_with("ch")
    {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}

/// Every derived form of one raw identifier, computed once.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NameVariants {
    pub raw: String,
    pub pascal: String,
    pub camel: String,
    pub snake: String,
    pub kebab: String,
}

impl NameVariants {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            pascal: to_pascal_case(raw),
            camel: to_camel_case(raw),
            snake: to_snake_case(raw),
            kebab: to_kebab_case(raw),
        }
    }

    /// `blog_posts`
    pub fn plural_snake(&self) -> String {
        pluralize(&self.snake)
    }

    /// `blog-posts`
    pub fn plural_kebab(&self) -> String {
        pluralize(&self.kebab)
    }

    /// `blogPosts`
    pub fn plural_camel(&self) -> String {
        pluralize(&self.camel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segmentation_is_uniform_across_styles() {
        for input in [
            "UserAccount",
            "userAccount",
            "user_account",
            "user-account",
            "user account",
        ] {
            let words: Vec<String> = split_words(input).iter().map(|w| w.to_lowercase()).collect();
            assert_eq!(words, vec!["user", "account"]);
            assert_eq!(to_snake_case(input), "user_account");
            assert_eq!(to_kebab_case(input), "user-account");
            assert_eq!(to_pascal_case(input), "UserAccount");
            assert_eq!(to_camel_case(input), "userAccount");
        }
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("blog post"), "BlogPost");
        assert_eq!(to_pascal_case("HELLO_world"), "HelloWorld");
        assert_eq!(to_pascal_case("--order--item--"), "OrderItem");
        assert_eq!(to_pascal_case("x"), "X");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("firstName"), "first_name");
        assert_eq!(to_snake_case("BlogPost"), "blog_post");
        assert_eq!(to_snake_case("email"), "email");
        assert_eq!(to_snake_case("order.line item"), "order_line_item");
    }

    #[test]
    fn test_acronyms_are_not_split_between_capitals() {
        assert_eq!(to_snake_case("APIKey"), "apikey");
        assert_eq!(to_pascal_case("APIKey"), "Apikey");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(to_pascal_case(""), "");
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_snake_case(""), "");
        assert_eq!(to_kebab_case(""), "");
        assert_eq!(to_package_name(""), "");
        assert_eq!(pluralize(""), "");
        assert_eq!(to_snake_case("___"), "");
    }

    #[test]
    fn test_to_package_name() {
        assert_eq!(to_package_name("My-Cool_App"), "my.cool.app");
        assert_eq!(to_package_name("shop"), "shop");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("batch"), "batches");
        assert_eq!(pluralize("blog_post"), "blog_posts");
        assert_eq!(pluralize("blog-post"), "blog-posts");
    }

    #[test]
    fn test_name_variants() {
        let names = NameVariants::new("BlogPost");
        assert_eq!(names.pascal, "BlogPost");
        assert_eq!(names.camel, "blogPost");
        assert_eq!(names.snake, "blog_post");
        assert_eq!(names.kebab, "blog-post");
        assert_eq!(names.plural_snake(), "blog_posts");
        assert_eq!(names.plural_kebab(), "blog-posts");
        assert_eq!(names.plural_camel(), "blogPosts");
    }
}
