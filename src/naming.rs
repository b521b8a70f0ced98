//! Naming-convention helpers shared by every template.
//!
//! All transformations are pure functions over the raw table/column names
//! read during introspection. Nothing here caches or mutates shared state,
//! so the same input always produces the same output regardless of what was
//! generated before.

/// Convert a snake_case (or kebab-case) name to PascalCase.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(to_pascal_case("drug_items"), "DrugItems");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-'])
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a snake_case (or kebab-case) name to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert a snake_case name to kebab-case, lowercasing as it goes.
///
/// Used for generated file names and URL path segments.
pub fn to_kebab_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c == '_' {
                '-'
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

/// Render a snake_case column name as a human-readable label.
///
/// `dept_code` becomes `Dept Code`. Used for table headers and form labels
/// in the generated Angular components.
pub fn to_title_case(s: &str) -> String {
    s.split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Naive English singularization for deriving entity names from table names.
///
/// Handles the common plural shapes seen in database schemas
/// (`departments`, `categories`, `statuses`). Uncountable or irregular
/// nouns pass through unchanged, which is acceptable for generated type
/// names the developer owns afterwards.
pub fn singularize(s: &str) -> String {
    if let Some(stem) = s.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if let Some(stem) = s.strip_suffix(suffix) {
            return format!("{stem}{}", &suffix[..suffix.len() - 2]);
        }
    }
    if let Some(stem) = s.strip_suffix("ses") {
        return format!("{stem}s");
    }
    if s.ends_with('s') && !s.ends_with("ss") {
        return s[..s.len() - 1].to_string();
    }
    s.to_string()
}

const TS_RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield", "let", "static", "implements", "interface",
    "package", "private", "protected", "public",
];

/// Make a name safe to use as a TypeScript identifier.
///
/// Reserved words get a trailing underscore; anything else passes through.
pub fn ts_safe_ident(s: &str) -> String {
    if TS_RESERVED.contains(&s) {
        format!("{s}_")
    } else {
        s.to_string()
    }
}
