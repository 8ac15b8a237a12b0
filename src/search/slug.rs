use serde_json::Value;

pub const SLUG_SEPARATOR: char = '-';

/// Joins a slug name and its disambiguating postfix.
///
/// The first record carrying a given slug name is stored without a postfix
/// (empty or zero), so only a non-empty postfix is appended.
pub fn construct_slug(slug_name: &str, slug_postfix: Option<&str>) -> String {
    match slug_postfix.map(str::trim) {
        Some(postfix) if !postfix.is_empty() && postfix != "0" => {
            format!("{}{}{}", slug_name, SLUG_SEPARATOR, postfix)
        }
        _ => slug_name.to_string(),
    }
}

/// Builds a slug from raw store fields. The postfix may be stored as a string
/// or as a number. No slug name means no slug.
pub fn slug_from_fields(slug_name: Option<&Value>, slug_postfix: Option<&Value>) -> Option<String> {
    let name = slug_name.and_then(Value::as_str).map(str::trim)?;
    if name.is_empty() {
        return None;
    }

    let postfix = match slug_postfix {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Some(construct_slug(name, postfix.as_deref()))
}
