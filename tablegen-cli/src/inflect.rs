/// Words whose trailing `s` is not a plural marker.
const SINGULAR_ENDINGS: [&str; 4] = ["ss", "us", "is", "news"];

/// Converts an English plural into its singular form.
///
/// This is a basic heuristic that handles common table names (`users`, `categories`,
/// `addresses`, `boxes`). Case is preserved.
pub fn singularize(plural: &str) -> String {
    let lower = plural.to_ascii_lowercase();

    if SINGULAR_ENDINGS.iter().any(|e| lower.ends_with(e)) {
        return plural.to_owned();
    }

    if lower.ends_with("ies") && plural.len() > 3 {
        let stem = &plural[..plural.len() - 3];
        let y = if plural.ends_with("IES") { "Y" } else { "y" };

        format!("{stem}{y}")
    } else if ["sses", "shes", "ches", "xes", "zes"]
        .iter()
        .any(|e| lower.ends_with(e))
    {
        plural[..plural.len() - 2].to_owned()
    } else if lower.ends_with('s') && plural.len() > 1 {
        plural[..plural.len() - 1].to_owned()
    } else {
        plural.to_owned()
    }
}
