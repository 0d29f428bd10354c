use std::fmt::Write;

use tablegen::ModelInfo;

const MODEL_TEMPLATE: &str = r#"package {{package}}

{{imports}}type {{struct}} struct {
{{fields}}}

// TableName sets the insert table name for this struct type
func ({{alias}} *{{struct}}) TableName() string {
	return {{table}}
}
"#;

/// Renders `model` into a Go source file.
///
/// # Errors
///
/// If a field declaration is not of the form `<identifier> <type> [<tags>]`.
pub fn render_model(model: &ModelInfo) -> eyre::Result<String> {
    let fields = format_fields(model.fields())?;

    let imports = if model.fields().iter().any(|e| e.contains("time.Time")) {
        "import \"time\"\n\n"
    } else {
        ""
    };

    substitute(MODEL_TEMPLATE, |placeholder| match placeholder {
        "package" => Some(model.package_name().to_owned()),
        "imports" => Some(imports.to_owned()),
        "struct" => Some(model.struct_name().to_owned()),
        "alias" => Some(model.short_alias().to_string()),
        "table" => Some(go_string_literal(model.table_name())),
        "fields" => Some(fields.clone()),
        _ => None,
    })
}

/// Replaces every `{{name}}` in `template` with `lookup(name)`. Substituted text is never scanned
/// again.
fn substitute(template: &str, lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);

        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| eyre::eyre!("Unterminated placeholder in template"))?;
        let placeholder = &after[..end];

        let value =
            lookup(placeholder).ok_or_else(|| eyre::eyre!("Unknown placeholder `{placeholder}`"))?;

        out.push_str(&value);
        rest = &after[end + 2..];
    }

    out.push_str(rest);

    Ok(out)
}

/// Quotes `value` as an interpreted Go string literal.
fn go_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);

    out.push('"');

    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }

    out.push('"');

    out
}

/// Lays out the field block the way gofmt would, with identifiers, types and tags each starting
/// in the same column.
fn format_fields(fields: &[String]) -> eyre::Result<String> {
    let rows = fields
        .iter()
        .map(|field| {
            let (identifier, rest) = field
                .split_once(' ')
                .ok_or_else(|| eyre::eyre!("Malformed field declaration `{field}`"))?;
            let (type_repr, tags) = rest.split_once(' ').unwrap_or((rest, ""));

            if identifier.is_empty() || type_repr.is_empty() {
                return Err(eyre::eyre!("Malformed field declaration `{field}`"));
            }

            Ok((identifier, type_repr, tags))
        })
        .collect::<eyre::Result<Vec<_>>>()?;

    let identifier_width = rows.iter().map(|e| e.0.len()).max().unwrap_or_default();
    let type_width = rows.iter().map(|e| e.1.len()).max().unwrap_or_default();

    let mut out = String::new();

    for (identifier, type_repr, tags) in rows {
        let line = format!("\t{identifier:<identifier_width$} {type_repr:<type_width$} {tags}");

        writeln!(out, "{}", line.trim_end())?;
    }

    Ok(out)
}

#[cfg(test)]
mod test {
    use super::{format_fields, go_string_literal, render_model, substitute};
    use pretty_assertions::assert_eq;
    use tablegen::{AnnotationOptions, ColumnDescriptor, ModelBuilder};

    #[test]
    fn test_render_model() {
        let columns = [
            ColumnDescriptor::new("id", "bigint", false, 0),
            ColumnDescriptor::new("display_name", "varchar", true, 1),
            ColumnDescriptor::new("created_at", "timestamp", false, 2),
        ];

        let model = ModelBuilder::default()
            .build(
                "members",
                "member",
                "model",
                &columns,
                AnnotationOptions {
                    persistence: false,
                    serialization: true,
                },
            )
            .expect("Failed to build model");

        let expected = r#"package model

import "time"

type Member struct {
	ID          int64     `json:"id"`
	DisplayName *string   `json:"display_name"`
	CreatedAt   time.Time `json:"created_at"`
}

// TableName sets the insert table name for this struct type
func (m *Member) TableName() string {
	return "members"
}
"#;

        assert_eq!(render_model(&model).expect("Failed to render"), expected);
    }

    #[test]
    fn test_placeholders_in_values_are_not_expanded() {
        let model = ModelBuilder::default()
            .build(
                "{{struct}}_logs",
                "logs",
                "{{fields}}",
                &[ColumnDescriptor::new("id", "int", false, 0)],
                AnnotationOptions::none(),
            )
            .expect("Failed to build model");

        let source = render_model(&model).expect("Failed to render");

        assert!(source.starts_with("package {{fields}}\n"));
        assert!(source.contains("\treturn \"{{struct}}_logs\"\n"));
        assert_eq!(source.matches("\tID int32\n").count(), 1);
    }

    #[test]
    fn test_table_name_is_escaped() {
        assert_eq!(go_string_literal("plain"), r#""plain""#);
        assert_eq!(go_string_literal(r#"we"ird\"#), r#""we\"ird\\""#);
        assert_eq!(go_string_literal("tab\there\u{1}"), r#""tab\there\u0001""#);
    }

    #[test]
    fn test_unknown_placeholder() {
        assert!(substitute("{{nope}}", |_| None).is_err());
        assert!(substitute("{{open", |_| Some(String::new())).is_err());
        assert_eq!(
            substitute("a {{x}} b", |_| Some("{{x}}".to_owned())).expect("Failed to substitute"),
            "a {{x}} b"
        );
    }

    #[test]
    fn test_without_tags() {
        let fields = ["ID int32".to_owned(), "Nickname *string".to_owned()];

        assert_eq!(
            format_fields(&fields).expect("Failed to format"),
            "\tID       int32\n\tNickname *string\n"
        );
    }

    #[test]
    fn test_malformed_field() {
        assert!(format_fields(&["Nameless".to_owned()]).is_err());
        assert!(format_fields(&[" string".to_owned()]).is_err());
    }
}
