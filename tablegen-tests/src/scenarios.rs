use pretty_assertions::assert_eq;
use tablegen::{AnnotationOptions, ColumnDescriptor, ModelBuilder};

fn singular(word: &str) -> String {
    word.strip_suffix('s').unwrap_or(word).to_owned()
}

#[test]
fn test_user_accounts_with_all_annotations() {
    let builder = ModelBuilder::default().with_singularizer(&singular);
    let columns = [
        ColumnDescriptor::new("id", "int", false, 0),
        ColumnDescriptor::new("api_key", "varchar", true, 1),
    ];

    let model = builder
        .build(
            "user_accounts",
            "user_accounts",
            "model",
            &columns,
            AnnotationOptions::all(),
        )
        .expect("Failed to build model");

    assert_eq!(model.struct_name(), "UserAccount");
    assert_eq!(model.short_alias(), 'u');
    assert_eq!(
        model.fields(),
        [
            r#"ID int32 `orm:"column:id;primary_key" json:"id"`"#,
            r#"APIKey *string `orm:"column:api_key" json:"api_key"`"#,
        ]
    );
}

#[test]
fn test_unrecognized_type_is_dropped() {
    let builder = ModelBuilder::default();
    let columns = [
        ColumnDescriptor::new("id", "bigint", false, 0),
        ColumnDescriptor::new("external_ref", "uuid", false, 1),
        ColumnDescriptor::new("created_at", "datetime", true, 2),
    ];

    let model = builder
        .build(
            "events",
            "events",
            "model",
            &columns,
            AnnotationOptions::none(),
        )
        .expect("Failed to build model");

    assert_eq!(model.fields(), ["ID int64", "CreatedAt *time.Time"]);
}

#[test]
fn test_leading_digit_table_name() {
    let builder = ModelBuilder::default().with_singularizer(&singular);

    let model = builder
        .build(
            "2fa_codes",
            "2fa_codes",
            "model",
            &[ColumnDescriptor::new("code", "char", false, 0)],
            AnnotationOptions::none(),
        )
        .expect("Failed to build model");

    assert_eq!(model.struct_name(), "TwoFaCode");
    assert_eq!(model.short_alias(), 't');
}

#[test]
fn test_no_annotations() {
    let builder = ModelBuilder::default();
    let columns = [
        ColumnDescriptor::new("id", "int", false, 0),
        ColumnDescriptor::new("avatar", "blob", true, 1),
        ColumnDescriptor::new("score", "float", true, 2),
    ];

    let model = builder
        .build(
            "players",
            "players",
            "game",
            &columns,
            AnnotationOptions::none(),
        )
        .expect("Failed to build model");

    assert_eq!(model.package_name(), "game");
    assert_eq!(
        model.fields(),
        ["ID int32", "Avatar []byte", "Score *float32"]
    );
    assert!(model.fields().iter().all(|e| !e.contains('`')));
}

#[test]
fn test_model_serializes_for_templates() {
    let model = ModelBuilder::default()
        .build(
            "tags",
            "tags",
            "model",
            &[ColumnDescriptor::new("label", "text", false, 0)],
            AnnotationOptions::none(),
        )
        .expect("Failed to build model");

    let json = serde_json::to_value(&model).expect("Failed to serialize model");

    assert_eq!(
        json,
        serde_json::json!({
            "package_name": "model",
            "struct_name": "Tags",
            "short_alias": "t",
            "table_name": "tags",
            "fields": ["Label string"],
        })
    );
}
