//! End-to-end scenarios: author a schema in a session, project it, and run
//! the validation facade over user input the way the presentation layer does.

use formwork_eval::{validate_form, ValidationConfig, ValidationFacade};
use formwork_schema::{
    BuilderHint, BuilderType, FieldType, FormSchema, FormValues, SchemaSession, ValueConstraints,
};
use serde_json::{json, Value};

fn values(pairs: &[(&str, Value)]) -> FormValues {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
}

// ──────────────────────────────────────────────
// Leave request form
// ──────────────────────────────────────────────

#[test]
fn half_day_hides_and_skips_days() {
    let schema = FormSchema::sample();
    let renderer = formwork_schema::project(&schema);
    let input = values(&[
        ("full_name", json!("Ada Lovelace")),
        ("email", json!("ada@example.com")),
        ("duration", json!("half")),
        ("days", json!("many")),
    ]);
    let facade = ValidationFacade::new(&schema, &renderer, &input);

    assert!(!facade.is_field_visible("days"));
    assert!(!facade.visible_field_names().contains(&"days".to_string()));
    let result = facade.validate();
    assert!(result.is_success(), "unexpected errors: {:?}", result.errors());
}

#[test]
fn full_day_shows_optional_days() {
    let schema = FormSchema::sample();
    let renderer = formwork_schema::project(&schema);
    let input = values(&[
        ("full_name", json!("Ada Lovelace")),
        ("email", json!("ada@example.com")),
        ("duration", json!("full")),
    ]);
    let facade = ValidationFacade::new(&schema, &renderer, &input);

    assert!(facade.is_field_visible("days"));
    assert!(!facade.is_field_required("days"));
    assert!(facade.validate().is_success());
}

#[test]
fn decimal_check_precedes_bounds() {
    let schema = FormSchema::sample();
    let renderer = formwork_schema::project(&schema);
    let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());

    assert_eq!(
        facade.validate_field("days", Some(&json!(1000000.5))).as_deref(),
        Some("Decimal values are not allowed")
    );
    assert_eq!(
        facade.validate_field("days", Some(&json!(1000001))).as_deref(),
        Some("Value must not exceed 1000000")
    );
    assert_eq!(facade.validate_field("days", Some(&json!("12"))), None);
}

#[test]
fn email_format() {
    let schema = FormSchema::sample();
    let renderer = formwork_schema::project(&schema);
    let facade = ValidationFacade::new(&schema, &renderer, &FormValues::new());

    assert_eq!(
        facade.validate_field("email", Some(&json!("not-an-email"))).as_deref(),
        Some("Please enter a valid email address")
    );
    assert_eq!(facade.validate_field("email", Some(&json!("a@b.co"))), None);
}

// ──────────────────────────────────────────────
// Authoring session feeding the facade
// ──────────────────────────────────────────────

#[test]
fn edits_in_session_reach_validation() {
    let mut session = SchemaSession::with_schema(FormSchema::new("order", "Order"));
    let kind = session.add_field(FieldType::Radio);
    let qty = session.add_field(FieldType::Number);

    let visible_when = kind.clone();
    session
        .update_field(&qty, |f| {
            f.rule = Some("required".into());
            f.visible = Some(
                std::iter::once((visible_when, "is:option2".to_string())).collect(),
            );
            f.value_constraints = Some(ValueConstraints {
                minimum: Some(1u64.into()),
                maximum: Some(10u64.into()),
                allow_decimal: Some(0),
            });
        })
        .unwrap();

    session.set_value(kind.as_str(), json!("option1"));
    let config = ValidationConfig::default();
    assert!(validate_form(session.schema(), session.values(), &config).is_success());

    session.set_value(kind.as_str(), json!("option2"));
    let result = validate_form(session.schema(), session.values(), &config);
    assert_eq!(result.error(&qty), Some("This field is required"));

    session.set_value(qty.as_str(), json!(11));
    let result = validate_form(session.schema(), session.values(), &config);
    assert_eq!(result.error(&qty), Some("Value must not exceed 10"));

    session.set_value(qty.as_str(), json!(3));
    assert!(validate_form(session.schema(), session.values(), &config).is_success());
}

#[test]
fn removed_dependency_hides_dependent_field() {
    let mut session = SchemaSession::new();
    session.set_value("duration", json!("full"));
    session.remove_field("duration").unwrap();

    let renderer = session.renderer_schema();
    let facade = ValidationFacade::new(session.schema(), &renderer, session.values());
    assert!(!facade.is_field_visible("days"));
    assert!(facade.values().get("duration").is_none());
}

#[test]
fn imported_schema_validates_with_strict_config() {
    let mut source = SchemaSession::with_schema(FormSchema::new("event", "Event"));
    let date = source.add_field(FieldType::Date);
    let topics = source.add_field(FieldType::Checkbox);
    let text = source.export_schema().unwrap();

    let mut target = SchemaSession::new();
    target.import_schema(&text).unwrap();
    assert_eq!(target.schema(), source.schema());
    assert_eq!(
        target.schema().get(&date).and_then(|f| f.builder.clone()),
        Some(BuilderHint {
            builder_type: BuilderType::DatePicker
        })
    );

    let input = values(&[
        (date.as_str(), json!("2026-02-30")),
        (topics.as_str(), json!(["option1", "option9"])),
    ]);

    let lenient = validate_form(target.schema(), &input, &ValidationConfig::default());
    assert!(lenient.is_success());

    let strict = validate_form(target.schema(), &input, &ValidationConfig::strict());
    assert_eq!(strict.error(&date), Some("Please enter a valid date"));
    assert_eq!(strict.error(&topics), Some("Please select valid options"));
}

#[test]
fn custom_messages_from_toml() {
    let config = ValidationConfig::from_toml_str(
        r#"
        [messages]
        required = "Pflichtfeld"
        above_maximum = "Höchstens {max}"
        "#,
    )
    .unwrap();

    let schema = FormSchema::sample();
    let input = values(&[
        ("email", json!("ada@example.com")),
        ("duration", json!("full")),
        ("days", json!(2000000)),
    ]);
    let result = validate_form(&schema, &input, &config);
    assert_eq!(result.error("full_name"), Some("Pflichtfeld"));
    assert_eq!(result.error("days"), Some("Höchstens 1000000"));
    assert_eq!(result.errors().len(), 2);
}
