use chrono::{TimeZone, Utc};
use docform::{
    bson::{Bson, DateTime, doc, oid::ObjectId},
    prelude::*,
};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize, Document)]
pub struct Address {
    #[field(string, required)]
    pub street: String,
    #[field(string)]
    pub city: String,
    pub geocoded: bool,
}

#[derive(Debug, Clone, Serialize, Document)]
pub struct Person {
    #[field(object_id)]
    pub id: ObjectId,
    #[field(string, required)]
    pub firstname: String,
    #[field(string, required)]
    pub lastname: String,
    #[field(email, name = "mail")]
    #[serde(rename = "mail")]
    pub email: String,
    #[field(datetime)]
    pub dob: Option<DateTime>,
    #[field(list, nested)]
    pub addresses: Vec<Address>,
    #[field(sorted_list)]
    pub nicknames: Vec<String>,
    #[field(dict)]
    pub extra: Bson,
    #[field(geo_point)]
    pub location: Vec<f64>,
    #[field(boolean)]
    pub active: bool,
    #[field(custom = "money")]
    pub salary: i64,
    pub session_token: String,
}

static PAYROLL_TYPES: Lazy<TypeMap> = Lazy::new(|| {
    TypeMap::builder()
        .map(FieldKind::Custom("money"), SchemaType::Decimal)
        .build()
});

fn payroll_types() -> &'static TypeMap {
    &PAYROLL_TYPES
}

#[derive(Debug, Clone, Serialize, Document)]
#[document(type_map = payroll_types)]
pub struct PayrollEntry {
    #[field(string, required)]
    pub employee: String,
    #[field(custom = "money")]
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Document)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Account {
    #[field(string, required)]
    pub display_name: String,
    #[field(int)]
    #[serde(rename = "logins")]
    pub login_count: i32,
    #[field(string)]
    pub r#type: String,
    #[field(list, nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_addresses: Option<Vec<Address>>,
}

fn account(past_addresses: Option<Vec<Address>>) -> Account {
    Account {
        display_name: "Ada L.".to_string(),
        login_count: 7,
        r#type: "admin".to_string(),
        past_addresses,
    }
}

fn person() -> Person {
    Person {
        id: ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap(),
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        dob: Some(DateTime::from_chrono(Utc.with_ymd_and_hms(1815, 12, 10, 0, 0, 0).unwrap())),
        addresses: vec![
            Address { street: "12 St James's Sq".to_string(), city: "London".to_string(), geocoded: true },
            Address { street: "Ockham Park".to_string(), city: "Surrey".to_string(), geocoded: false },
        ],
        nicknames: vec!["Enchantress of Numbers".to_string()],
        extra: Bson::Document(doc! { "notes": "first programmer" }),
        location: vec![51.5, -0.13],
        active: true,
        salary: 100,
        session_token: "secret".to_string(),
    }
}

#[test]
fn derive_declares_annotated_fields_in_order() {
    let names: Vec<&str> = Person::fields().iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        vec![
            "id", "firstname", "lastname", "mail", "dob", "addresses", "nicknames", "extra",
            "location", "active", "salary",
        ]
    );

    let fields = Person::fields();
    assert_eq!(fields[0].kind, FieldKind::ObjectId);
    assert!(fields[1].required);
    assert!(!fields[3].required);
    assert!(fields[5].items.is_some());
    assert!(fields[6].items.is_none());
    assert_eq!(fields[6].kind, FieldKind::SortedList);
    assert_eq!(fields[10].kind, FieldKind::Custom("money"));
}

#[test]
fn to_json_stringifies_ids_and_datetimes() {
    let value = person().to_json().unwrap();

    assert_eq!(value["id"], json!("64b7f0c2a1b2c3d4e5f60718"));
    assert_eq!(value["dob"], json!("1815-12-10 00:00:00"));
    assert_eq!(value["mail"], json!("ada@example.com"));
    assert_eq!(value["active"], json!(true));
    assert_eq!(value["extra"], json!({ "notes": "first programmer" }));
    assert!(value.get("session_token").is_none());
}

#[test]
fn to_dict_keys_match_declarations_and_recurse_into_addresses() {
    let dict = person().to_dict().unwrap();

    let keys: Vec<&str> = dict.keys().map(String::as_str).collect();
    let declared: Vec<&str> = Person::fields().iter().map(|f| f.name).collect();
    assert_eq!(keys, declared);

    // Address's own conversion drops its undeclared `geocoded` field.
    assert_eq!(
        dict.get_array("addresses").unwrap(),
        &vec![
            Bson::Document(doc! { "street": "12 St James's Sq", "city": "London" }),
            Bson::Document(doc! { "street": "Ockham Park", "city": "Surrey" }),
        ]
    );
    assert_eq!(
        dict.get_array("nicknames").unwrap(),
        &vec![Bson::String("Enchantress of Numbers".to_string())]
    );
}

#[test]
fn schema_excludes_unsupported_and_custom_kinds() {
    let schema = person().schema();
    let names: Vec<&str> = schema.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "firstname", "lastname", "mail", "dob", "active"]);
    assert_eq!(schema.child("dob").map(|c| c.schema_type), Some(SchemaType::DateTime));
}

#[test]
fn document_type_map_override_is_used() {
    let entry = PayrollEntry { employee: "ada".to_string(), amount: 10 };
    let schema = entry.schema();
    assert_eq!(schema.child("amount").map(|c| c.schema_type), Some(SchemaType::Decimal));
    assert_eq!(schema.children.len(), 2);
}

#[test]
fn forms_pick_buttons_by_mode() {
    let person = person();

    let create = person.make_form(true, None);
    assert_eq!(create.button_names(), vec!["submit", "cancel"]);

    let edit = person.make_form(false, None);
    assert_eq!(edit.button_names(), vec!["submit", "cancel", "delete"]);
    assert_eq!(edit.schema, person.schema());
}

#[test]
fn query_results_and_groups_encode_every_document() {
    let people = vec![person(), person()];

    let listing = JsonSource::query(&people).to_json().unwrap();
    assert_eq!(listing.as_array().map(Vec::len), Some(2));
    assert_eq!(listing[1]["id"], json!("64b7f0c2a1b2c3d4e5f60718"));

    let grouped = JsonSource::group_by(&people, |p| json!(p.lastname)).to_json().unwrap();
    assert_eq!(grouped.as_array().map(Vec::len), Some(1));
    assert_eq!(grouped[0][0], json!("Lovelace"));
    assert_eq!(grouped[0][1].as_array().map(Vec::len), Some(2));
}

#[test]
fn unsupported_values_are_rejected_at_the_boundary() {
    let err = JsonSource::try_from(json!(3.5)).err().unwrap();
    assert_eq!(err.to_string(), "Could not JSON-encode type 'float': 3.5");
}

#[test]
fn declared_names_follow_serde_renames() {
    let names: Vec<&str> = Account::fields().iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["displayName", "logins", "type", "pastAddresses"]);

    let value = account(None).to_json().unwrap();
    assert_eq!(value["displayName"], json!("Ada L."));
    assert_eq!(value["logins"], json!(7));
    assert_eq!(value["type"], json!("admin"));
    assert_eq!(value["pastAddresses"], json!(null));

    let schema = account(None).schema();
    assert_eq!(schema.child("displayName").map(|c| c.title.as_str()), Some("Display Name"));
}

#[test]
fn optional_nested_lists_convert_their_elements() {
    let moved = account(Some(vec![Address {
        street: "Ockham Park".to_string(),
        city: "Surrey".to_string(),
        geocoded: true,
    }]));
    let dict = moved.to_dict().unwrap();
    assert_eq!(
        dict.get_array("pastAddresses").unwrap(),
        &vec![Bson::Document(doc! { "street": "Ockham Park", "city": "Surrey" })]
    );

    let dict = account(None).to_dict().unwrap();
    assert_eq!(dict.get_array("pastAddresses").unwrap(), &Vec::<Bson>::new());
}
