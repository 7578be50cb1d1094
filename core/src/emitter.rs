//! # Record Emitter
//!
//! Turns a selected service into one Rust source unit holding one record
//! struct per action.
//!
//! Every field is a `String`. The schema carries no per-parameter type
//! information, so no inference is attempted. Each field keeps the original
//! parameter key as a `serde` rename and the parameter description as its doc
//! comment.

use crate::error::{AppError, AppResult};
use crate::naming::{field_name, module_name, type_name};
use crate::schema::{Action, Service};
use crate::selector::SelectedService;
use indexmap::IndexMap;

/// Marker placed on the first line of every generated file.
pub const GENERATED_HEADER: &str = "// AUTOMATICALLY GENERATED, DO NOT EDIT BY HAND!";

/// The type given to every generated field.
pub const FIELD_TYPE: &str = "String";

/// File name of the module index.
pub const INDEX_FILE_NAME: &str = "mod.rs";

const RECORD_DERIVES: &str = "#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]";

/// One field of a generated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedField {
    /// Derived identifier, e.g. `Organization`.
    pub name: String,
    /// Field type, always [`FIELD_TYPE`].
    pub ty: &'static str,
    /// Original parameter key, used as the serialization tag.
    pub tag: String,
    /// Parameter description.
    pub comment: String,
}

/// One generated record, derived from an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRecord {
    /// Derived type name, e.g. `UserGroupsSearch`.
    pub name: String,
    /// Action description.
    pub description: String,
    /// Fields in parameter declaration order.
    pub fields: Vec<GeneratedField>,
}

/// A rendered file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Endpoint the unit belongs to. Empty for the module index.
    pub endpoint: String,
    /// File name relative to the output directory.
    pub file_name: String,
    /// Full file contents.
    pub contents: String,
}

impl GeneratedRecord {
    /// Builds the record for `action` of `endpoint`.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidIdentifier` if a key cannot become an identifier.
    /// * `AppError::NameCollision` if two parameter keys derive the same field name.
    pub fn from_action(endpoint: &str, action: &Action) -> AppResult<Self> {
        let name = type_name(endpoint, &action.key)?;

        let fields = action
            .params
            .iter()
            .map(|param| -> AppResult<GeneratedField> {
                Ok(GeneratedField {
                    name: field_name(&param.key)?,
                    ty: FIELD_TYPE,
                    tag: param.key.clone(),
                    comment: param.description.clone(),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        check_collisions(
            &name,
            fields.iter().map(|f| (f.name.as_str(), f.tag.as_str())),
        )?;

        Ok(Self {
            name,
            description: action.description.clone(),
            fields,
        })
    }
}

/// Builds one record per action of `service`, in declaration order.
///
/// # Errors
///
/// Fails like [`GeneratedRecord::from_action`], and with `AppError::NameCollision`
/// if two actions derive the same type name.
pub fn build_records(endpoint: &str, service: &Service) -> AppResult<Vec<GeneratedRecord>> {
    let records = service
        .actions
        .iter()
        .map(|action| GeneratedRecord::from_action(endpoint, action))
        .collect::<AppResult<Vec<_>>>()?;

    check_collisions(
        &service.path,
        records
            .iter()
            .zip(&service.actions)
            .map(|(record, action)| (record.name.as_str(), action.key.as_str())),
    )?;

    Ok(records)
}

/// Fails on the first identifier derived by more than one key.
fn check_collisions<'a>(
    scope: &str,
    pairs: impl Iterator<Item = (&'a str, &'a str)>,
) -> AppResult<()> {
    let mut seen: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for (name, key) in pairs {
        seen.entry(name).or_default().push(key);
    }

    match seen.into_iter().find(|(_, keys)| keys.len() > 1) {
        Some((name, keys)) => Err(AppError::NameCollision {
            scope: scope.to_string(),
            name: name.to_string(),
            keys: keys.into_iter().map(String::from).collect(),
        }),
        None => Ok(()),
    }
}

/// Generates the complete source text for a list of records.
pub fn render_records(records: &[GeneratedRecord]) -> String {
    let mut code = String::new();

    code.push_str(GENERATED_HEADER);
    code.push('\n');
    code.push_str("#![allow(non_snake_case)]\n");

    if records.is_empty() {
        return code;
    }

    code.push_str("\nuse serde::{Deserialize, Serialize};\n");

    for record in records {
        code.push('\n');
        code.push_str(&render_record(record));
    }

    code
}

/// Helper to generate the doc comment lines for a description.
///
/// The first line is prefixed with `lead` when given. `\r\n`, `\n` and a lone
/// `\r` all end a line.
fn generate_doc_comment(description: &str, lead: Option<&str>, indent: &str) -> String {
    let normalized = description.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<String> = normalized.lines().map(str::to_string).collect();

    if let Some(lead) = lead {
        let first = match lines.first() {
            Some(first) => format!("{}: {}", lead, first),
            None => format!("{}:", lead),
        };
        match lines.first_mut() {
            Some(line) => *line = first,
            None => lines.push(first),
        }
    }

    let mut code = String::new();
    for line in lines {
        code.push_str(format!("{}/// {}", indent, line).trim_end());
        code.push('\n');
    }
    code
}

/// Helper to generate a single record definition.
fn render_record(record: &GeneratedRecord) -> String {
    let mut code = String::new();

    code.push_str(&generate_doc_comment(
        &record.description,
        Some(record.name.as_str()),
        "",
    ));
    code.push_str(RECORD_DERIVES);
    code.push('\n');

    if record.fields.is_empty() {
        code.push_str(&format!("pub struct {} {{}}\n", record.name));
        return code;
    }

    code.push_str(&format!("pub struct {} {{\n", record.name));
    for field in &record.fields {
        code.push_str(&generate_doc_comment(&field.comment, None, "    "));
        code.push_str(&format!("    #[serde(rename = {:?})]\n", field.tag));
        code.push_str(&format!("    pub {}: {},\n", field.name, field.ty));
    }
    code.push_str("}\n");

    code
}

/// Produces the output unit for a selected service.
///
/// The rendered text is parsed before being returned.
pub fn emit_unit(selected: &SelectedService<'_>) -> AppResult<OutputUnit> {
    let records = build_records(selected.endpoint, selected.service)?;
    let contents = render_records(&records);
    validate(&contents)?;

    Ok(OutputUnit {
        endpoint: selected.endpoint.to_string(),
        file_name: format!("{}.rs", selected.endpoint),
        contents,
    })
}

/// Produces a `mod.rs` declaring one public module per endpoint.
///
/// # Errors
///
/// Returns `AppError::InvalidIdentifier` if an endpoint is not a valid module name.
pub fn emit_index<'a>(endpoints: impl IntoIterator<Item = &'a str>) -> AppResult<OutputUnit> {
    let mut code = String::new();
    code.push_str(GENERATED_HEADER);
    code.push_str("\n\n");

    for endpoint in endpoints {
        code.push_str(&format!("pub mod {};\n", module_name(endpoint)?));
    }

    validate(&code)?;

    Ok(OutputUnit {
        endpoint: String::new(),
        file_name: INDEX_FILE_NAME.to_string(),
        contents: code,
    })
}

fn validate(code: &str) -> AppResult<()> {
    syn::parse_file(code)
        .map(|_| ())
        .map_err(|e| AppError::InvalidOutput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Param;
    use pretty_assertions::assert_eq;

    fn param(key: &str, description: &str) -> Param {
        Param {
            key: key.to_string(),
            description: description.to_string(),
            internal: false,
            required: false,
            deprecated_since: String::new(),
        }
    }

    fn action(key: &str, description: &str, params: Vec<Param>) -> Action {
        Action {
            key: key.to_string(),
            description: description.to_string(),
            internal: false,
            post: false,
            has_response_example: false,
            params,
        }
    }

    fn service(path: &str, actions: Vec<Action>) -> Service {
        Service {
            path: path.to_string(),
            description: String::new(),
            actions,
        }
    }

    #[test]
    fn test_record_mirrors_params() {
        let action = action(
            "add_user",
            "Add a user to a group.",
            vec![
                param("id", "Group id"),
                param("login", "User login"),
                param("name", "Group name"),
            ],
        );
        let record = GeneratedRecord::from_action("user_groups", &action).unwrap();

        assert_eq!(record.name, "UserGroupsAddUser");
        let names: Vec<&str> = record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "Login", "Name"]);
        let tags: Vec<&str> = record.fields.iter().map(|f| f.tag.as_str()).collect();
        assert_eq!(tags, vec!["id", "login", "name"]);
        assert!(record.fields.iter().all(|f| f.ty == FIELD_TYPE));
    }

    #[test]
    fn test_render_unit() {
        let service = service(
            "api/user_groups",
            vec![
                action(
                    "search",
                    "Search groups",
                    vec![param("organization", "Org key"), param("q", "")],
                ),
                action("delete", "", vec![]),
            ],
        );
        let records = build_records("user_groups", &service).unwrap();

        let expected = r#"// AUTOMATICALLY GENERATED, DO NOT EDIT BY HAND!
#![allow(non_snake_case)]

use serde::{Deserialize, Serialize};

/// UserGroupsSearch: Search groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupsSearch {
    /// Org key
    #[serde(rename = "organization")]
    pub Organization: String,
    #[serde(rename = "q")]
    pub Q: String,
}

/// UserGroupsDelete:
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupsDelete {}
"#;
        assert_eq!(render_records(&records), expected);
    }

    #[test]
    fn test_multiline_description() {
        let action = action(
            "create",
            "Create a group.<br>\nRequires permission.",
            vec![param("name", "Name of the group.\nMust be unique.")],
        );
        let record = GeneratedRecord::from_action("user_groups", &action).unwrap();
        let code = render_records(&[record]);

        assert!(code.contains(
            "/// UserGroupsCreate: Create a group.<br>\n/// Requires permission.\n"
        ));
        assert!(code.contains("    /// Name of the group.\n    /// Must be unique.\n"));
    }

    #[test]
    fn test_carriage_returns_end_doc_lines() {
        let action = action(
            "search",
            "Line one\rLine two",
            vec![param("q", "Query.\r\nCase insensitive.")],
        );
        let record = GeneratedRecord::from_action("user_groups", &action).unwrap();
        let code = render_records(&[record]);

        assert!(!code.contains('\r'));
        assert!(code.contains("/// UserGroupsSearch: Line one\n/// Line two\n"));
        assert!(code.contains("    /// Query.\n    /// Case insensitive.\n"));
        assert!(validate(&code).is_ok());
    }

    #[test]
    fn test_tag_is_escaped() {
        let action = action("search", "", vec![param("a\"b", "")]);
        let record = GeneratedRecord::from_action("user_groups", &action).unwrap();
        let code = render_records(&[record]);
        assert!(code.contains(r#"#[serde(rename = "a\"b")]"#));
        assert!(validate(&code).is_ok());
    }

    #[test]
    fn test_param_collision_is_reported() {
        let action = action(
            "search",
            "",
            vec![param("page_size", ""), param("pageSize", "")],
        );
        let err = GeneratedRecord::from_action("user_groups", &action).unwrap_err();
        match err {
            AppError::NameCollision { scope, name, keys } => {
                assert_eq!(scope, "UserGroupsSearch");
                assert_eq!(name, "PageSize");
                assert_eq!(keys, vec!["page_size", "pageSize"]);
            }
            other => panic!("Unexpected error: {}", other),
        }
    }

    #[test]
    fn test_action_collision_is_reported() {
        let service = service(
            "api/user_groups",
            vec![action("add_user", "", vec![]), action("addUser", "", vec![])],
        );
        let err = build_records("user_groups", &service).unwrap_err();
        assert!(matches!(err, AppError::NameCollision { .. }));
    }

    #[test]
    fn test_emit_unit_for_service_without_actions() {
        let service = service("api/permissions", vec![]);
        let selected = SelectedService {
            endpoint: "permissions",
            service: &service,
        };
        let unit = emit_unit(&selected).unwrap();

        assert_eq!(unit.file_name, "permissions.rs");
        assert_eq!(
            unit.contents,
            "// AUTOMATICALLY GENERATED, DO NOT EDIT BY HAND!\n#![allow(non_snake_case)]\n"
        );
    }

    #[test]
    fn test_emit_index() {
        let unit = emit_index(["user_groups", "permissions"]).unwrap();
        assert_eq!(unit.file_name, INDEX_FILE_NAME);
        assert_eq!(
            unit.contents,
            "// AUTOMATICALLY GENERATED, DO NOT EDIT BY HAND!\n\npub mod user_groups;\npub mod permissions;\n"
        );
    }

    #[test]
    fn test_emit_index_rejects_bad_module_name() {
        let err = emit_index(["user-groups"]).unwrap_err();
        assert!(matches!(err, AppError::InvalidIdentifier { .. }));
    }
}
