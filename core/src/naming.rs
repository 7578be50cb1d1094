//! # Naming
//!
//! Derivation of Rust identifiers from free-form schema keys.
//!
//! | Input | Output |
//! |-------|--------|
//! | `user_groups_add_user` | `UserGroupsAddUser` |
//! | `organization` | `Organization` |
//! | `p.key` | `PKey` |
//! | `s3bucket` | `S3Bucket` |
//! | `2fa` | `_2Fa` |

use crate::error::{AppError, AppResult};
use heck::ToUpperCamelCase;

/// Converts `key` to UpperCamelCase.
///
/// Segments are split on `_`, `-`, `.`, whitespace, lower-to-upper
/// transitions and after a digit; each segment is capitalized and separators
/// are removed.
pub fn to_upper_camel(key: &str) -> String {
    let mut after_digit = false;
    key.to_upper_camel_case()
        .chars()
        .map(|c| {
            let out = if after_digit { c.to_ascii_uppercase() } else { c };
            after_digit = c.is_ascii_digit();
            out
        })
        .collect()
}

/// Derives the record type name for an action of an endpoint.
///
/// `("user_groups", "add_user")` becomes `UserGroupsAddUser`.
pub fn type_name(endpoint: &str, action_key: &str) -> AppResult<String> {
    identifier(&format!("{}_{}", endpoint, action_key))
}

/// Derives the field name for a parameter key.
pub fn field_name(param_key: &str) -> AppResult<String> {
    identifier(param_key)
}

/// Checks that `endpoint` can be declared as a module (`pub mod <endpoint>;`).
///
/// No repair is attempted: the module name must match the file name on disk.
pub fn module_name(endpoint: &str) -> AppResult<&str> {
    syn::parse_str::<syn::Ident>(endpoint).map_err(|e| AppError::InvalidIdentifier {
        key: endpoint.to_string(),
        reason: format!("not a valid module name: {}", e),
    })?;
    Ok(endpoint)
}

/// Converts `key` to UpperCamelCase and repairs the result into a valid identifier.
///
/// A leading digit gets a `_` prefix and `Self` becomes `Self_`.
fn identifier(key: &str) -> AppResult<String> {
    let mut name = to_upper_camel(key);

    if name.is_empty() {
        return Err(AppError::InvalidIdentifier {
            key: key.to_string(),
            reason: "no alphanumeric characters".into(),
        });
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if name == "Self" {
        name.push('_');
    }

    syn::parse_str::<syn::Ident>(&name).map_err(|e| AppError::InvalidIdentifier {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        assert_eq!(
            type_name("user_groups", "add_user").unwrap(),
            "UserGroupsAddUser"
        );
        assert_eq!(
            type_name("user_groups", "search").unwrap(),
            "UserGroupsSearch"
        );
        assert_eq!(
            type_name("permissions", "add_group_to_template").unwrap(),
            "PermissionsAddGroupToTemplate"
        );
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("organization").unwrap(), "Organization");
        assert_eq!(field_name("login").unwrap(), "Login");
        assert_eq!(field_name("templateId").unwrap(), "TemplateId");
        assert_eq!(field_name("p.key").unwrap(), "PKey");
        assert_eq!(field_name("project-key").unwrap(), "ProjectKey");
    }

    #[test]
    fn test_field_name_is_pure() {
        assert_eq!(field_name("ps").unwrap(), field_name("ps").unwrap());
    }

    #[test]
    fn test_leading_digit_is_prefixed() {
        let name = field_name("2fa").unwrap();
        assert_eq!(name, "_2Fa");
        assert!(syn::parse_str::<syn::Ident>(&name).is_ok());
    }

    #[test]
    fn test_digit_starts_new_segment() {
        assert_eq!(to_upper_camel("s3bucket"), "S3Bucket");
        assert_eq!(to_upper_camel("v2_api"), "V2Api");
        assert_eq!(field_name("ps2").unwrap(), "Ps2");
        assert_eq!(type_name("ce2e", "task").unwrap(), "Ce2ETask");
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("user_groups").unwrap(), "user_groups");
        assert!(module_name("user-groups").is_err());
        assert!(module_name("type").is_err());
        assert!(module_name("").is_err());
    }

    #[test]
    fn test_self_keyword_is_repaired() {
        assert_eq!(field_name("self").unwrap(), "Self_");
    }

    #[test]
    fn test_punctuation_only_key_is_rejected() {
        let err = field_name("__").unwrap_err();
        assert!(matches!(err, AppError::InvalidIdentifier { .. }));
    }
}
