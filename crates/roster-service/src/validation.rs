//! Request validation
//!
//! Runs the `validator` derives on request DTOs, adds the checks the derives
//! cannot express (thumbnail encoding, admin-only fields, role names), and
//! flattens everything into a list of `{field, location, messages}` entries.
//! Validation never stops at the first failure.

use std::borrow::Cow;

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use roster_core::error::DomainError;
use roster_core::traits::MemberQuery;
use roster_core::Privilege;

use crate::dto::mappers::{decode_thumbnail, MAX_THUMBNAIL_BYTES};
use crate::dto::requests::{
    ListMembersQuery, LoginRequest, RefreshTokenRequest, ReplaceMemberRequest, SignupRequest,
    UpdateMemberRequest,
};
use crate::services::error::{ServiceError, ServiceResult};

/// Where an invalid value came from
pub const BODY: &str = "body";
pub const QUERY: &str = "query";

/// One invalid input field and everything wrong with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub location: &'static str,
    pub messages: Vec<String>,
}

/// `student_id` -> `studentId`
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn message_for(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("\"{field}\" is invalid ({})", error.code))
}

fn collect(errors: &ValidationErrors, location: &'static str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(list) => {
                let field = camel_case(&field.to_string());
                let messages = list.iter().map(|e| message_for(&field, e)).collect();
                out.push(FieldError {
                    field,
                    location,
                    messages,
                });
            }
            // Nested structs are flattened into the same JSON object
            ValidationErrorsKind::Struct(inner) => collect(inner, location, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect(inner, location, out);
                }
            }
        }
    }
}

/// Flatten `validator` output into field errors, sorted by field name
pub fn field_errors(errors: &ValidationErrors, location: &'static str) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, location, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn with_message(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// Run the derive and return its errors, empty when valid
fn derived<T: Validate>(input: &T) -> ValidationErrors {
    input.validate().err().unwrap_or_default()
}

fn check_thumbnail(encoded: Option<&str>, errors: &mut ValidationErrors) {
    let Some(encoded) = encoded else {
        return;
    };

    match decode_thumbnail(encoded) {
        Ok(bytes) if bytes.len() > MAX_THUMBNAIL_BYTES => errors.add(
            "thumbnail",
            with_message(
                "thumbnail_size",
                format!("\"thumbnail\" must be at most {} KiB", MAX_THUMBNAIL_BYTES / 1024),
            ),
        ),
        Ok(_) => {}
        Err(_) => errors.add(
            "thumbnail",
            with_message("thumbnail_base64", "\"thumbnail\" must be base64 encoded".to_string()),
        ),
    }
}

/// Whitespace-only names pass the length check but are still blank.
///
/// Empty strings are left to the length rule so each field reports once.
fn check_not_blank(
    field: &'static str,
    label: &str,
    value: Option<&str>,
    errors: &mut ValidationErrors,
) {
    if let Some(value) = value {
        if !value.is_empty() && value.trim().is_empty() {
            errors.add(field, with_message("blank", format!("\"{label}\" must not be blank")));
        }
    }
}

fn check_names(
    student_id: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    errors: &mut ValidationErrors,
) {
    check_not_blank("student_id", "studentId", student_id, errors);
    check_not_blank("first_name", "firstName", first_name, errors);
    check_not_blank("last_name", "lastName", last_name, errors);
}

fn finish(errors: ValidationErrors, location: &'static str) -> ServiceResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::invalid(location, field_errors(&errors, location)))
    }
}

/// Reject admin-only fields sent by a non-admin
fn check_privileged(field: Option<&'static str>, caller_is_admin: bool) -> ServiceResult<()> {
    match field {
        Some(field) if !caller_is_admin => Err(DomainError::PrivilegedField(field).into()),
        _ => Ok(()),
    }
}

pub fn validate_signup(input: &SignupRequest) -> ServiceResult<()> {
    let mut errors = derived(input);
    check_names(
        Some(&input.student_id),
        Some(&input.first_name),
        Some(&input.last_name),
        &mut errors,
    );
    check_thumbnail(input.thumbnail.as_deref(), &mut errors);
    finish(errors, BODY)
}

pub fn validate_login(input: &LoginRequest) -> ServiceResult<()> {
    finish(derived(input), BODY)
}

pub fn validate_refresh(input: &RefreshTokenRequest) -> ServiceResult<()> {
    finish(derived(input), BODY)
}

/// Partial update: present fields obey the signup rules.
///
/// Admin-only fields from a non-admin are rejected before anything else.
pub fn validate_member_update(input: &UpdateMemberRequest, caller_is_admin: bool) -> ServiceResult<()> {
    check_privileged(input.privileged_field(), caller_is_admin)?;

    let mut errors = derived(input);
    check_names(
        input.student_id.as_deref(),
        input.first_name.as_deref(),
        input.last_name.as_deref(),
        &mut errors,
    );
    if let Some(Some(thumbnail)) = &input.thumbnail {
        check_thumbnail(Some(thumbnail), &mut errors);
    }
    finish(errors, BODY)
}

/// Full replacement: the whole signup document is required.
pub fn validate_member_replace(input: &ReplaceMemberRequest, caller_is_admin: bool) -> ServiceResult<()> {
    check_privileged(input.privileged_field(), caller_is_admin)?;

    let mut errors = derived(input);
    let profile = &input.profile;
    check_names(
        Some(&profile.student_id),
        Some(&profile.first_name),
        Some(&profile.last_name),
        &mut errors,
    );
    check_thumbnail(profile.thumbnail.as_deref(), &mut errors);
    finish(errors, BODY)
}

/// Validate list parameters and turn them into a repository query
pub fn validate_list_query(input: &ListMembersQuery) -> ServiceResult<MemberQuery> {
    let mut errors = derived(input);

    let privilege = match input.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        Some(role) => match role.parse::<Privilege>() {
            Ok(privilege) => Some(privilege),
            Err(_) => {
                errors.add(
                    "role",
                    with_message("role", "\"role\" must be one of [member, admin]".to_string()),
                );
                None
            }
        },
        None => None,
    };

    finish(errors, QUERY)?;

    let mut query = MemberQuery::new(
        input.page.unwrap_or(1),
        input.per_page.unwrap_or(MemberQuery::DEFAULT_PER_PAGE),
    );
    query.name.clone_from(&input.name);
    query.email.clone_from(&input.email);
    query.privilege = privilege;
    Ok(query)
}
