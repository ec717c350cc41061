//! Canned DDL fragments for each feature module.
//!
//! Fragments are fixed template strings; feature identifiers are drawn from
//! a closed set and never inserted into the SQL text, and neither is the
//! connection string.

use crate::sqlgen::features::{Feature, FeatureSet};

/// DDL for the login feature: the users table.
pub const LOGIN_SCHEMA: &str = r#"-- login: user accounts
CREATE TABLE IF NOT EXISTS users (
    id            SERIAL PRIMARY KEY,
    email         VARCHAR(255) UNIQUE NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

/// DDL for the roles feature.
///
/// `user_roles` references `users`, so the login fragment must precede this
/// one in any generated batch.
pub const ROLES_SCHEMA: &str = r#"-- roles: role definitions and assignments
CREATE TABLE IF NOT EXISTS roles (
    id   SERIAL PRIMARY KEY,
    name VARCHAR(64) UNIQUE NOT NULL
);

CREATE TABLE IF NOT EXISTS user_roles (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    role_id INTEGER NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, role_id)
);
"#;

/// Generate the SQL batch for a feature selection.
///
/// Concatenation order is fixed: login before roles, because the roles
/// fragment references the users table. Selecting `roles` without `login`
/// is not corrected here; against a database with no prior `users` table
/// that batch fails at execution time and the driver error is surfaced.
///
/// Returns an empty string when no recognized feature is selected; callers
/// must treat empty output as a request-level error, never execute it.
pub fn generate_sql(features: &FeatureSet) -> String {
    let mut sql = String::new();
    if features.contains(Feature::Login) {
        sql.push_str(LOGIN_SCHEMA);
    }
    if features.contains(Feature::Roles) {
        sql.push_str(ROLES_SCHEMA);
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_only_is_exactly_the_login_fragment() {
        let sql = generate_sql(&FeatureSet::from_names(["login"]));
        assert_eq!(sql, LOGIN_SCHEMA);
    }

    #[test]
    fn test_empty_selection_yields_empty_string() {
        assert_eq!(generate_sql(&FeatureSet::default()), "");
        assert_eq!(generate_sql(&FeatureSet::from_names(["unknown"])), "");
    }

    #[test]
    fn test_login_precedes_roles() {
        let sql = generate_sql(&FeatureSet::from_names(["roles", "login"]));
        assert_eq!(sql, format!("{}{}", LOGIN_SCHEMA, ROLES_SCHEMA));

        let users = sql.find("CREATE TABLE IF NOT EXISTS users").unwrap();
        let roles = sql.find("CREATE TABLE IF NOT EXISTS roles").unwrap();
        assert!(users < roles);
    }

    #[test]
    fn test_roles_without_login_is_not_corrected() {
        let sql = generate_sql(&FeatureSet::from_names(["roles"]));
        assert_eq!(sql, ROLES_SCHEMA);
        assert!(!sql.contains("CREATE TABLE IF NOT EXISTS users"));
    }
}
