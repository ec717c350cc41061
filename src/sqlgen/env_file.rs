//! `.env` text rendering for generated schemas.

use crate::sqlgen::features::{Feature, FeatureSet};

/// Render the environment file accompanying a generated schema.
///
/// One boolean flag per recognized feature, reflecting whether it was in
/// the request's feature list.
pub fn render_env_file(connection_string: &str, features: &FeatureSet) -> String {
    format!(
        "DATABASE_URL=\"{}\"\nENABLE_LOGIN={}\nENABLE_ROLES={}\n",
        connection_string,
        features.contains(Feature::Login),
        features.contains(Feature::Roles),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_reflect_selection() {
        let env = render_env_file(
            "postgres://u:p@db.supabase.co/app",
            &FeatureSet::from_names(["login"]),
        );
        assert!(env.contains("DATABASE_URL=\"postgres://u:p@db.supabase.co/app\""));
        assert!(env.contains("ENABLE_LOGIN=true"));
        assert!(env.contains("ENABLE_ROLES=false"));
    }

    #[test]
    fn test_empty_selection_renders_both_false() {
        let env = render_env_file("postgres://u:p@x.neon.tech/db", &FeatureSet::default());
        assert!(env.contains("ENABLE_LOGIN=false"));
        assert!(env.contains("ENABLE_ROLES=false"));
    }

    #[test]
    fn test_exact_layout() {
        let env = render_env_file("url", &FeatureSet::from_names(["login", "roles"]));
        assert_eq!(env, "DATABASE_URL=\"url\"\nENABLE_LOGIN=true\nENABLE_ROLES=true\n");
    }
}
