//! Feature module identifiers.

/// A predefined schema feature module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// User accounts table for login flows.
    Login,
    /// Role tables, referencing the users table.
    Roles,
}

impl Feature {
    /// Parse a feature identifier. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "login" => Some(Feature::Login),
            "roles" => Some(Feature::Roles),
            _ => None,
        }
    }
}

/// The set of features selected by a request.
///
/// Built from the raw identifier list; unrecognized identifiers are
/// silently ignored and contribute no SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet {
    login: bool,
    roles: bool,
}

impl FeatureSet {
    /// Build a feature set from raw identifiers, dropping unknown names.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::default();
        for name in names {
            match Feature::parse(name) {
                Some(Feature::Login) => set.login = true,
                Some(Feature::Roles) => set.roles = true,
                None => {}
            }
        }
        set
    }

    pub fn contains(&self, feature: Feature) -> bool {
        match feature {
            Feature::Login => self.login,
            Feature::Roles => self.roles,
        }
    }

    /// True when no recognized feature was selected.
    pub fn is_empty(&self) -> bool {
        !self.login && !self.roles
    }
}
