//! Message catalog for notifications and labels.
//!
//! Lookups are by `(namespace, key)`. A catalog file may override any of the
//! built-in English messages; a key missing everywhere renders as
//! `namespace.key`.

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::infra::error::InfraError;

pub trait Localizer: Send + Sync {
    fn translate(&self, namespace: &str, key: &str) -> String;
}

type Catalog = BTreeMap<String, BTreeMap<String, String>>;

const BUILTIN: &[(&str, &str, &str)] = &[
    ("common", "error_generic", "Something went wrong. Please try again."),
    ("common", "success", "Done."),
    ("auth", "logged_in", "Signed in."),
    ("auth", "logged_out", "Signed out."),
    ("houses", "created", "House created."),
    ("houses", "updated", "House updated."),
    ("houses", "deleted", "House deleted."),
    ("rooms", "created", "Room created."),
    ("rooms", "updated", "Room updated."),
    ("rooms", "deleted", "Room deleted."),
    ("tenants", "created", "Tenant added."),
    ("tenants", "updated", "Tenant updated."),
    ("tenants", "deleted", "Tenant removed."),
    ("tenants", "status_toggled", "Tenant status changed."),
    ("schedulers", "created", "Billing schedule created."),
    ("schedulers", "updated", "Billing schedule updated."),
    ("schedulers", "deleted", "Billing schedule deleted."),
    ("bills", "created", "Bill created."),
    ("contracts", "created", "Contract created."),
    ("contracts", "updated", "Contract updated."),
    ("contracts", "deleted", "Contract deleted."),
];

static DEFAULTS: Lazy<Catalog> = Lazy::new(|| {
    let mut catalog = Catalog::new();
    for (namespace, key, message) in BUILTIN {
        catalog
            .entry((*namespace).to_string())
            .or_default()
            .insert((*key).to_string(), (*message).to_string());
    }
    catalog
});

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    overrides: Catalog,
}

impl MessageCatalog {
    /// Built-in English messages only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Parse overrides from TOML: one table per namespace.
    ///
    /// ```toml
    /// [common]
    /// error_generic = "Etwas ist schiefgelaufen."
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, InfraError> {
        let overrides: Catalog = toml::from_str(source)
            .map_err(|err| InfraError::catalog(format!("invalid message catalog: {err}")))?;
        Ok(Self { overrides })
    }

    pub async fn load(path: &Path) -> Result<Self, InfraError> {
        let source = tokio::fs::read_to_string(path).await.map_err(|err| {
            InfraError::catalog(format!("failed to read {}: {err}", path.display()))
        })?;
        let catalog = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), namespaces = catalog.overrides.len(), "loaded message catalog");
        Ok(catalog)
    }

    fn lookup<'a>(catalog: &'a Catalog, namespace: &str, key: &str) -> Option<&'a str> {
        catalog
            .get(namespace)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}

impl Localizer for MessageCatalog {
    fn translate(&self, namespace: &str, key: &str) -> String {
        Self::lookup(&self.overrides, namespace, key)
            .or_else(|| Self::lookup(&DEFAULTS, namespace, key))
            .map_or_else(|| format!("{namespace}.{key}"), str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_messages_resolve() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.translate("rooms", "created"), "Room created.");
    }

    #[test]
    fn overrides_win_and_fall_back_per_key() {
        let catalog = MessageCatalog::from_toml_str(
            r#"
[rooms]
created = "Zimmer angelegt."
"#,
        )
        .expect("catalog");
        assert_eq!(catalog.translate("rooms", "created"), "Zimmer angelegt.");
        assert_eq!(catalog.translate("rooms", "deleted"), "Room deleted.");
    }

    #[test]
    fn unknown_key_renders_its_path() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.translate("billing", "missing"), "billing.missing");
    }

    #[test]
    fn malformed_catalog_is_rejected() {
        let err = MessageCatalog::from_toml_str("[rooms]\ncreated = 5").expect_err("non-string");
        assert!(matches!(err, InfraError::Catalog { .. }));
    }
}
