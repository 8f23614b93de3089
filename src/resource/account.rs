//! Storage account - named after the intent, placed in the resource group

use declarative::{Frontier, ResourceDescriptor, Result, Stage};
use serde::Serialize;

use crate::config::AccountPolicy;
use crate::intent::Intent;
use crate::naming;

use super::resource_group;

pub const KEY: &str = "acct";
pub const API_VERSION: &str = "storage.azure.upbound.io/v1beta1";
pub const KIND: &str = "Account";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountSpec<'a> {
    for_provider: ForProvider<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForProvider<'a> {
    resource_group_name: &'a str,
    account_tier: &'a str,
    account_replication_type: &'a str,
    location: &'a str,
    infrastructure_encryption_enabled: bool,
    blob_properties: [BlobProperties; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlobProperties {
    versioning_enabled: bool,
}

/// The storage account backing the bucket
///
/// The account's external name is derived from the intent rather than
/// waited on, so the container can refer to it in the same invocation.
#[derive(Debug)]
pub struct Account {
    policy: AccountPolicy,
    annotation: String,
}

impl Account {
    /// Create an account stage applying `policy`, writing its external name
    /// under `annotation`
    pub fn new(policy: AccountPolicy, annotation: impl Into<String>) -> Self {
        Self {
            policy,
            annotation: annotation.into(),
        }
    }
}

impl Stage<Intent> for Account {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self) -> &'static str {
        "storage account"
    }

    fn build(&self, intent: &Intent, frontier: &Frontier) -> Result<ResourceDescriptor> {
        let resource_group_name = frontier.require(KEY, resource_group::KEY)?;

        let name = naming::derive_identifier(&intent.logical_name);
        if !naming::satisfies_account_constraints(&name) {
            log::warn!(
                "Storage account name '{name}' derived from '{}' is not 3-24 lowercase alphanumeric characters",
                intent.logical_name
            );
        }

        let spec = AccountSpec {
            for_provider: ForProvider {
                resource_group_name,
                account_tier: &self.policy.tier,
                account_replication_type: &self.policy.replication_type,
                location: &intent.location,
                infrastructure_encryption_enabled: self.policy.infrastructure_encryption,
                blob_properties: [BlobProperties {
                    versioning_enabled: intent.versioning_enabled,
                }],
            },
        };

        Ok(ResourceDescriptor::new(KEY, API_VERSION, KIND)
            .with_spec(&spec)?
            .with_external_name(&self.annotation, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXTERNAL_NAME_ANNOTATION;
    use crate::intent::AccessLevel;
    use declarative::{Error, Provenance};
    use serde_json::json;

    fn intent(versioning_enabled: bool) -> Intent {
        Intent {
            logical_name: "example-xr".to_string(),
            location: "us-east-1".to_string(),
            access_level: AccessLevel::Private,
            versioning_enabled,
        }
    }

    fn resolved_group() -> Frontier {
        let mut frontier = Frontier::new();
        frontier.resolve("rg", "super-group", Provenance::Observed);
        frontier
    }

    fn stage() -> Account {
        Account::new(AccountPolicy::default(), DEFAULT_EXTERNAL_NAME_ANNOTATION)
    }

    #[test]
    fn test_build_account() {
        let acct = stage().build(&intent(false), &resolved_group()).unwrap();

        assert_eq!(acct.key, "acct");
        assert_eq!(acct.external_name.as_deref(), Some("examplexr"));
        assert_eq!(
            acct.annotations.get("crossplane.io/external-name").map(String::as_str),
            Some("examplexr")
        );
        assert_eq!(
            acct.spec,
            json!({
                "forProvider": {
                    "resourceGroupName": "super-group",
                    "accountTier": "Standard",
                    "accountReplicationType": "LRS",
                    "location": "us-east-1",
                    "infrastructureEncryptionEnabled": true,
                    "blobProperties": [{ "versioningEnabled": false }]
                }
            })
        );
    }

    #[test]
    fn test_versioning_maps_into_blob_properties() {
        let acct = stage().build(&intent(true), &resolved_group()).unwrap();
        assert_eq!(
            acct.spec["forProvider"]["blobProperties"][0]["versioningEnabled"],
            true
        );
    }

    #[test]
    fn test_policy_substitution() {
        let policy = AccountPolicy {
            tier: "Premium".to_string(),
            replication_type: "ZRS".to_string(),
            infrastructure_encryption: false,
        };
        let acct = Account::new(policy, DEFAULT_EXTERNAL_NAME_ANNOTATION)
            .build(&intent(false), &resolved_group())
            .unwrap();

        let for_provider = &acct.spec["forProvider"];
        assert_eq!(for_provider["accountTier"], "Premium");
        assert_eq!(for_provider["accountReplicationType"], "ZRS");
        assert_eq!(for_provider["infrastructureEncryptionEnabled"], false);
    }

    #[test]
    fn test_requires_resource_group() {
        let err = stage().build(&intent(false), &Frontier::new()).unwrap_err();
        assert!(matches!(err, Error::UnresolvedDependency { .. }));
    }

    #[test]
    fn test_custom_annotation() {
        let acct = Account::new(AccountPolicy::default(), "example.org/name")
            .build(&intent(false), &resolved_group())
            .unwrap();
        assert!(acct.annotations.contains_key("example.org/name"));
        assert!(!acct.annotations.contains_key(DEFAULT_EXTERNAL_NAME_ANNOTATION));
    }
}
