//! Blob container inside the storage account

use declarative::{Frontier, ResourceDescriptor, Result, Stage};
use serde::Serialize;

use crate::intent::Intent;

use super::account;

pub const KEY: &str = "cont";
pub const API_VERSION: &str = "storage.azure.upbound.io/v1beta1";
pub const KIND: &str = "Container";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContainerSpec<'a> {
    for_provider: ForProvider<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForProvider<'a> {
    storage_account_name: &'a str,
    container_access_type: &'static str,
}

/// The container clients actually read and write
#[derive(Debug, Default)]
pub struct Container;

impl Stage<Intent> for Container {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self) -> &'static str {
        "container"
    }

    fn build(&self, intent: &Intent, frontier: &Frontier) -> Result<ResourceDescriptor> {
        let storage_account_name = frontier.require(KEY, account::KEY)?;

        ResourceDescriptor::new(KEY, API_VERSION, KIND).with_spec(&ContainerSpec {
            for_provider: ForProvider {
                storage_account_name,
                container_access_type: intent.access_level.container_access_type(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::AccessLevel;
    use declarative::Provenance;
    use serde_json::json;

    fn intent(access_level: AccessLevel) -> Intent {
        Intent {
            logical_name: "example-xr".to_string(),
            location: "us-east-1".to_string(),
            access_level,
            versioning_enabled: false,
        }
    }

    fn resolved_account() -> Frontier {
        let mut frontier = Frontier::new();
        frontier.resolve("acct", "examplexr", Provenance::Derived);
        frontier
    }

    #[test]
    fn test_private_container() {
        let cont = Container
            .build(&intent(AccessLevel::Private), &resolved_account())
            .unwrap();

        assert_eq!(cont.kind, "Container");
        assert!(cont.annotations.is_empty());
        assert_eq!(
            cont.spec,
            json!({
                "forProvider": {
                    "storageAccountName": "examplexr",
                    "containerAccessType": "private"
                }
            })
        );
    }

    #[test]
    fn test_public_container_is_blob() {
        let cont = Container
            .build(&intent(AccessLevel::Public), &resolved_account())
            .unwrap();
        assert_eq!(cont.spec["forProvider"]["containerAccessType"], "blob");
    }

    #[test]
    fn test_requires_account() {
        assert!(
            Container
                .build(&intent(AccessLevel::Private), &Frontier::new())
                .is_err()
        );
    }
}
