//! Resource group - the root of the composition

use declarative::{Frontier, ResourceDescriptor, Result, Stage};
use serde::Serialize;

use crate::intent::Intent;

pub const KEY: &str = "rg";
pub const API_VERSION: &str = "azure.upbound.io/v1beta1";
pub const KIND: &str = "ResourceGroup";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceGroupSpec<'a> {
    for_provider: ForProvider<'a>,
}

#[derive(Debug, Serialize)]
struct ForProvider<'a> {
    location: &'a str,
}

/// The resource group everything else lives in
///
/// Its name is assigned by the provider, so the account can't be declared
/// until the group has been observed with an external name.
#[derive(Debug, Default)]
pub struct ResourceGroup;

impl Stage<Intent> for ResourceGroup {
    fn key(&self) -> &'static str {
        KEY
    }

    fn description(&self) -> &'static str {
        "resource group"
    }

    fn gates_dependents(&self) -> bool {
        true
    }

    fn build(&self, intent: &Intent, _frontier: &Frontier) -> Result<ResourceDescriptor> {
        ResourceDescriptor::new(KEY, API_VERSION, KIND).with_spec(&ResourceGroupSpec {
            for_provider: ForProvider {
                location: &intent.location,
            },
        })
    }
}
