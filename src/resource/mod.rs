//! Composed resource kinds
//!
//! Each kind is a [`Stage`](declarative::Stage) over the decoded [`Intent`].
//! The pipeline order is the dependency order: resource group, then storage
//! account, then container.

pub mod account;
pub mod container;
pub mod resource_group;

use declarative::{Pipeline, Result};

use crate::config::FunctionConfig;
use crate::intent::Intent;

pub use account::Account;
pub use container::Container;
pub use resource_group::ResourceGroup;

/// Build the bucket composition pipeline for `config`
pub fn pipeline(config: &FunctionConfig) -> Result<Pipeline<Intent>> {
    Pipeline::new()
        .with_stage(ResourceGroup)?
        .with_stage(Account::new(
            config.account.clone(),
            &config.external_name_annotation,
        ))?
        .with_stage(Container)
}
