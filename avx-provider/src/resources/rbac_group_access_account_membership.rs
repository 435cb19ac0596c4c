//! rbac_group_access_account_membership - Authoritative access account list of an RBAC group

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use avx_client::models::RbacGroupAccessAccounts;
use avx_core::differ::{Changes, set_diff};
use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "RBAC group access accounts";

pub struct RbacGroupAccessAccountMembership;

async fn current_accounts(ctx: &Context<'_>, group: &str) -> ProviderResult<BTreeSet<String>> {
    Ok(ctx
        .client
        .list_access_accounts_in_rbac_group(group)
        .await
        .found()
        .or_fail("list", WHAT)?
        .unwrap_or_default()
        .into_iter()
        .collect())
}

/// Make the group's membership exactly `desired`
async fn set_accounts(
    ctx: &Context<'_>,
    group: &str,
    desired: &BTreeSet<String>,
) -> ProviderResult<()> {
    let current = current_accounts(ctx, group).await?;
    let diff = set_diff(&current, desired);

    if !diff.removed.is_empty() {
        let membership = RbacGroupAccessAccounts {
            group_name: group.to_string(),
            access_account_names: diff.removed,
        };
        ctx.client
            .delete_access_accounts_from_rbac_group(&membership)
            .await
            .or_fail("remove", WHAT)?;
    }
    if !diff.added.is_empty() {
        let membership = RbacGroupAccessAccounts {
            group_name: group.to_string(),
            access_account_names: diff.added,
        };
        ctx.client
            .add_access_accounts_to_rbac_group(&membership)
            .await
            .or_fail("add", WHAT)?;
    }
    Ok(())
}

#[async_trait]
impl ResourceHandler for RbacGroupAccessAccountMembership {
    fn type_name(&self) -> &'static str {
        "rbac_group_access_account_membership"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name())
            .with_description(
                "Access account membership of an RBAC permission group. \
                 This resource is authoritative for the group's membership.",
            )
            .attribute(
                AttributeSchema::new("group_name", types::natural_key())
                    .required()
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new("access_account_names", types::string_set())
                    .required()
                    .with_description("Complete set of access accounts in the group"),
            )
            .attribute(
                AttributeSchema::new("remove_access_accounts_on_destroy", AttributeType::Bool)
                    .with_default(false)
                    .with_description(
                        "Remove every access account from the group when this resource is destroyed",
                    ),
            )
    }

    fn validate(&self, config: Fields<'_>) -> ProviderResult<()> {
        if config.strings("access_account_names")?.is_empty() {
            return Err(ProviderError::validation(
                "access_account_names must contain at least one account",
            ));
        }
        Ok(())
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        Ok(HashMap::from([("group_name".to_string(), Value::from(id))]))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let group = config.string("group_name")?;
        let accounts = config.string_set("access_account_names")?;
        log::info!(
            "setting access account membership for RBAC group {}: {:?}",
            group,
            accounts
        );
        set_accounts(ctx, &group, &accounts).await?;
        Ok(group)
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        let Some(accounts) = ctx
            .client
            .list_access_accounts_in_rbac_group(id)
            .await
            .found()
            .or_fail("list", WHAT)?
        else {
            log::warn!("RBAC group {} not found", id);
            return Ok(None);
        };

        let accounts: BTreeSet<String> = accounts.into_iter().collect();
        Ok(Some(HashMap::from([
            ("group_name".to_string(), Value::from(id)),
            ("access_account_names".to_string(), Value::strings(accounts)),
        ])))
    }

    async fn update(
        &self,
        ctx: &Context<'_>,
        id: &str,
        changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        if changes.has_change("access_account_names") {
            let desired = changes.new_fields().string_set("access_account_names")?;
            set_accounts(ctx, id, &desired).await?;
        }
        Ok(())
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, state: Fields<'_>) -> ProviderResult<()> {
        if !state.bool("remove_access_accounts_on_destroy")? {
            return Ok(());
        }
        let current = current_accounts(ctx, id).await?;
        if current.is_empty() {
            return Ok(());
        }
        let membership = RbacGroupAccessAccounts {
            group_name: id.to_string(),
            access_account_names: current.into_iter().collect(),
        };
        ctx.client
            .delete_access_accounts_from_rbac_group(&membership)
            .await
            .or_fail("remove", WHAT)
    }
}
