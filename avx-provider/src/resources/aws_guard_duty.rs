//! aws_guard_duty - Amazon GuardDuty for one account and region
//!
//! Identified as `account~~region`.

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models::AwsGuardDutyAccount;
use avx_core::differ::Changes;
use avx_core::fields::Fields;
use avx_core::identifier;
use avx_core::provider::ProviderResult;
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "AWS GuardDuty";

/// Account and region are joined with a doubled delimiter
const ACCOUNT_REGION_DELIMITER: &str = "~~";

pub struct AwsGuardDuty;

fn account(config: Fields<'_>) -> ProviderResult<AwsGuardDutyAccount> {
    Ok(AwsGuardDutyAccount {
        account_name: config.string("account_name")?,
        region: config.string("region")?,
        excluded_ips: config.string_set("excluded_ips")?.into_iter().collect(),
    })
}

fn split_id(id: &str) -> ProviderResult<(String, String)> {
    let [account_name, region] = identifier::split::<2>(id, ACCOUNT_REGION_DELIMITER)?;
    Ok((account_name, region))
}

#[async_trait]
impl ResourceHandler for AwsGuardDuty {
    fn type_name(&self) -> &'static str {
        "aws_guard_duty"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name())
            .with_description("Amazon GuardDuty enabled for an account in one region")
            .attribute(
                AttributeSchema::new("account_name", types::natural_key())
                    .required()
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new("region", types::natural_key())
                    .required()
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new(
                    "excluded_ips",
                    AttributeType::Set(Box::new(types::ipv4())),
                )
                .with_description("Public IPs excluded from GuardDuty findings"),
            )
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        let (account_name, region) = split_id(id)?;
        Ok(HashMap::from([
            ("account_name".to_string(), Value::from(account_name)),
            ("region".to_string(), Value::from(region)),
        ]))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let account = account(config)?;
        ctx.client
            .enable_aws_guard_duty(&account)
            .await
            .or_fail("enable", WHAT)?;
        if !account.excluded_ips.is_empty() {
            ctx.client
                .update_aws_guard_duty_excluded_ips(&account)
                .await
                .or_fail("update excluded IPs for", WHAT)?;
        }
        Ok(identifier::join(
            [account.account_name.as_str(), account.region.as_str()],
            ACCOUNT_REGION_DELIMITER,
        )?)
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        let (account_name, region) = split_id(id)?;
        let Some(mut account) = ctx
            .client
            .get_aws_guard_duty_account(&account_name, &region)
            .await
            .found()
            .or_fail("read", WHAT)?
        else {
            return Ok(None);
        };

        account.excluded_ips.sort();
        Ok(Some(HashMap::from([
            ("account_name".to_string(), Value::from(account.account_name)),
            ("region".to_string(), Value::from(account.region)),
            ("excluded_ips".to_string(), Value::strings(account.excluded_ips)),
        ])))
    }

    async fn update(
        &self,
        ctx: &Context<'_>,
        _id: &str,
        changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        if changes.has_change("excluded_ips") {
            let account = account(changes.new_fields())?;
            ctx.client
                .update_aws_guard_duty_excluded_ips(&account)
                .await
                .or_fail("update excluded IPs for", WHAT)?;
        }
        Ok(())
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        let (account_name, region) = split_id(id)?;
        let account = AwsGuardDutyAccount {
            account_name,
            region,
            excluded_ips: Vec::new(),
        };
        ctx.client
            .disable_aws_guard_duty(&account)
            .await
            .or_fail("disable", WHAT)
    }
}
