//! distributed_firewalling_default_action_rule - Verdict for traffic no DCF policy matched
//!
//! Destroying the resource puts the rule back to PERMIT without logging.

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models::{self, PolicyAction};
use avx_core::differ::Changes;
use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "default action rule";

pub struct DefaultActionRule;

fn rule(config: Fields<'_>) -> ProviderResult<models::DefaultActionRule> {
    let action = config.string("action")?;
    let action = PolicyAction::from_config(&action)
        .ok_or_else(|| ProviderError::validation(format!("unknown action {:?}", action)))?;
    Ok(models::DefaultActionRule {
        action,
        logging: config.bool("logging")?,
        log_profile: config.string("log_profile")?,
    })
}

async fn apply(ctx: &Context<'_>, rule: &models::DefaultActionRule) -> ProviderResult<()> {
    ctx.client
        .update_distributed_firewalling_default_action_rule(rule)
        .await
        .or_fail("update", WHAT)
}

#[async_trait]
impl ResourceHandler for DefaultActionRule {
    fn type_name(&self) -> &'static str {
        "distributed_firewalling_default_action_rule"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name())
            .with_description("Default action for distributed-firewalling traffic")
            .attribute(
                AttributeSchema::new(
                    "action",
                    types::custom("Action", AttributeType::String, |value| {
                        types::check_choice(value, &["PERMIT", "DENY"], true)
                    }),
                )
                .required()
                .with_diff_suppress(types::suppress_case_difference),
            )
            .attribute(AttributeSchema::new("logging", AttributeType::Bool).required())
            .attribute(
                AttributeSchema::new("log_profile", AttributeType::String)
                    .optional_computed()
                    .with_description("Logging profile UUID"),
            )
    }

    fn validate(&self, config: Fields<'_>) -> ProviderResult<()> {
        rule(config).map(|_| ())
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        apply(ctx, &rule(config)?).await?;
        Ok(ctx.controller_id())
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        ctx.check_controller_id(id)?;

        let Some(rule) = ctx
            .client
            .get_distributed_firewalling_default_action_rule()
            .await
            .found()
            .or_fail("read", WHAT)?
        else {
            return Ok(None);
        };

        let mut attrs = HashMap::from([
            ("action".to_string(), Value::from(rule.action.as_str())),
            ("logging".to_string(), Value::Bool(rule.logging)),
        ]);
        // An empty profile keeps whatever was configured
        if !rule.log_profile.is_empty() {
            attrs.insert("log_profile".to_string(), Value::from(rule.log_profile));
        }
        Ok(Some(attrs))
    }

    async fn update(
        &self,
        ctx: &Context<'_>,
        _id: &str,
        changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        apply(ctx, &rule(changes.new_fields())?).await
    }

    async fn delete(&self, ctx: &Context<'_>, _id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        log::info!("resetting {} to PERMIT without logging", WHAT);
        apply(ctx, &models::DefaultActionRule::default()).await
    }
}
