//! smart_group - Named set of workloads selected by match expressions

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models::{self, SmartGroupMatchExpression};
use avx_core::differ::Changes;
use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{
    AttributeSchema, AttributeType, ResourceSchema, types, validate_cidr, validate_ipv4,
};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "Smart Group";

/// String criteria of a match expression, in attribute order
const CRITERIA: [&str; 10] = [
    "cidr",
    "fqdn",
    "site",
    "type",
    "res_id",
    "account_id",
    "account_name",
    "name",
    "region",
    "zone",
];

pub struct SmartGroup;

fn cidr_or_ip() -> AttributeType {
    types::custom("CidrOrIp", AttributeType::String, |value| match value {
        Value::String(s) if s.contains('/') => validate_cidr(s),
        Value::String(s) => validate_ipv4(s),
        _ => Err("Expected string".to_string()),
    })
}

fn not_blank() -> AttributeType {
    types::custom("NotBlank", AttributeType::String, |value| match value {
        Value::String(s) if s.trim().is_empty() => {
            Err("must not be empty or whitespace".to_string())
        }
        _ => Ok(()),
    })
}

fn match_expression(expr: Fields<'_>) -> ProviderResult<SmartGroupMatchExpression> {
    let expression = SmartGroupMatchExpression {
        cidr: expr.string("cidr")?,
        fqdn: expr.string("fqdn")?,
        site: expr.string("site")?,
        resource_type: expr.string("type")?,
        res_id: expr.string("res_id")?,
        account_id: expr.string("account_id")?,
        account_name: expr.string("account_name")?,
        name: expr.string("name")?,
        region: expr.string("region")?,
        zone: expr.string("zone")?,
        tags: expr.string_map("tags")?,
    };
    if expression.is_empty() {
        return Err(ProviderError::validation(
            "match expressions block cannot be empty",
        ));
    }
    Ok(expression)
}

fn group(config: Fields<'_>) -> ProviderResult<models::SmartGroup> {
    let mut selector = Vec::new();
    for block in config.blocks("selector")? {
        for expr in block.blocks("match_expressions")? {
            selector.push(match_expression(expr)?);
        }
    }
    if selector.is_empty() {
        return Err(ProviderError::validation(
            "selector must contain at least one match expression",
        ));
    }
    Ok(models::SmartGroup {
        uuid: String::new(),
        name: config.string("name")?,
        selector,
    })
}

/// State form of a selector: one block holding every match expression
pub(crate) fn selector_value(expressions: Vec<SmartGroupMatchExpression>) -> Value {
    let expressions = expressions.into_iter().map(expression_attributes).collect();
    Value::List(vec![Value::Map(HashMap::from([(
        "match_expressions".to_string(),
        Value::List(expressions),
    )]))])
}

/// Empty criteria are left out
fn expression_attributes(expression: SmartGroupMatchExpression) -> Value {
    let values = [
        expression.cidr,
        expression.fqdn,
        expression.site,
        expression.resource_type,
        expression.res_id,
        expression.account_id,
        expression.account_name,
        expression.name,
        expression.region,
        expression.zone,
    ];
    let mut attrs: Attributes = CRITERIA
        .iter()
        .zip(values)
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.to_string(), Value::from(value)))
        .collect();
    if !expression.tags.is_empty() {
        let tags = expression
            .tags
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect();
        attrs.insert("tags".to_string(), Value::Map(tags));
    }
    Value::Map(attrs)
}

#[async_trait]
impl ResourceHandler for SmartGroup {
    fn type_name(&self) -> &'static str {
        "smart_group"
    }

    fn schema(&self) -> ResourceSchema {
        let criterion = |name: &str| AttributeSchema::new(name, AttributeType::String);
        let expression = types::block(vec![
            AttributeSchema::new("cidr", cidr_or_ip())
                .with_description("CIDR block or IP address this expression matches"),
            AttributeSchema::new("fqdn", not_blank()),
            AttributeSchema::new("site", not_blank()).with_description("Edge site ID"),
            AttributeSchema::new(
                "type",
                AttributeType::Enum(
                    ["vm", "vpc", "subnet", "k8s"]
                        .iter()
                        .map(|t| t.to_string())
                        .collect(),
                ),
            ),
            criterion("res_id"),
            criterion("account_id"),
            criterion("account_name"),
            criterion("name"),
            criterion("region"),
            criterion("zone"),
            AttributeSchema::new("tags", AttributeType::Map(Box::new(AttributeType::String))),
        ]);
        let selector = types::block(vec![
            AttributeSchema::new("match_expressions", AttributeType::List(Box::new(expression)))
                .required(),
        ]);
        ResourceSchema::new(self.type_name())
            .with_description("Smart Group used by distributed-firewalling policies")
            .attribute(AttributeSchema::new("name", AttributeType::String).required())
            .attribute(
                AttributeSchema::new("selector", AttributeType::List(Box::new(selector)))
                    .required()
                    .with_max_items(1),
            )
            .attribute(AttributeSchema::new("uuid", AttributeType::String).computed())
    }

    fn validate(&self, config: Fields<'_>) -> ProviderResult<()> {
        group(config).map(|_| ())
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let group = group(config)?;
        log::info!(
            "creating {} {} with {} match expressions",
            WHAT,
            group.name,
            group.selector.len()
        );
        ctx.client
            .create_smart_group(&group)
            .await
            .or_fail("create", WHAT)
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        let Some(group) = ctx
            .client
            .get_smart_group(id)
            .await
            .found()
            .or_fail("read", WHAT)?
        else {
            return Ok(None);
        };

        Ok(Some(HashMap::from([
            ("uuid".to_string(), Value::from(id)),
            ("name".to_string(), Value::from(group.name)),
            ("selector".to_string(), selector_value(group.selector)),
        ])))
    }

    async fn update(
        &self,
        ctx: &Context<'_>,
        id: &str,
        changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        if changes.has_changes(&["name", "selector"]) {
            let group = group(changes.new_fields())?;
            ctx.client
                .update_smart_group(id, &group)
                .await
                .or_fail("update", WHAT)?;
        }
        Ok(())
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        ctx.client
            .delete_smart_group(id)
            .await
            .or_fail("delete", WHAT)
    }
}
