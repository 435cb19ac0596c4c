//! distributed_firewalling_policy_list - Complete, ordered list of DCF policies
//!
//! The controller holds a single policy list, so the resource is a
//! singleton identified by the controller ID. Every change replaces the
//! whole list.

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models::{
    DistributedFirewallingPolicy, DistributedFirewallingPolicyList, PolicyAction, PortRange,
    Protocol,
};
use avx_core::differ::Changes;
use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "distributed-firewalling policy list";

const MAX_PORT_RANGES: usize = 64;

pub struct PolicyList;

fn port_range_schema() -> AttributeType {
    types::block(vec![
        AttributeSchema::new("lo", AttributeType::Int)
            .required()
            .with_description("Lowest port in the range"),
        AttributeSchema::new("hi", AttributeType::Int)
            .with_description("Highest port in the range; a single port when unset"),
    ])
}

fn policy_schema() -> AttributeType {
    types::block(vec![
        AttributeSchema::new("name", AttributeType::String).required(),
        AttributeSchema::new(
            "action",
            AttributeType::Enum(vec!["PERMIT".to_string(), "DENY".to_string()]),
        )
        .required(),
        AttributeSchema::new(
            "protocol",
            types::custom("Protocol", AttributeType::String, |value| {
                types::check_choice(value, &["TCP", "UDP", "ICMP", "ANY"], true)
            }),
        )
        .required()
        .with_diff_suppress(types::suppress_case_difference),
        AttributeSchema::new("priority", AttributeType::Int).with_default(Value::Int(0)),
        AttributeSchema::new("src_smart_groups", types::string_set())
            .required()
            .with_description("Source smart group UUIDs"),
        AttributeSchema::new("dst_smart_groups", types::string_set())
            .required()
            .with_description("Destination smart group UUIDs"),
        AttributeSchema::new("logging", AttributeType::Bool).with_default(false),
        AttributeSchema::new("watch", AttributeType::Bool)
            .with_default(false)
            .with_description("Report matches without enforcing the action"),
        AttributeSchema::new("port_ranges", AttributeType::List(Box::new(port_range_schema())))
            .with_max_items(MAX_PORT_RANGES),
        AttributeSchema::new("uuid", AttributeType::String).computed(),
    ])
}

fn policy(block: Fields<'_>) -> ProviderResult<DistributedFirewallingPolicy> {
    let name = block.string("name")?;
    let action = block.string("action")?;
    let action = PolicyAction::from_config(&action).ok_or_else(|| {
        ProviderError::validation(format!("policy {}: unknown action {:?}", name, action))
    })?;
    let protocol = block.string("protocol")?;
    let protocol = Protocol::from_config(&protocol).ok_or_else(|| {
        ProviderError::validation(format!("policy {}: unknown protocol {:?}", name, protocol))
    })?;

    let ranges = block.blocks("port_ranges")?;
    if protocol == Protocol::Icmp && !ranges.is_empty() {
        return Err(ProviderError::validation(format!(
            "policy {}: \"port_ranges\" must not be set when \"protocol\" is \"ICMP\"",
            name
        )));
    }
    let port_ranges = ranges
        .into_iter()
        .map(|range| -> ProviderResult<PortRange> {
            Ok(PortRange {
                lo: range.int("lo")?,
                hi: range.get("hi").and_then(Value::as_int),
            })
        })
        .collect::<ProviderResult<Vec<_>>>()?;

    Ok(DistributedFirewallingPolicy {
        name,
        action,
        priority: block.int("priority")?,
        protocol,
        src_smart_groups: block.string_set("src_smart_groups")?.into_iter().collect(),
        dst_smart_groups: block.string_set("dst_smart_groups")?.into_iter().collect(),
        logging: block.bool("logging")?,
        watch: block.bool("watch")?,
        port_ranges,
        uuid: block.optional_string("uuid")?,
    })
}

fn policy_list(config: Fields<'_>) -> ProviderResult<DistributedFirewallingPolicyList> {
    let policies = config
        .blocks("policies")?
        .into_iter()
        .map(policy)
        .collect::<ProviderResult<Vec<_>>>()?;
    Ok(DistributedFirewallingPolicyList { policies })
}

fn policy_attributes(policy: DistributedFirewallingPolicy) -> Value {
    let mut attrs: Attributes = HashMap::from([
        ("name".to_string(), Value::from(policy.name)),
        ("action".to_string(), Value::from(policy.action.as_str())),
        ("priority".to_string(), Value::Int(policy.priority)),
        ("protocol".to_string(), Value::from(policy.protocol.config_name())),
        ("src_smart_groups".to_string(), Value::strings(policy.src_smart_groups)),
        ("dst_smart_groups".to_string(), Value::strings(policy.dst_smart_groups)),
        ("logging".to_string(), Value::Bool(policy.logging)),
        ("watch".to_string(), Value::Bool(policy.watch)),
        ("uuid".to_string(), Value::from(policy.uuid.unwrap_or_default())),
    ]);
    if policy.protocol != Protocol::Icmp {
        let ranges = policy
            .port_ranges
            .into_iter()
            .map(|range| {
                let mut block = HashMap::from([("lo".to_string(), Value::Int(range.lo))]);
                if let Some(hi) = range.hi {
                    block.insert("hi".to_string(), Value::Int(hi));
                }
                Value::Map(block)
            })
            .collect();
        attrs.insert("port_ranges".to_string(), Value::List(ranges));
    }
    Value::Map(attrs)
}

#[async_trait]
impl ResourceHandler for PolicyList {
    fn type_name(&self) -> &'static str {
        "distributed_firewalling_policy_list"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name())
            .with_description("Distributed-firewalling policies, evaluated in priority order")
            .attribute(
                AttributeSchema::new("policies", AttributeType::List(Box::new(policy_schema())))
                    .required(),
            )
    }

    fn validate(&self, config: Fields<'_>) -> ProviderResult<()> {
        policy_list(config).map(|_| ())
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let list = policy_list(config)?;
        log::info!("creating {} with {} policies", WHAT, list.policies.len());
        ctx.client
            .update_distributed_firewalling_policy_list(&list)
            .await
            .or_fail("create", WHAT)?;
        Ok(ctx.controller_id())
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        ctx.check_controller_id(id)?;
        let Some(list) = ctx
            .client
            .get_distributed_firewalling_policy_list()
            .await
            .found()
            .or_fail("read", WHAT)?
        else {
            return Ok(None);
        };

        let policies = list.policies.into_iter().map(policy_attributes).collect();
        Ok(Some(HashMap::from([(
            "policies".to_string(),
            Value::List(policies),
        )])))
    }

    async fn update(
        &self,
        ctx: &Context<'_>,
        _id: &str,
        changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        let mut list = policy_list(changes.new_fields())?;

        // Policies that keep their name keep their controller-assigned UUID
        let known: HashMap<String, String> = policy_list(changes.old())?
            .policies
            .into_iter()
            .filter_map(|p| p.uuid.map(|uuid| (p.name, uuid)))
            .collect();
        for policy in &mut list.policies {
            if policy.uuid.is_none() {
                policy.uuid = known.get(&policy.name).cloned();
            }
        }

        ctx.client
            .update_distributed_firewalling_policy_list(&list)
            .await
            .or_fail("update", WHAT)
    }

    async fn delete(&self, ctx: &Context<'_>, _id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        ctx.client
            .delete_distributed_firewalling_policy_list()
            .await
            .or_fail("delete", WHAT)
    }
}
