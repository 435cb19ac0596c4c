//! edge_spoke - Edge gateway acting as a spoke
//!
//! Creation registers the gateway and writes a ZTP file for the device;
//! BGP, routing and location settings are applied afterwards with dedicated
//! calls. The controller refuses to change the local AS number while a
//! prepend path is set, so updates clear the path first.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use avx_client::models::{self, ActiveStandbyMode, ManagementInterface, ZtpFileType};
use avx_core::differ::Changes;
use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "Edge as a Spoke";

const MAX_PREPEND_AS_PATH: usize = 25;

const DEFAULT_BGP_POLLING_TIME: i64 = 50;
const DEFAULT_BGP_HOLD_TIME: i64 = 180;

/// Interface addressing the controller can change on a running gateway
const IP_SETTINGS: [&str; 5] = [
    "management_egress_ip_prefix",
    "wan_interface_ip_prefix",
    "wan_default_gateway_ip",
    "lan_interface_ip_prefix",
    "wan_public_ip",
];

const STATIC_ONLY: [&str; 4] = [
    "management_interface_ip_prefix",
    "management_default_gateway_ip",
    "dns_server_ip",
    "secondary_dns_server_ip",
];

pub struct EdgeSpoke;

fn management_interface(config: Fields<'_>) -> ProviderResult<ManagementInterface> {
    match config.string("management_interface_config")?.as_str() {
        "DHCP" => Ok(ManagementInterface::Dhcp),
        "Static" => Ok(ManagementInterface::Static),
        other => Err(ProviderError::validation(format!(
            "unknown management_interface_config {:?}",
            other
        ))),
    }
}

fn ztp_file_type(config: Fields<'_>) -> ProviderResult<ZtpFileType> {
    match config.string("ztp_file_type")?.as_str() {
        "iso" => Ok(ZtpFileType::Iso),
        "cloud-init" => Ok(ZtpFileType::CloudInit),
        other => Err(ProviderError::validation(format!(
            "unknown ztp_file_type {:?}",
            other
        ))),
    }
}

fn active_standby(config: Fields<'_>) -> ProviderResult<Option<ActiveStandbyMode>> {
    let enabled = config.bool("enable_active_standby")?;
    let preemptive = config.bool("enable_active_standby_preemptive")?;
    match (enabled, preemptive) {
        (false, true) => Err(ProviderError::validation(
            "could not configure Preemptive Mode with Active-Standby disabled",
        )),
        (false, false) => Ok(None),
        (true, false) => Ok(Some(ActiveStandbyMode::NonPreemptive)),
        (true, true) => Ok(Some(ActiveStandbyMode::Preemptive)),
    }
}

fn check_coordinate(value: &Value, limit: f64) -> Result<(), String> {
    let Value::String(s) = value else {
        return Err("Expected string".to_string());
    };
    let degrees: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("expected a decimal number of degrees, got '{}'", s))?;
    if (-limit..=limit).contains(&degrees) {
        Ok(())
    } else {
        Err(format!("must be between -{} and {}", limit, limit))
    }
}

fn degrees(value: &str) -> ProviderResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| ProviderError::validation(format!("invalid coordinate {:?}", value)))
}

/// Zero means "let the controller place the gateway"
fn same_coordinate(old: &Value, new: &Value) -> bool {
    let parse = |v: &Value| v.as_str().and_then(|s| s.trim().parse::<f64>().ok());
    match (parse(old), parse(new)) {
        (_, None) => true,
        (_, Some(n)) if n == 0.0 => true,
        (Some(o), Some(n)) => o == n,
        (None, Some(_)) => false,
    }
}

fn coordinate(config: Fields<'_>, name: &str) -> ProviderResult<f64> {
    match config.optional_string(name)? {
        Some(value) => degrees(&value),
        None => Ok(0.0),
    }
}

/// Registration request; the optional settings are applied separately after creation
fn gateway(config: Fields<'_>) -> ProviderResult<models::EdgeSpoke> {
    Ok(models::EdgeSpoke {
        gw_name: config.string("gw_name")?,
        site_id: config.string("site_id")?,
        ztp_file_type: ztp_file_type(config)?,
        ztp_file_download_path: config.string("ztp_file_download_path")?,
        management_interface: management_interface(config)?,
        management_interface_ip_prefix: config.string("management_interface_ip_prefix")?,
        management_default_gateway_ip: config.string("management_default_gateway_ip")?,
        dns_server_ip: config.string("dns_server_ip")?,
        secondary_dns_server_ip: config.string("secondary_dns_server_ip")?,
        wan_interface_ip_prefix: config.string("wan_interface_ip_prefix")?,
        wan_default_gateway_ip: config.string("wan_default_gateway_ip")?,
        lan_interface_ip_prefix: config.string("lan_interface_ip_prefix")?,
        management_egress_ip_prefix: config.string("management_egress_ip_prefix")?,
        enable_over_private_network: config.bool("enable_over_private_network")?,
        wan_public_ip: config.string("wan_public_ip")?,
        active_standby: active_standby(config)?,
        bgp_manual_advertise_cidrs: config
            .string_set("spoke_bgp_manual_advertise_cidrs")?
            .into_iter()
            .collect(),
        enable_preserve_as_path: config.bool("enable_preserve_as_path")?,
        bgp_polling_time: config.int("bgp_polling_time")?,
        bgp_hold_time: config.int("bgp_hold_time")?,
        enable_edge_transitive_routing: config.bool("enable_edge_transitive_routing")?,
        enable_jumbo_frame: config.bool("enable_jumbo_frame")?,
        latitude: coordinate(config, "latitude")?,
        longitude: coordinate(config, "longitude")?,
        ..Default::default()
    })
}

/// Location of the ZTP file the controller generated for this gateway
fn ztp_file(state: Fields<'_>) -> ProviderResult<Option<PathBuf>> {
    let Some(dir) = state.optional_string("ztp_file_download_path")? else {
        return Ok(None);
    };
    let gw_name = state.string("gw_name")?;
    let site_id = state.string("site_id")?;
    let file_name = match ztp_file_type(state)? {
        ZtpFileType::Iso => format!("{}-{}.iso", gw_name, site_id),
        ZtpFileType::CloudInit => format!("{}-{}-cloud-init.txt", gw_name, site_id),
    };
    Ok(Some(PathBuf::from(dir).join(file_name)))
}

async fn set_prepend_as_path(ctx: &Context<'_>, gw_name: &str, path: &[String]) -> ProviderResult<()> {
    ctx.client
        .set_edge_spoke_prepend_as_path(gw_name, path)
        .await
        .or_fail("set prepend_as_path for", WHAT)
}

async fn set_local_as_number(ctx: &Context<'_>, gw_name: &str, asn: &str) -> ProviderResult<()> {
    ctx.client
        .set_edge_spoke_local_as_number(gw_name, asn)
        .await
        .or_fail("set local_as_number for", WHAT)
}

async fn set_learned_cidrs_approval(
    ctx: &Context<'_>,
    gw_name: &str,
    enabled: bool,
) -> ProviderResult<()> {
    ctx.client
        .set_edge_spoke_learned_cidrs_approval(gw_name, enabled)
        .await
        .or_fail("set learned CIDRs approval for", WHAT)
}

async fn set_manual_advertise_cidrs(
    ctx: &Context<'_>,
    gw_name: &str,
    cidrs: &[String],
) -> ProviderResult<()> {
    ctx.client
        .set_edge_spoke_bgp_manual_advertise_cidrs(gw_name, cidrs)
        .await
        .or_fail("set BGP manual advertise CIDRs for", WHAT)
}

async fn update_ip_configurations(
    ctx: &Context<'_>,
    gateway: &models::EdgeSpoke,
) -> ProviderResult<()> {
    ctx.client
        .update_edge_spoke_ip_configurations(gateway)
        .await
        .or_fail("update IP configurations of", WHAT)
}

async fn update_geo_coordinate(
    ctx: &Context<'_>,
    gw_name: &str,
    latitude: f64,
    longitude: f64,
) -> ProviderResult<()> {
    ctx.client
        .update_edge_spoke_geo_coordinate(gw_name, latitude, longitude)
        .await
        .or_fail("update geo coordinate of", WHAT)
}

/// Configured value, or the one in state for settings the controller fills in
fn current(changes: &Changes<'_>, name: &str) -> ProviderResult<Option<String>> {
    match changes.new_fields().optional_string(name)? {
        Some(value) => Ok(Some(value)),
        None => Ok(changes.old().optional_string(name)?),
    }
}

async fn update_approved_learned_cidrs(
    ctx: &Context<'_>,
    gw_name: &str,
    cidrs: &[String],
) -> ProviderResult<()> {
    ctx.client
        .update_edge_spoke_approved_learned_cidrs(gw_name, cidrs)
        .await
        .or_fail("update approved learned CIDRs for", WHAT)
}

#[async_trait]
impl ResourceHandler for EdgeSpoke {
    fn type_name(&self) -> &'static str {
        "edge_spoke"
    }

    fn schema(&self) -> ResourceSchema {
        let fixed = |name: &str, attr_type: AttributeType| {
            AttributeSchema::new(name, attr_type).required().force_new()
        };
        let static_only = |name: &str, attr_type: AttributeType| {
            AttributeSchema::new(name, attr_type)
                .force_new()
                .with_description("Only valid with a Static management interface")
        };
        let flag = |name: &str| AttributeSchema::new(name, AttributeType::Bool).with_default(false);
        ResourceSchema::new(self.type_name())
            .with_description("Edge as a Spoke gateway")
            .attribute(fixed("gw_name", types::natural_key()))
            .attribute(fixed("site_id", AttributeType::String))
            .attribute(fixed(
                "management_interface_config",
                AttributeType::Enum(vec!["DHCP".to_string(), "Static".to_string()]),
            ))
            .attribute(AttributeSchema::new("wan_interface_ip_prefix", types::cidr()).required())
            .attribute(AttributeSchema::new("wan_default_gateway_ip", types::ipv4()).required())
            .attribute(AttributeSchema::new("lan_interface_ip_prefix", types::cidr()).required())
            .attribute(
                AttributeSchema::new("management_egress_ip_prefix", AttributeType::String)
                    .with_description("Management egress gateway IP and prefix"),
            )
            .attribute(
                AttributeSchema::new("wan_public_ip", types::ipv4())
                    .optional_computed()
                    .with_description("Public IP of the WAN interface; discovered when unset"),
            )
            .attribute(flag("enable_over_private_network").force_new())
            .attribute(static_only("management_interface_ip_prefix", types::cidr()))
            .attribute(static_only("management_default_gateway_ip", types::ipv4()))
            .attribute(static_only("dns_server_ip", types::ipv4()))
            .attribute(static_only("secondary_dns_server_ip", types::ipv4()))
            .attribute(fixed(
                "ztp_file_type",
                AttributeType::Enum(vec!["iso".to_string(), "cloud-init".to_string()]),
            ))
            .attribute(
                fixed("ztp_file_download_path", AttributeType::String)
                    .with_description("Directory the ZTP file is written to")
                    .with_diff_suppress(|old, _| !old.is_zero()),
            )
            .attribute(AttributeSchema::new("local_as_number", types::asn()).optional_computed())
            .attribute(
                AttributeSchema::new("prepend_as_path", AttributeType::List(Box::new(types::asn())))
                    .with_max_items(MAX_PREPEND_AS_PATH)
                    .with_description("AS numbers prepended to the BGP AS_PATH"),
            )
            .attribute(flag("enable_active_standby"))
            .attribute(flag("enable_active_standby_preemptive"))
            .attribute(flag("enable_learned_cidrs_approval"))
            .attribute(AttributeSchema::new(
                "approved_learned_cidrs",
                AttributeType::Set(Box::new(types::cidr())),
            ))
            .attribute(
                AttributeSchema::new(
                    "spoke_bgp_manual_advertise_cidrs",
                    AttributeType::Set(Box::new(types::cidr())),
                )
                .with_description("CIDRs advertised to the external BGP router"),
            )
            .attribute(flag("enable_preserve_as_path"))
            .attribute(
                AttributeSchema::new(
                    "bgp_polling_time",
                    types::custom("BgpPollingTime", AttributeType::Int, |value| {
                        types::check_int_range(value, 10, 50)
                    }),
                )
                .with_default(Value::Int(DEFAULT_BGP_POLLING_TIME))
                .with_description("BGP route polling time in seconds"),
            )
            .attribute(
                AttributeSchema::new(
                    "bgp_hold_time",
                    types::custom("BgpHoldTime", AttributeType::Int, |value| {
                        types::check_int_range(value, 12, 360)
                    }),
                )
                .with_default(Value::Int(DEFAULT_BGP_HOLD_TIME))
                .with_description("BGP hold time in seconds"),
            )
            .attribute(flag("enable_edge_transitive_routing"))
            .attribute(flag("enable_jumbo_frame"))
            .attribute(
                AttributeSchema::new(
                    "latitude",
                    types::custom("Latitude", AttributeType::String, |value| {
                        check_coordinate(value, 90.0)
                    }),
                )
                .optional_computed()
                .with_diff_suppress(same_coordinate),
            )
            .attribute(
                AttributeSchema::new(
                    "longitude",
                    types::custom("Longitude", AttributeType::String, |value| {
                        check_coordinate(value, 180.0)
                    }),
                )
                .optional_computed()
                .with_diff_suppress(same_coordinate),
            )
            .attribute(AttributeSchema::new("state", AttributeType::String).computed())
    }

    fn validate(&self, config: Fields<'_>) -> ProviderResult<()> {
        let any_static = STATIC_ONLY.iter().any(|name| config.is_set(name));
        let all_static = STATIC_ONLY.iter().all(|name| config.is_set(name));
        match management_interface(config)? {
            ManagementInterface::Dhcp if any_static => {
                return Err(ProviderError::validation(format!(
                    "{} are only valid when management_interface_config is Static",
                    STATIC_ONLY.join(", ")
                )));
            }
            ManagementInterface::Static if !all_static => {
                return Err(ProviderError::validation(format!(
                    "{} are required when management_interface_config is Static",
                    STATIC_ONLY.join(", ")
                )));
            }
            _ => {}
        }

        active_standby(config)?;

        if !config.bool("enable_learned_cidrs_approval")? && config.is_set("approved_learned_cidrs") {
            return Err(ProviderError::validation(
                "approved_learned_cidrs must be empty if enable_learned_cidrs_approval is false",
            ));
        }
        if config.is_set("prepend_as_path") && !config.is_set("local_as_number") {
            return Err(ProviderError::validation(
                "prepend_as_path must be empty if local_as_number is not set",
            ));
        }
        Ok(())
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        Ok(HashMap::from([("gw_name".to_string(), Value::from(id))]))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let gateway = gateway(config)?;
        let gw_name = gateway.gw_name.clone();
        log::info!("creating {} {} at site {}", WHAT, gw_name, gateway.site_id);
        ctx.client
            .create_edge_spoke(&gateway)
            .await
            .or_fail("create", WHAT)?;

        if let Some(asn) = config.optional_string("local_as_number")? {
            set_local_as_number(ctx, &gw_name, &asn).await?;
        }
        let prepend = config.strings("prepend_as_path")?;
        if !prepend.is_empty() {
            set_prepend_as_path(ctx, &gw_name, &prepend).await?;
        }
        if config.bool("enable_learned_cidrs_approval")? {
            set_learned_cidrs_approval(ctx, &gw_name, true).await?;
            let approved: Vec<String> = config
                .string_set("approved_learned_cidrs")?
                .into_iter()
                .collect();
            if !approved.is_empty() {
                update_approved_learned_cidrs(ctx, &gw_name, &approved).await?;
            }
        }

        if !gateway.bgp_manual_advertise_cidrs.is_empty() {
            set_manual_advertise_cidrs(ctx, &gw_name, &gateway.bgp_manual_advertise_cidrs).await?;
        }
        if gateway.enable_preserve_as_path {
            ctx.client
                .set_edge_spoke_preserve_as_path(&gw_name, true)
                .await
                .or_fail("enable preserve AS path for", WHAT)?;
        }
        if gateway.bgp_polling_time != DEFAULT_BGP_POLLING_TIME {
            ctx.client
                .set_edge_spoke_bgp_polling_time(&gw_name, gateway.bgp_polling_time)
                .await
                .or_fail("set BGP polling time for", WHAT)?;
        }
        if gateway.bgp_hold_time != DEFAULT_BGP_HOLD_TIME {
            ctx.client
                .set_edge_spoke_bgp_hold_time(&gw_name, gateway.bgp_hold_time)
                .await
                .or_fail("set BGP hold time for", WHAT)?;
        }
        if gateway.enable_edge_transitive_routing {
            ctx.client
                .set_edge_spoke_transitive_routing(&gw_name, true)
                .await
                .or_fail("enable transitive routing for", WHAT)?;
        }
        if gateway.enable_jumbo_frame {
            ctx.client
                .set_edge_spoke_jumbo_frame(&gw_name, true)
                .await
                .or_fail("enable jumbo frame for", WHAT)?;
        }
        if gateway.latitude != 0.0 || gateway.longitude != 0.0 {
            update_geo_coordinate(ctx, &gw_name, gateway.latitude, gateway.longitude).await?;
        }
        if !gateway.wan_public_ip.is_empty() {
            update_ip_configurations(ctx, &gateway).await?;
        }
        Ok(gw_name)
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        let Some(gateway) = ctx
            .client
            .get_edge_spoke(id)
            .await
            .found()
            .or_fail("read", WHAT)?
        else {
            return Ok(None);
        };

        let approved = if gateway.enable_learned_cidrs_approval {
            let mut cidrs = gateway.approved_learned_cidrs;
            cidrs.sort();
            cidrs
        } else {
            Vec::new()
        };
        let mut advertised = gateway.bgp_manual_advertise_cidrs;
        advertised.sort();
        let mut attrs = HashMap::from([
            ("gw_name".to_string(), Value::from(gateway.gw_name)),
            ("site_id".to_string(), Value::from(gateway.site_id)),
            (
                "management_interface_config".to_string(),
                Value::from(gateway.management_interface.as_str()),
            ),
            ("wan_interface_ip_prefix".to_string(), Value::from(gateway.wan_interface_ip_prefix)),
            ("wan_default_gateway_ip".to_string(), Value::from(gateway.wan_default_gateway_ip)),
            ("lan_interface_ip_prefix".to_string(), Value::from(gateway.lan_interface_ip_prefix)),
            (
                "management_egress_ip_prefix".to_string(),
                Value::from(gateway.management_egress_ip_prefix),
            ),
            (
                "enable_over_private_network".to_string(),
                Value::Bool(gateway.enable_over_private_network),
            ),
            ("wan_public_ip".to_string(), Value::from(gateway.wan_public_ip)),
            (
                "management_default_gateway_ip".to_string(),
                Value::from(gateway.management_default_gateway_ip),
            ),
            ("dns_server_ip".to_string(), Value::from(gateway.dns_server_ip)),
            ("secondary_dns_server_ip".to_string(), Value::from(gateway.secondary_dns_server_ip)),
            ("ztp_file_type".to_string(), Value::from(gateway.ztp_file_type.as_str())),
            ("local_as_number".to_string(), Value::from(gateway.local_as_number)),
            ("prepend_as_path".to_string(), Value::strings(gateway.prepend_as_path)),
            (
                "enable_active_standby".to_string(),
                Value::Bool(gateway.active_standby.is_some()),
            ),
            (
                "enable_active_standby_preemptive".to_string(),
                Value::Bool(gateway.active_standby == Some(ActiveStandbyMode::Preemptive)),
            ),
            (
                "enable_learned_cidrs_approval".to_string(),
                Value::Bool(gateway.enable_learned_cidrs_approval),
            ),
            ("approved_learned_cidrs".to_string(), Value::strings(approved)),
            ("spoke_bgp_manual_advertise_cidrs".to_string(), Value::strings(advertised)),
            (
                "enable_preserve_as_path".to_string(),
                Value::Bool(gateway.enable_preserve_as_path),
            ),
            ("bgp_polling_time".to_string(), Value::Int(gateway.bgp_polling_time)),
            ("bgp_hold_time".to_string(), Value::Int(gateway.bgp_hold_time)),
            (
                "enable_edge_transitive_routing".to_string(),
                Value::Bool(gateway.enable_edge_transitive_routing),
            ),
            ("enable_jumbo_frame".to_string(), Value::Bool(gateway.enable_jumbo_frame)),
            ("latitude".to_string(), Value::from(gateway.latitude.to_string())),
            ("longitude".to_string(), Value::from(gateway.longitude.to_string())),
            ("state".to_string(), Value::from(gateway.state)),
        ]);
        if gateway.management_interface == ManagementInterface::Static {
            attrs.insert(
                "management_interface_ip_prefix".to_string(),
                Value::from(gateway.management_interface_ip_prefix),
            );
        }
        Ok(Some(attrs))
    }

    async fn update(
        &self,
        ctx: &Context<'_>,
        id: &str,
        changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        let new = changes.new_fields();

        if changes.has_changes(&IP_SETTINGS) {
            let gateway = models::EdgeSpoke {
                gw_name: id.to_string(),
                wan_interface_ip_prefix: new.string("wan_interface_ip_prefix")?,
                wan_default_gateway_ip: new.string("wan_default_gateway_ip")?,
                lan_interface_ip_prefix: new.string("lan_interface_ip_prefix")?,
                management_egress_ip_prefix: new.string("management_egress_ip_prefix")?,
                wan_public_ip: current(changes, "wan_public_ip")?.unwrap_or_default(),
                ..Default::default()
            };
            update_ip_configurations(ctx, &gateway).await?;
        }

        if changes.has_changes(&["local_as_number", "prepend_as_path"]) {
            let prepend = new.strings("prepend_as_path")?;
            let both = changes.has_change("local_as_number") && changes.has_change("prepend_as_path");
            if both || prepend.is_empty() {
                set_prepend_as_path(ctx, id, &[]).await?;
            }
            if changes.has_change("local_as_number") {
                set_local_as_number(ctx, id, &new.string("local_as_number")?).await?;
            }
            if changes.has_change("prepend_as_path") && !prepend.is_empty() {
                set_prepend_as_path(ctx, id, &prepend).await?;
            }
        }

        let approval = new.bool("enable_learned_cidrs_approval")?;
        if changes.has_change("enable_learned_cidrs_approval") {
            set_learned_cidrs_approval(ctx, id, approval).await?;
        }
        if approval && changes.has_change("approved_learned_cidrs") {
            let approved: Vec<String> = new
                .string_set("approved_learned_cidrs")?
                .into_iter()
                .collect();
            update_approved_learned_cidrs(ctx, id, &approved).await?;
        }

        if changes.has_change("spoke_bgp_manual_advertise_cidrs") {
            let advertised: Vec<String> = new
                .string_set("spoke_bgp_manual_advertise_cidrs")?
                .into_iter()
                .collect();
            set_manual_advertise_cidrs(ctx, id, &advertised).await?;
        }
        if changes.has_change("enable_preserve_as_path") {
            ctx.client
                .set_edge_spoke_preserve_as_path(id, new.bool("enable_preserve_as_path")?)
                .await
                .or_fail("update preserve AS path for", WHAT)?;
        }
        if changes.has_change("bgp_polling_time") {
            ctx.client
                .set_edge_spoke_bgp_polling_time(id, new.int("bgp_polling_time")?)
                .await
                .or_fail("set BGP polling time for", WHAT)?;
        }
        if changes.has_change("bgp_hold_time") {
            ctx.client
                .set_edge_spoke_bgp_hold_time(id, new.int("bgp_hold_time")?)
                .await
                .or_fail("set BGP hold time for", WHAT)?;
        }
        if changes.has_change("enable_edge_transitive_routing") {
            ctx.client
                .set_edge_spoke_transitive_routing(id, new.bool("enable_edge_transitive_routing")?)
                .await
                .or_fail("update transitive routing for", WHAT)?;
        }
        if changes.has_change("enable_jumbo_frame") {
            ctx.client
                .set_edge_spoke_jumbo_frame(id, new.bool("enable_jumbo_frame")?)
                .await
                .or_fail("update jumbo frame for", WHAT)?;
        }
        if changes.has_changes(&["latitude", "longitude"]) {
            let latitude = current(changes, "latitude")?.map_or(Ok(0.0), |v| degrees(&v))?;
            let longitude = current(changes, "longitude")?.map_or(Ok(0.0), |v| degrees(&v))?;
            update_geo_coordinate(ctx, id, latitude, longitude).await?;
        }

        if changes.has_changes(&["enable_active_standby", "enable_active_standby_preemptive"]) {
            ctx.client
                .update_edge_spoke_active_standby(id, active_standby(new)?)
                .await
                .or_fail("update active-standby mode for", WHAT)?;
        }
        Ok(())
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, state: Fields<'_>) -> ProviderResult<()> {
        ctx.client
            .delete_edge_spoke(id)
            .await
            .or_fail("delete", WHAT)?;

        if let Some(path) = ztp_file(state)?
            && let Err(e) = tokio::fs::remove_file(&path).await
        {
            log::warn!("could not remove the ZTP file {}: {}", path.display(), e);
        }
        Ok(())
    }
}
