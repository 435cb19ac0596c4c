//! Request and response models exchanged with the controller

pub mod controller;
pub mod copilot;
pub mod dcf;
pub mod edge;
pub mod guard_duty;
pub mod rbac;
pub mod segmentation;
pub mod smart_group;
pub mod tgw;
pub mod vpn;

pub use controller::BgpMaxAsLimit;
pub use copilot::{CopilotAssociationStatus, CopilotSimpleDeployment};
pub use dcf::{
    DefaultActionRule, DistributedFirewallingPolicy, DistributedFirewallingPolicyList, IntraVpc,
    IntraVpcList, PolicyAction, PortRange, Protocol,
};
pub use edge::{ActiveStandbyMode, EdgeSpoke, ManagementInterface, ZtpFileType};
pub use guard_duty::AwsGuardDutyAccount;
pub use rbac::RbacGroupAccessAccounts;
pub use segmentation::{SegmentationConnectionPolicy, SegmentationDomainAssociation};
pub use smart_group::{SmartGroup, SmartGroupMatchExpression};
pub use tgw::{
    AwsTgwPeering, AwsTgwTransitGatewayAttachment, NetworkDomain, NetworkDomainSummary,
    TgwDomainConnection,
};
pub use vpn::VpnUser;
