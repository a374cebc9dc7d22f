//! # Transaction Methods
//!
//! Closed set of transaction method tags. The wire name of each method is
//! also what a gated mutation compares against a request's `purpose`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Subsystem a method is handled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodCategory {
    /// Node & proxy registry
    Node,
    /// Namespaces and mode governance
    Namespace,
    /// Reference groups, identities, accessors
    Identity,
    /// Request/response protocol
    Request,
    /// Services and destinations
    Service,
    /// Error-code registry
    ErrorCode,
    /// Chain-wide settings
    Chain,
}

macro_rules! define_methods {
    ($( $variant:ident => $name:literal, $category:ident; )*) => {
        /// A transaction method.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Method {
            $(
                #[doc = $name]
                $variant,
            )*
        }

        impl Method {
            /// Every method, in declaration order.
            pub const ALL: &'static [Method] = &[$(Method::$variant),*];

            /// Wire name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Method::$variant => $name,)*
                }
            }

            /// Handling subsystem.
            pub fn category(&self) -> MethodCategory {
                match self {
                    $(Method::$variant => MethodCategory::$category,)*
                }
            }
        }
    };
}

define_methods! {
    InitNdid => "InitNDID", Node;
    RegisterNode => "RegisterNode", Node;
    UpdateNode => "UpdateNode", Node;
    UpdateNodeByNdid => "UpdateNodeByNDID", Node;
    SetMqAddresses => "SetMqAddresses", Node;
    DisableNode => "DisableNode", Node;
    EnableNode => "EnableNode", Node;
    AddNodeToken => "AddNodeToken", Node;
    ReduceNodeToken => "ReduceNodeToken", Node;
    SetNodeToken => "SetNodeToken", Node;
    AddNodeToProxyNode => "AddNodeToProxyNode", Node;
    UpdateNodeProxyNode => "UpdateNodeProxyNode", Node;
    RemoveNodeFromProxyNode => "RemoveNodeFromProxyNode", Node;

    AddNamespace => "AddNamespace", Namespace;
    UpdateNamespace => "UpdateNamespace", Namespace;
    DisableNamespace => "DisableNamespace", Namespace;
    EnableNamespace => "EnableNamespace", Namespace;
    SetAllowedModeList => "SetAllowedModeList", Namespace;
    SetAllowedMinIalForRegisterIdentityAtFirstIdp => "SetAllowedMinIalForRegisterIdentityAtFirstIdp", Namespace;

    RegisterIdentity => "RegisterIdentity", Identity;
    AddIdentity => "AddIdentity", Identity;
    UpdateIdentity => "UpdateIdentity", Identity;
    UpdateIdentityModeList => "UpdateIdentityModeList", Identity;
    AddAccessorMethod => "AddAccessorMethod", Identity;
    RevokeAccessor => "RevokeAccessor", Identity;
    RevokeAndAddAccessor => "RevokeAndAddAccessor", Identity;
    RevokeIdentityAssociation => "RevokeIdentityAssociation", Identity;

    CreateRequest => "CreateRequest", Request;
    CreateIdpResponse => "CreateIdpResponse", Request;
    CreateAsResponse => "CreateAsResponse", Request;
    SetDataReceived => "SetDataReceived", Request;
    CloseRequest => "CloseRequest", Request;
    TimeOutRequest => "TimeOutRequest", Request;

    AddService => "AddService", Service;
    UpdateService => "UpdateService", Service;
    DisableService => "DisableService", Service;
    EnableService => "EnableService", Service;
    RegisterServiceDestinationByNdid => "RegisterServiceDestinationByNDID", Service;
    DisableServiceDestinationByNdid => "DisableServiceDestinationByNDID", Service;
    EnableServiceDestinationByNdid => "EnableServiceDestinationByNDID", Service;
    RegisterServiceDestination => "RegisterServiceDestination", Service;
    UpdateServiceDestination => "UpdateServiceDestination", Service;
    DisableServiceDestination => "DisableServiceDestination", Service;
    EnableServiceDestination => "EnableServiceDestination", Service;

    AddErrorCode => "AddErrorCode", ErrorCode;
    RemoveErrorCode => "RemoveErrorCode", ErrorCode;

    SetLastBlock => "SetLastBlock", Chain;
}

impl Method {
    /// Whether the method is verified with the signer's master key.
    pub fn uses_master_key(&self) -> bool {
        matches!(self, Method::UpdateNode)
    }

    /// Mutations that require a closed, accepted request with a matching purpose.
    pub fn is_request_gated(&self) -> bool {
        matches!(
            self,
            Method::AddIdentity
                | Method::AddAccessorMethod
                | Method::RevokeAccessor
                | Method::RevokeAndAddAccessor
                | Method::RevokeIdentityAssociation
        )
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or(())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse()
            .map_err(|_| serde::de::Error::custom(format!("Unknown method: {name}")))
    }
}
