//! # Error Types
//!
//! Rejection taxonomy shared by every subsystem. The `Display` text of each
//! variant is the transaction log callers see, so these strings are a
//! public contract.

use crate::methods::Method;
use thiserror::Error;

/// Failures detected without reading state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// Envelope bytes are not a valid envelope.
    #[error("Malformed transaction envelope: {0}")]
    MalformedEnvelope(String),

    /// Method tag is not in the closed method set.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// Empty `node_id`.
    #[error("Node ID is required")]
    MissingNodeId,

    /// Empty or undecodable nonce.
    #[error("Nonce is required")]
    MissingNonce,

    /// Empty or undecodable signature.
    #[error("Signature is required")]
    MissingSignature,

    /// Params do not decode into the method's parameter type.
    #[error("Invalid parameters for {method}: {reason}")]
    InvalidParams {
        /// Method being decoded.
        method: Method,
        /// Decoder message.
        reason: String,
    },
}

/// Failures of signer resolution, signature or role checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Signer is not registered.
    #[error("Node ID not found")]
    NodeNotFound,

    /// Signer is disabled.
    #[error("Node is not active")]
    NodeInactive,

    /// Signer's proxy record is missing.
    #[error("Proxy node not found")]
    ProxyNotFound,

    /// Stored or supplied key does not parse or fit its algorithm.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature does not verify.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Role policy forbids the method.
    #[error("Unauthorized to call {0}")]
    Unauthorized(Method),

    /// `last_block` has passed.
    #[error("Chain is disabled")]
    ChainDisabled,

    /// State could not be read.
    #[error("Store error: {0}")]
    Store(String),
}

/// Business-rule rejections, plus the two fatal classes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    // -------------------------------------------------------------------------
    // Nodes & proxies
    // -------------------------------------------------------------------------
    #[error("NDID node is already existed")]
    NdidAlreadyExisted,
    #[error("Duplicate Node ID")]
    DuplicateNodeId,
    #[error("Please input node ID")]
    NodeIdRequired,
    #[error("Invalid role")]
    InvalidRole,
    #[error("Node ID not found")]
    NodeNotFound,
    #[error("Node is not an IdP")]
    NodeNotIdp,
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Public key type does not match signing algorithm")]
    KeyAlgorithmMismatch,
    #[error("Invalid MQ address")]
    InvalidMqAddress,
    #[error("Amount must be greater than or equal to zero")]
    NegativeAmount,
    #[error("Token is not enough")]
    TokenNotEnough,
    #[error("Token amount is too large")]
    TokenOverflow,
    #[error("Node cannot be its own proxy")]
    OwnProxy,
    #[error("Proxy node not found")]
    ProxyNodeNotFound,
    #[error("Node is not a proxy node")]
    NotProxyNode,
    #[error("Only RP, IdP and AS nodes can be behind a proxy")]
    ProxyRoleNotAllowed,
    #[error("Node is already behind a proxy")]
    AlreadyBehindProxy,
    #[error("Node is not behind a proxy")]
    NotBehindProxy,
    #[error("Proxy association would create a cycle")]
    ProxyCycle,

    // -------------------------------------------------------------------------
    // Levels & modes
    // -------------------------------------------------------------------------
    #[error("Invalid IAL")]
    InvalidIal,
    #[error("Invalid AAL")]
    InvalidAal,
    #[error("Invalid mode")]
    InvalidMode,
    #[error("Please input mode list")]
    ModeListRequired,

    // -------------------------------------------------------------------------
    // Namespaces
    // -------------------------------------------------------------------------
    #[error("Please input namespace")]
    NamespaceRequired,
    #[error("Duplicate namespace")]
    DuplicateNamespace,
    #[error("Namespace not found")]
    NamespaceNotFound,
    #[error("Namespace is not active")]
    NamespaceNotActive,

    // -------------------------------------------------------------------------
    // Identities & accessors
    // -------------------------------------------------------------------------
    #[error("Please input reference group code")]
    ReferenceGroupCodeRequired,
    #[error("Please input at least one identity")]
    IdentityListRequired,
    #[error("Namespace in identity list are duplicated")]
    DuplicateNamespaceInIdentityList,
    #[error("Identity already existed")]
    IdentityAlreadyExisted,
    #[error("IdP is already associated with reference group")]
    IdpAlreadyAssociated,
    #[error("IdP is not associated with reference group")]
    IdpNotAssociated,
    #[error("IAL must be greater than or equal to allowed min IAL for register identity at first IdP")]
    IalBelowFirstIdpMinimum,
    #[error("IAL is greater than max IAL of IdP")]
    IalExceedsMax,
    #[error("AAL is greater than max AAL of IdP")]
    AalExceedsMax,
    #[error("Identifier count is greater than allowed identifier count")]
    IdentifierCountExceeded,
    #[error("Active identifier count is greater than allowed active identifier count")]
    ActiveIdentifierCountExceeded,
    #[error("Found reference group code and identity detail in parameter")]
    FoundCodeAndIdentity,
    #[error("Reference group not found")]
    ReferenceGroupNotFound,
    #[error("Please input accessor ID")]
    AccessorIdRequired,
    #[error("Duplicate accessor ID")]
    DuplicateAccessorId,
    #[error("Invalid accessor public key")]
    InvalidAccessorKey,
    #[error("Accessor ID not found")]
    AccessorNotFound,
    #[error("Not owner of accessor")]
    NotAccessorOwner,
    #[error("Accessor is not active")]
    AccessorNotActive,
    #[error("All accessors must be in the same reference group")]
    AccessorGroupMismatch,

    // -------------------------------------------------------------------------
    // Request gate
    // -------------------------------------------------------------------------
    #[error("Please input request ID")]
    RequestIdRequired,
    #[error("Request ID not found")]
    RequestNotFound,
    #[error("Request is not closed")]
    RequestNotClosed,
    #[error("Request purpose does not match")]
    PurposeMismatch,
    #[error("IdP has not accepted request")]
    IdpNotAccepted,

    // -------------------------------------------------------------------------
    // Request protocol
    // -------------------------------------------------------------------------
    #[error("Duplicate Request ID")]
    DuplicateRequestId,
    #[error("Mode is not allowed for this purpose")]
    ModeNotAllowed,
    #[error("Min IdP must not be negative")]
    NegativeMinIdp,
    #[error("Min IdP is greater than number of IdPs in list")]
    MinIdpExceedsList,
    #[error("Duplicate IdP ID in IdP list")]
    DuplicateIdpInList,
    #[error("Node ID in IdP list not found")]
    IdpInListNotFound,
    #[error("Node ID in IdP list is not an IdP")]
    IdpInListNotIdp,
    #[error("Node ID in IdP list is not active")]
    IdpInListNotActive,
    #[error("Duplicate Service ID in data request")]
    DuplicateServiceInDataRequest,
    #[error("Duplicate AS ID in data request")]
    DuplicateAsInDataRequest,
    #[error("Node ID in AS list not found")]
    AsInListNotFound,
    #[error("Node ID in AS list is not an AS")]
    AsInListNotAs,
    #[error("Node ID in AS list is not active")]
    AsInListNotActive,
    #[error("AS does not provide requested service")]
    AsNotProvidingService,
    #[error("Min AS must not be negative")]
    NegativeMinAs,
    #[error("Min AS is greater than number of AS in list")]
    MinAsExceedsList,
    #[error("Request is already closed")]
    RequestClosed,
    #[error("Request is already timed out")]
    RequestTimedOut,
    #[error("IdP is not in requested IdP list")]
    IdpNotInList,
    #[error("Duplicate Response")]
    DuplicateResponse,
    #[error("Invalid response status")]
    InvalidResponseStatus,
    #[error("Invalid error code")]
    InvalidErrorCode,
    #[error("IdP does not support request mode")]
    ModeNotSupported,
    #[error("Max IAL of IdP is less than min IAL of request")]
    MaxIalBelowRequest,
    #[error("Max AAL of IdP is less than min AAL of request")]
    MaxAalBelowRequest,
    #[error("Service ID not found in request")]
    ServiceNotInRequest,
    #[error("AS is not in requested AS list")]
    AsNotInList,
    #[error("Duplicate AS ID in response list")]
    DuplicateAsResponse,
    #[error("AS response not found")]
    AsResponseNotFound,
    #[error("Only requester can modify this request")]
    OnlyRequester,
    #[error("IdP in response valid list has not responded")]
    ResponseValidNotResponder,
    #[error("Can not set time out a closed request")]
    CannotTimeOutClosed,

    // -------------------------------------------------------------------------
    // Services & error codes
    // -------------------------------------------------------------------------
    #[error("Please input service ID")]
    ServiceIdRequired,
    #[error("Duplicate service ID")]
    DuplicateServiceId,
    #[error("Service ID not found")]
    ServiceNotFound,
    #[error("Service is not active")]
    ServiceNotActive,
    #[error("Node is not an AS")]
    NodeNotAs,
    #[error("Service destination is already approved")]
    DuplicateApproval,
    #[error("Service destination is not approved")]
    DestinationNotApproved,
    #[error("Duplicate service destination")]
    DuplicateDestination,
    #[error("Service destination not found")]
    DestinationNotFound,
    #[error("Service destination is not active")]
    DestinationNotActive,
    #[error("ErrorCode is already in the database")]
    DuplicateErrorCode,
    #[error("ErrorCode not exists")]
    ErrorCodeNotExists,
    #[error("Invalid error code type")]
    InvalidErrorCodeType,

    // -------------------------------------------------------------------------
    // Chain
    // -------------------------------------------------------------------------
    #[error("Block height must be greater than or equal to -1")]
    InvalidBlockHeight,

    // -------------------------------------------------------------------------
    // Fatal
    // -------------------------------------------------------------------------
    /// The entity graph contradicts itself. Replicas must stop.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// The store failed. Replicas must stop.
    #[error("Store error: {0}")]
    Store(String),
}

impl LedgerError {
    /// Whether the error must halt the replica instead of becoming a log.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LedgerError::Invariant(_) | LedgerError::Store(_))
    }
}
