//! # Test Fixtures
//!
//! [`Actor`] holds a node's keys and signs envelopes; [`TestNetwork`] is a
//! single in-memory ledger driven block by block, bootstrapped with an NDID
//! node.

use node_runtime::{BlockDriver, BlockResult, LedgerContainer, NodeConfig};
use serde_json::{json, Value};
use shared_crypto::{sha256, Hash, KeyPair, SigningAlgorithm};
use shared_types::{QueryRequest, SignedTransaction, TxOutcome};
use std::sync::atomic::{AtomicU64, Ordering};

/// Hex SHA-256 of a plaintext identifier.
pub fn identifier_hash(identifier: &str) -> String {
    hex::encode(sha256(identifier.as_bytes()))
}

/// A fresh accessor public key.
pub fn accessor_key() -> String {
    KeyPair::generate_ed25519().public_key_pem().unwrap()
}

/// A network participant with signing and master keys.
pub struct Actor {
    pub id: String,
    pub key: KeyPair,
    pub master: KeyPair,
    nonce: AtomicU64,
}

impl Actor {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            key: KeyPair::generate_ed25519(),
            master: KeyPair::generate_ed25519(),
            nonce: AtomicU64::new(0),
        }
    }

    /// Deterministic keys, for comparing independent ledgers.
    pub fn seeded(id: &str, seed: u8) -> Self {
        Self {
            id: id.to_string(),
            key: KeyPair::ed25519_from_seed([seed; 32]),
            master: KeyPair::ed25519_from_seed([seed.wrapping_add(128); 32]),
            nonce: AtomicU64::new(0),
        }
    }

    /// Envelope for `method` signed with `key`, under this actor's node id.
    pub fn tx_with(&self, key: &KeyPair, method: &str, params: &Value) -> Vec<u8> {
        let nonce = (self.nonce.fetch_add(1, Ordering::Relaxed) + 1).to_be_bytes();
        let params = params.to_string();
        let payload = SignedTransaction::payload(method, &params, &nonce);
        let signature = key.sign(SigningAlgorithm::Ed25519, &payload).unwrap();
        SignedTransaction::new(method, params, &nonce, &signature, self.id.as_str()).encode()
    }

    /// Envelope signed with the actor's signing key.
    pub fn tx(&self, method: &str, params: Value) -> Vec<u8> {
        self.tx_with(&self.key, method, &params)
    }

    /// Key fields shared by `InitNDID` and `RegisterNode`.
    fn key_params(&self) -> Value {
        json!({
            "node_id": self.id,
            "node_name": format!("{} node", self.id),
            "public_key": self.key.public_key_pem().unwrap(),
            "signing_algorithm": "Ed25519",
            "master_public_key": self.master.public_key_pem().unwrap(),
            "master_signing_algorithm": "Ed25519",
        })
    }

    pub fn init_ndid(&self) -> Vec<u8> {
        self.tx("InitNDID", self.key_params())
    }

    /// `RegisterNode` params for this actor with `role`; IdPs get full
    /// ceilings and every mode.
    pub fn registration(&self, role: &str) -> Value {
        let mut params = self.key_params();
        params["role"] = json!(role);
        if role == "IdP" {
            params["max_ial"] = json!(3);
            params["max_aal"] = json!(3);
            params["supported_request_mode_list"] = json!([1, 2, 3]);
        }
        params
    }
}

/// One in-memory ledger plus its NDID.
pub struct TestNetwork {
    pub driver: BlockDriver,
    pub ndid: Actor,
}

impl TestNetwork {
    /// Fresh ledger with a random NDID.
    pub fn new() -> Self {
        Self::with_ndid(Actor::new("ndid1"))
    }

    /// Fresh ledger bootstrapped by `ndid`.
    pub fn with_ndid(ndid: Actor) -> Self {
        let container = LedgerContainer::open(NodeConfig::default()).unwrap();
        let mut network = Self {
            driver: BlockDriver::new(container.app()),
            ndid,
        };
        let init = network.ndid.init_ndid();
        network.expect_ok(init);
        network
    }

    /// Deliver `txs` as one block.
    pub fn block(&mut self, txs: Vec<Vec<u8>>) -> BlockResult {
        self.driver.deliver_block(&txs)
    }

    /// Deliver a single-transaction block.
    pub fn submit(&mut self, tx: Vec<u8>) -> TxOutcome {
        let mut result = self.block(vec![tx]);
        result.outcomes.remove(0)
    }

    /// Submit and require acceptance.
    pub fn expect_ok(&mut self, tx: Vec<u8>) {
        let outcome = self.submit(tx);
        assert!(outcome.is_ok(), "unexpected rejection: {}", outcome.log);
    }

    /// Submit and return the rejection log.
    pub fn expect_rejected(&mut self, tx: Vec<u8>) -> String {
        let outcome = self.submit(tx);
        assert!(!outcome.is_ok(), "transaction unexpectedly accepted");
        outcome.log
    }

    /// NDID signs `method`.
    pub fn ndid_tx(&self, method: &str, params: Value) -> Vec<u8> {
        self.ndid.tx(method, params)
    }

    /// Register `actor` under `role` through the NDID.
    pub fn register(&mut self, actor: &Actor, role: &str) {
        let tx = self.ndid_tx("RegisterNode", actor.registration(role));
        self.expect_ok(tx);
    }

    pub fn add_namespace(&mut self, namespace: &str) {
        let tx = self.ndid_tx("AddNamespace", json!({"namespace": namespace}));
        self.expect_ok(tx);
    }

    /// Run a query, returning its log and decoded value.
    pub fn query(&self, method: &str, params: Value) -> (String, Value) {
        let outcome = self.driver.query(&QueryRequest {
            method: method.to_string(),
            params: params.to_string(),
        });
        let value = serde_json::from_str(&outcome.value).unwrap_or(Value::Null);
        (outcome.log, value)
    }

    pub fn state_root(&self) -> Hash {
        let (_, info) = self.query("GetChainInfo", json!({}));
        let bytes = hex::decode(info["state_root"].as_str().unwrap()).unwrap();
        bytes.try_into().unwrap()
    }
}

/// Participants of the identity scenarios.
pub struct Participants {
    pub idp1: Actor,
    pub idp2: Actor,
    pub rp1: Actor,
}

/// Network with namespace `cid`, two IdPs and one RP.
pub fn identity_network() -> (TestNetwork, Participants) {
    let mut net = TestNetwork::new();
    let parts = Participants {
        idp1: Actor::new("idp1"),
        idp2: Actor::new("idp2"),
        rp1: Actor::new("rp1"),
    };
    net.add_namespace("cid");
    net.register(&parts.idp1, "IdP");
    net.register(&parts.idp2, "IdP");
    net.register(&parts.rp1, "RP");
    (net, parts)
}

/// `RegisterIdentity` params binding `{cid, H(user)}` under `code`.
pub fn register_identity(code: &str, user: &str, accessor_id: &str) -> Value {
    json!({
        "reference_group_code": code,
        "new_identity_list": [{"namespace": "cid", "identifier_hash": identifier_hash(user)}],
        "ial": 3,
        "mode_list": [2],
        "accessor_id": accessor_id,
        "accessor_public_key": accessor_key(),
        "accessor_type": "Ed25519",
    })
}

/// Open a request from `rp` to `idp`, optionally answer it and close it.
pub fn consent_request(
    net: &mut TestNetwork,
    rp: &Actor,
    idp: &Actor,
    request_id: &str,
    purpose: &str,
    status: Option<&str>,
    close: bool,
) {
    net.expect_ok(rp.tx(
        "CreateRequest",
        json!({
            "request_id": request_id,
            "min_idp": 1,
            "min_ial": 1.1,
            "min_aal": 1,
            "request_timeout": 0,
            "idp_id_list": [idp.id],
            "mode": 2,
            "purpose": purpose,
        }),
    ));
    if let Some(status) = status {
        net.expect_ok(idp.tx(
            "CreateIdpResponse",
            json!({
                "request_id": request_id,
                "ial": 3,
                "aal": 3,
                "status": status,
                "signature": "signed-by-idp",
            }),
        ));
    }
    if close {
        net.expect_ok(rp.tx("CloseRequest", json!({"request_id": request_id})));
    }
}
