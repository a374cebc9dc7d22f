//! # Determinism
//!
//! Replicas fed the same blocks must agree on every root, and a rejected
//! transaction must leave no trace in the state a root commits to.

#[cfg(test)]
mod tests {
    use crate::fixtures::{identifier_hash, identity_network, Actor, TestNetwork};
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use shared_crypto::KeyPair;
    use std::collections::HashMap;

    /// Same NDID, IdP and RP keys on every call.
    fn replica() -> (TestNetwork, Actor, Actor) {
        let mut net = TestNetwork::with_ndid(Actor::seeded("ndid1", 1));
        let idp = Actor::seeded("idp1", 2);
        let rp = Actor::seeded("rp1", 3);
        net.add_namespace("cid");
        net.register(&idp, "IdP");
        net.register(&rp, "RP");
        (net, idp, rp)
    }

    /// `RegisterIdentity` params with a seeded accessor key.
    fn seeded_identity(code: &str, user: &str, seed: u8) -> Value {
        let accessor = KeyPair::ed25519_from_seed([seed; 32]);
        json!({
            "reference_group_code": code,
            "new_identity_list": [{"namespace": "cid", "identifier_hash": identifier_hash(user)}],
            "ial": 2.3,
            "mode_list": [2, 3],
            "accessor_id": format!("acc-{seed}"),
            "accessor_public_key": accessor.public_key_pem().unwrap(),
        })
    }

    #[test]
    fn test_rejections_leave_root_unchanged() {
        let (mut noisy, idp, rp) = replica();
        let (mut clean, idp_b, _) = replica();

        let result = noisy.block(vec![
            idp.tx("RegisterIdentity", seeded_identity("g1", "alice", 10)),
            b"\x01not an envelope".to_vec(),
            rp.tx("AddService", json!({"service_id": "s1"})),
            idp.tx("RegisterIdentity", seeded_identity("g2", "alice", 11)),
            rp.tx_with(&idp.key, "SetMqAddresses", &json!({"addresses": [{"ip": "10.0.0.1", "port": 1}]})),
        ]);
        clean.block(vec![idp_b.tx("RegisterIdentity", seeded_identity("g1", "alice", 10))]);

        let codes: Vec<u32> = result.outcomes.iter().map(|o| o.code).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 2]);
        assert_eq!(noisy.state_root(), clean.state_root());
    }

    #[test]
    fn test_identical_blocks_give_identical_roots() {
        let (mut a, idp_a, rp_a) = replica();
        let (mut b, idp_b, rp_b) = replica();
        assert_eq!(a.state_root(), b.state_root());

        let blocks = |idp: &Actor, rp: &Actor| {
            vec![
                vec![idp.tx("RegisterIdentity", seeded_identity("g1", "alice", 20))],
                vec![
                    rp.tx(
                        "CreateRequest",
                        json!({"request_id": "r1", "min_idp": 1, "min_ial": 1.1, "min_aal": 1, "idp_id_list": ["idp1"], "mode": 2}),
                    ),
                    idp.tx(
                        "CreateIdpResponse",
                        json!({"request_id": "r1", "ial": 2.3, "aal": 3, "status": "accept", "signature": "s"}),
                    ),
                ],
                Vec::new(),
                vec![rp.tx("CloseRequest", json!({"request_id": "r1"}))],
            ]
        };

        let mut previous = a.state_root();
        for (block_a, block_b) in blocks(&idp_a, &rp_a).into_iter().zip(blocks(&idp_b, &rp_b)) {
            let ra = a.block(block_a);
            let rb = b.block(block_b);
            assert!(ra.all_ok());
            assert_eq!(ra.height, rb.height);
            assert_eq!(ra.state_root, rb.state_root);
            assert_ne!(ra.state_root, previous);
            previous = ra.state_root;
        }
    }

    #[test]
    fn test_block_order_matters() {
        let (mut a, idp_a, _) = replica();
        let (mut b, idp_b, _) = replica();

        let first = a.block(vec![
            idp_a.tx("RegisterIdentity", seeded_identity("g1", "alice", 30)),
            idp_a.tx("RegisterIdentity", seeded_identity("g2", "alice", 31)),
        ]);
        let second = b.block(vec![
            idp_b.tx("RegisterIdentity", seeded_identity("g2", "alice", 31)),
            idp_b.tx("RegisterIdentity", seeded_identity("g1", "alice", 30)),
        ]);

        assert_eq!(first.outcomes[1].log, "Identity already existed");
        assert_eq!(second.outcomes[1].log, "Identity already existed");
        assert_ne!(first.state_root, second.state_root);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// However IdPs race to register, an identity ends up in at most
        /// one reference group.
        #[test]
        fn prop_identity_bound_to_one_group(
            attempts in proptest::collection::vec((0usize..2, 0usize..3, 0usize..3), 1..10),
        ) {
            let (mut net, p) = identity_network();
            let idps = [&p.idp1, &p.idp2];

            let txs: Vec<Vec<u8>> = attempts
                .iter()
                .enumerate()
                .map(|(n, (idp, user, code))| {
                    let mut params = crate::fixtures::register_identity(
                        &format!("group-{code}"),
                        &format!("user-{user}"),
                        &format!("acc-{n}"),
                    );
                    params["ial"] = json!(2.3);
                    idps[*idp].tx("RegisterIdentity", params)
                })
                .collect();
            let result = net.block(txs);

            let mut bound: HashMap<usize, usize> = HashMap::new();
            for ((_, user, code), outcome) in attempts.iter().zip(&result.outcomes) {
                if outcome.is_ok() {
                    prop_assert!(bound.insert(*user, *code).is_none(), "user-{} bound twice", user);
                }
            }
            for user in 0..3 {
                let (log, found) = net.query(
                    "GetReferenceGroupCode",
                    json!({"identity_namespace": "cid", "identity_identifier_hash": identifier_hash(&format!("user-{user}"))}),
                );
                match bound.get(&user) {
                    Some(code) => prop_assert_eq!(&found["reference_group_code"], &json!(format!("group-{code}"))),
                    None => prop_assert_eq!(log, "not found"),
                }
            }
        }
    }
}
