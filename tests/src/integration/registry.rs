//! # Registry Behaviour
//!
//! Proxy key indirection, idempotent rejection of duplicates, purpose mode
//! governance and the lifecycle of a service destination.

#[cfg(test)]
mod tests {
    use crate::fixtures::{identity_network, Actor, TestNetwork};
    use proptest::prelude::*;
    use serde_json::json;

    fn mq(ip: &str) -> serde_json::Value {
        json!({"addresses": [{"ip": ip, "port": 8000}]})
    }

    // =========================================================================
    // PROXIES
    // =========================================================================

    /// NDID, one proxy and one RP behind it with keys on the proxy.
    fn proxied_network() -> (TestNetwork, Actor, Actor) {
        let mut net = TestNetwork::new();
        let proxy = Actor::new("proxy1");
        let rp = Actor::new("rp1");
        net.register(&proxy, "Proxy");
        net.register(&rp, "RP");
        net.expect_ok(net.ndid_tx(
            "AddNodeToProxyNode",
            json!({"node_id": "rp1", "proxy_node_id": "proxy1", "config": "KEY_ON_PROXY"}),
        ));
        (net, proxy, rp)
    }

    #[test]
    fn test_key_on_proxy_signs_for_node() {
        let (mut net, proxy, rp) = proxied_network();

        let via_proxy = rp.tx_with(&proxy.key, "SetMqAddresses", &mq("10.0.0.9"));
        net.expect_ok(via_proxy);
        let log = net.expect_rejected(rp.tx("SetMqAddresses", mq("10.0.0.8")));
        assert_eq!(log, "Invalid signature");

        let (_, info) = net.query("GetNodeInfo", json!({"node_id": "rp1"}));
        assert_eq!(info["proxy"]["node_id"], "proxy1");
        assert_eq!(info["proxy"]["config"], "KEY_ON_PROXY");

        let (_, behind) = net.query("GetNodesBehindProxyNode", json!({"proxy_node_id": "proxy1"}));
        assert_eq!(behind["nodes"][0]["node_id"], "rp1");
    }

    #[test]
    fn test_proxy_sets_addresses_of_its_nodes_only() {
        let (mut net, proxy, _) = proxied_network();
        let stranger = Actor::new("rp2");
        net.register(&stranger, "RP");

        let mut params = mq("10.0.1.1");
        params["node_id"] = json!("rp1");
        net.expect_ok(proxy.tx("SetMqAddresses", params));

        let mut params = mq("10.0.1.2");
        params["node_id"] = json!("rp2");
        let log = net.expect_rejected(proxy.tx("SetMqAddresses", params));
        assert_eq!(log, "Node is not behind a proxy");
    }

    #[test]
    fn test_removed_node_signs_with_own_key_again() {
        let (mut net, proxy, rp) = proxied_network();
        net.expect_ok(net.ndid_tx("RemoveNodeFromProxyNode", json!({"node_id": "rp1"})));

        net.expect_ok(rp.tx("SetMqAddresses", mq("10.0.0.7")));
        let log = net.expect_rejected(rp.tx_with(&proxy.key, "SetMqAddresses", &mq("10.0.0.6")));
        assert_eq!(log, "Invalid signature");

        let (log, _) = net.query("GetNodesBehindProxyNode", json!({"proxy_node_id": "proxy1"}));
        assert_eq!(log, "not found");
    }

    #[test]
    fn test_proxy_chains_are_refused() {
        let (mut net, _, _) = proxied_network();
        let second = Actor::new("proxy2");
        net.register(&second, "Proxy");
        let log = net.expect_rejected(net.ndid_tx(
            "AddNodeToProxyNode",
            json!({"node_id": "proxy2", "proxy_node_id": "proxy1", "config": "KEY_ON_NODE"}),
        ));
        assert_eq!(log, "Only RP, IdP and AS nodes can be behind a proxy");
    }

    // =========================================================================
    // IDEMPOTENT REJECTION
    // =========================================================================

    #[test]
    fn test_duplicate_registration_rejected_without_effect() {
        let replica = || {
            let mut net = TestNetwork::with_ndid(Actor::seeded("ndid1", 1));
            let rp = Actor::seeded("rp1", 2);
            net.register(&rp, "RP");
            (net, rp)
        };
        let (mut retried, rp) = replica();
        let (mut idle, _) = replica();

        let result = retried.block(vec![
            retried.ndid_tx("RegisterNode", rp.registration("RP")),
            retried.ndid_tx("RegisterNode", rp.registration("RP")),
        ]);
        idle.block(Vec::new());

        assert_eq!(result.outcomes[0].log, "Duplicate Node ID");
        assert_eq!(result.outcomes[0], result.outcomes[1]);
        assert_eq!(retried.state_root(), idle.state_root());
        let (_, ids) = retried.query("GetNodeIDList", json!({"role": "RP"}));
        assert_eq!(ids["node_id_list"], json!(["rp1"]));
    }

    #[test]
    fn test_duplicate_request_id_rejected_without_effect() {
        let (mut net, p) = identity_network();
        let create = json!({
            "request_id": "req-dup",
            "min_idp": 1,
            "min_ial": 1.1,
            "min_aal": 1,
            "idp_id_list": ["idp1"],
            "mode": 1,
        });
        net.expect_ok(p.rp1.tx("CreateRequest", create.clone()));
        let (_, before) = net.query("GetRequestDetail", json!({"request_id": "req-dup"}));

        let mut again = create.clone();
        again["mode"] = json!(3);
        let log = net.expect_rejected(p.rp1.tx("CreateRequest", again));
        assert_eq!(log, "Duplicate Request ID");
        let log = net.expect_rejected(p.idp1.tx("CreateRequest", create));
        assert_eq!(log, "Duplicate Request ID");

        let (_, after) = net.query("GetRequestDetail", json!({"request_id": "req-dup"}));
        assert_eq!(before, after);
        assert_eq!(after["mode"], 1);
    }

    // =========================================================================
    // MODE GOVERNANCE
    // =========================================================================

    #[test]
    fn test_unset_purpose_allows_every_mode() {
        let net = TestNetwork::new();
        let (log, modes) = net.query("GetAllowedModeList", json!({"purpose": "RegisterIdentity"}));
        assert_eq!(log, "success");
        assert_eq!(modes["allowed_mode_list"], json!([1, 2, 3]));
    }

    #[test]
    fn test_invalid_mode_lists_refused() {
        let mut net = TestNetwork::new();
        let log = net.expect_rejected(net.ndid_tx(
            "SetAllowedModeList",
            json!({"purpose": "", "allowed_mode_list": []}),
        ));
        assert_eq!(log, "Please input mode list");
        let log = net.expect_rejected(net.ndid_tx(
            "SetAllowedModeList",
            json!({"purpose": "", "allowed_mode_list": [2, 4]}),
        ));
        assert_eq!(log, "Invalid mode");
    }

    #[test]
    fn test_restricted_purpose_blocks_request_mode() {
        let (mut net, p) = identity_network();
        net.expect_ok(net.ndid_tx(
            "SetAllowedModeList",
            json!({"purpose": "AddAccessorMethod", "allowed_mode_list": [3]}),
        ));
        let request = |mode: u8| {
            json!({
                "request_id": format!("req-mode-{mode}"),
                "min_idp": 1,
                "min_ial": 1.1,
                "min_aal": 1,
                "idp_id_list": ["idp1"],
                "mode": mode,
                "purpose": "AddAccessorMethod",
            })
        };

        let log = net.expect_rejected(p.rp1.tx("CreateRequest", request(2)));
        assert_eq!(log, "Mode is not allowed for this purpose");
        net.expect_ok(p.rp1.tx("CreateRequest", request(3)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn prop_allowed_mode_list_reads_back(
            modes in proptest::sample::subsequence(vec![1u8, 2, 3], 1..=3),
            purpose in "[A-Za-z]{0,12}",
        ) {
            let mut net = TestNetwork::new();
            net.expect_ok(net.ndid_tx(
                "SetAllowedModeList",
                json!({"purpose": purpose, "allowed_mode_list": modes}),
            ));
            let (_, stored) = net.query("GetAllowedModeList", json!({"purpose": purpose}));
            prop_assert_eq!(&stored["allowed_mode_list"], &json!(modes));

            let other = format!("{purpose}-other");
            let (_, untouched) = net.query("GetAllowedModeList", json!({"purpose": other}));
            prop_assert_eq!(&untouched["allowed_mode_list"], &json!([1, 2, 3]));
        }
    }

    // =========================================================================
    // SERVICE DESTINATIONS
    // =========================================================================

    /// NDID plus an AS offering `bank_statement` over namespace `cid`.
    fn service_network() -> (TestNetwork, Actor) {
        let mut net = TestNetwork::new();
        net.add_namespace("cid");
        let as1 = Actor::new("as1");
        net.register(&as1, "AS");
        net.expect_ok(net.ndid_tx(
            "AddService",
            json!({"service_id": "bank_statement", "service_name": "Bank statement"}),
        ));
        net.expect_ok(net.ndid_tx(
            "RegisterServiceDestinationByNDID",
            json!({"service_id": "bank_statement", "node_id": "as1"}),
        ));
        net.expect_ok(as1.tx(
            "RegisterServiceDestination",
            json!({"service_id": "bank_statement", "min_ial": 2.3, "min_aal": 3, "supported_namespace_list": ["cid"]}),
        ));
        (net, as1)
    }

    fn offered(net: &TestNetwork) -> Vec<String> {
        let (_, nodes) = net.query("GetAsNodesByServiceId", json!({"service_id": "bank_statement"}));
        nodes["node"]
            .as_array()
            .map(|list| {
                list.iter()
                    .map(|n| n["node_id"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_destination_disable_and_enable_by_as() {
        let (mut net, as1) = service_network();
        assert_eq!(offered(&net), vec!["as1"]);

        net.expect_ok(as1.tx("DisableServiceDestination", json!({"service_id": "bank_statement"})));
        let (log, nodes) = net.query("GetAsNodesByServiceId", json!({"service_id": "bank_statement"}));
        assert_eq!(log, "not found");
        assert_eq!(nodes, json!({"node": []}));

        // Still listed for the AS itself, marked inactive.
        let (_, services) = net.query("GetServicesByAsID", json!({"as_id": "as1"}));
        assert_eq!(services["services"][0]["active"], false);

        net.expect_ok(as1.tx("EnableServiceDestination", json!({"service_id": "bank_statement"})));
        assert_eq!(offered(&net), vec!["as1"]);
    }

    #[test]
    fn test_ndid_suspension_outranks_as() {
        let (mut net, as1) = service_network();
        let approval = json!({"service_id": "bank_statement", "node_id": "as1"});
        net.expect_ok(net.ndid_tx("DisableServiceDestinationByNDID", approval.clone()));
        assert!(offered(&net).is_empty());

        net.expect_ok(as1.tx("EnableServiceDestination", json!({"service_id": "bank_statement"})));
        assert!(offered(&net).is_empty());
        let (_, services) = net.query("GetServicesByAsID", json!({"as_id": "as1"}));
        assert_eq!(services["services"][0]["suspended"], true);

        net.expect_ok(net.ndid_tx("EnableServiceDestinationByNDID", approval));
        assert_eq!(offered(&net), vec!["as1"]);
    }

    #[test]
    fn test_disabled_service_or_node_hides_destination() {
        let (mut net, _) = service_network();
        net.expect_ok(net.ndid_tx("DisableService", json!({"service_id": "bank_statement"})));
        assert!(offered(&net).is_empty());
        net.expect_ok(net.ndid_tx("EnableService", json!({"service_id": "bank_statement"})));
        assert_eq!(offered(&net), vec!["as1"]);

        net.expect_ok(net.ndid_tx("DisableNode", json!({"node_id": "as1"})));
        assert!(offered(&net).is_empty());
    }

    #[test]
    fn test_approvals_split_differently_across_colon_stay_distinct() {
        let mut net = TestNetwork::new();
        let as_a = Actor::new("x:as1");
        let as_b = Actor::new("as1");
        net.register(&as_a, "AS");
        net.register(&as_b, "AS");
        for service_id in ["svc", "svc:x"] {
            net.expect_ok(net.ndid_tx(
                "AddService",
                json!({"service_id": service_id, "service_name": service_id}),
            ));
        }

        net.expect_ok(net.ndid_tx(
            "RegisterServiceDestinationByNDID",
            json!({"service_id": "svc", "node_id": "x:as1"}),
        ));
        net.expect_ok(net.ndid_tx(
            "RegisterServiceDestinationByNDID",
            json!({"service_id": "svc:x", "node_id": "as1"}),
        ));

        net.expect_ok(as_b.tx(
            "RegisterServiceDestination",
            json!({"service_id": "svc:x", "min_ial": 1.1, "min_aal": 1}),
        ));
        let (log, _) = net.query("GetAsNodesByServiceId", json!({"service_id": "svc"}));
        assert_eq!(log, "not found");
        let (_, services) = net.query("GetServicesByAsID", json!({"as_id": "x:as1"}));
        assert!(services["services"].as_array().map_or(true, |s| s.is_empty()));
    }

    #[test]
    fn test_unapproved_as_cannot_offer() {
        let (mut net, _) = service_network();
        let as2 = Actor::new("as2");
        net.register(&as2, "AS");
        let log = net.expect_rejected(as2.tx(
            "RegisterServiceDestination",
            json!({"service_id": "bank_statement", "min_ial": 1.1, "min_aal": 1}),
        ));
        assert_eq!(log, "Service destination is not approved");
    }
}
