//! # Identity-Ledger Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | apply | signed transactions through admit, authorize and execute |
//! | validate | mempool-style checks against committed state |
//! | query | committed-state reads |
//! | commit | state-root hashing and the batch write of a block |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use il_01_entity_store::{InMemoryKVStore, StateDb, StateWriter};
use il_08_transaction_dispatcher::{ApplicationCallbacks, DispatcherConfig, IdentityApp};
use serde_json::{json, Value};
use shared_crypto::{KeyPair, SigningAlgorithm};
use shared_types::{QueryRequest, SignedTransaction};
use std::time::Duration;

// ============================================================================
// SETUP
// ============================================================================

struct Signer {
    id: String,
    key: KeyPair,
    master: KeyPair,
    nonce: u64,
}

impl Signer {
    fn new(id: &str, seed: u8) -> Self {
        Self {
            id: id.to_string(),
            key: KeyPair::ed25519_from_seed([seed; 32]),
            master: KeyPair::ed25519_from_seed([seed.wrapping_add(128); 32]),
            nonce: 0,
        }
    }

    fn tx(&mut self, method: &str, params: &Value) -> Vec<u8> {
        self.nonce += 1;
        let nonce = self.nonce.to_be_bytes();
        let params = params.to_string();
        let payload = SignedTransaction::payload(method, &params, &nonce);
        let signature = self
            .key
            .sign(SigningAlgorithm::Ed25519, &payload)
            .expect("ed25519 signing");
        SignedTransaction::new(method, params, &nonce, &signature, self.id.as_str()).encode()
    }

    fn keys(&self, role: Option<&str>) -> Value {
        let mut params = json!({
            "node_id": self.id,
            "public_key": self.key.public_key_pem().expect("pem"),
            "signing_algorithm": "Ed25519",
            "master_public_key": self.master.public_key_pem().expect("pem"),
            "master_signing_algorithm": "Ed25519",
        });
        if let Some(role) = role {
            params["role"] = json!(role);
        }
        params
    }
}

/// Ledger at height 1 with an NDID and one RP.
fn bootstrap() -> (IdentityApp, Signer, Signer) {
    let mut app = IdentityApp::new(Box::new(InMemoryKVStore::new()), DispatcherConfig::default())
        .expect("in-memory ledger");
    let mut ndid = Signer::new("ndid1", 1);
    let rp = Signer::new("rp1", 2);

    app.begin_block(1);
    let init = ndid.tx("InitNDID", &ndid.keys(None));
    assert!(app.apply(&init).is_ok());
    let register = ndid.tx("RegisterNode", &rp.keys(Some("RP")));
    assert!(app.apply(&register).is_ok());
    app.commit();
    (app, ndid, rp)
}

// ============================================================================
// APPLY
// ============================================================================

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    group.measurement_time(Duration::from_secs(10));

    for size in [10usize, 100, 500] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("add_service_block", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let (app, mut ndid, _) = bootstrap();
                    let txs: Vec<Vec<u8>> = (0..size)
                        .map(|i| {
                            ndid.tx(
                                "AddService",
                                &json!({"service_id": format!("svc-{i}"), "service_name": "bench"}),
                            )
                        })
                        .collect();
                    (app, txs)
                },
                |(mut app, txs)| {
                    app.begin_block(2);
                    for raw in &txs {
                        black_box(app.apply(raw));
                    }
                    black_box(app.commit())
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// VALIDATE
// ============================================================================

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let (app, _, mut rp) = bootstrap();
    let raw = rp.tx(
        "SetMqAddresses",
        &json!({"addresses": [{"ip": "10.0.0.2", "port": 8000}]}),
    );

    group.bench_function("fresh_key_lookup", |b| b.iter(|| black_box(app.validate(&raw))));
    group.bench_function("malformed_envelope", |b| {
        b.iter(|| black_box(app.validate(b"\x00\x01\x02")))
    });
    group.finish();
}

// ============================================================================
// QUERY
// ============================================================================

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let (mut app, mut ndid, _) = bootstrap();
    app.begin_block(2);
    for i in 0..200 {
        let raw = ndid.tx("AddService", &json!({"service_id": format!("svc-{i}"), "service_name": "bench"}));
        app.apply(&raw);
    }
    app.commit();

    let node_info = QueryRequest {
        method: "GetNodeInfo".into(),
        params: json!({"node_id": "rp1"}).to_string(),
    };
    let service_list = QueryRequest {
        method: "GetServiceList".into(),
        params: String::new(),
    };

    group.bench_function("get_node_info", |b| b.iter(|| black_box(app.query(&node_info))));
    group.throughput(Throughput::Elements(200));
    group.bench_function("get_service_list_200", |b| {
        b.iter(|| black_box(app.query(&service_list)))
    });
    group.finish();
}

// ============================================================================
// COMMIT
// ============================================================================

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit");

    for writes in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(writes as u64));
        group.bench_with_input(BenchmarkId::new("pending_writes", writes), &writes, |b, &writes| {
            b.iter_batched(
                || {
                    let mut db = StateDb::open(Box::new(InMemoryKVStore::new())).expect("open");
                    db.begin_block(1);
                    let mut tx = db.begin_tx();
                    for i in 0..writes {
                        tx.put_raw(format!("bench:{i:08}").into_bytes(), vec![0xAB; 64]);
                    }
                    let overlay = tx.into_writes();
                    db.merge(overlay);
                    db
                },
                |mut db| black_box(db.commit().expect("commit")),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply, bench_validate, bench_query, bench_commit);
criterion_main!(benches);
