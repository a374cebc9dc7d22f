//! # Identity-Ledger Test Suite
//!
//! End-to-end tests that drive the ledger through the same host wiring the
//! node binary uses: signed envelopes in, outcomes and query results out.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs          # signing actors, single-process network
//! └── integration/
//!     ├── scenarios.rs     # registration, requests, accessor revocation
//!     ├── gating.rs        # request-gated identity mutations
//!     ├── registry.rs      # proxies, governance, services
//!     └── determinism.rs   # rejection atomicity, replica agreement
//! tests/benches/           # apply and query throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p il-tests
//! cargo test -p il-tests integration::gating
//! cargo bench -p il-tests
//! ```

#[cfg(test)]
mod fixtures;

pub mod integration;
