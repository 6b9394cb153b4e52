//! Store inventory engine: a single in-memory aggregate driving the
//! RFID/NON_RFID replenishment loop for a retail location network.
//!
//! # Module structure
//!
//! ```text
//! engine/src/
//! ├── clock, presence, ledger, snapshot   # state primitives
//! ├── catalog, locations, antennas,       # master data stores
//! │   epc_mappings, staff
//! ├── rules, planner                      # rule projection and replenishment planning
//! ├── tasks, receiving, transfer, cart,   # command-level orchestration
//! │   sales
//! ├── state, engine                       # aggregate + command gateway facade
//! ├── read_models                         # defensive-copy projections
//! ├── config, logging                     # ambient configuration/observability
//! └── http                                 # axum HTTP gateway
//! ```

pub mod antennas;
pub mod cart;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod epc_mappings;
pub mod http;
pub mod ledger;
pub mod locations;
pub mod logging;
pub mod planner;
pub mod presence;
pub mod read_models;
pub mod receiving;
pub mod recompute;
pub mod rules;
pub mod sales;
pub mod snapshot;
pub mod staff;
pub mod state;
pub mod tasks;
pub mod transfer;

mod engine;

pub use config::Config;
pub use engine::Engine;
