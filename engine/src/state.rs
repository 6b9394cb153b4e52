//! The engine's full in-memory state: every store a command or a read
//! model might touch, behind one aggregate so `Engine` can guard it with a
//! single mutex.

use crate::antennas::AntennaStore;
use crate::cart::{BasketStore, PendingPickStore};
use crate::catalog::CatalogStore;
use crate::clock::Clock;
use crate::epc_mappings::EpcMappingStore;
use crate::ledger::Ledger;
use crate::locations::{LocationStore, SkuStore};
use crate::presence::{DedupWindow, PresenceStore};
use crate::receiving::ReceivingOrderStore;
use crate::rules::{RuleRegistry, TemplateStore};
use crate::snapshot::SnapshotStore;
use crate::staff::StaffStore;
use crate::tasks::TaskStore;
use shared::inventory::FlowEvent;
use shared::models::AuditEntry;

#[derive(Default)]
pub struct EngineState {
    pub clock: Clock,
    pub locations: LocationStore,
    pub antennas: AntennaStore,
    pub skus: SkuStore,
    pub catalog: CatalogStore,
    pub epc_mappings: EpcMappingStore,
    pub presence: PresenceStore,
    pub dedup: DedupWindow,
    pub ledger: Ledger,
    pub snapshots: SnapshotStore,
    pub templates: TemplateStore,
    pub rules: RuleRegistry,
    pub tasks: TaskStore,
    pub receiving_orders: ReceivingOrderStore,
    pub baskets: BasketStore,
    pub pending_picks: PendingPickStore,
    pub staff: StaffStore,
    pub audit_log: Vec<AuditEntry>,
    pub flow_timeline: Vec<FlowEvent>,
    presence_ttl_ms: i64,
}

impl EngineState {
    pub fn new() -> Self {
        Self::with_config(
            crate::presence::DEFAULT_DEDUP_WINDOW_MS,
            crate::presence::DEFAULT_PRESENCE_TTL_MS,
        )
    }

    /// Build state with the dedup window and presence TTL overridden from
    /// configuration rather than the built-in defaults.
    pub fn with_config(dedup_window_ms: i64, presence_ttl_ms: i64) -> Self {
        Self {
            dedup: DedupWindow::new(dedup_window_ms),
            presence_ttl_ms,
            ..Default::default()
        }
    }

    pub fn presence_ttl_ms(&self) -> i64 {
        self.presence_ttl_ms
    }

    pub fn record_audit(&mut self, entry: AuditEntry) {
        self.audit_log.push(entry);
    }

    pub fn record_flow(&mut self, event: FlowEvent) {
        self.flow_timeline.push(event);
    }
}
