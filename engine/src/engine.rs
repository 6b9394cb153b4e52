//! The command gateway: one `Engine` facade wrapping a single mutex-guarded
//! [`EngineState`]. Every external command becomes one method here; each
//! returns its own typed status rather than a thrown error, so a caller's
//! match statement is exhaustive over every real outcome.

use crate::ledger::LedgerEntryKind;
use crate::recompute::{recompute_location, staff_reconcile};
use crate::state::EngineState;
use crate::transfer;
use parking_lot::{Mutex, MutexGuard};
use shared::inventory::{
    AddCustomerItemStatus, AssignTaskStatus, CheckoutCustomerStatus, ConfirmReceivingOrderStatus,
    ConfirmTaskStatus, CreateReceivingOrderStatus, DeleteRuleTemplateStatus, FlowEvent,
    ForceZoneSweepStatus, IngestRfidReadStatus, IngestSalesEventStatus, MasterDataStatus,
    RemoveCustomerItemStatus, StaffCrudStatus, StartTaskStatus, UpsertRuleTemplateStatus,
    ZoneCrudStatus,
};
use shared::models::{
    Antenna, AuditEntry, CatalogVariant, Location, LocationCreate, LocationUpdate, RuleTemplate,
    RuleTemplateUpsert, Selector, Sku, StaffMember, StaffUpdate, TaskAction, TaskStatus,
    TemplateScope,
};
use shared::util;

pub struct Engine {
    state: Mutex<EngineState>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EngineState::new()),
        }
    }

    /// Build an engine whose dedup window and presence TTL come from
    /// configuration rather than the built-in defaults.
    pub fn with_config(config: &crate::config::Config) -> Self {
        Self {
            state: Mutex::new(EngineState::with_config(
                config.dedup_window_ms(),
                config.presence_ttl_ms(),
            )),
        }
    }

    pub(crate) fn state_lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock()
    }

    fn flow(state: &mut EngineState, kind: &str, summary: String, now: i64) {
        state.record_flow(FlowEvent {
            id: util::new_id("flow"),
            kind: kind.to_string(),
            summary,
            timestamp: now,
        });
    }

    fn cascade_rule_removal(state: &mut EngineState, removed_rule_ids: Vec<String>, now: i64) -> Vec<AuditEntry> {
        let mut audit = Vec::new();
        for rule_id in removed_rule_ids {
            for t in state.tasks.open_for_rule(&rule_id) {
                let id = t.id.clone();
                if let Some(entry) = state.tasks.close(&id, "rule_deleted", now) {
                    audit.push(entry);
                }
            }
        }
        audit
    }

    fn reproject_rules(state: &mut EngineState, now: i64) -> Vec<AuditEntry> {
        let locations: Vec<Location> = state.locations.all().cloned().collect();
        let location_refs: Vec<&Location> = locations.iter().collect();
        let skus: Vec<shared::models::Sku> = state.skus.all().cloned().collect();
        let sku_refs: Vec<&shared::models::Sku> = skus.iter().collect();
        let winners = crate::rules::project(&state.templates, &location_refs, &sku_refs, &state.catalog);
        let removed = state.rules.replace_all(winners);
        let mut audit = Self::cascade_rule_removal(state, removed, now);
        for loc in &locations {
            audit.extend(recompute_location(state, &loc.id));
        }
        audit
    }

    // ---------------------------------------------------------------
    // RFID / presence
    // ---------------------------------------------------------------

    pub fn ingest_rfid_read(
        &self,
        epc: &str,
        antenna_id: &str,
        t: i64,
        rssi: Option<f64>,
    ) -> IngestRfidReadStatus {
        let mut state = self.state.lock();
        let Some(location_id) = state.antennas.location_of(antenna_id).map(|s| s.to_string()) else {
            return IngestRfidReadStatus::InvalidAntennaOrZone;
        };
        if !state.dedup.try_accept(epc, antenna_id, t) {
            return IngestRfidReadStatus::DuplicateIgnored;
        }
        let now = state.clock.advance(t);
        let Some(sku_id) = state.epc_mappings.sku_of(epc, now).map(|s| s.to_string()) else {
            return IngestRfidReadStatus::UnknownEpc;
        };
        let ttl_ms = state.presence_ttl_ms();
        state.presence.record_read(epc, &sku_id, &location_id, antenna_id, now, rssi);

        recompute_location(&mut state, &location_id);
        crate::cart::resolve_pending_picks(
            &location_id,
            &sku_id,
            now,
            ttl_ms,
            &mut state.presence,
            &mut state.pending_picks,
            &mut state.baskets,
        );
        Self::flow(&mut state, "rfid_read", format!("{epc} at {antenna_id}"), now);
        IngestRfidReadStatus::Accepted
    }

    pub fn force_zone_sweep(&self, location_id: &str, t: i64) -> ForceZoneSweepStatus {
        let mut state = self.state.lock();
        if state.locations.get(location_id).is_none() {
            return ForceZoneSweepStatus::ZoneNotFound;
        }
        let now = state.clock.advance(t);
        state.presence.sweep_refresh(location_id, now);
        recompute_location(&mut state, location_id);
        Self::flow(&mut state, "zone_sweep", location_id.to_string(), now);
        ForceZoneSweepStatus::Accepted
    }

    // ---------------------------------------------------------------
    // Sales
    // ---------------------------------------------------------------

    pub fn ingest_sales_event(
        &self,
        location_id: &str,
        sku_id: &str,
        is_return: bool,
        qty: i64,
        t: i64,
    ) -> IngestSalesEventStatus {
        let mut state = self.state.lock();
        let now = state.clock.advance(t);
        let source = state
            .skus
            .get(sku_id)
            .map(|s| s.source)
            .unwrap_or(shared::models::StockSource::NonRfid);
        let kind = if is_return {
            LedgerEntryKind::Return
        } else {
            LedgerEntryKind::Sale
        };
        let ttl_ms = state.presence_ttl_ms();
        let immediate = source == shared::models::StockSource::Rfid && kind == LedgerEntryKind::Sale;
        {
            let EngineState {
                presence,
                ledger,
                snapshots,
                ..
            } = &mut *state;
            crate::sales::apply_movement(
                location_id, sku_id, source, kind, qty, now, presence, ledger, snapshots, ttl_ms,
            );
        }
        recompute_location(&mut state, location_id);
        Self::flow(&mut state, "sales_event", format!("{sku_id} x{qty} at {location_id}"), now);
        if immediate {
            IngestSalesEventStatus::AcceptedRfidImmediate
        } else {
            IngestSalesEventStatus::Accepted
        }
    }

    // ---------------------------------------------------------------
    // Customer cart
    // ---------------------------------------------------------------

    pub fn add_customer_item(
        &self,
        customer_id: &str,
        location_id: &str,
        sku_id: &str,
        qty: i64,
        t: i64,
    ) -> AddCustomerItemStatus {
        let mut state = self.state.lock();
        let Some(location) = state.locations.get(location_id).cloned() else {
            return AddCustomerItemStatus::ZoneNotFound;
        };
        if !location.is_sales_location {
            return AddCustomerItemStatus::ZoneNotOrderable;
        }
        let now = state.clock.advance(t);
        let source = state
            .skus
            .get(sku_id)
            .map(|s| s.source)
            .unwrap_or(shared::models::StockSource::NonRfid);
        let EngineState {
            baskets,
            pending_picks,
            snapshots,
            ..
        } = &mut *state;
        match crate::cart::add_item(
            &location, customer_id, sku_id, source, qty, now, baskets, pending_picks, snapshots,
        ) {
            Ok(basket_item_id) => AddCustomerItemStatus::Accepted { basket_item_id },
            Err(crate::cart::AddItemError::NotASalesLocation) => AddCustomerItemStatus::ZoneNotOrderable,
            Err(crate::cart::AddItemError::InsufficientStock) => {
                let reserved = crate::cart::reserved_qty(&state.baskets, location_id, sku_id, source);
                let current = state.snapshots.qty(location_id, sku_id, source);
                AddCustomerItemStatus::InsufficientInventory {
                    available_qty: (current - reserved).max(0),
                }
            }
        }
    }

    pub fn remove_customer_item(&self, item_id: &str, t: i64) -> RemoveCustomerItemStatus {
        let mut state = self.state.lock();
        let Some(location_id) = state.baskets.get(item_id).map(|i| i.location_id.clone()) else {
            return RemoveCustomerItemStatus::BasketItemNotFound;
        };
        let now = state.clock.advance(t);
        let primary = state.antennas.primary_of(&location_id).map(|s| s.to_string());
        let EngineState {
            baskets,
            pending_picks,
            presence,
            ..
        } = &mut *state;
        crate::cart::remove_item(item_id, now, primary.as_deref(), baskets, pending_picks, presence);
        recompute_location(&mut state, &location_id);
        RemoveCustomerItemStatus::Accepted
    }

    pub fn checkout_customer(&self, customer_id: &str, t: i64) -> CheckoutCustomerStatus {
        let mut state = self.state.lock();
        let item_ids: Vec<String> = state
            .baskets
            .for_customer(customer_id)
            .iter()
            .map(|i| i.id.clone())
            .collect();
        if item_ids.is_empty() {
            return CheckoutCustomerStatus::NothingToCheckout;
        }
        let now = state.clock.advance(t);
        let ttl_ms = state.presence_ttl_ms();
        let cashier_antenna = state.antennas.primary_of(util::CASHIER_STORAGE_LOCATION_ID).map(|s| s.to_string());
        let mut touched_locations: Vec<String> = Vec::new();
        let mut sold = 0usize;

        for item_id in &item_ids {
            let location_id = state.baskets.get(item_id).map(|i| i.location_id.clone());
            let locations_snapshot: std::collections::HashMap<String, Location> =
                state.locations.all().map(|l| (l.id.clone(), l.clone())).collect();
            let EngineState {
                baskets,
                pending_picks,
                presence,
                catalog,
                skus,
                ledger,
                snapshots,
                tasks,
                ..
            } = &mut *state;
            let outcome = crate::cart::checkout_item(
                item_id,
                now,
                ttl_ms,
                cashier_antenna.as_deref(),
                baskets,
                pending_picks,
                presence,
                catalog,
                skus,
                &locations_snapshot,
                ledger,
                snapshots,
                tasks,
            );
            if let Some(outcome) = outcome {
                sold += 1;
                if let Some(loc) = location_id {
                    touched_locations.push(loc);
                }
                if outcome.personalised {
                    touched_locations.push(util::CASHIER_STORAGE_LOCATION_ID.to_string());
                }
            }
        }
        touched_locations.sort();
        touched_locations.dedup();
        for loc in &touched_locations {
            recompute_location(&mut state, loc);
        }
        Self::flow(&mut state, "checkout", format!("{customer_id}: {sold} items"), now);
        CheckoutCustomerStatus::Accepted { items_sold: sold }
    }

    // ---------------------------------------------------------------
    // Rule templates
    // ---------------------------------------------------------------

    pub fn upsert_rule_template(&self, payload: RuleTemplateUpsert, t: i64) -> UpsertRuleTemplateStatus {
        let mut state = self.state.lock();
        if payload.min > payload.max {
            return UpsertRuleTemplateStatus::InvalidMinMax;
        }
        if payload.scope == TemplateScope::Location {
            let Some(location_id) = &payload.location_id else {
                return UpsertRuleTemplateStatus::ZoneRequired;
            };
            if state.locations.get(location_id).is_none() {
                return UpsertRuleTemplateStatus::ZoneNotFound;
            }
        }
        if let Selector::Sku { sku_id } = &payload.selector {
            if sku_id.is_empty() {
                return UpsertRuleTemplateStatus::SkuRequired;
            }
        }
        let now = state.clock.advance(t);
        let id = payload.id.clone().unwrap_or_else(|| util::new_id("tpl"));
        state.templates.upsert(RuleTemplate {
            id: id.clone(),
            scope: payload.scope,
            location_id: payload.location_id,
            source: payload.source,
            selector: payload.selector,
            min: payload.min,
            max: payload.max,
            priority: payload.priority,
            inbound_source_id: payload.inbound_source_id,
            active: true,
            updated_at: now,
        });
        Self::reproject_rules(&mut state, now);
        UpsertRuleTemplateStatus::Accepted { template_id: id }
    }

    pub fn delete_rule_template(&self, template_id: &str, t: i64) -> DeleteRuleTemplateStatus {
        let mut state = self.state.lock();
        let Some(template) = state.templates.get(template_id) else {
            return DeleteRuleTemplateStatus::TemplateNotFound;
        };
        if !template.active {
            return DeleteRuleTemplateStatus::AlreadyInactive;
        }
        let now = state.clock.advance(t);
        state.templates.deactivate(template_id, now);
        Self::reproject_rules(&mut state, now);
        DeleteRuleTemplateStatus::Accepted
    }

    // ---------------------------------------------------------------
    // Task state machine
    // ---------------------------------------------------------------

    pub fn assign_task(&self, task_id: &str, staff_id: &str, t: i64) -> AssignTaskStatus {
        let mut state = self.state.lock();
        let Some(task) = state.tasks.get(task_id) else {
            return AssignTaskStatus::TaskNotFound;
        };
        if !task.status.is_open() {
            return AssignTaskStatus::TaskNotOpen;
        }
        let destination = task.destination_location_id.clone();
        let Some(staff) = state.staff.get(staff_id) else {
            return AssignTaskStatus::StaffNotFound;
        };
        if !staff.zone_scope.covers(&destination) {
            return AssignTaskStatus::StaffNotEligibleForZone;
        }
        let now = state.clock.advance(t);
        if let Some(task) = state.tasks.get_mut(task_id) {
            task.assigned_staff_id = Some(staff_id.to_string());
            task.assigned_at = Some(now);
            task.status = TaskStatus::Assigned;
            task.updated_at = now;
        }
        state.record_audit(AuditEntry {
            id: util::new_id("audit"),
            task_id: task_id.to_string(),
            action: TaskAction::Assigned,
            actor: staff_id.to_string(),
            details: "explicit assignment".to_string(),
            timestamp: now,
        });
        AssignTaskStatus::Accepted
    }

    pub fn start_task(&self, task_id: &str, staff_id: &str, t: i64) -> StartTaskStatus {
        let mut state = self.state.lock();
        let Some(task) = state.tasks.get(task_id) else {
            return StartTaskStatus::TaskNotFound;
        };
        if !matches!(task.status, TaskStatus::Created | TaskStatus::Assigned) {
            return StartTaskStatus::TaskNotOpen;
        }
        let destination = task.destination_location_id.clone();
        let already_assigned = task.assigned_staff_id.as_deref() == Some(staff_id);
        let Some(staff) = state.staff.get(staff_id) else {
            return StartTaskStatus::StaffNotEligibleForZone;
        };
        let in_scope = staff.active && staff.zone_scope.covers(&destination);
        let no_other_eligible = !state
            .staff
            .all()
            .any(|m| m.id != staff_id && m.active && m.zone_scope.covers(&destination));
        let fallback_ok = already_assigned && no_other_eligible;
        if !(in_scope || fallback_ok) {
            return StartTaskStatus::StaffNotEligibleForZone;
        }
        let now = state.clock.advance(t);
        if let Some(task) = state.tasks.get_mut(task_id) {
            task.status = TaskStatus::InProgress;
            task.updated_at = now;
            if task.assigned_staff_id.is_none() {
                task.assigned_staff_id = Some(staff_id.to_string());
                task.assigned_at = Some(now);
            }
        }
        state.record_audit(AuditEntry {
            id: util::new_id("audit"),
            task_id: task_id.to_string(),
            action: TaskAction::Started,
            actor: staff_id.to_string(),
            details: if fallback_ok && !in_scope {
                "started via out-of-scope fallback".to_string()
            } else {
                "started".to_string()
            },
            timestamp: now,
        });
        StartTaskStatus::Accepted
    }

    pub fn confirm_task(
        &self,
        task_id: &str,
        confirmed_by: &str,
        source_override: Option<&str>,
        t: i64,
    ) -> ConfirmTaskStatus {
        let mut state = self.state.lock();
        let Some(task) = state.tasks.get(task_id).cloned() else {
            return ConfirmTaskStatus::TaskNotFound;
        };
        if task.status != TaskStatus::InProgress {
            return ConfirmTaskStatus::TaskNotOpen;
        }
        let now = state.clock.advance(t);
        let ttl_ms = state.presence_ttl_ms();
        let dest_primary = state
            .antennas
            .primary_of(&task.destination_location_id)
            .unwrap_or("")
            .to_string();

        let mut candidates: Vec<String> = source_override.map(|s| s.to_string()).into_iter().collect();
        if candidates.is_empty() {
            if let Some(sel) = &task.selected_source_zone_id {
                candidates.push(sel.clone());
            }
        }
        let mut by_order = task.candidate_sources.clone();
        by_order.sort_by_key(|c| c.sort_order);
        candidates.extend(by_order.into_iter().map(|c| c.zone_id));
        candidates.retain(|c| !task.attempted_source_ids.contains(c));
        let mut seen = std::collections::HashSet::new();
        candidates.retain(|c| seen.insert(c.clone()));

        let mut moved = 0i64;
        let mut used_source = None;
        let mut attempted = task.attempted_source_ids.clone();
        for source_id in &candidates {
            let qty = if util::is_external_source(source_id) {
                match task.source {
                    shared::models::StockSource::Rfid => transfer::receive_external_rfid(
                        &task.destination_location_id,
                        &dest_primary,
                        &task.sku_id,
                        task.deficit_qty,
                        now,
                        &mut state.presence,
                        &mut state.epc_mappings,
                    ),
                    shared::models::StockSource::NonRfid => transfer::receive_external_non_rfid(
                        &task.destination_location_id,
                        &task.sku_id,
                        task.deficit_qty,
                        now,
                        &mut state.ledger,
                    ),
                }
            } else {
                match task.source {
                    shared::models::StockSource::Rfid => transfer::move_internal_rfid(
                        source_id,
                        &task.destination_location_id,
                        &dest_primary,
                        &task.sku_id,
                        task.deficit_qty,
                        now,
                        &mut state.presence,
                        ttl_ms,
                    ),
                    shared::models::StockSource::NonRfid => transfer::move_internal_non_rfid(
                        source_id,
                        &task.destination_location_id,
                        &task.sku_id,
                        task.deficit_qty,
                        now,
                        &mut state.ledger,
                    ),
                }
            };
            if qty > 0 {
                moved = qty;
                used_source = Some(source_id.clone());
                break;
            }
            attempted.push(source_id.clone());
        }

        if moved == 0 {
            if let Some(t) = state.tasks.get_mut(task_id) {
                t.attempted_source_ids = attempted;
                t.updated_at = now;
            }
            return ConfirmTaskStatus::NoInventoryMoved;
        }

        let partial = moved < task.deficit_qty;
        if let Some(t) = state.tasks.get_mut(task_id) {
            t.confirmed_qty = Some(moved);
            t.confirmed_by = Some(confirmed_by.to_string());
            t.status = TaskStatus::Confirmed;
            t.close_reason = Some(if partial { "confirmed_partial".to_string() } else { "confirmed".to_string() });
            t.updated_at = now;
        }
        state.record_audit(AuditEntry {
            id: util::new_id("audit"),
            task_id: task_id.to_string(),
            action: TaskAction::Confirmed,
            actor: confirmed_by.to_string(),
            details: format!("moved {moved}"),
            timestamp: now,
        });

        recompute_location(&mut state, &task.destination_location_id);
        if let Some(src) = &used_source {
            if !util::is_external_source(src) {
                recompute_location(&mut state, src);
            }
        }

        if partial {
            ConfirmTaskStatus::ConfirmedPartial { moved_qty: moved }
        } else {
            ConfirmTaskStatus::Confirmed { moved_qty: moved }
        }
    }

    // ---------------------------------------------------------------
    // Receiving orders
    // ---------------------------------------------------------------

    pub fn create_receiving_order(
        &self,
        destination_location_id: &str,
        source_location_id: &str,
        sku_id: &str,
        requested_qty: i64,
        t: i64,
    ) -> CreateReceivingOrderStatus {
        let mut state = self.state.lock();
        if state.locations.get(destination_location_id).is_none() {
            return CreateReceivingOrderStatus::DestinationNotFound;
        }
        if requested_qty <= 0 {
            return CreateReceivingOrderStatus::InvalidQuantity;
        }
        if !util::is_external_source(source_location_id) && source_location_id == destination_location_id {
            return CreateReceivingOrderStatus::SourceEqualsDestination;
        }
        let Some(sku) = state.skus.get(sku_id) else {
            return CreateReceivingOrderStatus::SourceMismatch;
        };
        let source = sku.source;
        let now = state.clock.advance(t);
        let order_id = util::new_id("recv");
        state.receiving_orders.insert(shared::models::ReceivingOrder {
            id: order_id.clone(),
            source_location_id: source_location_id.to_string(),
            destination_location_id: destination_location_id.to_string(),
            sku_id: sku_id.to_string(),
            source,
            requested_qty,
            confirmed_qty: None,
            status: shared::models::ReceivingOrderStatus::InTransit,
            assigned_staff_id: None,
            created_at: now,
            updated_at: now,
        });
        staff_reconcile(&mut state, now);
        CreateReceivingOrderStatus::Accepted { order_id }
    }

    pub fn confirm_receiving_order(&self, order_id: &str, t: i64) -> ConfirmReceivingOrderStatus {
        let mut state = self.state.lock();
        let Some(order) = state.receiving_orders.get(order_id).cloned() else {
            return ConfirmReceivingOrderStatus::OrderNotFound;
        };
        if order.status != shared::models::ReceivingOrderStatus::InTransit {
            return ConfirmReceivingOrderStatus::OrderNotOpen;
        }
        let now = state.clock.advance(t);
        let ttl_ms = state.presence_ttl_ms();
        let dest_primary = state
            .antennas
            .primary_of(&order.destination_location_id)
            .unwrap_or("")
            .to_string();
        let external = util::is_external_source(&order.source_location_id);

        let moved = match (external, order.source) {
            (true, shared::models::StockSource::Rfid) => transfer::receive_external_rfid(
                &order.destination_location_id,
                &dest_primary,
                &order.sku_id,
                order.requested_qty,
                now,
                &mut state.presence,
                &mut state.epc_mappings,
            ),
            (true, shared::models::StockSource::NonRfid) => transfer::receive_external_non_rfid(
                &order.destination_location_id,
                &order.sku_id,
                order.requested_qty,
                now,
                &mut state.ledger,
            ),
            (false, shared::models::StockSource::Rfid) => transfer::move_internal_rfid(
                &order.source_location_id,
                &order.destination_location_id,
                &dest_primary,
                &order.sku_id,
                order.requested_qty,
                now,
                &mut state.presence,
                ttl_ms,
            ),
            (false, shared::models::StockSource::NonRfid) => transfer::move_internal_non_rfid(
                &order.source_location_id,
                &order.destination_location_id,
                &order.sku_id,
                order.requested_qty,
                now,
                &mut state.ledger,
            ),
        };

        if moved == 0 {
            return ConfirmReceivingOrderStatus::NoInventoryMoved;
        }

        if let Some(o) = state.receiving_orders.get_mut(order_id) {
            o.confirmed_qty = Some(moved);
            o.status = shared::models::ReceivingOrderStatus::Confirmed;
            o.updated_at = now;
        }
        recompute_location(&mut state, &order.destination_location_id);
        if !external {
            recompute_location(&mut state, &order.source_location_id);
        }
        ConfirmReceivingOrderStatus::Confirmed { moved_qty: moved }
    }

    // ---------------------------------------------------------------
    // Master data mirrors
    //
    // Antennas, SKUs, catalog variants and EPC mappings are owned by
    // collaborators, not the engine; these commands mirror what the engine
    // needs to know about them without asserting authority over the data.
    // ---------------------------------------------------------------

    pub fn register_antenna(&self, antenna: Antenna) -> MasterDataStatus {
        self.state.lock().antennas.upsert(antenna);
        MasterDataStatus::Accepted
    }

    pub fn register_sku(&self, sku: Sku) -> MasterDataStatus {
        self.state.lock().skus.upsert(sku);
        MasterDataStatus::Accepted
    }

    pub fn register_catalog_variant(&self, variant: CatalogVariant) -> MasterDataStatus {
        self.state.lock().catalog.upsert(variant);
        MasterDataStatus::Accepted
    }

    pub fn register_epc_mapping(&self, epc: &str, sku_id: &str, active_from: i64) -> MasterDataStatus {
        self.state.lock().epc_mappings.register(epc, sku_id, active_from);
        MasterDataStatus::Accepted
    }

    // ---------------------------------------------------------------
    // Master data CRUD
    // ---------------------------------------------------------------

    pub fn create_location(&self, payload: LocationCreate) -> ZoneCrudStatus {
        let mut state = self.state.lock();
        if state.locations.get(&payload.id).is_some() {
            return ZoneCrudStatus::ZoneExists;
        }
        state.locations.upsert(Location {
            id: payload.id,
            name: payload.name,
            polygon: payload.polygon,
            color: payload.color,
            is_sales_location: payload.is_sales_location,
            sources: payload.sources,
        });
        ZoneCrudStatus::Accepted
    }

    pub fn update_location(&self, id: &str, payload: LocationUpdate) -> ZoneCrudStatus {
        let mut state = self.state.lock();
        let Some(location) = state.locations.get_mut(id) else {
            return ZoneCrudStatus::ZoneNotFound;
        };
        if let Some(name) = payload.name {
            location.name = name;
        }
        if let Some(polygon) = payload.polygon {
            location.polygon = polygon;
        }
        if let Some(color) = payload.color {
            location.color = color;
        }
        if let Some(is_sales) = payload.is_sales_location {
            location.is_sales_location = is_sales;
        }
        if let Some(sources) = payload.sources {
            location.sources = sources;
        }
        ZoneCrudStatus::Accepted
    }

    pub fn delete_location(&self, id: &str, t: i64) -> ZoneCrudStatus {
        let mut state = self.state.lock();
        if state.locations.remove(id).is_none() {
            return ZoneCrudStatus::ZoneNotFound;
        }
        let now = state.clock.advance(t);
        let ids: Vec<String> = state
            .tasks
            .all()
            .filter(|t| t.status.is_open() && t.destination_location_id == id)
            .map(|t| t.id.clone())
            .collect();
        for task_id in ids {
            state.tasks.close(&task_id, "location_deleted", now);
        }
        ZoneCrudStatus::Accepted
    }

    pub fn upsert_staff(&self, member: StaffMember) -> StaffCrudStatus {
        let mut state = self.state.lock();
        state.staff.upsert(member);
        StaffCrudStatus::Accepted
    }

    pub fn update_staff(&self, id: &str, payload: StaffUpdate) -> StaffCrudStatus {
        let mut state = self.state.lock();
        let Some(current) = state.staff.get(id).cloned() else {
            return StaffCrudStatus::StaffNotFound;
        };
        state.staff.upsert(StaffMember {
            id: current.id,
            name: payload.name.unwrap_or(current.name),
            role: payload.role.unwrap_or(current.role),
            active: payload.active.unwrap_or(current.active),
            zone_scope: payload.zone_scope.unwrap_or(current.zone_scope),
        });
        StaffCrudStatus::Accepted
    }
}
