//! Transaction orchestrator.
//!
//! Coordinates creation, update, approval/rejection/cancellation, and
//! deletion of orders and returns. Composes the numbering policy, the
//! inventory effect engine, the party ledger engine, and VAT aggregation,
//! all inside one database transaction per operation: every step commits
//! together or rolls back together, sequence increments included.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use tradewind_core::inventory::{InventoryEngine, MovementPlan, MovementRecord, StockSnapshot};
use tradewind_core::ledger::{LedgerContext, LedgerEngine, LedgerEntryDraft};
use tradewind_core::numbering::{
    CreatePlan, InvoiceAllocation, NumberingError, NumberingPolicy, SequenceSpec, SequenceType,
    SALES_ORDER_PLACEHOLDER,
};
use tradewind_core::vat::{VatContext, VatService, VatTotals};
use tradewind_core::workflow::{
    LineItem, LineItemInput, PartyKind, Priority, ProcessAction, TransactionStatus,
    TransactionType, WorkflowError, WorkflowService,
};
use tradewind_shared::config::SequenceConfig;
use tradewind_shared::AppError;

use super::sequence::{SequenceAllocator, SequenceError};
use crate::entities::{
    credit_logs, customers, debit_logs, inventory_movements, purchase_logs,
    sea_orm_active_enums as enums, stocks,
    transactions::{self, LineItems},
    vat_reports::{self, VatItems},
    vendors,
};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Counterparty not found.
    #[error("{kind} not found: {id}")]
    PartyNotFound {
        /// Customer or vendor.
        kind: PartyKind,
        /// The missing party id.
        id: Uuid,
    },

    /// Stock item not found.
    #[error("Stock item not found: {0}")]
    StockNotFound(Uuid),

    /// Companion purchase log not found.
    #[error("Purchase log not found for {0}")]
    PurchaseLogNotFound(String),

    /// Caller-supplied tracking number already exists.
    #[error("Transaction number {0} already exists")]
    DuplicateTransactionNo(String),

    /// Caller-supplied order number already exists.
    #[error("Order number {0} already exists")]
    DuplicateOrderNumber(String),

    /// Lifecycle validation failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Numbering validation failed.
    #[error(transparent)]
    Numbering(#[from] NumberingError),

    /// Sequence allocation failed.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_)
            | TransactionError::PartyNotFound { .. }
            | TransactionError::StockNotFound(_)
            | TransactionError::PurchaseLogNotFound(_) => Self::NotFound(err.to_string()),
            TransactionError::DuplicateTransactionNo(_)
            | TransactionError::DuplicateOrderNumber(_) => Self::Conflict(err.to_string()),
            TransactionError::Workflow(e) => e.into(),
            TransactionError::Numbering(e) => e.into(),
            TransactionError::Sequence(e) => e.into(),
            TransactionError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Document type.
    pub transaction_type: TransactionType,
    /// Caller-supplied tracking number; forces manual numbering.
    pub transaction_no: Option<String>,
    /// Caller-supplied order number (sales orders); forces manual numbering.
    pub order_number: Option<String>,
    /// Manual numbering flag.
    pub number_manual: bool,
    /// The counterparty.
    pub party_id: Uuid,
    /// Customer or vendor.
    pub party_kind: PartyKind,
    /// Free-form vendor reference.
    pub vendor_reference: Option<String>,
    /// Raw line items.
    pub items: Vec<LineItemInput>,
    /// Caller override of the computed total.
    pub total_amount: Option<Decimal>,
    /// Document date (defaults to today).
    pub date: Option<NaiveDate>,
    /// Delivery date (defaults to the document date).
    pub delivery_date: Option<NaiveDate>,
    /// Terms text.
    pub terms: Option<String>,
    /// Notes text.
    pub notes: Option<String>,
    /// Order priority.
    pub priority: Option<Priority>,
}

/// Input for updating a draft transaction.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// Replacement line items; totals are recomputed.
    pub items: Option<Vec<LineItemInput>>,
    /// Caller override of the recomputed total.
    pub total_amount: Option<Decimal>,
    /// New delivery date.
    pub delivery_date: Option<NaiveDate>,
    /// New terms text.
    pub terms: Option<String>,
    /// New notes text.
    pub notes: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
}

/// The party state the approve path reads once, under lock.
struct PartyState {
    name: String,
    balance: Decimal,
}

/// Transaction repository and orchestrator.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
    sequence: SequenceConfig,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            sequence: SequenceConfig::default(),
        }
    }

    /// Creates a repository with explicit sequence retry tuning.
    #[must_use]
    pub const fn with_sequence_config(db: DatabaseConnection, sequence: SequenceConfig) -> Self {
        Self { db, sequence }
    }

    /// Gets a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` when absent.
    pub async fn get_transaction(
        &self,
        id: Uuid,
    ) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Creates a transaction in DRAFT.
    ///
    /// Validates the payload, computes VAT-inclusive line totals,
    /// resolves numbering per the policy, verifies every line's stock
    /// item exists, and writes the transaction (plus the companion
    /// purchase log for purchase orders) atomically.
    ///
    /// # Errors
    ///
    /// Returns validation, conflict, allocation, or database errors; no
    /// record is created on failure.
    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
        created_by: &str,
    ) -> Result<transactions::Model, TransactionError> {
        tracing::debug!(
            transaction_type = %input.transaction_type,
            transaction_no = input.transaction_no.as_deref(),
            order_number = input.order_number.as_deref(),
            items = input.items.len(),
            "inbound create transaction"
        );

        WorkflowService::validate_items(&input.items)?;
        let (items, computed_total) = WorkflowService::calculate_line_items(&input.items);
        let total_amount = input.total_amount.unwrap_or(computed_total);

        let today = Utc::now().date_naive();
        let date = input.date.unwrap_or(today);
        let delivery_date = input.delivery_date.unwrap_or(date);

        let plan = NumberingPolicy::plan_create(
            input.transaction_type,
            input.number_manual,
            input.transaction_no.as_deref(),
            input.order_number.as_deref(),
            date,
        )?;

        let txn = self.db.begin().await?;

        let (transaction_no, order_number, number_manual) = match plan {
            CreatePlan::AutoSalesOrder { order } => {
                let order_no =
                    SequenceAllocator::get_next_with(&txn, &order, &self.sequence).await?;
                (SALES_ORDER_PLACEHOLDER.to_string(), Some(order_no), false)
            }
            CreatePlan::ManualSalesOrder { order_number } => {
                Self::ensure_order_number_free(&txn, &order_number).await?;
                (
                    SALES_ORDER_PLACEHOLDER.to_string(),
                    Some(order_number),
                    true,
                )
            }
            CreatePlan::AutoOrder { transaction } => {
                let number =
                    SequenceAllocator::get_next_with(&txn, &transaction, &self.sequence).await?;
                (number, None, false)
            }
            CreatePlan::ManualOrder { transaction_no } => {
                Self::ensure_transaction_no_free(&txn, &transaction_no).await?;
                (transaction_no, None, true)
            }
        };

        // Items must refer to existing stock; levels are not checked.
        for item in &items {
            stocks::Entity::find_by_id(item.item_id)
                .one(&txn)
                .await?
                .ok_or(TransactionError::StockNotFound(item.item_id))?;
        }

        let now = Utc::now().into();
        let created = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            transaction_no: Set(transaction_no.clone()),
            order_number: Set(order_number),
            invoice_number: Set(None),
            number_manual: Set(number_manual),
            transaction_type: Set(input.transaction_type.into()),
            party_id: Set(input.party_id),
            party_kind: Set(input.party_kind.into()),
            vendor_reference: Set(input.vendor_reference.clone()),
            items: Set(LineItems(items.clone())),
            total_amount: Set(total_amount),
            status: Set(enums::TransactionStatus::Draft),
            date: Set(date),
            delivery_date: Set(delivery_date),
            terms: Set(input.terms.clone().unwrap_or_default()),
            notes: Set(input.notes.clone().unwrap_or_default()),
            priority: Set(input.priority.unwrap_or_default().into()),
            grn_generated: Set(false),
            invoice_generated: Set(false),
            credit_note_issued: Set(false),
            created_by: Set(created_by.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        if input.transaction_type == TransactionType::PurchaseOrder {
            purchase_logs::ActiveModel {
                id: Set(Uuid::new_v4()),
                transaction_no: Set(transaction_no),
                vendor_id: Set(input.party_id),
                date: Set(date),
                delivery_date: Set(delivery_date),
                items: Set(LineItems(items)),
                total_amount: Set(total_amount),
                status: Set(enums::PurchaseLogStatus::Pending),
                terms: Set(input.terms.unwrap_or_default()),
                notes: Set(input.notes.unwrap_or_default()),
                priority: Set(input.priority.unwrap_or_default().into()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(created)
    }

    /// Updates a draft transaction.
    ///
    /// Fails once the transaction is processed. Replacing the items
    /// recomputes the total and rewrites the companion purchase log for
    /// purchase orders.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AlreadyProcessed` (wrapped) for processed
    /// transactions, or not-found/database errors.
    pub async fn update_transaction(
        &self,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        tracing::debug!(%id, items = input.items.as_ref().map(Vec::len), "inbound update transaction");

        let txn = self.db.begin().await?;
        let tx = transactions::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let status: TransactionStatus = tx.status.clone().into();
        WorkflowService::validate_can_modify(status)?;

        let mut replacement: Option<(Vec<LineItem>, Decimal)> = None;
        if let Some(raw_items) = &input.items {
            WorkflowService::validate_items(raw_items)?;
            let (items, computed_total) = WorkflowService::calculate_line_items(raw_items);
            let total = input.total_amount.unwrap_or(computed_total);
            replacement = Some((items, total));
        }

        if tx.transaction_type == enums::TransactionType::PurchaseOrder {
            if let Some((items, total)) = &replacement {
                let log = purchase_logs::Entity::find()
                    .filter(purchase_logs::Column::TransactionNo.eq(tx.transaction_no.clone()))
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        TransactionError::PurchaseLogNotFound(tx.transaction_no.clone())
                    })?;
                let mut log = log.into_active_model();
                log.items = Set(LineItems(items.clone()));
                log.total_amount = Set(*total);
                if let Some(terms) = &input.terms {
                    log.terms = Set(terms.clone());
                }
                if let Some(notes) = &input.notes {
                    log.notes = Set(notes.clone());
                }
                if let Some(priority) = input.priority {
                    log.priority = Set(priority.into());
                }
                log.updated_at = Set(Utc::now().into());
                log.update(&txn).await?;
            }
        }

        let mut active = tx.into_active_model();
        if let Some((items, total)) = replacement {
            active.items = Set(LineItems(items));
            active.total_amount = Set(total);
        }
        if let Some(delivery_date) = input.delivery_date {
            active.delivery_date = Set(delivery_date);
        }
        if let Some(terms) = input.terms {
            active.terms = Set(terms);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        if let Some(priority) = input.priority {
            active.priority = Set(priority.into());
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Processes a transaction: approve, reject, or cancel.
    ///
    /// Approve applies inventory movements, VAT aggregation, the party
    /// ledger effect, the purchase-log status, and the invoice numbering
    /// policy. Cancel of a previously approved transaction runs the full
    /// reversal path first. All of it commits or rolls back as one unit.
    ///
    /// # Errors
    ///
    /// Returns state errors for unknown actions or processed
    /// transactions, plus not-found/allocation/database errors.
    pub async fn process_transaction(
        &self,
        id: Uuid,
        action: &str,
        actor: &str,
    ) -> Result<transactions::Model, TransactionError> {
        let txn = self.db.begin().await?;
        let tx = transactions::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let status: TransactionStatus = tx.status.clone().into();
        let action = WorkflowService::validate_action(status, action)?;
        let was_approved = status == TransactionStatus::Approved;
        let transaction_type: TransactionType = tx.transaction_type.clone().into();

        let mut invoice_number = tx.invoice_number.clone();

        match action {
            ProcessAction::Approve => {
                Self::apply_stock_effects(&txn, &tx, transaction_type, actor).await?;

                let party = Self::load_party(&txn, &tx).await?;
                Self::append_vat_items(&txn, &tx, transaction_type, &party.name, actor).await?;
                Self::apply_party_ledger(&txn, &tx, transaction_type, party.balance, actor)
                    .await?;

                if transaction_type == TransactionType::PurchaseOrder {
                    Self::set_purchase_log_status(
                        &txn,
                        &tx.transaction_no,
                        enums::PurchaseLogStatus::Approved,
                    )
                    .await?;
                }

                match NumberingPolicy::invoice_allocation_on_approve(
                    transaction_type,
                    tx.number_manual,
                    tx.invoice_number.as_deref(),
                    tx.order_number.as_deref(),
                )? {
                    InvoiceAllocation::Sequence(spec) => {
                        invoice_number = Some(
                            SequenceAllocator::get_next_with(&txn, &spec, &self.sequence).await?,
                        );
                    }
                    InvoiceAllocation::ReuseOrderNumber(number) => {
                        invoice_number = Some(number);
                    }
                    InvoiceAllocation::None => {}
                }
            }
            ProcessAction::Reject => {
                if transaction_type == TransactionType::PurchaseOrder {
                    Self::set_purchase_log_status(
                        &txn,
                        &tx.transaction_no,
                        enums::PurchaseLogStatus::Rejected,
                    )
                    .await?;
                }
            }
            ProcessAction::Cancel => {
                if was_approved {
                    Self::reverse_stock_effects(&txn, &tx, actor).await?;
                    Self::reverse_party_ledger(&txn, &tx, transaction_type, actor).await?;
                }
                if transaction_type == TransactionType::PurchaseOrder {
                    Self::set_purchase_log_status(
                        &txn,
                        &tx.transaction_no,
                        enums::PurchaseLogStatus::Cancelled,
                    )
                    .await?;
                }
            }
        }

        let mut active = tx.clone().into_active_model();
        active.status = Set(WorkflowService::status_for_action(action).into());
        if action == ProcessAction::Approve {
            let flags = WorkflowService::approval_flags(transaction_type);
            active.grn_generated = Set(tx.grn_generated || flags.grn_generated);
            active.invoice_generated = Set(tx.invoice_generated || flags.invoice_generated);
            active.credit_note_issued = Set(tx.credit_note_issued || flags.credit_note_issued);
            active.invoice_number = Set(invoice_number);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(%id, action = action.as_str(), "transaction processed");
        Ok(updated)
    }

    /// Deletes a transaction.
    ///
    /// An approved transaction goes through the same reversal path as
    /// cancellation first. The companion purchase log is removed;
    /// movements and ledger entries survive, referencing the id weakly.
    ///
    /// # Errors
    ///
    /// Returns not-found or database errors.
    pub async fn delete_transaction(&self, id: Uuid, actor: &str) -> Result<(), TransactionError> {
        let txn = self.db.begin().await?;
        let tx = transactions::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let transaction_type: TransactionType = tx.transaction_type.clone().into();
        if tx.status == enums::TransactionStatus::Approved {
            Self::reverse_stock_effects(&txn, &tx, actor).await?;
            Self::reverse_party_ledger(&txn, &tx, transaction_type, actor).await?;
        }

        if transaction_type == TransactionType::PurchaseOrder {
            purchase_logs::Entity::delete_many()
                .filter(purchase_logs::Column::TransactionNo.eq(tx.transaction_no.clone()))
                .exec(&txn)
                .await?;
        }

        transactions::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(%id, "transaction deleted");
        Ok(())
    }

    /// Returns the next document number for a type code.
    ///
    /// `preview = true` reads without incrementing; `preview = false`
    /// allocates.
    ///
    /// # Errors
    ///
    /// Returns validation, allocation, or database errors.
    pub async fn get_next_transaction_number(
        &self,
        code: &str,
        preview: bool,
    ) -> Result<String, TransactionError> {
        let sequence_type = SequenceType::from_code(code)?;
        let spec = SequenceSpec::for_document(sequence_type, Utc::now().date_naive());
        if preview {
            Ok(SequenceAllocator::preview(&self.db, &spec).await?)
        } else {
            Ok(SequenceAllocator::get_next_with(&self.db, &spec, &self.sequence).await?)
        }
    }

    /// Previews the next number for a type code, never incrementing.
    ///
    /// Accepts an optional `YYYYMM` or `YYYY` period override.
    ///
    /// # Errors
    ///
    /// Returns validation or database errors.
    pub async fn preview_next_number(
        &self,
        code: &str,
        period_override: Option<&str>,
    ) -> Result<String, TransactionError> {
        let sequence_type = SequenceType::from_code(code)?;
        let today = Utc::now().date_naive();
        let spec = match period_override {
            Some(raw) => {
                let period = NumberingPolicy::parse_period_override(raw, today)?;
                SequenceSpec::for_period(sequence_type, &period)
            }
            None => SequenceSpec::for_document(sequence_type, today),
        };
        Ok(SequenceAllocator::preview(&self.db, &spec).await?)
    }

    // ---------- Stock effects ----------

    async fn apply_stock_effects(
        txn: &DatabaseTransaction,
        tx: &transactions::Model,
        transaction_type: TransactionType,
        actor: &str,
    ) -> Result<(), TransactionError> {
        for item in &tx.items.0 {
            let stock = stocks::Entity::find_by_id(item.item_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .ok_or(TransactionError::StockNotFound(item.item_id))?;

            let snapshot = StockSnapshot {
                item_id: stock.id,
                current_stock: stock.current_stock,
                purchase_price: stock.purchase_price,
                batch_number: stock.batch_number.clone(),
                expiry_date: stock.expiry_date,
            };
            let plan = InventoryEngine::plan_movement(
                transaction_type,
                item,
                &snapshot,
                &tx.transaction_no,
            );

            let mut stock = stock.into_active_model();
            stock.current_stock = Set(plan.new_stock);
            if let Some(cost) = plan.cost_update {
                stock.purchase_price = Set(cost);
            }
            stock.updated_at = Set(Utc::now().into());
            stock.update(txn).await?;

            Self::insert_movement(txn, tx.id, &plan, actor).await?;
        }
        Ok(())
    }

    async fn reverse_stock_effects(
        txn: &DatabaseTransaction,
        tx: &transactions::Model,
        actor: &str,
    ) -> Result<(), TransactionError> {
        let movements = inventory_movements::Entity::find()
            .filter(inventory_movements::Column::ReferenceId.eq(tx.id))
            .filter(inventory_movements::Column::IsReversed.eq(false))
            .all(txn)
            .await?;

        for movement in movements {
            let stock = stocks::Entity::find_by_id(movement.item_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .ok_or(TransactionError::StockNotFound(movement.item_id))?;

            let record = MovementRecord {
                id: movement.id,
                item_id: movement.item_id,
                quantity: movement.quantity,
                unit_cost: movement.unit_cost,
                event_type: movement.event_type.clone().into(),
                notes: movement.notes.clone(),
                batch_number: movement.batch_number.clone(),
                expiry_date: movement.expiry_date,
            };
            let plan =
                InventoryEngine::plan_reversal(&record, stock.current_stock, &tx.transaction_no);

            let mut stock = stock.into_active_model();
            stock.current_stock = Set(plan.movement.new_stock);
            stock.updated_at = Set(Utc::now().into());
            stock.update(txn).await?;

            let reversal_id = Self::insert_movement(txn, tx.id, &plan.movement, actor).await?;

            let mut original = movement.into_active_model();
            original.is_reversed = Set(true);
            original.reversal_reference = Set(Some(reversal_id));
            original.update(txn).await?;
        }
        Ok(())
    }

    async fn insert_movement(
        txn: &DatabaseTransaction,
        reference_id: Uuid,
        plan: &MovementPlan,
        actor: &str,
    ) -> Result<Uuid, TransactionError> {
        let id = Uuid::new_v4();
        inventory_movements::ActiveModel {
            id: Set(id),
            item_id: Set(plan.item_id),
            quantity: Set(plan.quantity),
            previous_stock: Set(plan.previous_stock),
            new_stock: Set(plan.new_stock),
            event_type: Set(plan.event_type.into()),
            reference_id: Set(reference_id),
            reference_number: Set(plan.reference_number.clone()),
            unit_cost: Set(plan.unit_cost),
            total_value: Set(plan.total_value),
            notes: Set(plan.notes.clone()),
            batch_number: Set(plan.batch_number.clone()),
            expiry_date: Set(plan.expiry_date),
            is_reversed: Set(false),
            reversal_reference: Set(None),
            created_by: Set(actor.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(txn)
        .await?;
        Ok(id)
    }

    // ---------- Party ledger ----------

    fn ledger_context(
        tx: &transactions::Model,
        transaction_type: TransactionType,
    ) -> LedgerContext {
        LedgerContext {
            transaction_id: tx.id,
            transaction_type,
            party_id: tx.party_id,
            party_kind: tx.party_kind.clone().into(),
            transaction_no: tx.transaction_no.clone(),
            total_amount: tx.total_amount,
            date: tx.date,
        }
    }

    async fn try_load_party(
        txn: &DatabaseTransaction,
        tx: &transactions::Model,
    ) -> Result<Option<PartyState>, TransactionError> {
        let state = match tx.party_kind {
            enums::PartyKind::Vendor => vendors::Entity::find_by_id(tx.party_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .map(|v| PartyState {
                    name: v.vendor_name,
                    balance: v.cash_balance,
                }),
            enums::PartyKind::Customer => customers::Entity::find_by_id(tx.party_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .map(|c| PartyState {
                    name: c.customer_name,
                    balance: c.cash_balance,
                }),
        };
        Ok(state)
    }

    async fn load_party(
        txn: &DatabaseTransaction,
        tx: &transactions::Model,
    ) -> Result<PartyState, TransactionError> {
        Self::try_load_party(txn, tx)
            .await?
            .ok_or(TransactionError::PartyNotFound {
                kind: tx.party_kind.clone().into(),
                id: tx.party_id,
            })
    }

    async fn update_party_balance(
        txn: &DatabaseTransaction,
        tx: &transactions::Model,
        new_balance: Decimal,
    ) -> Result<(), TransactionError> {
        match tx.party_kind {
            enums::PartyKind::Vendor => {
                let vendor = vendors::Entity::find_by_id(tx.party_id)
                    .one(txn)
                    .await?
                    .ok_or(TransactionError::PartyNotFound {
                        kind: PartyKind::Vendor,
                        id: tx.party_id,
                    })?;
                let mut vendor = vendor.into_active_model();
                vendor.cash_balance = Set(new_balance);
                vendor.updated_at = Set(Utc::now().into());
                vendor.update(txn).await?;
            }
            enums::PartyKind::Customer => {
                let customer = customers::Entity::find_by_id(tx.party_id)
                    .one(txn)
                    .await?
                    .ok_or(TransactionError::PartyNotFound {
                        kind: PartyKind::Customer,
                        id: tx.party_id,
                    })?;
                let mut customer = customer.into_active_model();
                customer.cash_balance = Set(new_balance);
                customer.updated_at = Set(Utc::now().into());
                customer.update(txn).await?;
            }
        }
        Ok(())
    }

    async fn insert_ledger_entry(
        txn: &DatabaseTransaction,
        entry: &LedgerEntryDraft,
        actor: &str,
    ) -> Result<(), TransactionError> {
        let now = Utc::now().into();
        match entry.party_kind {
            PartyKind::Vendor => {
                debit_logs::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    vendor_id: Set(entry.party_id),
                    event_type: Set(entry.event_type.into()),
                    date: Set(entry.date),
                    inv_no: Set(entry.document_no.clone()),
                    amount: Set(entry.amount),
                    paid: Set(entry.paid),
                    balance: Set(entry.balance),
                    reference: Set(entry.reference.clone()),
                    status: Set(entry.status.into()),
                    created_by: Set(actor.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await?;
            }
            PartyKind::Customer => {
                credit_logs::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    customer_id: Set(entry.party_id),
                    event_type: Set(entry.event_type.into()),
                    date: Set(entry.date),
                    inv_no: Set(entry.document_no.clone()),
                    amount: Set(entry.amount),
                    paid: Set(entry.paid),
                    balance: Set(entry.balance),
                    reference: Set(entry.reference.clone()),
                    status: Set(entry.status.into()),
                    created_by: Set(actor.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await?;
            }
        }
        Ok(())
    }

    async fn apply_party_ledger(
        txn: &DatabaseTransaction,
        tx: &transactions::Model,
        transaction_type: TransactionType,
        current_balance: Decimal,
        actor: &str,
    ) -> Result<(), TransactionError> {
        let ctx = Self::ledger_context(tx, transaction_type);
        let effect = LedgerEngine::apply(&ctx, current_balance);
        Self::update_party_balance(txn, tx, effect.new_balance).await?;
        Self::insert_ledger_entry(txn, &effect.entry, actor).await
    }

    async fn reverse_party_ledger(
        txn: &DatabaseTransaction,
        tx: &transactions::Model,
        transaction_type: TransactionType,
        actor: &str,
    ) -> Result<(), TransactionError> {
        // A deleted party leaves nothing to restore; skip quietly.
        let Some(party) = Self::try_load_party(txn, tx).await? else {
            return Ok(());
        };
        let ctx = Self::ledger_context(tx, transaction_type);
        let effect = LedgerEngine::reverse(&ctx, party.balance, Utc::now().date_naive());
        Self::update_party_balance(txn, tx, effect.new_balance).await?;
        Self::insert_ledger_entry(txn, &effect.entry, actor).await
    }

    // ---------- VAT aggregation ----------

    async fn append_vat_items(
        txn: &DatabaseTransaction,
        tx: &transactions::Model,
        transaction_type: TransactionType,
        party_name: &str,
        actor: &str,
    ) -> Result<(), TransactionError> {
        let class = VatService::classify(transaction_type);
        let ctx = VatContext {
            transaction_id: tx.id,
            transaction_no: tx.transaction_no.clone(),
            party_id: tx.party_id,
            party_name: party_name.to_string(),
            party_kind: tx.party_kind.clone().into(),
            date: tx.date,
        };
        let vat_items = VatService::build_items(&ctx, &tx.items.0);
        if vat_items.is_empty() {
            return Ok(());
        }

        let (period_start, period_end) = VatService::month_bounds(tx.date);
        let report = vat_reports::Entity::find()
            .filter(vat_reports::Column::PeriodStart.eq(period_start))
            .filter(vat_reports::Column::PeriodEnd.eq(period_end))
            .filter(vat_reports::Column::Status.eq(enums::VatReportStatus::Draft))
            .lock_exclusive()
            .one(txn)
            .await?;

        match report {
            Some(report) => {
                let mut totals = VatTotals {
                    total_vat_output: report.total_vat_output,
                    total_vat_input: report.total_vat_input,
                    net_vat_payable: report.net_vat_payable,
                };
                totals.accumulate(class, &vat_items);

                let mut items = report.items.clone();
                items.0.extend(vat_items);

                let mut report = report.into_active_model();
                report.items = Set(items);
                report.total_vat_output = Set(totals.total_vat_output);
                report.total_vat_input = Set(totals.total_vat_input);
                report.net_vat_payable = Set(totals.net_vat_payable);
                report.updated_at = Set(Utc::now().into());
                report.update(txn).await?;
            }
            None => {
                let mut totals = VatTotals::default();
                totals.accumulate(class, &vat_items);

                let now = Utc::now().into();
                vat_reports::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    period_start: Set(period_start),
                    period_end: Set(period_end),
                    status: Set(enums::VatReportStatus::Draft),
                    generated_by: Set(actor.to_string()),
                    total_vat_output: Set(totals.total_vat_output),
                    total_vat_input: Set(totals.total_vat_input),
                    net_vat_payable: Set(totals.net_vat_payable),
                    items: Set(VatItems(vat_items)),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await?;
            }
        }
        Ok(())
    }

    // ---------- Companion purchase log ----------

    /// Missing logs are tolerated, matching the create-before-log history
    /// of older records.
    async fn set_purchase_log_status(
        txn: &DatabaseTransaction,
        transaction_no: &str,
        status: enums::PurchaseLogStatus,
    ) -> Result<(), TransactionError> {
        let log = purchase_logs::Entity::find()
            .filter(purchase_logs::Column::TransactionNo.eq(transaction_no))
            .one(txn)
            .await?;
        if let Some(log) = log {
            let mut log = log.into_active_model();
            log.status = Set(status);
            log.updated_at = Set(Utc::now().into());
            log.update(txn).await?;
        }
        Ok(())
    }

    // ---------- Numbering uniqueness ----------

    async fn ensure_transaction_no_free(
        txn: &DatabaseTransaction,
        transaction_no: &str,
    ) -> Result<(), TransactionError> {
        let existing = transactions::Entity::find()
            .filter(transactions::Column::TransactionNo.eq(transaction_no))
            .one(txn)
            .await?;
        if existing.is_some() {
            return Err(TransactionError::DuplicateTransactionNo(
                transaction_no.to_string(),
            ));
        }
        Ok(())
    }

    async fn ensure_order_number_free(
        txn: &DatabaseTransaction,
        order_number: &str,
    ) -> Result<(), TransactionError> {
        let existing = transactions::Entity::find()
            .filter(transactions::Column::OrderNumber.eq(order_number))
            .one(txn)
            .await?;
        if existing.is_some() {
            return Err(TransactionError::DuplicateOrderNumber(
                order_number.to_string(),
            ));
        }
        Ok(())
    }
}
