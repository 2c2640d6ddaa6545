//! Initial database migration.
//!
//! Creates all enums, tables, and the uniqueness constraints the
//! allocator and orchestrator rely on.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: PARTIES & STOCK
        // ============================================================
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(VENDORS_SQL).await?;
        db.execute_unprepared(STOCKS_SQL).await?;

        // ============================================================
        // PART 3: SEQUENCES
        // ============================================================
        db.execute_unprepared(SEQUENCES_SQL).await?;

        // ============================================================
        // PART 4: TRANSACTIONS & COMPANION LOG
        // ============================================================
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(PURCHASE_LOGS_SQL).await?;

        // ============================================================
        // PART 5: MOVEMENT & PARTY LEDGERS
        // ============================================================
        db.execute_unprepared(INVENTORY_MOVEMENTS_SQL).await?;
        db.execute_unprepared(DEBIT_LOGS_SQL).await?;
        db.execute_unprepared(CREDIT_LOGS_SQL).await?;

        // ============================================================
        // PART 6: VAT REPORTS
        // ============================================================
        db.execute_unprepared(VAT_REPORTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Document types
CREATE TYPE transaction_type AS ENUM (
    'sales_order',
    'purchase_order',
    'sales_return',
    'purchase_return'
);

-- Transaction lifecycle statuses
CREATE TYPE transaction_status AS ENUM (
    'DRAFT',
    'APPROVED',
    'REJECTED',
    'CANCELLED',
    'PAID',
    'PARTIAL'
);

-- Counterparty kinds
CREATE TYPE party_kind AS ENUM ('Customer', 'Vendor');

-- Sequence buckets
CREATE TYPE sequence_type AS ENUM (
    'sales_order',
    'purchase_order',
    'sales_return',
    'purchase_return',
    'sales_invoice',
    'purchase_invoice'
);

-- Stock movement events
CREATE TYPE movement_event AS ENUM (
    'PURCHASE_RECEIVE',
    'SALES_DISPATCH',
    'PURCHASE_RETURN',
    'SALES_RETURN'
);

-- Ledger events (payments/adjustments come from the payments collaborator)
CREATE TYPE ledger_event_type AS ENUM (
    'sales_order',
    'purchase_order',
    'sales_return',
    'purchase_return',
    'payment_received',
    'payment_made',
    'adjustment'
);

-- Ledger entry settlement statuses
CREATE TYPE entry_status AS ENUM ('UNPAID', 'PARTIAL', 'PAID', 'REVERSED');

-- VAT report statuses
CREATE TYPE vat_report_status AS ENUM ('DRAFT', 'FINALIZED');

-- Purchase log statuses
CREATE TYPE purchase_log_status AS ENUM (
    'PENDING',
    'APPROVED',
    'REJECTED',
    'CANCELLED',
    'REVERSED'
);

-- Order priorities
CREATE TYPE priority AS ENUM ('Low', 'Medium', 'High');
";

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    id UUID PRIMARY KEY,
    customer_name TEXT NOT NULL,
    cash_balance NUMERIC(18, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const VENDORS_SQL: &str = r"
CREATE TABLE vendors (
    id UUID PRIMARY KEY,
    vendor_name TEXT NOT NULL,
    cash_balance NUMERIC(18, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const STOCKS_SQL: &str = r"
CREATE TABLE stocks (
    id UUID PRIMARY KEY,
    item_code TEXT NOT NULL UNIQUE,
    item_name TEXT NOT NULL,
    current_stock NUMERIC(18, 4) NOT NULL DEFAULT 0,
    purchase_price NUMERIC(18, 2) NOT NULL DEFAULT 0,
    batch_number TEXT,
    expiry_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const SEQUENCES_SQL: &str = r"
CREATE TABLE sequences (
    id UUID PRIMARY KEY,
    sequence_type sequence_type NOT NULL,
    period TEXT,
    prefix TEXT NOT NULL DEFAULT '',
    padding INTEGER NOT NULL DEFAULT 4,
    current BIGINT NOT NULL DEFAULT 0
);

-- One counter per bucket and period; NULL periods collide with each other.
-- The COALESCE expression makes the index usable as an ON CONFLICT target.
CREATE UNIQUE INDEX ux_sequences_type_period
    ON sequences (sequence_type, COALESCE(period, ''));
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    transaction_no TEXT NOT NULL,
    order_number TEXT,
    invoice_number TEXT,
    number_manual BOOLEAN NOT NULL DEFAULT FALSE,
    transaction_type transaction_type NOT NULL,
    party_id UUID NOT NULL,
    party_kind party_kind NOT NULL,
    vendor_reference TEXT,
    items JSONB NOT NULL DEFAULT '[]',
    total_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    status transaction_status NOT NULL DEFAULT 'DRAFT',
    date DATE NOT NULL,
    delivery_date DATE NOT NULL,
    terms TEXT NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT '',
    priority priority NOT NULL DEFAULT 'Medium',
    grn_generated BOOLEAN NOT NULL DEFAULT FALSE,
    invoice_generated BOOLEAN NOT NULL DEFAULT FALSE,
    credit_note_issued BOOLEAN NOT NULL DEFAULT FALSE,
    created_by TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Tracking numbers are unique, except the '0000' sales-order placeholder.
CREATE UNIQUE INDEX ux_transactions_transaction_no
    ON transactions (transaction_no)
    WHERE transaction_no <> '0000';

CREATE UNIQUE INDEX ux_transactions_order_number
    ON transactions (order_number)
    WHERE order_number IS NOT NULL;

CREATE INDEX ix_transactions_party ON transactions (party_id);
CREATE INDEX ix_transactions_status ON transactions (status);
";

const PURCHASE_LOGS_SQL: &str = r"
CREATE TABLE purchase_logs (
    id UUID PRIMARY KEY,
    transaction_no TEXT NOT NULL UNIQUE,
    vendor_id UUID NOT NULL REFERENCES vendors (id),
    date DATE NOT NULL,
    delivery_date DATE NOT NULL,
    items JSONB NOT NULL DEFAULT '[]',
    total_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    status purchase_log_status NOT NULL DEFAULT 'PENDING',
    terms TEXT NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT '',
    priority priority NOT NULL DEFAULT 'Medium',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const INVENTORY_MOVEMENTS_SQL: &str = r"
CREATE TABLE inventory_movements (
    id UUID PRIMARY KEY,
    item_id UUID NOT NULL REFERENCES stocks (id),
    quantity NUMERIC(18, 4) NOT NULL,
    previous_stock NUMERIC(18, 4) NOT NULL,
    new_stock NUMERIC(18, 4) NOT NULL,
    event_type movement_event NOT NULL,
    reference_id UUID NOT NULL,
    reference_number TEXT NOT NULL,
    unit_cost NUMERIC(18, 4) NOT NULL DEFAULT 0,
    total_value NUMERIC(18, 4) NOT NULL DEFAULT 0,
    notes TEXT NOT NULL DEFAULT '',
    batch_number TEXT,
    expiry_date DATE,
    is_reversed BOOLEAN NOT NULL DEFAULT FALSE,
    reversal_reference UUID,
    created_by TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX ix_inventory_movements_reference
    ON inventory_movements (reference_id, is_reversed);
CREATE INDEX ix_inventory_movements_item ON inventory_movements (item_id);
";

const DEBIT_LOGS_SQL: &str = r"
CREATE TABLE debit_logs (
    id UUID PRIMARY KEY,
    vendor_id UUID NOT NULL REFERENCES vendors (id),
    event_type ledger_event_type NOT NULL,
    date DATE NOT NULL,
    inv_no TEXT NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    paid NUMERIC(18, 2) NOT NULL DEFAULT 0,
    balance NUMERIC(18, 2) NOT NULL,
    reference TEXT NOT NULL DEFAULT '',
    status entry_status NOT NULL DEFAULT 'UNPAID',
    created_by TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX ix_debit_logs_vendor ON debit_logs (vendor_id, date);
";

const CREDIT_LOGS_SQL: &str = r"
CREATE TABLE credit_logs (
    id UUID PRIMARY KEY,
    customer_id UUID NOT NULL REFERENCES customers (id),
    event_type ledger_event_type NOT NULL,
    date DATE NOT NULL,
    inv_no TEXT NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    paid NUMERIC(18, 2) NOT NULL DEFAULT 0,
    balance NUMERIC(18, 2) NOT NULL,
    reference TEXT NOT NULL DEFAULT '',
    status entry_status NOT NULL DEFAULT 'UNPAID',
    created_by TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX ix_credit_logs_customer ON credit_logs (customer_id, date);
";

const VAT_REPORTS_SQL: &str = r"
CREATE TABLE vat_reports (
    id UUID PRIMARY KEY,
    period_start DATE NOT NULL,
    period_end DATE NOT NULL,
    status vat_report_status NOT NULL DEFAULT 'DRAFT',
    generated_by TEXT NOT NULL,
    total_vat_output NUMERIC(18, 2) NOT NULL DEFAULT 0,
    total_vat_input NUMERIC(18, 2) NOT NULL DEFAULT 0,
    net_vat_payable NUMERIC(18, 2) NOT NULL DEFAULT 0,
    items JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- One open draft per period.
CREATE UNIQUE INDEX ux_vat_reports_open_period
    ON vat_reports (period_start, period_end)
    WHERE status = 'DRAFT';
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS vat_reports;
DROP TABLE IF EXISTS credit_logs;
DROP TABLE IF EXISTS debit_logs;
DROP TABLE IF EXISTS inventory_movements;
DROP TABLE IF EXISTS purchase_logs;
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS sequences;
DROP TABLE IF EXISTS stocks;
DROP TABLE IF EXISTS vendors;
DROP TABLE IF EXISTS customers;

DROP TYPE IF EXISTS priority;
DROP TYPE IF EXISTS purchase_log_status;
DROP TYPE IF EXISTS vat_report_status;
DROP TYPE IF EXISTS entry_status;
DROP TYPE IF EXISTS ledger_event_type;
DROP TYPE IF EXISTS movement_event;
DROP TYPE IF EXISTS sequence_type;
DROP TYPE IF EXISTS party_kind;
DROP TYPE IF EXISTS transaction_status;
DROP TYPE IF EXISTS transaction_type;
";
