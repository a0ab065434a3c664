//! Conversions between domain models and the wire DTOs in `shared`.
//!
//! The sign convention is normalized here: the wire may carry signed values,
//! the domain always carries a magnitude plus a flow direction. Flow is
//! re-derived from the description kind on ingest so the two can never
//! disagree inside the client, whatever the server sent.

use shared::{
    PaginatedTransactionsDto, SummaryBreakdownDto, TransactionDescDto, TransactionDto,
    TransactionInputDto, TransactionSummaryDto, TransactionTypeDto, TransactionUpdateInputDto,
};
use tracing::warn;

use crate::domain::commands::{CreateTransactionCommand, TransactionPage, UpdateTransactionCommand};
use crate::domain::models::{
    FlowDirection, KindBreakdown, Transaction, TransactionKind, TransactionSummary,
};

pub fn kind_from_wire(desc: TransactionDescDto) -> TransactionKind {
    match desc {
        TransactionDescDto::Deposit => TransactionKind::Deposit,
        TransactionDescDto::Payment => TransactionKind::Payment,
        TransactionDescDto::Transfer => TransactionKind::Transfer,
        TransactionDescDto::Withdrawal => TransactionKind::Withdrawal,
    }
}

pub fn kind_to_wire(kind: TransactionKind) -> TransactionDescDto {
    match kind {
        TransactionKind::Deposit => TransactionDescDto::Deposit,
        TransactionKind::Payment => TransactionDescDto::Payment,
        TransactionKind::Transfer => TransactionDescDto::Transfer,
        TransactionKind::Withdrawal => TransactionDescDto::Withdrawal,
    }
}

pub fn flow_to_wire(flow: FlowDirection) -> TransactionTypeDto {
    match flow {
        FlowDirection::Inflow => TransactionTypeDto::Inflow,
        FlowDirection::Outflow => TransactionTypeDto::Outflow,
    }
}

/// Wire record to domain model, normalizing value sign and flow direction.
pub fn transaction_from_wire(dto: TransactionDto) -> Transaction {
    let kind = kind_from_wire(dto.desc);
    let derived = flow_to_wire(kind.flow());
    if dto.flow != derived {
        warn!(
            id = %dto.id,
            "transaction flow from server disagrees with its kind; using derived direction"
        );
    }
    Transaction {
        id: dto.id,
        alias: dto.alias,
        date: dto.date,
        kind,
        flow: kind.flow(),
        value: dto.value.abs(),
    }
}

pub fn page_from_wire(dto: PaginatedTransactionsDto) -> TransactionPage {
    TransactionPage {
        items: dto.items.into_iter().map(transaction_from_wire).collect(),
        page: dto.page,
        has_more: dto.has_more,
        total: dto.total,
    }
}

pub fn create_to_wire(cmd: CreateTransactionCommand) -> TransactionInputDto {
    TransactionInputDto {
        alias: cmd.alias,
        date: cmd.date,
        desc: kind_to_wire(cmd.kind),
        flow: flow_to_wire(cmd.kind.flow()),
        value: cmd.value,
    }
}

pub fn update_to_wire(cmd: UpdateTransactionCommand) -> TransactionUpdateInputDto {
    TransactionUpdateInputDto {
        alias: cmd.alias,
        date: cmd.date,
        desc: cmd.kind.map(kind_to_wire),
        flow: cmd.kind.map(|k| flow_to_wire(k.flow())),
        value: cmd.value,
    }
}

pub fn summary_from_wire(dto: TransactionSummaryDto) -> TransactionSummary {
    let SummaryBreakdownDto {
        deposit,
        payment,
        transfer,
        withdrawal,
    } = dto.breakdown;
    TransactionSummary {
        balance: dto.balance,
        breakdown: KindBreakdown {
            deposit,
            payment,
            transfer,
            withdrawal,
        },
    }
}
