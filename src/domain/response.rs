use crate::domain::value::{OrderId, TransactionId};

/// Sale record embedded in `GetSale` / `GetSaleBatch` replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    pub order_id: Option<OrderId>,
    /// Secret code handed to the tourist on a completed SIM sale.
    pub code: Option<String>,
    /// Provider-side state of the sale, verbatim.
    pub state: Option<String>,
}

/// Decoded `SalePackage` / `SuppleCustInfo` reply. The success flag lives
/// under the reply's `Result` element for these operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleReply {
    pub value_ok: bool,
    pub order_id: Option<OrderId>,
    /// Reply body as received, kept for diagnostics.
    pub body: String,
}

/// Decoded `GetSale` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLookupReply {
    pub value_ok: bool,
    pub sale: Option<SaleRecord>,
    pub body: String,
}

/// Decoded `SaleRecharge` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RechargeReply {
    pub value_ok: bool,
    pub order_id: Option<OrderId>,
    pub body: String,
}

/// Decoded `GetBalance` reply. The balance is kept as the provider's decimal
/// text, never converted to a float.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReply {
    pub value_ok: bool,
    pub balance: Option<String>,
    pub body: String,
}

/// Decoded reply for operations whose success flag is top-level rather than
/// nested under `Result` (`ChangeAccountPassword`, `CancelSale`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckReply {
    pub value_ok: bool,
    pub body: String,
}

/// Decoded `SellBatchPackage` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReply {
    pub value_ok: bool,
    pub order_id: Option<OrderId>,
    pub body: String,
}

/// Decoded `GetSaleBatch` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStatusReply {
    pub value_ok: bool,
    pub sale: Option<SaleRecord>,
    pub body: String,
}

/// One entry of a reference-data listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
}

/// Decoded reference-data reply (packages, provinces, nationalities,
/// commercial offices, identification types).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReply {
    pub value_ok: bool,
    pub items: Vec<CatalogItem>,
    pub body: String,
}

/// Outcome of a tourist-SIM sale by identity document.
///
/// `done` is only true when the sale itself succeeded *and* the chained
/// `GetSale` lookup produced the sale record carrying the secret code; a sale
/// without its secret code is not a usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleOutcome {
    pub done: bool,
    pub order_id: Option<OrderId>,
    pub transaction_id: Option<TransactionId>,
    pub secret_code: Option<String>,
    pub response: SaleReply,
}

/// Outcome of a tourist-SIM sale against a physical card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSaleOutcome {
    pub done: bool,
    pub order_id: Option<OrderId>,
    pub transaction_id: Option<TransactionId>,
    pub response: SaleReply,
}

/// Outcome of a sale lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLookupOutcome {
    pub done: bool,
    pub secret_code: Option<String>,
    /// Provider sale state, lowercased.
    pub status: Option<String>,
    pub response: SaleLookupReply,
}

/// Outcome of a mobile recharge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RechargeOutcome {
    pub done: bool,
    pub order_id: Option<OrderId>,
    pub transaction_id: Option<TransactionId>,
    pub response: RechargeReply,
}

/// Outcome of a balance query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceOutcome {
    pub done: bool,
    pub balance: Option<String>,
    pub response: BalanceReply,
}

/// Outcome of an operation that only acknowledges (password change, cancels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckOutcome {
    pub done: bool,
    pub response: AckReply,
}

/// Outcome of a batch order request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOrderOutcome {
    pub done: bool,
    pub order_id: Option<OrderId>,
    pub response: BatchReply,
}

/// Outcome of a batch status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStatusOutcome {
    pub done: bool,
    /// Provider sale state, lowercased.
    pub status: Option<String>,
    pub response: BatchStatusReply,
}

/// Outcome of a reference-data lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOutcome {
    pub done: bool,
    pub items: Vec<CatalogItem>,
    pub response: CatalogReply,
}
