//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{BatchOrder, Recharge, TouristSimCardSale, TouristSimSale};
pub use response::{
    AckOutcome, AckReply, BalanceOutcome, BalanceReply, BatchOrderOutcome, BatchReply,
    BatchStatusOutcome, BatchStatusReply, CardSaleOutcome, CatalogItem, CatalogOutcome,
    CatalogReply, RechargeOutcome, RechargeReply, SaleLookupOutcome, SaleLookupReply, SaleOutcome,
    SaleRecord, SaleReply,
};
pub use validation::ValidationError;
pub use value::{
    AccountId, DocumentType, Gender, Iccid, NationalityId, OfficeId, OrderId, PackageId, Password,
    PhoneNumber, ProductCode, ProvinceId, RawPhoneNumber, Ticket, TransactionId,
};
