//! Transport layer: SOAP envelopes and wire-format details.

mod account;
mod batch;
mod catalog;
mod envelope;
mod recharge;
mod sale;
mod session;

pub use account::{
    decode_change_password, decode_get_balance, encode_change_password, encode_get_balance,
};
pub use batch::{
    decode_get_sale_batch, decode_sell_batch_package, encode_get_sale_batch,
    encode_sell_batch_package,
};
pub use catalog::{decode_catalog, encode_catalog, encode_identification_types};
pub use envelope::{Fault, TransportError};
pub use recharge::{decode_sale_recharge, encode_sale_recharge};
pub use sale::{
    decode_cancel_sale, decode_get_sale, decode_sale_package, decode_supple_cust_info,
    encode_cancel_sale, encode_get_sale, encode_sale_package, encode_supple_cust_info,
};
pub use session::{decode_get_session_ticket, encode_get_session_ticket};
