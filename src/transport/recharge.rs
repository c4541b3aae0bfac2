use crate::domain::{OrderId, ProductCode, RawPhoneNumber, Recharge, RechargeReply, Ticket, TransactionId};
use crate::transport::envelope::{BodyWriter, TransportError, nested_value_ok, parse_payload};

pub fn encode_sale_recharge(
    request: &Recharge,
    ticket: &Ticket,
    transaction_id: &TransactionId,
) -> String {
    let mut writer = BodyWriter::new("SaleRecharge");
    writer.leaf("SessionTicket", ticket.as_str());
    writer.leaf(TransactionId::FIELD, transaction_id.as_str());
    writer.open("RechargeData");
    writer.leaf(RawPhoneNumber::FIELD, request.phone().raw());
    writer.leaf("Price", request.price());
    writer.leaf(ProductCode::FIELD, request.product_code().value());
    writer.close("RechargeData");
    writer.finish()
}

pub fn decode_sale_recharge(xml: String) -> Result<RechargeReply, TransportError> {
    let payload = parse_payload(&xml)?;
    Ok(RechargeReply {
        value_ok: nested_value_ok(&payload),
        order_id: payload.u64_of("OrderId").map(OrderId::new),
        body: xml,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductCode, RawPhoneNumber};

    #[test]
    fn recharge_envelope_sends_bare_digits() {
        let request = Recharge::new(
            RawPhoneNumber::new("+5351234567").unwrap(),
            10.0,
            ProductCode::new(101),
        )
        .unwrap();
        let ticket = Ticket::new("T-1").unwrap();
        let txn = TransactionId::new("1627891234567890").unwrap();

        let envelope = encode_sale_recharge(&request, &ticket, &txn);
        assert!(envelope.contains("<PhoneNumber>5351234567</PhoneNumber>"));
        assert!(!envelope.contains('+'));
        assert!(envelope.contains("<Price>10</Price>"));
        assert!(envelope.contains("<ProductCode>101</ProductCode>"));
        assert!(envelope.contains("<SessionTicket>T-1</SessionTicket>"));
    }

    #[test]
    fn decode_reads_nested_flag_and_order() {
        let xml = r#"<SaleRechargeResponse><SaleRechargeResult>
            <Result><ValueOk>true</ValueOk></Result>
            <OrderId>77</OrderId>
        </SaleRechargeResult></SaleRechargeResponse>"#;

        let reply = decode_sale_recharge(xml.to_owned()).unwrap();
        assert!(reply.value_ok);
        assert_eq!(reply.order_id, Some(OrderId::new(77)));
    }

    #[test]
    fn decline_has_no_order() {
        let xml = r#"<SaleRechargeResponse><SaleRechargeResult>
            <Result><ValueOk>false</ValueOk></Result>
        </SaleRechargeResult></SaleRechargeResponse>"#;

        let reply = decode_sale_recharge(xml.to_owned()).unwrap();
        assert!(!reply.value_ok);
        assert_eq!(reply.order_id, None);
    }
}
