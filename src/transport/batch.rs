use crate::domain::{BatchOrder, BatchReply, BatchStatusReply, OrderId, Ticket, TransactionId};
use crate::transport::envelope::{BodyWriter, TransportError, nested_value_ok, parse_payload};
use crate::transport::sale::sale_record;

pub fn encode_sell_batch_package(
    order: &BatchOrder,
    ticket: &Ticket,
    transaction_id: &TransactionId,
) -> String {
    let mut writer = BodyWriter::new("SellBatchPackage");
    writer.open("BatchData");
    writer.leaf("PackageId", order.package().value());
    writer.leaf("Quantity", order.quantity());
    writer.leaf("CommercialOfficeId", order.office().value());
    writer.leaf("DeliveryDate", order.delivery_date());
    writer.close("BatchData");
    writer.open("SessionTicket");
    writer.leaf("Ticket", ticket.as_str());
    writer.close("SessionTicket");
    writer.leaf(TransactionId::FIELD, transaction_id.as_str());
    writer.finish()
}

pub fn decode_sell_batch_package(xml: String) -> Result<BatchReply, TransportError> {
    let payload = parse_payload(&xml)?;
    Ok(BatchReply {
        value_ok: nested_value_ok(&payload),
        order_id: payload.u64_of("OrderId").map(OrderId::new),
        body: xml,
    })
}

pub fn encode_get_sale_batch(
    ticket: &Ticket,
    order_id: OrderId,
    transaction_id: &TransactionId,
) -> String {
    let mut writer = BodyWriter::new("GetSaleBatch");
    writer.leaf("SessionTicket", ticket.as_str());
    writer.leaf(OrderId::FIELD, order_id);
    writer.leaf(TransactionId::FIELD, transaction_id.as_str());
    writer.finish()
}

pub fn decode_get_sale_batch(xml: String) -> Result<BatchStatusReply, TransportError> {
    let payload = parse_payload(&xml)?;
    Ok(BatchStatusReply {
        value_ok: nested_value_ok(&payload),
        sale: payload.child("Sale").map(sale_record),
        body: xml,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OfficeId, PackageId};

    #[test]
    fn batch_envelope_nests_the_order_data() {
        let order = BatchOrder::new(PackageId::new(123), 50, OfficeId::new(10), "2025-08-01")
            .unwrap();
        let ticket = Ticket::new("T-1").unwrap();
        let txn = TransactionId::new("1627891234567890").unwrap();

        let envelope = encode_sell_batch_package(&order, &ticket, &txn);
        assert!(envelope.contains("<BatchData><PackageId>123</PackageId><Quantity>50</Quantity>"));
        assert!(envelope.contains("<CommercialOfficeId>10</CommercialOfficeId>"));
        assert!(envelope.contains("<DeliveryDate>2025-08-01</DeliveryDate>"));
        assert!(envelope.contains("<SessionTicket><Ticket>T-1</Ticket></SessionTicket>"));
    }

    #[test]
    fn decode_batch_order_reads_the_order_id() {
        let xml = r#"<SellBatchPackageResponse><SellBatchPackageResult>
            <Result><ValueOk>true</ValueOk></Result>
            <OrderId>9001</OrderId>
        </SellBatchPackageResult></SellBatchPackageResponse>"#;

        let reply = decode_sell_batch_package(xml.to_owned()).unwrap();
        assert!(reply.value_ok);
        assert_eq!(reply.order_id, Some(OrderId::new(9001)));
    }

    #[test]
    fn decode_batch_status_reads_the_sale_record() {
        let xml = r#"<GetSaleBatchResponse><GetSaleBatchResult>
            <Result><ValueOk>true</ValueOk></Result>
            <Sale>
                <OrderId>9001</OrderId>
                <State>Delivered</State>
            </Sale>
        </GetSaleBatchResult></GetSaleBatchResponse>"#;

        let reply = decode_get_sale_batch(xml.to_owned()).unwrap();
        assert!(reply.value_ok);
        let sale = reply.sale.unwrap();
        assert_eq!(sale.order_id, Some(OrderId::new(9001)));
        assert_eq!(sale.state.as_deref(), Some("Delivered"));
        assert_eq!(sale.code, None);
    }
}
