use crate::domain::{
    AckReply, Iccid, OrderId, PackageId, SaleLookupReply, SaleRecord, SaleReply, Ticket,
    TouristSimCardSale, TouristSimSale, TransactionId,
};
use crate::transport::envelope::{
    BodyWriter, Element, TransportError, direct_value_ok, nested_value_ok, parse_payload,
};

pub fn encode_sale_package(
    request: &TouristSimSale,
    ticket: &Ticket,
    transaction_id: &TransactionId,
    package: PackageId,
) -> String {
    let mut writer = BodyWriter::new("SalePackage");
    writer.open("PackageData");
    writer.open("Package");
    writer.leaf("Id", package.value());
    writer.leaf("PackageType", "S");
    writer.close("Package");
    writer.open("Client");
    writer.leaf("Id", request.passport());
    writer.leaf("Name", request.name());
    writer.open("CommercialOffice");
    writer.leaf("Id", request.office().value());
    writer.open("Province");
    writer.leaf("Id", request.province().value());
    writer.close("Province");
    writer.close("CommercialOffice");
    writer.open("IdentificationType");
    writer.leaf("Id", request.document_type().code());
    writer.close("IdentificationType");
    writer.leaf("ArrivalDate", request.arrival_date());
    writer.leaf("PickUpAirport", if request.pick_up_airport() { "S" } else { "N" });
    writer.open("Nationality");
    writer.leaf("Id", request.nationality().value());
    writer.close("Nationality");
    writer.close("Client");
    writer.close("PackageData");
    writer.open("SessionTicket");
    writer.leaf("Ticket", ticket.as_str());
    writer.close("SessionTicket");
    writer.leaf(TransactionId::FIELD, transaction_id.as_str());
    writer.finish()
}

pub fn decode_sale_package(xml: String) -> Result<SaleReply, TransportError> {
    let payload = parse_payload(&xml)?;
    Ok(SaleReply {
        value_ok: nested_value_ok(&payload),
        order_id: payload.u64_of("OrderId").map(OrderId::new),
        body: xml,
    })
}

pub fn encode_supple_cust_info(
    request: &TouristSimCardSale,
    ticket: &Ticket,
    transaction_id: &TransactionId,
) -> String {
    let mut writer = BodyWriter::new("SuppleCustInfo");
    writer.open("SessionTicket");
    writer.leaf("Ticket", ticket.as_str());
    writer.close("SessionTicket");
    writer.leaf("ArrivalDate", request.arrival_date());
    writer.leaf("CertificateID", request.document_number());
    writer.leaf("CertificateType", 9);
    writer.leaf("DateOfBirth", request.birth_date());
    writer.leaf("FirstLastName", request.last_name());
    writer.leaf("FirstName", request.first_name());
    writer.leaf("Gender", request.gender().code());
    writer.leaf("HomeAddress", request.address());
    writer.leaf(Iccid::FIELD, request.iccid().as_str());
    writer.leaf("NationalityID", request.nationality().value());
    writer.leaf(TransactionId::FIELD, transaction_id.as_str());
    writer.finish()
}

pub fn decode_supple_cust_info(xml: String) -> Result<SaleReply, TransportError> {
    decode_sale_package(xml)
}

pub fn encode_get_sale(
    ticket: &Ticket,
    order_id: OrderId,
    transaction_id: &TransactionId,
) -> String {
    let mut writer = BodyWriter::new("GetSale");
    writer.leaf("SessionTicket", ticket.as_str());
    writer.leaf(OrderId::FIELD, order_id);
    writer.leaf(TransactionId::FIELD, transaction_id.as_str());
    writer.finish()
}

pub fn decode_get_sale(xml: String) -> Result<SaleLookupReply, TransportError> {
    let payload = parse_payload(&xml)?;
    Ok(SaleLookupReply {
        value_ok: nested_value_ok(&payload),
        sale: payload.child("Sale").map(sale_record),
        body: xml,
    })
}

pub(crate) fn sale_record(sale: &Element) -> SaleRecord {
    SaleRecord {
        order_id: sale.u64_of("OrderId").map(OrderId::new),
        code: sale.text_of("Code").map(str::to_owned),
        state: sale.text_of("State").map(str::to_owned),
    }
}

pub fn encode_cancel_sale(
    ticket: &Ticket,
    order_id: OrderId,
    transaction_id: &TransactionId,
) -> String {
    let mut writer = BodyWriter::new("CancelSale");
    writer.open("SessionTicket");
    writer.leaf("Ticket", ticket.as_str());
    writer.close("SessionTicket");
    writer.leaf(OrderId::FIELD, order_id);
    writer.leaf(TransactionId::FIELD, transaction_id.as_str());
    writer.finish()
}

/// The cancel reply carries its success flag at the top level.
pub fn decode_cancel_sale(xml: String) -> Result<AckReply, TransportError> {
    let payload = parse_payload(&xml)?;
    Ok(AckReply {
        value_ok: direct_value_ok(&payload),
        body: xml,
    })
}
