use crate::domain::{CatalogItem, CatalogReply, ProvinceId, Ticket};
use crate::transport::envelope::{
    BodyWriter, Element, TransportError, nested_value_ok, parse_payload,
};

/// Reference-data requests all share the same flat shape: the session ticket
/// plus, for commercial offices, an optional province filter.
pub fn encode_catalog(operation: &'static str, ticket: &Ticket, province: Option<ProvinceId>) -> String {
    let mut writer = BodyWriter::new(operation);
    writer.leaf("SessionTicket", ticket.as_str());
    if let Some(province) = province {
        writer.leaf("ProvinceId", province.value());
    }
    writer.finish()
}

/// The identification-types request nests its ticket, unlike its siblings.
pub fn encode_identification_types(ticket: &Ticket) -> String {
    let mut writer = BodyWriter::new("GetIdentificationTypes");
    writer.open("SessionTicket");
    writer.leaf("Ticket", ticket.as_str());
    writer.close("SessionTicket");
    writer.finish()
}

/// Reference-data listings differ only in the container element name, so a
/// single decoder collects every entry carrying an `Id` and a `Name`.
pub fn decode_catalog(xml: String) -> Result<CatalogReply, TransportError> {
    let payload = parse_payload(&xml)?;
    let mut items = Vec::new();
    collect_items(&payload, &mut items);
    Ok(CatalogReply {
        value_ok: nested_value_ok(&payload),
        items,
        body: xml,
    })
}

fn collect_items(element: &Element, items: &mut Vec<CatalogItem>) {
    for child in &element.children {
        if child.name == "Result" {
            continue;
        }
        if let (Some(id), Some(name)) = (child.text_of("Id"), child.text_of("Name")) {
            items.push(CatalogItem {
                id: id.to_owned(),
                name: name.to_owned(),
            });
        } else {
            collect_items(child, items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket::new("T-1").unwrap()
    }

    #[test]
    fn catalog_request_is_flat_with_optional_province() {
        let envelope = encode_catalog("GetCommercialOffices", &ticket(), Some(ProvinceId::new(10)));
        assert!(envelope.contains("<GetCommercialOffices xmlns=\"http://tempuri.org/\">"));
        assert!(envelope.contains("<SessionTicket>T-1</SessionTicket>"));
        assert!(envelope.contains("<ProvinceId>10</ProvinceId>"));

        let envelope = encode_catalog("GetProvinces", &ticket(), None);
        assert!(!envelope.contains("ProvinceId"));
    }

    #[test]
    fn identification_types_request_nests_the_ticket() {
        let envelope = encode_identification_types(&ticket());
        assert!(envelope.contains("<SessionTicket><Ticket>T-1</Ticket></SessionTicket>"));
    }

    #[test]
    fn decode_collects_id_name_pairs() {
        let xml = r#"<GetProvincesResponse><GetProvincesResult>
            <Result><ValueOk>true</ValueOk></Result>
            <Provinces>
                <Province><Id>1</Id><Name>Pinar del Rio</Name></Province>
                <Province><Id>2</Id><Name>Artemisa</Name></Province>
            </Provinces>
        </GetProvincesResult></GetProvincesResponse>"#;

        let reply = decode_catalog(xml.to_owned()).unwrap();
        assert!(reply.value_ok);
        assert_eq!(reply.items.len(), 2);
        assert_eq!(reply.items[0].id, "1");
        assert_eq!(reply.items[0].name, "Pinar del Rio");
        assert_eq!(reply.items[1].name, "Artemisa");
    }

    #[test]
    fn decline_yields_no_items() {
        let xml = r#"<GetProvincesResponse><GetProvincesResult>
            <Result><ValueOk>false</ValueOk><Message>expired ticket</Message></Result>
        </GetProvincesResult></GetProvincesResponse>"#;

        let reply = decode_catalog(xml.to_owned()).unwrap();
        assert!(!reply.value_ok);
        assert!(reply.items.is_empty());
    }
}
