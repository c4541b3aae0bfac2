use crate::domain::{AccountId, Password, Ticket};
use crate::transport::envelope::{BodyWriter, TransportError, parse_payload};

pub fn encode_get_session_ticket(account_id: &str, password: &str) -> String {
    let mut writer = BodyWriter::new("GetSessionTicket");
    writer.leaf(AccountId::FIELD, account_id);
    writer.leaf(Password::FIELD, password);
    writer.finish()
}

/// Extract the ticket from the nested `SessionTicket/Ticket` reply structure.
pub fn decode_get_session_ticket(xml: &str) -> Result<Ticket, TransportError> {
    let payload = parse_payload(xml)?;
    let ticket = payload
        .descendant("SessionTicket")
        .and_then(|session| session.text_of("Ticket"))
        .ok_or(TransportError::Missing {
            path: "SessionTicket/Ticket",
        })?;
    Ticket::new(ticket).map_err(|_| TransportError::Missing {
        path: "SessionTicket/Ticket",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_carries_account_and_password() {
        let envelope = encode_get_session_ticket("acct", "s&cret");
        assert!(envelope.contains("<GetSessionTicket xmlns=\"http://tempuri.org/\">"));
        assert!(envelope.contains("<AccountId>acct</AccountId>"));
        assert!(envelope.contains("<Password>s&amp;cret</Password>"));
    }

    #[test]
    fn decode_extracts_the_nested_ticket() {
        let xml = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
            <s:Body>
                <GetSessionTicketResponse xmlns="http://tempuri.org/">
                    <GetSessionTicketResult>
                        <SessionTicket>
                            <Ticket>abc-123</Ticket>
                        </SessionTicket>
                    </GetSessionTicketResult>
                </GetSessionTicketResponse>
            </s:Body>
        </s:Envelope>"#;

        let ticket = decode_get_session_ticket(xml).unwrap();
        assert_eq!(ticket.as_str(), "abc-123");
    }

    #[test]
    fn decode_reports_a_missing_ticket() {
        let xml = r#"<GetSessionTicketResponse><GetSessionTicketResult>
            <SessionTicket></SessionTicket>
        </GetSessionTicketResult></GetSessionTicketResponse>"#;

        assert!(matches!(
            decode_get_session_ticket(xml),
            Err(TransportError::Missing { .. })
        ));
    }
}
