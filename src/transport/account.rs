use crate::domain::{AckReply, BalanceReply, Password, Ticket};
use crate::transport::envelope::{
    BodyWriter, TransportError, direct_value_ok, nested_value_ok, parse_payload,
};

pub fn encode_get_balance(ticket: &Ticket) -> String {
    let mut writer = BodyWriter::new("GetBalance");
    writer.leaf("SessionTicket", ticket.as_str());
    writer.finish()
}

pub fn decode_get_balance(xml: String) -> Result<BalanceReply, TransportError> {
    let payload = parse_payload(&xml)?;
    Ok(BalanceReply {
        value_ok: nested_value_ok(&payload),
        balance: payload.text_of("Balance").map(str::to_owned),
        body: xml,
    })
}

pub fn encode_change_password(ticket: &Ticket, old: &Password, new: &Password) -> String {
    let mut writer = BodyWriter::new("ChangeAccountPassword");
    writer.leaf("SessionTicket", ticket.as_str());
    writer.leaf("OldPassword", old.as_str());
    writer.leaf("NewPassword", new.as_str());
    writer.finish()
}

/// The password-change reply carries its success flag at the top level, not
/// under `Result`.
pub fn decode_change_password(xml: String) -> Result<AckReply, TransportError> {
    let payload = parse_payload(&xml)?;
    Ok(AckReply {
        value_ok: direct_value_ok(&payload),
        body: xml,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket::new("T-1").unwrap()
    }

    #[test]
    fn balance_reply_keeps_the_decimal_as_text() {
        let xml = r#"<GetBalanceResponse><GetBalanceResult>
            <Result><ValueOk>true</ValueOk></Result>
            <Balance>125.50</Balance>
        </GetBalanceResult></GetBalanceResponse>"#;

        let reply = decode_get_balance(xml.to_owned()).unwrap();
        assert!(reply.value_ok);
        assert_eq!(reply.balance.as_deref(), Some("125.50"));
        assert_eq!(reply.body, xml);
    }

    #[test]
    fn balance_decline_clears_the_flag() {
        let xml = r#"<GetBalanceResponse><GetBalanceResult>
            <Result><ValueOk>false</ValueOk></Result>
        </GetBalanceResult></GetBalanceResponse>"#;

        let reply = decode_get_balance(xml.to_owned()).unwrap();
        assert!(!reply.value_ok);
        assert_eq!(reply.balance, None);
    }

    #[test]
    fn change_password_reads_the_top_level_flag() {
        let xml = r#"<ChangeAccountPasswordResponse><ChangeAccountPasswordResult>
            <ValueOk>true</ValueOk>
        </ChangeAccountPasswordResult></ChangeAccountPasswordResponse>"#;

        let reply = decode_change_password(xml.to_owned()).unwrap();
        assert!(reply.value_ok);

        let nested_only = r#"<ChangeAccountPasswordResponse><ChangeAccountPasswordResult>
            <Result><ValueOk>true</ValueOk></Result>
        </ChangeAccountPasswordResult></ChangeAccountPasswordResponse>"#;

        let reply = decode_change_password(nested_only.to_owned()).unwrap();
        assert!(!reply.value_ok, "nested flag must not satisfy a top-level check");
    }

    #[test]
    fn change_password_envelope_is_flat() {
        let envelope = encode_change_password(
            &ticket(),
            &Password::new("old123").unwrap(),
            &Password::new("new456").unwrap(),
        );
        assert!(envelope.contains("<SessionTicket>T-1</SessionTicket>"));
        assert!(envelope.contains("<OldPassword>old123</OldPassword>"));
        assert!(envelope.contains("<NewPassword>new456</NewPassword>"));
    }
}
