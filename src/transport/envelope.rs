use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// Service namespace the provider publishes for both WCF contracts.
pub const SERVICE_NS: &str = "http://tempuri.org/";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid XML response: {0}")]
    Xml(String),

    #[error("response is missing expected element: {path}")]
    Missing { path: &'static str },

    #[error("SOAP fault: {0}")]
    Fault(Fault),
}

/// SOAP fault carried in a reply body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub code: Option<String>,
    pub message: String,
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{code}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Reply element tree with namespace prefixes stripped.
///
/// Provider replies are small; a plain owned tree keeps the per-operation
/// decoders trivial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn named(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Trimmed text content of a direct child.
    pub fn text_of(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.trim())
    }

    /// Boolean flag in a direct child; the provider emits `true`/`false`,
    /// some endpoints emit `1`/`0`.
    pub fn bool_of(&self, name: &str) -> bool {
        self.text_of(name)
            .is_some_and(|text| text.eq_ignore_ascii_case("true") || text == "1")
    }

    /// Unsigned integer in a direct child.
    pub fn u64_of(&self, name: &str) -> Option<u64> {
        self.text_of(name).and_then(|text| text.parse().ok())
    }

    /// Depth-first search for the first descendant with the given local name.
    pub fn descendant(&self, name: &str) -> Option<&Element> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.descendant(name) {
                return Some(found);
            }
        }
        None
    }
}

/// Parse a reply document and return the operation payload: the `*Result`
/// element of the response when present, the response element otherwise.
///
/// A `Fault` in the body is surfaced as [`TransportError::Fault`].
pub fn parse_payload(xml: &str) -> Result<Element, TransportError> {
    let document = parse_document(xml)?;
    let response = if document.name == "Envelope" {
        let body = document
            .child("Body")
            .ok_or(TransportError::Missing { path: "Body" })?;
        body.children
            .first()
            .ok_or(TransportError::Missing { path: "Body" })?
    } else {
        &document
    };

    if response.name == "Fault" {
        return Err(TransportError::Fault(parse_fault(response)));
    }

    // WCF wraps the payload in `<OperationResponse><OperationResult>`.
    let payload = match response.children.as_slice() {
        [only] if only.name.ends_with("Result") && only.name != "Result" => only,
        _ => response,
    };
    Ok(payload.clone())
}

fn parse_fault(fault: &Element) -> Fault {
    let code = fault
        .text_of("faultcode")
        .filter(|code| !code.is_empty())
        .map(str::to_owned);
    let message = fault
        .text_of("faultstring")
        .unwrap_or("unknown SOAP fault")
        .to_owned();
    Fault { code, message }
}

fn parse_document(xml: &str) -> Result<Element, TransportError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(Element::named(local_name(start.local_name().as_ref())));
            }
            Ok(Event::Empty(start)) => {
                let element = Element::named(local_name(start.local_name().as_ref()));
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                let decoded = text
                    .unescape()
                    .map_err(|err| TransportError::Xml(err.to_string()))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&decoded);
                }
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| TransportError::Xml("unbalanced end tag".to_owned()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(TransportError::Xml(err.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(TransportError::Xml("unclosed element".to_owned()));
    }
    root.ok_or_else(|| TransportError::Xml("empty document".to_owned()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), TransportError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(TransportError::Xml(
            "multiple root elements".to_owned(),
        ));
    }
    Ok(())
}

fn local_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// Success flag nested under the reply's `Result` element, the layout used by
/// the sale, recharge, balance, batch, and reference-data replies.
pub fn nested_value_ok(payload: &Element) -> bool {
    payload
        .child("Result")
        .is_some_and(|result| result.bool_of("ValueOk"))
}

/// Success flag sitting directly on the payload, the layout used by the
/// cancel and password-change replies. The irregularity is the provider's;
/// keep the two accessors separate rather than papering over it.
pub fn direct_value_ok(payload: &Element) -> bool {
    payload.bool_of("ValueOk")
}

/// Incremental writer for one operation's request envelope.
pub struct BodyWriter {
    operation: &'static str,
    buf: String,
}

impl BodyWriter {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            buf: String::new(),
        }
    }

    pub fn open(&mut self, tag: &str) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    pub fn leaf(&mut self, tag: &str, value: impl std::fmt::Display) -> &mut Self {
        self.open(tag);
        self.buf.push_str(&escape(&value.to_string()));
        self.close(tag)
    }

    /// Wrap the accumulated body in the SOAP 1.1 envelope.
    pub fn finish(self) -> String {
        format!(
            concat!(
                r#"<s:Envelope xmlns:s="{env}">"#,
                "<s:Body>",
                r#"<{op} xmlns="{ns}">{body}</{op}>"#,
                "</s:Body>",
                "</s:Envelope>"
            ),
            env = SOAP_ENV_NS,
            ns = SERVICE_NS,
            op = self.operation,
            body = self.buf,
        )
    }
}
