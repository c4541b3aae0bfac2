//! Client layer: authenticates once, then maps each action to one remote
//! SOAP operation and normalizes the reply.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::{self, ConfigError, SdkConfig};
use crate::domain::{
    AccountId, AckOutcome, BalanceOutcome, BatchOrder, BatchOrderOutcome, BatchStatusOutcome,
    CardSaleOutcome, CatalogOutcome, OrderId, PackageId, Password, ProvinceId, Recharge,
    RechargeOutcome, SaleLookupOutcome, SaleOutcome, Ticket, TouristSimCardSale, TouristSimSale,
    TransactionId, ValidationError,
};
use crate::transport::{self, Fault, TransportError};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

const AUTHENTICATE: &str = "authenticate";
const AUTHENTICATE_SOAP_ACTION: &str =
    "http://tempuri.org/IAuthenticationService/GetSessionTicket";

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait SoapTransport: Send + Sync {
    fn post_envelope<'a>(
        &'a self,
        url: &'a str,
        soap_action: &'static str,
        envelope: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl SoapTransport for ReqwestTransport {
    fn post_envelope<'a>(
        &'a self,
        url: &'a str,
        soap_action: &'static str,
        envelope: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header("Content-Type", "text/xml; charset=utf-8")
                .header("SOAPAction", format!("\"{soap_action}\""))
                .body(envelope)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Closed set of supported actions. Every variant maps to exactly one remote
/// operation; the two cancel actions share the provider's generic
/// `CancelSale` procedure.
pub enum Action {
    SaleTouristSim,
    SaleTouristSimCard,
    Services,
    Provinces,
    Nationalities,
    Offices,
    IdentificationTypes,
    SaleQuery,
    Recharge,
    Balance,
    ChangePassword,
    BatchOrder,
    BatchQuery,
    BatchCancel,
    SaleCancel,
}

impl Action {
    /// Stable action identifier used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::SaleTouristSim => "sale_tourist_sim",
            Self::SaleTouristSimCard => "sale_tourist_sim_card",
            Self::Services => "services",
            Self::Provinces => "provinces",
            Self::Nationalities => "nationalities",
            Self::Offices => "offices",
            Self::IdentificationTypes => "identification_types",
            Self::SaleQuery => "sale",
            Self::Recharge => "recharge",
            Self::Balance => "balance",
            Self::ChangePassword => "change_password",
            Self::BatchOrder => "request_batch",
            Self::BatchQuery => "batch_status",
            Self::BatchCancel => "cancel_batch",
            Self::SaleCancel => "cancel_sale",
        }
    }

    /// Remote operation invoked for this action.
    pub fn operation(self) -> &'static str {
        match self {
            Self::SaleTouristSim => "SalePackage",
            Self::SaleTouristSimCard => "SuppleCustInfo",
            Self::Services => "GetPackages",
            Self::Provinces => "GetProvinces",
            Self::Nationalities => "GetNationalities",
            Self::Offices => "GetCommercialOffices",
            Self::IdentificationTypes => "GetIdentificationTypes",
            Self::SaleQuery => "GetSale",
            Self::Recharge => "SaleRecharge",
            Self::Balance => "GetBalance",
            Self::ChangePassword => "ChangeAccountPassword",
            Self::BatchOrder => "SellBatchPackage",
            Self::BatchQuery => "GetSaleBatch",
            Self::BatchCancel => "CancelSale",
            Self::SaleCancel => "CancelSale",
        }
    }

    /// Password changes go through the authentication service; everything
    /// else through the sales service.
    fn targets_auth_service(self) -> bool {
        matches!(self, Self::ChangePassword)
    }

    fn soap_action(self) -> &'static str {
        match self {
            Self::SaleTouristSim => "http://tempuri.org/ISalesService/SalePackage",
            Self::SaleTouristSimCard => "http://tempuri.org/ISalesService/SuppleCustInfo",
            Self::Services => "http://tempuri.org/ISalesService/GetPackages",
            Self::Provinces => "http://tempuri.org/ISalesService/GetProvinces",
            Self::Nationalities => "http://tempuri.org/ISalesService/GetNationalities",
            Self::Offices => "http://tempuri.org/ISalesService/GetCommercialOffices",
            Self::IdentificationTypes => {
                "http://tempuri.org/ISalesService/GetIdentificationTypes"
            }
            Self::SaleQuery => "http://tempuri.org/ISalesService/GetSale",
            Self::Recharge => "http://tempuri.org/ISalesService/SaleRecharge",
            Self::Balance => "http://tempuri.org/ISalesService/GetBalance",
            Self::ChangePassword => {
                "http://tempuri.org/IAuthenticationService/ChangeAccountPassword"
            }
            Self::BatchOrder => "http://tempuri.org/ISalesService/SellBatchPackage",
            Self::BatchQuery => "http://tempuri.org/ISalesService/GetSaleBatch",
            Self::BatchCancel => "http://tempuri.org/ISalesService/CancelSale",
            Self::SaleCancel => "http://tempuri.org/ISalesService/CancelSale",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ValidationError;

    /// Resolve an action by its identifier. Unknown identifiers fail here,
    /// before any request is built or sent.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "sale_tourist_sim" => Ok(Self::SaleTouristSim),
            "sale_tourist_sim_card" => Ok(Self::SaleTouristSimCard),
            "services" => Ok(Self::Services),
            "provinces" => Ok(Self::Provinces),
            "nationalities" => Ok(Self::Nationalities),
            "offices" => Ok(Self::Offices),
            "identification_types" => Ok(Self::IdentificationTypes),
            "sale" => Ok(Self::SaleQuery),
            "recharge" => Ok(Self::Recharge),
            "balance" => Ok(Self::Balance),
            "change_password" => Ok(Self::ChangePassword),
            "request_batch" => Ok(Self::BatchOrder),
            "batch_status" => Ok(Self::BatchQuery),
            "cancel_batch" => Ok(Self::BatchCancel),
            "cancel_sale" => Ok(Self::SaleCancel),
            _ => Err(ValidationError::UnknownAction {
                input: input.to_owned(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`CubacelClient`].
///
/// Provider declines are not errors; they come back as `done: false`
/// envelopes. This type covers transport failures, SOAP faults, unparseable
/// replies, rejected inputs, and configuration problems.
pub enum CubacelError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error calling {action}: {source}")]
    Transport {
        action: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status calling {action}: {status}")]
    HttpStatus {
        action: &'static str,
        status: u16,
        body: Option<String>,
    },

    /// The provider answered with a SOAP fault.
    #[error("SOAP fault calling {action}: {fault}")]
    Fault { action: &'static str, fault: Fault },

    /// Reply body could not be parsed as the expected format.
    #[error("invalid reply from {action}: {source}")]
    Parse {
        action: &'static str,
        #[source]
        source: TransportError,
    },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Loading or rewriting the credential file failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone)]
/// Builder for [`CubacelClient`].
///
/// Use this when you need to override the derived service endpoints, the
/// timeout, or the user-agent.
pub struct CubacelClientBuilder {
    config: SdkConfig,
    auth_endpoint: Option<String>,
    sales_endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CubacelClientBuilder {
    pub fn new(config: SdkConfig) -> Self {
        Self {
            config,
            auth_endpoint: None,
            sales_endpoint: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the authentication service endpoint.
    pub fn auth_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.auth_endpoint = Some(endpoint.into());
        self
    }

    /// Override the sales service endpoint.
    pub fn sales_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sales_endpoint = Some(endpoint.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the HTTP client and authenticate. Fails outright when the
    /// session ticket cannot be obtained; there is no retry.
    pub async fn connect(self) -> Result<CubacelClient, CubacelError> {
        let (derived_auth, derived_sales) = service_endpoints(&self.config.host)?;
        let auth_endpoint = self.auth_endpoint.unwrap_or(derived_auth);
        let sales_endpoint = self.sales_endpoint.unwrap_or(derived_sales);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(|err| CubacelError::Transport {
            action: AUTHENTICATE,
            source: Box::new(err),
        })?;

        CubacelClient::authenticate(
            self.config,
            auth_endpoint,
            sales_endpoint,
            Arc::new(ReqwestTransport { client }),
        )
        .await
    }
}

/// Derive the two WCF service endpoints from the configured host.
fn service_endpoints(host: &str) -> Result<(String, String), ValidationError> {
    let trimmed = host.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|_| ValidationError::InvalidHost {
        input: host.to_owned(),
    })?;
    if !url.has_host() {
        return Err(ValidationError::InvalidHost {
            input: host.to_owned(),
        });
    }
    let base = url.as_str().trim_end_matches('/').to_owned();
    Ok((
        format!("{base}/VirtualPayment/AuthenticationService.svc"),
        format!("{base}/VirtualPayment/SalesService.svc"),
    ))
}

/// High-level Cubacel client.
///
/// Authenticates once at construction and reuses the obtained session ticket
/// for every call. The ticket is never renewed; once it expires server-side,
/// the next call surfaces whatever fault the provider returns.
///
/// One instance per logical account session, used from one logical thread of
/// control. Every method is a single awaited round trip with no internal
/// retries.
#[derive(Clone)]
pub struct CubacelClient {
    config: SdkConfig,
    ticket: Ticket,
    auth_endpoint: String,
    sales_endpoint: String,
    http: Arc<dyn SoapTransport>,
}

impl std::fmt::Debug for CubacelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CubacelClient")
            .field("config", &self.config)
            .field("ticket", &self.ticket)
            .field("auth_endpoint", &self.auth_endpoint)
            .field("sales_endpoint", &self.sales_endpoint)
            .finish_non_exhaustive()
    }
}

impl CubacelClient {
    /// Authenticate against the derived endpoints with default HTTP settings.
    ///
    /// For more customization, use [`CubacelClient::builder`].
    pub async fn connect(config: SdkConfig) -> Result<Self, CubacelError> {
        CubacelClientBuilder::new(config).connect().await
    }

    /// Start building a client with custom settings.
    pub fn builder(config: SdkConfig) -> CubacelClientBuilder {
        CubacelClientBuilder::new(config)
    }

    /// The session ticket obtained at construction.
    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    /// The settings this client was built from.
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    async fn authenticate(
        config: SdkConfig,
        auth_endpoint: String,
        sales_endpoint: String,
        http: Arc<dyn SoapTransport>,
    ) -> Result<Self, CubacelError> {
        let account = AccountId::new(&config.username)?;
        let envelope = transport::encode_get_session_ticket(account.as_str(), &config.password);
        if config.verbose {
            tracing::info!(account = account.as_str(), "GetSessionTicket request");
        }

        let response = http
            .post_envelope(&auth_endpoint, AUTHENTICATE_SOAP_ACTION, envelope)
            .await
            .map_err(|source| {
                tracing::error!(action = AUTHENTICATE, error = %source, "transport failure");
                CubacelError::Transport {
                    action: AUTHENTICATE,
                    source,
                }
            })?;
        check_http_status(AUTHENTICATE, response.status, &response.body)?;

        let ticket = transport::decode_get_session_ticket(&response.body)
            .map_err(|err| wire_error(AUTHENTICATE, err))?;
        if config.verbose {
            tracing::info!("GetSessionTicket response received");
        }

        Ok(Self {
            config,
            ticket,
            auth_endpoint,
            sales_endpoint,
            http,
        })
    }

    /// Send one action's envelope to its service and return the raw reply
    /// body. At-most-once: no retry, no backoff.
    async fn execute(&self, action: Action, envelope: String) -> Result<String, CubacelError> {
        let endpoint = if action.targets_auth_service() {
            &self.auth_endpoint
        } else {
            &self.sales_endpoint
        };

        if self.config.verbose {
            tracing::info!(action = action.name(), request = %envelope, "request");
        }

        let response = self
            .http
            .post_envelope(endpoint, action.soap_action(), envelope)
            .await
            .map_err(|source| {
                tracing::error!(action = action.name(), error = %source, "transport failure");
                CubacelError::Transport {
                    action: action.name(),
                    source,
                }
            })?;
        check_http_status(action.name(), response.status, &response.body)?;

        if self.config.verbose {
            tracing::info!(action = action.name(), response = %response.body, "reply");
        }
        Ok(response.body)
    }

    /// Sell a tourist SIM identified by the client's identity document.
    ///
    /// A successful `SalePackage` is chained with a `GetSale` lookup to
    /// retrieve the secret code; when the lookup does not also succeed the
    /// overall outcome is `done: false` even though the sale call nominally
    /// went through, because a sale without its secret code is unusable.
    ///
    /// A fresh transaction id is generated when none is given.
    pub async fn sale_tourist_sim(
        &self,
        request: TouristSimSale,
        transaction_id: Option<TransactionId>,
    ) -> Result<SaleOutcome, CubacelError> {
        let action = Action::SaleTouristSim;
        let transaction_id = transaction_id.unwrap_or_else(TransactionId::generate);
        let package = self.sim_package()?;

        let envelope =
            transport::encode_sale_package(&request, &self.ticket, &transaction_id, package);
        let raw = self.execute(action, envelope).await?;
        let reply =
            transport::decode_sale_package(raw).map_err(|err| wire_error(action.name(), err))?;

        if reply.value_ok {
            if let Some(order_id) = reply.order_id {
                let lookup = self.sale(order_id, transaction_id.clone()).await?;
                if lookup.done {
                    return Ok(SaleOutcome {
                        done: true,
                        order_id: Some(order_id),
                        transaction_id: Some(transaction_id),
                        secret_code: lookup.secret_code,
                        response: reply,
                    });
                }
            }
        }

        Ok(SaleOutcome {
            done: false,
            order_id: None,
            transaction_id: None,
            secret_code: None,
            response: reply,
        })
    }

    /// Sell a tourist SIM against a physical card identified by ICCID.
    pub async fn sale_tourist_sim_card(
        &self,
        request: TouristSimCardSale,
        transaction_id: TransactionId,
    ) -> Result<CardSaleOutcome, CubacelError> {
        let action = Action::SaleTouristSimCard;
        let envelope = transport::encode_supple_cust_info(&request, &self.ticket, &transaction_id);
        let raw = self.execute(action, envelope).await?;
        let reply = transport::decode_supple_cust_info(raw)
            .map_err(|err| wire_error(action.name(), err))?;

        if reply.value_ok {
            if let Some(order_id) = reply.order_id {
                return Ok(CardSaleOutcome {
                    done: true,
                    order_id: Some(order_id),
                    transaction_id: Some(transaction_id),
                    response: reply,
                });
            }
        }
        Ok(CardSaleOutcome {
            done: false,
            order_id: None,
            transaction_id: None,
            response: reply,
        })
    }

    /// Look up a sale by order id.
    pub async fn sale(
        &self,
        order_id: OrderId,
        transaction_id: TransactionId,
    ) -> Result<SaleLookupOutcome, CubacelError> {
        let action = Action::SaleQuery;
        let envelope = transport::encode_get_sale(&self.ticket, order_id, &transaction_id);
        let raw = self.execute(action, envelope).await?;
        let reply =
            transport::decode_get_sale(raw).map_err(|err| wire_error(action.name(), err))?;

        let record = if reply.value_ok {
            reply.sale.clone()
        } else {
            None
        };
        match record {
            Some(sale) => Ok(SaleLookupOutcome {
                done: true,
                secret_code: sale.code,
                status: sale.state.map(|state| state.to_lowercase()),
                response: reply,
            }),
            None => Ok(SaleLookupOutcome {
                done: false,
                secret_code: None,
                status: None,
                response: reply,
            }),
        }
    }

    /// Recharge a phone number. A fresh transaction id is generated when none
    /// is given.
    pub async fn recharge(
        &self,
        request: Recharge,
        transaction_id: Option<TransactionId>,
    ) -> Result<RechargeOutcome, CubacelError> {
        let action = Action::Recharge;
        let transaction_id = transaction_id.unwrap_or_else(TransactionId::generate);
        let envelope = transport::encode_sale_recharge(&request, &self.ticket, &transaction_id);
        let raw = self.execute(action, envelope).await?;
        let reply =
            transport::decode_sale_recharge(raw).map_err(|err| wire_error(action.name(), err))?;

        if reply.value_ok {
            if let Some(order_id) = reply.order_id {
                return Ok(RechargeOutcome {
                    done: true,
                    order_id: Some(order_id),
                    transaction_id: Some(transaction_id),
                    response: reply,
                });
            }
        }
        Ok(RechargeOutcome {
            done: false,
            order_id: None,
            transaction_id: None,
            response: reply,
        })
    }

    /// Query the account balance.
    pub async fn balance(&self) -> Result<BalanceOutcome, CubacelError> {
        let action = Action::Balance;
        let envelope = transport::encode_get_balance(&self.ticket);
        let raw = self.execute(action, envelope).await?;
        let reply =
            transport::decode_get_balance(raw).map_err(|err| wire_error(action.name(), err))?;

        let done = reply.value_ok && reply.balance.is_some();
        Ok(BalanceOutcome {
            done,
            balance: if done { reply.balance.clone() } else { None },
            response: reply,
        })
    }

    /// Rotate the account password. On success the new password is persisted
    /// to the config file.
    pub async fn change_password(
        &self,
        old_password: Password,
        new_password: Password,
    ) -> Result<AckOutcome, CubacelError> {
        let action = Action::ChangePassword;
        let envelope =
            transport::encode_change_password(&self.ticket, &old_password, &new_password);
        let raw = self.execute(action, envelope).await?;
        let reply = transport::decode_change_password(raw)
            .map_err(|err| wire_error(action.name(), err))?;

        if reply.value_ok {
            self.config.change_password(new_password.as_str())?;
            return Ok(AckOutcome {
                done: true,
                response: reply,
            });
        }
        Ok(AckOutcome {
            done: false,
            response: reply,
        })
    }

    /// Place a bulk SIM order. When both batch bounds are configured the
    /// quantity is validated before anything reaches the network.
    pub async fn request_batch(
        &self,
        order: BatchOrder,
        transaction_id: TransactionId,
    ) -> Result<BatchOrderOutcome, CubacelError> {
        let action = Action::BatchOrder;
        if let (Some(min), Some(max)) = (self.config.min_batch, self.config.max_batch) {
            if !(min..=max).contains(&order.quantity()) {
                return Err(ValidationError::QuantityOutOfRange {
                    min,
                    max,
                    actual: order.quantity(),
                }
                .into());
            }
        }

        let envelope = transport::encode_sell_batch_package(&order, &self.ticket, &transaction_id);
        let raw = self.execute(action, envelope).await?;
        let reply = transport::decode_sell_batch_package(raw)
            .map_err(|err| wire_error(action.name(), err))?;

        if reply.value_ok {
            if let Some(order_id) = reply.order_id {
                return Ok(BatchOrderOutcome {
                    done: true,
                    order_id: Some(order_id),
                    response: reply,
                });
            }
        }
        Ok(BatchOrderOutcome {
            done: false,
            order_id: None,
            response: reply,
        })
    }

    /// Poll a batch order. Success requires the echoed order id to match the
    /// queried one.
    pub async fn batch_status(
        &self,
        order_id: OrderId,
        transaction_id: TransactionId,
    ) -> Result<BatchStatusOutcome, CubacelError> {
        let action = Action::BatchQuery;
        let envelope = transport::encode_get_sale_batch(&self.ticket, order_id, &transaction_id);
        let raw = self.execute(action, envelope).await?;
        let reply = transport::decode_get_sale_batch(raw)
            .map_err(|err| wire_error(action.name(), err))?;

        let matching = reply
            .sale
            .as_ref()
            .filter(|sale| reply.value_ok && sale.order_id == Some(order_id));
        match matching {
            Some(sale) => Ok(BatchStatusOutcome {
                done: true,
                status: sale.state.as_deref().map(str::to_lowercase),
                response: reply.clone(),
            }),
            None => Ok(BatchStatusOutcome {
                done: false,
                status: None,
                response: reply,
            }),
        }
    }

    /// Cancel a batch order.
    pub async fn cancel_batch(
        &self,
        order_id: OrderId,
        transaction_id: TransactionId,
    ) -> Result<AckOutcome, CubacelError> {
        self.cancel(Action::BatchCancel, order_id, transaction_id)
            .await
    }

    /// Cancel a sale.
    pub async fn cancel_sale(
        &self,
        order_id: OrderId,
        transaction_id: TransactionId,
    ) -> Result<AckOutcome, CubacelError> {
        self.cancel(Action::SaleCancel, order_id, transaction_id)
            .await
    }

    async fn cancel(
        &self,
        action: Action,
        order_id: OrderId,
        transaction_id: TransactionId,
    ) -> Result<AckOutcome, CubacelError> {
        let envelope = transport::encode_cancel_sale(&self.ticket, order_id, &transaction_id);
        let raw = self.execute(action, envelope).await?;
        let reply =
            transport::decode_cancel_sale(raw).map_err(|err| wire_error(action.name(), err))?;
        Ok(AckOutcome {
            done: reply.value_ok,
            response: reply,
        })
    }

    /// List the packages available to this account.
    pub async fn services(&self) -> Result<CatalogOutcome, CubacelError> {
        self.catalog(Action::Services, None).await
    }

    /// List provinces.
    pub async fn provinces(&self) -> Result<CatalogOutcome, CubacelError> {
        self.catalog(Action::Provinces, None).await
    }

    /// List nationalities.
    pub async fn nationalities(&self) -> Result<CatalogOutcome, CubacelError> {
        self.catalog(Action::Nationalities, None).await
    }

    /// List commercial offices, optionally filtered by province.
    pub async fn offices(
        &self,
        province: Option<ProvinceId>,
    ) -> Result<CatalogOutcome, CubacelError> {
        self.catalog(Action::Offices, province).await
    }

    /// List identification types.
    pub async fn identification_types(&self) -> Result<CatalogOutcome, CubacelError> {
        self.catalog(Action::IdentificationTypes, None).await
    }

    async fn catalog(
        &self,
        action: Action,
        province: Option<ProvinceId>,
    ) -> Result<CatalogOutcome, CubacelError> {
        let envelope = match action {
            Action::IdentificationTypes => transport::encode_identification_types(&self.ticket),
            _ => transport::encode_catalog(action.operation(), &self.ticket, province),
        };
        let raw = self.execute(action, envelope).await?;
        let reply =
            transport::decode_catalog(raw).map_err(|err| wire_error(action.name(), err))?;

        let done = reply.value_ok;
        Ok(CatalogOutcome {
            done,
            items: if done { reply.items.clone() } else { Vec::new() },
            response: reply,
        })
    }

    fn sim_package(&self) -> Result<PackageId, CubacelError> {
        self.config
            .sim_product_id
            .map(PackageId::new)
            .ok_or(CubacelError::Config(ConfigError::Missing {
                key: config::ENV_SIM_TUR_ID,
            }))
    }
}

fn check_http_status(action: &'static str, status: u16, body: &str) -> Result<(), CubacelError> {
    if (200..=299).contains(&status) {
        return Ok(());
    }
    tracing::error!(action, status, "unexpected HTTP status");
    let body = body.trim();
    Err(CubacelError::HttpStatus {
        action,
        status,
        body: if body.is_empty() {
            None
        } else {
            Some(body.to_owned())
        },
    })
}

fn wire_error(action: &'static str, err: TransportError) -> CubacelError {
    match err {
        TransportError::Fault(fault) => {
            tracing::error!(
                action,
                code = fault.code.as_deref().unwrap_or(""),
                message = %fault.message,
                "SOAP fault"
            );
            CubacelError::Fault { action, fault }
        }
        other => CubacelError::Parse {
            action,
            source: other,
        },
    }
}
