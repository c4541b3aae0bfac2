use crate::domain::validation::ValidationError;
use crate::domain::value::{
    DocumentType, Gender, Iccid, NationalityId, OfficeId, PackageId, ProductCode, ProvinceId,
    RawPhoneNumber,
};

/// Tourist-SIM sale identified by the client's identity document.
///
/// The client name is uppercased at construction, the way the provider
/// expects it on the wire.
#[derive(Debug, Clone)]
pub struct TouristSimSale {
    name: String,
    passport: String,
    document_type: DocumentType,
    nationality: NationalityId,
    office: OfficeId,
    province: ProvinceId,
    arrival_date: String,
    pick_up_airport: bool,
}

impl TouristSimSale {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        passport: impl Into<String>,
        document_type: DocumentType,
        nationality: NationalityId,
        office: OfficeId,
        province: ProvinceId,
        arrival_date: impl Into<String>,
        pick_up_airport: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "Name" });
        }
        let passport = passport.into();
        if passport.trim().is_empty() {
            return Err(ValidationError::Empty { field: "Id" });
        }
        let arrival_date = arrival_date.into();
        if arrival_date.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "ArrivalDate",
            });
        }
        Ok(Self {
            name: name.trim().to_uppercase(),
            passport: passport.trim().to_owned(),
            document_type,
            nationality,
            office,
            province,
            arrival_date: arrival_date.trim().to_owned(),
            pick_up_airport,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passport(&self) -> &str {
        &self.passport
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn nationality(&self) -> NationalityId {
        self.nationality
    }

    pub fn office(&self) -> OfficeId {
        self.office
    }

    pub fn province(&self) -> ProvinceId {
        self.province
    }

    pub fn arrival_date(&self) -> &str {
        &self.arrival_date
    }

    pub fn pick_up_airport(&self) -> bool {
        self.pick_up_airport
    }
}

/// Tourist-SIM sale against a physical card, identified by ICCID.
#[derive(Debug, Clone)]
pub struct TouristSimCardSale {
    arrival_date: String,
    birth_date: String,
    document_number: String,
    first_name: String,
    last_name: String,
    gender: Gender,
    address: String,
    iccid: Iccid,
    nationality: NationalityId,
}

impl TouristSimCardSale {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        arrival_date: impl Into<String>,
        birth_date: impl Into<String>,
        document_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        address: impl Into<String>,
        iccid: Iccid,
        nationality: NationalityId,
    ) -> Result<Self, ValidationError> {
        let arrival_date = non_empty(arrival_date.into(), "ArrivalDate")?;
        let birth_date = non_empty(birth_date.into(), "DateOfBirth")?;
        let document_number = non_empty(document_number.into(), "CertificateID")?;
        let first_name = non_empty(first_name.into(), "FirstName")?;
        let last_name = non_empty(last_name.into(), "FirstLastName")?;
        let address = non_empty(address.into(), "HomeAddress")?;
        Ok(Self {
            arrival_date,
            birth_date,
            document_number,
            first_name,
            last_name,
            gender,
            address,
            iccid,
            nationality,
        })
    }

    pub fn arrival_date(&self) -> &str {
        &self.arrival_date
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn iccid(&self) -> &Iccid {
        &self.iccid
    }

    pub fn nationality(&self) -> NationalityId {
        self.nationality
    }
}

/// Mobile recharge order.
#[derive(Debug, Clone)]
pub struct Recharge {
    phone: RawPhoneNumber,
    price: f64,
    product_code: ProductCode,
}

impl Recharge {
    pub fn new(
        phone: RawPhoneNumber,
        price: f64,
        product_code: ProductCode,
    ) -> Result<Self, ValidationError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(ValidationError::NotPositive { field: "Price" });
        }
        Ok(Self {
            phone,
            price,
            product_code,
        })
    }

    pub fn phone(&self) -> &RawPhoneNumber {
        &self.phone
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn product_code(&self) -> ProductCode {
        self.product_code
    }
}

/// Bulk SIM order fulfilled asynchronously by the provider.
#[derive(Debug, Clone)]
pub struct BatchOrder {
    package: PackageId,
    quantity: u32,
    office: OfficeId,
    delivery_date: String,
}

impl BatchOrder {
    pub fn new(
        package: PackageId,
        quantity: u32,
        office: OfficeId,
        delivery_date: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::NotPositive { field: "Quantity" });
        }
        let delivery_date = non_empty(delivery_date.into(), "DeliveryDate")?;
        Ok(Self {
            package,
            quantity,
            office,
            delivery_date,
        })
    }

    pub fn package(&self) -> PackageId {
        self.package
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn office(&self) -> OfficeId {
        self.office
    }

    pub fn delivery_date(&self) -> &str {
        &self.delivery_date
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}
