//! Vehicle search form: the fields a price lookup needs.
//!
//! Also carries the navigation-prefill hook: a host arriving from another
//! page (say, a category tile) feeds the carried state in through
//! [`apply_prefill`], which uses silent sets so the form starts pristine.

use crate::form::{Field, FieldRule, Form, FormBuilder, FormValues};
use crate::vehicle::{VehicleKind, VehicleQuery};

use super::patterns;

pub const MSG_INVALID_TYPE: &str = "Please select a valid vehicle type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    VehicleType,
    Brand,
    Model,
    Year,
    Fuel,
}

impl Field for SearchField {
    fn name(&self) -> &'static str {
        match self {
            SearchField::VehicleType => "vehicleType",
            SearchField::Brand => "brand",
            SearchField::Model => "model",
            SearchField::Year => "year",
            SearchField::Fuel => "fuel",
        }
    }
}

pub fn rules() -> Vec<FieldRule<SearchField>> {
    vec![
        rule! {
            field: SearchField::VehicleType,
            required: true,
            custom: |value: &str, _: &FormValues<SearchField>| {
                VehicleKind::parse(value).is_none().then(|| MSG_INVALID_TYPE.to_string())
            },
        },
        rule! { field: SearchField::Brand, required: true },
        rule! { field: SearchField::Model, required: true },
        rule! {
            field: SearchField::Year,
            required: true,
            pattern: patterns::year(),
            pattern_message: "Please enter a valid year",
        },
        // Fuel is optional and unvalidated.
    ]
}

pub fn builder() -> FormBuilder<SearchField> {
    Form::builder()
        .field(SearchField::VehicleType, "")
        .field(SearchField::Brand, "")
        .field(SearchField::Model, "")
        .field(SearchField::Year, "")
        .field(SearchField::Fuel, "")
        .rules(rules())
}

/// Optional state carried in from navigation; read once at mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPrefill {
    pub vehicle_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub fuel: Option<String>,
}

/// Feed carried navigation state into the form without touching or dirtying
/// anything.
pub fn apply_prefill(form: &Form<SearchField>, prefill: &SearchPrefill) {
    let pairs = [
        (SearchField::VehicleType, &prefill.vehicle_type),
        (SearchField::Brand, &prefill.brand),
        (SearchField::Model, &prefill.model),
        (SearchField::Year, &prefill.year),
        (SearchField::Fuel, &prefill.fuel),
    ];
    for (field, value) in pairs {
        if let Some(value) = value {
            form.set_value_silently(field, value.clone());
        }
    }
}

/// Lookup query from the current value bag; used as the submit snapshot's
/// bridge to [`crate::vehicle::PriceLookup`].
pub fn query(values: &FormValues<SearchField>) -> VehicleQuery {
    let fuel = values.get(SearchField::Fuel).trim();
    VehicleQuery {
        vehicle_type: values.get(SearchField::VehicleType).to_string(),
        brand: values.get(SearchField::Brand).to_string(),
        model: values.get(SearchField::Model).to_string(),
        year: values.get(SearchField::Year).to_string(),
        fuel: (!fuel.is_empty()).then(|| fuel.to_string()),
    }
}
