//! Shipping profiles and shipping options.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ids::{RegionId, ServiceZoneId, ShippingOptionId, ShippingProfileId};
use crate::money::{Currency, Money};

/// A grouping of products that ship the same way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingProfile {
    pub id: ShippingProfileId,
    pub name: String,
    /// Profile type, e.g. "default".
    #[serde(rename = "type")]
    pub profile_type: String,
}

/// How a shipping option is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShippingPriceType {
    /// Fixed prices attached to the option.
    #[default]
    Flat,
    /// Price computed by the fulfillment provider.
    Calculated,
}

/// Display type of a shipping option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingOptionType {
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
}

impl ShippingOptionType {
    /// Create a type with an empty description.
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
            code: code.into(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// What a shipping price applies to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PriceTarget {
    /// Override for one region.
    Region { region_id: RegionId },
    /// Default for every context in a currency.
    Currency { currency_code: Currency },
}

/// A flat price of a shipping option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingPrice {
    #[serde(flatten)]
    pub target: PriceTarget,
    /// Amount in minor units.
    pub amount: i64,
}

impl ShippingPrice {
    /// Currency-wide default price.
    pub fn for_currency(currency_code: Currency, amount: i64) -> Self {
        Self {
            target: PriceTarget::Currency { currency_code },
            amount,
        }
    }

    /// Region-specific override.
    pub fn for_region(region_id: RegionId, amount: i64) -> Self {
        Self {
            target: PriceTarget::Region { region_id },
            amount,
        }
    }
}

/// Comparison operator of a shipping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleOperator {
    #[default]
    Eq,
    Ne,
    In,
    Nin,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl RuleOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleOperator::Eq => "eq",
            RuleOperator::Ne => "ne",
            RuleOperator::In => "in",
            RuleOperator::Nin => "nin",
            RuleOperator::Gt => "gt",
            RuleOperator::Gte => "gte",
            RuleOperator::Lt => "lt",
            RuleOperator::Lte => "lte",
        }
    }
}

/// An attribute/operator/value triple gating an option.
///
/// For `in` and `nin` the value is a comma-separated list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingRule {
    pub attribute: String,
    pub operator: RuleOperator,
    pub value: String,
}

impl ShippingRule {
    /// An equality rule.
    pub fn eq(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            operator: RuleOperator::Eq,
            value: value.into(),
        }
    }

    /// Evaluate against an attribute value. Missing attributes never match.
    pub fn matches(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };

        match self.operator {
            RuleOperator::Eq => actual == self.value,
            RuleOperator::Ne => actual != self.value,
            RuleOperator::In => self.list().any(|v| v == actual),
            RuleOperator::Nin => !self.list().any(|v| v == actual),
            RuleOperator::Gt => self.compare(actual, |a, b| a > b),
            RuleOperator::Gte => self.compare(actual, |a, b| a >= b),
            RuleOperator::Lt => self.compare(actual, |a, b| a < b),
            RuleOperator::Lte => self.compare(actual, |a, b| a <= b),
        }
    }

    fn list(&self) -> impl Iterator<Item = &str> {
        self.value.split(',').map(str::trim)
    }

    fn compare(&self, actual: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
        match (actual.trim().parse::<f64>(), self.value.trim().parse::<f64>()) {
            (Ok(a), Ok(b)) => cmp(a, b),
            _ => false,
        }
    }
}

/// Context a shipping price is resolved in.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceContext {
    pub currency: Currency,
    pub region_id: Option<RegionId>,
}

impl PriceContext {
    /// Context with a currency only.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            region_id: None,
        }
    }

    /// Context inside a region.
    pub fn in_region(region_id: RegionId, currency: Currency) -> Self {
        Self {
            currency,
            region_id: Some(region_id),
        }
    }
}

/// A way to ship goods out of a service zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingOption {
    pub id: ShippingOptionId,
    pub name: String,
    pub price_type: ShippingPriceType,
    pub provider_id: Option<String>,
    pub service_zone_id: Option<ServiceZoneId>,
    pub shipping_profile_id: Option<ShippingProfileId>,
    #[serde(rename = "type")]
    pub option_type: ShippingOptionType,
    #[serde(default)]
    pub prices: Vec<ShippingPrice>,
    #[serde(default)]
    pub rules: Vec<ShippingRule>,
}

impl ShippingOption {
    /// Create an unattached flat-rate option.
    pub fn flat(
        name: impl Into<String>,
        option_type: ShippingOptionType,
        prices: Vec<ShippingPrice>,
    ) -> Self {
        Self {
            id: ShippingOptionId::generate(),
            name: name.into(),
            price_type: ShippingPriceType::Flat,
            provider_id: None,
            service_zone_id: None,
            shipping_profile_id: None,
            option_type,
            prices,
            rules: Vec::new(),
        }
    }

    /// Resolve the price for a context.
    ///
    /// A price for the context's region wins over the currency default.
    pub fn price_for(&self, ctx: &PriceContext) -> Option<Money> {
        let region_price = ctx.region_id.as_ref().and_then(|region| {
            self.prices.iter().find(|p| {
                matches!(&p.target, PriceTarget::Region { region_id } if region_id == region)
            })
        });

        let price = region_price.or_else(|| {
            self.prices.iter().find(|p| {
                matches!(&p.target, PriceTarget::Currency { currency_code } if *currency_code == ctx.currency)
            })
        })?;

        Some(Money::new(price.amount, ctx.currency))
    }

    /// Check every rule against the given attributes.
    pub fn is_applicable(&self, attributes: &HashMap<String, String>) -> bool {
        self.rules
            .iter()
            .all(|rule| rule.matches(attributes.get(&rule.attribute).map(String::as_str)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(region: &RegionId) -> ShippingOption {
        let mut option = ShippingOption::flat(
            "Envio estandar",
            ShippingOptionType::new("Estandar", "standard"),
            vec![
                ShippingPrice::for_currency(Currency::USD, 900),
                ShippingPrice::for_region(region.clone(), 850),
            ],
        );
        option.rules = vec![
            ShippingRule::eq("enabled_in_store", "true"),
            ShippingRule::eq("is_return", "false"),
        ];
        option
    }

    #[test]
    fn test_region_price_wins_in_region() {
        let region = RegionId::new("reg_us");
        let option = standard(&region);

        let price = option.price_for(&PriceContext::in_region(region, Currency::USD));
        assert_eq!(price, Some(Money::new(850, Currency::USD)));
    }

    #[test]
    fn test_currency_price_outside_region() {
        let option = standard(&RegionId::new("reg_us"));

        let other = PriceContext::in_region(RegionId::new("reg_other"), Currency::USD);
        assert_eq!(option.price_for(&other).map(|m| m.amount), Some(900));
        assert_eq!(
            option.price_for(&PriceContext::new(Currency::USD)).map(|m| m.amount),
            Some(900)
        );
        assert_eq!(option.price_for(&PriceContext::new(Currency::EUR)), None);
    }

    #[test]
    fn test_rules_gate_applicability() {
        let option = standard(&RegionId::new("reg_us"));

        let mut attrs = HashMap::new();
        attrs.insert("enabled_in_store".to_string(), "true".to_string());
        attrs.insert("is_return".to_string(), "false".to_string());
        assert!(option.is_applicable(&attrs));

        attrs.insert("is_return".to_string(), "true".to_string());
        assert!(!option.is_applicable(&attrs));

        attrs.remove("is_return");
        assert!(!option.is_applicable(&attrs));
    }

    #[test]
    fn test_rule_operators() {
        let rule = ShippingRule {
            attribute: "item_total".to_string(),
            operator: RuleOperator::Gte,
            value: "5000".to_string(),
        };
        assert!(rule.matches(Some("5000")));
        assert!(!rule.matches(Some("4999")));
        assert!(!rule.matches(Some("lots")));

        let rule = ShippingRule {
            attribute: "country".to_string(),
            operator: RuleOperator::Nin,
            value: "mx, ca".to_string(),
        };
        assert!(rule.matches(Some("us")));
        assert!(!rule.matches(Some("ca")));
    }

    #[test]
    fn test_price_wire_shape() {
        let json = serde_json::to_value(ShippingPrice::for_region(RegionId::new("reg_1"), 1900))
            .unwrap();
        assert_eq!(json, serde_json::json!({ "region_id": "reg_1", "amount": 1900 }));

        let json = serde_json::to_value(ShippingPrice::for_currency(Currency::USD, 1900)).unwrap();
        assert_eq!(json, serde_json::json!({ "currency_code": "usd", "amount": 1900 }));
    }
}
