//! Component domain models for the build compatibility engine.
//!
//! This module defines the component vocabulary shared by every other crate:
//! the closed set of component categories, the weakly-typed spec bag carried
//! by each product, and the components map a build analysis operates on.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"));

/// Slot a product occupies in a PC build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentCategory {
    Cpu,
    Gpu,
    Motherboard,
    Ram,
    Psu,
    Case,
    CpuCooler,
    Ssd,
    Hdd,
    CaseFan,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 10] = [
        Self::Cpu,
        Self::Gpu,
        Self::Motherboard,
        Self::Ram,
        Self::Psu,
        Self::Case,
        Self::CpuCooler,
        Self::Ssd,
        Self::Hdd,
        Self::CaseFan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
            Self::Motherboard => "motherboard",
            Self::Ram => "ram",
            Self::Psu => "psu",
            Self::Case => "case",
            Self::CpuCooler => "cpu-cooler",
            Self::Ssd => "ssd",
            Self::Hdd => "hdd",
            Self::CaseFan => "case-fan",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown component category: {}", s))
    }
}

/// A single value from a product's spec sheet.
///
/// Retailer listings carry numbers, strings with embedded units (`"650W"`),
/// and the occasional null or nested value, so nothing here is assumed about shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl SpecValue {
    /// Mirrors loose truthiness: zero, the empty string, null and `false` count as unset.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Other(serde_json::Value::Null) => false,
            Self::Other(serde_json::Value::Bool(b)) => *b,
            Self::Other(_) => true,
        }
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
            Self::Other(serde_json::Value::Null) => Ok(()),
            Self::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<f64> for SpecValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for SpecValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for SpecValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Extracts a number from a spec value.
///
/// Numbers are taken as-is. Anything else yields the first run of ASCII
/// digits in its string form (`"65 W"` -> 65), or 0 when unset or digitless.
pub fn parse_numeric(value: Option<&SpecValue>) -> f64 {
    let value = match value {
        Some(v) if v.is_truthy() => v,
        _ => return 0.0,
    };

    if let SpecValue::Number(n) = value {
        return *n;
    }

    let text = value.to_string();
    DIGIT_RUN
        .find(&text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Category-specific attributes of a product, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSpecs(HashMap<String, SpecValue>);

impl ProductSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SpecValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SpecValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`ProductSpecs::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SpecValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Non-blank string form of a field, if it is set.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| v.is_truthy())
            .map(|v| v.to_string().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// First of `keys` holding a truthy value.
    pub fn first_present(&self, keys: &[&str]) -> Option<&SpecValue> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|v| v.is_truthy())
    }

    pub fn numeric(&self, key: &str) -> f64 {
        parse_numeric(self.get(key))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<SpecValue>> FromIterator<(K, V)> for ProductSpecs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A purchasable part as seen by the compatibility engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(length(
        min = 1,
        max = 300,
        message = "Product name must be between 1 and 300 characters"
    ))]
    pub name: String,
    #[serde(default)]
    pub specs: ProductSpecs,
}

impl Product {
    pub fn new(name: impl Into<String>, specs: ProductSpecs) -> Self {
        Self {
            id: None,
            name: name.into(),
            specs,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

/// A possibly incomplete build: at most one product per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentsMap(BTreeMap<ComponentCategory, Product>);

impl ComponentsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: ComponentCategory) -> Option<&Product> {
        self.0.get(&category)
    }

    pub fn contains(&self, category: ComponentCategory) -> bool {
        self.0.contains_key(&category)
    }

    /// Both products when both slots are filled.
    pub fn pair(
        &self,
        a: ComponentCategory,
        b: ComponentCategory,
    ) -> Option<(&Product, &Product)> {
        Some((self.get(a)?, self.get(b)?))
    }

    /// Puts a product in its slot, returning whatever occupied it before.
    pub fn insert(&mut self, category: ComponentCategory, product: Product) -> Option<Product> {
        self.0.insert(category, product)
    }

    /// Like [`ComponentsMap::insert`] but refuses to replace a filled slot.
    pub fn try_insert(
        &mut self,
        category: ComponentCategory,
        product: Product,
    ) -> Result<(), String> {
        if let Some(existing) = self.0.get(&category) {
            return Err(format!(
                "Category {} already holds '{}'; cannot add '{}'",
                category, existing.name, product.name
            ));
        }
        self.0.insert(category, product);
        Ok(())
    }

    /// Builder-style insert for assembling fixtures and ad-hoc builds.
    pub fn with(mut self, category: ComponentCategory, product: Product) -> Self {
        self.insert(category, product);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentCategory, &Product)> {
        self.0.iter().map(|(category, product)| (*category, product))
    }

    pub fn categories(&self) -> Vec<ComponentCategory> {
        self.0.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ComponentCategory, Product)> for ComponentsMap {
    fn from_iter<I: IntoIterator<Item = (ComponentCategory, Product)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
