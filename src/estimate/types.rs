use crate::rates::MetalType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum MakingChargeMode {
    FlatPerGram,
    Percentage,
}

impl Default for MakingChargeMode {
    fn default() -> Self {
        Self::FlatPerGram
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum DiscountMode {
    None,
    Rupees,
    Percentage,
}

impl Default for DiscountMode {
    fn default() -> Self {
        Self::None
    }
}

/// Free-text customer details for the receipt. All optional, no validation
/// beyond presence.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CustomerInfo {
    #[serde(default)]
    pub bill_number: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

impl CustomerInfo {
    /// Label/value pairs for the fields that were actually filled in.
    pub fn populated_fields(&self) -> Vec<(&'static str, &str)> {
        let fields = [
            ("Bill No", &self.bill_number),
            ("Acc No", &self.account_number),
            ("Name", &self.name),
            ("Address", &self.address),
            ("Mobile", &self.mobile),
        ];
        fields
            .into_iter()
            .filter_map(|(label, value)| {
                let value = value.as_deref()?.trim();
                if value.is_empty() {
                    None
                } else {
                    Some((label, value))
                }
            })
            .collect()
    }
}

/// One form snapshot, as submitted by the caller.
#[derive(Debug, Deserialize, Clone)]
pub struct EstimateRequest {
    #[serde(default)]
    pub customer: CustomerInfo,
    pub metal_type: MetalType,
    /// Gross weight in grams
    pub weight_gm: f64,
    /// Wastage in grams - suggested from the configured percentage when absent
    #[serde(default)]
    pub wastage_gm: Option<f64>,
    #[serde(default)]
    pub making_charge_mode: MakingChargeMode,
    /// Per-gram rupees (FlatPerGram) or percent (Percentage) - table default when absent
    #[serde(default)]
    pub making_charge_rate: Option<f64>,
    #[serde(default)]
    pub discount_mode: DiscountMode,
    /// Rupees or percent depending on discount_mode
    #[serde(default)]
    pub discount_value: f64,
}

/// Calculator input with every value resolved and clamped. Assembled fresh
/// from the current rate table on each request.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateInput {
    pub metal_type: MetalType,
    pub rate_per_gram: f64,
    pub weight_gm: f64,
    pub wastage_gm: f64,
    pub making_charge_mode: MakingChargeMode,
    pub making_charge_rate: f64,
    pub minimum_making_charge: f64,
    pub discount_mode: DiscountMode,
    pub discount_value: f64,
}

#[derive(Debug, Serialize, Clone)]
pub struct EstimateResult {
    pub metal_type: MetalType,
    pub rate_per_gram: f64,
    pub weight_gm: f64,
    pub wastage_gm: f64,
    /// net_weight_gm = weight_gm + wastage_gm
    pub net_weight_gm: f64,
    /// jewellery_amount = net_weight_gm * rate_per_gram
    pub jewellery_amount: f64,
    /// Flat or percentage making charge, floored at the category minimum
    pub making_charge: f64,
    pub amount_before_discount: f64,
    pub discount_amount: f64,
    pub amount_after_discount: f64,
    /// cgst_amount = amount_after_discount * 0.015
    pub cgst_amount: f64,
    /// sgst_amount = amount_after_discount * 0.015
    pub sgst_amount: f64,
    /// final_amount = amount_after_discount + cgst_amount + sgst_amount
    pub final_amount: f64,
}

impl EstimateResult {
    pub fn discount_applied(&self) -> bool {
        self.discount_amount > 0.0
    }
}
