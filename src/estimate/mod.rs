use crate::rates::RateTable;

mod types;

pub use types::*;

/// CGST and SGST are levied as two separate components of 1.5% each.
pub const GST_RATE_EACH: f64 = 0.015;

/// Resolves a raw form snapshot against the current rate table. Missing
/// wastage and making-charge values fall back to the table-derived
/// suggestions; numeric inputs are clamped here so the calculator can
/// assume valid ranges.
pub fn build_input(table: &RateTable, request: &EstimateRequest) -> EstimateInput {
    let weight_gm = request.weight_gm.max(0.0);

    let wastage_gm = match request.wastage_gm {
        Some(wastage) => wastage.max(0.0),
        None => table.suggested_wastage_gm(request.metal_type, weight_gm),
    };

    let making_charge_rate = match (request.making_charge_mode, request.making_charge_rate) {
        (MakingChargeMode::FlatPerGram, Some(rate)) => rate.max(0.0),
        (MakingChargeMode::FlatPerGram, None) => table.making_charge_per_gram(request.metal_type),
        (MakingChargeMode::Percentage, Some(rate)) => rate.clamp(0.0, 100.0),
        (MakingChargeMode::Percentage, None) => 0.0,
    };

    let discount_value = match request.discount_mode {
        DiscountMode::None => 0.0,
        DiscountMode::Rupees => request.discount_value.max(0.0),
        DiscountMode::Percentage => request.discount_value.clamp(0.0, 100.0),
    };

    EstimateInput {
        metal_type: request.metal_type,
        rate_per_gram: table.rate_per_gram(request.metal_type),
        weight_gm,
        wastage_gm,
        making_charge_mode: request.making_charge_mode,
        making_charge_rate,
        minimum_making_charge: request.metal_type.category().minimum_making_charge(),
        discount_mode: request.discount_mode,
        discount_value,
    }
}

/// Deterministic recomputation of the whole estimate from one input
/// snapshot. No rounding happens here; money is formatted to 2 decimals and
/// grams to 3 only at the presentation boundary.
pub fn compute_estimate(input: &EstimateInput) -> EstimateResult {
    let net_weight_gm = input.weight_gm + input.wastage_gm;
    let jewellery_amount = net_weight_gm * input.rate_per_gram;

    let computed_making_charge = match input.making_charge_mode {
        MakingChargeMode::FlatPerGram => input.making_charge_rate * net_weight_gm,
        MakingChargeMode::Percentage => jewellery_amount * input.making_charge_rate / 100.0,
    };
    let making_charge = computed_making_charge.max(input.minimum_making_charge);

    let amount_before_discount = jewellery_amount + making_charge;

    let discount_amount = match input.discount_mode {
        DiscountMode::None => 0.0,
        // clamped so the total can never go negative
        DiscountMode::Rupees => input.discount_value.clamp(0.0, amount_before_discount),
        DiscountMode::Percentage => amount_before_discount * input.discount_value / 100.0,
    };
    let amount_after_discount = amount_before_discount - discount_amount;

    // two identical 1.5% components, billed as separate line items
    let cgst_amount = amount_after_discount * GST_RATE_EACH;
    let sgst_amount = amount_after_discount * GST_RATE_EACH;
    let final_amount = amount_after_discount + cgst_amount + sgst_amount;

    EstimateResult {
        metal_type: input.metal_type,
        rate_per_gram: input.rate_per_gram,
        weight_gm: input.weight_gm,
        wastage_gm: input.wastage_gm,
        net_weight_gm,
        jewellery_amount,
        making_charge,
        amount_before_discount,
        discount_amount,
        amount_after_discount,
        cgst_amount,
        sgst_amount,
        final_amount,
    }
}
