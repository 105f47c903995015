use crate::estimate::{CustomerInfo, EstimateResult};
use printpdf::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("PDF render error:{0}")]
    RenderError(String),
}

// 80mm thermal roll. Height is sized to content, see receipt_line_count.
const PAGE_WIDTH_MM: f64 = 80.0;
const LINE_HEIGHT_MM: f64 = 4.5;
const MARGIN_MM: f64 = 6.0;
const LABEL_X_MM: f64 = 4.0;
const VALUE_X_MM: f64 = 42.0;

const SEPARATOR: &str = "----------------------------------------";

// title + timestamp + estimate number + 4 separators + 5 item lines
// + 3 amount lines + 2 tax lines + total + footer
const BASE_LINE_COUNT: usize = 19;

/// Line budget for the page. Only has to be big enough to avoid clipping.
pub fn receipt_line_count(customer: &CustomerInfo, discount_applied: bool) -> usize {
    let mut lines = BASE_LINE_COUNT;
    lines += customer.populated_fields().len();
    if discount_applied {
        lines += 2;
    }
    lines
}

pub fn create_estimate_pdf(
    estimate_number: &str,
    date: &str,
    customer: &CustomerInfo,
    estimate: &EstimateResult,
) -> Result<Vec<u8>, ReceiptError> {
    let line_count = receipt_line_count(customer, estimate.discount_applied());
    let page_height_mm = 2.0 * MARGIN_MM + line_count as f64 * LINE_HEIGHT_MM;

    let (doc, page1, layer1) = PdfDocument::new(
        "Estimate",
        Mm(PAGE_WIDTH_MM),
        Mm(page_height_mm),
        "Layer 1",
    );
    let current_layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReceiptError::RenderError(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReceiptError::RenderError(e.to_string()))?;

    let mut y_pos = page_height_mm - MARGIN_MM;

    current_layer.use_text(
        "JWL CALC - Jewellery Estimate",
        10.0,
        Mm(LABEL_X_MM),
        Mm(y_pos),
        &font_bold,
    );
    y_pos -= LINE_HEIGHT_MM;
    current_layer.use_text(date, 8.0, Mm(LABEL_X_MM), Mm(y_pos), &font);
    y_pos -= LINE_HEIGHT_MM;
    current_layer.use_text(
        &format!("Estimate No: {}", estimate_number),
        8.0,
        Mm(LABEL_X_MM),
        Mm(y_pos),
        &font,
    );
    y_pos -= LINE_HEIGHT_MM;
    current_layer.use_text(SEPARATOR, 8.0, Mm(LABEL_X_MM), Mm(y_pos), &font);
    y_pos -= LINE_HEIGHT_MM;

    for (label, value) in customer.populated_fields() {
        current_layer.use_text(
            &format!("{}: {}", label, value),
            8.0,
            Mm(LABEL_X_MM),
            Mm(y_pos),
            &font,
        );
        y_pos -= LINE_HEIGHT_MM;
    }
    current_layer.use_text(SEPARATOR, 8.0, Mm(LABEL_X_MM), Mm(y_pos), &font);
    y_pos -= LINE_HEIGHT_MM;

    let item_rows = [
        ("Type", estimate.metal_type.label().to_string()),
        ("Rate / gm", format!("{:.2}", estimate.rate_per_gram)),
        ("Weight (gm)", format!("{:.3}", estimate.weight_gm)),
        ("Wastage (gm)", format!("{:.3}", estimate.wastage_gm)),
        ("Net Weight (gm)", format!("{:.3}", estimate.net_weight_gm)),
    ];
    for (label, value) in &item_rows {
        current_layer.use_text(*label, 8.0, Mm(LABEL_X_MM), Mm(y_pos), &font);
        current_layer.use_text(value, 8.0, Mm(VALUE_X_MM), Mm(y_pos), &font);
        y_pos -= LINE_HEIGHT_MM;
    }
    current_layer.use_text(SEPARATOR, 8.0, Mm(LABEL_X_MM), Mm(y_pos), &font);
    y_pos -= LINE_HEIGHT_MM;

    let mut amount_rows = vec![
        ("J Amount", format!("{:.2}", estimate.jewellery_amount)),
        ("Making Charges", format!("{:.2}", estimate.making_charge)),
        ("Subtotal", format!("{:.2}", estimate.amount_before_discount)),
    ];
    if estimate.discount_applied() {
        amount_rows.push(("Discount", format!("-{:.2}", estimate.discount_amount)));
        amount_rows.push((
            "After Discount",
            format!("{:.2}", estimate.amount_after_discount),
        ));
    }
    amount_rows.push(("CGST 1.5%", format!("{:.2}", estimate.cgst_amount)));
    amount_rows.push(("SGST 1.5%", format!("{:.2}", estimate.sgst_amount)));
    for (label, value) in &amount_rows {
        current_layer.use_text(*label, 8.0, Mm(LABEL_X_MM), Mm(y_pos), &font);
        current_layer.use_text(value, 8.0, Mm(VALUE_X_MM), Mm(y_pos), &font);
        y_pos -= LINE_HEIGHT_MM;
    }
    current_layer.use_text(SEPARATOR, 8.0, Mm(LABEL_X_MM), Mm(y_pos), &font);
    y_pos -= LINE_HEIGHT_MM;

    current_layer.use_text(
        "Amount Incl. GST",
        9.0,
        Mm(LABEL_X_MM),
        Mm(y_pos),
        &font_bold,
    );
    current_layer.use_text(
        &format!("Rs.{:.2}", estimate.final_amount),
        9.0,
        Mm(VALUE_X_MM),
        Mm(y_pos),
        &font_bold,
    );
    y_pos -= LINE_HEIGHT_MM;

    current_layer.use_text("Thank You! Visit Again", 8.0, Mm(LABEL_X_MM), Mm(y_pos), &font);

    doc.save_to_bytes()
        .map_err(|e| ReceiptError::RenderError(e.to_string()))
}
