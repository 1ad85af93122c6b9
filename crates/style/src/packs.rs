//! The built-in style packs.
//!
//! Override packs only list the styles they add or replace; the base entries are layered
//! underneath by [`crate::compose`].

use crate::stylesheet::{Style, StylePack};
use crate::text::TextAlign;

pub const INVOICE: &str = "invoice";
pub const PURCHASE_ORDER: &str = "purchaseOrder";
pub const QUOTATION: &str = "quotation";
pub const STATEMENT_OF_ACCOUNT: &str = "statementOfAccount";

pub fn base() -> StylePack {
    StylePack::new()
        .with(
            "header",
            Style::new().font_size(18.0).bold().margin([0.0, 0.0, 0.0, 10.0]),
        )
        .with(
            "subheader",
            Style::new().font_size(14.0).bold().margin([0.0, 10.0, 0.0, 5.0]),
        )
        .with(
            "tableHeader",
            Style::new()
                .bold()
                .font_size(12.0)
                .color("black")
                .fill_color("#f8f9fa"),
        )
        .with(
            "tableRow",
            Style::new().font_size(10.0).margin([0.0, 5.0, 0.0, 5.0]),
        )
        .with("tableCurrency", Style::new().alignment(TextAlign::Right))
        .with(
            "footerText",
            Style::new()
                .font_size(8.0)
                .margin([40.0, 0.0, 40.0, 0.0])
                .alignment(TextAlign::Center)
                .color("#666666"),
        )
        .with(
            "pageNumber",
            Style::new()
                .font_size(9.0)
                .margin([0.0, 10.0, 40.0, 0.0])
                .alignment(TextAlign::Right),
        )
        .with(
            "companyDetails",
            Style::new().font_size(10.0).color("#333333"),
        )
        .with(
            "signatureBox",
            Style::new().margin([0.0, 50.0, 0.0, 10.0]),
        )
}

pub fn invoice() -> StylePack {
    StylePack::new()
        .with(
            "invoiceHeader",
            Style::new()
                .font_size(18.0)
                .bold()
                .margin([0.0, 0.0, 0.0, 10.0])
                .color("#2c3e50"),
        )
        .with(
            "invoiceSubheader",
            Style::new()
                .font_size(14.0)
                .bold()
                .margin([0.0, 10.0, 0.0, 5.0])
                .color("#34495e"),
        )
        .with(
            "customerInfo",
            Style::new().font_size(11.0).margin([0.0, 5.0, 0.0, 5.0]),
        )
        .with(
            "totalsTable",
            Style::new().font_size(11.0).bold().alignment(TextAlign::Right),
        )
}

pub fn purchase_order() -> StylePack {
    StylePack::new()
        .with(
            "headerTitle",
            Style::new().font_size(14.0).bold().margin([0.0, 5.0, 0.0, 0.0]),
        )
        .with("infoTitle", Style::new().font_size(10.0).bold())
        .with(
            "infoText",
            Style::new().font_size(9.0).margin([0.0, 1.0, 0.0, 1.0]),
        )
        .with("documentTitle", Style::new().font_size(12.0).bold())
        .with("tableHeader", Style::new().font_size(9.0))
        .with(
            "footerRole",
            Style::new()
                .font_size(9.0)
                .alignment(TextAlign::Center)
                .margin([0.0, 5.0, 0.0, 0.0]),
        )
}

pub fn statement_of_account() -> StylePack {
    StylePack::new()
        .with(
            "companyName",
            Style::new().font_size(11.0).bold().margin([0.0, 0.0, 0.0, 2.0]),
        )
        .with("companyAddress", Style::new().font_size(9.0))
        .with("companySmall", Style::new().font_size(8.0))
        .with(
            "documentTitle",
            Style::new().font_size(12.0).bold().margin([0.0, 4.0, 0.0, 4.0]),
        )
        .with(
            "infoText",
            Style::new().font_size(9.0).margin([0.0, 2.0, 0.0, 2.0]),
        )
        .with(
            "tableHeader",
            Style::new().font_size(9.0).bold().no_fill(),
        )
        .with("totalsLabel", Style::new().font_size(9.0))
        .with("totalsLabelBold", Style::new().font_size(9.0).bold())
        .with("totalsValue", Style::new().font_size(9.0))
        .with("totalsValueBold", Style::new().font_size(10.0).bold())
        .with(
            "footerTotals",
            Style::new().font_size(9.0).margin([0.0, 2.0, 0.0, 0.0]),
        )
        .with(
            "footerTotalsBold",
            Style::new().font_size(10.0).bold().margin([0.0, 4.0, 0.0, 0.0]),
        )
}

/// Template-specific packs shipped with the crate. Quotations use the base pack as is.
pub fn builtin_overrides() -> Vec<(&'static str, StylePack)> {
    vec![
        (INVOICE, invoice()),
        (PURCHASE_ORDER, purchase_order()),
        (STATEMENT_OF_ACCOUNT, statement_of_account()),
    ]
}
