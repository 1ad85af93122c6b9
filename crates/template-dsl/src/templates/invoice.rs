use crate::builders::*;
use crate::widgets::{amount, field_or, labelled, style_or};
use folio_jpath::{resolve_array, resolve_f64, resolve_str};
use folio_style::{StylePack, TextAlign};
use folio_types::DocumentDefinition;
use serde_json::{Value, json};

/// Customer invoice with an itemized table and totals.
///
/// Reads `invoiceNumber`, `date`, `dueDate`, `companyInfo.*`, `customer.*`,
/// `items[].{description, quantity, unitPrice}`, `subtotal`, `tax`, `total` and `notes`.
/// Page header and footer are left to the shared defaults.
pub fn invoice(payload: &Value, styles: &StylePack) -> DocumentDefinition {
    let header_style = style_or(styles, "invoiceHeader", "header");
    let subheader_style = style_or(styles, "invoiceSubheader", "subheader");

    let company = Stack::new()
        .child(Text::new(field_or(payload, "companyInfo.name", "Your Company Name")).style(subheader_style))
        .child(resolve_str("companyInfo.address", payload))
        .child(resolve_str("companyInfo.city", payload))
        .child(labelled("Phone", resolve_str("companyInfo.phone", payload)))
        .child(labelled("Email", resolve_str("companyInfo.email", payload)))
        .style("companyDetails");

    let details = Stack::new()
        .child(Text::new(labelled("Invoice #", resolve_str("invoiceNumber", payload))).alignment(TextAlign::Right))
        .child(Text::new(labelled("Date", resolve_str("date", payload))).alignment(TextAlign::Right))
        .child(Text::new(labelled("Due Date", resolve_str("dueDate", payload))).alignment(TextAlign::Right));

    let items = resolve_array("items", payload).iter().map(|item| {
        let quantity = resolve_f64("quantity", item);
        let unit_price = resolve_f64("unitPrice", item);
        let line_total = quantity.zip(unit_price).map(|(q, p)| q * p);
        vec![
            Text::new(resolve_str("description", item)).build(),
            Text::new(resolve_str("quantity", item)).build(),
            Text::new(dollars(unit_price)).alignment(TextAlign::Right).build(),
            Text::new(dollars(line_total)).alignment(TextAlign::Right).build(),
        ]
    });

    let table = Table::new()
        .header_rows(1)
        .widths([Width::Star, Width::Auto, Width::Auto, Width::Auto])
        .row(
            ["Description", "Quantity", "Unit Price", "Amount"]
                .map(|h| Text::new(h).style("tableHeader")),
        )
        .rows(items)
        .layout(TableLayout::LightHorizontalLines);

    let totals = Columns::new()
        .column(Text::empty().width(Width::Star))
        .column(
            Stack::new()
                .width(Width::Auto)
                .child(Text::new("Subtotal:").alignment(TextAlign::Right).margin([0.0, 10.0, 0.0, 5.0]))
                .child(Text::new("Tax:").alignment(TextAlign::Right).margin([0.0, 0.0, 0.0, 5.0]))
                .child(Text::new("Total:").alignment(TextAlign::Right).bold()),
        )
        .column(
            Stack::new()
                .width(Width::Auto)
                .style("totalsTable")
                .child(Text::new(dollars(resolve_f64("subtotal", payload))).margin([20.0, 10.0, 0.0, 5.0]))
                .child(Text::new(dollars(resolve_f64("tax", payload))).margin([20.0, 0.0, 0.0, 5.0]))
                .child(Text::new(dollars(resolve_f64("total", payload))).margin([20.0, 0.0, 0.0, 0.0])),
        )
        .margin([0.0, 20.0, 0.0, 20.0]);

    let content = vec![
        Text::new("INVOICE")
            .style(header_style)
            .alignment(TextAlign::Center)
            .build(),
        Columns::new()
            .column(company)
            .column(details)
            .gap(10.0)
            .margin([0.0, 20.0, 0.0, 20.0])
            .build(),
        Text::new("Bill To:")
            .style(subheader_style)
            .margin([0.0, 20.0, 0.0, 5.0])
            .build(),
        Stack::new()
            .child(resolve_str("customer.name", payload))
            .child(resolve_str("customer.address", payload))
            .child(resolve_str("customer.city", payload))
            .child(resolve_str("customer.phone", payload))
            .style("customerInfo")
            .margin([0.0, 0.0, 0.0, 20.0])
            .build(),
        table.build(),
        totals.build(),
        Text::new("Notes:")
            .style(subheader_style)
            .margin([0.0, 20.0, 0.0, 5.0])
            .build(),
        Text::new(field_or(payload, "notes", "Thank you for your business!"))
            .margin([0.0, 0.0, 0.0, 20.0])
            .build(),
    ];

    DocumentDefinition::new(json!({ "content": content }))
}

fn dollars(value: Option<f64>) -> String {
    match amount(value) {
        s if s.is_empty() => s,
        s => format!("${}", s),
    }
}
