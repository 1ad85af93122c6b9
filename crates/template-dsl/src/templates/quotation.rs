use crate::builders::*;
use crate::widgets::{COMPANY_LOGO, amount, field_or, labelled, spacer};
use folio_jpath::{resolve_array, resolve_f64, resolve_str};
use folio_style::{StylePack, TextAlign};
use folio_types::{DocumentDefinition, PageDecoration};
use serde_json::{Value, json};

/// Price quotation with optional item pictures.
///
/// The boxed company header is drawn on the first page only. Items may carry an `image`
/// reference, which is embedded at 40x40 points.
pub fn quotation(payload: &Value, _styles: &StylePack) -> DocumentDefinition {
    let header_node = company_header(payload);
    let header = PageDecoration::generated(move |page| {
        (page.current_page == 1).then(|| header_node.clone())
    });

    let info_rows = [
        ("No:", "quotationInfo.number", ""),
        ("Date:", "quotationInfo.date", ""),
        ("Terms:", "quotationInfo.terms", ""),
        ("Currency:", "quotationInfo.currency", "AED"),
        ("S/Man:", "quotationInfo.salesman", ""),
    ]
    .map(|(label, path, fallback)| {
        [
            Text::new(label).style("infoText"),
            Text::new(field_or(payload, path, fallback)).style("infoText"),
        ]
    });

    let parties = Table::new()
        .widths([Width::Percent(50.0), Width::Percent(50.0)])
        .row([
            Stack::new()
                .child(Text::new("M/S").style("infoText"))
                .child(Text::new(resolve_str("clientInfo.name", payload)).style("infoText"))
                .child(Text::new(resolve_str("clientInfo.address", payload)).style("infoText"))
                .border([true, true, false, true])
                .margin([6.0, 0.0, 6.0, 0.0])
                .build(),
            Table::new()
                .widths([Width::Points(60.0), Width::Star])
                .rows(info_rows)
                .layout(TableLayout::NoBorders)
                .border([false, true, true, true])
                .margin([6.0, 0.0, 6.0, 0.0])
                .build(),
        ])
        .layout(Lines::grid(0.8, "#000").padding([4.0, 3.0, 4.0, 3.0]).into());

    let item_rows = resolve_array("items", payload)
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let picture = match resolve_str("image", item) {
                src if src.is_empty() => Text::empty().font_size(9.0).build(),
                src => Image::new(src).size(40.0, 40.0).build(),
            };
            vec![
                Text::new((i + 1).to_string()).font_size(9.0).build(),
                picture,
                Text::new(resolve_str("description", item)).font_size(9.0).build(),
                Text::new(resolve_str("qty", item))
                    .font_size(9.0)
                    .alignment(TextAlign::Center)
                    .build(),
                Text::new(amount(resolve_f64("price", item)))
                    .font_size(9.0)
                    .alignment(TextAlign::Right)
                    .build(),
                Text::new(amount(resolve_f64("amount", item)))
                    .font_size(9.0)
                    .alignment(TextAlign::Right)
                    .build(),
            ]
        });

    let items = Table::new()
        .header_rows(1)
        .widths([
            Width::Auto,
            Width::Auto,
            Width::Star,
            Width::Auto,
            Width::Auto,
            Width::Auto,
        ])
        .row(
            ["Sno", "Image", "Item", "Qty", "Price (AED)", "Amount"]
                .map(|h| Text::new(h).style("tableHeader")),
        )
        .rows(item_rows)
        .layout(Lines::grid(0.5, "black").into());

    let total_row = |label: &str, label_style: &str, path: &str, value_style: &str, top: bool| {
        [
            Text::new(label)
                .alignment(TextAlign::Right)
                .style(label_style)
                .border([true, top, false, true]),
            Text::new(amount(resolve_f64(path, payload)))
                .alignment(TextAlign::Right)
                .style(value_style)
                .border([true, true, true, true]),
        ]
    };
    let totals = Table::new()
        .widths([Width::Star, Width::Auto])
        .row(total_row("Total Amount in AED", "totalsLabelBold", "summary.totalAmount", "totalsValue", true))
        .row(total_row("VAT @ 5%", "totalsLabel", "summary.vatAmount", "totalsValue", false))
        .row(total_row("Net Amount", "totalsLabelBold", "summary.netAmount", "totalsValueBold", false))
        .layout(Lines::grid(0.8, "#000").into());

    let terms = resolve_array("terms", payload)
        .iter()
        .map(|t| Text::new(folio_jpath::stringify(t)).style("infoText"));
    let closing = Stack::new()
        .child(
            Text::new("Terms & Conditions:")
                .style("totalsLabelBold")
                .margin([0.0, 5.0, 0.0, 3.0])
                .attr("decoration", "underline"),
        )
        .children(terms)
        .child(spacer(16.0))
        .child(
            Text::new(format!("For {}", resolve_str("companyInfo.name", payload)))
                .style("infoText")
                .margin([0.0, 5.0, 0.0, 2.0])
                .bold(),
        )
        .child(Text::new(resolve_str("footer.contactPerson", payload)).style("infoText").bold())
        .child(Text::new(resolve_str("footer.phone", payload)).style("infoText").bold())
        .child(
            Text::new(field_or(payload, "footer.business", "Business Solutions"))
                .style("infoText")
                .bold(),
        )
        .margin([8.0, 6.0, 8.0, 6.0]);
    let closing_box = Table::new()
        .widths([Width::Star])
        .row([closing])
        .layout(Lines::grid(0.8, "#000").padding([6.0, 4.0, 6.0, 4.0]).into());

    DocumentDefinition::new(json!({
        "pageSize": "A4",
        "pageMargins": [40, 107.8, 40, 50],
        "content": [parties.build(), items.build(), totals.build(), closing_box.build()],
    }))
    .with_header(header)
}

fn company_header(payload: &Value) -> Value {
    let company = Stack::new()
        .child(Text::new(resolve_str("companyInfo.name", payload)).style("companyName"))
        .child(Text::new(resolve_str("companyInfo.address", payload)).style("companyAddress"))
        .child(Text::new(labelled("Phone", resolve_str("companyInfo.phone", payload))).style("companySmall"))
        .child(Text::new(labelled("Email", resolve_str("companyInfo.email", payload))).style("companySmall"))
        .border([true, true, false, true]);
    let logo = Stack::new()
        .child(
            Image::new(COMPANY_LOGO)
                .width(Width::Points(30.0))
                .alignment(TextAlign::Center),
        )
        .child(spacer(12.0))
        .child(
            Text::new(format!("TRN {}", resolve_str("companyInfo.trn", payload)))
                .alignment(TextAlign::Right)
                .style("companySmall"),
        )
        .border([false, true, true, true]);
    let title = Text::new(field_or(payload, "documentTitle", "QUOTATION"))
        .col_span(2)
        .style("documentTitle")
        .alignment(TextAlign::Center);

    Table::new()
        .widths([Width::Percent(70.0), Width::Percent(30.0)])
        .row([company.build(), logo.build()])
        .row([title.build(), json!({})])
        .layout(
            Lines::new()
                .h_line_widths(&[0.8, 0.5, 0.8])
                .v_line_width(0.8)
                .h_line_color("#000")
                .padding([8.0, 4.0, 8.0, 4.0])
                .into(),
        )
        .margin([40.0, 30.0, 40.0, 0.0])
        .build()
}
