use crate::builders::*;
use crate::widgets::{COMPANY_LOGO, amount, field_or, labelled};
use folio_jpath::{resolve_array, resolve_f64, resolve_str};
use folio_style::{StylePack, TextAlign};
use folio_types::{DocumentDefinition, PageDecoration};
use serde_json::{Value, json};

const SIGNATURE_ROLES: [(&str, f32); 4] = [
    ("Purchasing Manager", 100.0),
    ("Finance Manager", 100.0),
    ("General Manager", 100.0),
    ("Cluster General Manager", 120.0),
];

const CONDITIONS: [&str; 4] = [
    "1) Acceptance of this order indicates acceptance of all conditions herein.",
    "2) Invoice must accompany goods.",
    "3) Deliveries accepted subject to count, weight & quality.",
    "4) Receiving Time: 9AM - 4PM",
];

/// Purchase order sent to a supplier.
///
/// The logo and company title head the first page only. Every page carries a footer with
/// four signature lines.
pub fn purchase_order(payload: &Value, _styles: &StylePack) -> DocumentDefinition {
    let title = resolve_str("companyInfo.title", payload);
    let header_title = title.clone();
    let header = PageDecoration::generated(move |page| {
        (page.current_page == 1).then(|| {
            Stack::new()
                .child(
                    Image::new(COMPANY_LOGO)
                        .width(Width::Points(80.0))
                        .alignment(TextAlign::Center)
                        .margin([0.0, 10.0, 0.0, 10.0]),
                )
                .child(
                    Text::new(header_title.clone())
                        .alignment(TextAlign::Center)
                        .style("headerTitle"),
                )
                .build()
        })
    });

    let signatures = SIGNATURE_ROLES
        .iter()
        .fold(Columns::new(), |columns, (role, rule)| {
            columns.column(
                Stack::new()
                    .child(Canvas::rule(*rule, 0.4))
                    .child(Text::new(*role).style("footerRole"))
                    .alignment(TextAlign::Center),
            )
        })
        .margin([40.0, 0.0, 40.0, 50.0])
        .build();
    let rule = Canvas::rule(515.0, 0.4).margin([40.0, 0.0, 40.0, 0.0]).build();
    let footer_node = json!([signatures, rule]);
    let footer = PageDecoration::generated(move |_| Some(footer_node.clone()));

    let parties = Columns::new()
        .column(
            Stack::new()
                .width(Width::Percent(35.0))
                .child(
                    Stack::new()
                        .child(Text::new(field_or(payload, "supplierInfo.name", "Supplier Name")).style("infoTitle"))
                        .child(Text::new(field_or(payload, "supplierInfo.address", "Supplier Address")).style("infoText"))
                        .margin([0.0, 0.0, 0.0, 20.0]),
                )
                .child(Text::new(labelled("Tel", resolve_str("supplierInfo.phone", payload))).style("infoText")),
        )
        .column(Stack::new().width(Width::Percent(30.0)).child(Text::empty()))
        .column(
            Stack::new()
                .width(Width::Percent(35.0))
                .child(
                    Stack::new()
                        .child(Text::new(labelled("Company Name", resolve_str("companyInfo.name", payload))).style("infoText"))
                        .child(Text::new(labelled("TRN", resolve_str("companyInfo.trn", payload))).style("infoText"))
                        .child(Text::new(labelled("Title", &title)).style("infoText"))
                        .margin([0.0, 0.0, 0.0, 10.0]),
                )
                .child(Text::new(labelled("Deliver To", resolve_str("companyInfo.deliveryTo", payload))).style("infoText"))
                .child(Text::new(labelled("Phone", resolve_str("companyInfo.phone", payload))).style("infoText"))
                .child(Text::new(resolve_str("companyInfo.website", payload))),
        )
        .gap(10.0)
        .margin([0.0, 20.0, 0.0, 20.0]);

    let document_title = Stack::new()
        .child(
            Text::new("PURCHASE ORDER")
                .style("documentTitle")
                .alignment(TextAlign::Center),
        )
        .child(Canvas::rule(515.0, 0.8).line_color("#000"));

    let order_info = Columns::new()
        .column(
            Stack::new()
                .width(Width::Percent(40.0))
                .children(
                    [
                        ("Order No", "orderInfo.number"),
                        ("Order Date", "orderInfo.date"),
                        ("Cost Centre", "orderInfo.costCentre"),
                        ("Request No", "orderInfo.requestNo"),
                        ("Delivery Date", "orderInfo.deliveryDate"),
                    ]
                    .map(|(label, path)| Text::new(labelled(label, resolve_str(path, payload))).style("infoText")),
                ),
        )
        .column(
            Stack::new()
                .width(Width::Percent(60.0))
                .children(CONDITIONS.map(|line| Text::new(line).style("infoText")))
                .child(
                    Text::new(format!(
                        "5) {}",
                        labelled("Payment Terms", resolve_str("orderInfo.paymentTerms", payload))
                    ))
                    .style("infoText"),
                ),
        )
        .gap(10.0)
        .margin([0.0, 15.0, 0.0, 25.0]);

    let rows = resolve_array("items", payload)
        .iter()
        .enumerate()
        .map(|(i, item)| {
            [
                (i + 1).to_string(),
                resolve_str("article", item),
                resolve_str("unit", item),
                resolve_str("qty", item),
                amount(resolve_f64("unitPrice", item)),
                resolve_f64("vatPercent", item)
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_default(),
                amount(resolve_f64("vatValue", item)),
                amount(resolve_f64("total", item)),
            ]
            .map(|cell| Text::new(cell).font_size(9.0))
        });

    let items = Table::new()
        .header_rows(1)
        .widths([
            Width::Auto,
            Width::Star,
            Width::Auto,
            Width::Auto,
            Width::Auto,
            Width::Auto,
            Width::Auto,
            Width::Auto,
        ])
        .row(
            ["No", "Article", "Unit", "Qty", "Unit Price", "VAT %", "VAT Value", "Total"]
                .map(|h| Text::new(h).style("tableHeader")),
        )
        .rows(rows)
        .layout(Lines::new().h_line_width(0.5).v_line_width(0.0).h_line_color("black").into());

    let totals = Table::new()
        .widths([Width::Star, Width::Auto])
        .rows(
            [
                ("Order Total", "summary.orderTotal"),
                ("VAT Total", "summary.vatTotal"),
                ("Gross Total - AED", "summary.grossTotal"),
            ]
            .map(|(label, path)| {
                [
                    Text::new(label).alignment(TextAlign::Center).font_size(9.0),
                    Text::new(amount(resolve_f64(path, payload)))
                        .alignment(TextAlign::Right)
                        .font_size(9.0),
                ]
            }),
        )
        .layout(
            Lines::new()
                .h_line_widths(&[0.0, 0.5])
                .v_line_width(0.0)
                .h_line_color("black")
                .into(),
        );

    let content = json!([
        parties.build(),
        document_title.build(),
        order_info.build(),
        items.build(),
        totals.build(),
    ]);

    DocumentDefinition::new(json!({
        "pageSize": "A4",
        "pageMargins": [40, 60, 40, 90],
        "content": content,
    }))
    .with_header(header)
    .with_footer(footer)
}
