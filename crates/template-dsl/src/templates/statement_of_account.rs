use crate::builders::*;
use crate::widgets::{COMPANY_LOGO, amount};
use folio_jpath::{resolve_array, resolve_f64, resolve_str};
use folio_style::{StylePack, TextAlign};
use folio_types::{DocumentDefinition, PageDecoration};
use serde_json::{Value, json};

const COLUMNS: usize = 9;

/// Customer statement listing documents with bill, VAT and total amounts.
///
/// The boxed company header repeats on every page and the footer is intentionally blank.
/// A totals row always closes the table, so an empty `items` list still renders.
pub fn statement_of_account(payload: &Value, _styles: &StylePack) -> DocumentDefinition {
    let header_node = company_box(payload);
    let header = PageDecoration::generated(move |_| Some(header_node.clone()));
    let footer = PageDecoration::generated(|_| None);

    let account_row = {
        let mut row = vec![
            Text::new(format!(
                "{}\nStatement of Account as on: {}",
                resolve_str("accountName", payload),
                resolve_str("statementDate", payload)
            ))
            .col_span(COLUMNS)
            .border([true, true, true, false])
            .alignment(TextAlign::Left)
            .font_size(10.0)
            .build(),
        ];
        row.extend(std::iter::repeat_n(json!({}), COLUMNS - 1));
        row
    };

    let column_header = [
        ("Doc #", false),
        ("Date", false),
        ("Party", false),
        ("Narration", false),
        ("PO", false),
        ("Remarks", false),
        ("Bill Amt", true),
        ("VAT Amt", true),
        ("Total Amt", true),
    ]
    .map(|(label, numeric)| {
        let cell = Text::new(label).style("tableHeader");
        if numeric {
            cell.alignment(TextAlign::Right)
        } else {
            cell
        }
    });

    let item_rows = resolve_array("items", payload).iter().map(|item| {
        let text_cells = ["docNo", "date", "party", "narration", "po", "remarks"]
            .map(|path| Text::new(resolve_str(path, item)).font_size(9.0));
        let amount_cells = ["billAmt", "vatAmt", "totalAmt"].map(|path| {
            Text::new(amount(resolve_f64(path, item)))
                .font_size(9.0)
                .alignment(TextAlign::Right)
        });
        text_cells.into_iter().chain(amount_cells).collect::<Vec<_>>()
    });

    let boxed = [true, true, true, true];
    let totals_row = std::iter::repeat_n(Text::empty().font_size(9.0).border(boxed), 6)
        .chain(
            ["summary.billTotal", "summary.vatTotal", "summary.grossTotal"].map(|path| {
                Text::new(amount(Some(resolve_f64(path, payload).unwrap_or(0.0))))
                    .font_size(9.0)
                    .alignment(TextAlign::Right)
                    .bold()
                    .border(boxed)
            }),
        )
        .collect::<Vec<_>>();

    let table = Table::new()
        .header_rows(2)
        .widths([
            Width::Auto,
            Width::Auto,
            Width::Star,
            Width::Star,
            Width::Auto,
            Width::Auto,
            Width::Auto,
            Width::Auto,
            Width::Auto,
        ])
        .row(account_row)
        .row(column_header)
        .rows(item_rows)
        .row(totals_row)
        .layout(Lines::grid(0.5, "black").padding([4.0, 3.0, 4.0, 3.0]).into())
        .margin([0.0, 0.0, 0.0, 6.0]);

    DocumentDefinition::new(json!({
        "pageSize": "A4",
        "pageMargins": [30, 110, 30, 70],
        "content": [table.build()],
    }))
    .with_header(header)
    .with_footer(footer)
}

fn company_box(payload: &Value) -> Value {
    let details = Stack::new()
        .width(Width::Percent(70.0))
        .child(
            Text::new(resolve_str("companyInfo.name", payload).to_uppercase())
                .style("companyName")
                .margin([0.0, 0.0, 0.0, 4.0]),
        )
        .child(
            Text::new(resolve_str("companyInfo.address", payload))
                .style("companyAddress")
                .margin([0.0, 0.0, 0.0, 3.0]),
        )
        .child(
            Columns::new()
                .column(
                    Text::new(format!("Tel: {}", resolve_str("companyInfo.phone", payload)))
                        .style("companySmall")
                        .width(Width::Auto),
                )
                .column(
                    Text::new(format!("TRN: {}", resolve_str("companyInfo.trn", payload)))
                        .style("companySmall")
                        .width(Width::Auto)
                        .margin([10.0, 0.0, 0.0, 0.0]),
                ),
        );
    let logo = Stack::new()
        .width(Width::Percent(30.0))
        .alignment(TextAlign::Right)
        .child(
            Image::new(COMPANY_LOGO)
                .size(60.0, 60.0)
                .alignment(TextAlign::Right),
        );

    Table::new()
        .widths([Width::Star])
        .row([Columns::new()
            .column(details)
            .column(logo)
            .margin([0.0, 5.0, 0.0, 5.0])])
        .layout(Lines::grid(1.0, "black").padding([8.0, 8.0, 8.0, 8.0]).into())
        .margin([30.0, 20.0, 30.0, 0.0])
        .build()
}
