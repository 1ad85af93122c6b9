//! A fluent API for building folio document nodes, and the built-in templates written
//! with it.
//!
//! Builders produce plain JSON nodes, the same shape stored templates use, so a built-in
//! template and a stored one go through identical assembly and rendering.
//!
//! ```ignore
//! use folio_template_dsl::builders::*;
//!
//! fn titled_section(title: &str, body: impl NodeBuilder) -> Stack {
//!     Stack::new()
//!         .child(Text::new(title).style("subheader"))
//!         .child(body)
//! }
//!
//! let node = titled_section("Notes", Text::new("Thank you for your business!")).build();
//! ```

mod block;
mod image;
mod node;
mod table;
mod text;
pub mod templates;
pub mod widgets;

/// Import with `use folio_template_dsl::builders::*;`.
pub mod builders {
    pub use super::block::{Columns, Stack};
    pub use super::image::{Canvas, Image};
    pub use super::node::{NodeBuilder, Width};
    pub use super::table::{Lines, Table, TableLayout};
    pub use super::text::Text;
}

pub use templates::TemplateRegistry;

#[cfg(test)]
mod tests {
    use super::builders::*;
    use super::templates::*;
    use super::widgets::*;
    use folio_style::{StyleRegistry, TextAlign};
    use folio_types::PageContext;
    use serde_json::{Value, json};

    fn page(current_page: usize, page_count: usize) -> PageContext {
        PageContext {
            current_page,
            page_count,
        }
    }

    /// Row count of the first table found in `content`.
    fn first_table_body(content: &Value) -> &Vec<Value> {
        content
            .as_array()
            .unwrap()
            .iter()
            .find_map(|n| n.get("table"))
            .and_then(|t| t["body"].as_array())
            .unwrap()
    }

    #[test]
    fn text_builder_emits_attributes() {
        let node = Text::new("Total")
            .style("a")
            .style("b")
            .bold()
            .alignment(TextAlign::Right)
            .margin([0.0, 1.0, 2.0, 3.0])
            .build();
        assert_eq!(
            node,
            json!({
                "text": "Total",
                "style": ["a", "b"],
                "bold": true,
                "alignment": "right",
                "margin": [0.0, 1.0, 2.0, 3.0]
            })
        );
    }

    #[test]
    fn table_builder_emits_widths_header_rows_and_layout() {
        let node = Table::new()
            .header_rows(1)
            .widths([Width::Star, Width::Auto, Width::Points(60.0), Width::Percent(30.0)])
            .row(["a", "b", "c", "d"])
            .layout(TableLayout::LightHorizontalLines)
            .build();
        assert_eq!(node["table"]["headerRows"], 1);
        assert_eq!(node["table"]["widths"], json!(["*", "auto", 60.0, "30%"]));
        assert_eq!(node["table"]["body"], json!([["a", "b", "c", "d"]]));
        assert_eq!(node["layout"], "lightHorizontalLines");
    }

    #[test]
    fn custom_lines_layout() {
        let node = Table::new()
            .row(["x"])
            .layout(Lines::new().h_line_widths(&[0.0, 0.5]).padding([1.0, 2.0, 3.0, 4.0]).into())
            .build();
        assert_eq!(node["layout"]["hLineWidth"], json!([0.0, 0.5]));
        assert_eq!(node["layout"]["paddingBottom"], 4.0);
    }

    #[test]
    fn canvas_and_image_builders() {
        let rule = Canvas::rule(100.0, 0.4).line_color("#000").build();
        assert_eq!(rule["canvas"][0]["type"], "line");
        assert_eq!(rule["canvas"][0]["x2"], 100.0);
        assert_eq!(rule["canvas"][0]["lineColor"], "#000");

        let image = Image::new("logo.png").size(40.0, 40.0).build();
        assert_eq!(image, json!({ "image": "logo.png", "width": 40.0, "height": 40.0 }));
    }

    #[test]
    fn registry_lists_builtin_templates() {
        let registry = TemplateRegistry::builtin();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["invoice", "purchaseOrder", "quotation", "statementOfAccount"]
        );
        assert!(registry.get("invoice").is_some());
        assert!(registry.get("receipt").is_none());
    }

    #[test]
    fn invoice_rows_follow_items() {
        let styles = StyleRegistry::builtin().pack_for("invoice");
        let payload = json!({
            "invoiceNumber": "INV-7",
            "items": [
                { "description": "Widget", "quantity": 2, "unitPrice": 10.5 },
                { "description": "Gadget", "quantity": 1, "unitPrice": 3 }
            ],
            "subtotal": 24, "tax": 1.2, "total": 25.2
        });
        let def = invoice(&payload, &styles);
        let body = first_table_body(&def.root["content"]);
        assert_eq!(body.len(), 3);
        assert_eq!(body[1][0]["text"], "Widget");
        assert_eq!(body[1][3]["text"], "$21.00");
        assert_eq!(def.root["content"][0]["style"], "invoiceHeader");
        assert!(def.header.is_none() && def.footer.is_none());
    }

    #[test]
    fn invoice_with_empty_items_has_only_the_header_row() {
        let styles = StyleRegistry::builtin().pack_for("invoice");
        for payload in [json!({ "items": [] }), json!({})] {
            let def = invoice(&payload, &styles);
            let body = first_table_body(&def.root["content"]);
            assert_eq!(body.len(), 1);
            assert_eq!(body[0][0]["text"], "Description");
        }
    }

    #[test]
    fn invoice_falls_back_to_base_styles() {
        let styles = StyleRegistry::builtin().pack_for("quotation");
        let def = invoice(&json!({}), &styles);
        assert_eq!(def.root["content"][0]["style"], "header");
    }

    #[test]
    fn purchase_order_header_only_on_first_page() {
        let styles = StyleRegistry::builtin().pack_for("purchaseOrder");
        let def = purchase_order(&json!({ "companyInfo": { "title": "Acme Hotels" } }), &styles);
        let header = def.header.expect("purchase order has a header");
        let first = header.for_page(&page(1, 2)).unwrap();
        assert_eq!(first["stack"][0]["image"], COMPANY_LOGO);
        assert_eq!(first["stack"][1]["text"], "Acme Hotels");
        assert!(header.for_page(&page(2, 2)).is_none());

        let footer = def.footer.expect("purchase order has a footer");
        let node = footer.for_page(&page(2, 2)).unwrap();
        assert_eq!(node[0]["columns"].as_array().unwrap().len(), 4);
        assert_eq!(def.root["pageMargins"], json!([40, 60, 40, 90]));
    }

    #[test]
    fn quotation_embeds_item_images_only_when_present() {
        let styles = StyleRegistry::builtin().pack_for("quotation");
        let payload = json!({
            "items": [
                { "description": "Chair", "qty": 2, "price": 50, "amount": 100, "image": "chair.png" },
                { "description": "Desk", "qty": 1, "price": 200, "amount": 200 }
            ],
            "terms": ["Valid 30 days", "Delivery extra"]
        });
        let def = quotation(&payload, &styles);
        let items = &def.root["content"][1]["table"]["body"];
        assert_eq!(items[1][1], json!({ "image": "chair.png", "width": 40.0, "height": 40.0 }));
        assert_eq!(items[2][1]["text"], "");
        assert_eq!(items[2][4]["text"], "200.00");

        let header = def.header.unwrap();
        assert!(header.for_page(&page(1, 1)).is_some());
        assert!(header.for_page(&page(2, 2)).is_none());
    }

    #[test]
    fn statement_always_closes_with_totals() {
        let styles = StyleRegistry::builtin().pack_for("statementOfAccount");
        let def = statement_of_account(
            &json!({ "accountName": "Acme", "items": [], "summary": { "billTotal": 5 } }),
            &styles,
        );
        let body = first_table_body(&def.root["content"]);
        assert_eq!(body.len(), 3);
        assert_eq!(body[0][0]["colSpan"], 9);
        assert_eq!(body[0].as_array().unwrap().len(), 9);
        assert_eq!(body[2][6]["text"], "5.00");
        assert_eq!(body[2][7]["text"], "0.00");
        assert!(def.footer.unwrap().for_page(&page(1, 1)).is_none());
        assert!(def.header.unwrap().for_page(&page(3, 3)).is_some());
    }

    #[test]
    fn widget_helpers() {
        assert_eq!(amount(Some(3.0)), "3.00");
        assert_eq!(amount(None), "");
        let payload = json!({ "a": "", "b": "set" });
        assert_eq!(field_or(&payload, "a", "x"), "x");
        assert_eq!(field_or(&payload, "b", "x"), "set");
        assert_eq!(field_or(&payload, "c", "x"), "x");
    }
}
