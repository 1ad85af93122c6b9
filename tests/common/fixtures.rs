use serde_json::{Value, json};

pub const ORG: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
pub const REPORT: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

/// A 1x1 RGBA PNG.
pub const PIXEL_PNG: &[u8] = &[
    137, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 13, 73, 72, 68, 82, 0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0,
    0, 0, 31, 21, 196, 137, 0, 0, 0, 13, 73, 68, 65, 84, 120, 218, 99, 100, 248, 207, 80, 15, 0, 3,
    134, 1, 128, 90, 52, 125, 107, 0, 0, 0, 0, 73, 69, 78, 68, 174, 66, 96, 130,
];

/// A stored report greeting the customer.
pub fn greeting_template() -> Value {
    json!({
        "content": [
            { "text": "Hello {{customer.name}}", "style": "header" },
            "Account {{account.number}}"
        ]
    })
}

pub fn invoice_payload(item_count: usize) -> Value {
    let items: Vec<Value> = (0..item_count)
        .map(|i| json!({ "description": format!("Widget {}", i + 1), "quantity": i + 1, "unitPrice": 2.5 }))
        .collect();
    json!({
        "invoiceNumber": "INV-1001",
        "date": "2024-03-01",
        "dueDate": "2024-03-31",
        "companyInfo": {
            "name": "Acme Ltd",
            "address": "1 Main Street",
            "city": "Springfield",
            "phone": "555-0100",
            "email": "billing@acme.test"
        },
        "customer": { "name": "Globex", "address": "2 Side Street" },
        "items": items,
        "subtotal": 25, "tax": 2.5, "total": 27.5,
        "notes": "Thank you for your business"
    })
}

pub fn purchase_order_payload() -> Value {
    json!({
        "companyInfo": { "title": "Acme Hotels", "name": "Acme Hotels LLC" },
        "supplierInfo": { "name": "Linen Co", "address": "3 Mill Road" },
        "orderInfo": { "number": "PO-77", "date": "2024-04-02", "paymentTerms": "30 days" },
        "items": [
            { "article": "Towels", "unit": "pc", "qty": 20, "unitPrice": 4.5, "vatPercent": 5, "vatValue": 4.5, "total": 94.5 },
            { "article": "Sheets", "unit": "pc", "qty": 10, "unitPrice": 12, "vatPercent": 5, "vatValue": 6, "total": 126 }
        ],
        "totals": { "net": 210, "vat": 10.5, "gross": 220.5 }
    })
}

pub fn quotation_payload() -> Value {
    json!({
        "companyInfo": { "name": "Acme Furniture", "address": "4 Oak Lane" },
        "clientInfo": { "name": "Globex", "address": "2 Side Street" },
        "items": [
            { "description": "Chair", "qty": 2, "price": 50, "amount": 100 },
            { "description": "Desk", "qty": 1, "price": 200, "amount": 200 }
        ],
        "terms": ["Valid for 30 days"]
    })
}

pub fn statement_payload() -> Value {
    json!({
        "accountName": "Globex",
        "statementDate": "2024-01-31",
        "items": [
            { "docNo": "INV-1", "date": "2024-01-05", "party": "Globex", "billAmt": 100, "vatAmt": 5, "totalAmt": 105 }
        ],
        "summary": { "billTotal": 100, "vatTotal": 5, "grossTotal": 105 }
    })
}
