//! The built-in document templates.
//!
//! Each template is a plain function of the request payload and its composed style pack.
//! The set is closed: a template becomes available by being registered here, never by
//! loading code at runtime.

mod invoice;
mod purchase_order;
mod quotation;
mod statement_of_account;

use folio_style::packs;
use folio_traits::TemplateFn;
use std::collections::BTreeMap;

pub use invoice::invoice;
pub use purchase_order::purchase_order;
pub use quotation::quotation;
pub use statement_of_account::statement_of_account;

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateFn>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoice, purchase order, quotation and statement of account.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(packs::INVOICE, invoice);
        registry.register(packs::PURCHASE_ORDER, purchase_order);
        registry.register(packs::QUOTATION, quotation);
        registry.register(packs::STATEMENT_OF_ACCOUNT, statement_of_account);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, template: TemplateFn) {
        self.templates.insert(name.into(), template);
    }

    pub fn get(&self, name: &str) -> Option<TemplateFn> {
        self.templates.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}
