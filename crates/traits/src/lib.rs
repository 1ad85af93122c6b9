pub mod loader;
pub mod resource;
pub mod selector;

pub use loader::{
    InMemoryTemplateLoader, LoadError, LoadedTemplate, TemplateFn, TemplateLoader, TemplateSource,
};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
pub use selector::{SelectorError, TemplateSelector};
