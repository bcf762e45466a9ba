pub mod template;

pub use template::{Template, TemplateId, TemplateMapper};
