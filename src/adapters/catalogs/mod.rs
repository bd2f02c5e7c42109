pub mod template_assets;

pub use self::template_assets::EmbeddedTemplateStore;
