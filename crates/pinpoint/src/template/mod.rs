//! Template-driven snippet rendering.
//!
//! A stored configuration string is parsed into a [`TemplateConfig`], resolved
//! against the closed [`Template`] registry, and applied to an
//! [`ElementSnapshot`](crate::dom::ElementSnapshot) and its selector.

mod config;
mod render;
mod strategy;

pub use config::{
    default_config_with_help, parse, preset, try_parse, TemplateConfig, DEFAULT_TEMPLATE_CONFIG, PRESETS,
    TEMPLATE_HELP,
};
pub use render::{render, render_raw, try_render};
pub use strategy::{
    custom_format, CustomFormatOptions, CypressOptions, DataAttributeOptions, ElementInfoOptions,
    PlaywrightOptions, SeleniumOptions, StrategyKind, Template, CYPRESS_QUERY_COMMANDS,
    TOKEN_CLASS_NAME, TOKEN_DATA_CY, TOKEN_ID, TOKEN_ROLE, TOKEN_SELECTOR, TOKEN_TAG_NAME,
    TOKEN_TEXT_CONTENT,
};
