//! Format implementations
//!
//! This module contains the output formats. Each one is a rule table plus its escaping rules;
//! the traversal itself lives in [crate::render].

pub mod html;
pub mod markdown;
pub mod wiki;

pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
pub use wiki::WikiFormat;
