//! HTML rendering for the widget.
//!
//! The list and detail renderers each produce a fragment for the view area;
//! [`Renderer::page`] wraps whichever fragment is active in the page shell
//! holding the search controls. Templates are embedded at compile time and
//! auto-escaped, so catalog text can never inject markup.

pub mod detail;
pub mod list;

use crate::error::RenderError;
use crate::models::book::{BookRecord, SearchField};
use minijinja::{context, Environment};
use serde::Serialize;

const PAGE_TEMPLATE_NAME: &str = "page.html";
const PAGE_TEMPLATE: &str = include_str!("templates/page.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    List,
    Detail,
}

/// A rendered view fragment. Only one exists at a time, so list and detail
/// are never shown together.
#[derive(Debug, Clone)]
pub struct Screen {
    pub kind: ViewKind,
    pub html: String,
}

/// Control state echoed back into the page so the form reflects what the
/// user last did.
#[derive(Debug, Clone, Default)]
pub struct PageControls {
    pub query: String,
    pub field: SearchField,
    pub ebook_only: bool,
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(list::TEMPLATE_NAME, list::TEMPLATE)?;
        env.add_template(detail::TEMPLATE_NAME, detail::TEMPLATE)?;
        env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn list(&self, records: &[BookRecord]) -> Result<Screen, RenderError> {
        Ok(Screen {
            kind: ViewKind::List,
            html: list::render(&self.env, records)?,
        })
    }

    pub fn detail(&self, book: &BookRecord) -> Result<Screen, RenderError> {
        Ok(Screen {
            kind: ViewKind::Detail,
            html: detail::render(&self.env, book)?,
        })
    }

    pub fn page(&self, screen: &Screen, controls: &PageControls) -> Result<String, RenderError> {
        let fields: Vec<&str> = SearchField::ALL.iter().map(|f| f.token()).collect();
        let template = self.env.get_template(PAGE_TEMPLATE_NAME)?;

        Ok(template.render(context! {
            content => screen.html,
            view => screen.kind,
            query => controls.query,
            selected_field => controls.field.token(),
            fields,
            ebook_only => controls.ebook_only,
        })?)
    }
}
