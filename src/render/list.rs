use crate::error::RenderError;
use crate::models::book::BookRecord;
use minijinja::{context, Environment};
use serde::Serialize;

pub const TEMPLATE_NAME: &str = "list.html";
pub const TEMPLATE: &str = include_str!("templates/list.html");

/// One selectable entry; `index` is the position in the displayed sequence
/// and is what the row's link selects.
#[derive(Debug, Serialize)]
pub struct ListRow<'a> {
    pub index: usize,
    pub title: &'a str,
    pub author: &'a str,
    pub cover_url: &'a str,
    pub rating: String,
    pub ebook: &'static str,
}

pub fn rows(records: &[BookRecord]) -> Vec<ListRow<'_>> {
    records
        .iter()
        .enumerate()
        .map(|(index, book)| ListRow {
            index,
            title: &book.title,
            author: &book.author,
            cover_url: &book.cover_url,
            rating: book.rating_label(),
            ebook: book.ebook_label(),
        })
        .collect()
}

pub fn render(env: &Environment<'_>, records: &[BookRecord]) -> Result<String, RenderError> {
    let template = env.get_template(TEMPLATE_NAME)?;
    Ok(template.render(context! { rows => rows(records) })?)
}
