use crate::error::RenderError;
use crate::models::book::BookRecord;
use minijinja::{context, Environment};
use serde::Serialize;

pub const TEMPLATE_NAME: &str = "detail.html";
pub const TEMPLATE: &str = include_str!("templates/detail.html");

#[derive(Debug, Serialize)]
struct DetailView<'a> {
    title: &'a str,
    author: &'a str,
    cover_url: &'a str,
    publish_year: &'a str,
    rating: String,
    ebook: &'static str,
    isbn: &'a str,
}

pub fn render(env: &Environment<'_>, book: &BookRecord) -> Result<String, RenderError> {
    let view = DetailView {
        title: &book.title,
        author: &book.author,
        cover_url: &book.cover_url,
        publish_year: &book.publish_year,
        rating: book.rating_label(),
        ebook: book.ebook_label(),
        isbn: &book.isbn,
    };

    let template = env.get_template(TEMPLATE_NAME)?;
    Ok(template.render(context! { book => view })?)
}
