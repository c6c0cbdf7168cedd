//! Catalogue API client methods

use super::{ClientError, LibraryClient};
use crate::types::{Book, BookImage, BookSearchResponse, BookUpdate, MessageResponse, NewBook};
use reqwest::Method;
use reqwest::multipart::{Form, Part};

impl LibraryClient {
    /// List the whole catalogue
    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        self.get("/books/").await
    }

    /// Get one book
    pub async fn get_book(&self, id: i64) -> Result<Book, ClientError> {
        self.get(&format!("/books/{id}")).await
    }

    /// Books whose title starts with `query`, ignoring case
    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>, ClientError> {
        let request = self
            .request(Method::GET, "/books/search")?
            .query(&[("query", query)]);
        let response: BookSearchResponse = self.execute(request).await?;
        Ok(response.books)
    }

    /// Add a book to the catalogue
    pub async fn add_book(&self, book: NewBook) -> Result<MessageResponse, ClientError> {
        let mut form = Form::new()
            .text("title", book.title)
            .text("author", book.author)
            .text("quantity", book.quantity.to_string())
            .text("available", book.available.to_string());
        if let Some(image) = book.image {
            form = form.part("image", image_part(image)?);
        }

        let request = self.request(Method::POST, "/books/add")?.multipart(form);
        self.execute(request).await
    }

    /// Change the given fields of a book
    pub async fn update_book(
        &self,
        id: i64,
        update: BookUpdate,
    ) -> Result<MessageResponse, ClientError> {
        let mut form = Form::new();
        if let Some(title) = update.title {
            form = form.text("title", title);
        }
        if let Some(author) = update.author {
            form = form.text("author", author);
        }
        if let Some(quantity) = update.quantity {
            form = form.text("quantity", quantity.to_string());
        }
        if let Some(image) = update.image {
            form = form.part("image", image_part(image)?);
        }

        let request = self
            .request(Method::PUT, &format!("/books/{id}"))?
            .multipart(form);
        self.execute(request).await
    }

    /// Mark a book as available again
    pub async fn mark_book_available(&self, id: i64) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::PUT, &format!("/books/{id}/update-availability"))?;
        self.execute(request).await
    }

    /// Remove a book. The server refuses while it has active loans.
    pub async fn delete_book(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("/books/{id}")).await
    }
}

fn image_part(image: BookImage) -> Result<Part, ClientError> {
    Ok(Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.mime_type)?)
}
