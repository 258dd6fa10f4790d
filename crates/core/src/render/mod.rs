//! HTML rendering of individual documents.
//!
//! A page is the document body converted with comrak, a definition list of its
//! frontmatter, and a template that places both. Links to other documents are
//! rewritten to point at their generated `.html` pages.

pub mod html;
pub mod metadata;
pub mod template;

use chrono::Local;
use thiserror::Error;
use tracing::warn;

use crate::frontmatter::{self, Frontmatter};
use crate::ids::DocumentId;
use crate::links::DOCUMENT_EXTENSION;

pub use html::{escape_html, markdown_to_html};
pub use metadata::render_metadata;
pub use template::{DEFAULT_TEMPLATE, RenderContext, load_template, render_string};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read template {path}: {source}")]
    TemplateRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to format HTML for {document}: {source}")]
    Format {
        document: String,
        #[source]
        source: std::io::Error,
    },
}

/// A rendered document.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub id: DocumentId,
    pub title: String,
    pub html: String,
    /// Non-fatal problems, such as malformed frontmatter.
    pub warnings: Vec<String>,
}

/// Renders documents into a shared template.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    template: String,
    site_title: String,
    home: Option<DocumentId>,
    extension: String,
    date: String,
}

impl PageRenderer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            site_title: String::new(),
            home: None,
            extension: DOCUMENT_EXTENSION.to_string(),
            date: Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Page every rendered document links back to, and the label for that link.
    ///
    /// Without a home page the link points at `index.html` in the output root.
    pub fn with_home(mut self, home: DocumentId, site_title: impl Into<String>) -> Self {
        self.home = Some(home);
        self.site_title = site_title.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Render one document's source text.
    pub fn render(&self, id: &DocumentId, content: &str) -> Result<RenderedPage, RenderError> {
        let mut warnings = Vec::new();
        let (record, body) = match frontmatter::parse(content) {
            Ok(doc) => (doc.frontmatter.unwrap_or_default(), doc.body),
            Err(e) => {
                warn!("{id}: {e}");
                warnings.push(e.to_string());
                let (_, body) = frontmatter::split(content);
                (Frontmatter::default(), body.to_string())
            }
        };

        let format_err = |source| RenderError::Format { document: id.to_string(), source };

        let prefix = id.root_prefix();
        let title = page_title(id, &record, &body);
        let content_html =
            markdown_to_html(&body, &self.extension, &prefix).map_err(format_err)?;
        let metadata_html =
            render_metadata(&record, &self.extension, &prefix).map_err(format_err)?;

        let mut ctx = RenderContext::new();
        ctx.insert("title".into(), escape_html(&title));
        ctx.insert("site_title".into(), escape_html(&self.site_title));
        ctx.insert("content".into(), content_html);
        ctx.insert("metadata".into(), metadata_html);
        ctx.insert("path".into(), escape_html(id.as_str()));
        ctx.insert("root".into(), prefix.clone());
        let home = match &self.home {
            Some(home) => format!("{prefix}{}", home.with_extension("html")),
            None => format!("{prefix}index.html"),
        };
        ctx.insert("home".into(), escape_html(&home));
        ctx.insert("date".into(), self.date.clone());

        Ok(RenderedPage {
            id: id.clone(),
            title,
            html: render_string(&self.template, &ctx),
            warnings,
        })
    }
}

/// Title: frontmatter `title`, else first heading, else file stem.
pub fn page_title(id: &DocumentId, record: &Frontmatter, body: &str) -> String {
    record
        .title()
        .map(str::to_string)
        .or_else(|| html::first_heading(body))
        .unwrap_or_else(|| id.file_stem().to_string())
}
