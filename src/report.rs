//! Report assembly: a director drives any builder through the same fixed steps
use super::error::ReportError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Content,
    Footer,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::Content => "content",
            Section::Footer => "footer",
        };
        f.write_str(name)
    }
}

/// A fully assembled report. Fields are already formatted by the builder that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    header: String,
    content: String,
    footer: String,
}

impl Report {
    pub fn header(&self) -> &str {
        &self.header
    }
    pub fn content(&self) -> &str {
        &self.content
    }
    pub fn footer(&self) -> &str {
        &self.footer
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.header, self.content, self.footer)
    }
}

/// The steps a [`ReportDirector`] can drive. Each setter formats its input the
/// way the implementing variant wants before storing it.
pub trait ReportBuilder {
    fn set_header(&mut self, header: &str);
    fn set_content(&mut self, content: &str);
    fn set_footer(&mut self, footer: &str);
    /// Fails if any of the three sections was never set.
    fn get_report(&self) -> Result<Report, ReportError>;
}

// Sections collected so far, shared by both variants
#[derive(Debug, Default)]
struct Draft {
    header: Option<String>,
    content: Option<String>,
    footer: Option<String>,
}

impl Draft {
    fn finalise(&self) -> Result<Report, ReportError> {
        let header = self
            .header
            .clone()
            .ok_or(ReportError::MissingSection(Section::Header))?;
        let content = self
            .content
            .clone()
            .ok_or(ReportError::MissingSection(Section::Content))?;
        let footer = self
            .footer
            .clone()
            .ok_or(ReportError::MissingSection(Section::Footer))?;

        Ok(Report {
            header,
            content,
            footer,
        })
    }
}

/// Plain text output, every section carries a label prefix.
#[derive(Debug, Default)]
pub struct TextReportBuilder {
    draft: Draft,
}

impl TextReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportBuilder for TextReportBuilder {
    fn set_header(&mut self, header: &str) {
        self.draft.header = Some(format!("TEXT HEADER: {header}"));
    }
    fn set_content(&mut self, content: &str) {
        self.draft.content = Some(format!("TEXT CONTENT: {content}"));
    }
    fn set_footer(&mut self, footer: &str) {
        self.draft.footer = Some(format!("TEXT FOOTER: {footer}"));
    }
    fn get_report(&self) -> Result<Report, ReportError> {
        self.draft.finalise()
    }
}

/// HTML output. Input text is inserted verbatim, without escaping.
#[derive(Debug, Default)]
pub struct HtmlReportBuilder {
    draft: Draft,
}

impl HtmlReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportBuilder for HtmlReportBuilder {
    fn set_header(&mut self, header: &str) {
        self.draft.header = Some(format!("<h1>{header}</h1>"));
    }
    fn set_content(&mut self, content: &str) {
        self.draft.content = Some(format!("<p>{content}</p>"));
    }
    fn set_footer(&mut self, footer: &str) {
        self.draft.footer = Some(format!("<footer>{footer}</footer>"));
    }
    fn get_report(&self) -> Result<Report, ReportError> {
        self.draft.finalise()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Html,
}

impl ReportFormat {
    /// A fresh builder for this format
    pub fn builder(self) -> Box<dyn ReportBuilder> {
        match self {
            ReportFormat::Text => Box::new(TextReportBuilder::new()),
            ReportFormat::Html => Box::new(HtmlReportBuilder::new()),
        }
    }
}

pub const REPORT_TITLE: &str = "Report 2026";
pub const REPORT_BODY: &str = "Sales grew 20%";
pub const REPORT_CLOSING: &str = "End of report";

#[derive(Debug, Default)]
pub struct ReportDirector;

impl ReportDirector {
    pub fn new() -> Self {
        Self
    }

    /// Runs header, content and footer in that order against `builder`, then
    /// returns what it assembled.
    pub fn construct(&self, builder: &mut dyn ReportBuilder) -> Result<Report, ReportError> {
        builder.set_header(REPORT_TITLE);
        builder.set_content(REPORT_BODY);
        builder.set_footer(REPORT_CLOSING);
        builder.get_report()
    }
}
