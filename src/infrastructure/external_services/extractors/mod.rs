pub mod composite_extractor;
pub mod html_extractor;
pub mod pdf_extractor;
pub mod plain_text_extractor;

pub use composite_extractor::CompositeExtractor;
pub use html_extractor::HtmlExtractor;
pub use pdf_extractor::PdfExtractor;
pub use plain_text_extractor::PlainTextExtractor;
