pub mod combined;
pub mod document;
pub mod source;

pub use combined::{CombinedAnnotation, OUTSIDE_LABEL};
pub use document::{AnnotationDocument, AnnotationSpan, RawDocument};
pub use source::SourceKind;
