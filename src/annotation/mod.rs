mod types;

pub(crate) use types::bounds_of;
pub use types::{Annotation, AnnotationId, AnnotationType};
