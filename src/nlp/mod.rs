//! Document annotation contracts and implementations

pub mod annotator;

pub use annotator::{
    AnnotatedDocument, Annotator, Entity, EntityLabel, LexicalAnnotator, PosTag, Token,
};
