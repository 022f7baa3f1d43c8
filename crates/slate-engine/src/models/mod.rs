pub mod presentation;
pub mod slide;

pub use presentation::{BoundsError, DATE_FORMAT, Presentation, ValidationError};
pub use slide::{Slide, SlideMetadata};
