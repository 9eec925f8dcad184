//! Form rendering

mod certificate_form;
mod field_renderer;

pub use certificate_form::draw as draw_certificate_form;
