/// Presentation layer: everything that turns a filtered view into markup.
pub mod chart;
pub mod html;
pub mod options;
pub mod panels;
pub mod plot;
pub mod table;
